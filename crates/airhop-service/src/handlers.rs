//! Airport and route query handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use airhop_lib::{Airport, RouteRequest};

use crate::problem::{from_lib_error, ProblemDetails};
use crate::AppState;

/// Airport as returned by `GET /airports/{code}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportResponse {
    /// Display code: three-letter code if present, else four-letter code.
    pub code: String,
    pub id: String,
    pub name: String,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Airport> for AirportResponse {
    fn from(airport: &Airport) -> Self {
        Self {
            code: airport.display_code().to_string(),
            id: airport.id.clone(),
            name: airport.name.clone(),
            iata: airport.iata.clone(),
            icao: airport.icao.clone(),
            latitude: airport.location.latitude,
            longitude: airport.location.longitude,
        }
    }
}

/// Query string accepted by the route endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    pub max_hops: Option<usize>,
}

fn generate_request_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// `GET /airports/{code}`
pub async fn airport_handler(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let request_id = generate_request_id();
    info!(request_id = %request_id, code = %code, "handling airport request");

    match state.network().find_airport(&code) {
        Some(airport) => Json(AirportResponse::from(airport)).into_response(),
        None => ProblemDetails::unknown_airport(&code.to_uppercase(), &request_id).into_response(),
    }
}

/// `GET /routes/{source}/{destination}`
pub async fn route_handler(
    State(state): State<AppState>,
    Path((source, destination)): Path<(String, String)>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Response {
    let request_id = generate_request_id();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ProblemDetails::bad_request(rejection.body_text(), &request_id)
                .into_response();
        }
    };

    info!(
        request_id = %request_id,
        source = %source,
        destination = %destination,
        max_hops = ?query.max_hops,
        "handling route request"
    );

    let mut request = RouteRequest::new(source, destination);
    if let Some(max_hops) = query.max_hops {
        request = request.max_hops(max_hops);
    }

    match state.network().plan_route(&request) {
        Ok(plan) => Json(plan).into_response(),
        Err(error) => {
            warn!(request_id = %request_id, error = %error, "route request failed");
            from_lib_error(&error, &request_id).into_response()
        }
    }
}
