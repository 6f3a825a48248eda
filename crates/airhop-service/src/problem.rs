//! RFC 9457 Problem Details responses.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{header, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

use airhop_lib::Error as LibError;

/// Problem type URI for unknown airport codes.
pub const PROBLEM_UNKNOWN_AIRPORT: &str = "/problems/unknown-airport";

/// Problem type URI for routes that cannot be found.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request identifier of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 Bad Request for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: &str) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 404 Not Found for an unknown airport code.
    pub fn unknown_airport(code: &str, request_id: &str) -> Self {
        Self::new(
            PROBLEM_UNKNOWN_AIRPORT,
            "Unknown Airport",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("Airport '{code}' not found"))
        .with_request_id(request_id)
    }

    /// 404 Not Found for an unreachable pair.
    pub fn route_not_found(from: &str, to: &str, request_id: &str) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No route exists from '{from}' to '{to}'"))
        .with_request_id(request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: &str) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        *response.status_mut() = status;
        response
    }
}

/// Map a library error onto a problem document.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownAirport { code } => ProblemDetails::unknown_airport(code, request_id),
        LibError::RouteNotFound { from, to } => {
            ProblemDetails::route_not_found(from, to, request_id)
        }
        LibError::InvalidHopBudget { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_status_codes() {
        let cases = [
            (
                LibError::UnknownAirport { code: "XXX".into() },
                404,
                PROBLEM_UNKNOWN_AIRPORT,
            ),
            (
                LibError::RouteNotFound {
                    from: "AAA".into(),
                    to: "BBB".into(),
                },
                404,
                PROBLEM_ROUTE_NOT_FOUND,
            ),
            (
                LibError::InvalidHopBudget { max_hops: 0 },
                400,
                PROBLEM_INVALID_REQUEST,
            ),
            (
                LibError::UnknownRouteEndpoint { id: "1".into() },
                500,
                PROBLEM_INTERNAL_ERROR,
            ),
        ];

        for (error, status, type_uri) in cases {
            let problem = from_lib_error(&error, "req-1");
            assert_eq!(problem.status, status, "{error}");
            assert_eq!(problem.type_uri, type_uri);
            assert_eq!(problem.instance.as_deref(), Some("req-1"));
        }
    }

    #[test]
    fn serializes_type_field() {
        let problem = ProblemDetails::unknown_airport("XXX", "req-2");
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["type"], PROBLEM_UNKNOWN_AIRPORT);
        assert_eq!(json["detail"], "Airport 'XXX' not found");
    }

    #[test]
    fn response_uses_problem_content_type() {
        let response = ProblemDetails::bad_request("nope", "req-3").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROBLEM_CONTENT_TYPE
        );
    }
}
