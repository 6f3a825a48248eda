//! Route planning facade.
//!
//! [`RouteNetwork`] owns the airport index and the built graph, resolves the
//! codes callers type into airport identifiers, and turns raw search results
//! into a [`RoutePlan`] expressed in display codes. Lookups that miss are
//! reported as [`Error::UnknownAirport`] and unreachable pairs as
//! [`Error::RouteNotFound`].

use serde::Serialize;
use tracing::info;

use crate::airport::{Airport, AirportIndex};
use crate::dataset::{load_airports, load_routes, DatasetPaths};
use crate::error::{Error, Result};
use crate::graph::{EdgeKind, Graph, GraphBuilder, Route, DEFAULT_PROXIMITY_KM};
use crate::path::{find_route, PathConstraints};

/// Options applied once, when the network is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkOptions {
    /// Radius in kilometres for synthesized ground connections.
    pub max_proximity_km: f64,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            max_proximity_km: DEFAULT_PROXIMITY_KM,
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub from: String,
    pub to: String,
    pub constraints: PathConstraints,
}

impl RouteRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            constraints: PathConstraints::default(),
        }
    }

    /// Override the hop budget.
    pub fn max_hops(mut self, max_hops: usize) -> Self {
        self.constraints.max_hops = max_hops;
        self
    }
}

/// Planned route expressed in display codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Requested source code, upper-cased.
    pub source: String,
    /// Requested destination code, upper-cased.
    pub destination: String,
    /// Total distance in kilometres.
    pub distance: f64,
    pub hops: Vec<String>,
    /// Number of scheduled legs in the route.
    pub scheduled: usize,
    /// Number of proximity legs in the route.
    pub proximity: usize,
}

impl RoutePlan {
    /// Number of legs in the route.
    pub fn hop_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }
}

/// Airport index plus the routing graph built from it.
#[derive(Debug)]
pub struct RouteNetwork {
    airports: AirportIndex,
    graph: Graph,
}

impl RouteNetwork {
    /// Load both dataset files and build the graph.
    pub fn load(paths: &DatasetPaths, options: &NetworkOptions) -> Result<Self> {
        paths.ensure_exists()?;
        let airports = AirportIndex::build(load_airports(&paths.airports)?);
        let routes = load_routes(&paths.routes, &airports)?;
        Self::from_parts(airports, &routes, options)
    }

    /// Build the graph over an already loaded airport index.
    pub fn from_parts(
        airports: AirportIndex,
        routes: &[Route],
        options: &NetworkOptions,
    ) -> Result<Self> {
        let graph = GraphBuilder::new(&airports)
            .max_proximity_km(options.max_proximity_km)
            .build(routes)?;

        info!(
            airports = airports.len(),
            nodes = graph.node_count(),
            "route network ready"
        );

        Ok(Self { airports, graph })
    }

    pub fn airports(&self) -> &AirportIndex {
        &self.airports
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Case-insensitive airport lookup by three- or four-letter code.
    pub fn find_airport(&self, code: &str) -> Option<&Airport> {
        self.airports.by_code(code)
    }

    /// Plan the shortest route between two airport codes.
    pub fn plan_route(&self, request: &RouteRequest) -> Result<RoutePlan> {
        let max_hops = request.constraints.max_hops;
        if max_hops == 0 {
            return Err(Error::InvalidHopBudget { max_hops });
        }

        let source = self.resolve(&request.from)?;
        let destination = self.resolve(&request.to)?;

        let result = find_route(
            &self.graph,
            &source.id,
            &destination.id,
            &request.constraints,
        );
        if !result.is_reachable() {
            return Err(Error::RouteNotFound {
                from: request.from.to_uppercase(),
                to: request.to.to_uppercase(),
            });
        }

        let (scheduled, proximity) = self.classify_legs(&result.hops);
        let hops = result
            .hops
            .iter()
            .map(|id| self.airports.code_for_id(id).to_string())
            .collect();

        Ok(RoutePlan {
            source: request.from.to_uppercase(),
            destination: request.to.to_uppercase(),
            distance: result.distance,
            hops,
            scheduled,
            proximity,
        })
    }

    fn resolve(&self, code: &str) -> Result<&Airport> {
        self.airports
            .by_code(code)
            .ok_or_else(|| Error::UnknownAirport {
                code: code.to_uppercase(),
            })
    }

    /// Count scheduled and proximity legs along a path of airport ids.
    fn classify_legs(&self, ids: &[String]) -> (usize, usize) {
        let mut scheduled = 0usize;
        let mut proximity = 0usize;
        for pair in ids.windows(2) {
            match self.graph.edge(&pair[0], &pair[1]).map(|edge| edge.kind) {
                Some(EdgeKind::Proximity) => proximity += 1,
                Some(EdgeKind::Scheduled) | None => scheduled += 1,
            }
        }
        (scheduled, proximity)
    }
}
