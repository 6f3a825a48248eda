//! Airhop library entry points.
//!
//! This crate loads an airport/route dataset, indexes airports by code and by
//! location, builds a graph that mixes scheduled flights with short ground
//! connections between nearby airports, and searches it for the shortest
//! route under a hop budget. The CLI and the HTTP service depend only on the
//! items exported here.

#![deny(warnings)]

pub mod airport;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod graph;
pub mod path;
pub mod routing;
pub mod spatial;

pub use airport::{Airport, AirportId, AirportIndex};
pub use dataset::{
    airports_from_reader, default_data_dir, load_airports, load_routes, routes_from_reader,
    DatasetPaths, AIRPORTS_FILE, DATA_DIR_ENV, ROUTES_FILE,
};
pub use error::{Error, Result};
pub use geo::{haversine_km, Location};
pub use graph::{
    Connection, Edge, EdgeKind, Graph, GraphBuilder, NodeIndex, ProximitySource, Route,
    DEFAULT_PROXIMITY_KM,
};
pub use path::{find_route, PathConstraints, RouteResult, DEFAULT_MAX_HOPS};
pub use routing::{NetworkOptions, RouteNetwork, RoutePlan, RouteRequest};
pub use spatial::SpatialIndex;
