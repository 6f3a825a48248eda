use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::airport::AirportId;
use crate::error::{Error, Result};

/// Default radius for synthesized ground connections.
pub const DEFAULT_PROXIMITY_KM: f64 = 100.0;

/// Dense node index assigned during graph construction.
pub type NodeIndex = usize;

/// Classification for the edge used in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Long-haul leg backed by a route record.
    Scheduled,
    /// Short-haul ground transfer synthesized from geographic proximity.
    Proximity,
}

/// Weight and kind of a connection, independent of where it leads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub distance: f64,
    pub kind: EdgeKind,
}

impl Connection {
    pub fn scheduled(distance: f64) -> Self {
        Self {
            distance,
            kind: EdgeKind::Scheduled,
        }
    }

    pub fn proximity(distance: f64) -> Self {
        Self {
            distance,
            kind: EdgeKind::Proximity,
        }
    }
}

/// Edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub kind: EdgeKind,
    pub distance: f64,
}

/// Direct, zero-stop scheduled connection between two airports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub source_id: AirportId,
    pub destination_id: AirportId,
    pub distance_km: f64,
}

/// Supplier of proximity connections for a graph node.
///
/// [`crate::AirportIndex`] is the production implementation; tests inject
/// fixed tables.
pub trait ProximitySource: Sync {
    /// Ground connections leaving `airport_id`, keyed by neighbour identifier.
    ///
    /// Returns `None` when the identifier is unknown.
    fn proximity_edges(
        &self,
        airport_id: &str,
        max_distance_km: f64,
    ) -> Option<BTreeMap<AirportId, Connection>>;
}

/// Graph structure used by the route search.
///
/// Every airport referenced by a scheduled route is a node with an adjacency
/// list. Airports reached only through a proximity edge also receive a dense
/// index so edges can point at them, but they are leaves: they have no
/// adjacency list and are not reported by [`Graph::contains`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    ids: Vec<AirportId>,
    index: HashMap<AirportId, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Number of nodes, i.e. airports referenced by at least one route.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if `airport_id` is a node of the graph.
    pub fn contains(&self, airport_id: &str) -> bool {
        self.index
            .get(airport_id)
            .is_some_and(|&index| index < self.adjacency.len())
    }

    /// Dense index for a node or proximity leaf.
    pub fn node_index(&self, airport_id: &str) -> Option<NodeIndex> {
        self.index.get(airport_id).copied()
    }

    /// Airport identifier behind a dense index, if the index belongs to this
    /// graph.
    pub fn node_id(&self, index: NodeIndex) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Identifiers of every node in construction order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.ids[..self.adjacency.len()].iter().map(String::as_str)
    }

    /// Return the outgoing edges of a node; leaves have none.
    pub fn neighbours(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Edge between two airports, if one exists.
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        let from = self.node_index(from)?;
        let to = self.node_index(to)?;
        self.neighbours(from).iter().find(|edge| edge.target == to)
    }

    /// Total number of edges of the given kind.
    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        self.adjacency
            .iter()
            .flatten()
            .filter(|edge| edge.kind == kind)
            .count()
    }

    fn intern(&mut self, airport_id: &str) -> NodeIndex {
        if let Some(&index) = self.index.get(airport_id) {
            return index;
        }
        let index = self.ids.len();
        self.ids.push(airport_id.to_string());
        self.index.insert(airport_id.to_string(), index);
        index
    }

    /// Insert an edge, replacing any existing edge to the same target.
    fn upsert(&mut self, from: NodeIndex, edge: Edge) {
        let edges = &mut self.adjacency[from];
        if let Some(existing) = edges.iter_mut().find(|e| e.target == edge.target) {
            *existing = edge;
        } else {
            edges.push(edge);
        }
    }
}

/// Builds the combined scheduled/proximity graph from a route list.
///
/// Construction runs in three phases: collect the distinct airports named by
/// routes, attach each one's proximity edges, then insert the scheduled edges.
/// Proximity sets depend only on airport geometry, so the result does not
/// depend on route order.
pub struct GraphBuilder<'a, P: ProximitySource + ?Sized> {
    proximity: &'a P,
    max_proximity_km: f64,
}

impl<'a, P: ProximitySource + ?Sized> GraphBuilder<'a, P> {
    pub fn new(proximity: &'a P) -> Self {
        Self {
            proximity,
            max_proximity_km: DEFAULT_PROXIMITY_KM,
        }
    }

    /// Override the radius used for proximity edges.
    pub fn max_proximity_km(mut self, max_proximity_km: f64) -> Self {
        self.max_proximity_km = max_proximity_km;
        self
    }

    /// Build the graph.
    ///
    /// Fails with [`Error::UnknownRouteEndpoint`] if a route names an airport
    /// the proximity source does not know.
    pub fn build(&self, routes: &[Route]) -> Result<Graph> {
        let mut graph = Graph::default();
        for route in routes {
            graph.intern(&route.source_id);
            graph.intern(&route.destination_id);
        }
        let node_count = graph.ids.len();

        let proximity_sets = graph
            .ids
            .par_iter()
            .map(|airport_id| {
                self.proximity
                    .proximity_edges(airport_id, self.max_proximity_km)
                    .ok_or_else(|| Error::UnknownRouteEndpoint {
                        id: airport_id.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        graph.adjacency = vec![Vec::new(); node_count];
        for (node, connections) in proximity_sets.into_iter().enumerate() {
            for (neighbour_id, connection) in connections {
                let target = graph.intern(&neighbour_id);
                graph.upsert(
                    node,
                    Edge {
                        target,
                        kind: EdgeKind::Proximity,
                        distance: connection.distance,
                    },
                );
            }
        }

        for route in routes {
            let source = graph.intern(&route.source_id);
            let target = graph.intern(&route.destination_id);
            graph.upsert(
                source,
                Edge {
                    target,
                    kind: EdgeKind::Scheduled,
                    distance: route.distance_km,
                },
            );
        }

        info!(
            nodes = graph.node_count(),
            leaves = graph.ids.len() - graph.node_count(),
            scheduled_edges = graph.edge_count(EdgeKind::Scheduled),
            proximity_edges = graph.edge_count(EdgeKind::Proximity),
            max_proximity_km = self.max_proximity_km,
            "built route graph"
        );

        Ok(graph)
    }
}
