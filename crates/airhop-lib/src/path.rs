use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::airport::AirportId;
use crate::graph::{EdgeKind, Graph, NodeIndex};

/// Default number of scheduled hops a route may use.
pub const DEFAULT_MAX_HOPS: usize = 5;

/// Constraints applied during pathfinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathConstraints {
    /// Hop budget. The origin occupies one slot, and every scheduled edge
    /// occupies another; proximity edges are free.
    pub max_hops: usize,
}

impl Default for PathConstraints {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl PathConstraints {
    pub fn with_max_hops(max_hops: usize) -> Self {
        Self { max_hops }
    }

    /// Whether a candidate with `scheduled_hops` scheduled edges may be
    /// expanded further. The destination is accepted regardless.
    fn allows(&self, scheduled_hops: usize) -> bool {
        scheduled_hops + 1 < self.max_hops
    }
}

/// Outcome of a route query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Airport identifiers from source to destination; empty if unreachable.
    pub hops: Vec<AirportId>,
    /// Total distance in kilometres; infinite if unreachable.
    pub distance: f64,
}

impl RouteResult {
    /// Result for a pair with no path under the current constraints.
    pub fn unreachable() -> Self {
        Self {
            hops: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Candidate partial path held in the priority queue.
#[derive(Debug, Clone)]
struct PathState {
    node: NodeIndex,
    distance: f64,
    path: Vec<NodeIndex>,
    scheduled_hops: usize,
    last_kind: EdgeKind,
}

impl PartialEq for PathState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathState {}

impl Ord for PathState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by distance.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for PathState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the shortest route from `source` to `destination` that respects the
/// hop budget and never chains two proximity edges.
///
/// The search is a label-correcting Dijkstra over a binary heap with lazy
/// deletion: stale entries are skipped when popped rather than removed from
/// the queue. Unknown identifiers yield [`RouteResult::unreachable`], except
/// that a query from an airport to itself always yields a single-hop route.
pub fn find_route(
    graph: &Graph,
    source: &str,
    destination: &str,
    constraints: &PathConstraints,
) -> RouteResult {
    let Some(start) = graph.node_index(source) else {
        if source == destination {
            return RouteResult {
                hops: vec![source.to_string()],
                distance: 0.0,
            };
        }
        return RouteResult::unreachable();
    };
    let Some(goal) = graph.node_index(destination) else {
        return RouteResult::unreachable();
    };

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut best: Option<(Vec<NodeIndex>, f64)> = None;
    let mut best_distance = f64::INFINITY;

    // The initial state counts as a scheduled arrival so the first move may
    // be a proximity edge.
    queue.push(PathState {
        node: start,
        distance: 0.0,
        path: vec![start],
        scheduled_hops: 0,
        last_kind: EdgeKind::Scheduled,
    });

    while let Some(state) = queue.pop() {
        if visited.contains(&state.node) || state.distance > best_distance {
            continue;
        }

        // Reaching the destination does not end the search; the queue is
        // drained and heavier entries are pruned by the check above.
        if state.node == goal {
            if state.distance < best_distance {
                best_distance = state.distance;
                best = Some((state.path, state.distance));
            }
            continue;
        }

        visited.insert(state.node);

        for edge in graph.neighbours(state.node) {
            if visited.contains(&edge.target) {
                continue;
            }
            if state.last_kind == EdgeKind::Proximity && edge.kind == EdgeKind::Proximity {
                continue;
            }

            let distance = state.distance + edge.distance;
            let known = distances.get(&edge.target).copied().unwrap_or(f64::INFINITY);
            if distance >= known {
                continue;
            }

            let scheduled_hops =
                state.scheduled_hops + usize::from(edge.kind == EdgeKind::Scheduled);
            if !constraints.allows(scheduled_hops) && edge.target != goal {
                continue;
            }

            distances.insert(edge.target, distance);
            let mut path = Vec::with_capacity(state.path.len() + 1);
            path.extend_from_slice(&state.path);
            path.push(edge.target);
            queue.push(PathState {
                node: edge.target,
                distance,
                path,
                scheduled_hops,
                last_kind: edge.kind,
            });
        }
    }

    debug!(
        source,
        destination,
        expanded = visited.len(),
        distance = best_distance,
        "route search finished"
    );

    match best {
        Some((path, distance)) => RouteResult {
            hops: path
                .into_iter()
                .filter_map(|index| graph.node_id(index).map(str::to_string))
                .collect(),
            distance,
        },
        None => RouteResult::unreachable(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::graph::{Connection, GraphBuilder, ProximitySource, Route};

    struct Chain;

    impl ProximitySource for Chain {
        fn proximity_edges(
            &self,
            airport_id: &str,
            _max_distance_km: f64,
        ) -> Option<BTreeMap<AirportId, Connection>> {
            let mut edges = BTreeMap::new();
            match airport_id {
                "b" => {
                    edges.insert("c".to_string(), Connection::proximity(1.0));
                }
                "c" => {
                    edges.insert("d".to_string(), Connection::proximity(1.0));
                }
                _ => {}
            }
            Some(edges)
        }
    }

    fn route(from: &str, to: &str, distance_km: f64) -> Route {
        Route {
            source_id: from.to_string(),
            destination_id: to.to_string(),
            distance_km,
        }
    }

    fn chain_graph() -> Graph {
        let routes = [
            route("a", "b", 1.0),
            route("c", "x", 1.0),
            route("d", "x", 1.0),
            route("a", "d", 10.0),
        ];
        GraphBuilder::new(&Chain).build(&routes).unwrap()
    }

    #[test]
    fn single_proximity_leg_after_scheduled_is_allowed() {
        let graph = chain_graph();
        let result = find_route(&graph, "a", "c", &PathConstraints::default());
        assert_eq!(result.hops, vec!["a", "b", "c"]);
        assert_eq!(result.distance, 2.0);
    }

    #[test]
    fn consecutive_proximity_legs_are_rejected() {
        let graph = chain_graph();
        let result = find_route(&graph, "a", "d", &PathConstraints::default());
        assert_eq!(result.hops, vec!["a", "d"]);
        assert_eq!(result.distance, 10.0);
    }

    #[test]
    fn proximity_legs_do_not_consume_the_budget() {
        let graph = chain_graph();
        // a -> b (scheduled) -> c (proximity) -> x (scheduled): two scheduled
        // hops plus the origin fit in a budget of 3 only at the destination.
        let result = find_route(&graph, "a", "x", &PathConstraints::with_max_hops(3));
        assert_eq!(result.hops, vec!["a", "b", "c", "x"]);
        assert_eq!(result.distance, 3.0);
    }

    #[test]
    fn unknown_source_is_unreachable() {
        let graph = chain_graph();
        let result = find_route(&graph, "zz", "a", &PathConstraints::default());
        assert_eq!(result, RouteResult::unreachable());
        assert!(!result.is_reachable());
    }

    #[test]
    fn unknown_airport_to_itself_is_a_single_hop() {
        let graph = chain_graph();
        let result = find_route(&graph, "zz", "zz", &PathConstraints::default());
        assert_eq!(result.hops, vec!["zz"]);
        assert_eq!(result.distance, 0.0);
    }

    #[test]
    fn budget_of_one_still_reaches_direct_destination() {
        let graph = chain_graph();
        let result = find_route(&graph, "a", "b", &PathConstraints::with_max_hops(1));
        assert_eq!(result.hops, vec!["a", "b"]);

        let blocked = find_route(&graph, "a", "c", &PathConstraints::with_max_hops(1));
        assert!(!blocked.is_reachable());
    }

    #[test]
    fn queue_orders_by_smallest_distance_first() {
        let mut queue = BinaryHeap::new();
        for (node, distance) in [(1, 5.0), (2, 1.0), (3, 3.0)] {
            queue.push(PathState {
                node,
                distance,
                path: vec![node],
                scheduled_hops: 0,
                last_kind: EdgeKind::Scheduled,
            });
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop().map(|s| s.node)).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
