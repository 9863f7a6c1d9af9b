//! Single-path Dijkstra search over a [`GraphStore`], with virtual
//! source/sink injection for coordinate endpoints (spec.md §4.4).
//!
//! The search never materialises `__START__`/`__END__` into the graph:
//! their outgoing/incoming edges are synthesised in memory for the
//! handful of nearby real stops `GraphStore::find_nearby_nodes` returns,
//! and folded into the same relaxation loop as real edges.

use std::collections::{HashMap, HashSet};

use crate::graph::{
    Edge, GraphStore, Kind, NodeId, PathStep, CURRENT_LOCATION_LABEL, DESTINATION_LABEL,
    END_SENTINEL, START_SENTINEL,
};
use crate::pq::PriorityQueue;

use super::error::RoutingError;

/// Base in-station transfer cost (seconds) charged whenever the
/// incoming edge's service differs from the outgoing edge's, on top of
/// the caller-supplied `transfer_penalty`.
const TRANSFER_BASE_SECONDS: f64 = 300.0;
/// Edges whose `service` is literally `"WALK"` are charged at twice
/// their raw weight during cost evaluation (not in the reported
/// `totalDuration`, which always uses raw weight).
const WALK_COST_MULTIPLIER: f64 = 2.0;
/// Seconds of walking time per kilometre for a synthesised
/// geocode-to-stop edge (spec.md §4.4).
const GEOCODE_WALK_SECONDS_PER_KM: f64 = 720.0;
/// Safety cap on heap pops, guarding against pathological graphs.
const MAX_HEAP_POPS: usize = 100_000;
/// Safety cap on reconstruction hops, guarding against a corrupt
/// `prev` chain turning into an infinite loop.
const MAX_RECONSTRUCTION_STEPS: usize = 2_000;

/// Either a known stop id or a raw coordinate to be geocoded against
/// the nearest stops before search.
#[derive(Clone, Debug)]
pub enum Endpoint {
    Node(NodeId),
    Coordinate { lat: f64, lng: f64 },
}

#[derive(Clone, Debug, Default)]
pub struct PathfindOptions {
    /// Extra seconds added to every transfer, on top of the fixed
    /// 300s base. The `AlternativeGenerator` biases this to reshape
    /// the search toward fewer transfers.
    pub transfer_penalty: f64,
    /// Modes excluded from the search entirely (WALK edges are never
    /// excludable, regardless of this set).
    pub excluded_modes: HashSet<Kind>,
}

#[derive(Clone, Debug)]
pub struct PathResult {
    pub path: Vec<PathStep>,
    pub total_duration: f64,
}

/// Run a single Dijkstra search from `origin` to `destination`.
pub fn find_path(
    store: &GraphStore,
    origin: &Endpoint,
    destination: &Endpoint,
    opts: &PathfindOptions,
) -> Result<PathResult, RoutingError> {
    let (origin_id, start_edges) = resolve_origin(store, origin)?;
    let (destination_id, end_neighbours) = resolve_destination(store, destination)?;

    if let (Endpoint::Node(a), Endpoint::Node(b)) = (origin, destination) {
        if a == b {
            return Ok(PathResult { path: Vec::new(), total_duration: 0.0 });
        }
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, (NodeId, PathStep)> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut pq = PriorityQueue::new();

    dist.insert(origin_id.clone(), 0.0);
    pq.push(origin_id.clone(), 0.0);

    let mut pops = 0usize;
    let mut reached = false;

    while let Some((u, priority)) = pq.pop() {
        pops += 1;
        if pops > MAX_HEAP_POPS {
            return Err(RoutingError::ComputationTimedOut);
        }
        if priority > *dist.get(&u).unwrap_or(&f64::INFINITY) {
            continue;
        }
        if u == destination_id {
            reached = true;
            break;
        }
        if !settled.insert(u.clone()) {
            continue;
        }

        let incoming_service = prev.get(&u).map(|(_, step)| step.service.clone());

        let mut candidates: Vec<(NodeId, Edge)> = Vec::new();
        if u == START_SENTINEL {
            candidates.extend(start_edges.iter().cloned());
        } else {
            for (to, edges) in store.neighbours(&u) {
                for edge in edges {
                    candidates.push((to.clone(), edge));
                }
            }
            if let Some(&dist_km) = end_neighbours.get(&u) {
                candidates.push((destination_id.clone(), geocode_edge("End", dist_km)));
            }
        }

        let mut best_per_target: HashMap<NodeId, (f64, Edge)> = HashMap::new();
        for (to, edge) in candidates {
            let kind = edge.resolved_kind();
            if kind != Kind::Walk && opts.excluded_modes.contains(&kind) {
                continue;
            }
            let base = if edge.service == "WALK" {
                edge.weight * WALK_COST_MULTIPLIER
            } else {
                edge.weight
            };
            let transfer = match &incoming_service {
                None => 0.0,
                Some(s) if *s == edge.service => 0.0,
                Some(_) => TRANSFER_BASE_SECONDS + opts.transfer_penalty,
            };
            let cost = base + transfer;
            let entry = best_per_target.entry(to).or_insert((f64::INFINITY, edge.clone()));
            if cost < entry.0 {
                *entry = (cost, edge);
            }
        }

        for (to, (cost, edge)) in best_per_target {
            let candidate_dist = dist[&u] + cost;
            if candidate_dist < *dist.get(&to).unwrap_or(&f64::INFINITY) {
                dist.insert(to.clone(), candidate_dist);
                prev.insert(
                    to.clone(),
                    (
                        u.clone(),
                        PathStep {
                            from: u.clone(),
                            to: to.clone(),
                            kind: edge.resolved_kind(),
                            service: edge.service.clone(),
                            direction: edge.direction,
                            weight: edge.weight,
                            distance: edge.distance,
                        },
                    ),
                );
                pq.push(to, candidate_dist);
            }
        }
    }

    if !reached {
        return Err(RoutingError::NoPathFound);
    }

    let mut steps = Vec::new();
    let mut cursor = destination_id.clone();
    let mut hops = 0usize;
    while cursor != origin_id {
        hops += 1;
        if hops > MAX_RECONSTRUCTION_STEPS {
            return Err(RoutingError::PathReconstructionFailed);
        }
        let (previous, step) = prev.get(&cursor).ok_or(RoutingError::PathReconstructionFailed)?;
        steps.push(step.clone());
        cursor = previous.clone();
    }
    steps.reverse();

    for step in &mut steps {
        if step.from == START_SENTINEL {
            step.from = CURRENT_LOCATION_LABEL.to_string();
        }
        if step.to == END_SENTINEL {
            step.to = DESTINATION_LABEL.to_string();
        }
    }

    let total_duration = steps.iter().map(|s| s.weight).sum();
    Ok(PathResult { path: steps, total_duration })
}

fn geocode_edge(service: &str, dist_km: f64) -> Edge {
    Edge {
        kind: Some(Kind::Walk),
        service: service.to_string(),
        direction: None,
        distance: dist_km,
        weight: dist_km * GEOCODE_WALK_SECONDS_PER_KM,
    }
}

/// Resolve the origin endpoint. A coordinate origin expands into the
/// `__START__` sentinel plus its synthesised outgoing edges to nearby
/// stops; a node origin must already exist in the graph.
fn resolve_origin(
    store: &GraphStore,
    origin: &Endpoint,
) -> Result<(NodeId, Vec<(NodeId, Edge)>), RoutingError> {
    match origin {
        Endpoint::Node(id) => {
            if !store.has_node(id) {
                return Err(RoutingError::UnknownOriginNode);
            }
            Ok((id.clone(), Vec::new()))
        }
        Endpoint::Coordinate { lat, lng } => {
            let nearby = store.find_nearby_nodes(
                (*lat, *lng),
                crate::graph::store::DEFAULT_NEAREST_RADIUS_KM,
                crate::graph::store::DEFAULT_NEAREST_LIMIT,
            );
            if nearby.is_empty() {
                return Err(RoutingError::NoReachableOriginNodes);
            }
            let edges = nearby
                .into_iter()
                .map(|(id, dist_km)| (id, geocode_edge("Start", dist_km)))
                .collect();
            Ok((START_SENTINEL.to_string(), edges))
        }
    }
}

/// Resolve the destination endpoint. A coordinate destination expands
/// into the `__END__` sentinel plus the set of real stops within
/// walking distance of it (consulted while expanding *any* node, since
/// every node might be one of those nearby stops).
fn resolve_destination(
    store: &GraphStore,
    destination: &Endpoint,
) -> Result<(NodeId, HashMap<NodeId, f64>), RoutingError> {
    match destination {
        Endpoint::Node(id) => {
            if !store.has_node(id) {
                return Err(RoutingError::UnknownDestinationNode);
            }
            Ok((id.clone(), HashMap::new()))
        }
        Endpoint::Coordinate { lat, lng } => {
            let nearby = store.find_nearby_nodes(
                (*lat, *lng),
                crate::graph::store::DEFAULT_NEAREST_RADIUS_KM,
                crate::graph::store::DEFAULT_NEAREST_LIMIT,
            );
            if nearby.is_empty() {
                return Err(RoutingError::NoReachableDestinationNodes);
            }
            Ok((END_SENTINEL.to_string(), nearby.into_iter().collect()))
        }
    }
}
