//! Opaque read-only accessor over the static transit graph and stop
//! metadata (spec.md §4.2). Built once at startup and never mutated
//! afterwards; safe to share across worker/connection threads behind an
//! `Arc` with no locking, per spec.md §5.

use std::cmp::Ordering;
use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use super::geo_util;
use super::types::{Edge, NodeId, StopMetadata};

/// Default cap from spec.md §4.2/§4.4: at most this many stops...
pub const DEFAULT_NEAREST_LIMIT: usize = 5;
/// ...within this many kilometres.
pub const DEFAULT_NEAREST_RADIUS_KM: f64 = 0.8;

struct StopPoint {
    node_id: NodeId,
    lat: f64,
    lng: f64,
}

impl RTreeObject for StopPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lng, self.lat])
    }
}

impl PointDistance for StopPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.lng - point[0];
        let dy = self.lat - point[1];
        dx * dx + dy * dy
    }
}

/// The static, read-only transit graph plus stop metadata.
pub struct GraphStore {
    graph: Graph<NodeId, Edge, Directed>,
    index: HashMap<NodeId, NodeIndex>,
    metadata: HashMap<NodeId, StopMetadata>,
    stops_tree: RTree<StopPoint>,
}

impl GraphStore {
    /// Build a store from a parsed graph and metadata map. Multiple
    /// parallel edges between the same pair of nodes are kept explicit
    /// (one `petgraph` edge per [`Edge`]), matching spec.md §3's "kept
    /// explicit, not pre-collapsed" invariant.
    pub fn new(
        raw_graph: HashMap<NodeId, HashMap<NodeId, Vec<Edge>>>,
        metadata: HashMap<NodeId, StopMetadata>,
    ) -> Self {
        let mut graph = Graph::<NodeId, Edge, Directed>::new();
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::new();

        let mut ensure_node = |graph: &mut Graph<NodeId, Edge, Directed>,
                                index: &mut HashMap<NodeId, NodeIndex>,
                                id: &NodeId| {
            *index
                .entry(id.clone())
                .or_insert_with(|| graph.add_node(id.clone()))
        };

        for (from, adjacency) in raw_graph.iter() {
            ensure_node(&mut graph, &mut index, from);
            for to in adjacency.keys() {
                ensure_node(&mut graph, &mut index, to);
            }
        }
        for (from, adjacency) in raw_graph.into_iter() {
            let from_idx = index[&from];
            for (to, edges) in adjacency.into_iter() {
                let to_idx = index[&to];
                for edge in edges {
                    graph.add_edge(from_idx, to_idx, edge);
                }
            }
        }

        let mut stops_tree = RTree::new();
        for (id, meta) in metadata.iter() {
            stops_tree.insert(StopPoint {
                node_id: id.clone(),
                lat: meta.lat,
                lng: meta.lng,
            });
        }

        GraphStore {
            graph,
            index,
            metadata,
            stops_tree,
        }
    }

    pub fn print_stats(&self) {
        log::info!(
            "transit graph: {} nodes, {} edges, {} stops with metadata",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.metadata.len()
        );
    }

    /// Neighbour map for `u`: never fails, returns an empty map for an
    /// unknown node.
    pub fn neighbours(&self, u: &str) -> HashMap<NodeId, Vec<Edge>> {
        let mut out: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        if let Some(&idx) = self.index.get(u) {
            for edge_ref in self.graph.edges(idx) {
                let target = self.graph[edge_ref.target()].clone();
                out.entry(target).or_default().push(edge_ref.weight().clone());
            }
        }
        out
    }

    pub fn has_node(&self, u: &str) -> bool {
        self.index.contains_key(u)
    }

    pub fn metadata(&self, u: &str) -> Option<&StopMetadata> {
        self.metadata.get(u)
    }

    /// Great-circle nearest-neighbour lookup, ascending by distance,
    /// capped at `limit` results within `max_radius_km`.
    pub fn find_nearby_nodes(
        &self,
        coord: (f64, f64),
        max_radius_km: f64,
        limit: usize,
    ) -> Vec<(NodeId, f64)> {
        let (lat, lng) = coord;
        let prefilter_radius = geo_util::degree_radius(lat, max_radius_km);
        let query = [lng, lat];

        let mut candidates: Vec<(NodeId, f64)> = self
            .stops_tree
            .locate_within_distance(query, prefilter_radius * prefilter_radius)
            .filter_map(|sp| {
                let dist_km = geo_util::haversine_km((lat, lng), (sp.lat, sp.lng));
                (dist_km <= max_radius_km).then(|| (sp.node_id.clone(), dist_km))
            })
            .collect();

        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        candidates.truncate(limit);
        candidates
    }
}

#[cfg(test)]
pub mod fixtures {
    //! The tiny fixture graph from spec.md §8, reused by `pathfind`,
    //! `legs`, `segments`, and `rank` tests.
    use super::*;

    /// `A,B,C,D` with:
    /// `A→B {service:"10", weight:60}`, `B→C {service:"10", weight:120}`,
    /// `C→D {service:"20", weight:90}`, `A→D {service:"WALK", weight:600}`,
    /// `B→D {service:"30", weight:180}`.
    pub fn fixture_graph() -> GraphStore {
        let mut raw: HashMap<NodeId, HashMap<NodeId, Vec<Edge>>> = HashMap::new();
        let mut add = |from: &str, to: &str, service: &str, weight: f64| {
            raw.entry(from.to_string())
                .or_default()
                .entry(to.to_string())
                .or_default()
                .push(Edge {
                    kind: None,
                    service: service.to_string(),
                    direction: None,
                    distance: 0.0,
                    weight,
                });
        };
        add("A", "B", "10", 60.0);
        add("B", "C", "10", 120.0);
        add("C", "D", "20", 90.0);
        add("A", "D", "WALK", 600.0);
        add("B", "D", "30", 180.0);

        let mut metadata = HashMap::new();
        // Roughly evenly spaced points; exact coordinates don't matter
        // for the graph-topology tests, only for the geocoding tests.
        metadata.insert(
            "A".to_string(),
            StopMetadata {
                name: "Stop A".into(),
                road: None,
                lat: 1.300,
                lng: 103.800,
                kind: None,
            },
        );
        metadata.insert(
            "B".to_string(),
            StopMetadata {
                name: "Stop B".into(),
                road: None,
                lat: 1.301,
                lng: 103.801,
                kind: None,
            },
        );
        metadata.insert(
            "C".to_string(),
            StopMetadata {
                name: "Stop C".into(),
                road: None,
                lat: 1.302,
                lng: 103.802,
                kind: None,
            },
        );
        metadata.insert(
            "D".to_string(),
            StopMetadata {
                name: "Stop D".into(),
                road: None,
                lat: 1.303,
                lng: 103.803,
                kind: None,
            },
        );

        GraphStore::new(raw, metadata)
    }
}
