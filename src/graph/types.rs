use serde::{Deserialize, Serialize};

/// Opaque node identifier: a bus-stop code or an MRT/LRT station code.
///
/// Graph data keeps these as plain strings (see `transit_graph.json`'s
/// shape in the crate docs); we don't intern them into a dense integer
/// here because the graph is loaded once and never mutated, so the
/// interning win described for the hot Dijkstra loop instead lives in
/// `GraphStore`'s `petgraph::NodeIndex` side table.
pub type NodeId = String;

/// Transport kind for an edge or a compacted leg/segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Bus,
    Mrt,
    Lrt,
    Walk,
    Transfer,
}

/// A single immutable graph edge: one parallel connection between two
/// stops, served by one `service`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub kind: Option<Kind>,
    pub service: String,
    #[serde(default)]
    pub direction: Option<i32>,
    #[serde(default)]
    pub distance: f64,
    pub weight: f64,
}

impl Edge {
    /// Resolved kind: use the explicit `kind` field when the graph
    /// schema carries one, otherwise fall back to `ServiceClassifier`.
    pub fn resolved_kind(&self) -> Kind {
        self.kind.unwrap_or_else(|| crate::classify::classify(&self.service))
    }
}

/// Per-stop metadata used for nearest-neighbour lookup and human-readable
/// leg endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopMetadata {
    pub name: String,
    #[serde(default)]
    pub road: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl StopMetadata {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// One traversed edge in a reconstructed path.
///
/// `distance` isn't named in the edge-traversal shape spelled out in the
/// original spec, but `RouteRanker`'s `LESS_WALKING` criterion (sum of
/// `distance` over WALK segments) has nothing else to sum over, so we
/// carry the source edge's `distance` through reconstruction alongside
/// `weight`. See DESIGN.md.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: Kind,
    pub service: String,
    #[serde(default)]
    pub direction: Option<i32>,
    pub weight: f64,
    #[serde(default)]
    pub distance: f64,
}

/// A candidate itinerary returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub id: String,
    pub label: String,
    pub path: Vec<PathStep>,
    #[serde(rename = "totalDuration")]
    pub total_duration: f64,
}

/// A maximal run of consecutive `PathStep`s sharing `(kind, service)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    pub kind: Kind,
    pub service: String,
    #[serde(rename = "startStopId")]
    pub start_stop_id: NodeId,
    #[serde(rename = "startStopName")]
    pub start_stop_name: String,
    #[serde(rename = "endStopId")]
    pub end_stop_id: NodeId,
    #[serde(rename = "endStopName")]
    pub end_stop_name: String,
    #[serde(rename = "stopCount")]
    pub stop_count: usize,
    pub duration: f64,
}

/// A maximal run of positions for polyline rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub kind: Kind,
    pub service: String,
    pub positions: Vec<(f64, f64)>,
}

/// Sentinel node ids used to inject geographic endpoints into a single
/// `find_path` call. Never materialised into `TransitGraph`.
pub const START_SENTINEL: &str = "__START__";
pub const END_SENTINEL: &str = "__END__";

/// Display names the sentinels are rewritten to before a result crosses
/// the core boundary.
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";
pub const DESTINATION_LABEL: &str = "Destination";
