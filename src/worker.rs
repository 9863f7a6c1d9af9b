//! The message-passing boundary around the routing core (spec.md §5/§6):
//! a synchronous `RoutingWorker::handle` that the transport layer
//! (`server::ws`/`server::http`) dispatches off its own event loop, the
//! way the teacher's `OptimizationWs` dispatches onto `spawn_blocking`
//! rather than doing CPU-bound work inline on the actor.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, Kind, RouteCandidate, RouteSegment, TripLeg};
use crate::legs::compact_legs;
use crate::pathfind::{generate_alternatives, Endpoint, RoutingError};
use crate::rank::{filter_and_sort, SortBy};
use crate::segments::build_segments;

/// Either endpoint of a `CALCULATE` request: a known stop id, or a
/// coordinate pair the core resolves against nearby stops.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointInput {
    Node(String),
    Coordinate { lat: f64, lng: f64 },
}

impl From<&EndpointInput> for Endpoint {
    fn from(value: &EndpointInput) -> Self {
        match value {
            EndpointInput::Node(id) => Endpoint::Node(id.clone()),
            EndpointInput::Coordinate { lat, lng } => {
                Endpoint::Coordinate { lat: *lat, lng: *lng }
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePayload {
    pub start: EndpointInput,
    pub end: EndpointInput,
    #[serde(default)]
    pub excluded_modes: Vec<Kind>,
    /// Not named in the wire payload the original spec documents, but
    /// `RouteRanker` needs a criterion from somewhere; exposing it here
    /// keeps the whole ranked-itinerary pipeline reachable through one
    /// request instead of a second round trip. Defaults to `FASTEST`.
    #[serde(default = "default_sort_by")]
    pub sort_by: SortBy,
}

fn default_sort_by() -> SortBy {
    SortBy::Fastest
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "CALCULATE")]
    Calculate { payload: CalculatePayload },
}

/// One ranked itinerary: the raw `RouteCandidate` plus its compacted
/// legs and renderable segments, matching the data flow in spec.md §2
/// ("LegCompactor + SegmentBuilder -> RouteRanker -> ranked
/// itineraries") rather than the bare `RouteCandidate` shape alone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(flatten)]
    pub candidate: RouteCandidate,
    pub legs: Vec<TripLeg>,
    pub segments: Vec<RouteSegment>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    #[serde(rename = "RESULT")]
    Result { result: ResultPayload },
    #[serde(rename = "ERROR")]
    Error { error: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Routes { routes: Vec<Itinerary> },
    Failure { error: RoutingError },
}

/// Dispatches `CALCULATE` requests against a loaded `GraphStore`. Plain
/// synchronous struct: no internal threads or queues, since "off the
/// event loop" is the transport layer's job, not the worker's.
pub struct RoutingWorker {
    store: Option<GraphStore>,
}

impl RoutingWorker {
    pub fn new(store: GraphStore) -> Self {
        RoutingWorker { store: Some(store) }
    }

    /// A worker with nothing loaded yet, so the transport layer can
    /// answer `GraphNotLoaded` to requests that race startup.
    pub fn not_ready() -> Self {
        RoutingWorker { store: None }
    }

    pub fn handle(&self, request: Request) -> Response {
        let Request::Calculate { payload } = request;
        match self.calculate(payload) {
            Ok(routes) => Response::Result { result: ResultPayload::Routes { routes } },
            Err(err) => Response::Result { result: ResultPayload::Failure { error: err } },
        }
    }

    fn calculate(&self, payload: CalculatePayload) -> Result<Vec<Itinerary>, RoutingError> {
        let store = self.store.as_ref().ok_or(RoutingError::GraphNotLoaded)?;

        let origin: Endpoint = (&payload.start).into();
        let destination: Endpoint = (&payload.end).into();
        let excluded_modes: HashSet<Kind> = payload.excluded_modes.into_iter().collect();

        let candidates = generate_alternatives(store, &origin, &destination, &excluded_modes)?;
        let ranked = filter_and_sort(store, candidates, &excluded_modes, payload.sort_by);

        Ok(ranked
            .into_iter()
            .map(|candidate| {
                let legs = compact_legs(store, &candidate.path);
                let segments = build_segments(store, &candidate.path);
                Itinerary { candidate, legs, segments }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::fixtures::fixture_graph;

    #[test]
    fn not_ready_worker_reports_graph_not_loaded() {
        let worker = RoutingWorker::not_ready();
        let response = worker.handle(Request::Calculate {
            payload: CalculatePayload {
                start: EndpointInput::Node("A".into()),
                end: EndpointInput::Node("D".into()),
                excluded_modes: Vec::new(),
                sort_by: SortBy::Fastest,
            },
        });
        match response {
            Response::Result { result: ResultPayload::Failure { error } } => {
                assert_eq!(error, RoutingError::GraphNotLoaded);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn calculate_returns_ranked_itineraries_with_legs_and_segments() {
        let worker = RoutingWorker::new(fixture_graph());
        let response = worker.handle(Request::Calculate {
            payload: CalculatePayload {
                start: EndpointInput::Node("A".into()),
                end: EndpointInput::Node("D".into()),
                excluded_modes: Vec::new(),
                sort_by: SortBy::Fastest,
            },
        });
        match response {
            Response::Result { result: ResultPayload::Routes { routes } } => {
                assert!(!routes.is_empty());
                assert!(!routes[0].legs.is_empty());
                assert!(!routes[0].segments.is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn unknown_node_surfaces_as_a_result_error_not_a_protocol_error() {
        let worker = RoutingWorker::new(fixture_graph());
        let response = worker.handle(Request::Calculate {
            payload: CalculatePayload {
                start: EndpointInput::Node("ZZZ".into()),
                end: EndpointInput::Node("D".into()),
                excluded_modes: Vec::new(),
                sort_by: SortBy::Fastest,
            },
        });
        match response {
            Response::Result { result: ResultPayload::Failure { error } } => {
                assert_eq!(error, RoutingError::UnknownOriginNode);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
