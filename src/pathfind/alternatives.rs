//! Generates the small set of alternative itineraries a request exposes
//! to the ranker, by re-running the same search with a reshaped cost
//! function (spec.md §4.5) rather than a k-shortest-paths algorithm.

use crate::graph::{GraphStore, RouteCandidate};

use super::dijkstra::{find_path, Endpoint, PathfindOptions};
use super::error::RoutingError;

/// Extra transfer penalty used to bias the search toward itineraries
/// with fewer line changes, at the cost of raw duration.
const LESS_TRANSFERS_PENALTY: f64 = 600.0;

/// Run the "fastest" search (no transfer bias) and the "less transfers"
/// search (heavily transfer-averse), keeping both only when they are
/// structurally distinct paths. Returns at least one candidate if any
/// path exists, and bubbles up the fastest search's error otherwise.
pub fn generate_alternatives(
    store: &GraphStore,
    origin: &Endpoint,
    destination: &Endpoint,
    excluded_modes: &std::collections::HashSet<crate::graph::Kind>,
) -> Result<Vec<RouteCandidate>, RoutingError> {
    let fastest = find_path(
        store,
        origin,
        destination,
        &PathfindOptions {
            transfer_penalty: 0.0,
            excluded_modes: excluded_modes.clone(),
        },
    )?;

    let mut candidates = vec![RouteCandidate {
        id: "fastest".to_string(),
        label: "Fastest Route".to_string(),
        path: fastest.path.clone(),
        total_duration: fastest.total_duration,
    }];

    if let Ok(direct) = find_path(
        store,
        origin,
        destination,
        &PathfindOptions {
            transfer_penalty: LESS_TRANSFERS_PENALTY,
            excluded_modes: excluded_modes.clone(),
        },
    ) {
        if !paths_structurally_equal(&fastest.path, &direct.path) {
            candidates.push(RouteCandidate {
                id: "direct".to_string(),
                label: "Less Transfers".to_string(),
                path: direct.path,
                total_duration: direct.total_duration,
            });
        }
    }

    Ok(candidates)
}

/// Two paths are the same route if they visit the same `(from, to,
/// service)` triples in order, ignoring `direction` (the same service
/// can run in either direction between a stop pair without that making
/// it a different route for deduplication purposes).
fn paths_structurally_equal(a: &[crate::graph::PathStep], b: &[crate::graph::PathStep]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| x.from == y.from && x.to == y.to && x.service == y.service)
}
