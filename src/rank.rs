//! Ranks and filters `RouteCandidate`s for the three sort criteria the
//! API exposes (spec.md §4.8): `FASTEST`, `LESS_TRANSFERS`,
//! `LESS_WALKING`. Sorting is stable, so candidates already ordered the
//! way `AlternativeGenerator` produced them keep that relative order on
//! ties.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, Kind, RouteCandidate};
use crate::legs::{compact_legs, transfer_count};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    Fastest,
    LessTransfers,
    LessWalking,
}

/// Drop any candidate that rides an excluded non-WALK mode, then sort
/// the survivors by `sort_by`.
pub fn filter_and_sort(
    store: &GraphStore,
    candidates: Vec<RouteCandidate>,
    excluded_modes: &HashSet<Kind>,
    sort_by: SortBy,
) -> Vec<RouteCandidate> {
    let mut filtered: Vec<RouteCandidate> = candidates
        .into_iter()
        .filter(|c| {
            c.path
                .iter()
                .all(|step| step.kind == Kind::Walk || !excluded_modes.contains(&step.kind))
        })
        .collect();

    match sort_by {
        SortBy::Fastest => {
            filtered.sort_by(|a, b| a.total_duration.partial_cmp(&b.total_duration).unwrap());
        }
        SortBy::LessTransfers => {
            filtered.sort_by(|a, b| {
                let ta = transfer_count(&compact_legs(store, &a.path));
                let tb = transfer_count(&compact_legs(store, &b.path));
                ta.cmp(&tb).then(a.total_duration.partial_cmp(&b.total_duration).unwrap())
            });
        }
        SortBy::LessWalking => {
            filtered.sort_by(|a, b| {
                walking_distance(a)
                    .partial_cmp(&walking_distance(b))
                    .unwrap()
                    .then(a.total_duration.partial_cmp(&b.total_duration).unwrap())
            });
        }
    }

    filtered
}

fn walking_distance(candidate: &RouteCandidate) -> f64 {
    candidate
        .path
        .iter()
        .filter(|s| s.kind == Kind::Walk)
        .map(|s| s.distance)
        .sum()
}
