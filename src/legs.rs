//! Compacts a flat `PathStep` sequence into `TripLeg`s: maximal runs of
//! consecutive steps sharing `(kind, service)` (spec.md §4.6).

use crate::graph::{
    GraphStore, Kind, NodeId, PathStep, TripLeg, CURRENT_LOCATION_LABEL, DESTINATION_LABEL,
    END_SENTINEL, START_SENTINEL,
};

/// Compact `path` into one `TripLeg` per maximal run of steps sharing
/// `(kind, service)`. Stop names are resolved from `store`'s metadata,
/// falling back to the sentinel display labels for the two ends of a
/// geocoded journey and to the raw id if a stop has no metadata.
pub fn compact_legs(store: &GraphStore, path: &[PathStep]) -> Vec<TripLeg> {
    let mut legs = Vec::new();
    let mut iter = path.iter().peekable();

    while let Some(first) = iter.next() {
        let kind = first.kind;
        let service = first.service.clone();
        let start_stop_id = first.from.clone();
        let mut end_stop_id = first.to.clone();
        let mut duration = first.weight;
        let mut stop_count = 1usize;

        while let Some(next) = iter.peek() {
            if next.kind != kind || next.service != service {
                break;
            }
            let next = iter.next().unwrap();
            end_stop_id = next.to.clone();
            duration += next.weight;
            stop_count += 1;
        }

        legs.push(TripLeg {
            kind,
            service,
            start_stop_name: resolve_name(store, &start_stop_id),
            start_stop_id,
            end_stop_name: resolve_name(store, &end_stop_id),
            end_stop_id,
            stop_count,
            duration,
        });
    }

    legs
}

/// Non-WALK legs, used by `RouteRanker`'s `LESS_TRANSFERS` / transfer
/// count criteria.
pub fn transfer_count(legs: &[TripLeg]) -> usize {
    let rides = legs.iter().filter(|l| l.kind != Kind::Walk).count();
    rides.saturating_sub(1)
}

fn resolve_name(store: &GraphStore, id: &NodeId) -> String {
    if id == CURRENT_LOCATION_LABEL || id.as_str() == START_SENTINEL {
        return CURRENT_LOCATION_LABEL.to_string();
    }
    if id == DESTINATION_LABEL || id.as_str() == END_SENTINEL {
        return DESTINATION_LABEL.to_string();
    }
    store
        .metadata(id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::fixtures::fixture_graph;
    use crate::pathfind::{find_path, Endpoint, PathfindOptions};

    #[test]
    fn consecutive_same_service_steps_merge_into_one_leg() {
        let store = fixture_graph();
        // A->B->C both ride service "10": one leg, two merged steps.
        let result = find_path(
            &store,
            &Endpoint::Node("A".into()),
            &Endpoint::Node("C".into()),
            &PathfindOptions::default(),
        )
        .unwrap();
        let legs = compact_legs(&store, &result.path);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].service, "10");
        assert_eq!(legs[0].stop_count, 2);
        assert_eq!(legs[0].start_stop_name, "Stop A");
        assert_eq!(legs[0].end_stop_name, "Stop C");
    }

    #[test]
    fn a_service_change_starts_a_new_leg() {
        let store = fixture_graph();
        // A->B (service "10") then B->D (service "30"): two legs.
        let result = find_path(
            &store,
            &Endpoint::Node("A".into()),
            &Endpoint::Node("D".into()),
            &PathfindOptions::default(),
        )
        .unwrap();
        let legs = compact_legs(&store, &result.path);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].service, "10");
        assert_eq!(legs[1].service, "30");
        assert_eq!(transfer_count(&legs), 1);
    }

    #[test]
    fn sentinel_endpoints_resolve_to_display_labels() {
        let store = fixture_graph();
        let result = find_path(
            &store,
            &Endpoint::Coordinate { lat: 1.300, lng: 103.800 },
            &Endpoint::Node("D".into()),
            &PathfindOptions::default(),
        )
        .unwrap();
        let legs = compact_legs(&store, &result.path);
        assert_eq!(legs.first().unwrap().start_stop_name, CURRENT_LOCATION_LABEL);
    }
}
