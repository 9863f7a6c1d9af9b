//! Builds map-renderable `RouteSegment`s from a `PathStep` sequence
//! (spec.md §4.7): maximal runs of consecutive steps sharing `service`,
//! each a polyline of stop coordinates with a continuity invariant — a
//! new segment's first point is the previous segment's last point, so
//! segments can be drawn independently without gaps.

use crate::graph::{GraphStore, NodeId, PathStep, RouteSegment};

/// Build segments from `path`. Only a step's `to` coordinate is ever
/// looked up; `from` comes from whatever point the walk has already
/// reached (the previous step's `to`, or the run's starting point), so
/// a step whose `to` has no metadata is skipped without disturbing
/// that accumulated position. A run that ends up with fewer than two
/// points is dropped, since a single point can't draw a line.
pub fn build_segments(store: &GraphStore, path: &[PathStep]) -> Vec<RouteSegment> {
    let mut segments: Vec<RouteSegment> = Vec::new();
    let mut current: Option<(String, Vec<(f64, f64)>, crate::graph::Kind)> = None;
    let mut last_point: Option<(f64, f64)> =
        path.first().and_then(|step| coordinates(store, &step.from));

    for step in path {
        let Some(to_pt) = coordinates(store, &step.to) else {
            continue;
        };

        match &mut current {
            Some((service, positions, kind)) if *service == step.service && *kind == step.kind => {
                positions.push(to_pt);
            }
            _ => {
                if let Some((service, positions, kind)) = current.take() {
                    push_if_drawable(&mut segments, kind, service, positions);
                }
                let start = last_point.unwrap_or(to_pt);
                current = Some((step.service.clone(), vec![start, to_pt], step.kind));
            }
        }
        last_point = Some(to_pt);
    }

    if let Some((service, positions, kind)) = current.take() {
        push_if_drawable(&mut segments, kind, service, positions);
    }

    segments
}

fn push_if_drawable(
    out: &mut Vec<RouteSegment>,
    kind: crate::graph::Kind,
    service: String,
    positions: Vec<(f64, f64)>,
) {
    if positions.len() >= 2 {
        out.push(RouteSegment { kind, service, positions });
    }
}

fn coordinates(store: &GraphStore, id: &NodeId) -> Option<(f64, f64)> {
    store.metadata(id).map(|m| m.coordinates())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::fixtures::fixture_graph;
    use crate::pathfind::{find_path, Endpoint, PathfindOptions};

    #[test]
    fn a_service_change_starts_a_new_segment_that_touches_the_last_point() {
        let store = fixture_graph();
        let result = find_path(
            &store,
            &Endpoint::Node("A".into()),
            &Endpoint::Node("D".into()),
            &PathfindOptions::default(),
        )
        .unwrap();
        let segments = build_segments(&store, &result.path);
        assert_eq!(segments.len(), 2);
        let b_coords = store.metadata("B").unwrap().coordinates();
        assert_eq!(*segments[0].positions.last().unwrap(), b_coords);
        assert_eq!(segments[1].positions[0], b_coords);
    }

    #[test]
    fn a_single_service_run_is_one_segment() {
        let store = fixture_graph();
        let result = find_path(
            &store,
            &Endpoint::Node("A".into()),
            &Endpoint::Node("C".into()),
            &PathfindOptions::default(),
        )
        .unwrap();
        let segments = build_segments(&store, &result.path);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].positions.len(), 3);
    }

    #[test]
    fn steps_with_missing_metadata_are_skipped_not_fatal() {
        let store = fixture_graph();
        let path = vec![PathStep {
            from: "A".into(),
            to: "NOWHERE".into(),
            kind: crate::graph::Kind::Bus,
            service: "10".into(),
            direction: None,
            weight: 60.0,
            distance: 0.0,
        }];
        let segments = build_segments(&store, &path);
        assert!(segments.is_empty());
    }

    #[test]
    fn a_step_with_missing_to_metadata_only_drops_that_step() {
        use crate::graph::{GraphStore, StopMetadata};
        use std::collections::HashMap;

        // X->Y (service A), Y->Z (service B), Z->W (service B), with
        // metadata missing only for Y. Step0's `to` lookup fails and is
        // skipped, but step1 still runs (its own `to`, Z, is present)
        // and continues from the accumulated start X, not from Y.
        let mut metadata = HashMap::new();
        for (id, lat, lng) in [("X", 1.30, 103.80), ("Z", 1.31, 103.81), ("W", 1.32, 103.82)] {
            metadata.insert(
                id.to_string(),
                StopMetadata { name: id.to_string(), road: None, lat, lng, kind: None },
            );
        }
        let store = GraphStore::new(HashMap::new(), metadata);

        let path = vec![
            PathStep {
                from: "X".into(),
                to: "Y".into(),
                kind: crate::graph::Kind::Bus,
                service: "A".into(),
                direction: None,
                weight: 60.0,
                distance: 0.0,
            },
            PathStep {
                from: "Y".into(),
                to: "Z".into(),
                kind: crate::graph::Kind::Bus,
                service: "B".into(),
                direction: None,
                weight: 60.0,
                distance: 0.0,
            },
            PathStep {
                from: "Z".into(),
                to: "W".into(),
                kind: crate::graph::Kind::Bus,
                service: "B".into(),
                direction: None,
                weight: 60.0,
                distance: 0.0,
            },
        ];

        let segments = build_segments(&store, &path);
        assert_eq!(segments.len(), 1);
        let x = store.metadata("X").unwrap().coordinates();
        let z = store.metadata("Z").unwrap().coordinates();
        let w = store.metadata("W").unwrap().coordinates();
        assert_eq!(segments[0].positions, vec![x, z, w]);
    }
}
