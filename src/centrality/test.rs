use crate::centrality::*;
use crate::graph::{GraphBuilder, Route, Stop, TransitGraph};
use crate::matrix::{build_matrix, Region, RegionMatrix};

use approx::assert_relative_eq;
use geo::{Point, Rect};

/// Hub `H` with a direct line from `A` and `C`. `B` only reaches the hub by
/// walking over to `A` first. `D` is cut off entirely.
fn network() -> (TransitGraph, Vec<Region>) {
    let mut builder = GraphBuilder::default();
    let h = builder.add_stop(Stop::at("H", 40.75, -73.98));
    let a = builder.add_stop(Stop::at("A", 40.80, -73.98));
    let b = builder.add_stop(Stop::at("B", 40.81, -73.98));
    let c = builder.add_stop(Stop::at("C", 40.60, -73.90));
    let d = builder.add_stop(Stop::at("D", 40.50, -74.20));
    let one = builder.add_route(Route::new("1"));
    let two = builder.add_route(Route::new("2"));

    builder.add_leg(a, h, 10, Some(one)).unwrap();
    builder.add_leg(h, a, 10, Some(one)).unwrap();
    builder.add_leg(c, h, 12, Some(two)).unwrap();
    builder.add_leg(h, c, 20, Some(two)).unwrap();
    builder.add_transfer(b, a, 2).unwrap();

    let regions = vec![
        Region::new("rh", "Hub").with_centroid(40.75, -73.98).with_stop(h),
        Region::new("ra", "North").with_centroid(40.80, -73.98).with_stop(a),
        Region::new("rb", "Far North").with_centroid(40.81, -73.98).with_stop(b),
        Region::new("rc", "South").with_centroid(40.60, -73.90).with_stop(c),
        Region::new("rd", "Island").with_stop(d),
    ];

    (builder.build(), regions)
}

fn values(scores: &[CentralityScore]) -> Vec<Option<f64>> {
    scores.iter().map(|score| score.value).collect()
}

fn matrix() -> (TransitGraph, Vec<Region>, RegionMatrix) {
    let (graph, regions) = network();
    let matrix = build_matrix(&graph, &regions);
    (graph, regions, matrix)
}

#[test]
fn hub_minutes_read_the_hub_column() {
    let (_, _, matrix) = matrix();
    let scores = score_by_hub(&matrix, 0);

    assert_eq!(scores.len(), 5);
    assert_eq!(
        values(&scores),
        vec![Some(0.0), Some(10.0), Some(12.0), Some(12.0), None]
    );
    assert!(scores.iter().all(|score| !score.higher_is_better));
    assert_eq!(scores[0].label, "Minutes to hub");
}

#[test]
fn unknown_hub_scores_nothing() {
    let (_, _, matrix) = matrix();
    assert!(score_by_hub(&matrix, matrix.len()).is_empty());
}

#[test]
fn harmonic_sums_reciprocal_minutes() {
    let (_, _, matrix) = matrix();
    let scores = score_harmonic(&matrix);

    assert!(scores[0].higher_is_better);
    assert_relative_eq!(scores[0].value.unwrap(), 1.0 / 10.0 + 1.0 / 20.0);
    assert_relative_eq!(scores[1].value.unwrap(), 1.0 / 10.0 + 1.0 / 30.0);
    assert_relative_eq!(scores[2].value.unwrap(), 1.0 / 2.0 + 1.0 / 12.0 + 1.0 / 32.0);
    assert_relative_eq!(scores[3].value.unwrap(), 1.0 / 12.0 + 1.0 / 22.0);

    // Reaches nothing, but still has a finite score.
    assert_eq!(scores[4].value, Some(0.0));
}

#[test]
fn median_ignores_unreachable_regions() {
    let (_, _, matrix) = matrix();
    let scores = score_median_minutes(&matrix);

    assert_eq!(
        values(&scores),
        vec![Some(15.0), Some(20.0), Some(12.0), Some(17.0), None]
    );
    assert_eq!(raw_values(&scores), vec![15.0, 20.0, 12.0, 17.0]);
}

#[test_log::test]
fn transfer_penalty_only_hurts_regions_that_transfer() {
    let (graph, regions, matrix) = matrix();
    let plain = score_harmonic(&matrix);
    let penalized = score_transfer_penalized(&graph, &regions, DEFAULT_TRANSFER_PENALTY);

    assert_eq!(penalized.len(), plain.len());
    assert_eq!(penalized[2].metric, CentralityMetric::TransferPenalized);

    for index in [0, 1, 3, 4] {
        assert_eq!(penalized[index].value, plain[index].value);
    }

    assert_relative_eq!(
        penalized[2].value.unwrap(),
        1.0 / 6.0 + 1.0 / 16.0 + 1.0 / 36.0
    );
    assert!(penalized[2].value < plain[2].value);
}

#[test]
fn metric_names_round_trip_through_strings() {
    assert_eq!(
        "transfer_penalized".parse::<CentralityMetric>(),
        Ok(CentralityMetric::TransferPenalized)
    );
    assert_eq!(CentralityMetric::MedianMinutes.to_string(), "median_minutes");
    assert!("closeness".parse::<CentralityMetric>().is_err());
}

#[test]
fn nearest_region_snaps_anchor_to_centroid() {
    let (_, regions, matrix) = matrix();

    assert_eq!(nearest_region(&matrix, &regions, Point::new(-73.98, 40.76)), Some(0));
    assert_eq!(nearest_region(&matrix, &regions, Point::new(-73.98, 40.809)), Some(2));

    // The island has no centroid and is never chosen, however close.
    assert_eq!(nearest_region(&matrix, &regions, Point::new(-74.20, 40.50)), Some(3));
}

#[test]
fn nearest_region_without_centroids_is_none() {
    let (_, _, matrix) = matrix();
    assert_eq!(nearest_region(&matrix, &[], Point::new(-73.98, 40.76)), None);
}

#[test]
fn hub_anchors_resolve_to_regions() {
    let (_, regions, matrix) = matrix();
    let anchors = vec![
        HubAnchor::new("midtown", "Midtown", 40.754, -73.984),
        HubAnchor::new("south", "Southern Terminal", 40.61, -73.91),
    ];

    let hubs = resolve_hubs(&matrix, &regions, &anchors);

    assert_eq!(hubs.len(), 2);
    assert_eq!(hubs[0].region.0, "rh");
    assert_eq!(hubs[0].index, 0);
    assert_eq!(hubs[1].key, "south");
    assert_eq!(hubs[1].region.0, "rc");
}

#[test]
fn best_hub_follows_score_polarity() {
    let (_, regions, matrix) = matrix();
    let bounds = Rect::new((-74.0, 40.70), (-73.95, 40.85));

    let harmonic = score_harmonic(&matrix);
    assert_eq!(best_hub_in_bounds(&matrix, &regions, &harmonic, bounds), Some(2));

    let minutes = score_by_hub(&matrix, 0);
    assert_eq!(best_hub_in_bounds(&matrix, &regions, &minutes, bounds), Some(0));

    let empty = Rect::new((0.0, 0.0), (1.0, 1.0));
    assert_eq!(best_hub_in_bounds(&matrix, &regions, &harmonic, empty), None);
}
