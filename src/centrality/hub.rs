//! Resolving a hub, the region every [`score_by_hub`](super::score_by_hub)
//! query measures against.

use crate::centrality::CentralityScore;
use crate::matrix::{Region, RegionId, RegionMatrix};

use geo::{Distance, Haversine, Intersects, Point, Rect};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A named landmark, placed by coordinate, to be snapped onto a region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HubAnchor {
    pub key: String,
    pub label: String,
    pub position: Point<f64>,
}

impl HubAnchor {
    pub fn new(key: impl Into<String>, label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            position: Point::new(lon, lat),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedHub {
    pub key: String,
    pub label: String,
    pub region: RegionId,
    /// Index of [`region`](#field.region) in the matrix.
    pub index: usize,
}

/// Matrix index of the included region whose centroid lies nearest to
/// `anchor`, by great-circle distance.
///
/// Regions without a centroid are never chosen. Ties go to the region that
/// appears first in the matrix.
pub fn nearest_region(matrix: &RegionMatrix, regions: &[Region], anchor: Point<f64>) -> Option<usize> {
    let centroids = centroids(regions);

    matrix
        .regions
        .iter()
        .enumerate()
        .filter_map(|(index, id)| {
            let centroid = centroids.get(id)?;
            Some((index, Haversine.distance(*centroid, anchor)))
        })
        .filter(|(_, meters)| meters.is_finite())
        .min_by(|(a_index, a), (b_index, b)| a.total_cmp(b).then(a_index.cmp(b_index)))
        .map(|(index, _)| index)
}

/// Snaps every anchor onto its nearest region.
/// Anchors that cannot be placed are left out.
pub fn resolve_hubs(matrix: &RegionMatrix, regions: &[Region], anchors: &[HubAnchor]) -> Vec<ResolvedHub> {
    anchors
        .iter()
        .filter_map(|anchor| {
            let index = nearest_region(matrix, regions, anchor.position)?;

            Some(ResolvedHub {
                key: anchor.key.clone(),
                label: anchor.label.clone(),
                region: matrix.regions[index].clone(),
                index,
            })
        })
        .collect()
}

/// Matrix index of the best-scoring region whose centroid falls inside
/// `bounds`, edges included.
///
/// `scores` are matched to regions by id, so any per-region score list from
/// this module can be used. Which end is "best" follows each score's own
/// polarity. Regions with no finite score are never chosen.
pub fn best_hub_in_bounds(
    matrix: &RegionMatrix,
    regions: &[Region],
    scores: &[CentralityScore],
    bounds: Rect<f64>,
) -> Option<usize> {
    let centroids = centroids(regions);
    let values = scores
        .iter()
        .filter_map(|score| {
            let value = score.value?;
            let oriented = if score.higher_is_better { value } else { -value };
            Some((&score.region, oriented))
        })
        .collect::<FxHashMap<_, _>>();

    matrix
        .regions
        .iter()
        .enumerate()
        .filter(|(_, id)| centroids.get(id).is_some_and(|c| c.intersects(&bounds)))
        .filter_map(|(index, id)| Some((index, *values.get(id)?)))
        .max_by(|(a_index, a), (b_index, b)| a.total_cmp(b).then(b_index.cmp(a_index)))
        .map(|(index, _)| index)
}

fn centroids(regions: &[Region]) -> FxHashMap<&RegionId, Point<f64>> {
    regions
        .iter()
        .filter_map(|region| Some((&region.id, region.centroid?)))
        .collect()
}
