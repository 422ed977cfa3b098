//! Hub corridors: origins that reach a hub much faster than their straight
//! line distance would suggest.
//!
//! Every origin is compared against a nominal surface speed
//! ([`CorridorConfig::expected_speed_km_per_min`]); the difference between
//! the expected and the scheduled minutes is how much the network "saves".

use crate::graph::{Minutes, TransitGraph};
use crate::matrix::{Region, RegionId, RegionMatrix};

use geo::{Distance, Haversine};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hard limit on the length of either corridor list.
pub const MAX_CORRIDORS: usize = 200;

const DEFAULT_MAX_MINUTES: Minutes = 180;
const DEFAULT_TOP_N: usize = 180;
const DEFAULT_EXPECTED_SPEED: f64 = 0.25; // ~15km/h

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Origins further than this from the hub are ignored.
    pub max_minutes: Minutes,

    /// Length of each output list, capped at [`MAX_CORRIDORS`].
    pub top_n: usize,

    /// Nominal door-to-door speed used to derive the expected minutes.
    pub expected_speed_km_per_min: f64,

    /// Only origins in these boroughs (case-insensitive) are considered.
    /// Origins with no borough on record are always considered.
    pub boroughs: Option<Vec<String>>,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            max_minutes: DEFAULT_MAX_MINUTES,
            top_n: DEFAULT_TOP_N,
            expected_speed_km_per_min: DEFAULT_EXPECTED_SPEED,
            boroughs: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Corridor {
    pub origin: RegionId,
    pub origin_name: String,
    pub origin_borough: Option<String>,
    pub hub: RegionId,

    pub minutes: Minutes,
    pub distance_km: f64,
    pub km_per_min: f64,
    pub expected_minutes: Option<f64>,
    pub minutes_saved: Option<f64>,

    /// The line boarded first when leaving the origin.
    pub first_line: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HubCorridors {
    pub hub: Option<RegionId>,

    /// Largest `minutes_saved` first, ties broken by longer distance.
    pub top_underrated: Vec<Corridor>,

    /// Fastest `km_per_min` first, ties broken by longer distance.
    pub top_speed: Vec<Corridor>,
}

/// Ranks every origin's trip to the hub at matrix index `hub`.
///
/// An index outside the matrix yields empty lists. Origins that cannot reach
/// the hub, reach it in zero minutes, exceed [`CorridorConfig::max_minutes`],
/// or lack a centroid on either end are skipped.
pub fn hub_corridors(
    graph: &TransitGraph,
    matrix: &RegionMatrix,
    regions: &[Region],
    hub: usize,
    config: &CorridorConfig,
) -> HubCorridors {
    let Some(hub_id) = matrix.regions.get(hub) else {
        return HubCorridors::default();
    };

    let lookup = regions
        .iter()
        .map(|region| (&region.id, region))
        .collect::<FxHashMap<_, _>>();

    let Some(hub_centroid) = lookup.get(hub_id).and_then(|region| region.centroid) else {
        return HubCorridors {
            hub: Some(hub_id.clone()),
            ..HubCorridors::default()
        };
    };

    let allowed = |region: &Region| match (&config.boroughs, &region.borough) {
        (Some(allow), Some(borough)) => allow
            .iter()
            .any(|entry| entry.trim().eq_ignore_ascii_case(borough.trim())),
        _ => true,
    };

    let corridors = matrix
        .regions
        .iter()
        .enumerate()
        .filter(|(origin, _)| *origin != hub)
        .filter_map(|(origin, id)| {
            let region = *lookup.get(id)?;
            if !allowed(region) {
                return None;
            }

            let minutes = matrix.minutes.get(origin, hub)?;
            if minutes == 0 || minutes > config.max_minutes {
                return None;
            }

            let distance_km = Haversine.distance(region.centroid?, hub_centroid) / 1_000.0;
            if !distance_km.is_finite() {
                return None;
            }

            let expected_minutes = (config.expected_speed_km_per_min > 0.0)
                .then(|| distance_km / config.expected_speed_km_per_min);

            let first_line = matrix
                .first_route
                .get(origin, hub)
                .and_then(|route| graph.route(route))
                .map(|route| route.label().to_string());

            Some(Corridor {
                origin: id.clone(),
                origin_name: region.name.clone(),
                origin_borough: region.borough.clone(),
                hub: hub_id.clone(),
                minutes,
                distance_km,
                km_per_min: distance_km / minutes as f64,
                expected_minutes,
                minutes_saved: expected_minutes.map(|expected| expected - minutes as f64),
                first_line,
            })
        })
        .collect::<Vec<_>>();

    let limit = config.top_n.min(MAX_CORRIDORS);

    let top_underrated = corridors
        .iter()
        .filter(|corridor| corridor.minutes_saved.is_some())
        .sorted_by(|a, b| {
            let saved = |c: &Corridor| c.minutes_saved.unwrap_or(f64::NEG_INFINITY);
            saved(b)
                .total_cmp(&saved(a))
                .then(b.distance_km.total_cmp(&a.distance_km))
        })
        .take(limit)
        .cloned()
        .collect();

    let top_speed = corridors
        .iter()
        .sorted_by(|a, b| {
            b.km_per_min
                .total_cmp(&a.km_per_min)
                .then(b.distance_km.total_cmp(&a.distance_km))
        })
        .take(limit)
        .cloned()
        .collect();

    HubCorridors {
        hub: Some(hub_id.clone()),
        top_underrated,
        top_speed,
    }
}
