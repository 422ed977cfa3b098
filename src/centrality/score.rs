use crate::graph::{Minutes, TransitGraph};
use crate::matrix::{build_matrix, Region, RegionId, RegionMatrix};

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Extra minutes charged per transfer by [`score_transfer_penalized`]
/// unless the caller picks another value.
pub const DEFAULT_TRANSFER_PENALTY: Minutes = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CentralityMetric {
    /// Minutes from the region to a chosen hub.
    HubMinutes,
    /// Sum of reciprocal minutes to every other reachable region.
    Harmonic,
    /// Median minutes to every other reachable region.
    MedianMinutes,
    /// Harmonic centrality after charging a penalty on every transfer.
    TransferPenalized,
}

impl CentralityMetric {
    pub const fn higher_is_better(&self) -> bool {
        matches!(self, Self::Harmonic | Self::TransferPenalized)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::HubMinutes => "Minutes to hub",
            Self::Harmonic => "Harmonic",
            Self::MedianMinutes => "Median minutes",
            Self::TransferPenalized => "Transfer-penalized",
        }
    }
}

/// One region's value under one [`CentralityMetric`].
///
/// The value is kept raw (not rescaled) so that presentation layers can apply
/// their own, reproducible, normalisation. It is `None` rather than NaN or
/// infinite whenever the input gives no finite answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityScore {
    pub region: RegionId,
    pub metric: CentralityMetric,
    pub value: Option<f64>,
    pub higher_is_better: bool,
    pub label: &'static str,
}

impl CentralityScore {
    fn new(region: &RegionId, metric: CentralityMetric, value: Option<f64>) -> Self {
        Self {
            region: region.clone(),
            metric,
            value: value.filter(|v| v.is_finite()),
            higher_is_better: metric.higher_is_better(),
            label: metric.label(),
        }
    }
}

/// The finite raw values of a score list, in region order.
pub fn raw_values(scores: &[CentralityScore]) -> Vec<f64> {
    scores.iter().filter_map(|score| score.value).collect()
}

/// Minutes from each region to the region at matrix index `hub`.
///
/// Returns no scores at all when `hub` is not a valid index, rather than
/// scoring against some other region.
pub fn score_by_hub(matrix: &RegionMatrix, hub: usize) -> Vec<CentralityScore> {
    if hub >= matrix.len() {
        return Vec::new();
    }

    matrix
        .regions
        .iter()
        .enumerate()
        .map(|(origin, region)| {
            let minutes = matrix.minutes.get(origin, hub).map(f64::from);
            CentralityScore::new(region, CentralityMetric::HubMinutes, minutes)
        })
        .collect()
}

/// Harmonic centrality, `Σ 1 / minutes` over every other reachable region.
///
/// Unreachable pairs contribute nothing. Zero-minute pairs (regions sharing
/// a stop) are skipped since their reciprocal is unbounded.
pub fn score_harmonic(matrix: &RegionMatrix) -> Vec<CentralityScore> {
    harmonic(matrix, CentralityMetric::Harmonic)
}

/// Median minutes to every other reachable region, `None` if none are.
pub fn score_median_minutes(matrix: &RegionMatrix) -> Vec<CentralityScore> {
    matrix
        .regions
        .iter()
        .enumerate()
        .map(|(origin, region)| {
            let mut minutes = reachable_minutes(matrix, origin).collect::<Vec<_>>();
            minutes.sort_unstable();

            let n = minutes.len();
            let median = match n {
                0 => None,
                _ if n % 2 == 1 => Some(f64::from(minutes[n / 2])),
                _ => Some((f64::from(minutes[n / 2 - 1]) + f64::from(minutes[n / 2])) / 2.0),
            };

            CentralityScore::new(region, CentralityMetric::MedianMinutes, median)
        })
        .collect()
}

/// Harmonic centrality over a copy of `graph` where every transfer costs
/// `penalty` more minutes.
///
/// Regions that depend on changing lines fall further behind than regions on
/// a single direct line.
pub fn score_transfer_penalized(
    graph: &TransitGraph,
    regions: &[Region],
    penalty: Minutes,
) -> Vec<CentralityScore> {
    let penalized = graph.with_transfer_penalty(penalty);
    let matrix = build_matrix(&penalized, regions);

    harmonic(&matrix, CentralityMetric::TransferPenalized)
}

fn harmonic(matrix: &RegionMatrix, metric: CentralityMetric) -> Vec<CentralityScore> {
    matrix
        .regions
        .iter()
        .enumerate()
        .map(|(origin, region)| {
            let score = reachable_minutes(matrix, origin)
                .map(|minutes| 1.0 / f64::from(minutes))
                .filter(|term| term.is_finite())
                .sum::<f64>();

            CentralityScore::new(region, metric, Some(score))
        })
        .collect()
}

/// Positive minutes from `origin` to every other reachable region.
fn reachable_minutes(matrix: &RegionMatrix, origin: usize) -> impl Iterator<Item = Minutes> + '_ {
    matrix
        .minutes
        .row(origin)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter(move |(destination, _)| *destination != origin)
        .filter_map(|(_, minutes)| minutes.filter(|m| *m > 0))
}
