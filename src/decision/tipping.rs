use crate::decision::{JudgeEntry, Metric, Scorer};
use crate::matrix::RegionId;

use serde::Serialize;

use std::collections::BTreeMap;

/// How close the runner-up is to taking first place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tipping {
    pub top: RegionId,
    pub runner_up: RegionId,

    /// `runner_up.score - top.score`, always positive.
    pub gap: f64,

    /// For each weighted metric, how much worse the top pick's value must
    /// get, all else fixed, to draw level with the runner-up.
    pub deltas: BTreeMap<Metric, f64>,
}

/// The single-metric changes that would let `runner_up` overtake `top`.
///
/// `None` unless both are scored and `top` is strictly ahead. A metric with
/// zero weight cannot close the gap and is left out, as is any other
/// non-finite delta.
pub fn compute_tipping(top: &JudgeEntry, runner_up: &JudgeEntry, scorer: &Scorer) -> Option<Tipping> {
    let gap = runner_up.score? - top.score?;
    if gap.is_nan() || gap <= 0.0 {
        return None;
    }

    let weights = scorer.weights();
    let deltas = Metric::ALL
        .into_iter()
        .map(|metric| (metric, gap * scorer.span(metric) / weights.get(metric)))
        .filter(|(_, delta)| delta.is_finite() && *delta > 0.0)
        .collect();

    Some(Tipping {
        top: top.region.clone(),
        runner_up: runner_up.region.clone(),
        gap,
        deltas,
    })
}
