use crate::decision::{evaluate_thresholds, DecisionConfig};
use crate::graph::TransitGraph;
use crate::matrix::{Region, RegionId, RegionMatrix};

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString};

use std::fmt::{Display as FmtDisplay, Formatter};

/// The three criteria every region is judged on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Minutes to the hub, lower is better.
    Commute,
    /// Minutes walked to the nearest stop, lower is better.
    Walk,
    /// Distinct lines at the nearest stop, higher is better.
    Lines,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Commute, Metric::Walk, Metric::Lines];

    /// Whether a larger raw value is the better one. Such metrics are
    /// flipped (`1 - t`) once normalised.
    #[inline]
    pub const fn invert(&self) -> bool {
        matches!(self, Metric::Lines)
    }

    /// The value `by` units worse than `value`.
    #[inline]
    pub fn worsen(&self, value: f64, by: f64) -> f64 {
        if self.invert() {
            value - by
        } else {
            value + by
        }
    }
}

/// Raw values of the three [`Metric`]s for one region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub commute: Option<f64>,
    pub walk: Option<f64>,
    pub lines: usize,
}

impl Metrics {
    pub fn new(commute: Option<f64>, walk: Option<f64>, lines: usize) -> Self {
        Self {
            commute,
            walk,
            lines,
        }
    }

    /// The metric's value, `None` when it is missing or not finite.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Commute => self.commute,
            Metric::Walk => self.walk,
            Metric::Lines => Some(self.lines as f64),
        }
        .filter(|value| value.is_finite())
    }
}

/// Why a region was disqualified.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    MissingCommute,
    MissingWalk,
    CommuteTooLong { minutes: f64, max: f64 },
    WalkTooLong { minutes: f64, max: f64 },
    TooFewLines { lines: usize, min: usize },
}

impl Reason {
    /// Whether the reason stems from missing data rather than a failed limit.
    pub fn is_insufficient_evidence(&self) -> bool {
        matches!(self, Reason::MissingCommute | Reason::MissingWalk)
    }
}

impl FmtDisplay for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::MissingCommute => write!(f, "insufficient evidence: no commute time to hub"),
            Reason::MissingWalk => write!(f, "insufficient evidence: no walk time to nearest stop"),
            Reason::CommuteTooLong { minutes, max } => {
                write!(f, "commute {minutes} min exceeds max {max} min")
            }
            Reason::WalkTooLong { minutes, max } => {
                write!(f, "walk {minutes} min exceeds max {max} min")
            }
            Reason::TooFewLines { lines, min } => {
                write!(f, "{lines} lines nearby, below min {min}")
            }
        }
    }
}

pub type Reasons = SmallVec<[Reason; 3]>;

/// A region under judgement.
///
/// Entries start unevaluated, with no reasons and no score. Only an entry
/// checked by [`evaluate`](Self::evaluate) (which [`judge`](crate::decision::judge)
/// does for every entry) can be recommended. It is recommended when that
/// check left no reasons.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JudgeEntry {
    pub region: RegionId,
    pub metrics: Metrics,
    /// `None` until the entry has been checked against a config.
    pub reasons: Option<Reasons>,
    pub score: Option<f64>,
}

impl JudgeEntry {
    pub fn new(region: impl Into<RegionId>, metrics: Metrics) -> Self {
        Self {
            region: region.into(),
            metrics,
            reasons: None,
            score: None,
        }
    }

    /// Checks the entry against the hard limits in `config`, replacing any
    /// earlier outcome and clearing its score.
    pub fn evaluate(&mut self, config: &DecisionConfig) -> &mut Self {
        self.reasons = Some(evaluate_thresholds(&self.metrics, config));
        self.score = None;
        self
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.reasons.is_some()
    }

    #[inline]
    pub fn is_recommended(&self) -> bool {
        self.reasons.as_ref().is_some_and(|reasons| reasons.is_empty())
    }

    #[inline]
    pub fn is_disqualified(&self) -> bool {
        self.reasons.as_ref().is_some_and(|reasons| !reasons.is_empty())
    }

    /// Every failed limit, empty while unevaluated.
    #[inline]
    pub fn reasons(&self) -> &[Reason] {
        self.reasons.as_deref().unwrap_or_default()
    }
}

/// Gathers each included region's metrics against the hub at matrix index
/// `hub`, in matrix order.
///
/// An index outside the matrix yields no entries at all.
pub fn collect_entries(
    graph: &TransitGraph,
    regions: &[Region],
    matrix: &RegionMatrix,
    hub: usize,
) -> Vec<JudgeEntry> {
    if hub >= matrix.len() {
        debug!("Hub index {hub} is outside a matrix of {} regions", matrix.len());
        return Vec::new();
    }

    let lookup = regions
        .iter()
        .map(|region| (&region.id, region))
        .collect::<FxHashMap<_, _>>();

    matrix
        .regions
        .iter()
        .enumerate()
        .map(|(origin, id)| {
            let region = lookup.get(id);
            let metrics = Metrics {
                commute: matrix.minutes.get(origin, hub).map(f64::from),
                walk: region.and_then(|region| region.walk_minutes),
                lines: region
                    .and_then(|region| region.stop)
                    .map_or(0, |stop| graph.lines_at(stop).len()),
            };

            JudgeEntry::new(id.clone(), metrics)
        })
        .collect()
}
