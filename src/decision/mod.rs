//! Multi-criteria judgement of regions: hard thresholds, then a Pareto
//! filter, then a weighted ranking with its tipping point.
//!
//! ```
//! use commute::decision::{judge, DecisionConfig, JudgeEntry, Metrics};
//!
//! let entries = vec![
//!     JudgeEntry::new("near", Metrics::new(Some(20.0), Some(4.0), 3)),
//!     JudgeEntry::new("far", Metrics::new(Some(50.0), Some(4.0), 3)),
//! ];
//!
//! let verdict = judge(entries, &DecisionConfig::default());
//! assert_eq!(verdict.recommended[0].region.0, "near");
//! assert_eq!(verdict.disqualified[0].reasons()[0].to_string(), "commute 50 min exceeds max 45 min");
//! ```

pub mod config;
pub mod entry;
pub mod judge;
pub mod pareto;
pub mod scoring;
pub mod threshold;
pub mod tipping;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use config::{DecisionConfig, SeverityWeights, WeightProfile, Weights};
#[doc(inline)]
pub use entry::{collect_entries, JudgeEntry, Metric, Metrics, Reason, Reasons};
#[doc(inline)]
pub use judge::{judge, Verdict};
#[doc(inline)]
pub use pareto::pareto_front;
#[doc(inline)]
pub use scoring::{MetricRange, Scorer};
#[doc(inline)]
pub use threshold::{evaluate_thresholds, severity};
#[doc(inline)]
pub use tipping::{compute_tipping, Tipping};
