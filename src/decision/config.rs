use crate::decision::Metric;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

const DEFAULT_MAX_COMMUTE: f64 = 45.0;
const DEFAULT_MAX_WALK: f64 = 10.0;
const DEFAULT_MIN_LINES: usize = 2;

/// Relative importance of each [`Metric`] in the composite score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub commute: f64,
    pub walk: f64,
    pub lines: f64,
}

impl Weights {
    pub const fn new(commute: f64, walk: f64, lines: f64) -> Self {
        Self {
            commute,
            walk,
            lines,
        }
    }

    #[inline]
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Commute => self.commute,
            Metric::Walk => self.walk,
            Metric::Lines => self.lines,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        WeightProfile::Balanced.weights()
    }
}

/// A named set of [`Weights`].
///
/// Profiles are addressed by their snake_case name, so `"commute_first"`
/// parses to [`WeightProfile::CommuteFirst`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    #[default]
    Balanced,
    CommuteFirst,
    Walkable,
    Connected,
    /// Uses [`DecisionConfig::custom_weights`].
    Custom,
}

impl WeightProfile {
    /// The weights behind a named profile. [`WeightProfile::Custom`] has no
    /// weights of its own and falls back to the balanced set.
    pub const fn weights(&self) -> Weights {
        match self {
            WeightProfile::Balanced | WeightProfile::Custom => Weights::new(0.5, 0.3, 0.2),
            WeightProfile::CommuteFirst => Weights::new(0.7, 0.2, 0.1),
            WeightProfile::Walkable => Weights::new(0.3, 0.6, 0.1),
            WeightProfile::Connected => Weights::new(0.4, 0.2, 0.4),
        }
    }
}

/// Multipliers turning threshold excess into a single severity, used to
/// order disqualified regions from "nearly made it" to "not close".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    /// Per minute of commute over the limit.
    pub commute: f64,
    /// Per minute of walk over the limit.
    pub walk: f64,
    /// Per line short of the minimum.
    pub missing_line: f64,
}

impl SeverityWeights {
    pub const COMMUTE: f64 = 1.0;
    pub const WALK: f64 = 1.5;
    pub const MISSING_LINE: f64 = 5.0;
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            commute: Self::COMMUTE,
            walk: Self::WALK,
            missing_line: Self::MISSING_LINE,
        }
    }
}

/// Thresholds and weighting for [`judge`](crate::decision::judge).
///
/// Fields missing from a JSON document take their defaults:
///
/// ```
/// use commute::decision::{DecisionConfig, WeightProfile};
///
/// let config = DecisionConfig::from_json(r#"{ "max_commute_minutes": 30, "profile": "walkable" }"#)?;
/// assert_eq!(config.max_commute_minutes, 30.0);
/// assert_eq!(config.max_walk_minutes, 10.0);
/// assert_eq!(config.profile, WeightProfile::Walkable);
/// # Ok::<(), commute::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    pub max_commute_minutes: f64,
    pub max_walk_minutes: f64,
    pub min_line_count: usize,
    pub profile: WeightProfile,
    pub custom_weights: Option<Weights>,
    pub severity: SeverityWeights,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            max_commute_minutes: DEFAULT_MAX_COMMUTE,
            max_walk_minutes: DEFAULT_MAX_WALK,
            min_line_count: DEFAULT_MIN_LINES,
            profile: WeightProfile::default(),
            custom_weights: None,
            severity: SeverityWeights::default(),
        }
    }
}

impl DecisionConfig {
    pub fn from_json(document: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Selects a custom weighting, switching the profile to
    /// [`WeightProfile::Custom`].
    pub fn with_custom_weights(self, weights: Weights) -> Self {
        Self {
            profile: WeightProfile::Custom,
            custom_weights: Some(weights),
            ..self
        }
    }

    pub fn weights(&self) -> Weights {
        match (self.profile, self.custom_weights) {
            (WeightProfile::Custom, Some(weights)) => weights,
            (profile, _) => profile.weights(),
        }
    }
}
