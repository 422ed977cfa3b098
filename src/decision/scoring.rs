use crate::decision::{JudgeEntry, Metric, Metrics, Weights};

use serde::Serialize;

/// Observed extent of one metric across a candidate pool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Width used as the normalisation denominator. A zero-width range
    /// divides by 1 instead.
    #[inline]
    pub fn span(&self) -> f64 {
        let width = self.max - self.min;
        if width > 0.0 && width.is_finite() {
            width
        } else {
            1.0
        }
    }

    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// Composite scoring over a fixed pool.
///
/// Each metric is normalised linearly against the pool's min and max, then
/// flipped when a higher raw value is the better one, so that for every term
/// lower is better. The composite is the weighted sum of the terms. Values
/// outside the pool's range are not clamped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scorer {
    weights: Weights,
    ranges: [Option<MetricRange>; 3],
}

impl Scorer {
    pub fn from_pool<'a>(pool: impl IntoIterator<Item = &'a JudgeEntry>, weights: Weights) -> Self {
        let mut ranges = [None::<MetricRange>; 3];

        for entry in pool {
            for (slot, metric) in ranges.iter_mut().zip(Metric::ALL) {
                let Some(value) = entry.metrics.get(metric) else {
                    continue;
                };

                *slot = Some(match *slot {
                    Some(range) => MetricRange {
                        min: range.min.min(value),
                        max: range.max.max(value),
                    },
                    None => MetricRange {
                        min: value,
                        max: value,
                    },
                });
            }
        }

        Self { weights, ranges }
    }

    #[inline]
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// The pool's range for `metric`, `None` if no candidate had a value.
    #[inline]
    pub fn range(&self, metric: Metric) -> Option<MetricRange> {
        self.ranges[metric as usize]
    }

    /// The denominator `metric` is normalised by.
    #[inline]
    pub fn span(&self, metric: Metric) -> f64 {
        self.range(metric).map_or(1.0, |range| range.span())
    }

    /// The weighted composite of `metrics`, lower is better. Metrics with
    /// no value, or with no range in the pool, contribute nothing.
    pub fn score(&self, metrics: &Metrics) -> f64 {
        Metric::ALL
            .into_iter()
            .filter_map(|metric| {
                let range = self.range(metric)?;
                let t = range.normalize(metrics.get(metric)?);
                let term = if metric.invert() { 1.0 - t } else { t };

                Some(self.weights.get(metric) * term)
            })
            .sum()
    }
}
