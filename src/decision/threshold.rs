use crate::decision::{DecisionConfig, Metrics, Reason, Reasons};

/// Every hard limit `metrics` fails under `config`.
///
/// All checks run, so one region can collect several reasons. A missing or
/// non-finite commute or walk is reported as insufficient evidence, and is
/// not compared against its limit.
pub fn evaluate_thresholds(metrics: &Metrics, config: &DecisionConfig) -> Reasons {
    let mut reasons = Reasons::new();

    match metrics.commute.filter(|minutes| minutes.is_finite()) {
        None => reasons.push(Reason::MissingCommute),
        Some(minutes) if minutes > config.max_commute_minutes => reasons.push(Reason::CommuteTooLong {
            minutes,
            max: config.max_commute_minutes,
        }),
        Some(_) => {}
    }

    match metrics.walk.filter(|minutes| minutes.is_finite()) {
        None => reasons.push(Reason::MissingWalk),
        Some(minutes) if minutes > config.max_walk_minutes => reasons.push(Reason::WalkTooLong {
            minutes,
            max: config.max_walk_minutes,
        }),
        Some(_) => {}
    }

    if metrics.lines < config.min_line_count {
        reasons.push(Reason::TooFewLines {
            lines: metrics.lines,
            min: config.min_line_count,
        });
    }

    reasons
}

/// Weighted sum of how far `metrics` overshoot each limit.
///
/// `None` when the commute or walk is unknown, since how far such a region
/// misses cannot be measured.
pub fn severity(metrics: &Metrics, config: &DecisionConfig) -> Option<f64> {
    let commute = metrics.commute.filter(|minutes| minutes.is_finite())?;
    let walk = metrics.walk.filter(|minutes| minutes.is_finite())?;

    let weights = &config.severity;
    let missing_lines = config.min_line_count.saturating_sub(metrics.lines) as f64;

    Some(
        (commute - config.max_commute_minutes).max(0.0) * weights.commute
            + (walk - config.max_walk_minutes).max(0.0) * weights.walk
            + missing_lines * weights.missing_line,
    )
}
