use crate::decision::{JudgeEntry, Metric};

/// The recommended candidates that no other recommended candidate strictly
/// dominates, in their given order.
///
/// Only candidates already checked by [`JudgeEntry::evaluate`] and left
/// without reasons take part. Unevaluated candidates are treated like
/// disqualified ones.
///
/// `b` dominates `a` when it is at least as good on every listed key and
/// strictly better on one, "better" meaning lower for `minimize` keys and
/// higher for `maximize` keys. A missing value counts as the worst possible.
/// Other candidates neither appear nor dominate. Should the front come
/// out empty, the whole recommended set is returned instead.
pub fn pareto_front<'a>(
    candidates: &'a [JudgeEntry],
    minimize: &[Metric],
    maximize: &[Metric],
) -> Vec<&'a JudgeEntry> {
    front_indices(candidates, minimize, maximize)
        .into_iter()
        .map(|index| &candidates[index])
        .collect()
}

/// Positions in `candidates` of the [`pareto_front`] members.
pub(crate) fn front_indices(candidates: &[JudgeEntry], minimize: &[Metric], maximize: &[Metric]) -> Vec<usize> {
    let pool = candidates
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_recommended())
        .collect::<Vec<_>>();

    // Each key is oriented so that smaller is better.
    let keys = |entry: &JudgeEntry| {
        let lower = minimize
            .iter()
            .map(|metric| entry.metrics.get(*metric).unwrap_or(f64::INFINITY));
        let higher = maximize
            .iter()
            .map(|metric| entry.metrics.get(*metric).map_or(f64::INFINITY, |value| -value));

        lower.chain(higher).collect::<Vec<_>>()
    };

    let oriented = pool.iter().map(|&(_, entry)| keys(entry)).collect::<Vec<_>>();

    let front = pool
        .iter()
        .zip(&oriented)
        .filter(|(_, candidate)| !oriented.iter().any(|other| dominates(other, candidate)))
        .map(|((index, _), _)| *index)
        .collect::<Vec<_>>();

    if front.is_empty() {
        pool.into_iter().map(|(index, _)| index).collect()
    } else {
        front
    }
}

fn dominates(by: &[f64], of: &[f64]) -> bool {
    let mut strictly = false;
    for (b, a) in by.iter().zip(of) {
        if b > a {
            return false;
        }
        strictly |= b < a;
    }

    strictly
}
