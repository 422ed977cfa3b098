use crate::decision::pareto::front_indices;
use crate::decision::{compute_tipping, severity, DecisionConfig, JudgeEntry, Metric, Scorer, Tipping};
use crate::matrix::RegionId;

use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;
#[cfg(feature = "tracing")]
use tracing::Level;

use std::cmp::Ordering;

const MINIMIZE: [Metric; 2] = [Metric::Commute, Metric::Walk];
const MAXIMIZE: [Metric; 1] = [Metric::Lines];

/// The outcome of one [`judge`] call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Verdict {
    /// Entries that passed every threshold, best score first.
    pub recommended: Vec<JudgeEntry>,

    /// Entries that failed at least one threshold, nearest miss first.
    /// Entries with missing data come last.
    pub disqualified: Vec<JudgeEntry>,

    /// The Pareto-undominated recommended regions, best score first.
    pub pareto: Vec<RegionId>,

    pub tipping: Option<Tipping>,
}

impl Verdict {
    pub fn is_empty(&self) -> bool {
        self.recommended.is_empty() && self.disqualified.is_empty()
    }

    /// The best-ranked recommended entry. On equal scores a Pareto front
    /// member is ranked ahead, so this is the region named by
    /// [`Tipping::top`] whenever a tipping point exists.
    pub fn top(&self) -> Option<&JudgeEntry> {
        self.recommended.first()
    }
}

/// Runs the whole decision pipeline over `entries`.
///
/// 1. Each entry is checked against the hard limits in `config`. Entries
///    failing any of them are disqualified, with every failure as a reason.
/// 2. The recommended entries are reduced to their Pareto front, minimising
///    commute and walk while maximising lines.
/// 3. Every recommended entry is scored against the front's ranges using the
///    configured weights, and ranked ascending.
/// 4. The two best-ranked entries on the front give the tipping point.
///
/// No entries give an empty verdict.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
pub fn judge(entries: Vec<JudgeEntry>, config: &DecisionConfig) -> Verdict {
    if entries.is_empty() {
        debug!("Nothing to judge");
        return Verdict::default();
    }

    let (recommended, disqualified): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .map(|mut entry| {
            entry.evaluate(config);
            entry
        })
        .partition(JudgeEntry::is_recommended);

    let front = front_indices(&recommended, &MINIMIZE, &MAXIMIZE);
    let scorer = Scorer::from_pool(front.iter().map(|index| &recommended[*index]), config.weights());

    let mut on_front = vec![false; recommended.len()];
    for index in front {
        on_front[index] = true;
    }

    // Membership travels with the entry through the sort, so regions sharing
    // an id are told apart.
    let (on_front, recommended): (Vec<_>, Vec<_>) = on_front
        .into_iter()
        .zip(recommended)
        .map(|(front, mut entry)| {
            entry.score = Some(scorer.score(&entry.metrics));
            (front, entry)
        })
        .sorted_by(|(a_front, a), (b_front, b)| by_score(a, b, *a_front, *b_front))
        .unzip();

    let ranked_front = recommended
        .iter()
        .zip(&on_front)
        .filter_map(|(entry, front)| front.then_some(entry))
        .collect::<Vec<_>>();

    let tipping = match ranked_front.as_slice() {
        [top, runner_up, ..] => compute_tipping(top, runner_up, &scorer),
        _ => None,
    };

    let pareto = ranked_front.iter().map(|entry| entry.region.clone()).collect();

    let disqualified = disqualified
        .into_iter()
        .map(|entry| (severity(&entry.metrics, config), entry))
        .sorted_by(|(a, a_entry), (b, b_entry)| {
            by_severity(*a, *b).then_with(|| a_entry.region.cmp(&b_entry.region))
        })
        .map(|(_, entry)| entry)
        .collect::<Vec<_>>();

    info!(
        "Judged {} regions: {} recommended ({} on the front), {} disqualified",
        recommended.len() + disqualified.len(),
        recommended.len(),
        ranked_front.len(),
        disqualified.len()
    );

    Verdict {
        recommended,
        disqualified,
        pareto,
        tipping,
    }
}

/// Ascending score. On equal scores, front members come first, then region
/// id decides.
fn by_score(a: &JudgeEntry, b: &JudgeEntry, a_front: bool, b_front: bool) -> Ordering {
    let score = |entry: &JudgeEntry| entry.score.unwrap_or(f64::INFINITY);
    score(a)
        .total_cmp(&score(b))
        .then_with(|| b_front.cmp(&a_front))
        .then_with(|| a.region.cmp(&b.region))
}

/// Ascending, with unknown severity after every known one.
fn by_severity(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
