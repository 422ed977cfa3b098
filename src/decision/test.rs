use crate::decision::*;
use crate::graph::{GraphBuilder, Route, Stop};
use crate::matrix::{build_matrix, Region, RegionId, RegionMatrix};

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn entry(id: &str, commute: f64, walk: f64, lines: usize) -> JudgeEntry {
    JudgeEntry::new(id, Metrics::new(Some(commute), Some(walk), lines))
}

fn ids(entries: &[JudgeEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.region.0.as_str()).collect()
}

fn worsened(metrics: &Metrics, metric: Metric, delta: f64) -> Metrics {
    let mut metrics = *metrics;
    match metric {
        Metric::Commute => metrics.commute = metrics.commute.map(|v| metric.worsen(v, delta)),
        Metric::Walk => metrics.walk = metrics.walk.map(|v| metric.worsen(v, delta)),
        Metric::Lines => metrics.lines = metric.worsen(metrics.lines as f64, delta).round() as usize,
    }
    metrics
}

#[test]
fn every_failed_threshold_is_reported() {
    let config = DecisionConfig {
        max_commute_minutes: 45.0,
        max_walk_minutes: 10.0,
        min_line_count: 2,
        ..DecisionConfig::default()
    };

    let reasons = evaluate_thresholds(&Metrics::new(Some(60.0), Some(12.0), 1), &config);

    assert_eq!(reasons.len(), 3);
    assert_eq!(
        reasons.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "commute 60 min exceeds max 45 min",
            "walk 12 min exceeds max 10 min",
            "1 lines nearby, below min 2",
        ]
    );
}

#[test]
fn limits_are_inclusive() {
    let reasons = evaluate_thresholds(
        &Metrics::new(Some(45.0), Some(10.0), 2),
        &DecisionConfig::default(),
    );
    assert!(reasons.is_empty());
}

#[test]
fn missing_data_is_insufficient_evidence() {
    let reasons = evaluate_thresholds(
        &Metrics::new(None, Some(f64::NAN), 3),
        &DecisionConfig::default(),
    );

    assert_eq!(reasons.as_slice(), &[Reason::MissingCommute, Reason::MissingWalk]);
    assert!(reasons.iter().all(Reason::is_insufficient_evidence));
    assert!(reasons[0].to_string().starts_with("insufficient evidence"));
}

#[test]
fn over_limit_commute_is_never_recommended() {
    let entries = vec![
        entry("over", 50.0, 1.0, 9),
        entry("within", 30.0, 5.0, 2),
    ];

    let verdict = judge(entries, &DecisionConfig::default());

    assert_eq!(ids(&verdict.recommended), vec!["within"]);
    assert_eq!(verdict.pareto, vec![RegionId::from("within")]);

    let over = &verdict.disqualified[0];
    assert_eq!(over.region.0, "over");
    assert_eq!(over.score, None);

    let reason = over.reasons()[0].to_string();
    assert!(reason.contains("50"));
    assert!(reason.contains("45"));
}

#[test]
fn shorter_commute_scores_lower() {
    let quick = entry("quick", 10.0, 5.0, 3);
    let slow = entry("slow", 20.0, 5.0, 3);

    let scorer = Scorer::from_pool([&quick, &slow], WeightProfile::Balanced.weights());
    assert!(scorer.score(&quick.metrics) < scorer.score(&slow.metrics));

    let verdict = judge(vec![slow, quick], &DecisionConfig::default());
    assert_eq!(ids(&verdict.recommended), vec!["quick", "slow"]);
    assert!(verdict.recommended[0].score < verdict.recommended[1].score);

    // The slower region is dominated, so it drops off the front.
    assert_eq!(verdict.pareto, vec![RegionId::from("quick")]);
}

#[test]
fn zero_width_range_divides_by_one() {
    let a = entry("a", 20.0, 5.0, 3);
    let b = entry("b", 20.0, 5.0, 3);
    let scorer = Scorer::from_pool([&a, &b], Weights::new(0.5, 0.3, 0.2));

    assert_eq!(scorer.span(Metric::Commute), 1.0);
    assert_relative_eq!(scorer.score(&a.metrics), 0.2);
    assert!(scorer.score(&b.metrics).is_finite());
}

#[test]
fn pareto_front_drops_dominated_and_disqualified() {
    let config = DecisionConfig::default();
    let mut candidates = vec![
        entry("fast", 10.0, 8.0, 2),
        entry("walkable", 30.0, 2.0, 2),
        entry("connected", 30.0, 8.0, 6),
        entry("dominated", 30.0, 8.0, 2),
        entry("twin", 10.0, 8.0, 2),
        entry("failing", 5.0, 1.0, 0),
    ];
    for candidate in candidates.iter_mut() {
        candidate.evaluate(&config);
    }

    let front = pareto_front(&candidates, &[Metric::Commute, Metric::Walk], &[Metric::Lines]);
    let front = front.iter().map(|entry| entry.region.0.as_str()).collect::<Vec<_>>();

    assert_eq!(front, vec!["fast", "walkable", "connected", "twin"]);
}

#[test]
fn pareto_front_output_is_mutually_undominated() {
    let mut rng = StdRng::seed_from_u64(0x2545_f491);

    let config = DecisionConfig::default();
    let candidates = (0..60)
        .map(|i| {
            let mut candidate = entry(
                &format!("r{i}"),
                rng.random_range(0..40) as f64,
                rng.random_range(0..10) as f64,
                rng.random_range(2..7usize),
            );
            candidate.evaluate(&config);
            candidate
        })
        .collect::<Vec<_>>();

    let front = pareto_front(&candidates, &[Metric::Commute, Metric::Walk], &[Metric::Lines]);
    assert!(!front.is_empty());

    let at_least_as_good = |a: &Metrics, b: &Metrics| {
        a.commute <= b.commute && a.walk <= b.walk && a.lines >= b.lines
    };
    let dominates = |a: &Metrics, b: &Metrics| at_least_as_good(a, b) && a != b;

    for kept in &front {
        assert!(
            !front.iter().any(|other| dominates(&other.metrics, &kept.metrics)),
            "{} is dominated on the front",
            kept.region
        );
    }

    for dropped in candidates
        .iter()
        .filter(|c| !front.iter().any(|kept| kept.region == c.region))
    {
        assert!(front.iter().any(|kept| dominates(&kept.metrics, &dropped.metrics)));
    }
}

#[test]
fn unevaluated_entries_stay_off_the_front() {
    let mut candidates = vec![entry("over", 50.0, 2.0, 4), entry("ok", 40.0, 3.0, 2)];

    assert!(candidates.iter().all(|c| !c.is_evaluated()));
    assert!(candidates.iter().all(|c| !c.is_recommended() && !c.is_disqualified()));
    assert!(candidates[0].reasons().is_empty());
    assert!(pareto_front(&candidates, &[Metric::Commute, Metric::Walk], &[Metric::Lines]).is_empty());

    let config = DecisionConfig::default();
    for candidate in candidates.iter_mut() {
        candidate.evaluate(&config);
    }

    assert!(candidates[0].is_disqualified());
    assert!(candidates[1].is_recommended());

    let front = pareto_front(&candidates, &[Metric::Commute, Metric::Walk], &[Metric::Lines]);
    assert_eq!(front.len(), 1);
    assert_eq!(front[0].region.0, "ok");
}

#[test]
fn evaluating_again_clears_a_stale_score() {
    let mut candidate = JudgeEntry {
        score: Some(0.3),
        ..entry("r", 20.0, 4.0, 3)
    };

    candidate.evaluate(&DecisionConfig::default());
    assert!(candidate.is_recommended());
    assert_eq!(candidate.score, None);

    let strict = DecisionConfig {
        max_commute_minutes: 15.0,
        ..DecisionConfig::default()
    };
    candidate.evaluate(&strict);
    assert!(candidate.is_disqualified());
    assert_eq!(candidate.reasons().len(), 1);
}

#[test]
fn shared_region_ids_keep_front_membership_apart() {
    let verdict = judge(
        vec![entry("twin", 30.0, 8.0, 2), entry("twin", 10.0, 2.0, 4)],
        &DecisionConfig::default(),
    );

    assert_eq!(verdict.recommended.len(), 2);
    assert_eq!(verdict.pareto, vec![RegionId::from("twin")]);
    assert!(verdict.tipping.is_none());
    assert_eq!(verdict.recommended[0].metrics.commute, Some(10.0));
}

#[test]
fn front_member_wins_a_score_tie() {
    let config = DecisionConfig::default().with_custom_weights(Weights::new(1.0, 0.0, 0.0));

    // Same commute, so the scores tie. The dominated region sorts first by id.
    let verdict = judge(
        vec![entry("z-front", 20.0, 2.0, 3), entry("a-dominated", 20.0, 5.0, 3)],
        &config,
    );

    let [first, second] = verdict.recommended.as_slice() else {
        panic!("both regions pass the default limits");
    };
    assert_eq!(first.score, second.score);

    let top = verdict.top().expect("one region is recommended");
    assert_eq!(top.region.0, "z-front");
    assert_eq!(verdict.pareto, vec![top.region.clone()]);
}

#[test]
fn top_matches_tipping_when_scores_tie_off_the_front() {
    let config = DecisionConfig::default().with_custom_weights(Weights::new(1.0, 0.0, 0.0));

    let verdict = judge(
        vec![
            entry("b-front", 20.0, 2.0, 3),
            entry("a-dominated", 20.0, 5.0, 3),
            entry("c-front", 30.0, 1.0, 3),
        ],
        &config,
    );

    let tipping = verdict.tipping.as_ref().expect("b-front is strictly ahead of c-front");
    let top = verdict.top().expect("regions are recommended");
    assert_eq!(top.region, tipping.top);
    assert_eq!(tipping.runner_up.0, "c-front");
    assert_eq!(verdict.pareto[0], top.region);
}

#[test]
fn tipping_delta_closes_the_gap() {
    let weights = Weights::new(0.6, 0.2, 0.2);
    let config = DecisionConfig::default().with_custom_weights(weights);

    // Neither dominates the other: `top` is quicker, `runner` walks less and
    // has more lines.
    let verdict = judge(
        vec![entry("runner", 30.0, 2.0, 5), entry("top", 20.0, 4.0, 4)],
        &config,
    );

    assert_eq!(ids(&verdict.recommended), vec!["top", "runner"]);
    assert_eq!(verdict.pareto.len(), 2);

    let top = &verdict.recommended[0];
    let runner = &verdict.recommended[1];
    assert_relative_eq!(top.score.unwrap(), 0.4, epsilon = 1e-9);
    assert_relative_eq!(runner.score.unwrap(), 0.6, epsilon = 1e-9);

    let tipping = verdict.tipping.as_ref().expect("top is strictly ahead");
    assert_eq!(tipping.top.0, "top");
    assert_eq!(tipping.runner_up.0, "runner");
    assert_relative_eq!(tipping.gap, 0.2, epsilon = 1e-9);
    assert_relative_eq!(tipping.deltas[&Metric::Commute], 10.0 / 3.0, epsilon = 1e-9);
    assert_relative_eq!(tipping.deltas[&Metric::Walk], 2.0, epsilon = 1e-9);
    assert_relative_eq!(tipping.deltas[&Metric::Lines], 1.0, epsilon = 1e-9);

    let pool = verdict.recommended.iter().collect::<Vec<_>>();
    let scorer = Scorer::from_pool(pool, weights);
    for (metric, delta) in &tipping.deltas {
        assert!(*delta > 0.0);

        let flipped = scorer.score(&worsened(&top.metrics, *metric, *delta));
        assert_relative_eq!(flipped, runner.score.unwrap(), epsilon = 1e-9);
    }
}

#[test]
fn no_tipping_without_a_strict_lead() {
    let mut a = entry("a", 20.0, 4.0, 2);
    let mut b = entry("b", 30.0, 2.0, 3);
    let scorer = Scorer::from_pool([&a, &b], Weights::default());

    assert!(compute_tipping(&a, &b, &scorer).is_none());

    a.score = Some(0.5);
    b.score = Some(0.5);
    assert!(compute_tipping(&a, &b, &scorer).is_none());

    b.score = Some(0.3);
    assert!(compute_tipping(&a, &b, &scorer).is_none());
    assert!(compute_tipping(&b, &a, &scorer).is_some());
}

#[test]
fn zero_weight_metrics_have_no_delta() {
    let a = JudgeEntry {
        score: Some(0.1),
        ..entry("a", 20.0, 4.0, 2)
    };
    let b = JudgeEntry {
        score: Some(0.4),
        ..entry("b", 30.0, 2.0, 3)
    };
    let scorer = Scorer::from_pool([&a, &b], Weights::new(1.0, 0.0, 0.0));

    let tipping = compute_tipping(&a, &b, &scorer).expect("a is ahead");
    assert_eq!(tipping.deltas.keys().copied().collect::<Vec<_>>(), vec![Metric::Commute]);
}

#[test_log::test]
fn disqualified_are_ordered_by_severity() {
    let entries = vec![
        JudgeEntry::new("unknown", Metrics::new(None, Some(2.0), 3)),
        entry("far", 50.0, 5.0, 2),
        entry("lineless", 40.0, 5.0, 0),
        entry("close", 46.0, 12.0, 2),
    ];

    let verdict = judge(entries, &DecisionConfig::default());

    assert!(verdict.recommended.is_empty());
    assert!(verdict.pareto.is_empty());
    assert!(verdict.tipping.is_none());

    // close: 1 + 1.5 * 2 = 4, far: 5, lineless: 5 * 2 = 10, unknown: last.
    assert_eq!(ids(&verdict.disqualified), vec!["close", "far", "lineless", "unknown"]);
    assert_relative_eq!(
        severity(&verdict.disqualified[0].metrics, &DecisionConfig::default()).unwrap(),
        4.0
    );
}

#[test]
fn empty_input_gives_empty_verdict() {
    let verdict = judge(Vec::new(), &DecisionConfig::default());
    assert!(verdict.is_empty());
    assert_eq!(verdict, Verdict::default());
}

#[test]
fn weight_profiles_parse_from_names() {
    assert_eq!("commute_first".parse::<WeightProfile>(), Ok(WeightProfile::CommuteFirst));
    assert_eq!(WeightProfile::Connected.to_string(), "connected");
    assert_eq!(WeightProfile::Walkable.weights(), Weights::new(0.3, 0.6, 0.1));
    assert!("fastest".parse::<WeightProfile>().is_err());

    let custom = DecisionConfig::default().with_custom_weights(Weights::new(1.0, 0.0, 0.0));
    assert_eq!(custom.profile, WeightProfile::Custom);
    assert_eq!(custom.weights(), Weights::new(1.0, 0.0, 0.0));

    let unset = DecisionConfig {
        profile: WeightProfile::Custom,
        ..DecisionConfig::default()
    };
    assert_eq!(unset.weights(), WeightProfile::Balanced.weights());
}

#[test]
fn config_reads_json_with_defaults() {
    let config = DecisionConfig::from_json(
        r#"{
            "min_line_count": 3,
            "profile": "custom",
            "custom_weights": { "commute": 0.6, "walk": 0.4, "lines": 0.0 },
            "severity": { "walk": 2.0 }
        }"#,
    )
    .expect("valid config");

    assert_eq!(config.max_commute_minutes, 45.0);
    assert_eq!(config.min_line_count, 3);
    assert_eq!(config.weights(), Weights::new(0.6, 0.4, 0.0));
    assert_eq!(config.severity.walk, 2.0);
    assert_eq!(config.severity.missing_line, SeverityWeights::MISSING_LINE);

    assert!(matches!(
        DecisionConfig::from_json(r#"{ "profile": "fastest" }"#),
        Err(crate::Error::Json(_))
    ));
}

fn hub_matrix() -> (crate::graph::TransitGraph, Vec<Region>, RegionMatrix) {
    let mut builder = GraphBuilder::default();
    let h = builder.add_stop(Stop::at("H", 40.75, -73.98));
    let a = builder.add_stop(Stop::at("A", 40.80, -73.98));
    let b = builder.add_stop(Stop::at("B", 40.60, -73.90));
    let one = builder.add_route(Route::new("1"));
    let two = builder.add_route(Route::new("2"));

    builder.add_leg(a, h, 10, Some(one)).unwrap();
    builder.add_leg(h, a, 10, Some(two)).unwrap();

    let regions = vec![
        Region::new("rh", "Hub").with_stop(h).with_walk_minutes(3.0),
        Region::new("ra", "North").with_stop(a).with_walk_minutes(6.0),
        Region::new("rb", "Island").with_stop(b),
        Region::new("rx", "Nowhere"),
    ];

    let graph = builder.build();
    let matrix = build_matrix(&graph, &regions);
    (graph, regions, matrix)
}

#[test]
fn entries_collect_metrics_against_the_hub() {
    let (graph, regions, matrix) = hub_matrix();
    let entries = collect_entries(&graph, &regions, &matrix, 0);

    assert_eq!(ids(&entries), vec!["rh", "ra", "rb"]);
    assert_eq!(entries[0].metrics, Metrics::new(Some(0.0), Some(3.0), 2));
    assert_eq!(entries[1].metrics, Metrics::new(Some(10.0), Some(6.0), 2));
    assert_eq!(entries[2].metrics, Metrics::new(None, None, 0));

    let verdict = judge(entries, &DecisionConfig::default());
    assert_eq!(ids(&verdict.recommended), vec!["rh", "ra"]);
    assert_eq!(ids(&verdict.disqualified), vec!["rb"]);
    assert_eq!(verdict.disqualified[0].reasons().len(), 3);
}

#[test]
fn unresolvable_hub_or_empty_matrix_gives_nothing() {
    let (graph, regions, matrix) = hub_matrix();
    assert!(collect_entries(&graph, &regions, &matrix, 7).is_empty());

    let empty = RegionMatrix::default();
    let entries = collect_entries(&graph, &regions, &empty, 0);
    assert!(entries.is_empty());
    assert!(judge(entries, &DecisionConfig::default()).is_empty());
}
