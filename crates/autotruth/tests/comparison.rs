use autotruth::disclosures::{CompanyRecord, DisclosureInput};
use autotruth::scoring::{Pillar, PillarMap, Standing, TransparencyEngine};
use std::collections::BTreeMap;

fn uniform(name: &str, score: f64) -> DisclosureInput {
    let pillar_scores: BTreeMap<String, f64> = Pillar::ordered()
        .into_iter()
        .map(|pillar| (pillar.key().to_string(), score))
        .collect();

    DisclosureInput {
        name: Some(name.to_string()),
        pillar_scores,
        ..DisclosureInput::default()
    }
}

fn names(report: &autotruth::scoring::ComparisonReport) -> Vec<&str> {
    report
        .entries
        .iter()
        .filter_map(|entry| entry.result.company.as_deref())
        .collect()
}

#[test]
fn ranks_descending_with_leader_watchlist_and_risk() {
    let engine = TransparencyEngine::default();
    let report = engine.compare(&[
        uniform("Middle", 60.0),
        uniform("Bottom", 40.0),
        uniform("Top", 80.0),
    ]);

    assert_eq!(names(&report), vec!["Top", "Middle", "Bottom"]);
    let standings: Vec<Standing> = report.entries.iter().map(|entry| entry.standing).collect();
    assert_eq!(
        standings,
        vec![Standing::Leader, Standing::Watchlist, Standing::Risk]
    );
    let ranks: Vec<usize> = report.entries.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn deltas_are_measured_against_the_leader() {
    let engine = TransparencyEngine::default();
    let report = engine.compare(&[uniform("Top", 80.0), uniform("Bottom", 40.0)]);

    let leader = report.leader().expect("leader present");
    assert_eq!(leader.pillar_deltas, PillarMap::default());

    let trailing = &report.entries[1];
    for (_, delta) in trailing.pillar_deltas.iter() {
        assert!((delta + 40.0).abs() < 1e-9);
    }
    assert!(trailing.risk_probability > leader.risk_probability);
    assert_eq!(trailing.risk_probability, trailing.result.risk.probability);
}

#[test]
fn ties_keep_input_order() {
    let engine = TransparencyEngine::default();
    let report = engine.compare(&[
        uniform("First", 70.0),
        uniform("Second", 70.0),
        uniform("Third", 70.0),
    ]);

    assert_eq!(names(&report), vec!["First", "Second", "Third"]);
}

#[test]
fn single_result_is_the_leader() {
    let engine = TransparencyEngine::default();
    let report = engine.compare(&[uniform("Solo", 55.0)]);

    assert_eq!(report.len(), 1);
    assert_eq!(report.entries[0].standing, Standing::Leader);
    assert_eq!(report.entries[0].standing_label, "Leader");
}

#[test]
fn empty_input_produces_empty_comparison() {
    let report = TransparencyEngine::default().compare(&[]);
    assert!(report.is_empty());
    assert!(report.leader().is_none());
}

#[test]
fn ranking_precomputed_results_matches_compare() {
    let engine = TransparencyEngine::default();
    let inputs = [uniform("A", 30.0), uniform("B", 90.0)];
    let results = inputs.iter().map(|input| engine.analyze(input)).collect();

    let ranked = engine.rank(results);
    let compared = engine.compare(&inputs);
    assert_eq!(names(&ranked), names(&compared));
    assert_eq!(ranked.entries[0].result.lts, compared.entries[0].result.lts);
}

#[test]
fn very_large_finite_scores_still_lead() {
    let engine = TransparencyEngine::default();
    let report = engine.compare(&[uniform("Ordinary", 90.0), uniform("Huge", 1e307)]);

    assert_eq!(names(&report), vec!["Huge", "Ordinary"]);
    assert!(report.entries[0].result.lts.is_finite());
}

#[test]
fn registered_companies_keep_their_id_and_logo() {
    let record = |id: &str, logo: Option<&str>, input: DisclosureInput| CompanyRecord {
        id: id.to_string(),
        logo: logo.map(str::to_string),
        models: Vec::new(),
        disclosure: input,
    };
    let engine = TransparencyEngine::default();
    let report = engine.compare_registered(&[
        record("ember", None, uniform("Ember", 40.0)),
        record("volta", Some("VT"), uniform("Volta", 80.0)),
    ]);

    assert_eq!(report.entries[0].company_id.as_deref(), Some("volta"));
    assert_eq!(report.entries[0].logo.as_deref(), Some("VT"));
    assert_eq!(report.entries[1].company_id.as_deref(), Some("ember"));
    assert_eq!(report.entries[1].logo.as_deref(), Some("E"));

    let plain = engine.compare(&[uniform("Volta", 80.0)]);
    assert!(plain.entries[0].company_id.is_none());
}
