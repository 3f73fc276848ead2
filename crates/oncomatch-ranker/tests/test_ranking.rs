use oncomatch_ranker::{
    ApprovalTier, Direction, ScoringWeights, TreatmentEvidence, TreatmentRanker, TumorMatch, VariantMatch,
};
use oncomatch_test_utils::{assert_eq, from_json};

fn approved(treatment: &str, event: &str) -> TreatmentEvidence {
    TreatmentEvidence {
        treatment: treatment.to_string(),
        event: event.to_string(),
        tier: ApprovalTier::Approved,
        direction: Direction::Benefit,
        certain: true,
        tumor_match: TumorMatch::SpecificType,
        variant_match: VariantMatch::Exact,
        driver_likelihood: None,
    }
}

fn ranker() -> TreatmentRanker {
    TreatmentRanker::new(ScoringWeights::default()).unwrap()
}

#[test]
fn test_distinct_events_sum_without_penalty() {
    let ranked = ranker().rank(&[approved("Osimertinib", "EGFR L858R"), approved("Osimertinib", "EGFR T790M")]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].score, 36.0);
    assert_eq!(ranked[0].events.len(), 2);
}

#[test]
fn test_same_event_has_diminishing_returns() {
    let single = ranker().rank(&[approved("Osimertinib", "EGFR L858R")])[0].score;
    let doubled = ranker().rank(&[approved("Osimertinib", "EGFR L858R"), approved("Osimertinib", "EGFR L858R")])[0].score;
    assert!(doubled > single);
    assert!(doubled < 2.0 * single);
    assert_eq!(doubled, 27.0);
}

#[test]
fn test_resistance_is_netted_against_benefit() {
    let resistance = TreatmentEvidence {
        direction: Direction::Resistance,
        tier: ApprovalTier::PhaseIi,
        ..approved("Cetuximab", "KRAS G12D")
    };
    let ranked = ranker().rank(&[approved("Cetuximab", "EGFR amp"), resistance]);
    assert_eq!(ranked[0].benefit_score, 18.0);
    assert_eq!(ranked[0].resistance_score, 10.0);
    assert_eq!(ranked[0].score, 8.0);
}

#[test]
fn test_sorted_descending_with_name_tie_break() {
    let evidence = [
        approved("Zeta", "BRAF V600E"),
        TreatmentEvidence { tier: ApprovalTier::Preclinical, ..approved("Alpha", "BRAF V600E") },
        approved("Beta", "BRAF V600E"),
        TreatmentEvidence { direction: Direction::Resistance, ..approved("Gamma", "BRAF V600E") },
    ];
    let names: Vec<String> = ranker().rank(&evidence).into_iter().map(|r| r.treatment).collect();
    assert_eq!(names, vec!["Beta", "Zeta", "Alpha", "Gamma"]);
}

#[test]
fn test_evidence_deserialises_with_defaults() {
    let item: TreatmentEvidence = from_json(
        r#"{"treatment": "Dabrafenib", "event": "BRAF V600E", "tier": "PHASE_III", "direction": "BENEFIT",
            "tumor_match": "ALL_TYPES", "variant_match": "CATEGORY"}"#,
    );
    assert!(item.certain);
    assert_eq!(item.tier, ApprovalTier::PhaseIii);
    assert_eq!(item.driver_likelihood, None);
}

#[test]
fn test_empty_evidence_ranks_nothing() {
    assert!(ranker().rank(&[]).is_empty());
}
