//! Aggregate scored evidence into a ranked treatment list.
//!
//! Within a treatment, items are grouped by (direction, event). The i-th item
//! of a group (sorted by score, 0-based) contributes `score × factor^i`, so
//! repeated support for one event saturates while distinct events add up in
//! full. Benefit and resistance are summed separately and netted.

use std::collections::{BTreeMap, BTreeSet};

use oncomatch_common::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::evidence::{Direction, TreatmentEvidence};
use crate::scorer::EvidenceScoringModel;
use crate::weights::ScoringWeights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTreatment {
    pub treatment: String,
    /// Benefit minus resistance.
    pub score: f64,
    pub benefit_score: f64,
    pub resistance_score: f64,
    pub events: BTreeSet<String>,
    pub evidence_count: usize,
}

#[derive(Debug, Clone)]
pub struct TreatmentRanker {
    model: EvidenceScoringModel,
}

#[derive(Default)]
struct TreatmentAccumulator<'a> {
    groups: BTreeMap<(Direction, &'a str), Vec<f64>>,
    evidence_count: usize,
}

impl TreatmentRanker {
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        Ok(Self { model: EvidenceScoringModel::new(weights)? })
    }

    pub fn rank(&self, evidence: &[TreatmentEvidence]) -> Vec<RankedTreatment> {
        let mut by_treatment: BTreeMap<&str, TreatmentAccumulator<'_>> = BTreeMap::new();
        for item in evidence {
            let acc = by_treatment.entry(item.treatment.as_str()).or_default();
            acc.groups
                .entry((item.direction, item.event.as_str()))
                .or_default()
                .push(self.model.score(item));
            acc.evidence_count += 1;
        }

        let factor = self.model.weights().diminishing_factor;
        let mut ranked: Vec<RankedTreatment> = by_treatment
            .into_iter()
            .map(|(treatment, acc)| {
                let mut benefit_score = 0.0;
                let mut resistance_score = 0.0;
                let mut events = BTreeSet::new();
                for ((direction, event), scores) in acc.groups {
                    let total = diminishing_sum(scores, factor);
                    match direction {
                        Direction::Benefit => benefit_score += total,
                        Direction::Resistance => resistance_score += total,
                    }
                    events.insert(event.to_string());
                }
                debug!(treatment, benefit_score, resistance_score, "aggregated treatment evidence");
                RankedTreatment {
                    treatment: treatment.to_string(),
                    score: benefit_score - resistance_score,
                    benefit_score,
                    resistance_score,
                    events,
                    evidence_count: acc.evidence_count,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.treatment.cmp(&b.treatment)));
        info!("Ranked {} treatments from {} evidence items", ranked.len(), evidence.len());
        ranked
    }
}

fn diminishing_sum(mut scores: Vec<f64>, factor: f64) -> f64 {
    scores.sort_by(|a, b| b.total_cmp(a));
    scores
        .iter()
        .zip(std::iter::successors(Some(1.0), |w| Some(w * factor)))
        .map(|(score, weight)| score * weight)
        .sum()
}
