//! Per-item evidence score.
//!
//! score = tier points × tumor factor × variant factor × certainty factor,
//! scaled by the event's driver likelihood when one is known. The sign comes
//! from the evidence direction.

use oncomatch_common::Result;

use crate::evidence::{Direction, TreatmentEvidence};
use crate::weights::ScoringWeights;

#[derive(Debug, Clone)]
pub struct EvidenceScoringModel {
    weights: ScoringWeights,
}

impl EvidenceScoringModel {
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Unsigned strength of one evidence item.
    pub fn score(&self, evidence: &TreatmentEvidence) -> f64 {
        let w = &self.weights;
        let base = w.tier_points(evidence.tier)
            * w.tumor_factor(evidence.tumor_match)
            * w.variant_factor(evidence.variant_match)
            * w.certainty_factor(evidence.certain);

        match evidence.driver_likelihood {
            Some(likelihood) if likelihood.is_finite() => base * likelihood.clamp(0.0, 1.0),
            _ => base,
        }
    }

    /// Positive for benefit, negative for resistance.
    pub fn signed_score(&self, evidence: &TreatmentEvidence) -> f64 {
        match evidence.direction {
            Direction::Benefit => self.score(evidence),
            Direction::Resistance => -self.score(evidence),
        }
    }
}
