//! Scoring weights for evidence items.

use oncomatch_common::{OncomatchError, Result};
use serde::{Deserialize, Serialize};

use crate::evidence::{ApprovalTier, TumorMatch, VariantMatch};

/// Points per approval tier and multiplicative factors for the other axes.
/// Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub guideline: f64,
    pub approved: f64,
    pub phase_iii: f64,
    pub phase_ii: f64,
    pub phase_i: f64,
    pub case_report: f64,
    pub preclinical: f64,

    pub specific_type: f64,
    pub all_types: f64,
    pub other_type: f64,

    pub exact_variant: f64,
    pub functional_effect: f64,
    pub variant_category: f64,

    pub certain: f64,
    pub uncertain: f64,

    /// Multiplier applied to each further item supporting the same event.
    pub diminishing_factor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            guideline:         20.0,
            approved:          18.0,
            phase_iii:         15.0,
            phase_ii:          10.0,
            phase_i:            5.0,
            case_report:        2.0,
            preclinical:        1.0,

            specific_type:      1.0,
            all_types:          0.8,
            other_type:         0.4,

            exact_variant:      1.0,
            functional_effect:  0.7,
            variant_category:   0.4,

            certain:            1.0,
            uncertain:          0.5,

            diminishing_factor: 0.5,
        }
    }
}

impl ScoringWeights {
    pub fn tier_points(&self, tier: ApprovalTier) -> f64 {
        match tier {
            ApprovalTier::Guideline => self.guideline,
            ApprovalTier::Approved => self.approved,
            ApprovalTier::PhaseIii => self.phase_iii,
            ApprovalTier::PhaseIi => self.phase_ii,
            ApprovalTier::PhaseI => self.phase_i,
            ApprovalTier::CaseReport => self.case_report,
            ApprovalTier::Preclinical => self.preclinical,
        }
    }

    pub fn tumor_factor(&self, tumor_match: TumorMatch) -> f64 {
        match tumor_match {
            TumorMatch::SpecificType => self.specific_type,
            TumorMatch::AllTypes => self.all_types,
            TumorMatch::OtherType => self.other_type,
        }
    }

    pub fn variant_factor(&self, variant_match: VariantMatch) -> f64 {
        match variant_match {
            VariantMatch::Exact => self.exact_variant,
            VariantMatch::FunctionalEffect => self.functional_effect,
            VariantMatch::Category => self.variant_category,
        }
    }

    pub fn certainty_factor(&self, certain: bool) -> f64 {
        if certain { self.certain } else { self.uncertain }
    }

    fn named(&self) -> [(&'static str, f64); 15] {
        [
            ("guideline", self.guideline),
            ("approved", self.approved),
            ("phase_iii", self.phase_iii),
            ("phase_ii", self.phase_ii),
            ("phase_i", self.phase_i),
            ("case_report", self.case_report),
            ("preclinical", self.preclinical),
            ("specific_type", self.specific_type),
            ("all_types", self.all_types),
            ("other_type", self.other_type),
            ("exact_variant", self.exact_variant),
            ("functional_effect", self.functional_effect),
            ("variant_category", self.variant_category),
            ("certain", self.certain),
            ("uncertain", self.uncertain),
        ]
    }

    /// Every weight strictly positive and finite; diminishing factor in (0, 1).
    pub fn validate(&self) -> Result<()> {
        if let Some((name, value)) = self.named().into_iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(OncomatchError::Config(format!(
                "scoring weight {name} must be positive, got {value}"
            )));
        }
        if !(self.diminishing_factor > 0.0 && self.diminishing_factor < 1.0) {
            return Err(OncomatchError::Config(format!(
                "diminishing_factor must be in (0, 1), got {}",
                self.diminishing_factor
            )));
        }
        Ok(())
    }
}
