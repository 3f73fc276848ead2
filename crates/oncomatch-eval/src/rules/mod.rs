//! Representative leaf rules and the closed rule id → constructor mapping.

pub mod comorbidity;
pub mod general;
pub mod molecular;
pub mod tumor;

use std::fmt::Debug;

use oncomatch_common::{OncomatchError, PatientRecord, Result};

use crate::evaluation::Evaluation;
use crate::function::EvaluationContext;
use crate::resolver::RuleValue;
use crate::rule::EligibilityRule;

/// A leaf criterion evaluated directly against the patient record.
pub trait LeafRule: Debug + Send + Sync {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation>;
}

/// Build the evaluator for a leaf rule from its type-checked parameter.
pub fn construct(rule: EligibilityRule, value: RuleValue) -> Result<Box<dyn LeafRule>> {
    let evaluator: Box<dyn LeafRule> = match rule {
        EligibilityRule::IsAtLeastXYearsOld => {
            let min_age = i32::try_from(value.into_integer(rule)?)
                .map_err(|_| OncomatchError::invalid_parameters(rule.as_str(), "age out of range"))?;
            Box::new(general::IsAtLeastXYearsOld { min_age })
        }
        EligibilityRule::HasWhoStatusOfAtMostX => {
            let max_who = u32::try_from(value.into_integer(rule)?)
                .map_err(|_| OncomatchError::invalid_parameters(rule.as_str(), "WHO status must be non-negative"))?;
            Box::new(general::HasWhoStatusOfAtMostX { max_who })
        }
        EligibilityRule::HasKnownActiveCnsMetastases => Box::new(tumor::HasKnownActiveCnsMetastases),
        EligibilityRule::HasPrimaryTumorTypeX => Box::new(tumor::HasPrimaryTumorType {
            tumor_type: value.into_text(rule)?,
        }),
        EligibilityRule::HasHistoryOfConditionWithIcdCodeX => Box::new(comorbidity::HasHistoryOfConditionWithIcdCode {
            target: value.into_icd_code(rule)?,
        }),
        EligibilityRule::ActivatingMutationInGeneX => Box::new(molecular::GeneIsAltered {
            gene: value.into_gene(rule)?,
            alteration: molecular::Alteration::Activation,
        }),
        EligibilityRule::InactivationOfGeneX => Box::new(molecular::GeneIsAltered {
            gene: value.into_gene(rule)?,
            alteration: molecular::Alteration::Inactivation,
        }),
        EligibilityRule::TmbOfAtLeastX => Box::new(molecular::TmbOfAtLeast { min_tmb: value.into_double(rule)? }),
        EligibilityRule::And | EligibilityRule::Or | EligibilityRule::Not | EligibilityRule::WarnIf => {
            return Err(OncomatchError::invalid_parameters(
                rule.as_str(),
                "composite rules are resolved from nested functions",
            ));
        }
    };
    Ok(evaluator)
}
