use oncomatch_common::{IcdCode, PatientRecord, Result};

use crate::evaluation::Evaluation;
use crate::factory;
use crate::function::EvaluationContext;
use crate::icd::find_instances_matching_any_icd_code;
use crate::message::EvaluationMessage;
use crate::rules::LeafRule;

#[derive(Debug)]
pub struct HasHistoryOfConditionWithIcdCode {
    pub target: IcdCode,
}

impl LeafRule for HasHistoryOfConditionWithIcdCode {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let matches = find_instances_matching_any_icd_code(
            ctx.icd_model,
            Some(record.comorbidities.as_slice()),
            std::slice::from_ref(&self.target),
        );

        let evaluation = if !matches.full_matches.is_empty() {
            factory::pass(EvaluationMessage::itemized(
                "History of {}",
                matches.full_matches.iter().map(|c| c.name.clone()),
            ))
        } else if !matches.main_code_matches_with_unknown_extension.is_empty() {
            factory::undetermined(EvaluationMessage::itemized(
                format!("History of {{}} but undetermined whether it matches {}", self.target),
                matches.main_code_matches_with_unknown_extension.iter().map(|c| c.name.clone()),
            ))
        } else {
            factory::fail(format!("No history of condition with ICD code {}", self.target))
        };
        Ok(evaluation)
    }
}
