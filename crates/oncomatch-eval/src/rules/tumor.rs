use oncomatch_common::{PatientRecord, Result};

use crate::evaluation::Evaluation;
use crate::factory;
use crate::function::EvaluationContext;
use crate::rules::LeafRule;

#[derive(Debug)]
pub struct HasKnownActiveCnsMetastases;

impl LeafRule for HasKnownActiveCnsMetastases {
    fn evaluate(&self, _ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let evaluation = match record.tumor.has_active_cns_lesions {
            Some(true) => factory::pass("Patient has active CNS metastases"),
            Some(false) => factory::fail("No known active CNS metastases"),
            None => factory::undetermined("Presence of active CNS metastases unknown"),
        };
        Ok(evaluation)
    }
}

/// Case-insensitive substring match on the curated primary tumor type.
#[derive(Debug)]
pub struct HasPrimaryTumorType {
    pub tumor_type: String,
}

impl LeafRule for HasPrimaryTumorType {
    fn evaluate(&self, _ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let evaluation = match &record.tumor.primary_tumor_type {
            None => factory::undetermined(format!("Primary tumor type unknown; cannot determine {}", self.tumor_type)),
            Some(actual) if actual.to_lowercase().contains(&self.tumor_type.to_lowercase()) => {
                factory::pass(format!("Primary tumor type {actual} matches {}", self.tumor_type))
            }
            Some(actual) => factory::fail(format!("Primary tumor type {actual} does not match {}", self.tumor_type)),
        };
        Ok(evaluation)
    }
}
