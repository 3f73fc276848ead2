//! Demographic and performance-status criteria.

use chrono::Datelike;
use oncomatch_common::{PatientRecord, Result};

use crate::evaluation::Evaluation;
use crate::factory;
use crate::function::EvaluationContext;
use crate::rules::LeafRule;

/// Only the birth year is curated, so a patient turning `min_age` during the
/// reference year cannot be decided yet.
#[derive(Debug)]
pub struct IsAtLeastXYearsOld {
    pub min_age: i32,
}

impl LeafRule for IsAtLeastXYearsOld {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let Some(age_this_year) = ctx.reference_date.year().checked_sub(record.birth_year) else {
            return Ok(factory::undetermined(format!("Birth year {} is not plausible", record.birth_year)));
        };
        let evaluation = if age_this_year > self.min_age {
            factory::pass(format!("Patient is at least {} years old", self.min_age))
        } else if age_this_year == self.min_age {
            factory::recoverable_undetermined(format!(
                "Patient turns {} in {}; unclear whether already at least {} years old",
                self.min_age,
                ctx.reference_date.year(),
                self.min_age
            ))
        } else {
            factory::fail(format!("Patient is younger than {} years old", self.min_age))
        };
        Ok(evaluation)
    }
}

#[derive(Debug)]
pub struct HasWhoStatusOfAtMostX {
    pub max_who: u32,
}

impl LeafRule for HasWhoStatusOfAtMostX {
    fn evaluate(&self, _ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let evaluation = match record.who_status {
            None => factory::undetermined("WHO status unknown"),
            Some(who) if who <= self.max_who => {
                factory::pass(format!("WHO status {who} is within requested max (WHO {})", self.max_who))
            }
            Some(who) if who == self.max_who + 1 => factory::recoverable_fail(format!(
                "WHO status {who} exceeds requested max (WHO {}) by one",
                self.max_who
            )),
            Some(who) => factory::fail(format!("WHO status {who} exceeds requested max (WHO {})", self.max_who)),
        };
        Ok(evaluation)
    }
}
