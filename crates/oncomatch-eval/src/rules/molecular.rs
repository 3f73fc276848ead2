//! Molecular criteria backed by the gene driver-likelihood model.

use oncomatch_common::{GeneRole, PatientRecord, ProteinEffect, Result, Variant};
use oncomatch_molecular::GeneDriverLikelihoodModel;
use tracing::debug;

use crate::evaluation::Evaluation;
use crate::factory;
use crate::function::EvaluationContext;
use crate::message::EvaluationMessage;
use crate::rules::LeafRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alteration {
    Activation,
    Inactivation,
}

impl Alteration {
    fn supports(self, role: GeneRole) -> bool {
        match self {
            Alteration::Activation => matches!(role, GeneRole::Onco | GeneRole::Both),
            Alteration::Inactivation => matches!(role, GeneRole::Tsg | GeneRole::Both),
        }
    }

    /// Variants whose established effect points the other way.
    fn contradicts(self, effect: ProteinEffect) -> bool {
        match self {
            Alteration::Activation => effect.is_loss_of_function(),
            Alteration::Inactivation => effect.is_gain_of_function(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Alteration::Activation => "activating mutation",
            Alteration::Inactivation => "inactivation",
        }
    }
}

#[derive(Debug)]
pub struct GeneIsAltered {
    pub gene: String,
    pub alteration: Alteration,
}

impl LeafRule for GeneIsAltered {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let noun = self.alteration.noun();
        let Some(molecular) = &record.molecular else {
            return Ok(factory::undetermined(EvaluationMessage::itemized(
                format!("No molecular results to determine {noun} of {{}}"),
                [self.gene.as_str()],
            ))
            .with_missing_molecular_result());
        };

        let variants: Vec<&Variant> = molecular
            .variants_in_gene(&self.gene)
            .filter(|v| v.is_reportable && !self.alteration.contradicts(v.protein_effect))
            .collect();
        let Some(first) = variants.first() else {
            return Ok(factory::fail(EvaluationMessage::itemized(format!("No {noun} of {{}}"), [self.gene.as_str()])));
        };
        let events: Vec<String> = variants.iter().map(|v| v.event.clone()).collect();

        let role = first.gene_role;
        if !self.alteration.supports(role) {
            return Ok(factory::warn(EvaluationMessage::itemized(
                format!("Variants in {{}} but gene role {} is not expected for {noun}", role.as_str()),
                [self.gene.as_str()],
            ))
            .with_inclusion_events(events));
        }

        let likelihood = GeneDriverLikelihoodModel::new(ctx.dnds).evaluate(&self.gene, role, variants.iter().copied())?;
        debug!(gene = %self.gene, ?likelihood, "driver likelihood");

        let evaluation = match likelihood.map(|l| l.likelihood) {
            Some(l) if l >= ctx.driver_likelihood_high => {
                factory::pass(EvaluationMessage::itemized(format!("Driver {noun} of {{}}"), [self.gene.as_str()]))
                    .with_inclusion_events(events)
            }
            Some(l) if l >= ctx.driver_likelihood_low => factory::warn(EvaluationMessage::itemized(
                format!("Potential {noun} of {{}} of uncertain driver status"),
                [self.gene.as_str()],
            ))
            .with_inclusion_events(events),
            _ => factory::fail(EvaluationMessage::itemized(
                format!("Variants in {{}} unlikely to be a driver {noun}"),
                [self.gene.as_str()],
            )),
        };
        Ok(evaluation)
    }
}

#[derive(Debug)]
pub struct TmbOfAtLeast {
    pub min_tmb: f64,
}

impl LeafRule for TmbOfAtLeast {
    fn evaluate(&self, _ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        let tmb = record.molecular.as_ref().and_then(|m| m.tumor_mutational_burden);
        let evaluation = match tmb {
            None => factory::undetermined("Tumor mutational burden unknown").with_missing_molecular_result(),
            Some(tmb) if tmb >= self.min_tmb => {
                factory::pass(format!("TMB of {tmb} mut/Mb is at least {}", self.min_tmb))
                    .with_inclusion_events([format!("TMB >= {}", self.min_tmb)])
            }
            Some(tmb) => factory::fail(format!("TMB of {tmb} mut/Mb is below {}", self.min_tmb)),
        };
        Ok(evaluation)
    }
}
