//! Gene driver-likelihood model.
//!
//! Estimates the probability that the variants observed in one gene include a
//! true driver. Variants with an established gain- or loss-of-function effect
//! are drivers by definition. For variants of unknown significance the
//! background statistics in [`DndsDatabase`] are used:
//!
//! - oncogene: best single hit (one activating hit suffices);
//! - tumour suppressor: one hit is used as is; with more hits the two of
//!   highest priority are combined under an independence assumption;
//! - dual role: the higher of the two estimates.

use oncomatch_common::{GeneRole, ProteinEffect, Result, Variant};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dnds::{DndsDatabase, DndsDriverGeneLikelihood, DndsDriverType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneDriverLikelihood {
    pub likelihood: f64,
    pub has_gain_or_loss_of_function: bool,
}

impl GeneDriverLikelihood {
    fn established() -> Self {
        Self { likelihood: 1.0, has_gain_or_loss_of_function: true }
    }

    fn estimated(likelihood: f64) -> Self {
        Self { likelihood, has_gain_or_loss_of_function: false }
    }
}

pub struct GeneDriverLikelihoodModel<'a> {
    dnds: &'a DndsDatabase,
}

impl<'a> GeneDriverLikelihoodModel<'a> {
    pub fn new(dnds: &'a DndsDatabase) -> Self {
        Self { dnds }
    }

    /// Estimate driver likelihood for `gene` given its role and observed variants.
    ///
    /// Returns `Ok(None)` when nothing can be estimated: no variants, an
    /// unknown role, or no qualifying variant with background statistics.
    pub fn evaluate<'v, I>(&self, gene: &str, role: GeneRole, variants: I) -> Result<Option<GeneDriverLikelihood>>
    where
        I: IntoIterator<Item = &'v Variant>,
    {
        let variants: Vec<&Variant> = variants.into_iter().collect();
        if variants.is_empty() {
            return Ok(None);
        }

        if variants.iter().any(|v| v.protein_effect.is_gain_or_loss_of_function()) {
            return Ok(Some(GeneDriverLikelihood::established()));
        }

        let vus: Vec<(DndsDriverType, &Variant)> = variants
            .iter()
            .filter(|v| v.protein_effect == ProteinEffect::Unknown)
            .filter_map(|v| DndsDriverType::classify(v).map(|t| (t, *v)))
            .collect();

        let likelihood = match role {
            GeneRole::Onco => self.onco_likelihood(gene, &vus)?,
            GeneRole::Tsg => self.tsg_likelihood(gene, &vus)?,
            GeneRole::Both => {
                let onco = self.onco_likelihood(gene, &vus)?;
                let tsg = self.tsg_likelihood(gene, &vus)?;
                match (onco, tsg) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                }
            }
            GeneRole::Unknown => None,
        };

        debug!("Driver likelihood for {} ({}): {:?}", gene, role.as_str(), likelihood);
        Ok(likelihood.map(GeneDriverLikelihood::estimated))
    }

    fn onco_likelihood(&self, gene: &str, vus: &[(DndsDriverType, &Variant)]) -> Result<Option<f64>> {
        let mut best: Option<f64> = None;
        for (driver_type, _) in vus {
            if let Some(entry) = self.dnds.find(gene, GeneRole::Onco, *driver_type)? {
                let likelihood = entry.driver_likelihood();
                best = Some(best.map_or(likelihood, |b| b.max(likelihood)));
            }
        }
        Ok(best)
    }

    fn tsg_likelihood(&self, gene: &str, vus: &[(DndsDriverType, &Variant)]) -> Result<Option<f64>> {
        let mut hits: Vec<(DndsDriverType, DndsDriverGeneLikelihood)> = Vec::new();
        for (driver_type, _) in vus {
            if let Some(entry) = self.dnds.find(gene, GeneRole::Tsg, *driver_type)? {
                hits.push((*driver_type, entry));
            }
        }

        match hits.len() {
            0 => Ok(None),
            1 => Ok(Some(hits[0].1.driver_likelihood())),
            _ => {
                hits.sort_by_key(|(driver_type, _)| std::cmp::Reverse(driver_type.priority()));
                let joint = hits[0].1.joint(&hits[1].1);
                Ok(Some(joint.driver_likelihood()))
            }
        }
    }
}
