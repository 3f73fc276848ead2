//! Per-gene background mutation statistics (dN/dS driver catalogue).
//!
//! Two tables are loaded once per run, one for oncogenes and one for
//! tumour-suppressor genes. Each row carries, per mutation class, the
//! expected number of drivers per sample and the number of passenger
//! mutations per sample mutation. The passenger rate is turned into a
//! probability that an observed variant is a passenger, given the sample's
//! mutation burden:
//!
//! ```text
//! p_non_driver = 1 − PoissonCDF(0; mutation_count × passengers_per_mutation)
//! ```
//!
//! # Table layout (tab separated)
//!
//! | column | meaning |
//! |--------|---------|
//! | `gene` | HGNC symbol |
//! | `{class}_drivers_per_sample` | expected drivers per sample |
//! | `{class}_passengers_per_mutation` | passengers per sample mutation |
//!
//! with `{class}` one of `missense`, `nonsense`, `splice`, `indel`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use oncomatch_common::{CodingEffect, GeneRole, MolecularRecord, OncomatchError, Result, Variant};
use serde::{Deserialize, Serialize};
use statrs::distribution::{DiscreteCDF, Poisson};
use tracing::{debug, info, warn};

/// Approximate callable genome size in megabases; TMB is mutations per Mb.
pub const GENOME_SIZE_MB: f64 = 2859.0;

/// Somatic SNVs per somatic indel, used when only TMB is known.
pub const SNV_INDEL_RATIO: f64 = 10.0;

// ── Mutation class ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DndsDriverType {
    Missense,
    Nonsense,
    Splice,
    Indel,
}

impl DndsDriverType {
    /// Classify a variant by coding effect and type. Synonymous and
    /// non-coding variants do not qualify.
    pub fn classify(variant: &Variant) -> Option<Self> {
        match variant.coding_effect {
            CodingEffect::NonsenseOrFrameshift => Some(DndsDriverType::Nonsense),
            CodingEffect::Splice => Some(DndsDriverType::Splice),
            CodingEffect::Missense if variant.variant_type.is_indel() => Some(DndsDriverType::Indel),
            CodingEffect::Missense => Some(DndsDriverType::Missense),
            CodingEffect::Synonymous | CodingEffect::None => None,
        }
    }

    /// Two-hit selection priority: nonsense > indel > splice > missense.
    pub fn priority(&self) -> u8 {
        match self {
            DndsDriverType::Nonsense => 4,
            DndsDriverType::Indel => 3,
            DndsDriverType::Splice => 2,
            DndsDriverType::Missense => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DndsDriverType::Missense => "missense",
            DndsDriverType::Nonsense => "nonsense",
            DndsDriverType::Splice => "splice",
            DndsDriverType::Indel => "indel",
        }
    }

    pub const ALL: [DndsDriverType; 4] = [
        DndsDriverType::Missense,
        DndsDriverType::Nonsense,
        DndsDriverType::Splice,
        DndsDriverType::Indel,
    ];
}

// ── Entries ──────────────────────────────────────────────────────────────────

/// Background statistics for one gene and mutation class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DndsDriverGeneLikelihood {
    pub drivers_per_sample: f64,
    pub probability_variant_non_driver: f64,
}

impl DndsDriverGeneLikelihood {
    /// Posterior probability that an observed variant of this class is a driver.
    pub fn driver_likelihood(&self) -> f64 {
        let dps = self.drivers_per_sample;
        let p = self.probability_variant_non_driver;
        let denominator = dps + p * (1.0 - dps);
        if denominator <= 0.0 || !denominator.is_finite() {
            return 0.0;
        }
        (dps / denominator).clamp(0.0, 1.0)
    }

    /// Combine two independent hits in the same gene.
    pub fn joint(&self, other: &Self) -> Self {
        Self {
            drivers_per_sample: self.drivers_per_sample.max(other.drivers_per_sample),
            probability_variant_non_driver: self.probability_variant_non_driver
                * other.probability_variant_non_driver,
        }
    }
}

/// Probability of observing at least one passenger given the Poisson rate.
pub fn probability_variant_non_driver(lambda: f64) -> Result<f64> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(OncomatchError::InvalidBackground(format!(
            "Poisson rate must be finite and non-negative, got {lambda}"
        )));
    }
    if lambda == 0.0 {
        return Ok(0.0);
    }
    let poisson = Poisson::new(lambda)
        .map_err(|e| OncomatchError::InvalidBackground(e.to_string()))?;
    Ok(1.0 - poisson.cdf(0))
}

// ── Mutation burden ──────────────────────────────────────────────────────────

/// Estimated somatic mutation counts for the sample under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationBurden {
    pub snv_count: f64,
    pub indel_count: f64,
}

impl MutationBurden {
    pub fn from_counts(snv_count: u64, indel_count: u64) -> Self {
        Self {
            snv_count: snv_count as f64,
            indel_count: indel_count as f64,
        }
    }

    /// Derive counts from a TMB score (mutations per Mb).
    pub fn from_tmb(tmb: f64, genome_size_mb: f64, snv_indel_ratio: f64) -> Self {
        let total = tmb.max(0.0) * genome_size_mb;
        let indel_count = total / (snv_indel_ratio + 1.0);
        Self {
            snv_count: total - indel_count,
            indel_count,
        }
    }

    /// Direct counts when both are present, otherwise derived from TMB.
    pub fn for_record(
        record: &MolecularRecord,
        genome_size_mb: f64,
        snv_indel_ratio: f64,
    ) -> Option<Self> {
        if let (Some(snv), Some(indel)) = (record.somatic_snv_count, record.somatic_indel_count) {
            return Some(Self::from_counts(snv, indel));
        }
        record
            .tumor_mutational_burden
            .map(|tmb| Self::from_tmb(tmb, genome_size_mb, snv_indel_ratio))
    }

    fn count_for(&self, driver_type: DndsDriverType) -> f64 {
        match driver_type {
            DndsDriverType::Indel => self.indel_count,
            _ => self.snv_count,
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct DndsRow {
    gene: String,
    missense_drivers_per_sample: f64,
    missense_passengers_per_mutation: f64,
    nonsense_drivers_per_sample: f64,
    nonsense_passengers_per_mutation: f64,
    splice_drivers_per_sample: f64,
    splice_passengers_per_mutation: f64,
    indel_drivers_per_sample: f64,
    indel_passengers_per_mutation: f64,
}

impl DndsRow {
    fn rates(&self) -> [(DndsDriverType, f64, f64); 4] {
        [
            (DndsDriverType::Missense, self.missense_drivers_per_sample, self.missense_passengers_per_mutation),
            (DndsDriverType::Nonsense, self.nonsense_drivers_per_sample, self.nonsense_passengers_per_mutation),
            (DndsDriverType::Splice, self.splice_drivers_per_sample, self.splice_passengers_per_mutation),
            (DndsDriverType::Indel, self.indel_drivers_per_sample, self.indel_passengers_per_mutation),
        ]
    }
}

type DndsTable = HashMap<(String, DndsDriverType), DndsDriverGeneLikelihood>;

/// Read-only background statistics, shared by reference across evaluations.
#[derive(Debug, Clone, Default)]
pub struct DndsDatabase {
    onco: DndsTable,
    tsg: DndsTable,
}

impl DndsDatabase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load both tables from tab-separated files.
    pub fn from_paths(onco_path: &Path, tsg_path: &Path, burden: &MutationBurden) -> Result<Self> {
        info!("Loading dN/dS background statistics from {:?} and {:?}", onco_path, tsg_path);
        let onco = std::fs::File::open(onco_path)?;
        let tsg = std::fs::File::open(tsg_path)?;
        Self::from_readers(onco, tsg, burden)
    }

    pub fn from_readers<R1: Read, R2: Read>(onco: R1, tsg: R2, burden: &MutationBurden) -> Result<Self> {
        let database = Self {
            onco: load_table(onco, burden)?,
            tsg: load_table(tsg, burden)?,
        };
        info!(
            "dN/dS database ready: {} oncogene entries, {} tumor suppressor entries",
            database.onco.len(),
            database.tsg.len()
        );
        Ok(database)
    }

    /// Add a precomputed entry. Only `Onco` and `Tsg` roles are tabulated.
    pub fn with(
        mut self,
        role: GeneRole,
        gene: &str,
        driver_type: DndsDriverType,
        entry: DndsDriverGeneLikelihood,
    ) -> Result<Self> {
        self.table_mut(role)?.insert((gene.to_string(), driver_type), entry);
        Ok(self)
    }

    /// Look up the entry for a gene and class in the table for `role`.
    ///
    /// Returns `Ok(None)` if the gene has no entry for that class and an
    /// error if `role` is not a tabulated role.
    pub fn find(
        &self,
        gene: &str,
        role: GeneRole,
        driver_type: DndsDriverType,
    ) -> Result<Option<DndsDriverGeneLikelihood>> {
        let entry = self.table(role, driver_type)?
            .get(&(gene.to_string(), driver_type))
            .copied();
        if entry.is_none() {
            debug!("No {} background entry for {} ({})", driver_type.as_str(), gene, role.as_str());
        }
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.onco.len() + self.tsg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self, role: GeneRole, driver_type: DndsDriverType) -> Result<&DndsTable> {
        match role {
            GeneRole::Onco => Ok(&self.onco),
            GeneRole::Tsg => Ok(&self.tsg),
            GeneRole::Both | GeneRole::Unknown => Err(OncomatchError::UnsupportedGeneRole {
                role: role.as_str().to_string(),
                lookup: driver_type.as_str().to_string(),
            }),
        }
    }

    fn table_mut(&mut self, role: GeneRole) -> Result<&mut DndsTable> {
        match role {
            GeneRole::Onco => Ok(&mut self.onco),
            GeneRole::Tsg => Ok(&mut self.tsg),
            GeneRole::Both | GeneRole::Unknown => Err(OncomatchError::UnsupportedGeneRole {
                role: role.as_str().to_string(),
                lookup: "insert".to_string(),
            }),
        }
    }
}

fn load_table<R: Read>(reader: R, burden: &MutationBurden) -> Result<DndsTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(reader);

    let mut table = DndsTable::new();
    for row in csv_reader.deserialize::<DndsRow>() {
        let row = row?;
        for (driver_type, dps, ppm) in row.rates() {
            if !dps.is_finite() || dps < 0.0 || !ppm.is_finite() || ppm < 0.0 {
                return Err(OncomatchError::InvalidBackground(format!(
                    "{} {}: drivers per sample {dps} and passengers per mutation {ppm} must be non-negative",
                    row.gene,
                    driver_type.as_str()
                )));
            }
            let lambda = burden.count_for(driver_type) * ppm;
            let entry = DndsDriverGeneLikelihood {
                drivers_per_sample: dps,
                probability_variant_non_driver: probability_variant_non_driver(lambda)?,
            };
            if table.insert((row.gene.clone(), driver_type), entry).is_some() {
                warn!("Duplicate background row for {}; keeping the last one", row.gene);
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncomatch_common::{ProteinEffect, VariantType};

    fn variant(coding_effect: CodingEffect, variant_type: VariantType) -> Variant {
        Variant {
            gene: "TP53".to_string(),
            event: "TP53 vus".to_string(),
            gene_role: GeneRole::Tsg,
            protein_effect: ProteinEffect::Unknown,
            coding_effect,
            variant_type,
            is_reportable: true,
            is_associated_with_drug_resistance: None,
        }
    }

    #[test]
    fn test_classify_by_coding_effect_and_type() {
        let classify = |c, t| DndsDriverType::classify(&variant(c, t));
        assert_eq!(classify(CodingEffect::NonsenseOrFrameshift, VariantType::Delete), Some(DndsDriverType::Nonsense));
        assert_eq!(classify(CodingEffect::Missense, VariantType::Insert), Some(DndsDriverType::Indel));
        assert_eq!(classify(CodingEffect::Missense, VariantType::Snv), Some(DndsDriverType::Missense));
        assert_eq!(classify(CodingEffect::Splice, VariantType::Snv), Some(DndsDriverType::Splice));
        assert_eq!(classify(CodingEffect::Synonymous, VariantType::Snv), None);
    }

    #[test]
    fn test_priority_order() {
        let mut types = DndsDriverType::ALL.to_vec();
        types.sort_by_key(|t| std::cmp::Reverse(t.priority()));
        assert_eq!(
            types,
            vec![DndsDriverType::Nonsense, DndsDriverType::Indel, DndsDriverType::Splice, DndsDriverType::Missense]
        );
    }

    #[test]
    fn test_poisson_non_driver_probability() {
        // 1 − e^{−λ}
        let p = probability_variant_non_driver(0.5).unwrap();
        assert!((p - (1.0 - (-0.5f64).exp())).abs() < 1e-9);
        assert_eq!(probability_variant_non_driver(0.0).unwrap(), 0.0);
        assert!(probability_variant_non_driver(-1.0).is_err());
    }

    #[test]
    fn test_driver_likelihood_formula() {
        let entry = DndsDriverGeneLikelihood { drivers_per_sample: 0.1, probability_variant_non_driver: 0.2 };
        let expected = 0.1 / (0.1 + 0.2 * 0.9);
        assert!((entry.driver_likelihood() - expected).abs() < 1e-12);

        let certain = DndsDriverGeneLikelihood { drivers_per_sample: 0.1, probability_variant_non_driver: 0.0 };
        assert_eq!(certain.driver_likelihood(), 1.0);
    }

    #[test]
    fn test_joint_takes_max_drivers_and_product_of_passengers() {
        let a = DndsDriverGeneLikelihood { drivers_per_sample: 0.05, probability_variant_non_driver: 0.4 };
        let b = DndsDriverGeneLikelihood { drivers_per_sample: 0.02, probability_variant_non_driver: 0.5 };
        let joint = a.joint(&b);
        assert_eq!(joint.drivers_per_sample, 0.05);
        assert!((joint.probability_variant_non_driver - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_burden_from_tmb_splits_by_ratio() {
        let burden = MutationBurden::from_tmb(11.0 / GENOME_SIZE_MB, GENOME_SIZE_MB, SNV_INDEL_RATIO);
        assert!((burden.snv_count - 10.0).abs() < 1e-9);
        assert!((burden.indel_count - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_burden_prefers_direct_counts() {
        let record = MolecularRecord {
            tumor_mutational_burden: Some(100.0),
            somatic_snv_count: Some(1200),
            somatic_indel_count: Some(80),
            variants: vec![],
        };
        let burden = MutationBurden::for_record(&record, GENOME_SIZE_MB, SNV_INDEL_RATIO).unwrap();
        assert_eq!(burden, MutationBurden::from_counts(1200, 80));

        assert!(MutationBurden::for_record(&MolecularRecord::default(), GENOME_SIZE_MB, SNV_INDEL_RATIO).is_none());
    }

    #[test]
    fn test_find_rejects_untabulated_roles() {
        let db = DndsDatabase::empty();
        assert!(db.find("TP53", GeneRole::Tsg, DndsDriverType::Missense).unwrap().is_none());
        assert!(matches!(
            db.find("TP53", GeneRole::Both, DndsDriverType::Missense),
            Err(OncomatchError::UnsupportedGeneRole { .. })
        ));
        assert!(db.find("TP53", GeneRole::Unknown, DndsDriverType::Nonsense).is_err());
    }
}
