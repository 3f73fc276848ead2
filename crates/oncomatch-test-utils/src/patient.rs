//! Builders for patient records used across crate tests.

use oncomatch_common::{
    CodingEffect, Comorbidity, GeneRole, IcdCode, MolecularRecord, PatientRecord, ProteinEffect, TumorDetails,
    Variant, VariantType,
};

pub struct PatientBuilder {
    record: PatientRecord,
}

impl Default for PatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientBuilder {
    /// Patient born in 1970 with no other data curated.
    pub fn new() -> Self {
        Self {
            record: PatientRecord {
                patient_id: "TEST-01".to_string(),
                birth_year: 1970,
                who_status: None,
                tumor: TumorDetails::default(),
                comorbidities: Vec::new(),
                molecular: None,
            },
        }
    }

    pub fn birth_year(mut self, year: i32) -> Self {
        self.record.birth_year = year;
        self
    }

    pub fn who_status(mut self, who: u32) -> Self {
        self.record.who_status = Some(who);
        self
    }

    pub fn active_cns_lesions(mut self, active: bool) -> Self {
        self.record.tumor.has_active_cns_lesions = Some(active);
        self
    }

    pub fn primary_tumor_type(mut self, tumor_type: &str) -> Self {
        self.record.tumor.primary_tumor_type = Some(tumor_type.to_string());
        self
    }

    pub fn comorbidity(mut self, name: &str, codes: &[&str]) -> Self {
        let icd_codes = codes
            .iter()
            .map(|c| IcdCode::parse(c).unwrap_or_else(|e| panic!("bad fixture code {c}: {e}")))
            .collect();
        self.record.comorbidities.push(Comorbidity { name: name.to_string(), icd_codes });
        self
    }

    /// Attach an (initially empty) molecular record.
    pub fn molecular_tested(mut self) -> Self {
        self.record.molecular.get_or_insert_with(MolecularRecord::default);
        self
    }

    pub fn tmb(mut self, tmb: f64) -> Self {
        self.record.molecular.get_or_insert_with(MolecularRecord::default).tumor_mutational_burden = Some(tmb);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.record.molecular.get_or_insert_with(MolecularRecord::default).variants.push(variant);
        self
    }

    pub fn build(self) -> PatientRecord {
        self.record
    }
}

/// A reportable SNV of unknown significance.
pub fn variant(gene: &str, event: &str, role: GeneRole, coding_effect: CodingEffect) -> Variant {
    Variant {
        gene: gene.to_string(),
        event: event.to_string(),
        gene_role: role,
        protein_effect: ProteinEffect::Unknown,
        coding_effect,
        variant_type: VariantType::Snv,
        is_reportable: true,
        is_associated_with_drug_resistance: None,
    }
}
