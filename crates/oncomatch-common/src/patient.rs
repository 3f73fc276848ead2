/// Structured patient record evaluated against trial eligibility rules.
/// Curation from raw clinical text happens upstream; this is the read-only input.

use serde::{Deserialize, Serialize};

use crate::icd::IcdCode;
use crate::molecular::MolecularRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub birth_year: i32,
    #[serde(default)]
    pub who_status: Option<u32>,
    #[serde(default)]
    pub tumor: TumorDetails,
    #[serde(default)]
    pub comorbidities: Vec<Comorbidity>,
    /// Absent when no molecular test was performed.
    #[serde(default)]
    pub molecular: Option<MolecularRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TumorDetails {
    #[serde(default)]
    pub primary_tumor_type: Option<String>,
    #[serde(default)]
    pub has_active_cns_lesions: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comorbidity {
    pub name: String,
    #[serde(default)]
    pub icd_codes: Vec<IcdCode>,
}
