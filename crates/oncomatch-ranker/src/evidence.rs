//! Actionability evidence items supplied by the knowledge base.

use serde::{Deserialize, Serialize};

/// Clinical maturity of the evidence, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalTier {
    Guideline,
    Approved,
    PhaseIii,
    PhaseIi,
    PhaseI,
    CaseReport,
    Preclinical,
}

impl ApprovalTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalTier::Guideline => "GUIDELINE",
            ApprovalTier::Approved => "APPROVED",
            ApprovalTier::PhaseIii => "PHASE_III",
            ApprovalTier::PhaseIi => "PHASE_II",
            ApprovalTier::PhaseI => "PHASE_I",
            ApprovalTier::CaseReport => "CASE_REPORT",
            ApprovalTier::Preclinical => "PRECLINICAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Benefit,
    Resistance,
}

/// How well the evidence's cancer type applies to the patient's tumor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TumorMatch {
    SpecificType,
    AllTypes,
    OtherType,
}

/// How specifically the evidence targets the patient's variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantMatch {
    Exact,
    FunctionalEffect,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentEvidence {
    pub treatment: String,
    /// Molecular event the evidence is matched on, e.g. "BRAF V600E"
    pub event: String,
    pub tier: ApprovalTier,
    pub direction: Direction,
    /// False for predicted benefit or resistance
    #[serde(default = "default_certain")]
    pub certain: bool,
    pub tumor_match: TumorMatch,
    pub variant_match: VariantMatch,
    /// Driver likelihood of `event`, when estimated.
    #[serde(default)]
    pub driver_likelihood: Option<f64>,
}

fn default_certain() -> bool { true }
