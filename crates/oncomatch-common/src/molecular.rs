/// Molecular findings attached to a patient record.
/// Produced by upstream curation; consumed read-only by rules and models.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gene role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneRole {
    Onco,
    Tsg,
    Both,
    Unknown,
}

impl GeneRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneRole::Onco => "ONCO",
            GeneRole::Tsg => "TSG",
            GeneRole::Both => "BOTH",
            GeneRole::Unknown => "UNKNOWN",
        }
    }
}

// ---------------------------------------------------------------------------
// Variant annotation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProteinEffect {
    Unknown,
    NoEffect,
    NoEffectPredicted,
    LossOfFunction,
    LossOfFunctionPredicted,
    GainOfFunction,
    GainOfFunctionPredicted,
}

impl ProteinEffect {
    pub fn is_gain_of_function(&self) -> bool {
        matches!(self, ProteinEffect::GainOfFunction | ProteinEffect::GainOfFunctionPredicted)
    }

    pub fn is_loss_of_function(&self) -> bool {
        matches!(self, ProteinEffect::LossOfFunction | ProteinEffect::LossOfFunctionPredicted)
    }

    pub fn is_gain_or_loss_of_function(&self) -> bool {
        self.is_gain_of_function() || self.is_loss_of_function()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodingEffect {
    NonsenseOrFrameshift,
    Splice,
    Missense,
    Synonymous,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    Snv,
    Mnv,
    Insert,
    Delete,
}

impl VariantType {
    pub fn is_indel(&self) -> bool {
        matches!(self, VariantType::Insert | VariantType::Delete)
    }
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub gene: String,
    /// Display label, e.g. "BRAF V600E"
    pub event: String,
    pub gene_role: GeneRole,
    pub protein_effect: ProteinEffect,
    pub coding_effect: CodingEffect,
    pub variant_type: VariantType,
    #[serde(default = "default_true")]
    pub is_reportable: bool,
    #[serde(default)]
    pub is_associated_with_drug_resistance: Option<bool>,
}

fn default_true() -> bool { true }

// ---------------------------------------------------------------------------
// Molecular record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MolecularRecord {
    /// Mutations per megabase
    #[serde(default)]
    pub tumor_mutational_burden: Option<f64>,
    #[serde(default)]
    pub somatic_snv_count: Option<u64>,
    #[serde(default)]
    pub somatic_indel_count: Option<u64>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl MolecularRecord {
    pub fn variants_in_gene<'a>(&'a self, gene: &'a str) -> impl Iterator<Item = &'a Variant> + 'a {
        self.variants.iter().filter(move |v| v.gene == gene)
    }
}
