//! oncomatch-common: Shared types and errors used across all oncomatch crates.

pub mod error;
pub mod icd;
pub mod molecular;
pub mod patient;

// Re-export commonly used types
pub use error::{OncomatchError, Result};
pub use icd::IcdCode;
pub use molecular::{CodingEffect, GeneRole, MolecularRecord, ProteinEffect, Variant, VariantType};
pub use patient::{Comorbidity, PatientRecord, TumorDetails};
