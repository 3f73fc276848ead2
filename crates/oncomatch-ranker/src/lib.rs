//! oncomatch-ranker: Evidence scoring and treatment ranking.
//!
//! Actionability evidence for a patient's molecular events is scored per item
//! and aggregated per treatment, with diminishing returns when several items
//! support the same event.

pub mod evidence;
pub mod ranking;
pub mod scorer;
pub mod weights;

pub use evidence::{ApprovalTier, Direction, TreatmentEvidence, TumorMatch, VariantMatch};
pub use ranking::{RankedTreatment, TreatmentRanker};
pub use scorer::EvidenceScoringModel;
pub use weights::ScoringWeights;
