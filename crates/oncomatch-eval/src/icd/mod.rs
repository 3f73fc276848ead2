//! ICD ontology and hierarchical code matching shared by leaf rules.

pub mod matcher;
pub mod model;

pub use matcher::{find_instances_matching_any_icd_code, IcdCodeEntity, IcdMatches};
pub use model::{IcdModel, IcdNode, IcdOntology};
