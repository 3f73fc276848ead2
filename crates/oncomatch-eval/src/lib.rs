//! oncomatch-eval: Composite eligibility evaluation.
//!
//! Leaf rules grade one criterion against a patient record; composite rules
//! (AND, OR, NOT, WARN_IF) merge child evaluations into one verdict with
//! consolidated explanatory messages.

pub mod composite;
pub mod evaluation;
pub mod factory;
pub mod function;
pub mod icd;
pub mod message;
pub mod resolver;
pub mod result;
pub mod rule;
pub mod rules;

pub use evaluation::Evaluation;
pub use function::{EligibilityFunction, EvaluationContext, EvaluationFunction, Parameter};
pub use icd::{find_instances_matching_any_icd_code, IcdCodeEntity, IcdMatches, IcdModel, IcdNode, IcdOntology};
pub use message::EvaluationMessage;
pub use resolver::resolve;
pub use result::EvaluationResult;
pub use rule::{EligibilityRule, RuleInput};
