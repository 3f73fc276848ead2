//! Rule trees: the unresolved serialised form and the resolved evaluator.

use chrono::NaiveDate;
use oncomatch_common::{PatientRecord, Result};
use oncomatch_molecular::DndsDatabase;
use serde::{Deserialize, Serialize};

use crate::composite;
use crate::evaluation::Evaluation;
use crate::icd::IcdOntology;
use crate::rule::EligibilityRule;
use crate::rules::LeafRule;

/// A named rule with positional parameters, as curated.
///
/// ```json
/// {"rule": "AND", "parameters": [
///     {"rule": "IS_AT_LEAST_X_YEARS_OLD", "parameters": ["18"]},
///     {"rule": "HAS_KNOWN_ACTIVE_CNS_METASTASES", "parameters": []}
/// ]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityFunction {
    pub rule: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Function(EligibilityFunction),
    Text(String),
    Number(f64),
}

impl EligibilityFunction {
    pub fn new(rule: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self { rule: rule.into(), parameters }
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::Text(value.to_string())
    }
}

impl From<EligibilityFunction> for Parameter {
    fn from(function: EligibilityFunction) -> Self {
        Parameter::Function(function)
    }
}

/// Shared read-only state leaf rules evaluate against.
pub struct EvaluationContext<'a> {
    pub reference_date: NaiveDate,
    pub icd_model: &'a dyn IcdOntology,
    pub dnds: &'a DndsDatabase,
    pub driver_likelihood_high: f64,
    pub driver_likelihood_low: f64,
}

/// A resolved rule tree. Built by [`crate::resolver::resolve`].
#[derive(Debug)]
pub enum EvaluationFunction {
    And(Vec<EvaluationFunction>),
    Or(Vec<EvaluationFunction>),
    Not(Box<EvaluationFunction>),
    WarnIf(Box<EvaluationFunction>),
    Leaf {
        rule: EligibilityRule,
        evaluator: Box<dyn LeafRule>,
    },
}

impl EvaluationFunction {
    pub fn rule(&self) -> EligibilityRule {
        match self {
            EvaluationFunction::And(_) => EligibilityRule::And,
            EvaluationFunction::Or(_) => EligibilityRule::Or,
            EvaluationFunction::Not(_) => EligibilityRule::Not,
            EvaluationFunction::WarnIf(_) => EligibilityRule::WarnIf,
            EvaluationFunction::Leaf { rule, .. } => *rule,
        }
    }

    /// Evaluate the tree against one patient. Every child is evaluated; the
    /// first error aborts the whole tree.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>, record: &PatientRecord) -> Result<Evaluation> {
        match self {
            EvaluationFunction::And(children) => Ok(composite::and(evaluate_all(children, ctx, record)?)),
            EvaluationFunction::Or(children) => Ok(composite::or(evaluate_all(children, ctx, record)?)),
            EvaluationFunction::Not(child) => Ok(composite::not(child.evaluate(ctx, record)?)),
            EvaluationFunction::WarnIf(child) => Ok(composite::warn_if(child.evaluate(ctx, record)?)),
            EvaluationFunction::Leaf { evaluator, .. } => evaluator.evaluate(ctx, record),
        }
    }
}

fn evaluate_all(
    children: &[EvaluationFunction],
    ctx: &EvaluationContext<'_>,
    record: &PatientRecord,
) -> Result<Vec<Evaluation>> {
    children.iter().map(|child| child.evaluate(ctx, record)).collect()
}
