//! The immutable result of evaluating one rule against one patient.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::message::{consolidate, EvaluationMessage};
use crate::result::EvaluationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub result: EvaluationResult,
    pub recoverable: bool,
    /// Molecular events supporting the criterion.
    #[serde(default)]
    pub inclusion_molecular_events: BTreeSet<String>,
    /// Molecular events arguing against the criterion.
    #[serde(default)]
    pub exclusion_molecular_events: BTreeSet<String>,
    #[serde(default)]
    pub pass_messages: BTreeSet<EvaluationMessage>,
    #[serde(default)]
    pub warn_messages: BTreeSet<EvaluationMessage>,
    #[serde(default)]
    pub undetermined_messages: BTreeSet<EvaluationMessage>,
    #[serde(default)]
    pub fail_messages: BTreeSet<EvaluationMessage>,
    #[serde(default)]
    pub is_missing_molecular_result_for_evaluation: bool,
}

impl Evaluation {
    /// Bare evaluation with no messages or events.
    pub fn new(result: EvaluationResult, recoverable: bool) -> Self {
        Self {
            result,
            recoverable,
            inclusion_molecular_events: BTreeSet::new(),
            exclusion_molecular_events: BTreeSet::new(),
            pass_messages: BTreeSet::new(),
            warn_messages: BTreeSet::new(),
            undetermined_messages: BTreeSet::new(),
            fail_messages: BTreeSet::new(),
            is_missing_molecular_result_for_evaluation: false,
        }
    }

    /// Messages of the category matching `result`. `NotEvaluated` shares the
    /// pass category.
    pub fn messages_for(&self, result: EvaluationResult) -> &BTreeSet<EvaluationMessage> {
        match result {
            EvaluationResult::Pass | EvaluationResult::NotEvaluated => &self.pass_messages,
            EvaluationResult::Warn => &self.warn_messages,
            EvaluationResult::Undetermined => &self.undetermined_messages,
            EvaluationResult::Fail => &self.fail_messages,
        }
    }

    fn messages_for_mut(&mut self, result: EvaluationResult) -> &mut BTreeSet<EvaluationMessage> {
        match result {
            EvaluationResult::Pass | EvaluationResult::NotEvaluated => &mut self.pass_messages,
            EvaluationResult::Warn => &mut self.warn_messages,
            EvaluationResult::Undetermined => &mut self.undetermined_messages,
            EvaluationResult::Fail => &mut self.fail_messages,
        }
    }

    pub fn with_message(mut self, message: impl Into<EvaluationMessage>) -> Self {
        let result = self.result;
        self.messages_for_mut(result).insert(message.into());
        self
    }

    pub fn with_inclusion_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inclusion_molecular_events.extend(events.into_iter().map(Into::into));
        self
    }

    pub fn with_missing_molecular_result(mut self) -> Self {
        self.is_missing_molecular_result_for_evaluation = true;
        self
    }

    /// Union of messages, events and the missing-result flag; result and
    /// recoverability are kept from `self`.
    pub fn add_messages_and_events(mut self, other: &Evaluation) -> Self {
        self.inclusion_molecular_events.extend(other.inclusion_molecular_events.iter().cloned());
        self.exclusion_molecular_events.extend(other.exclusion_molecular_events.iter().cloned());
        self.pass_messages.extend(other.pass_messages.iter().cloned());
        self.warn_messages.extend(other.warn_messages.iter().cloned());
        self.undetermined_messages.extend(other.undetermined_messages.iter().cloned());
        self.fail_messages.extend(other.fail_messages.iter().cloned());
        self.is_missing_molecular_result_for_evaluation |= other.is_missing_molecular_result_for_evaluation;
        self
    }

    /// Consolidate every message category.
    pub fn consolidated(self) -> Self {
        Self {
            pass_messages: consolidate(&self.pass_messages),
            warn_messages: consolidate(&self.warn_messages),
            undetermined_messages: consolidate(&self.undetermined_messages),
            fail_messages: consolidate(&self.fail_messages),
            ..self
        }
    }
}
