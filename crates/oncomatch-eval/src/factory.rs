//! Constructors used by leaf rules to produce evaluations.
//!
//! Unrecoverable outcomes cannot change by collecting more data; the
//! recoverable variants mark outcomes a curator could still flip.

use crate::evaluation::Evaluation;
use crate::message::EvaluationMessage;
use crate::result::EvaluationResult;

fn create(result: EvaluationResult, recoverable: bool, message: impl Into<EvaluationMessage>) -> Evaluation {
    Evaluation::new(result, recoverable).with_message(message)
}

pub fn pass(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Pass, false, message)
}

pub fn recoverable_pass(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Pass, true, message)
}

pub fn warn(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Warn, false, message)
}

pub fn recoverable_warn(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Warn, true, message)
}

pub fn undetermined(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Undetermined, false, message)
}

pub fn recoverable_undetermined(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Undetermined, true, message)
}

pub fn fail(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Fail, false, message)
}

pub fn recoverable_fail(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::Fail, true, message)
}

pub fn not_evaluated(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::NotEvaluated, false, message)
}

pub fn recoverable_not_evaluated(message: impl Into<EvaluationMessage>) -> Evaluation {
    create(EvaluationResult::NotEvaluated, true, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_set_result_and_recoverability() {
        let cases = [
            (pass("m"), EvaluationResult::Pass, false),
            (recoverable_pass("m"), EvaluationResult::Pass, true),
            (warn("m"), EvaluationResult::Warn, false),
            (recoverable_warn("m"), EvaluationResult::Warn, true),
            (undetermined("m"), EvaluationResult::Undetermined, false),
            (recoverable_undetermined("m"), EvaluationResult::Undetermined, true),
            (fail("m"), EvaluationResult::Fail, false),
            (recoverable_fail("m"), EvaluationResult::Fail, true),
            (not_evaluated("m"), EvaluationResult::NotEvaluated, false),
            (recoverable_not_evaluated("m"), EvaluationResult::NotEvaluated, true),
        ];
        for (eval, result, recoverable) in cases {
            assert_eq!(eval.result, result);
            assert_eq!(eval.recoverable, recoverable);
            assert_eq!(eval.messages_for(result).len(), 1);
        }
    }
}
