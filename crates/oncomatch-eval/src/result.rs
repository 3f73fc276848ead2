//! Graded outcome of evaluating one rule against one patient.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationResult {
    Pass,
    Warn,
    Undetermined,
    Fail,
    NotEvaluated,
}

impl EvaluationResult {
    /// Severity rank. `Pass` and `NotEvaluated` share the lowest rank.
    pub fn rank(&self) -> u8 {
        match self {
            EvaluationResult::Pass => 0,
            EvaluationResult::NotEvaluated => 0,
            EvaluationResult::Undetermined => 1,
            EvaluationResult::Warn => 2,
            EvaluationResult::Fail => 3,
        }
    }

    pub fn is_worse_than(&self, other: EvaluationResult) -> bool {
        self.rank() > other.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationResult::Pass => "PASS",
            EvaluationResult::Warn => "WARN",
            EvaluationResult::Undetermined => "UNDETERMINED",
            EvaluationResult::Fail => "FAIL",
            EvaluationResult::NotEvaluated => "NOT_EVALUATED",
        }
    }

    pub const ALL: [EvaluationResult; 5] = [
        EvaluationResult::Pass,
        EvaluationResult::Warn,
        EvaluationResult::Undetermined,
        EvaluationResult::Fail,
        EvaluationResult::NotEvaluated,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use EvaluationResult::*;

    #[test]
    fn test_nothing_is_worse_than_itself() {
        for result in EvaluationResult::ALL {
            assert!(!result.is_worse_than(result), "{} worse than itself", result.as_str());
        }
    }

    #[test]
    fn test_worse_than_follows_rank() {
        for a in EvaluationResult::ALL {
            for b in EvaluationResult::ALL {
                if a.rank() < b.rank() {
                    assert!(!a.is_worse_than(b));
                    assert!(b.is_worse_than(a));
                }
            }
        }
    }

    #[test]
    fn test_pass_and_not_evaluated_are_incomparable() {
        assert!(!Pass.is_worse_than(NotEvaluated));
        assert!(!NotEvaluated.is_worse_than(Pass));
    }

    #[test]
    fn test_severity_order() {
        assert!(Fail.is_worse_than(Warn));
        assert!(Warn.is_worse_than(Undetermined));
        assert!(Undetermined.is_worse_than(Pass));
        assert!(Undetermined.is_worse_than(NotEvaluated));
    }
}
