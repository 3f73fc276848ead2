//! Combinators merging child evaluations of a composite rule.
//!
//! Callers evaluate every child before combining; there is no
//! short-circuiting, so diagnostics from all branches stay available.

use std::collections::BTreeSet;

use crate::evaluation::Evaluation;
use crate::result::EvaluationResult;

/// Most severe outcome wins; only children at that outcome contribute.
pub fn and(evaluations: Vec<Evaluation>) -> Evaluation {
    combine(evaluations, Dominance::MostSevere)
}

/// Least severe outcome wins; only children at that outcome contribute.
pub fn or(evaluations: Vec<Evaluation>) -> Evaluation {
    combine(evaluations, Dominance::LeastSevere)
}

/// Swap PASS and FAIL. Qualified outcomes are left alone.
pub fn not(evaluation: Evaluation) -> Evaluation {
    let inverted = match evaluation.result {
        EvaluationResult::Pass => EvaluationResult::Fail,
        EvaluationResult::Fail => EvaluationResult::Pass,
        EvaluationResult::Warn | EvaluationResult::Undetermined | EvaluationResult::NotEvaluated => {
            return evaluation;
        }
    };

    Evaluation {
        result: inverted,
        pass_messages: evaluation.fail_messages,
        fail_messages: evaluation.pass_messages,
        inclusion_molecular_events: evaluation.exclusion_molecular_events,
        exclusion_molecular_events: evaluation.inclusion_molecular_events,
        ..evaluation
    }
}

/// Demote PASS to WARN; everything else passes through.
pub fn warn_if(evaluation: Evaluation) -> Evaluation {
    if evaluation.result != EvaluationResult::Pass {
        return evaluation;
    }

    let mut warn_messages = evaluation.warn_messages;
    warn_messages.extend(evaluation.pass_messages);
    Evaluation {
        result: EvaluationResult::Warn,
        warn_messages,
        pass_messages: BTreeSet::new(),
        ..evaluation
    }
}

#[derive(Debug, Clone, Copy)]
enum Dominance {
    MostSevere,
    LeastSevere,
}

fn combine(mut evaluations: Vec<Evaluation>, dominance: Dominance) -> Evaluation {
    if evaluations.len() == 1 {
        if let Some(only) = evaluations.pop() {
            return only;
        }
    }

    let Some(result) = dominant_result(&evaluations, dominance) else {
        return Evaluation::new(EvaluationResult::NotEvaluated, false);
    };

    let contributing: Vec<Evaluation> = evaluations
        .into_iter()
        .filter(|e| e.result == result)
        .collect();
    let recoverable = contributing.iter().all(|e| e.recoverable);

    contributing
        .iter()
        .fold(Evaluation::new(result, recoverable), |acc, e| acc.add_messages_and_events(e))
        .consolidated()
}

/// PASS and NOT_EVALUATED share rank 0; PASS wins that tie whenever present.
fn dominant_result(evaluations: &[Evaluation], dominance: Dominance) -> Option<EvaluationResult> {
    let ranks = evaluations.iter().map(|e| e.result.rank());
    let rank = match dominance {
        Dominance::MostSevere => ranks.max()?,
        Dominance::LeastSevere => ranks.min()?,
    };

    let mut at_rank = evaluations.iter().map(|e| e.result).filter(|r| r.rank() == rank);
    let first = at_rank.next()?;
    if first == EvaluationResult::Pass || at_rank.any(|r| r == EvaluationResult::Pass) {
        Some(EvaluationResult::Pass)
    } else {
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::message::EvaluationMessage;
    use EvaluationResult::*;

    fn eval(result: EvaluationResult) -> Evaluation {
        Evaluation::new(result, false).with_message(format!("{} message", result.as_str()))
    }

    fn results(results: &[EvaluationResult]) -> Vec<Evaluation> {
        results.iter().map(|r| eval(*r)).collect()
    }

    #[test]
    fn test_and_takes_most_severe() {
        assert_eq!(and(results(&[Pass, Warn, Fail])).result, Fail);
        assert_eq!(and(results(&[Pass, Pass])).result, Pass);
        assert_eq!(and(results(&[Pass, Undetermined, Warn])).result, Warn);
    }

    #[test]
    fn test_or_takes_least_severe() {
        assert_eq!(or(results(&[Pass, Fail])).result, Pass);
        assert_eq!(or(results(&[Warn, Fail])).result, Warn);
        assert_eq!(or(results(&[Undetermined, Warn, Fail])).result, Undetermined);
    }

    #[test]
    fn test_and_keeps_only_dominant_messages() {
        let combined = and(results(&[Pass, Warn, Fail]));
        assert_eq!(combined.fail_messages.len(), 1);
        assert!(combined.pass_messages.is_empty());
        assert!(combined.warn_messages.is_empty());
    }

    #[test]
    fn test_or_keeps_only_dominant_messages() {
        let combined = or(results(&[Warn, Fail, Warn]));
        assert_eq!(combined.result, Warn);
        // both WARN children carry the same text and fold into one
        assert_eq!(combined.warn_messages.len(), 1);
        assert!(combined.fail_messages.is_empty());
    }

    #[test]
    fn test_recoverable_is_conjunction_over_contributing_children() {
        let combined = and(vec![factory::recoverable_fail("a"), factory::recoverable_fail("b"), factory::pass("c")]);
        assert_eq!(combined.result, Fail);
        assert!(combined.recoverable);

        let combined = and(vec![factory::recoverable_fail("a"), factory::fail("b")]);
        assert!(!combined.recoverable);

        // a non-recoverable child at a non-dominant outcome does not matter
        let combined = or(vec![factory::recoverable_pass("a"), factory::fail("b")]);
        assert_eq!(combined.result, Pass);
        assert!(combined.recoverable);
    }

    #[test]
    fn test_single_child_is_returned_unmodified() {
        let child = Evaluation::new(Warn, true)
            .with_message(EvaluationMessage::itemized("Inactivation of {}", ["TP53"]))
            .with_message(EvaluationMessage::itemized("Inactivation of {}", ["RB1"]))
            .with_inclusion_events(["TP53 del"]);
        assert_eq!(and(vec![child.clone()]), child);
        assert_eq!(or(vec![child.clone()]), child);
    }

    #[test]
    fn test_pass_wins_rank_zero_tie() {
        assert_eq!(and(results(&[NotEvaluated, Pass])).result, Pass);
        assert_eq!(or(results(&[NotEvaluated, Fail])).result, NotEvaluated);
        assert_eq!(and(results(&[NotEvaluated, NotEvaluated])).result, NotEvaluated);
    }

    #[test]
    fn test_events_follow_dominant_children() {
        let combined = and(vec![
            factory::pass("a").with_inclusion_events(["KRAS G12D"]),
            factory::fail("b").with_inclusion_events(["TP53 R175H"]),
        ]);
        assert_eq!(combined.inclusion_molecular_events.len(), 1);
        assert!(combined.inclusion_molecular_events.contains("TP53 R175H"));
    }

    #[test]
    fn test_not_inverts_pass_and_fail_only() {
        assert_eq!(not(eval(Pass)).result, Fail);
        assert_eq!(not(eval(Fail)).result, Pass);
        assert_eq!(not(eval(Warn)).result, Warn);
        assert_eq!(not(eval(Undetermined)).result, Undetermined);
        assert_eq!(not(eval(NotEvaluated)).result, NotEvaluated);
    }

    #[test]
    fn test_not_swaps_messages_events_and_keeps_recoverable() {
        let child = factory::recoverable_pass("has KRAS").with_inclusion_events(["KRAS G12D"]);
        let negated = not(child);
        assert_eq!(negated.result, Fail);
        assert!(negated.recoverable);
        assert!(negated.pass_messages.is_empty());
        assert_eq!(negated.fail_messages.len(), 1);
        assert!(negated.inclusion_molecular_events.is_empty());
        assert!(negated.exclusion_molecular_events.contains("KRAS G12D"));
    }

    #[test]
    fn test_warn_if() {
        let demoted = warn_if(eval(Pass));
        assert_eq!(demoted.result, Warn);
        assert!(demoted.pass_messages.is_empty());
        assert_eq!(demoted.warn_messages.len(), 1);

        assert_eq!(warn_if(eval(Fail)).result, Fail);
        assert_eq!(warn_if(eval(Undetermined)).result, Undetermined);
        assert_eq!(warn_if(eval(Warn)).result, Warn);
    }
}
