//! Resolve curated [`EligibilityFunction`] trees into evaluators.
//!
//! Resolution fails fast: the first unknown rule id or malformed parameter
//! list aborts with a typed error, before any patient is evaluated.

use oncomatch_common::{IcdCode, OncomatchError, Result};
use tracing::debug;

use crate::function::{EligibilityFunction, EvaluationFunction, Parameter};
use crate::rule::{EligibilityRule, RuleInput};
use crate::rules;

/// Type-checked leaf parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    None,
    Integer(i64),
    Double(f64),
    Text(String),
    Gene(String),
    IcdCode(IcdCode),
}

pub fn resolve(function: &EligibilityFunction) -> Result<EvaluationFunction> {
    let rule: EligibilityRule = function.rule.parse()?;
    let resolved = match rule {
        EligibilityRule::And => EvaluationFunction::And(resolve_children(rule, &function.parameters)?),
        EligibilityRule::Or => EvaluationFunction::Or(resolve_children(rule, &function.parameters)?),
        EligibilityRule::Not => EvaluationFunction::Not(Box::new(resolve_single_child(rule, &function.parameters)?)),
        EligibilityRule::WarnIf => {
            EvaluationFunction::WarnIf(Box::new(resolve_single_child(rule, &function.parameters)?))
        }
        _ => {
            let value = parse_value(rule, &function.parameters)?;
            EvaluationFunction::Leaf { rule, evaluator: rules::construct(rule, value)? }
        }
    };
    debug!(rule = %rule, parameters = function.parameters.len(), "resolved eligibility rule");
    Ok(resolved)
}

fn resolve_children(rule: EligibilityRule, parameters: &[Parameter]) -> Result<Vec<EvaluationFunction>> {
    if parameters.is_empty() {
        return Err(OncomatchError::invalid_parameters(rule.as_str(), "expected at least one nested function"));
    }
    parameters
        .iter()
        .map(|parameter| match parameter {
            Parameter::Function(child) => resolve(child),
            _ => Err(OncomatchError::invalid_parameters(rule.as_str(), "expected nested functions only")),
        })
        .collect()
}

fn resolve_single_child(rule: EligibilityRule, parameters: &[Parameter]) -> Result<EvaluationFunction> {
    match parameters {
        [Parameter::Function(child)] => resolve(child),
        _ => Err(OncomatchError::invalid_parameters(rule.as_str(), "expected exactly one nested function")),
    }
}

fn parse_value(rule: EligibilityRule, parameters: &[Parameter]) -> Result<RuleValue> {
    let input = rule.input();
    if input == RuleInput::None {
        return match parameters {
            [] => Ok(RuleValue::None),
            _ => Err(OncomatchError::invalid_parameters(
                rule.as_str(),
                format!("expected no parameters, got {}", parameters.len()),
            )),
        };
    }

    let [parameter] = parameters else {
        return Err(OncomatchError::invalid_parameters(
            rule.as_str(),
            format!("expected one parameter, got {}", parameters.len()),
        ));
    };
    let invalid = |reason: String| OncomatchError::invalid_parameters(rule.as_str(), reason);

    match (input, parameter) {
        (_, Parameter::Function(_)) => Err(invalid("nested functions are only accepted by composites".into())),
        (RuleInput::OneInteger, Parameter::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(RuleValue::Integer)
            .map_err(|_| invalid(format!("'{text}' is not an integer"))),
        (RuleInput::OneInteger, Parameter::Number(n)) if n.fract() == 0.0 && n.is_finite() => {
            Ok(RuleValue::Integer(*n as i64))
        }
        (RuleInput::OneInteger, Parameter::Number(n)) => Err(invalid(format!("{n} is not an integer"))),
        (RuleInput::OneDouble, Parameter::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(RuleValue::Double(n)),
            _ => Err(invalid(format!("'{text}' is not a number"))),
        },
        (RuleInput::OneDouble, Parameter::Number(n)) if n.is_finite() => Ok(RuleValue::Double(*n)),
        (RuleInput::OneDouble, Parameter::Number(n)) => Err(invalid(format!("{n} is not a finite number"))),
        (RuleInput::OneString, Parameter::Text(text)) if !text.trim().is_empty() => {
            Ok(RuleValue::Text(text.trim().to_string()))
        }
        (RuleInput::OneString, Parameter::Text(_)) => Err(invalid("expected a non-empty text value".into())),
        (RuleInput::OneGene, Parameter::Text(gene)) => {
            if gene.is_empty() || gene.chars().any(char::is_whitespace) {
                Err(invalid(format!("'{gene}' is not a gene symbol")))
            } else {
                Ok(RuleValue::Gene(gene.clone()))
            }
        }
        (RuleInput::OneIcdCode, Parameter::Text(code)) => IcdCode::parse(code)
            .map(RuleValue::IcdCode)
            .map_err(|e| invalid(e.to_string())),
        (_, Parameter::Number(n)) => Err(invalid(format!("unexpected numeric parameter {n}"))),
        (RuleInput::None | RuleInput::OneOrMoreFunctions | RuleInput::OneFunction, Parameter::Text(_)) => {
            Err(invalid("unexpected text parameter".into()))
        }
    }
}

impl RuleValue {
    fn mismatch(rule: EligibilityRule, expected: &str) -> OncomatchError {
        OncomatchError::invalid_parameters(rule.as_str(), format!("expected {expected}"))
    }

    pub fn into_integer(self, rule: EligibilityRule) -> Result<i64> {
        match self {
            RuleValue::Integer(n) => Ok(n),
            _ => Err(Self::mismatch(rule, "an integer")),
        }
    }

    pub fn into_double(self, rule: EligibilityRule) -> Result<f64> {
        match self {
            RuleValue::Double(n) => Ok(n),
            _ => Err(Self::mismatch(rule, "a number")),
        }
    }

    pub fn into_text(self, rule: EligibilityRule) -> Result<String> {
        match self {
            RuleValue::Text(text) => Ok(text),
            _ => Err(Self::mismatch(rule, "a text value")),
        }
    }

    pub fn into_gene(self, rule: EligibilityRule) -> Result<String> {
        match self {
            RuleValue::Gene(gene) => Ok(gene),
            _ => Err(Self::mismatch(rule, "a gene")),
        }
    }

    pub fn into_icd_code(self, rule: EligibilityRule) -> Result<IcdCode> {
        match self {
            RuleValue::IcdCode(code) => Ok(code),
            _ => Err(Self::mismatch(rule, "an ICD code")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(rule: &str, parameters: Vec<Parameter>) -> EligibilityFunction {
        EligibilityFunction::new(rule, parameters)
    }

    #[test]
    fn test_resolves_nested_tree() {
        let tree = leaf(
            "AND",
            vec![
                leaf("IS_AT_LEAST_X_YEARS_OLD", vec!["18".into()]).into(),
                leaf("NOT", vec![leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec![]).into()]).into(),
            ],
        );
        let resolved = resolve(&tree).unwrap();
        let EvaluationFunction::And(children) = resolved else {
            panic!("expected AND");
        };
        assert_eq!(children[0].rule(), EligibilityRule::IsAtLeastXYearsOld);
        assert_eq!(children[1].rule(), EligibilityRule::Not);
    }

    #[test]
    fn test_integer_accepts_text_and_whole_numbers() {
        assert_eq!(
            parse_value(EligibilityRule::IsAtLeastXYearsOld, &["18".into()]).unwrap(),
            RuleValue::Integer(18)
        );
        assert_eq!(
            parse_value(EligibilityRule::IsAtLeastXYearsOld, &[Parameter::Number(18.0)]).unwrap(),
            RuleValue::Integer(18)
        );
        assert!(parse_value(EligibilityRule::IsAtLeastXYearsOld, &[Parameter::Number(18.5)]).is_err());
        assert!(parse_value(EligibilityRule::IsAtLeastXYearsOld, &["eighteen".into()]).is_err());
    }

    #[test]
    fn test_wrong_arity_fails() {
        let err = resolve(&leaf("TMB_OF_AT_LEAST_X", vec!["10".into(), "12".into()])).unwrap_err();
        assert!(matches!(err, OncomatchError::InvalidParameters { .. }));

        let err = resolve(&leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec!["yes".into()])).unwrap_err();
        assert!(matches!(err, OncomatchError::InvalidParameters { .. }));
    }

    #[test]
    fn test_composite_requires_children() {
        assert!(matches!(resolve(&leaf("OR", vec![])), Err(OncomatchError::InvalidParameters { .. })));
        assert!(matches!(
            resolve(&leaf("NOT", vec![leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec![]).into(), leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec![]).into()])),
            Err(OncomatchError::InvalidParameters { .. })
        ));
        assert!(matches!(resolve(&leaf("AND", vec!["18".into()])), Err(OncomatchError::InvalidParameters { .. })));
    }

    #[test]
    fn test_leaf_rejects_nested_function() {
        let tree = leaf("IS_AT_LEAST_X_YEARS_OLD", vec![leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec![]).into()]);
        assert!(matches!(resolve(&tree), Err(OncomatchError::InvalidParameters { .. })));
    }

    #[test]
    fn test_unknown_rule_inside_tree_fails_fast() {
        let tree = leaf("OR", vec![leaf("HAS_KNOWN_ACTIVE_CNS_METASTASES", vec![]).into(), leaf("IS_TALL", vec![]).into()]);
        assert!(matches!(resolve(&tree), Err(OncomatchError::UnknownRule(name)) if name == "IS_TALL"));
    }

    #[test]
    fn test_icd_and_gene_parameters() {
        assert_eq!(
            parse_value(EligibilityRule::HasHistoryOfConditionWithIcdCodeX, &["2C25&XH7SY3".into()]).unwrap(),
            RuleValue::IcdCode(IcdCode::with_extension("2C25", "XH7SY3"))
        );
        assert!(parse_value(EligibilityRule::HasHistoryOfConditionWithIcdCodeX, &["not a code".into()]).is_err());
        assert_eq!(
            parse_value(EligibilityRule::InactivationOfGeneX, &["TP53".into()]).unwrap(),
            RuleValue::Gene("TP53".to_string())
        );
        assert!(parse_value(EligibilityRule::InactivationOfGeneX, &["".into()]).is_err());
    }

    #[test]
    fn test_text_parameter_is_trimmed_and_required() {
        assert_eq!(
            parse_value(EligibilityRule::HasPrimaryTumorTypeX, &[" melanoma ".into()]).unwrap(),
            RuleValue::Text("melanoma".to_string())
        );
        assert!(parse_value(EligibilityRule::HasPrimaryTumorTypeX, &["  ".into()]).is_err());
        assert!(parse_value(EligibilityRule::HasPrimaryTumorTypeX, &[Parameter::Number(3.0)]).is_err());
    }
}
