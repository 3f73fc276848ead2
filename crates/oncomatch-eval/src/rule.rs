//! Closed registry of eligibility rule identifiers and their input shapes.

use std::fmt;
use std::str::FromStr;

use oncomatch_common::OncomatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EligibilityRule {
    // ── Composites ──
    And,
    Or,
    Not,
    WarnIf,
    // ── General ──
    IsAtLeastXYearsOld,
    HasWhoStatusOfAtMostX,
    // ── Tumor ──
    HasKnownActiveCnsMetastases,
    HasPrimaryTumorTypeX,
    // ── Comorbidity ──
    HasHistoryOfConditionWithIcdCodeX,
    // ── Molecular ──
    ActivatingMutationInGeneX,
    InactivationOfGeneX,
    TmbOfAtLeastX,
}

/// Positional parameter shape a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleInput {
    None,
    OneInteger,
    OneDouble,
    OneString,
    OneGene,
    OneIcdCode,
    OneOrMoreFunctions,
    OneFunction,
}

impl EligibilityRule {
    pub const ALL: [EligibilityRule; 12] = [
        EligibilityRule::And,
        EligibilityRule::Or,
        EligibilityRule::Not,
        EligibilityRule::WarnIf,
        EligibilityRule::IsAtLeastXYearsOld,
        EligibilityRule::HasWhoStatusOfAtMostX,
        EligibilityRule::HasKnownActiveCnsMetastases,
        EligibilityRule::HasPrimaryTumorTypeX,
        EligibilityRule::HasHistoryOfConditionWithIcdCodeX,
        EligibilityRule::ActivatingMutationInGeneX,
        EligibilityRule::InactivationOfGeneX,
        EligibilityRule::TmbOfAtLeastX,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EligibilityRule::And => "AND",
            EligibilityRule::Or => "OR",
            EligibilityRule::Not => "NOT",
            EligibilityRule::WarnIf => "WARN_IF",
            EligibilityRule::IsAtLeastXYearsOld => "IS_AT_LEAST_X_YEARS_OLD",
            EligibilityRule::HasWhoStatusOfAtMostX => "HAS_WHO_STATUS_OF_AT_MOST_X",
            EligibilityRule::HasKnownActiveCnsMetastases => "HAS_KNOWN_ACTIVE_CNS_METASTASES",
            EligibilityRule::HasPrimaryTumorTypeX => "HAS_PRIMARY_TUMOR_TYPE_X",
            EligibilityRule::HasHistoryOfConditionWithIcdCodeX => "HAS_HISTORY_OF_CONDITION_WITH_ICD_CODE_X",
            EligibilityRule::ActivatingMutationInGeneX => "ACTIVATING_MUTATION_IN_GENE_X",
            EligibilityRule::InactivationOfGeneX => "INACTIVATION_OF_GENE_X",
            EligibilityRule::TmbOfAtLeastX => "TMB_OF_AT_LEAST_X",
        }
    }

    pub fn input(&self) -> RuleInput {
        match self {
            EligibilityRule::And | EligibilityRule::Or => RuleInput::OneOrMoreFunctions,
            EligibilityRule::Not | EligibilityRule::WarnIf => RuleInput::OneFunction,
            EligibilityRule::IsAtLeastXYearsOld | EligibilityRule::HasWhoStatusOfAtMostX => RuleInput::OneInteger,
            EligibilityRule::HasKnownActiveCnsMetastases => RuleInput::None,
            EligibilityRule::HasPrimaryTumorTypeX => RuleInput::OneString,
            EligibilityRule::HasHistoryOfConditionWithIcdCodeX => RuleInput::OneIcdCode,
            EligibilityRule::ActivatingMutationInGeneX | EligibilityRule::InactivationOfGeneX => RuleInput::OneGene,
            EligibilityRule::TmbOfAtLeastX => RuleInput::OneDouble,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.input(), RuleInput::OneOrMoreFunctions | RuleInput::OneFunction)
    }
}

impl FromStr for EligibilityRule {
    type Err = OncomatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EligibilityRule::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| OncomatchError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for EligibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
