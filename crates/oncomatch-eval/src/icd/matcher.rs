//! Hierarchical ICD code matching.
//!
//! A record code matches a target when the target's main code appears in the
//! record main code's ancestor chain, so a more specific record code still
//! matches a broader target. When the target carries an extension code the
//! same test runs on the extension axis. A record whose main code matches but
//! which has no extension is kept apart: the extension was simply not
//! recorded, which is not the same as a mismatch.

use oncomatch_common::{Comorbidity, IcdCode};

use crate::icd::model::IcdOntology;

/// A record carrying zero or more ICD codes.
pub trait IcdCodeEntity {
    fn icd_codes(&self) -> &[IcdCode];
}

impl IcdCodeEntity for Comorbidity {
    fn icd_codes(&self) -> &[IcdCode] {
        &self.icd_codes
    }
}

/// Disjoint classification of records against a set of target codes.
#[derive(Debug)]
pub struct IcdMatches<'a, T> {
    pub full_matches: Vec<&'a T>,
    pub main_code_matches_with_unknown_extension: Vec<&'a T>,
}

impl<'a, T> IcdMatches<'a, T> {
    fn none() -> Self {
        Self {
            full_matches: Vec::new(),
            main_code_matches_with_unknown_extension: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_matches.is_empty() && self.main_code_matches_with_unknown_extension.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CodeMatch {
    None,
    MainWithUnknownExtension,
    Full,
}

/// Classify `instances` against `targets`. `None` instances yield no matches.
pub fn find_instances_matching_any_icd_code<'a, T: IcdCodeEntity>(
    ontology: &dyn IcdOntology,
    instances: Option<&'a [T]>,
    targets: &[IcdCode],
) -> IcdMatches<'a, T> {
    let Some(instances) = instances else {
        return IcdMatches::none();
    };

    let mut matches = IcdMatches::none();
    for instance in instances {
        let best = instance
            .icd_codes()
            .iter()
            .flat_map(|code| targets.iter().map(move |target| (code, target)))
            .map(|(code, target)| match_code(ontology, code, target))
            .max()
            .unwrap_or(CodeMatch::None);

        match best {
            CodeMatch::Full => matches.full_matches.push(instance),
            CodeMatch::MainWithUnknownExtension => {
                matches.main_code_matches_with_unknown_extension.push(instance)
            }
            CodeMatch::None => {}
        }
    }
    matches
}

fn match_code(ontology: &dyn IcdOntology, code: &IcdCode, target: &IcdCode) -> CodeMatch {
    if !descends_from(ontology, &code.main_code, &target.main_code) {
        return CodeMatch::None;
    }

    match (&target.extension_code, &code.extension_code) {
        (None, _) => CodeMatch::Full,
        (Some(_), None) => CodeMatch::MainWithUnknownExtension,
        (Some(target_ext), Some(ext)) if descends_from(ontology, ext, target_ext) => CodeMatch::Full,
        (Some(_), Some(_)) => CodeMatch::None,
    }
}

fn descends_from(ontology: &dyn IcdOntology, code: &str, ancestor: &str) -> bool {
    ontology.ancestors_of(code).iter().any(|c| c == ancestor)
}
