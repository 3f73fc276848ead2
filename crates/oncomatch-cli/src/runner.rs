//! One batch pass: load inputs, evaluate the rule tree, rank treatments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use oncomatch_common::{PatientRecord, Variant};
use oncomatch_eval::{resolve, EligibilityFunction, Evaluation, EvaluationContext, IcdModel, IcdNode};
use oncomatch_molecular::{DndsDatabase, GeneDriverLikelihoodModel, MutationBurden};
use oncomatch_ranker::{RankedTreatment, TreatmentEvidence, TreatmentRanker};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{BackgroundConfig, Config};

#[derive(Debug, Clone)]
pub struct Inputs {
    pub patient: PathBuf,
    pub rules: PathBuf,
    pub evidence: Option<PathBuf>,
    pub icd: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub patient_id: String,
    pub reference_date: NaiveDate,
    pub evaluation: Evaluation,
    pub ranked_treatments: Vec<RankedTreatment>,
}

pub fn run(inputs: &Inputs, config: &Config) -> anyhow::Result<Report> {
    let run_id = Uuid::new_v4();
    let reference_date = config.reference_date();
    info!(%run_id, %reference_date, "Starting evaluation run");

    let patient: PatientRecord = read_json(&inputs.patient)?;
    let function: EligibilityFunction = read_json(&inputs.rules)?;
    let tree = resolve(&function).context("resolving eligibility rule tree")?;

    let icd_model = match &inputs.icd {
        Some(path) => IcdModel::from_nodes(read_json::<Vec<IcdNode>>(path)?)?,
        None => {
            warn!("No ICD ontology supplied; codes match only themselves");
            IcdModel::default()
        }
    };
    let dnds = load_background(&config.background, &patient)?;

    let ctx = EvaluationContext {
        reference_date,
        icd_model: &icd_model,
        dnds: &dnds,
        driver_likelihood_high: config.evaluation.driver_likelihood_high,
        driver_likelihood_low: config.evaluation.driver_likelihood_low,
    };
    let evaluation = tree
        .evaluate(&ctx, &patient)
        .with_context(|| format!("evaluating patient {}", patient.patient_id))?;
    info!(patient = %patient.patient_id, result = evaluation.result.as_str(), "Evaluation complete");

    let ranked_treatments = match &inputs.evidence {
        Some(path) => {
            let evidence: Vec<TreatmentEvidence> = read_json(path)?;
            let evidence = attach_driver_likelihoods(evidence, &patient, &dnds)?;
            let mut ranked = TreatmentRanker::new(config.ranking.weights.clone())?.rank(&evidence);
            ranked.truncate(config.ranking.top_n);
            ranked
        }
        None => Vec::new(),
    };

    Ok(Report {
        run_id,
        patient_id: patient.patient_id.clone(),
        reference_date,
        evaluation,
        ranked_treatments,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Background statistics are sample-specific: passenger rates scale with the
/// patient's mutation burden.
fn load_background(config: &BackgroundConfig, patient: &PatientRecord) -> anyhow::Result<DndsDatabase> {
    let (Some(onco), Some(tsg)) = (&config.onco_table, &config.tsg_table) else {
        warn!("No dN/dS tables configured; variants of unknown significance cannot be scored");
        return Ok(DndsDatabase::empty());
    };
    let burden = patient
        .molecular
        .as_ref()
        .and_then(|m| MutationBurden::for_record(m, config.genome_size_mb, config.snv_indel_ratio));
    let Some(burden) = burden else {
        warn!(patient = %patient.patient_id, "No mutation burden available; skipping dN/dS background");
        return Ok(DndsDatabase::empty());
    };
    DndsDatabase::from_paths(onco, tsg, &burden).context("loading dN/dS background statistics")
}

/// Fill in the driver likelihood of evidence events observed in the patient.
///
/// The likelihood is a gene-level estimate over all reportable variants in the
/// event's gene, so a second hit in a tumor suppressor raises it.
fn attach_driver_likelihoods(
    evidence: Vec<TreatmentEvidence>,
    patient: &PatientRecord,
    dnds: &DndsDatabase,
) -> anyhow::Result<Vec<TreatmentEvidence>> {
    let Some(molecular) = &patient.molecular else {
        return Ok(evidence);
    };
    let by_event: HashMap<&str, &Variant> = molecular.variants.iter().map(|v| (v.event.as_str(), v)).collect();
    let model = GeneDriverLikelihoodModel::new(dnds);
    let mut per_gene: HashMap<&str, Option<f64>> = HashMap::new();

    evidence
        .into_iter()
        .map(|mut item| -> anyhow::Result<TreatmentEvidence> {
            if item.driver_likelihood.is_some() {
                return Ok(item);
            }
            let Some(variant) = by_event.get(item.event.as_str()) else {
                return Ok(item);
            };
            let gene = variant.gene.as_str();
            let likelihood = match per_gene.get(gene) {
                Some(cached) => *cached,
                None => {
                    let reportable = molecular.variants_in_gene(gene).filter(|v| v.is_reportable);
                    let estimate = model.evaluate(gene, variant.gene_role, reportable)?.map(|l| l.likelihood);
                    per_gene.insert(gene, estimate);
                    estimate
                }
            };
            item.driver_likelihood = likelihood;
            Ok(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncomatch_common::{CodingEffect, GeneRole, ProteinEffect};
    use oncomatch_eval::EvaluationResult;
    use oncomatch_molecular::{DndsDriverGeneLikelihood, DndsDriverType};
    use oncomatch_test_utils::{variant, PatientBuilder};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(value).unwrap().as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_run_produces_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut hotspot = variant("BRAF", "BRAF V600E", GeneRole::Onco, CodingEffect::Missense);
        hotspot.protein_effect = ProteinEffect::GainOfFunction;
        let patient = PatientBuilder::new().birth_year(1965).who_status(1).variant(hotspot).build();

        let rules = serde_json::json!({"rule": "AND", "parameters": [
            {"rule": "IS_AT_LEAST_X_YEARS_OLD", "parameters": ["18"]},
            {"rule": "ACTIVATING_MUTATION_IN_GENE_X", "parameters": ["BRAF"]}
        ]});
        let evidence = serde_json::json!([
            {"treatment": "Dabrafenib", "event": "BRAF V600E", "tier": "APPROVED", "direction": "BENEFIT",
             "tumor_match": "SPECIFIC_TYPE", "variant_match": "EXACT"},
            {"treatment": "Cetuximab", "event": "BRAF V600E", "tier": "PHASE_II", "direction": "RESISTANCE",
             "tumor_match": "SPECIFIC_TYPE", "variant_match": "EXACT"}
        ]);

        let inputs = Inputs {
            patient: write_json(dir.path(), "patient.json", &patient),
            rules: write_json(dir.path(), "rules.json", &rules),
            evidence: Some(write_json(dir.path(), "evidence.json", &evidence)),
            icd: None,
        };
        let mut config = Config::default();
        config.evaluation.reference_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        config.ranking.top_n = 1;

        let report = run(&inputs, &config).unwrap();
        assert_eq!(report.patient_id, "TEST-01");
        assert_eq!(report.evaluation.result, EvaluationResult::Pass);
        assert_eq!(report.ranked_treatments.len(), 1);
        assert_eq!(report.ranked_treatments[0].treatment, "Dabrafenib");
        assert_eq!(report.ranked_treatments[0].score, 18.0);
    }

    #[test]
    fn test_driver_likelihood_covers_every_hit_in_gene() {
        let dnds = DndsDatabase::empty()
            .with(GeneRole::Tsg, "TP53", DndsDriverType::Nonsense, DndsDriverGeneLikelihood {
                drivers_per_sample: 0.05,
                probability_variant_non_driver: 0.5,
            })
            .unwrap()
            .with(GeneRole::Tsg, "TP53", DndsDriverType::Missense, DndsDriverGeneLikelihood {
                drivers_per_sample: 0.02,
                probability_variant_non_driver: 0.6,
            })
            .unwrap();
        let mut filtered = variant("TP53", "TP53 G245S", GeneRole::Tsg, CodingEffect::Missense);
        filtered.is_reportable = false;
        let evidence: Vec<TreatmentEvidence> = serde_json::from_value(serde_json::json!([
            {"treatment": "APR-246", "event": "TP53 R213*", "tier": "PHASE_II", "direction": "BENEFIT",
             "tumor_match": "SPECIFIC_TYPE", "variant_match": "EXACT"},
            {"treatment": "Adavosertib", "event": "TP53 R175H", "tier": "PHASE_II", "direction": "BENEFIT",
             "tumor_match": "SPECIFIC_TYPE", "variant_match": "EXACT"},
            {"treatment": "Unmatched", "event": "EGFR L858R", "tier": "APPROVED", "direction": "BENEFIT",
             "tumor_match": "SPECIFIC_TYPE", "variant_match": "EXACT"}
        ]))
        .unwrap();

        let single_hit = PatientBuilder::new()
            .variant(variant("TP53", "TP53 R213*", GeneRole::Tsg, CodingEffect::NonsenseOrFrameshift))
            .variant(filtered.clone())
            .build();
        let attached = attach_driver_likelihoods(evidence.clone(), &single_hit, &dnds).unwrap();
        let single = attached[0].driver_likelihood.unwrap();
        assert!((single - 0.05 / 0.525).abs() < 1e-12);

        let two_hits = PatientBuilder::new()
            .variant(variant("TP53", "TP53 R213*", GeneRole::Tsg, CodingEffect::NonsenseOrFrameshift))
            .variant(variant("TP53", "TP53 R175H", GeneRole::Tsg, CodingEffect::Missense))
            .variant(filtered)
            .build();
        let attached = attach_driver_likelihoods(evidence, &two_hits, &dnds).unwrap();
        let joint = attached[0].driver_likelihood.unwrap();
        assert!((joint - 0.05 / 0.335).abs() < 1e-12);
        assert!(joint > single);
        assert_eq!(attached[1].driver_likelihood, Some(joint));
        assert_eq!(attached[2].driver_likelihood, None);
    }

    #[test]
    fn test_unknown_rule_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = Inputs {
            patient: write_json(dir.path(), "patient.json", &PatientBuilder::new().build()),
            rules: write_json(dir.path(), "rules.json", &serde_json::json!({"rule": "IS_LUCKY"})),
            evidence: None,
            icd: None,
        };
        let err = run(&inputs, &Config::default()).unwrap_err();
        assert!(format!("{err:#}").contains("IS_LUCKY"));
    }

    #[test]
    fn test_missing_patient_file_is_reported() {
        let inputs = Inputs {
            patient: PathBuf::from("/nonexistent/patient.json"),
            rules: PathBuf::from("/nonexistent/rules.json"),
            evidence: None,
            icd: None,
        };
        let err = run(&inputs, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("patient.json"));
    }
}
