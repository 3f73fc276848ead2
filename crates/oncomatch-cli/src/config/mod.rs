//! Configuration loading for oncomatch.
//! Reads oncomatch.toml from the current directory or the path in the
//! ONCOMATCH_CONFIG env var. YAML files are accepted by extension.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use oncomatch_molecular::dnds::{GENOME_SIZE_MB, SNV_INDEL_RATIO};
use oncomatch_ranker::ScoringWeights;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Date ages and other time-dependent criteria are evaluated at. Defaults to today.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    #[serde(default = "default_likelihood_high")]
    pub driver_likelihood_high: f64,
    #[serde(default = "default_likelihood_low")]
    pub driver_likelihood_low: f64,
}

fn default_likelihood_high() -> f64 { 0.8 }
fn default_likelihood_low()  -> f64 { 0.2 }

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            reference_date: None,
            driver_likelihood_high: default_likelihood_high(),
            driver_likelihood_low: default_likelihood_low(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Tab-separated dN/dS table for oncogenes
    #[serde(default)]
    pub onco_table: Option<PathBuf>,
    /// Tab-separated dN/dS table for tumor suppressor genes
    #[serde(default)]
    pub tsg_table: Option<PathBuf>,
    #[serde(default = "default_genome_size_mb")]
    pub genome_size_mb: f64,
    #[serde(default = "default_snv_indel_ratio")]
    pub snv_indel_ratio: f64,
}

fn default_genome_size_mb()  -> f64 { GENOME_SIZE_MB }
fn default_snv_indel_ratio() -> f64 { SNV_INDEL_RATIO }

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            onco_table: None,
            tsg_table: None,
            genome_size_mb: default_genome_size_mb(),
            snv_indel_ratio: default_snv_indel_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(flatten)]
    pub weights: ScoringWeights,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize { 50 }

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            top_n: default_top_n(),
        }
    }
}


impl Config {
    /// Load configuration from oncomatch.toml.
    /// Checks ONCOMATCH_CONFIG env var first, then current directory; falls
    /// back to defaults when neither exists.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ONCOMATCH_CONFIG")
            .unwrap_or_else(|_| "oncomatch.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!("Config file not found: {path}; using defaults");
            return Ok(Self::default());
        }
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing YAML config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("parsing TOML config {}", path.display()))?,
        };
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let eval = &self.evaluation;
        if !(0.0 <= eval.driver_likelihood_low
            && eval.driver_likelihood_low <= eval.driver_likelihood_high
            && eval.driver_likelihood_high <= 1.0)
        {
            anyhow::bail!(
                "driver likelihood thresholds must satisfy 0 <= low ({}) <= high ({}) <= 1",
                eval.driver_likelihood_low,
                eval.driver_likelihood_high
            );
        }
        if !(self.background.genome_size_mb > 0.0 && self.background.snv_indel_ratio > 0.0) {
            anyhow::bail!("genome_size_mb and snv_indel_ratio must be positive");
        }
        if self.ranking.top_n == 0 {
            anyhow::bail!("ranking.top_n must be at least 1");
        }
        self.ranking.weights.validate()?;
        Ok(())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.evaluation
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
