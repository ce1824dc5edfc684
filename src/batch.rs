//! Parallel block generation for many intake profiles using rayon

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::block::{GenerationMode, PlanBlock};
use crate::catalog::CatalogProvider;
use crate::error::{CoachPlanError, Result};
use crate::export::json::read_document;
use crate::models::IntakeProfile;

/// Configuration for batch generation
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker threads, rayon's default (one per CPU) when unset
    pub num_threads: Option<usize>,
    pub mode: GenerationMode,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            mode: GenerationMode::Full,
        }
    }
}

/// Outcome for one input of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    /// Client id, file path or position of the input
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<PlanBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub generated: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub items: Vec<BatchItem>,
}

impl BatchSummary {
    fn from_items(items: Vec<BatchItem>, started: Instant) -> Self {
        let generated = items.iter().filter(|i| i.block.is_some()).count();
        Self {
            total: items.len(),
            generated,
            failed: items.len() - generated,
            duration_ms: started.elapsed().as_millis(),
            items,
        }
    }

    pub fn is_fully_successful(&self) -> bool {
        self.failed == 0
    }

    pub fn blocks(&self) -> impl Iterator<Item = &PlanBlock> {
        self.items.iter().filter_map(|i| i.block.as_ref())
    }

    /// Blocks per second
    pub fn throughput(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        (self.generated as f64 / self.duration_ms as f64) * 1000.0
    }
}

pub struct BatchGenerator {
    pub config: BatchConfig,
}

impl BatchGenerator {
    pub fn new() -> Self {
        Self::with_config(BatchConfig::default())
    }

    pub fn with_config(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Generate a block for every profile; output order follows input order
    pub fn generate(
        &self,
        profiles: &[IntakeProfile],
        catalog: &dyn CatalogProvider,
    ) -> Result<BatchSummary> {
        let started = Instant::now();
        info!("Starting batch generation of {} profiles", profiles.len());

        let mode = self.config.mode;
        let items = self.run(|| {
            profiles
                .par_iter()
                .enumerate()
                .map(|(index, profile)| {
                    let source = profile
                        .client_id
                        .clone()
                        .unwrap_or_else(|| format!("#{}", index + 1));
                    debug!(source = %source, "Generating block");
                    BatchItem {
                        source,
                        block: Some(PlanBlock::generate(profile.clone(), mode, catalog)),
                        error: None,
                    }
                })
                .collect()
        })?;

        let summary = BatchSummary::from_items(items, started);
        info!(
            generated = summary.generated,
            duration_ms = summary.duration_ms as u64,
            "Batch generation finished"
        );
        Ok(summary)
    }

    /// Read profile documents and generate a block for each
    ///
    /// Files that cannot be read or parsed are reported per item; they do not
    /// stop the batch.
    pub fn generate_from_files(
        &self,
        paths: &[PathBuf],
        catalog: &dyn CatalogProvider,
    ) -> Result<BatchSummary> {
        let started = Instant::now();
        info!("Starting batch generation of {} profile files", paths.len());

        let mode = self.config.mode;
        let items = self.run(|| {
            paths
                .par_iter()
                .map(|path| Self::generate_file(path, mode, catalog))
                .collect()
        })?;

        let summary = BatchSummary::from_items(items, started);
        if !summary.is_fully_successful() {
            warn!(failed = summary.failed, "Some profiles could not be processed");
        }
        Ok(summary)
    }

    fn generate_file(
        path: &Path,
        mode: GenerationMode,
        catalog: &dyn CatalogProvider,
    ) -> BatchItem {
        let source = path.display().to_string();
        match read_document::<IntakeProfile, _>(path, "intake profile") {
            Ok(profile) => BatchItem {
                source,
                block: Some(PlanBlock::generate(profile, mode, catalog)),
                error: None,
            },
            Err(e) => {
                warn!(path = %source, error = %e, "Skipping profile");
                BatchItem {
                    source,
                    block: None,
                    error: Some(e.user_message()),
                }
            }
        }
    }

    /// Run on a dedicated pool when a thread count is configured
    fn run<F>(&self, op: F) -> Result<Vec<BatchItem>>
    where
        F: FnOnce() -> Vec<BatchItem> + Send,
    {
        match self.config.num_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        CoachPlanError::Internal(format!("Failed to create thread pool: {}", e))
                    })?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profiles() -> Vec<IntakeProfile> {
        ["onderhoud", "marathon", "vetverlies", "hyrox"]
            .iter()
            .map(|goal| IntakeProfile::new(*goal, 4, 50))
            .collect()
    }

    #[test]
    fn test_batch_preserves_order() {
        let generator = BatchGenerator::with_config(BatchConfig {
            num_threads: Some(2),
            mode: GenerationMode::Full,
        });
        let summary = generator.generate(&profiles(), Catalog::builtin()).unwrap();

        assert_eq!(summary.total, 4);
        assert!(summary.is_fully_successful());
        let goals: Vec<&str> = summary.blocks().map(|b| b.training.goal.as_str()).collect();
        assert_eq!(goals, vec!["onderhoud", "marathon", "vetverlies", "hyrox"]);
        assert_eq!(summary.items[0].source, "#1");
    }

    #[test]
    fn test_batch_reports_bad_files() {
        let mut good = NamedTempFile::new().unwrap();
        write!(good, r#"{{"goal": "prestatie", "days_per_week": 5}}"#).unwrap();
        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();

        let paths = vec![good.path().to_path_buf(), bad.path().to_path_buf()];
        let summary = BatchGenerator::new()
            .generate_from_files(&paths, Catalog::builtin())
            .unwrap();

        assert_eq!(summary.generated, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.items[1].error.is_some());
    }
}
