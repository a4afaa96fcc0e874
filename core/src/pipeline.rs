//! The generation run: one pass, top to bottom.
//!
//! EXECUTION ORDER (fixed):
//!   1. Validate config
//!   2. Record assembler (draws categories, calls the synthesizer)
//!   3. Derived-metrics pass
//!   4. Summary aggregation
//!
//! RULES:
//!   - One CampaignRng per run, built from config.seed.
//!   - The anchor date is an input; nothing here reads the clock.
//!   - Artifacts are written only by write_artifacts().

use crate::{
    config::GeneratorConfig,
    dataset,
    derived,
    error::GenResult,
    generator::assemble_campaigns,
    record::CampaignRecord,
    report::{self, Summary},
    rng::CampaignRng,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const DATASET_FILE: &str = "campaign_data.csv";
pub const INFO_FILE: &str = "campaign_dataset_info.txt";
pub const SUMMARY_JSON_FILE: &str = "campaign_summary.json";

/// Paths of the files produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dataset: PathBuf,
    pub info: PathBuf,
    pub summary_json: Option<PathBuf>,
}

pub struct GenerationRun {
    pub config: GeneratorConfig,
    pub anchor: NaiveDate,
    pub records: Vec<CampaignRecord>,
    pub summary: Summary,
}

impl GenerationRun {
    /// Generate the full dataset for `config`, ending the window on `anchor`.
    pub fn execute(config: GeneratorConfig, anchor: NaiveDate) -> GenResult<Self> {
        config.validate()?;
        config.check_anchor(anchor)?;
        log::info!(
            "Generating {} campaigns (seed={}, window {} to {})",
            config.campaign_count,
            config.seed,
            config.window_start(anchor),
            anchor
        );

        let mut rng = CampaignRng::new(config.seed);
        let drafts = assemble_campaigns(&config, anchor, &mut rng);
        let records = derived::finalize(drafts);
        let summary = Summary::from_records(&records);

        log::info!(
            "Generated {} campaigns: budget={:.2} revenue={:.2}",
            summary.record_count,
            summary.total_budget,
            summary.total_revenue
        );
        Ok(Self { config, anchor, records, summary })
    }

    /// Write the dataset and info file into `out_dir`, creating it if needed.
    pub fn write_artifacts(&self, out_dir: &Path, with_summary_json: bool) -> GenResult<ArtifactPaths> {
        std::fs::create_dir_all(out_dir)?;

        let dataset_path = out_dir.join(DATASET_FILE);
        dataset::write_csv(&dataset_path, &self.records)?;

        let info_path = out_dir.join(INFO_FILE);
        report::write_info(&info_path, &self.summary)?;

        let summary_json = if with_summary_json {
            let path = out_dir.join(SUMMARY_JSON_FILE);
            std::fs::write(&path, serde_json::to_string_pretty(&self.summary)?)?;
            log::info!("Wrote summary JSON to {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(ArtifactPaths { dataset: dataset_path, info: info_path, summary_json })
    }

    pub fn console_report(&self) -> String {
        report::console_report(&self.summary, &self.records)
    }
}
