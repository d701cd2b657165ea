use std::path::{Path, PathBuf};
use std::sync::Arc;
use usine_core::{AppConfig, UsineError, UsineResult};
use usine_domain::FacilityDataset;
use usine_export::{ExportFormat, Orientation, ReportOptions};

/// Data snapshot and configuration shared by every command.
pub struct CliContext {
    pub dataset: Arc<FacilityDataset>,
    pub config: AppConfig,
}

impl CliContext {
    pub async fn load(file_path: &Path, config_path: Option<&Path>) -> UsineResult<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };

        if !tokio::fs::try_exists(file_path).await? {
            return Err(UsineError::NotFound(format!(
                "Data file not found: {}",
                file_path.display()
            )));
        }

        let content = tokio::fs::read_to_string(file_path).await?;
        let dataset = FacilityDataset::from_json(&content).map_err(|e| {
            UsineError::Serialization(format!("Invalid data file {}: {}", file_path.display(), e))
        })?;
        tracing::debug!(
            "Loaded {} employees from {}",
            dataset.employees.len(),
            file_path.display()
        );

        Ok(Self {
            dataset: Arc::new(dataset),
            config,
        })
    }

    /// Config defaults with the command-line overrides applied on top.
    pub fn report_options(&self, format: ExportFormat, landscape: bool) -> ReportOptions {
        let mut options = ReportOptions::from_config(&self.config, format);
        if landscape {
            options.page.orientation = Orientation::Landscape;
        }
        options
    }

    pub fn output_dir(&self, requested: Option<PathBuf>) -> PathBuf {
        requested.unwrap_or_else(|| self.config.effective_output_dir())
    }
}
