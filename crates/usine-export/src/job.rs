//! Export jobs and the runner that drives them.
//!
//! A job moves strictly forward: `Pending -> Processing -> Completed | Failed`.
//! Jobs own all of their state, so several can run at once without locks.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use usine_core::{LogEntry, Loggable, UsineError, UsineResult};
use usine_domain::FacilityDataset;
use uuid::Uuid;

use crate::download::{deliver, DownloadTarget};
use crate::format::ExportFormat;
use crate::generators::generate;
use crate::report::{ExportedFile, ReportDomain, ReportOptions};

pub type JobId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Pending,
    Processing {
        started_at: DateTime<Utc>,
    },
    Completed {
        file: ExportedFile,
        path: Option<PathBuf>,
        completed_at: DateTime<Utc>,
    },
    Failed {
        reason: String,
        completed_at: DateTime<Utc>,
    },
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Pending => JobStatus::Pending,
            JobState::Processing { .. } => JobStatus::Processing,
            JobState::Completed { .. } => JobStatus::Completed,
            JobState::Failed { .. } => JobStatus::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub id: JobId,
    /// Which report configuration this job renders, e.g. `incidents.pdf`.
    pub config_id: String,
    pub domain: ReportDomain,
    pub format: ExportFormat,
    pub created_at: DateTime<Utc>,
    pub state: JobState,
    logs: Vec<LogEntry>,
}

impl ExportJob {
    pub fn new(domain: ReportDomain, format: ExportFormat) -> Self {
        let mut job = Self {
            id: Uuid::new_v4(),
            config_id: format!("{}.{}", domain.slug(), format.extension()),
            domain,
            format,
            created_at: Utc::now(),
            state: JobState::Pending,
            logs: Vec::new(),
        };
        job.add_log(format!("Job created for {}", job.config_id));
        job
    }

    pub fn status(&self) -> JobStatus {
        self.state.status()
    }

    fn invalid_transition(&self, target: JobStatus) -> UsineError {
        UsineError::Validation(format!(
            "Job {} cannot go from {:?} to {:?}",
            self.id,
            self.status(),
            target
        ))
    }

    pub fn start(&mut self) -> UsineResult<()> {
        if !matches!(self.state, JobState::Pending) {
            return Err(self.invalid_transition(JobStatus::Processing));
        }
        self.state = JobState::Processing {
            started_at: Utc::now(),
        };
        self.add_log("Processing started".to_string());
        Ok(())
    }

    pub fn complete(&mut self, file: ExportedFile, path: Option<PathBuf>) -> UsineResult<()> {
        if !matches!(self.state, JobState::Processing { .. }) {
            return Err(self.invalid_transition(JobStatus::Completed));
        }
        self.add_log(format!(
            "Completed {} with {} records",
            file.filename, file.record_count
        ));
        self.state = JobState::Completed {
            file,
            path,
            completed_at: Utc::now(),
        };
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> UsineResult<()> {
        if !matches!(self.state, JobState::Processing { .. }) {
            return Err(self.invalid_transition(JobStatus::Error));
        }
        let reason = reason.into();
        self.add_log(format!("Failed: {}", reason));
        self.state = JobState::Failed {
            reason,
            completed_at: Utc::now(),
        };
        Ok(())
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            JobState::Completed { completed_at, .. } | JobState::Failed { completed_at, .. } => {
                Some(*completed_at)
            }
            _ => None,
        }
    }

    pub fn record_count(&self) -> Option<usize> {
        match &self.state {
            JobState::Completed { file, .. } => Some(file.record_count),
            _ => None,
        }
    }

    pub fn summary(&self) -> JobSummary {
        let (filename, path, error) = match &self.state {
            JobState::Completed { file, path, .. } => {
                (Some(file.filename.clone()), path.clone(), None)
            }
            JobState::Failed { reason, .. } => (None, None, Some(reason.clone())),
            _ => (None, None, None),
        };
        JobSummary {
            id: self.id,
            config_id: self.config_id.clone(),
            domain: self.domain,
            status: self.status(),
            created_at: self.created_at,
            completed_at: self.completed_at(),
            record_count: self.record_count(),
            filename,
            path,
            error,
        }
    }
}

impl Loggable for ExportJob {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

/// Serializable view of a job, as reported to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub config_id: String,
    pub domain: ReportDomain,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs export jobs against one dataset snapshot.
pub struct ExportRunner {
    dataset: Arc<FacilityDataset>,
    options: ReportOptions,
    target: Option<Arc<dyn DownloadTarget>>,
}

impl ExportRunner {
    pub fn new(dataset: Arc<FacilityDataset>, options: ReportOptions) -> Self {
        Self {
            dataset,
            options,
            target: None,
        }
    }

    /// Deliver every completed document to `target`.
    pub fn with_target(mut self, target: Arc<dyn DownloadTarget>) -> Self {
        self.target = Some(target);
        self
    }

    /// Drives one job to a terminal state. Rendering happens on the
    /// blocking pool.
    pub async fn run(&self, mut job: ExportJob) -> ExportJob {
        if let Err(err) = job.start() {
            tracing::warn!("Skipping job {}: {}", job.id, err);
            return job;
        }

        let outcome = self.execute(&job).await;
        let transition = match outcome {
            Ok((file, path)) => job.complete(file, path),
            Err(err) => {
                tracing::warn!("Export {} failed: {}", job.config_id, err);
                job.fail(err.to_string())
            }
        };
        if let Err(err) = transition {
            tracing::warn!("Job {} left in {:?}: {}", job.id, job.status(), err);
        }
        job
    }

    /// Runs all jobs concurrently and returns them in submission order.
    pub async fn run_all(&self, jobs: Vec<ExportJob>) -> Vec<ExportJob> {
        join_all(jobs.into_iter().map(|job| self.run(job))).await
    }

    async fn execute(&self, job: &ExportJob) -> UsineResult<(ExportedFile, Option<PathBuf>)> {
        let dataset = Arc::clone(&self.dataset);
        let mut options = self.options.clone();
        options.format = job.format;
        let domain = job.domain;

        let file = tokio::task::spawn_blocking(move || generate(domain, &dataset, &options))
            .await
            .map_err(|err| UsineError::Internal(format!("Export task failed: {}", err)))??;

        let path = match &self.target {
            Some(target) => Some(deliver(target.as_ref(), &file).await?),
            None => None,
        };
        Ok((file, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::DirectoryTarget;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use mockall::mock;
    use tempfile::tempdir;
    use usine_domain::{Employee, Incident, Severity};

    mock! {
        Target {}

        #[async_trait]
        impl DownloadTarget for Target {
            async fn save(&self, file: &ExportedFile) -> UsineResult<PathBuf>;
        }
    }

    fn dataset() -> Arc<FacilityDataset> {
        let mut dataset = FacilityDataset::empty();
        dataset.employees = vec![
            Employee::new("Awa", "Diallo", "Logistique", "Cariste"),
            Employee::new("Marc", "Petit", "Maintenance", "Technicien"),
        ];
        dataset.incidents = vec![Incident::new(
            "Chute",
            Severity::Low,
            Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
        )];
        Arc::new(dataset)
    }

    fn options() -> ReportOptions {
        ReportOptions::new(ExportFormat::Pdf)
            .generated_at(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_linear_transitions() {
        let mut job = ExportJob::new(ReportDomain::Visits, ExportFormat::Pdf);
        assert_eq!(job.status(), JobStatus::Pending);
        assert_eq!(job.config_id, "visites.pdf");

        job.start().unwrap();
        assert_eq!(job.status(), JobStatus::Processing);
        job.fail("boom").unwrap();

        assert_eq!(job.status(), JobStatus::Error);
        assert!(job.state.is_terminal());
        assert!(job.completed_at().is_some());
        assert_eq!(job.get_logs().len(), 3);
        assert_eq!(job.last_log().unwrap().message, "Failed: boom");
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut job = ExportJob::new(ReportDomain::Visits, ExportFormat::Pdf);
        assert!(matches!(job.fail("early"), Err(UsineError::Validation(_))));

        job.start().unwrap();
        assert!(matches!(job.start(), Err(UsineError::Validation(_))));

        job.fail("boom").unwrap();
        assert!(matches!(job.start(), Err(UsineError::Validation(_))));
        assert!(matches!(job.fail("again"), Err(UsineError::Validation(_))));
        assert_eq!(job.status(), JobStatus::Error);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&JobStatus::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&JobStatus::Completed).unwrap(), "\"completed\"");
    }

    #[tokio::test]
    async fn test_run_completes_job() {
        let runner = ExportRunner::new(dataset(), options());

        let job = runner
            .run(ExportJob::new(ReportDomain::Employees, ExportFormat::Xlsx))
            .await;

        assert_eq!(job.status(), JobStatus::Completed);
        assert_eq!(job.record_count(), Some(2));
        let summary = job.summary();
        assert_eq!(summary.filename.as_deref(), Some("employes-2024-03-01.xlsx"));
        assert_eq!(summary.path, None);
    }

    #[tokio::test]
    async fn test_run_all_keeps_submission_order() {
        let runner = ExportRunner::new(dataset(), options());
        let jobs: Vec<ExportJob> = ReportDomain::ALL
            .iter()
            .map(|domain| ExportJob::new(*domain, ExportFormat::Pdf))
            .collect();
        let ids: Vec<JobId> = jobs.iter().map(|job| job.id).collect();

        let finished = runner.run_all(jobs).await;

        assert_eq!(finished.iter().map(|job| job.id).collect::<Vec<_>>(), ids);
        assert!(finished.iter().all(|job| job.status() == JobStatus::Completed));
        assert_eq!(finished[2].record_count(), Some(1));
    }

    #[tokio::test]
    async fn test_run_delivers_to_directory() {
        let dir = tempdir().unwrap();
        let runner = ExportRunner::new(dataset(), options())
            .with_target(Arc::new(DirectoryTarget::new(dir.path())));

        let job = runner
            .run(ExportJob::new(ReportDomain::Incidents, ExportFormat::Pdf))
            .await;

        let path = dir.path().join("incidents-2024-03-01.pdf");
        assert_eq!(job.summary().path, Some(path.clone()));
        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_delivery_failure_fails_job() {
        let mut target = MockTarget::new();
        target
            .expect_save()
            .times(1)
            .returning(|_| Err(UsineError::Internal("disk full".to_string())));
        let runner = ExportRunner::new(dataset(), options()).with_target(Arc::new(target));

        let job = runner
            .run(ExportJob::new(ReportDomain::Employees, ExportFormat::Pdf))
            .await;

        assert_eq!(job.status(), JobStatus::Error);
        assert_eq!(job.summary().error.as_deref(), Some("Internal error: disk full"));
        assert_eq!(job.record_count(), None);
    }

    #[tokio::test]
    async fn test_finished_job_is_not_rerun() {
        let runner = ExportRunner::new(dataset(), options());
        let job = runner
            .run(ExportJob::new(ReportDomain::Packages, ExportFormat::Pdf))
            .await;
        let logs = job.get_logs().len();

        let again = runner.run(job).await;

        assert_eq!(again.status(), JobStatus::Completed);
        assert_eq!(again.get_logs().len(), logs);
    }
}
