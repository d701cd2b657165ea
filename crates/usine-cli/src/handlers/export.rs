use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use usine_export::{
    DirectoryTarget, ExportFormat, ExportJob, ExportRunner, JobState, JobStatus, ReportDomain,
    ReportOptions,
};

use crate::cli::{ExportAllArgs, ExportArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub mime: &'static str,
    pub records: usize,
}

fn runner(ctx: &CliContext, options: ReportOptions, dir: PathBuf) -> ExportRunner {
    ExportRunner::new(Arc::clone(&ctx.dataset), options)
        .with_target(Arc::new(DirectoryTarget::new(dir)))
}

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let domain = ReportDomain::from(args.domain);
    let format = ExportFormat::from(args.format);

    let mut options = ctx.report_options(format, args.landscape);
    if let Some(title) = args.title {
        options = options.title(title);
    }
    if let Some(subtitle) = args.subtitle {
        options = options.subtitle(subtitle);
    }

    let runner = runner(ctx, options, ctx.output_dir(args.out_dir));
    let job = runner.run(ExportJob::new(domain, format)).await;

    match job.state {
        JobState::Completed {
            file,
            path: Some(path),
            ..
        } => output::output_success(ExportOutput {
            path,
            format: file.format,
            mime: file.mime_type(),
            records: file.record_count,
        }),
        JobState::Failed { reason, .. } => Err(anyhow::anyhow!(reason)),
        other => Err(anyhow::anyhow!(
            "Export of {} ended in state {:?}",
            domain.slug(),
            other.status()
        )),
    }
}

pub async fn handle_export_all(ctx: &CliContext, args: ExportAllArgs) -> anyhow::Result<()> {
    let format = ExportFormat::from(args.format);
    let options = ctx.report_options(format, args.landscape);
    let runner = runner(ctx, options, ctx.output_dir(args.out_dir));

    let jobs = ReportDomain::ALL
        .iter()
        .map(|domain| ExportJob::new(*domain, format))
        .collect();
    let finished = runner.run_all(jobs).await;

    let failed = finished
        .iter()
        .filter(|job| job.status() == JobStatus::Error)
        .count();
    output::output_list(finished.iter().map(ExportJob::summary).collect())?;

    if failed > 0 {
        anyhow::bail!("{} of {} exports failed", failed, finished.len());
    }
    Ok(())
}
