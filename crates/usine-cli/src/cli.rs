use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use usine_export::{ExportFormat, ReportDomain};

#[derive(Parser)]
#[command(name = "usine")]
#[command(about = "Export facility records as PDF and Excel reports", long_about = None)]
#[command(version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
pub struct Cli {
    /// Path to the facility data snapshot (or set USINE_FILE env var)
    #[arg(long, short, value_name = "FILE", env = "USINE_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", env = "USINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export one report
    Export(ExportArgs),
    /// Export every report concurrently
    ExportAll(ExportAllArgs),
    /// Show record counts per report
    Summary,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    Employees,
    Visits,
    Incidents,
    Trainings,
    Equipment,
    Packages,
}

impl From<DomainArg> for ReportDomain {
    fn from(arg: DomainArg) -> Self {
        match arg {
            DomainArg::Employees => ReportDomain::Employees,
            DomainArg::Visits => ReportDomain::Visits,
            DomainArg::Incidents => ReportDomain::Incidents,
            DomainArg::Trainings => ReportDomain::Trainings,
            DomainArg::Equipment => ReportDomain::Equipment,
            DomainArg::Packages => ReportDomain::Packages,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    #[default]
    Pdf,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub domain: DomainArg,
    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    pub format: FormatArg,
    /// Directory to write into (defaults to the configured output_dir)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    /// Landscape pages, for wide tables
    #[arg(long)]
    pub landscape: bool,
}

#[derive(Args)]
pub struct ExportAllArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Pdf)]
    pub format: FormatArg,
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    #[arg(long)]
    pub landscape: bool,
}
