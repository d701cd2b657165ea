//! Options, output and renderer dispatch shared by every report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use usine_core::{AppConfig, UsineResult};

use crate::format::{export_filename, ExportFormat};
use crate::pdf::PdfRenderer;
use crate::table::ReportTable;
use crate::template::{PageSetup, ReportTemplate};
use crate::xlsx::SpreadsheetBuilder;

/// The data domains a report can be produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDomain {
    Employees,
    Visits,
    Incidents,
    Trainings,
    Equipment,
    Packages,
}

impl ReportDomain {
    pub const ALL: [ReportDomain; 6] = [
        ReportDomain::Employees,
        ReportDomain::Visits,
        ReportDomain::Incidents,
        ReportDomain::Trainings,
        ReportDomain::Equipment,
        ReportDomain::Packages,
    ];

    /// Filename prefix.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportDomain::Employees => "employes",
            ReportDomain::Visits => "visites",
            ReportDomain::Incidents => "incidents",
            ReportDomain::Trainings => "formations",
            ReportDomain::Equipment => "equipements",
            ReportDomain::Packages => "colis",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ReportDomain::Employees => "Liste des employés",
            ReportDomain::Visits => "Registre des visites",
            ReportDomain::Incidents => "Rapport des incidents HSE",
            ReportDomain::Trainings => "Formations HSE",
            ReportDomain::Equipment => "Inventaire des équipements",
            ReportDomain::Packages => "Registre des colis et courriers",
        }
    }
}

/// Caller-side settings for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub format: ExportFormat,
    pub page: PageSetup,
    pub generated_at: DateTime<Utc>,
    pub max_cell_lines: usize,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub footer_text: Option<String>,
}

impl ReportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            page: PageSetup::default(),
            generated_at: Utc::now(),
            max_cell_lines: AppConfig::DEFAULT_MAX_CELL_LINES,
            title: None,
            subtitle: None,
            author: None,
            footer_text: None,
        }
    }

    pub fn from_config(config: &AppConfig, format: ExportFormat) -> Self {
        Self {
            page: PageSetup::new(
                config.effective_orientation().into(),
                config.effective_page_size().into(),
            ),
            max_cell_lines: config.effective_max_cell_lines(),
            author: config.export.author.clone(),
            footer_text: config.export.footer_text.clone(),
            ..Self::new(format)
        }
    }

    /// Pins the generation timestamp, which is the only varying input.
    pub fn generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn template_for(&self, domain: ReportDomain) -> ReportTemplate {
        ReportTemplate {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| domain.default_title().to_string()),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
            footer_text: self.footer_text.clone(),
        }
    }
}

/// A produced document, ready to be handed to a download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    pub record_count: usize,
}

impl ExportedFile {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Everything a renderer needs besides the table itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub template: &'a ReportTemplate,
    pub page: PageSetup,
    pub generated_at: DateTime<Utc>,
    pub max_cell_lines: usize,
}

pub trait DocumentRenderer {
    fn format(&self) -> ExportFormat;
    fn render(&self, table: &ReportTable, context: &RenderContext<'_>) -> UsineResult<Vec<u8>>;
}

/// Renders a mapped table into the requested format and names the file.
pub fn render_table(
    domain: ReportDomain,
    table: &ReportTable,
    options: &ReportOptions,
) -> UsineResult<ExportedFile> {
    let template = options.template_for(domain);
    let context = RenderContext {
        template: &template,
        page: options.page,
        generated_at: options.generated_at,
        max_cell_lines: options.max_cell_lines,
    };

    let renderer: Box<dyn DocumentRenderer> = match options.format {
        ExportFormat::Pdf => Box::new(PdfRenderer),
        ExportFormat::Xlsx => Box::new(SpreadsheetBuilder),
    };
    let bytes = renderer.render(table, &context)?;

    let filename = export_filename(
        domain.slug(),
        options.generated_at.date_naive(),
        renderer.format(),
    );
    tracing::info!(
        "Generated {} ({} records, {} bytes)",
        filename,
        table.record_count(),
        bytes.len()
    );

    Ok(ExportedFile {
        filename,
        format: renderer.format(),
        bytes,
        record_count: table.record_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use usine_core::AppConfig;

    #[test]
    fn test_options_from_config() {
        let config = AppConfig::from_toml(
            "[export]\nauthor = \"Direction\"\norientation = \"landscape\"\nmax_cell_lines = 2\n",
        )
        .unwrap();

        let options = ReportOptions::from_config(&config, ExportFormat::Pdf);

        assert_eq!(options.page, PageSetup::landscape());
        assert_eq!(options.max_cell_lines, 2);
        assert_eq!(options.author.as_deref(), Some("Direction"));
    }

    #[test]
    fn test_template_defaults_to_domain_title() {
        let options = ReportOptions::new(ExportFormat::Pdf);
        assert_eq!(
            options.template_for(ReportDomain::Incidents).title,
            "Rapport des incidents HSE"
        );

        let options = options.title("Incidents de mars");
        assert_eq!(
            options.template_for(ReportDomain::Incidents).title,
            "Incidents de mars"
        );
    }

    #[test]
    fn test_render_table_names_file_from_generation_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let options = ReportOptions::new(ExportFormat::Xlsx).generated_at(at);
        let table = ReportTable {
            headers: vec!["Nom".to_string()],
            widths: vec![None],
            rows: vec![vec!["Awa".to_string()]],
        };

        let file = render_table(ReportDomain::Equipment, &table, &options).unwrap();

        assert_eq!(file.filename, "equipements-2024-03-01.xlsx");
        assert_eq!(file.format, ExportFormat::Xlsx);
        assert_eq!(file.record_count, 1);
        assert!(file.bytes.starts_with(b"PK"));
    }
}
