pub mod column;
pub mod download;
pub mod format;
pub mod generators;
pub mod job;
pub mod pdf;
pub mod report;
pub mod table;
pub mod template;
pub mod value;
pub mod xlsx;

pub use column::{formatters, map_record, map_rows, ExportColumn};
pub use download::{check_filename, deliver, DirectoryTarget, DownloadTarget};
pub use format::{export_filename, ExportFormat};
pub use generators::{generate, record_count};
pub use job::{ExportJob, ExportRunner, JobId, JobState, JobStatus, JobSummary};
pub use pdf::{PdfLayout, PdfRenderer};
pub use report::{
    render_table, DocumentRenderer, ExportedFile, RenderContext, ReportDomain, ReportOptions,
};
pub use table::ReportTable;
pub use template::{Orientation, PageSetup, PageSize, ReportTemplate};
pub use value::FieldValue;
pub use xlsx::{SpreadsheetBuilder, DATA_SHEET, METADATA_SHEET};
