pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::{AppConfig, ExportSettings, OrientationSetting, PageSizeSetting};
pub use error::UsineError;
pub use logging::{LogEntry, Loggable};
pub use result::UsineResult;
