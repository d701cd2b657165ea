use serde::{Deserialize, Serialize};
use usine_core::{OrientationSetting, PageSizeSetting};

/// Presentation metadata for a single export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub footer_text: Option<String>,
}

impl ReportTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_footer(mut self, footer_text: impl Into<String>) -> Self {
        self.footer_text = Some(footer_text.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Portrait width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    pub orientation: Orientation,
    pub size: PageSize,
}

impl PageSetup {
    pub fn new(orientation: Orientation, size: PageSize) -> Self {
        Self { orientation, size }
    }

    pub fn landscape() -> Self {
        Self::new(Orientation::Landscape, PageSize::A4)
    }

    /// Width and height in points once orientation is applied.
    pub fn dimensions(&self) -> (f32, f32) {
        let (width, height) = self.size.dimensions();
        match self.orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }
}

impl From<OrientationSetting> for Orientation {
    fn from(setting: OrientationSetting) -> Self {
        match setting {
            OrientationSetting::Portrait => Orientation::Portrait,
            OrientationSetting::Landscape => Orientation::Landscape,
        }
    }
}

impl From<PageSizeSetting> for PageSize {
    fn from(setting: PageSizeSetting) -> Self {
        match setting {
            PageSizeSetting::A4 => PageSize::A4,
            PageSizeSetting::Letter => PageSize::Letter,
        }
    }
}
