use crate::core::config::render::{FontDescriptor, RenderConfig};
use crate::core::error::RenderError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Font family and point size as written in the settings file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FontSetting {
    pub name: String,
    pub size: f32,
}

impl FontSetting {
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    fn to_descriptor(&self) -> Result<FontDescriptor, RenderError> {
        FontDescriptor::new(self.name.clone(), self.size)
    }
}

/// Per-theme color overrides. Values accept `#rgb`, `#rrggbb`, `rgb(r,g,b)`
/// or a named terminal color.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SwatchOverrides {
    pub label: Option<String>,
    pub secondary_label: Option<String>,
    pub link: Option<String>,
    pub code: Option<String>,
    pub code_background: Option<String>,
    pub user_text: Option<String>,
    pub assistant_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub light: SwatchOverrides,
    #[serde(default)]
    pub dark: SwatchOverrides,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Color theme name ("light" or "dark")
    pub theme: Option<String>,
    /// Font used for inline code and code blocks
    pub monospace_font: Option<FontSetting>,
    /// Font used for all other text
    pub proportional_font: Option<FontSetting>,
    /// Points added to both font sizes
    pub font_size_adjustment: i32,
    /// Palette overrides applied on top of the built-in semantic colors
    pub palette: PaletteOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: None,
            monospace_font: Some(FontSetting::new("Monaco", 10.0)),
            proportional_font: Some(FontSetting::new("Lucida Grande", 13.0)),
            font_size_adjustment: 0,
            palette: PaletteOverrides::default(),
        }
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Settings {
    /// Whether the configured theme is dark. Unknown names fall back to light.
    pub fn is_dark_theme(&self) -> bool {
        match self.theme.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("dark") => true,
            Some("light") | None => false,
            Some(other) => {
                warn!(theme = other, "Unknown theme name, using light");
                false
            }
        }
    }

    /// Validates the font settings into a [`RenderConfig`].
    pub fn render_config(&self) -> Result<RenderConfig, RenderError> {
        let monospace = self
            .monospace_font
            .as_ref()
            .map(FontSetting::to_descriptor)
            .transpose()?;
        let proportional = self
            .proportional_font
            .as_ref()
            .map(FontSetting::to_descriptor)
            .transpose()?;
        Ok(
            RenderConfig::from_parts(self.is_dark_theme(), monospace, proportional)?
                .with_font_size_adjustment(self.font_size_adjustment),
        )
    }
}
