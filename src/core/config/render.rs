use crate::core::error::RenderError;
use crate::ui::span::FontClass;

/// Smallest point size a resolved font may shrink to after adjustments.
pub const MIN_FONT_SIZE: f32 = 6.0;

/// Relative size of heading text, indexed by heading level minus one.
const HEADING_SCALE: [f32; 6] = [1.5, 1.3, 1.15, 1.05, 1.0, 1.0];

/// A font chosen by the host: family name plus point size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    name: String,
    size: f32,
}

impl FontDescriptor {
    /// Validates and builds a descriptor. Empty names and sizes that are not
    /// finite and positive are rejected.
    pub fn new(name: impl Into<String>, size: f32) -> Result<Self, RenderError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RenderError::invalid("font name", "must not be empty"));
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(RenderError::invalid(
                "font size",
                format!("must be a positive number, got {size}"),
            ));
        }
        Ok(Self { name, size })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn resized(&self, size: f32) -> Self {
        Self {
            name: self.name.clone(),
            size,
        }
    }
}

/// Everything the recolorer needs to resolve appearance. Passed explicitly to
/// every call; nothing here is read from global state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    is_dark_theme: bool,
    monospace_font: FontDescriptor,
    proportional_font: FontDescriptor,
    font_size_adjustment: i32,
}

impl RenderConfig {
    pub fn new(
        is_dark_theme: bool,
        monospace_font: FontDescriptor,
        proportional_font: FontDescriptor,
    ) -> Self {
        Self {
            is_dark_theme,
            monospace_font,
            proportional_font,
            font_size_adjustment: 0,
        }
    }

    /// Builds a config from descriptors that may be absent, reporting the
    /// first missing one instead of substituting a default.
    pub fn from_parts(
        is_dark_theme: bool,
        monospace_font: Option<FontDescriptor>,
        proportional_font: Option<FontDescriptor>,
    ) -> Result<Self, RenderError> {
        let monospace_font = monospace_font.ok_or_else(|| RenderError::missing("monospace_font"))?;
        let proportional_font =
            proportional_font.ok_or_else(|| RenderError::missing("proportional_font"))?;
        Ok(Self::new(is_dark_theme, monospace_font, proportional_font))
    }

    /// Points added to both base font sizes (the "bigger/smaller" font action).
    pub fn with_font_size_adjustment(mut self, adjustment: i32) -> Self {
        self.font_size_adjustment = adjustment;
        self
    }

    pub fn with_dark_theme(mut self, is_dark_theme: bool) -> Self {
        self.is_dark_theme = is_dark_theme;
        self
    }

    pub fn is_dark_theme(&self) -> bool {
        self.is_dark_theme
    }

    pub fn monospace_font(&self) -> &FontDescriptor {
        &self.monospace_font
    }

    pub fn proportional_font(&self) -> &FontDescriptor {
        &self.proportional_font
    }

    pub fn font_size_adjustment(&self) -> i32 {
        self.font_size_adjustment
    }

    /// Resolves the concrete font for a run of the given class, optionally
    /// inside a heading of `heading_level`.
    pub fn resolve_font(&self, class: FontClass, heading_level: Option<u8>) -> FontDescriptor {
        let base = match class {
            FontClass::Monospace => &self.monospace_font,
            FontClass::Proportional => &self.proportional_font,
        };
        let adjusted = (base.size + self.font_size_adjustment as f32).max(MIN_FONT_SIZE);
        let scale = heading_level
            .map(|level| HEADING_SCALE[usize::from(level.clamp(1, 6)) - 1])
            .unwrap_or(1.0);
        base.resized(adjusted * scale)
    }
}
