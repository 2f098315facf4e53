use std::path::Path;

use tracing::debug;

use crate::cli::FontAction;
use crate::core::config::{ConfigError, Settings};

/// Applies a font size action to `settings` and saves them to `path`.
/// Returns the new adjustment in points.
pub fn adjust_font(
    path: &Path,
    mut settings: Settings,
    action: FontAction,
) -> Result<i32, ConfigError> {
    settings.font_size_adjustment = match action {
        FontAction::Bigger => settings.font_size_adjustment.saturating_add(1),
        FontAction::Smaller => settings.font_size_adjustment.saturating_sub(1),
        FontAction::Reset => 0,
    };
    settings.save_to_path(path)?;
    debug!(
        adjustment = settings.font_size_adjustment,
        ?action,
        "Updated font size adjustment"
    );
    Ok(settings.font_size_adjustment)
}
