//! Re-applies colors and fonts to an existing document.
//!
//! Only the `appearance` of runs and the document's code block appearance are
//! written. Structure, text, offsets and anchor ids are left untouched, and
//! the markdown pipeline is never re-entered, so a theme toggle costs one walk
//! over the runs. Every value is overwritten from the same mapping, which
//! makes recoloring idempotent.

use crate::core::config::RenderConfig;
use crate::core::message::Role;
use crate::ui::markdown::{Appearance, BlockKind, DocItem, Document, StyledRun};
use crate::ui::span::{FontClass, StyleTag};
use crate::ui::theme::{ColorLookup, ColorRole, Palette};
use tracing::trace;

/// Returns a recolored copy using the built-in palette.
pub fn recolor(document: &Document, config: &RenderConfig) -> Document {
    recolor_with(document, config, &Palette::default())
}

pub fn recolor_with(
    document: &Document,
    config: &RenderConfig,
    palette: &dyn ColorLookup,
) -> Document {
    let mut recolored = document.clone();
    recolor_in_place(&mut recolored, config, palette);
    recolored
}

pub fn recolor_in_place(document: &mut Document, config: &RenderConfig, palette: &dyn ColorLookup) {
    let is_dark = config.is_dark_theme();
    let text_role = match document.role() {
        Role::User => ColorRole::UserText,
        Role::Assistant => ColorRole::AssistantText,
    };

    let mut touched = 0usize;
    for block in document.blocks_mut() {
        let heading_level = block.kind.heading_level();
        let base_role = if matches!(block.kind, BlockKind::Heading(_)) {
            ColorRole::Label
        } else {
            text_role
        };
        for item in &mut block.items {
            if let DocItem::Run(run) = item {
                run.appearance = Some(run_appearance(
                    run,
                    base_role,
                    heading_level,
                    config,
                    palette,
                    is_dark,
                ));
                touched += 1;
            }
        }
    }

    document.set_code_appearance(Appearance {
        fg: palette.color(ColorRole::Code, is_dark),
        bg: Some(palette.color(ColorRole::CodeBackground, is_dark)),
        font: config.resolve_font(FontClass::Monospace, None),
    });
    trace!(runs = touched, is_dark, "Recolored document");
}

fn run_appearance(
    run: &StyledRun,
    base_role: ColorRole,
    heading_level: Option<u8>,
    config: &RenderConfig,
    palette: &dyn ColorLookup,
    is_dark: bool,
) -> Appearance {
    let (fg, bg) = match run.tag {
        StyleTag::InlineCode => (
            palette.color(ColorRole::Code, is_dark),
            Some(palette.color(ColorRole::CodeBackground, is_dark)),
        ),
        StyleTag::Link(_) => (palette.color(ColorRole::Link, is_dark), None),
        StyleTag::Plain | StyleTag::Bold | StyleTag::Italic => {
            (palette.color(base_role, is_dark), None)
        }
    };
    Appearance {
        fg,
        bg,
        font: config.resolve_font(run.font, heading_level),
    }
}
