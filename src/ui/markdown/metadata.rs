use super::assemble::assemble;
use super::document::Document;
use super::registry::CodeBlockRegistry;
use super::tokenizer::tokenize;
use crate::core::config::RenderConfig;
use crate::core::message::{Message, Role};
use crate::ui::recolor;
use crate::ui::theme::{ColorLookup, Palette};

/// A message rendered once: its document plus the code blocks it owns.
/// Both are dropped together when the message leaves the view.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedMessage {
    pub document: Document,
    pub registry: CodeBlockRegistry,
}

impl RenderedMessage {
    /// Re-resolves colors and fonts for a theme or font change without
    /// reparsing the message.
    pub fn apply_config(&mut self, config: &RenderConfig) {
        recolor::recolor_in_place(&mut self.document, config, &Palette::default());
    }

    pub fn apply_config_with(&mut self, config: &RenderConfig, palette: &dyn ColorLookup) {
        recolor::recolor_in_place(&mut self.document, config, palette);
    }

    /// Drops every code block record, e.g. when the conversation is cleared.
    pub fn clear_code_blocks(&mut self) {
        self.registry.clear();
    }
}

/// Tokenizes, assembles and colors a complete message.
pub fn render_message(text: &str, role: Role, config: &RenderConfig) -> RenderedMessage {
    render_message_with(text, role, config, &Palette::default())
}

pub fn render_message_with(
    text: &str,
    role: Role,
    config: &RenderConfig,
    palette: &dyn ColorLookup,
) -> RenderedMessage {
    let blocks = tokenize(text);
    let (mut document, records) = assemble(&blocks, role);
    recolor::recolor_in_place(&mut document, config, palette);
    RenderedMessage {
        document,
        registry: CodeBlockRegistry::from_records(records),
    }
}

impl Message {
    pub fn render(&self, config: &RenderConfig) -> RenderedMessage {
        render_message(&self.content, self.role, config)
    }
}
