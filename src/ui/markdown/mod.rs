//! Markdown pipeline for chat messages: block tokenizing, inline formatting,
//! and document assembly with extracted code blocks.

mod assemble;
mod code;
mod document;
mod inline;
mod lists;
mod metadata;
mod registry;
mod tokenizer;

#[cfg(test)]
pub mod test_fixtures;
#[cfg(test)]
mod tests;

pub use assemble::assemble;
pub use document::{
    AnchorRun, Appearance, BlockKind, DocItem, Document, RenderedBlock, StyledRun,
};
pub use inline::{format, parse_inline, Inline};
pub use lists::ListMarker;
pub use metadata::{render_message, render_message_with, RenderedMessage};
pub use registry::{CodeBlockRecord, CodeBlockRegistry};
pub use tokenizer::{tokenize, Block};

pub(crate) use code::{detab, display_width, line_count};
pub(crate) use lists::MAX_LIST_HANGING_INDENT_WIDTH;
#[cfg(test)]
pub(crate) use inline::FORMAT_CALLS;
#[cfg(test)]
pub(crate) use tokenizer::TOKENIZE_CALLS;
