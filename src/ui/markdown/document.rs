//! The rendered, styleable form of one message.
//!
//! A [`Document`] is a list of blocks, each holding styled runs or a single
//! zero-length code block anchor. Offsets count Unicode scalar values in the
//! document's visible text, where blocks are separated by one `\n`.

use super::lists::ListMarker;
use crate::core::config::FontDescriptor;
use crate::core::message::Role;
use crate::ui::span::{CodeBlockId, Emphasis, FontClass, StyleTag};
use ratatui::style::Color;

/// Resolved display attributes written by the recolorer.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    pub fg: Color,
    pub bg: Option<Color>,
    pub font: FontDescriptor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub tag: StyleTag,
    pub font: FontClass,
    pub emphasis: Emphasis,
    /// Scalar offset of the first character in the visible text.
    pub offset: usize,
    /// `None` until the document has been colored.
    pub appearance: Option<Appearance>,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, tag: StyleTag, emphasis: Emphasis, offset: usize) -> Self {
        let font = tag.font_class();
        Self {
            text: text.into(),
            tag,
            font,
            emphasis,
            offset,
            appearance: None,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_bold(&self) -> bool {
        self.emphasis.bold || self.tag == StyleTag::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.emphasis.italic || self.tag == StyleTag::Italic
    }
}

/// Zero-length placeholder marking where a code block widget belongs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorRun {
    pub id: CodeBlockId,
    pub offset: usize,
    /// Lines in the code body, at least one.
    pub line_count: usize,
    /// Widest body line in scalar values.
    pub max_columns: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DocItem {
    Run(StyledRun),
    Anchor(AnchorRun),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem(ListMarker),
    CodeFence,
}

impl BlockKind {
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBlock {
    pub kind: BlockKind,
    pub items: Vec<DocItem>,
}

impl RenderedBlock {
    pub fn runs(&self) -> impl Iterator<Item = &StyledRun> {
        self.items.iter().filter_map(|item| match item {
            DocItem::Run(run) => Some(run),
            DocItem::Anchor(_) => None,
        })
    }

    pub fn anchor(&self) -> Option<&AnchorRun> {
        self.items.iter().find_map(|item| match item {
            DocItem::Anchor(anchor) => Some(anchor),
            DocItem::Run(_) => None,
        })
    }

    pub fn visible_text(&self) -> String {
        self.runs().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    role: Role,
    blocks: Vec<RenderedBlock>,
    code_appearance: Option<Appearance>,
}

impl Document {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            blocks: Vec::new(),
            code_appearance: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn runs(&self) -> impl Iterator<Item = &StyledRun> {
        self.blocks.iter().flat_map(RenderedBlock::runs)
    }

    pub fn anchors(&self) -> impl Iterator<Item = &AnchorRun> {
        self.blocks.iter().filter_map(RenderedBlock::anchor)
    }

    pub fn anchor(&self, id: CodeBlockId) -> Option<&AnchorRun> {
        self.anchors().find(|anchor| anchor.id == id)
    }

    /// Appearance hosts use for code block widgets, set by the recolorer.
    pub fn code_appearance(&self) -> Option<&Appearance> {
        self.code_appearance.as_ref()
    }

    /// Visible text of every block joined by `\n`. Code blocks contribute no
    /// characters; their anchors sit between the separators.
    pub fn visible_text(&self) -> String {
        self.blocks
            .iter()
            .map(RenderedBlock::visible_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn push_block(&mut self, block: RenderedBlock) {
        self.blocks.push(block);
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [RenderedBlock] {
        &mut self.blocks
    }

    pub(crate) fn set_code_appearance(&mut self, appearance: Appearance) {
        self.code_appearance = Some(appearance);
    }
}
