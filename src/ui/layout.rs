//! Cell-based text surface used by the terminal host.
//!
//! [`LayoutEngine`] lays a [`Document`] out at a fixed width, wrapping text
//! and reserving blank rows where each code block widget will sit.
//! [`SurfaceView`] puts that layout behind a scrolled viewport and answers the
//! tracker's [`LayoutQuery`].

use std::collections::BTreeMap;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::ui::markdown::{BlockKind, Document, RenderedBlock, StyledRun, MAX_LIST_HANGING_INDENT_WIDTH};
use crate::ui::markdown_wrap::wrap_spans;
use crate::ui::overlay::{HostRect, LayoutQuery};
use crate::ui::span::CodeBlockId;

/// Rows a code block widget adds around its body (top and bottom border).
pub const CODE_BLOCK_CHROME_ROWS: usize = 2;

/// Rows reserved for one code block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorPlacement {
    pub first_row: usize,
    pub rows: usize,
}

/// Result of a layout pass: wrapped lines plus where each anchor landed.
#[derive(Clone, Debug, Default)]
pub struct SurfaceLayout {
    pub lines: Vec<Line<'static>>,
    pub width: usize,
    placements: BTreeMap<CodeBlockId, AnchorPlacement>,
}

impl SurfaceLayout {
    pub fn placement(&self, id: CodeBlockId) -> Option<AnchorPlacement> {
        self.placements.get(&id).copied()
    }

    pub fn total_rows(&self) -> usize {
        self.lines.len()
    }
}

pub struct LayoutEngine;

impl LayoutEngine {
    /// Lays the document out at `width` cells. Blocks are separated by one
    /// blank row; list items hang their continuation lines under the text.
    pub fn layout_document(document: &Document, width: usize) -> SurfaceLayout {
        let width = width.max(1);
        let mut layout = SurfaceLayout {
            width,
            ..SurfaceLayout::default()
        };

        for (index, block) in document.blocks().iter().enumerate() {
            if index > 0 {
                layout.lines.push(Line::default());
            }
            match block.kind {
                BlockKind::CodeFence => {
                    let Some(anchor) = block.anchor() else {
                        continue;
                    };
                    let placement = AnchorPlacement {
                        first_row: layout.lines.len(),
                        rows: anchor.line_count + CODE_BLOCK_CHROME_ROWS,
                    };
                    layout.placements.insert(anchor.id, placement);
                    layout
                        .lines
                        .extend(std::iter::repeat_with(Line::default).take(placement.rows));
                }
                BlockKind::ListItem(marker) => {
                    let label = marker.label();
                    let indent = UnicodeWidthStr::width(label.as_str())
                        .min(MAX_LIST_HANGING_INDENT_WIDTH)
                        .min(width.saturating_sub(1));
                    let label_style = block_spans(block)
                        .first()
                        .and_then(|span| span.style.fg)
                        .map(|fg| Style::default().fg(fg))
                        .unwrap_or_default();
                    let wrapped = wrap_spans(&block_spans(block), width - indent);
                    for (row, mut spans) in wrapped.into_iter().enumerate() {
                        let prefix = if row == 0 {
                            Span::styled(label.clone(), label_style)
                        } else {
                            Span::raw(" ".repeat(indent))
                        };
                        spans.insert(0, prefix);
                        layout.lines.push(Line::from(spans));
                    }
                }
                BlockKind::Paragraph | BlockKind::Heading(_) => {
                    for spans in wrap_spans(&block_spans(block), width) {
                        layout.lines.push(Line::from(spans));
                    }
                }
            }
        }
        layout
    }
}

fn block_spans(block: &RenderedBlock) -> Vec<Span<'static>> {
    let heading = matches!(block.kind, BlockKind::Heading(_));
    block
        .runs()
        .map(|run| Span::styled(run.text.clone(), run_style(run, heading)))
        .collect()
}

/// Terminal style for a run: resolved colors plus emphasis modifiers.
pub fn run_style(run: &StyledRun, heading: bool) -> Style {
    let mut style = Style::default();
    if let Some(appearance) = run.appearance.as_ref() {
        style = style.fg(appearance.fg);
        if let Some(bg) = appearance.bg {
            style = style.bg(bg);
        }
    }
    if heading || run.is_bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if run.is_italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if run.tag.is_link() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Size of one cell in host units. Terminals use one unit per cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

impl CellMetrics {
    pub const TERMINAL: CellMetrics = CellMetrics {
        width: 1.0,
        height: 1.0,
    };
}

/// A layout seen through a scrolled viewport.
pub struct SurfaceView<'a> {
    layout: &'a SurfaceLayout,
    viewport: Rect,
    scroll: usize,
    cell: CellMetrics,
}

impl<'a> SurfaceView<'a> {
    /// `scroll` is clamped so the last row never scrolls above the viewport
    /// bottom.
    pub fn new(layout: &'a SurfaceLayout, viewport: Rect, scroll: usize) -> Self {
        let max_scroll = layout.total_rows().saturating_sub(usize::from(viewport.height));
        Self {
            layout,
            viewport,
            scroll: scroll.min(max_scroll),
            cell: CellMetrics::TERMINAL,
        }
    }

    pub fn with_cell_metrics(mut self, cell: CellMetrics) -> Self {
        self.cell = cell;
        self
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn viewport_rect(&self) -> HostRect {
        HostRect::new(
            f32::from(self.viewport.x) * self.cell.width,
            f32::from(self.viewport.y) * self.cell.height,
            f32::from(self.viewport.width) * self.cell.width,
            f32::from(self.viewport.height) * self.cell.height,
        )
    }

    /// Lines currently inside the viewport.
    pub fn visible_lines(&self) -> &'a [Line<'static>] {
        let lines = &self.layout.lines;
        let start = self.scroll.min(lines.len());
        let end = (start + usize::from(self.viewport.height)).min(lines.len());
        &lines[start..end]
    }
}

impl LayoutQuery for SurfaceView<'_> {
    fn rect_for_anchor(&self, id: CodeBlockId) -> Option<HostRect> {
        let placement = self.layout.placement(id)?;
        let row = placement.first_row as f32 - self.scroll as f32;
        let columns = self.layout.width.min(usize::from(self.viewport.width));
        Some(HostRect::new(
            f32::from(self.viewport.x) * self.cell.width,
            (f32::from(self.viewport.y) + row) * self.cell.height,
            columns as f32 * self.cell.width,
            placement.rows as f32 * self.cell.height,
        ))
    }
}
