//! Terminal host for a rendered message.
//!
//! The text surface is drawn into an off-screen ratatui buffer; each code block
//! widget is then drawn at the rect the overlay tracker reports for it.

use std::fmt::Write as _;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::debug;

use crate::ui::layout::{LayoutEngine, SurfaceView};
use crate::ui::markdown::{detab, display_width, RenderedMessage};
use crate::ui::overlay::{LayoutQuery, OverlayPositionTracker, WidgetRect};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u16,
    pub height: Option<u16>,
    pub scroll: usize,
}

/// Draws the message and its code block widgets, then returns the visible
/// rows as plain text followed by a summary of widget placements.
pub fn render_to_terminal(rendered: &RenderedMessage, options: &RenderOptions) -> String {
    let width = options.width.max(1);
    let layout = LayoutEngine::layout_document(&rendered.document, usize::from(width));
    let height = options
        .height
        .unwrap_or_else(|| u16::try_from(layout.total_rows()).unwrap_or(u16::MAX))
        .max(1);
    let viewport = Rect::new(0, 0, width, height);
    let view = SurfaceView::new(&layout, viewport, options.scroll);

    let mut buffer = Buffer::empty(viewport);
    Paragraph::new(view.visible_lines().to_vec()).render(viewport, &mut buffer);

    let widgets =
        OverlayPositionTracker::recompute_visible(&rendered.document, &view, view.viewport_rect());
    for widget in &widgets {
        draw_code_widget(rendered, &view, widget, &mut buffer);
    }
    debug!(
        rows = layout.total_rows(),
        scroll = view.scroll(),
        widgets = widgets.len(),
        "Rendered message to buffer"
    );

    let mut out = buffer_text(&buffer);
    for widget in &widgets {
        let language = rendered
            .registry
            .lookup(widget.id)
            .and_then(|record| record.language())
            .unwrap_or("text");
        let _ = writeln!(
            out,
            "[code {}] {} at x={} y={} {}x{}",
            widget.id, language, widget.x, widget.y, widget.width, widget.height
        );
    }
    out
}

/// Draws the full widget off-screen, then copies the rows that survived
/// clipping into `buffer`.
fn draw_code_widget(
    rendered: &RenderedMessage,
    view: &SurfaceView<'_>,
    widget: &WidgetRect,
    buffer: &mut Buffer,
) {
    let (Some(record), Some(full)) = (
        rendered.registry.lookup(widget.id),
        view.rect_for_anchor(widget.id),
    ) else {
        return;
    };

    let style = rendered
        .document
        .code_appearance()
        .map(|appearance| {
            let style = Style::default().fg(appearance.fg);
            match appearance.bg {
                Some(bg) => style.bg(bg),
                None => style,
            }
        })
        .unwrap_or_default();

    let area = Rect::new(0, 0, cells(full.width), cells(full.height));
    let mut scratch = Buffer::empty(area);
    let mut frame = Block::bordered().border_style(style);
    if let Some(language) = record.language() {
        frame = frame.title(format!(" {language} "));
    }
    let body: Vec<Line<'static>> = record.raw_text().lines().map(|l| Line::raw(detab(l))).collect();
    Paragraph::new(body)
        .style(style)
        .block(frame)
        .render(area, &mut scratch);

    let skip_rows = cells(widget.y - full.y);
    for row in 0..cells(widget.height) {
        for col in 0..cells(widget.width) {
            let src = scratch.cell((col, row + skip_rows)).cloned();
            let dst = buffer.cell_mut((cells(widget.x) + col, cells(widget.y) + row));
            if let (Some(src), Some(dst)) = (src, dst) {
                *dst = src;
            }
        }
    }
    debug!(
        id = %widget.id,
        widest = record.raw_text().lines().map(display_width).max().unwrap_or(0),
        "Drew code widget"
    );
}

fn cells(value: f32) -> u16 {
    value.max(0.0).round().min(f32::from(u16::MAX)) as u16
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut row = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                row.push_str(cell.symbol());
            }
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
