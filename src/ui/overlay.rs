//! Positions code block widgets over the host's text surface.
//!
//! The tracker owns no widgets and keeps no state. Hosts call
//! [`OverlayPositionTracker::recompute`] after each layout-affecting event
//! (resize, scroll, theme or font change) and create, move or drop their own
//! controls from the returned rects. Coalescing bursts of events is up to the
//! host.

use crate::ui::markdown::Document;
use crate::ui::span::CodeBlockId;
use tracing::trace;

/// Rectangle in host coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HostRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Finite, with positive width and height.
    pub fn is_renderable(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlapping area, or `None` when the rects do not overlap.
    pub fn intersection(&self, other: &HostRect) -> Option<HostRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let clipped = HostRect::new(x, y, right - x, bottom - y);
        clipped.is_renderable().then_some(clipped)
    }
}

/// Where a code block widget should currently be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidgetRect {
    pub id: CodeBlockId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WidgetRect {
    fn from_host(id: CodeBlockId, rect: HostRect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn as_host_rect(&self) -> HostRect {
        HostRect::new(self.x, self.y, self.width, self.height)
    }
}

/// Capability supplied by the host text surface. Only ids of anchors present
/// in the current document are ever asked for; `None` means the host cannot
/// place the anchor right now.
pub trait LayoutQuery {
    fn rect_for_anchor(&self, id: CodeBlockId) -> Option<HostRect>;
}

impl<F> LayoutQuery for F
where
    F: Fn(CodeBlockId) -> Option<HostRect>,
{
    fn rect_for_anchor(&self, id: CodeBlockId) -> Option<HostRect> {
        self(id)
    }
}

pub struct OverlayPositionTracker;

impl OverlayPositionTracker {
    /// Maps every anchor in `document` to its current rect, in anchor order.
    /// Anchors the host cannot place, or places at degenerate rects, are
    /// omitted.
    pub fn recompute<Q>(document: &Document, query: &Q) -> Vec<WidgetRect>
    where
        Q: LayoutQuery + ?Sized,
    {
        let rects: Vec<WidgetRect> = document
            .anchors()
            .filter_map(|anchor| {
                query
                    .rect_for_anchor(anchor.id)
                    .filter(HostRect::is_renderable)
                    .map(|rect| WidgetRect::from_host(anchor.id, rect))
            })
            .collect();
        trace!(
            anchors = document.anchors().count(),
            placed = rects.len(),
            "Recomputed widget rects"
        );
        rects
    }

    /// Like [`recompute`](Self::recompute), but clips each rect to `viewport`
    /// and omits widgets entirely outside it.
    pub fn recompute_visible<Q>(document: &Document, query: &Q, viewport: HostRect) -> Vec<WidgetRect>
    where
        Q: LayoutQuery + ?Sized,
    {
        Self::recompute(document, query)
            .into_iter()
            .filter_map(|widget| {
                widget
                    .as_host_rect()
                    .intersection(&viewport)
                    .map(|rect| WidgetRect::from_host(widget.id, rect))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::ui::markdown::{assemble, tokenize};

    fn two_block_document() -> Document {
        let text = "intro\n```rust\nfn a() {}\n```\nmiddle\n```\nb\n```";
        assemble(&tokenize(text), Role::Assistant).0
    }

    fn stacked(id: CodeBlockId) -> Option<HostRect> {
        Some(HostRect::new(10.0, 100.0 * id.get() as f32, 300.0, 80.0))
    }

    #[test]
    fn recompute_is_pure() {
        let doc = two_block_document();
        let first = OverlayPositionTracker::recompute(&doc, &stacked);
        let second = OverlayPositionTracker::recompute(&doc, &stacked);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].id, CodeBlockId::new(1));
        assert_eq!(first[1].y, 100.0);
    }

    #[test]
    fn unplaceable_anchors_are_omitted() {
        let doc = two_block_document();
        let only_second = |id: CodeBlockId| (id.get() == 1).then(|| HostRect::new(0.0, 0.0, 5.0, 5.0));
        let rects = OverlayPositionTracker::recompute(&doc, &only_second);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].id, CodeBlockId::new(1));
    }

    #[test]
    fn degenerate_rects_are_not_visible() {
        let doc = two_block_document();
        let degenerate = |id: CodeBlockId| {
            Some(if id.get() == 0 {
                HostRect::new(0.0, 0.0, 0.0, 10.0)
            } else {
                HostRect::new(0.0, f32::NAN, 10.0, 10.0)
            })
        };
        assert!(OverlayPositionTracker::recompute(&doc, &degenerate).is_empty());
    }

    #[test]
    fn empty_document_yields_no_rects() {
        let doc = assemble(&tokenize(""), Role::User).0;
        assert!(OverlayPositionTracker::recompute(&doc, &stacked).is_empty());
    }

    #[test]
    fn visible_recompute_clips_to_viewport() {
        let doc = two_block_document();
        let viewport = HostRect::new(0.0, 50.0, 200.0, 100.0);
        let rects = OverlayPositionTracker::recompute_visible(&doc, &stacked, viewport);

        // Block 0 spans y 0..80 and block 1 spans 100..180.
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].as_host_rect(), HostRect::new(10.0, 50.0, 190.0, 30.0));
        assert_eq!(rects[1].as_host_rect(), HostRect::new(10.0, 100.0, 190.0, 50.0));

        let below = HostRect::new(0.0, 500.0, 200.0, 100.0);
        assert!(OverlayPositionTracker::recompute_visible(&doc, &stacked, below).is_empty());
    }

    #[test]
    fn intersection_of_touching_rects_is_none() {
        let a = HostRect::new(0.0, 0.0, 10.0, 10.0);
        let b = HostRect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersection(&b).is_none());
    }
}
