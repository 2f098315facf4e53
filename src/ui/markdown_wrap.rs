use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Wrap spans to the provided width while preserving styles and word
/// boundaries. A word may straddle several spans and still wraps as one unit.
/// Whitespace at a break is dropped; words wider than the whole line are split
/// on grapheme boundaries.
pub(crate) fn wrap_spans(spans: &[Span<'static>], max_width: usize) -> Vec<Vec<Span<'static>>> {
    let mut wrapper = LineWrapper {
        max_width: max_width.max(1),
        lines: Vec::new(),
        current: Vec::new(),
        width: 0,
    };
    let mut word: Vec<(&str, &Span<'static>)> = Vec::new();

    for span in spans {
        for segment in segments(&span.content) {
            if segment.chars().all(char::is_whitespace) {
                wrapper.place_word(&mut word);
                wrapper.place_space(segment, span);
            } else {
                word.push((segment, span));
            }
        }
    }
    wrapper.place_word(&mut word);

    if !wrapper.current.is_empty() {
        wrapper.finish_line();
    }
    if wrapper.lines.is_empty() {
        vec![Vec::new()]
    } else {
        wrapper.lines
    }
}

struct LineWrapper {
    max_width: usize,
    lines: Vec<Vec<Span<'static>>>,
    current: Vec<Span<'static>>,
    width: usize,
}

impl LineWrapper {
    fn push(&mut self, text: &str, like: &Span<'static>) {
        self.width += UnicodeWidthStr::width(text);
        match self.current.last_mut() {
            Some(last) if last.style == like.style => last.content.to_mut().push_str(text),
            _ => self.current.push(Span::styled(text.to_string(), like.style)),
        }
    }

    /// Places the pending word, whose pieces may carry different styles.
    fn place_word(&mut self, word: &mut Vec<(&str, &Span<'static>)>) {
        if word.is_empty() {
            return;
        }
        let width: usize = word.iter().map(|(text, _)| UnicodeWidthStr::width(*text)).sum();
        if self.width + width > self.max_width {
            if !self.current.is_empty() {
                self.finish_line();
            }
            if width > self.max_width {
                for (text, like) in word.drain(..) {
                    self.hard_break(text, like);
                }
                return;
            }
        }
        for (text, like) in word.drain(..) {
            self.push(text, like);
        }
    }

    fn place_space(&mut self, space: &str, like: &Span<'static>) {
        if self.current.is_empty() {
            return;
        }
        if self.width + UnicodeWidthStr::width(space) <= self.max_width {
            self.push(space, like);
        } else {
            self.finish_line();
        }
    }

    fn finish_line(&mut self) {
        while let Some(last) = self.current.last_mut() {
            let trimmed_len = last.content.trim_end().len();
            if trimmed_len == 0 {
                self.current.pop();
            } else {
                last.content.to_mut().truncate(trimmed_len);
                break;
            }
        }
        self.lines.push(std::mem::take(&mut self.current));
        self.width = 0;
    }

    fn hard_break(&mut self, piece: &str, like: &Span<'static>) {
        for grapheme in piece.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme);
            if self.width + w > self.max_width && self.width > 0 {
                self.finish_line();
            }
            self.push(grapheme, like);
        }
    }
}

/// Alternating runs of whitespace and non-whitespace.
fn segments(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            out.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}
