use super::code::{fence_opening, is_fence_close};
use super::lists::{parse_list_marker, ListMarker};
use tracing::trace;

/// A top-level structural unit of a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Heading { level: u8, text: String },
    CodeFence { body: String, language: Option<String> },
    ListItem { marker: ListMarker, text: String },
}

#[cfg(test)]
thread_local! {
    pub(crate) static TOKENIZE_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Paragraph or list item still collecting continuation lines.
struct OpenRun {
    marker: Option<ListMarker>,
    text: String,
}

impl OpenRun {
    fn into_block(self) -> Block {
        match self.marker {
            Some(marker) => Block::ListItem {
                marker,
                text: self.text,
            },
            None => Block::Paragraph(self.text),
        }
    }
}

struct OpenFence<'a> {
    language: Option<String>,
    lines: Vec<&'a str>,
}

impl OpenFence<'_> {
    fn into_block(self) -> Block {
        Block::CodeFence {
            body: self.lines.join("\n"),
            language: self.language,
        }
    }
}

/// Splits message text into blocks in one pass over its lines. Never fails:
/// unterminated fences close at end of input and anything unrecognized is
/// paragraph text.
pub fn tokenize(text: &str) -> Vec<Block> {
    #[cfg(test)]
    TOKENIZE_CALLS.with(|calls| calls.set(calls.get() + 1));

    let mut blocks = Vec::new();
    let mut open: Option<OpenRun> = None;
    let mut fence: Option<OpenFence<'_>> = None;

    for line in logical_lines(text) {
        if let Some(mut current) = fence.take() {
            if is_fence_close(line) {
                blocks.push(current.into_block());
            } else {
                current.lines.push(line);
                fence = Some(current);
            }
            continue;
        }

        if let Some(language) = fence_opening(line) {
            flush(&mut open, &mut blocks);
            fence = Some(OpenFence {
                language,
                lines: Vec::new(),
            });
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut open, &mut blocks);
            continue;
        }

        if let Some((level, text)) = parse_heading(trimmed) {
            flush(&mut open, &mut blocks);
            blocks.push(Block::Heading {
                level,
                text: text.to_string(),
            });
            continue;
        }

        if let Some((marker, text)) = parse_list_marker(trimmed) {
            flush(&mut open, &mut blocks);
            open = Some(OpenRun {
                marker: Some(marker),
                text: text.to_string(),
            });
            continue;
        }

        match open.as_mut() {
            Some(run) => {
                run.text.push(' ');
                run.text.push_str(trimmed);
            }
            None => {
                open = Some(OpenRun {
                    marker: None,
                    text: trimmed.to_string(),
                })
            }
        }
    }

    if let Some(current) = fence {
        trace!(lines = current.lines.len(), "Closing unterminated code fence at end of input");
        blocks.push(current.into_block());
    }
    flush(&mut open, &mut blocks);
    blocks
}

fn flush(open: &mut Option<OpenRun>, blocks: &mut Vec<Block>) {
    if let Some(run) = open.take() {
        blocks.push(run.into_block());
    }
}

/// `#` through `######` followed by a space and non-empty text.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?.trim();
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

/// Lines split on `\n` with a trailing `\r` removed. A final newline does not
/// produce an extra empty line.
fn logical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', text.as_bytes()) {
        lines.push(strip_cr(&text[start..end]));
        start = end + 1;
    }
    if start < text.len() {
        lines.push(strip_cr(&text[start..]));
    }
    lines
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
