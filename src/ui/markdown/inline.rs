//! Inline emphasis, code, and link formatting for a single block of text.
//!
//! Formatting happens in two steps. A linear pre-pass classifies every
//! character (escape, code span, star token, bracket) and builds next-closer
//! tables; the recursive descent in [`Scanner::parse`] then consults those
//! tables instead of searching, so a block is processed in time proportional
//! to its length no matter how many markers are left unmatched.

use super::document::StyledRun;
use crate::ui::span::{Emphasis, StyleTag};

/// Inline structure of a block before flattening into runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Link { text: String, target: String },
}

#[cfg(test)]
thread_local! {
    pub(crate) static FORMAT_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
    static UNESCAPED_CHARS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Formats block text into styled runs with offsets relative to the block.
pub fn format(block_text: &str) -> Vec<StyledRun> {
    #[cfg(test)]
    FORMAT_CALLS.with(|calls| calls.set(calls.get() + 1));

    let tree = parse_inline(block_text);
    let mut runs = Vec::new();
    let mut offset = 0;
    flatten(
        &tree,
        &StyleTag::Plain,
        Emphasis::default(),
        &mut runs,
        &mut offset,
    );
    runs
}

/// Parses block text into its inline tree. Unmatched markers stay literal.
pub fn parse_inline(block_text: &str) -> Vec<Inline> {
    let scanner = Scanner::new(block_text);
    scanner.parse(0, scanner.chars.len(), Context::default())
}

fn flatten(
    nodes: &[Inline],
    tag: &StyleTag,
    emphasis: Emphasis,
    runs: &mut Vec<StyledRun>,
    offset: &mut usize,
) {
    for node in nodes {
        match node {
            Inline::Text(text) => push_run(runs, offset, text, tag.clone(), emphasis),
            Inline::Code(code) => push_run(runs, offset, code, StyleTag::InlineCode, emphasis),
            Inline::Link { text, target } => {
                push_run(runs, offset, text, StyleTag::link(target.as_str()), emphasis)
            }
            Inline::Bold(children) => {
                flatten(children, &StyleTag::Bold, emphasis.with_bold(), runs, offset)
            }
            Inline::Italic(children) => {
                flatten(children, &StyleTag::Italic, emphasis.with_italic(), runs, offset)
            }
        }
    }
}

fn push_run(
    runs: &mut Vec<StyledRun>,
    offset: &mut usize,
    text: &str,
    tag: StyleTag,
    emphasis: Emphasis,
) {
    if text.is_empty() {
        return;
    }
    let run = StyledRun::new(text, tag, emphasis, *offset);
    *offset += run.char_len();
    runs.push(run);
}

/// Characters a backslash can escape.
fn is_escapable(c: char) -> bool {
    matches!(
        c,
        '\\' | '`' | '*' | '_' | '[' | ']' | '(' | ')' | '#' | '-' | '+' | '.' | '!'
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Literal,
    /// Backslash consumed by an escape; the next character is literal.
    Escape,
    /// Backtick opening a code span that closes at the given index.
    CodeOpen(usize),
    CodeBody,
    /// First star of a `**` token.
    DoubleStar,
    /// Second star of a `**` token.
    StarTail,
    SingleStar,
    BracketOpen,
    BracketClose,
    ParenClose,
}

#[derive(Clone, Copy, Debug)]
struct Context {
    allow_bold: bool,
    allow_italic: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            allow_bold: true,
            allow_italic: true,
        }
    }
}

struct Scanner {
    chars: Vec<char>,
    marks: Vec<Mark>,
    next_double_close: Vec<usize>,
    next_single_close: Vec<usize>,
    next_bracket_close: Vec<usize>,
    next_paren_close: Vec<usize>,
    /// Next character that survives unescaping and is not whitespace.
    next_solid: Vec<usize>,
}

impl Scanner {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        let mut marks = vec![Mark::Literal; n];
        // Once a backtick finds no partner, no later backtick can either.
        let mut backticks_exhausted = false;

        let mut i = 0;
        while i < n {
            match chars[i] {
                '\\' if i + 1 < n && is_escapable(chars[i + 1]) => {
                    marks[i] = Mark::Escape;
                    i += 2;
                }
                '`' if !backticks_exhausted => {
                    match chars[i + 1..].iter().position(|&c| c == '`') {
                        Some(0) => i += 2,
                        Some(len) => {
                            let close = i + 1 + len;
                            marks[i] = Mark::CodeOpen(close);
                            for mark in &mut marks[i + 1..=close] {
                                *mark = Mark::CodeBody;
                            }
                            i = close + 1;
                        }
                        None => {
                            backticks_exhausted = true;
                            i += 1;
                        }
                    }
                }
                '*' => {
                    let run_end = i + chars[i..].iter().take_while(|&&c| c == '*').count();
                    let mut k = i;
                    while run_end - k >= 2 {
                        marks[k] = Mark::DoubleStar;
                        marks[k + 1] = Mark::StarTail;
                        k += 2;
                    }
                    if k < run_end {
                        marks[k] = Mark::SingleStar;
                    }
                    i = run_end;
                }
                '[' => {
                    marks[i] = Mark::BracketOpen;
                    i += 1;
                }
                ']' => {
                    marks[i] = Mark::BracketClose;
                    i += 1;
                }
                ')' => {
                    marks[i] = Mark::ParenClose;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        let closes_emphasis = |j: usize| j > 0 && !chars[j - 1].is_whitespace();
        let next_double_close = next_table(n, |j| marks[j] == Mark::DoubleStar && closes_emphasis(j));
        let next_single_close = next_table(n, |j| marks[j] == Mark::SingleStar && closes_emphasis(j));
        let next_bracket_close = next_table(n, |j| marks[j] == Mark::BracketClose);
        let next_paren_close = next_table(n, |j| marks[j] == Mark::ParenClose);
        let next_solid = next_table(n, |j| marks[j] != Mark::Escape && !chars[j].is_whitespace());

        Self {
            chars,
            marks,
            next_double_close,
            next_single_close,
            next_bracket_close,
            next_paren_close,
            next_solid,
        }
    }

    fn parse(&self, start: usize, end: usize, ctx: Context) -> Vec<Inline> {
        let mut out = Vec::new();
        let mut text = String::new();
        let mut i = start;

        while i < end {
            match self.marks[i] {
                Mark::Escape => i += 1,
                Mark::CodeOpen(close) if close < end => {
                    flush_text(&mut text, &mut out);
                    out.push(Inline::Code(self.slice(i + 1, close)));
                    i = close + 1;
                }
                Mark::DoubleStar => {
                    match self.emphasis_close(i, 2, end, &self.next_double_close) {
                        Some(close) if ctx.allow_bold => {
                            flush_text(&mut text, &mut out);
                            let inner = Context {
                                allow_bold: false,
                                ..ctx
                            };
                            out.push(Inline::Bold(self.parse(i + 2, close, inner)));
                            i = close + 2;
                        }
                        _ => {
                            text.push_str("**");
                            i += 2;
                        }
                    }
                }
                Mark::SingleStar => {
                    match self.emphasis_close(i, 1, end, &self.next_single_close) {
                        Some(close) if ctx.allow_italic => {
                            flush_text(&mut text, &mut out);
                            let inner = Context {
                                allow_italic: false,
                                ..ctx
                            };
                            out.push(Inline::Italic(self.parse(i + 1, close, inner)));
                            i = close + 1;
                        }
                        _ => {
                            text.push('*');
                            i += 1;
                        }
                    }
                }
                Mark::BracketOpen => match self.link_bounds(i, end) {
                    Some((bracket, paren)) => {
                        flush_text(&mut text, &mut out);
                        out.push(Inline::Link {
                            text: self.unescaped(i + 1, bracket),
                            target: self.unescaped(bracket + 2, paren).trim().to_string(),
                        });
                        i = paren + 1;
                    }
                    None => {
                        text.push('[');
                        i += 1;
                    }
                },
                _ => {
                    text.push(self.chars[i]);
                    i += 1;
                }
            }
        }

        flush_text(&mut text, &mut out);
        out
    }

    /// Closing index for an emphasis opener of `width` stars at `i`. Openers
    /// must be followed by non-whitespace and enclose at least one character.
    fn emphasis_close(&self, i: usize, width: usize, end: usize, table: &[usize]) -> Option<usize> {
        let content_start = i + width;
        if content_start >= end || self.chars[content_start].is_whitespace() {
            return None;
        }
        let close = table[content_start + 1];
        (close + width <= end).then_some(close)
    }

    /// `[text](target)` bounds as (index of `]`, index of `)`).
    fn link_bounds(&self, i: usize, end: usize) -> Option<(usize, usize)> {
        let bracket = self.next_bracket_close[i + 1];
        if bracket + 1 >= end || bracket == i + 1 {
            return None;
        }
        if self.chars[bracket + 1] != '(' || self.marks[bracket + 1] != Mark::Literal {
            return None;
        }
        let paren = self.next_paren_close[bracket + 2];
        if paren >= end {
            return None;
        }
        // Blank targets are rejected without building the target string.
        (self.next_solid[bracket + 2] < paren).then_some((bracket, paren))
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Text in `start..end` with escape backslashes dropped and every marker
    /// taken literally.
    fn unescaped(&self, start: usize, end: usize) -> String {
        #[cfg(test)]
        UNESCAPED_CHARS.with(|count| count.set(count.get() + end.saturating_sub(start)));

        (start..end)
            .filter(|&j| self.marks[j] != Mark::Escape)
            .map(|j| self.chars[j])
            .collect()
    }
}

/// `table[p]` is the smallest `j >= p` satisfying `pred`, or `n` when none does.
fn next_table(n: usize, pred: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut table = vec![n; n + 1];
    for j in (0..n).rev() {
        table[j] = if pred(j) { j } else { table[j + 1] };
    }
    table
}

fn flush_text(text: &mut String, out: &mut Vec<Inline>) {
    if !text.is_empty() {
        out.push(Inline::Text(std::mem::take(text)));
    }
}
