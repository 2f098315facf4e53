use unicode_width::UnicodeWidthStr;

pub(super) const FENCE: &str = "```";

/// Returns the optional language tag when `line` opens a code fence.
/// Only the first word of the info string is kept.
pub(super) fn fence_opening(line: &str) -> Option<Option<String>> {
    let info = line.trim().strip_prefix(FENCE)?;
    if info.contains('`') {
        return None;
    }
    Some(info.split_ascii_whitespace().next().map(str::to_string))
}

pub(super) fn is_fence_close(line: &str) -> bool {
    line.trim() == FENCE
}

/// Number of display lines a code body occupies (an empty body still takes one).
pub(crate) fn line_count(body: &str) -> usize {
    body.lines().count().max(1)
}

/// Widest line of the body in Unicode scalar values.
pub(crate) fn max_columns(body: &str) -> usize {
    body.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Display form of a code line for cell-based hosts.
pub(crate) fn detab(s: &str) -> String {
    s.replace('\t', "    ")
}

pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(detab(s).as_str())
}
