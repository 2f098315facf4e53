pub(crate) const MAX_LIST_HANGING_INDENT_WIDTH: usize = 12;

/// Marker that introduced a list item. Ordered markers keep their written number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Ordered(u64),
}

impl ListMarker {
    /// Prefix a host draws ahead of the item text.
    pub fn label(self) -> String {
        match self {
            ListMarker::Bullet => "• ".to_string(),
            ListMarker::Ordered(n) => format!("{n}. "),
        }
    }
}

/// Splits `-`, `*`, or `digits.` followed by a space off the front of an
/// already trimmed line.
pub(super) fn parse_list_marker(line: &str) -> Option<(ListMarker, &str)> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        let text = rest.trim();
        return (!text.is_empty()).then_some((ListMarker::Bullet, text));
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    Some((ListMarker::Ordered(number), text))
}
