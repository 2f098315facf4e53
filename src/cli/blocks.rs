use std::fmt::Write as _;

use crate::ui::markdown::{display_width, line_count, tokenize, Block};

/// One line per tokenized block. Code blocks are numbered with the ids the
/// assembler will give their anchors.
pub fn list_blocks(text: &str) -> String {
    let mut out = String::new();
    let mut next_code_id = 0usize;
    for (index, block) in tokenize(text).iter().enumerate() {
        let _ = match block {
            Block::Paragraph(text) => writeln!(out, "{index:>3}  paragraph    {text}"),
            Block::Heading { level, text } => writeln!(out, "{index:>3}  heading {level}    {text}"),
            Block::ListItem { marker, text } => {
                writeln!(out, "{index:>3}  list item    {}{text}", marker.label())
            }
            Block::CodeFence { body, language } => {
                let id = next_code_id;
                next_code_id += 1;
                let lines = line_count(body);
                let widest = body.lines().map(display_width).max().unwrap_or(0);
                writeln!(
                    out,
                    "{index:>3}  code #{id}      {} ({lines} lines, {widest} cols)",
                    language.as_deref().unwrap_or("text")
                )
            }
        };
    }
    if out.is_empty() {
        out.push_str("(no blocks)\n");
    }
    out
}
