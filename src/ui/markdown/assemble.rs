use super::code;
use super::document::{AnchorRun, BlockKind, DocItem, Document, RenderedBlock};
use super::inline;
use super::registry::CodeBlockRecord;
use super::tokenizer::Block;
use crate::core::message::Role;
use crate::ui::span::CodeBlockId;
use tracing::trace;

/// Builds the document for a tokenized message together with one record per
/// code fence. Code bodies never enter the run stream; each fence becomes a
/// single anchor whose id is assigned in block order starting at 0.
pub fn assemble(blocks: &[Block], role: Role) -> (Document, Vec<CodeBlockRecord>) {
    let mut document = Document::new(role);
    let mut records = Vec::new();
    let mut next_id = CodeBlockId::new(0);
    let mut offset = 0usize;

    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            // Block separator in the visible text.
            offset += 1;
        }

        let rendered = match block {
            Block::CodeFence { body, language } => {
                let id = next_id;
                next_id = next_id.next();
                records.push(CodeBlockRecord::new(id, body.as_str(), language.clone()));
                RenderedBlock {
                    kind: BlockKind::CodeFence,
                    items: vec![DocItem::Anchor(AnchorRun {
                        id,
                        offset,
                        line_count: code::line_count(body),
                        max_columns: code::max_columns(body),
                    })],
                }
            }
            Block::Paragraph(text) => RenderedBlock {
                kind: BlockKind::Paragraph,
                items: inline_items(text, &mut offset),
            },
            Block::Heading { level, text } => RenderedBlock {
                kind: BlockKind::Heading(*level),
                items: inline_items(text, &mut offset),
            },
            Block::ListItem { marker, text } => RenderedBlock {
                kind: BlockKind::ListItem(*marker),
                items: inline_items(text, &mut offset),
            },
        };
        document.push_block(rendered);
    }

    trace!(
        blocks = document.block_count(),
        code_blocks = records.len(),
        "Assembled document"
    );
    (document, records)
}

fn inline_items(text: &str, offset: &mut usize) -> Vec<DocItem> {
    let base = *offset;
    inline::format(text)
        .into_iter()
        .map(|mut run| {
            run.offset += base;
            *offset = run.offset + run.char_len();
            DocItem::Run(run)
        })
        .collect()
}
