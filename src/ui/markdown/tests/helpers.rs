use crate::core::message::Message;
use crate::ui::markdown::test_fixtures::light_config;
use crate::ui::markdown::{render_message, tokenize, Block, Document, RenderedMessage, StyledRun};
use crate::ui::span::StyleTag;

pub fn render_for_test(message: &Message) -> RenderedMessage {
    render_message(&message.content, message.role, &light_config())
}

/// Paragraph text of each block, or `None` for non-paragraph blocks.
pub fn paragraph_texts(blocks: &[Block]) -> Vec<Option<&str>> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

pub fn single_paragraph(text: &str) -> String {
    match tokenize(text).as_slice() {
        [Block::Paragraph(text)] => text.clone(),
        other => panic!("expected one paragraph for {text:?}, got {other:?}"),
    }
}

pub fn run_summary(runs: &[StyledRun]) -> Vec<(&str, &StyleTag)> {
    runs.iter().map(|run| (run.text.as_str(), &run.tag)).collect()
}

/// Checks offsets are contiguous within each block and agree with the
/// document's visible text.
pub fn assert_offsets_consistent(document: &Document) {
    let visible: Vec<char> = document.visible_text().chars().collect();
    for run in document.runs() {
        let slice: String = visible[run.offset..run.offset + run.char_len()].iter().collect();
        assert_eq!(slice, run.text, "run at offset {} disagrees with visible text", run.offset);
    }
    for anchor in document.anchors() {
        assert!(anchor.offset <= visible.len(), "anchor {} past end of text", anchor.id);
    }
}
