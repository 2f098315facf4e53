use super::helpers::{assert_offsets_consistent, render_for_test};
use crate::core::message::Role;
use crate::ui::markdown::test_fixtures::{
    adjacent_to_text, blocks_across_messages, empty_block, light_config, mixed_inline,
    multiple_blocks, nested_in_list, single_block,
};
use crate::ui::markdown::{assemble, tokenize, BlockKind, DocItem, ListMarker};
use crate::ui::span::{CodeBlockId, FontClass, StyleTag};

#[test]
fn single_block_becomes_one_anchor_and_record() {
    let rendered = render_for_test(&single_block());
    let document = &rendered.document;

    assert_eq!(document.block_count(), 2);
    assert_eq!(document.blocks()[1].kind, BlockKind::CodeFence);
    let anchors: Vec<_> = document.anchors().collect();
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].id, CodeBlockId::new(0));

    let record = rendered.registry.lookup(CodeBlockId::new(0)).expect("record");
    assert_eq!(record.raw_text(), "fn main() {}");
    assert_eq!(record.language(), Some("rust"));
    assert_eq!(rendered.registry.copy_text(CodeBlockId::new(0)), Some("fn main() {}"));
}

#[test]
fn anchors_are_unique_and_in_source_order() {
    let rendered = render_for_test(&multiple_blocks());
    let ids: Vec<usize> = rendered.document.anchors().map(|a| a.id.get()).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    let languages: Vec<Option<&str>> = rendered.registry.all().map(|r| r.language()).collect();
    assert_eq!(languages, vec![Some("rust"), Some("python"), None]);
    assert_eq!(rendered.registry.len(), 3);
    assert_eq!(
        rendered.registry.copy_text(CodeBlockId::new(1)),
        Some("def greet():\n    print(\"Hello\")")
    );
}

#[test]
fn ids_restart_for_each_message() {
    let first_ids: Vec<Vec<usize>> = blocks_across_messages()
        .iter()
        .map(|message| {
            render_for_test(message)
                .document
                .anchors()
                .map(|a| a.id.get())
                .collect()
        })
        .collect();
    assert_eq!(first_ids, vec![vec![], vec![0], vec![], vec![0]]);
}

#[test]
fn code_between_list_items_stays_separate() {
    let rendered = render_for_test(&nested_in_list());
    let kinds: Vec<BlockKind> = rendered.document.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::ListItem(ListMarker::Ordered(1)),
            BlockKind::CodeFence,
            BlockKind::ListItem(ListMarker::Ordered(2)),
            BlockKind::CodeFence,
        ]
    );
    assert_eq!(
        rendered.registry.copy_text(CodeBlockId::new(1)),
        Some("   fn step_two() {}")
    );
}

#[test]
fn empty_code_block_still_gets_an_anchor() {
    let rendered = render_for_test(&empty_block());
    assert_eq!(rendered.document.block_count(), 3);
    let anchor = rendered.document.anchor(CodeBlockId::new(0)).expect("anchor");
    assert_eq!(anchor.line_count, 1);
    assert_eq!(anchor.max_columns, 0);
    assert_eq!(rendered.registry.copy_text(CodeBlockId::new(0)), Some(""));
}

#[test]
fn anchor_offsets_sit_between_block_separators() {
    let rendered = render_for_test(&adjacent_to_text());
    let document = &rendered.document;
    assert_eq!(document.visible_text(), "Before\n\nAfter");
    assert_eq!(document.anchor(CodeBlockId::new(0)).map(|a| a.offset), Some(7));
    let after = document.runs().last().expect("trailing run");
    assert_eq!(after.text, "After");
    assert_eq!(after.offset, 8);
    assert_offsets_consistent(document);
}

#[test]
fn code_bodies_never_enter_the_run_stream() {
    let rendered = render_for_test(&multiple_blocks());
    let visible = rendered.document.visible_text();
    assert!(!visible.contains("println"));
    assert!(!visible.contains("def greet"));
    assert!(visible.contains("And some Python:"));
    assert_offsets_consistent(&rendered.document);
}

#[test]
fn mixed_inline_runs_carry_styles_and_fonts() {
    let rendered = render_for_test(&mixed_inline());
    let runs: Vec<_> = rendered.document.runs().collect();
    let summary: Vec<(&str, &StyleTag)> = runs.iter().map(|r| (r.text.as_str(), &r.tag)).collect();
    assert_eq!(summary[0], ("Use ", &StyleTag::Plain));
    assert_eq!(summary[1], ("cargo", &StyleTag::InlineCode));
    assert_eq!(summary[3], ("bold ", &StyleTag::Bold));
    assert_eq!(summary[4], ("and italic", &StyleTag::Italic));
    assert_eq!(summary[5], (" text", &StyleTag::Bold));
    assert_eq!(summary[7].0, "docs");
    assert!(summary[7].1.is_link());
    assert_eq!(summary.last().map(|s| s.0), Some("."));

    for run in &runs {
        let expected = if run.tag.is_code() {
            FontClass::Monospace
        } else {
            FontClass::Proportional
        };
        assert_eq!(run.font, expected, "font for {:?}", run.text);
    }
    assert_offsets_consistent(&rendered.document);
}

#[test]
fn headings_keep_their_level() {
    let (document, records) = assemble(&tokenize("# Top\n### Third\ntext"), Role::User);
    let kinds: Vec<BlockKind> = document.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Heading(1), BlockKind::Heading(3), BlockKind::Paragraph]
    );
    assert!(records.is_empty());
    assert_eq!(document.role(), Role::User);
}

#[test]
fn assembled_runs_are_uncolored_until_recolor() {
    let (document, _) = assemble(&tokenize("plain `code`"), Role::Assistant);
    assert!(document.runs().all(|run| run.appearance.is_none()));
    assert!(document.code_appearance().is_none());
}

#[test]
fn unknown_ids_are_none() {
    let mut rendered = render_for_test(&single_block());
    let missing = CodeBlockId::new(42);
    assert!(rendered.registry.lookup(missing).is_none());
    assert!(rendered.registry.copy_text(missing).is_none());
    assert!(rendered.document.anchor(missing).is_none());

    rendered.clear_code_blocks();
    assert!(rendered.registry.is_empty());
    assert!(rendered.registry.copy_text(CodeBlockId::new(0)).is_none());
}

#[test]
fn message_render_matches_render_message() {
    let message = single_block();
    assert_eq!(message.render(&light_config()), render_for_test(&message));
}

#[test]
fn block_items_hold_runs_or_one_anchor() {
    let rendered = render_for_test(&multiple_blocks());
    for block in rendered.document.blocks() {
        let anchors = block
            .items
            .iter()
            .filter(|item| matches!(item, DocItem::Anchor(_)))
            .count();
        match block.kind {
            BlockKind::CodeFence => {
                assert_eq!(anchors, 1);
                assert_eq!(block.items.len(), 1);
            }
            _ => assert_eq!(anchors, 0),
        }
    }
}
