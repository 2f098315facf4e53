use super::helpers::render_for_test;
use crate::core::message::Role;
use crate::ui::markdown::test_fixtures::{dark_config, light_config, mixed_inline, multiple_blocks};
use crate::ui::markdown::{
    assemble, render_message, tokenize, Document, StyledRun, FORMAT_CALLS, TOKENIZE_CALLS,
};
use crate::ui::recolor::{recolor, recolor_with};
use crate::ui::span::StyleTag;
use crate::ui::theme::{ColorLookup, ColorRole, Palette};
use ratatui::style::Color;

/// Everything recoloring must leave alone.
fn structure(document: &Document) -> Vec<(String, StyleTag, usize)> {
    document
        .runs()
        .map(|run| (run.text.clone(), run.tag.clone(), run.offset))
        .collect()
}

fn anchor_ids(document: &Document) -> Vec<(usize, usize)> {
    document.anchors().map(|a| (a.id.get(), a.offset)).collect()
}

fn fg(run: &StyledRun) -> Color {
    run.appearance.as_ref().expect("colored run").fg
}

#[test]
fn recolor_is_idempotent() {
    let rendered = render_for_test(&mixed_inline());
    let once = recolor(&rendered.document, &dark_config());
    let twice = recolor(&once, &dark_config());
    assert_eq!(once, twice);
}

#[test]
fn recolor_preserves_structure() {
    let rendered = render_for_test(&multiple_blocks());
    let light = &rendered.document;
    let dark = recolor(light, &dark_config());

    assert_eq!(structure(light), structure(&dark));
    assert_eq!(anchor_ids(light), anchor_ids(&dark));
    assert_eq!(light.visible_text(), dark.visible_text());
    assert_eq!(light.block_count(), dark.block_count());
    assert_ne!(light, &dark);
}

#[test]
fn theme_switch_round_trips() {
    let rendered = render_for_test(&mixed_inline());
    let dark = recolor(&rendered.document, &dark_config());
    let back = recolor(&dark, &light_config());
    assert_eq!(back, rendered.document);
}

#[test]
fn recolor_never_tokenizes_or_formats() {
    let mut rendered = render_for_test(&multiple_blocks());
    TOKENIZE_CALLS.with(|calls| calls.set(0));
    FORMAT_CALLS.with(|calls| calls.set(0));

    let _ = recolor(&rendered.document, &dark_config());
    rendered.apply_config(&light_config().with_font_size_adjustment(3));

    assert_eq!(TOKENIZE_CALLS.with(|calls| calls.get()), 0);
    assert_eq!(FORMAT_CALLS.with(|calls| calls.get()), 0);
}

#[test]
fn tags_map_to_palette_roles() {
    let palette = Palette::default();
    let rendered = render_message(
        "# Head\nplain **bold** `code` [link](u)",
        Role::Assistant,
        &dark_config(),
    );
    let runs: Vec<&StyledRun> = rendered.document.runs().collect();

    assert_eq!(fg(runs[0]), palette.color(ColorRole::Label, true));
    for run in &runs[1..] {
        let expected = match run.tag {
            StyleTag::InlineCode => palette.color(ColorRole::Code, true),
            StyleTag::Link(_) => palette.color(ColorRole::Link, true),
            _ => palette.color(ColorRole::AssistantText, true),
        };
        assert_eq!(fg(run), expected, "fg for {:?}", run.text);
    }

    let code = runs.iter().find(|r| r.tag.is_code()).expect("code run");
    assert_eq!(
        code.appearance.as_ref().and_then(|a| a.bg),
        Some(palette.color(ColorRole::CodeBackground, true))
    );
    let plain = runs.iter().find(|r| r.tag == StyleTag::Plain).expect("plain run");
    assert_eq!(plain.appearance.as_ref().and_then(|a| a.bg), None);
}

#[test]
fn role_selects_text_color() {
    let palette = Palette::default();
    let blocks = tokenize("same words");
    let (user, _) = assemble(&blocks, Role::User);
    let (assistant, _) = assemble(&blocks, Role::Assistant);

    let user = recolor(&user, &light_config());
    let assistant = recolor(&assistant, &light_config());
    let user_fg = fg(user.runs().next().expect("run"));
    let assistant_fg = fg(assistant.runs().next().expect("run"));

    assert_eq!(user_fg, palette.color(ColorRole::UserText, false));
    assert_eq!(assistant_fg, palette.color(ColorRole::AssistantText, false));
    assert_ne!(user_fg, assistant_fg);
}

#[test]
fn fonts_follow_class_heading_and_adjustment() {
    let (document, _) = assemble(&tokenize("# Big\nbody `mono`"), Role::Assistant);

    let plain = recolor(&document, &light_config());
    let sizes: Vec<(String, f32)> = plain
        .runs()
        .map(|run| {
            let font = &run.appearance.as_ref().expect("colored").font;
            (font.name().to_string(), font.size())
        })
        .collect();
    assert_eq!(
        sizes,
        vec![
            ("Lucida Grande".to_string(), 19.5),
            ("Lucida Grande".to_string(), 13.0),
            ("Monaco".to_string(), 10.0),
        ]
    );

    let bigger = recolor(&document, &light_config().with_font_size_adjustment(2));
    let body = bigger.runs().nth(1).expect("body run");
    assert_eq!(body.appearance.as_ref().map(|a| a.font.size()), Some(15.0));

    let tiny = recolor(&document, &light_config().with_font_size_adjustment(-20));
    let mono = tiny.runs().last().expect("code run");
    assert_eq!(mono.appearance.as_ref().map(|a| a.font.size()), Some(6.0));
}

#[test]
fn code_widget_appearance_is_set() {
    let rendered = render_for_test(&multiple_blocks());
    let appearance = rendered.document.code_appearance().expect("code appearance");
    let palette = Palette::default();
    assert_eq!(appearance.fg, palette.color(ColorRole::Code, false));
    assert_eq!(appearance.bg, Some(palette.color(ColorRole::CodeBackground, false)));
    assert_eq!(appearance.font.name(), "Monaco");
}

#[test]
fn custom_lookup_is_used_for_every_run() {
    let rendered = render_for_test(&mixed_inline());
    let lookup = |_: ColorRole, _: bool| Color::Magenta;
    let recolored = recolor_with(&rendered.document, &light_config(), &lookup);
    assert!(recolored.runs().all(|run| fg(run) == Color::Magenta));
    assert_eq!(structure(&recolored), structure(&rendered.document));
}
