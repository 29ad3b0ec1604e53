use scenario_core::model::defaults::{default_memos, default_scenes};
use scenario_core::{markdown_preview, render_markdown};

#[test]
fn sample_content_renders_to_html() {
    let scenes = default_scenes();
    let summary = render_markdown(&scenes[0].summary);
    assert!(summary.contains("<strong>館の主</strong>"));
    assert!(summary.contains("<li>兄に相談する</li>"));

    let notes = render_markdown(&scenes[0].notes);
    assert!(notes.contains("<blockquote>"));
    assert!(notes.contains("<em>電話のベル音</em>"));

    let memo = render_markdown(&default_memos()[0].body);
    assert_eq!(memo.matches("<li>").count(), 3);
}

#[test]
fn tables_render_and_html_blocks_are_inert() {
    let html = render_markdown("| 幕 | 分 |\n|---|---|\n| ACT1 | 9 |\n\n<div onclick=\"x()\">hi</div>\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>ACT1</td>"));
    assert!(!html.contains("<div"));
    assert!(html.contains("&lt;div onclick="));
}

#[test]
fn unsafe_destinations_never_reach_the_output() {
    let html = render_markdown(
        "[a](javascript:alert(1)) [b](VBScript:x) ![c](data:text/html,boom) [d](https://example.com)",
    );
    assert!(!html.to_ascii_lowercase().contains("javascript:"));
    assert!(!html.to_ascii_lowercase().contains("vbscript:"));
    assert!(!html.contains("data:text/html"));
    assert!(html.contains(r#"href="https://example.com""#));
}

#[test]
fn preview_is_single_line_plain_text() {
    let scenes = default_scenes();
    let preview = markdown_preview(&scenes[2].summary);
    assert!(!preview.contains('\n'));
    assert!(!preview.contains('*'));
    assert!(preview.starts_with("古い友人に遭遇"));
    assert_eq!(markdown_preview("   "), "");
}
