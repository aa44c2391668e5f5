use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn frame(source: &str, line: Option<usize>, column: Option<isize>, above: usize, below: usize) -> String {
    code_frame(
        source,
        line,
        column,
        &CodeFrameOptions::default().with_context(above, below),
    )
}

#[test]
fn test_window_with_caret() {
    let out = frame("a\nb\nc\nd\ne", Some(3), Some(1), 1, 1);
    assert_eq!(out, "  2 | b\n> 3 | c\n    | ^\n  4 | d");
}

#[test]
fn test_default_context() {
    let source = "1\n2\n3\n4\n5\n6\n7\n8\n9";
    let out = code_frame(source, Some(5), None, &CodeFrameOptions::default());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.first().copied(), Some("  3 | 3"));
    assert_eq!(lines.last().copied(), Some("  8 | 8"));
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_zero_context_shows_only_target() {
    let out = frame("x\ny\nz", Some(2), Some(1), 0, 0);
    assert_eq!(out, "> 2 | y\n    | ^");
}

#[test]
fn test_caret_column_and_tabs() {
    let out = frame("\tlet x = ;", Some(1), Some(10), 0, 0);
    assert_eq!(out, "> 1 | \tlet x = ;\n    | \t        ^");
}

#[test]
fn test_no_column_omits_caret() {
    assert_eq!(frame("a\nb", Some(2), None, 1, 0), "  1 | a\n> 2 | b");
    assert_eq!(frame("a\nb", Some(2), Some(0), 1, 0), "  1 | a\n> 2 | b");
    assert_eq!(frame("a\nb", Some(2), Some(-4), 1, 0), "  1 | a\n> 2 | b");
}

#[test]
fn test_no_line_renders_whole_source() {
    assert_eq!(frame("a\nb\nc", None, None, 0, 0), "  1 | a\n  2 | b\n  3 | c");
}

#[test]
fn test_gutter_pads_to_widest_number() {
    let source: String = (1..=12).map(|n| format!("l{n}\n")).collect();
    let out = frame(&source, Some(9), None, 1, 1);
    assert_eq!(out, "   8 | l8\n>  9 | l9\n  10 | l10");
}

#[test]
fn test_line_terminators() {
    assert_eq!(split_lines("a\r\nb\rc\u{2028}d\ne"), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_line_past_end_is_clamped() {
    assert_eq!(frame("a\nb", Some(7), Some(1), 1, 1), "");
    assert_eq!(frame("a\nb", Some(3), None, 1, 0), "  2 | b");
}

#[test]
fn test_highlight_wraps_marker() {
    let out = code_frame(
        "x",
        Some(1),
        Some(1),
        &CodeFrameOptions::default().with_highlight(true),
    );
    assert!(out.contains("\x1b[1;31m>\x1b[0m"));
    assert!(out.contains("\x1b[1;31m^\x1b[0m"));
}

proptest! {
    #[test]
    fn prop_frame_line_count(
        total in 1usize..40,
        target in 1usize..40,
        above in 0usize..6,
        below in 0usize..6,
    ) {
        prop_assume!(target <= total);
        let source = vec!["x"; total].join("\n");
        let out = frame(&source, Some(target), Some(1), above, below);
        let expected_source_lines = (total.min(target + below)) - target.saturating_sub(above + 1);
        // One extra line for the caret.
        prop_assert_eq!(out.lines().count(), expected_source_lines + 1);
        prop_assert_eq!(out.lines().filter(|l| l.starts_with('>')).count(), 1);
    }
}
