//! Tests for tokenizing, numbering and windowing.

use par_trace_config::{HighlightTheme, Style};

use super::highlight::{Highlighter, SourceLine, TokenKind, TokenRun, number_lines, tokenize};

fn run(kind: TokenKind, text: &str) -> TokenRun {
    TokenRun {
        kind,
        text: text.to_string(),
    }
}

/// `count` numbered statements, one per line.
fn numbered_source(count: usize) -> String {
    (1..=count).map(|i| format!("x{i} = {i}\n")).collect()
}

fn plain(lines: &[super::DisplayLine]) -> Vec<String> {
    lines.iter().map(|l| l.line.plain_text()).collect()
}

// -- Classification --

#[test]
fn test_raise_statement_runs() {
    let lines = tokenize("    raise Exception(\"Failed\")\n").unwrap();
    assert_eq!(
        lines[0].runs,
        vec![
            run(TokenKind::Default, "    "),
            run(TokenKind::Keyword, "raise "),
            run(TokenKind::Builtin, "Exception"),
            run(TokenKind::Operator, "("),
            run(TokenKind::String, "\"Failed\""),
            run(TokenKind::Operator, ")"),
        ]
    );
}

#[test]
fn test_keyword_beats_builtin() {
    let lines = tokenize("None").unwrap();
    assert_eq!(lines[0].runs, vec![run(TokenKind::Keyword, "None")]);
}

#[test]
fn test_numbers_and_comments() {
    let lines = tokenize("n = 0x1F  # hex").unwrap();
    assert_eq!(
        lines[0].runs,
        vec![
            run(TokenKind::Default, "n "),
            run(TokenKind::Operator, "= "),
            run(TokenKind::Number, "0x1F  "),
            run(TokenKind::Comment, "# hex"),
        ]
    );
}

#[test]
fn test_adjacent_same_kind_tokens_coalesce() {
    let lines = tokenize("if a not in b: f()").unwrap();
    assert_eq!(
        lines[0].runs,
        vec![
            run(TokenKind::Keyword, "if "),
            run(TokenKind::Default, "a "),
            run(TokenKind::Keyword, "not in "),
            run(TokenKind::Default, "b"),
            run(TokenKind::Operator, ": "),
            run(TokenKind::Default, "f"),
            run(TokenKind::Operator, "()"),
        ]
    );
}

#[test]
fn test_continuation_and_error_tokens_are_default() {
    let lines = tokenize("x = $ + \\\n  1\n").unwrap();
    assert_eq!(
        lines[0].runs,
        vec![
            run(TokenKind::Default, "x "),
            run(TokenKind::Operator, "= "),
            run(TokenKind::Default, "$ "),
            run(TokenKind::Operator, "+ "),
            run(TokenKind::Default, "\\"),
        ]
    );
    assert_eq!(
        lines[1].runs,
        vec![run(TokenKind::Default, "  "), run(TokenKind::Number, "1")]
    );
}

// -- Line assembly --

#[test]
fn test_line_count_matches_physical_lines() {
    let source = "def f():\n\n    '''doc\n\n    string'''\n\n\n    return 1\n";
    let lines = tokenize(source).unwrap();
    assert_eq!(lines.len(), source.lines().count());
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[1], SourceLine::default());
    assert_eq!(lines[5], SourceLine::default());
}

#[test]
fn test_reassembled_lines_equal_source() {
    let source = "class A(object):\t# note\n    x = [1,\n         2]  \n\n    s = r'\\d+'   \n";
    let lines = tokenize(source).unwrap();
    let rebuilt: Vec<String> = lines.iter().map(SourceLine::text).collect();
    let expected: Vec<&str> = source.lines().collect();
    assert_eq!(rebuilt, expected);
}

#[test]
fn test_multiline_string_is_split_per_line() {
    let lines = tokenize("s = '''one\ntwo'''\nx").unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0].runs,
        vec![
            run(TokenKind::Default, "s "),
            run(TokenKind::Operator, "= "),
            run(TokenKind::String, "'''one"),
        ]
    );
    assert_eq!(lines[1].runs, vec![run(TokenKind::String, "two'''")]);
    assert_eq!(lines[2].runs, vec![run(TokenKind::Default, "x")]);
}

#[test]
fn test_line_endings_are_normalized() {
    let lines = tokenize("a\r\nb\rc").unwrap();
    let texts: Vec<String> = lines.iter().map(SourceLine::text).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn test_empty_source_has_no_lines() {
    assert!(tokenize("").unwrap().is_empty());
}

#[test]
fn test_lex_errors_propagate() {
    let err = tokenize("value = compute(\n    1,\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(Highlighter::default().snippet("x = '''open", 1).is_err());
}

// -- Line numbering --

#[test]
fn test_number_lines_layout() {
    let lines = tokenize(&numbered_source(10)).unwrap();
    let numbered = number_lines(&lines, Some(3), &HighlightTheme::default());
    assert_eq!(numbered.len(), 10);
    assert_eq!(numbered[0].line.plain_text(), "     1| x1 = 1");
    assert_eq!(numbered[2].line.plain_text(), "  >  3| x3 = 3");
    assert_eq!(numbered[9].line.plain_text(), "    10| x10 = 10");
}

#[test]
fn test_number_lines_styles() {
    let theme = HighlightTheme::default();
    let lines = tokenize("a\nb\n").unwrap();
    let numbered = number_lines(&lines, Some(2), &theme);

    let unmarked = &numbered[0].line.segments;
    assert_eq!(unmarked[0].text, "    ");
    assert_eq!(unmarked[1].text, "1");
    assert_eq!(unmarked[1].style, theme.line_number);
    assert_eq!(unmarked[2].text, "|");
    assert_eq!(unmarked[2].style, theme.line_number);

    let marked = &numbered[1].line.segments;
    assert_eq!(marked[1].text, ">");
    assert_eq!(marked[1].style, theme.line_marker);
    assert_eq!(marked[3].text, "2");
    assert_eq!(marked[3].style, Style::BOLD);
}

#[test]
fn test_blank_lines_keep_gutter() {
    let lines = tokenize("a\n\nb").unwrap();
    let numbered = number_lines(&lines, None, &HighlightTheme::default());
    assert_eq!(plain(&numbered), vec!["    1| a", "    2| ", "    3| b"]);
}

#[test]
fn test_unmarked_numbering_has_no_marker() {
    let lines = tokenize(&numbered_source(3)).unwrap();
    let numbered = number_lines(&lines, None, &HighlightTheme::default());
    assert!(numbered.iter().all(|l| !l.marked));
}

// -- Snippet windows --

#[test]
fn test_snippet_centered_window() {
    let snippet = Highlighter::default()
        .snippet_with_context(&numbered_source(20), 12, 4, 4)
        .unwrap();
    let numbers: Vec<usize> = snippet.iter().map(|l| l.number).collect();
    assert_eq!(numbers, (8..=16).collect::<Vec<_>>());

    let marked: Vec<usize> = snippet.iter().filter(|l| l.marked).map(|l| l.number).collect();
    assert_eq!(marked, vec![12]);
}

#[test]
fn test_snippet_clamped_at_top() {
    let snippet = Highlighter::default()
        .snippet_with_context(&numbered_source(10), 1, 4, 4)
        .unwrap();
    let numbers: Vec<usize> = snippet.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert!(snippet[0].marked);
}

#[test]
fn test_snippet_near_top_is_not_padded_below() {
    let snippet = Highlighter::default()
        .snippet_with_context(&numbered_source(20), 3, 4, 2)
        .unwrap();
    let numbers: Vec<usize> = snippet.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_snippet_huge_context_saturates() {
    let highlighter = Highlighter::default();
    let source = numbered_source(4);
    let all = highlighter
        .snippet_with_context(&source, 2, usize::MAX, usize::MAX)
        .unwrap();
    assert_eq!(all.len(), 4);
    let tail = highlighter.snippet_with_context(&source, 3, 0, usize::MAX).unwrap();
    assert_eq!(tail.iter().map(|l| l.number).collect::<Vec<_>>(), vec![3, 4]);
    let head = highlighter.snippet_with_context(&source, 1, usize::MAX, 0).unwrap();
    assert_eq!(plain(&head), vec!["  > 1| x1 = 1"]);
}

#[test]
fn test_snippet_short_file_at_top() {
    let snippet = Highlighter::default()
        .snippet_with_context(&numbered_source(3), 1, 4, 4)
        .unwrap();
    assert_eq!(snippet.len(), 3);
}

#[test]
fn test_snippet_runs_off_the_end() {
    let snippet = Highlighter::default()
        .snippet(&numbered_source(10), 10)
        .unwrap();
    let numbers: Vec<usize> = snippet.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![8, 9, 10]);
}

#[test]
fn test_snippet_single_line_file() {
    let snippet = Highlighter::default().snippet("boom()", 1).unwrap();
    assert_eq!(snippet.len(), 1);
    assert!(snippet[0].marked);
    assert_eq!(snippet[0].line.plain_text(), "  > 1| boom()");
}

#[test]
fn test_snippet_line_past_end_is_empty() {
    let snippet = Highlighter::default()
        .snippet(&numbered_source(5), 40)
        .unwrap();
    assert!(snippet.is_empty());
}

#[test]
fn test_snippet_gutter_width_uses_total_line_count() {
    let snippet = Highlighter::default()
        .snippet(&numbered_source(120), 3)
        .unwrap();
    assert_eq!(
        plain(&snippet),
        vec![
            "      1| x1 = 1",
            "      2| x2 = 2",
            "  >   3| x3 = 3",
            "      4| x4 = 4",
            "      5| x5 = 5",
        ]
    );
}

#[test]
fn test_snippet_uses_custom_theme() {
    let mut theme = HighlightTheme::default();
    theme.keyword = Style::BOLD;
    let snippet = Highlighter::new(theme.clone()).snippet("pass", 1).unwrap();
    let code = snippet[0].line.segments.last().unwrap();
    assert_eq!(code.text, "pass");
    assert_eq!(code.style, theme.keyword);
}
