use email_clean::*;

fn flow(text: &str) -> String {
    reflow_text(text, &Thresholds::default())
}

#[test]
fn test_empty_input() {
    assert_eq!(flow(""), "");
    assert!(paragraphs(&[], &Thresholds::default()).is_empty());
}

#[test]
fn test_soft_wraps_joined() {
    let text = "This is a long line that was wrapped by the client at\nseventy two columns for no good reason at all.";
    assert_eq!(
        flow(text),
        "This is a long line that was wrapped by the client at seventy two columns for no good reason at all."
    );
}

#[test]
fn test_reflow_idempotent() {
    let text = "This is a single paragraph of text that was already reflowed.";
    assert_eq!(flow(text), text);
    assert_eq!(flow(&flow(text)), text);
}

#[test]
fn test_list_block_preserved() {
    let lines = split_lines("Shopping list:\n- Eggs\n- Milk\n- Bread\n\nThanks");
    let paragraphs = paragraphs(&lines, &Thresholds::default());

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].kind, ParagraphKind::Structured);
    assert_eq!(paragraphs[0].text(), "Shopping list:\n- Eggs\n- Milk\n- Bread");
    assert_eq!(paragraphs[1].kind, ParagraphKind::Flowing);
    assert_eq!(paragraphs[1].text(), "Thanks");
    assert_eq!(
        reflow(&lines, &Thresholds::default()),
        "Shopping list:\n- Eggs\n- Milk\n- Bread\n\nThanks"
    );
}

#[test]
fn test_list_after_long_line_starts_new_paragraph() {
    let text = "Steps to follow for the upgrade of the server:\n1. Stop\n2. Upgrade\n3. Start";
    assert_eq!(
        flow(text),
        "Steps to follow for the upgrade of the server:\n\n1. Stop\n2. Upgrade\n3. Start"
    );
}

#[test]
fn test_indented_block_keeps_indentation() {
    let text = "Here is the config you asked about, pasted below:\n    port = 8080\n    host = local\n\nLet me know.";
    assert_eq!(
        flow(text),
        "Here is the config you asked about, pasted below:\n\n    port = 8080\n    host = local\n\nLet me know."
    );
}

#[test]
fn test_consecutive_short_lines_structured() {
    let text = "Please send it to:\n\nJane Doe\n12 Main Street\nSpringfield\n\nThanks for everything you have done for us this year.";
    assert_eq!(
        flow(text),
        "Please send it to:\n\nJane Doe\n12 Main Street\nSpringfield\n\nThanks for everything you have done for us this year."
    );
}

#[test]
fn test_join_paragraphs() {
    let paragraphs = vec![
        Paragraph {
            kind: ParagraphKind::Flowing,
            lines: vec!["Hello".into(), "there".into()],
        },
        Paragraph {
            kind: ParagraphKind::Structured,
            lines: vec!["- a".into(), "- b".into()],
        },
    ];
    assert_eq!(join_paragraphs(&paragraphs), "Hello there\n\n- a\n- b");
    assert_eq!(join_paragraphs(&[]), "");
}

#[test]
fn test_short_last_line_does_not_flip() {
    assert_eq!(flow("First short line\nSecond short"), "First short line Second short");
}

#[test]
fn test_structured_lines_lose_trailing_spaces() {
    let lines = split_lines("- one   \n- two\t");
    let paragraphs = paragraphs(&lines, &Thresholds::default());
    assert_eq!(paragraphs[0].lines, vec!["- one", "- two"]);
}

#[test]
fn test_list_markers() {
    assert!(is_list_item("- item"));
    assert!(is_list_item("* item"));
    assert!(is_list_item("\u{2022} item"));
    assert!(is_list_item("12. item"));
    assert!(is_list_item("3) item"));
    assert!(is_list_item("  b. item"));
    assert!(!is_list_item("-dash"));
    assert!(!is_list_item("2026 was a year"));
}
