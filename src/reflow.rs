//! Paragraph reconstruction from soft-wrapped lines

use crate::config::Thresholds;
use crate::detector::{LineRecord, split_lines};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+\u{2022}\u{2023}\u{2043}\u{25E6}]\s+|\(?\d{1,3}[.)]\s+|[a-zA-Z][.)]\s+)")
        .unwrap()
});

/// How a paragraph's lines are put back together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    /// Soft-wrapped prose, joined with spaces
    Flowing,
    /// Line breaks carry meaning and are kept
    Structured,
}

/// A run of lines between blank lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub kind: ParagraphKind,
    pub lines: Vec<String>,
}

impl Paragraph {
    fn from_buffer(kind: ParagraphKind, buffer: &[&LineRecord]) -> Self {
        let lines = buffer
            .iter()
            .map(|line| match kind {
                ParagraphKind::Flowing => line.trimmed.clone(),
                ParagraphKind::Structured => line.raw.trim_end().to_string(),
            })
            .collect();
        Self { kind, lines }
    }

    #[must_use]
    pub fn text(&self) -> String {
        match self.kind {
            ParagraphKind::Flowing => self.lines.join(" "),
            ParagraphKind::Structured => self.lines.join("\n"),
        }
    }
}

/// Check whether a line starts with a bullet or a number marker
#[must_use]
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

struct Accumulator<'a> {
    paragraphs: Vec<Paragraph>,
    buffer: Vec<&'a LineRecord>,
    kind: ParagraphKind,
}

impl<'a> Accumulator<'a> {
    const fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            buffer: Vec::new(),
            kind: ParagraphKind::Flowing,
        }
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.paragraphs
                .push(Paragraph::from_buffer(self.kind, &self.buffer));
            self.buffer.clear();
        }
    }

    fn push(&mut self, line: &'a LineRecord) {
        self.buffer.push(line);
    }
}

/// Group lines into flowing and structured paragraphs
#[must_use]
pub fn paragraphs(lines: &[LineRecord], thresholds: &Thresholds) -> Vec<Paragraph> {
    let last = lines.len().saturating_sub(1);
    let is_short = |line: &LineRecord| !line.is_blank() && line.len() < thresholds.short_line_len;
    let mut acc = Accumulator::new();

    for (i, line) in lines.iter().enumerate() {
        if line.is_blank() {
            acc.flush();
            acc.kind = ParagraphKind::Flowing;
            continue;
        }

        // Consecutive short lines are deliberate layout
        let follows_short = i > 0 && is_short(&lines[i - 1]);
        if acc.kind == ParagraphKind::Flowing
            && !acc.buffer.is_empty()
            && i != 0
            && i != last
            && is_short(line)
            && follows_short
        {
            acc.kind = ParagraphKind::Structured;
        }

        let marks_structure = is_list_item(&line.raw) || line.indent >= thresholds.indent_width;
        if marks_structure && acc.kind == ParagraphKind::Flowing {
            acc.flush();
            acc.kind = ParagraphKind::Structured;
        }

        acc.push(line);
    }

    acc.flush();
    acc.paragraphs
}

/// Paragraphs separated by a blank line, outer whitespace trimmed
#[must_use]
pub fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(Paragraph::text)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

/// Reflow detector output into the final body text
#[must_use]
pub fn reflow(lines: &[LineRecord], thresholds: &Thresholds) -> String {
    join_paragraphs(&paragraphs(lines, thresholds))
}

/// Reflow plain text, splitting it into lines first
#[must_use]
pub fn reflow_text(text: &str, thresholds: &Thresholds) -> String {
    reflow(&split_lines(text), thresholds)
}
