//! Quote boundary detection
//!
//! Lines are scanned top to bottom against an ordered rule table. The first
//! rule whose predicate holds decides what happens to the line:
//!
//! - [`Action::Retain`] appends it and resets the header run
//! - [`Action::RetainHeader`] appends it and extends the header run
//! - [`Action::Skip`] drops it and keeps scanning
//! - [`Action::Stop`] ends the scan, optionally retracting the last kept line
//!
//! Once a scan stops nothing after the stopping line is looked at again.

use crate::config::{CleanerConfig, Thresholds};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// One line of the body as seen by the detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Position in the original body
    pub index: usize,

    /// Line as written
    pub raw: String,

    /// Line without surrounding whitespace
    pub trimmed: String,

    /// Lowercased trimmed line
    pub lower: String,

    /// Count of leading whitespace characters
    pub indent: usize,
}

impl LineRecord {
    #[must_use]
    pub fn new(index: usize, raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            index,
            raw: raw.to_string(),
            trimmed: trimmed.to_string(),
            lower: trimmed.to_lowercase(),
            indent: raw.chars().take_while(|c| c.is_whitespace()).count(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Trimmed length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.trimmed.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_blank()
    }
}

/// Split text into line records, treating `\r\n` and `\r` as `\n`
#[must_use]
pub fn split_lines(text: &str) -> Vec<LineRecord> {
    if text.is_empty() {
        return Vec::new();
    }
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .enumerate()
        .map(|(index, raw)| LineRecord::new(index, raw))
        .collect()
}

/// Name of a detection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    BlankLine,
    Disclaimer,
    CollapsedQuote,
    ForwardBanner,
    DashSeparator,
    WroteLine,
    NameEmailWrote,
    ReplyHeader,
    HeaderPair,
    SentHeader,
    Signature,
    QuotedLine,
    HeaderLine,
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlankLine => "blank_line",
            Self::Disclaimer => "disclaimer",
            Self::CollapsedQuote => "collapsed_quote",
            Self::ForwardBanner => "forward_banner",
            Self::DashSeparator => "dash_separator",
            Self::WroteLine => "wrote_line",
            Self::NameEmailWrote => "name_email_wrote",
            Self::ReplyHeader => "reply_header",
            Self::HeaderPair => "header_pair",
            Self::SentHeader => "sent_header",
            Self::Signature => "signature",
            Self::QuotedLine => "quoted_line",
            Self::HeaderLine => "header_line",
        };
        write!(f, "{name}")
    }
}

/// What to do with the last retained line when a scan stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retract {
    Nothing,
    /// Drop the last retained line
    LastLine,
    /// Drop the preceding input line if it is a retained `From:` header
    PrecedingFrom,
}

/// Outcome of a matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Retain,
    RetainHeader,
    Skip,
    Stop(Retract),
}

/// Minimum number of retained lines before a rule may fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// More than `signature_min_lines` retained
    SignatureLines,
    /// More than `header_min_lines` retained
    HeaderLines,
}

impl Gate {
    #[must_use]
    pub const fn is_open(self, retained: usize, thresholds: &Thresholds) -> bool {
        match self {
            Self::Always => true,
            Self::SignatureLines => retained > thresholds.signature_min_lines,
            Self::HeaderLines => retained > thresholds.header_min_lines,
        }
    }
}

/// Everything a rule predicate may look at
#[derive(Debug)]
pub struct ScanContext<'a> {
    pub lines: &'a [LineRecord],
    pub index: usize,
    pub retained: &'a [LineRecord],
    pub header_run: usize,
    pub thresholds: &'a Thresholds,
}

impl ScanContext<'_> {
    #[must_use]
    pub fn line(&self) -> &LineRecord {
        &self.lines[self.index]
    }

    /// Up to `count` lines following the current one
    #[must_use]
    pub fn following(&self, count: usize) -> &[LineRecord] {
        let start = (self.index + 1).min(self.lines.len());
        let end = (start + count).min(self.lines.len());
        &self.lines[start..end]
    }

    #[must_use]
    pub fn preceding(&self) -> Option<&LineRecord> {
        self.index.checked_sub(1).map(|i| &self.lines[i])
    }
}

/// A detection rule: predicate, gate and action
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: RuleName,
    pub gate: Gate,
    pub action: Action,
    pub matches: fn(&ScanContext<'_>) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

static DISCLAIMER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:confidentiality notice|confidential(?:ity)?:|disclaimer:|this (?:e-?mail|message|communication)(?:,? (?:and|including) any attachments?,?)? (?:is|are|may contain|contains) (?:confidential|privileged|intended)|the information (?:contained )?in this (?:e-?mail|message|communication))",
    )
    .unwrap()
});

static COLLAPSED_QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\.{3,}|…+|\[(?:\.{3}|…)\])$").unwrap());

static FORWARD_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:-+\s*(?:forwarded|original) message\s*-*|begin forwarded message:?|-+\s*forwarded by .*)$",
    )
    .unwrap()
});

static WROTE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bwrote:$").unwrap());

static NAME_EMAIL_WROTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.+<[^<>\s]+@[^<>\s]+>\s*(?:wrote|said|a écrit)\s*:$").unwrap()
});

static REPLY_HEADER_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^on\s+(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s|\d{1,4}[-/.]\d|\d{1,2}(?:st|nd|rd|th)?\s)",
    )
    .unwrap()
});

static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*?(?:from|to|cc|subject|date)\*?:").unwrap());

static SENT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\*?sent\*?:").unwrap());

static ADJACENT_TO_SENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*?(?:from|to|subject)\*?:").unwrap());

static FROM_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\*?from\*?:").unwrap());

static SIGNATURE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:--|__|\*\*\*)$").unwrap());

static MOBILE_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:sent from my\b|sent from (?:outlook|yahoo mail|mail for windows|gmail)|get outlook for (?:ios|android)|sent via\b|envoyé de mon\b)",
    )
    .unwrap()
});

/// Check whether a line is a `From:`/`To:`/`Cc:`/`Subject:`/`Date:` header
#[must_use]
pub fn is_header_line(line: &LineRecord) -> bool {
    HEADER_LINE.is_match(&line.trimmed)
}

fn is_run_of(line: &LineRecord, c: char, min_len: usize) -> bool {
    line.len() >= min_len && line.trimmed.chars().all(|x| x == c)
}

fn blank_line(ctx: &ScanContext<'_>) -> bool {
    ctx.line().is_blank()
}

fn disclaimer(ctx: &ScanContext<'_>) -> bool {
    DISCLAIMER.is_match(&ctx.line().trimmed)
}

fn collapsed_quote(ctx: &ScanContext<'_>) -> bool {
    COLLAPSED_QUOTE.is_match(&ctx.line().trimmed)
}

fn forward_banner(ctx: &ScanContext<'_>) -> bool {
    let line = ctx.line();
    FORWARD_BANNER.is_match(&line.trimmed) || is_run_of(line, '_', ctx.thresholds.long_rule_len)
}

fn dash_separator(ctx: &ScanContext<'_>) -> bool {
    is_run_of(ctx.line(), '-', ctx.thresholds.long_rule_len)
}

fn wrote_line(ctx: &ScanContext<'_>) -> bool {
    let line = ctx.line();
    line.len() < ctx.thresholds.attribution_max_len && WROTE_LINE.is_match(&line.trimmed)
}

fn name_email_wrote(ctx: &ScanContext<'_>) -> bool {
    NAME_EMAIL_WROTE.is_match(&ctx.line().trimmed)
}

fn reply_header(ctx: &ScanContext<'_>) -> bool {
    let line = ctx.line();
    if !REPLY_HEADER_DATE.is_match(&line.trimmed) {
        return false;
    }
    line.lower.contains("wrote:")
        || ctx.following(3).iter().any(|l| l.lower.contains("wrote:"))
        || ctx.following(2).iter().any(|l| FROM_LINE.is_match(&l.trimmed))
}

fn header_pair(ctx: &ScanContext<'_>) -> bool {
    ctx.header_run > 0 && is_header_line(ctx.line())
}

fn sent_header(ctx: &ScanContext<'_>) -> bool {
    if !SENT_LINE.is_match(&ctx.line().trimmed) {
        return false;
    }
    let adjacent = |l: &LineRecord| ADJACENT_TO_SENT.is_match(&l.trimmed);
    ctx.preceding().is_some_and(adjacent) || ctx.following(1).iter().any(adjacent)
}

fn signature(ctx: &ScanContext<'_>) -> bool {
    let line = ctx.line();
    SIGNATURE_SEPARATOR.is_match(&line.trimmed) || MOBILE_SIGNATURE.is_match(&line.trimmed)
}

fn quoted_line(ctx: &ScanContext<'_>) -> bool {
    ctx.line().trimmed.starts_with('>')
}

fn header_line(ctx: &ScanContext<'_>) -> bool {
    is_header_line(ctx.line())
}

/// The rule table, in evaluation order
pub static RULES: &[Rule] = &[
    Rule {
        name: RuleName::BlankLine,
        gate: Gate::Always,
        action: Action::Retain,
        matches: blank_line,
    },
    Rule {
        name: RuleName::Disclaimer,
        gate: Gate::SignatureLines,
        action: Action::Stop(Retract::Nothing),
        matches: disclaimer,
    },
    Rule {
        name: RuleName::CollapsedQuote,
        gate: Gate::Always,
        action: Action::Stop(Retract::Nothing),
        matches: collapsed_quote,
    },
    Rule {
        name: RuleName::ForwardBanner,
        gate: Gate::Always,
        action: Action::Stop(Retract::Nothing),
        matches: forward_banner,
    },
    Rule {
        name: RuleName::DashSeparator,
        gate: Gate::SignatureLines,
        action: Action::Stop(Retract::Nothing),
        matches: dash_separator,
    },
    Rule {
        name: RuleName::WroteLine,
        gate: Gate::Always,
        action: Action::Stop(Retract::Nothing),
        matches: wrote_line,
    },
    Rule {
        name: RuleName::NameEmailWrote,
        gate: Gate::Always,
        action: Action::Stop(Retract::Nothing),
        matches: name_email_wrote,
    },
    Rule {
        name: RuleName::ReplyHeader,
        gate: Gate::Always,
        action: Action::Stop(Retract::Nothing),
        matches: reply_header,
    },
    Rule {
        name: RuleName::HeaderPair,
        gate: Gate::HeaderLines,
        action: Action::Stop(Retract::LastLine),
        matches: header_pair,
    },
    Rule {
        name: RuleName::SentHeader,
        gate: Gate::HeaderLines,
        action: Action::Stop(Retract::PrecedingFrom),
        matches: sent_header,
    },
    Rule {
        name: RuleName::Signature,
        gate: Gate::SignatureLines,
        action: Action::Stop(Retract::Nothing),
        matches: signature,
    },
    Rule {
        name: RuleName::QuotedLine,
        gate: Gate::Always,
        action: Action::Skip,
        matches: quoted_line,
    },
    Rule {
        name: RuleName::HeaderLine,
        gate: Gate::HeaderLines,
        action: Action::RetainHeader,
        matches: header_line,
    },
];

/// Result of a detection pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Retained lines, in original order, trailing blanks removed
    pub lines: Vec<LineRecord>,

    /// Rule that ended the scan, `None` if the input ran out
    pub stopped_by: Option<RuleName>,

    /// Index of the line that ended the scan
    pub stopped_at: Option<usize>,

    /// Number of quoted lines skipped
    pub skipped: usize,
}

impl Detection {
    /// Retained lines joined back into text
    #[must_use]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// First enabled rule matching the line at `ctx.index`
fn first_match(ctx: &ScanContext<'_>, config: &CleanerConfig) -> Option<&'static Rule> {
    RULES.iter().find(|rule| {
        config.is_enabled(rule.name)
            && rule.gate.is_open(ctx.retained.len(), ctx.thresholds)
            && (rule.matches)(ctx)
    })
}

/// Scan `lines` and keep the new content above the first quote boundary
#[must_use]
pub fn detect_boundary(lines: &[LineRecord], config: &CleanerConfig) -> Detection {
    let mut retained: Vec<LineRecord> = Vec::new();
    let mut header_run = 0usize;
    let mut skipped = 0usize;
    let mut stop = None;

    for (index, line) in lines.iter().enumerate() {
        let ctx = ScanContext {
            lines,
            index,
            retained: &retained,
            header_run,
            thresholds: &config.thresholds,
        };
        let Some(rule) = first_match(&ctx, config) else {
            retained.push(line.clone());
            header_run = 0;
            continue;
        };

        match rule.action {
            Action::Retain => {
                retained.push(line.clone());
                header_run = 0;
            }
            Action::RetainHeader => {
                retained.push(line.clone());
                header_run += 1;
            }
            Action::Skip => skipped += 1,
            Action::Stop(retract) => {
                let retract_last = match retract {
                    Retract::Nothing => false,
                    Retract::LastLine => true,
                    Retract::PrecedingFrom => retained.last().is_some_and(|last| {
                        last.index + 1 == index && FROM_LINE.is_match(&last.trimmed)
                    }),
                };
                if retract_last && let Some(dropped) = retained.pop() {
                    trace!("Retracted line {}: {}", dropped.index, dropped.trimmed);
                }
                debug!(
                    "Quote boundary at line {} by {}, {} lines retained",
                    index,
                    rule.name,
                    retained.len()
                );
                stop = Some((rule.name, index));
                break;
            }
        }
    }

    while retained.last().is_some_and(LineRecord::is_blank) {
        retained.pop();
    }

    Detection {
        lines: retained,
        stopped_by: stop.map(|(name, _)| name),
        stopped_at: stop.map(|(_, index)| index),
        skipped,
    }
}
