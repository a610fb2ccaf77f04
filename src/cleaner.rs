//! The cleaning pipeline
//!
//! normalize -> artifacts -> quote boundary -> reflow

use crate::artifacts::clean_artifacts;
use crate::config::CleanerConfig;
use crate::detector::{RuleName, detect_boundary, split_lines};
use crate::normalize::normalize_unicode;
use crate::reflow::{Paragraph, join_paragraphs, paragraphs};
use serde::{Deserialize, Serialize};

/// A cleaned body together with what the pipeline found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedBody {
    /// Final reflowed text
    pub text: String,

    /// Paragraphs the text was built from
    pub paragraphs: Vec<Paragraph>,

    /// Rule that cut the body, if any
    pub stopped_by: Option<RuleName>,

    /// Quoted lines dropped before the cut
    pub skipped_quotes: usize,

    /// Lines kept by detection, blanks included
    pub retained_lines: usize,
}

/// Body cleaner with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    config: CleanerConfig,
}

impl Cleaner {
    #[must_use]
    pub const fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a body and return only the text
    #[must_use]
    pub fn clean<'a>(&self, raw: impl Into<Option<&'a str>>) -> String {
        self.clean_detailed(raw).text
    }

    /// Clean a body and report how it was cut
    #[must_use]
    pub fn clean_detailed<'a>(&self, raw: impl Into<Option<&'a str>>) -> CleanedBody {
        let raw = raw.into().unwrap_or_default();
        if raw.is_empty() {
            return CleanedBody::default();
        }

        let normalized = normalize_unicode(raw);
        let cleaned = clean_artifacts(&normalized);
        let lines = split_lines(&cleaned);
        let detection = detect_boundary(&lines, &self.config);
        let paragraphs = paragraphs(&detection.lines, &self.config.thresholds);

        let text = join_paragraphs(&paragraphs);

        CleanedBody {
            text,
            paragraphs,
            stopped_by: detection.stopped_by,
            skipped_quotes: detection.skipped,
            retained_lines: detection.lines.len(),
        }
    }
}

/// Clean one raw plain-text body with the default rules.
///
/// `None` and `""` both give an empty string.
///
/// ```rust
/// use email_clean::clean_body;
///
/// let body = "Sounds good!\n\nOn Mon, Jan 5, 2026 at 3:00 PM Alice <alice@x.com> wrote:\n> Lunch?";
/// assert_eq!(clean_body(body), "Sounds good!");
/// assert_eq!(clean_body(None), "");
/// ```
#[must_use]
pub fn clean_body<'a>(raw: impl Into<Option<&'a str>>) -> String {
    Cleaner::default().clean(raw)
}
