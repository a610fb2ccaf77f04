//! Messages as handed over by the message source, and their cleaned form

use crate::cleaner::Cleaner;
use crate::error::{CleanError, Result};
use crate::render::render_html;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One message of a conversation before cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Sender display string, passed through untouched
    pub sender: String,

    /// When the message was sent, if known
    pub timestamp: Option<DateTime<Utc>>,

    /// Plain-text body, `None` when the source had none
    pub body: Option<String>,
}

impl RawMessage {
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        body: Option<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            timestamp,
            body,
        }
    }

    /// Read sender, date and plain-text body from an RFC 5322 message
    pub fn from_mime(raw: &[u8]) -> Result<Self> {
        let parsed = mailparse::parse_mail(raw).map_err(|e| CleanError::Mime(e.to_string()))?;

        let sender = header_value(&parsed.headers, "from").unwrap_or_default();
        let timestamp = header_value(&parsed.headers, "date")
            .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let (text, html) = body_parts(&parsed);
        let body = match (text, html) {
            (Some(text), _) => text,
            (None, Some(html)) => html_to_text(&html),
            (None, None) => return Err(CleanError::MissingBody),
        };

        Ok(Self {
            sender,
            timestamp,
            body: Some(body),
        })
    }
}

/// One message after cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedMessage {
    pub sender: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub body: String,
}

impl CleanedMessage {
    /// Body rendered for display
    #[must_use]
    pub fn to_html(&self) -> String {
        render_html(&self.body)
    }
}

impl Cleaner {
    /// Clean every message of a conversation, keeping their order
    #[must_use]
    pub fn clean_thread(&self, messages: &[RawMessage]) -> Vec<CleanedMessage> {
        messages
            .iter()
            .map(|message| {
                let cleaned = self.clean_detailed(message.body.as_deref());
                debug!(
                    "Cleaned message from {}: {} paragraphs, cut by {:?}",
                    message.sender,
                    cleaned.paragraphs.len(),
                    cleaned.stopped_by
                );
                CleanedMessage {
                    sender: message.sender.clone(),
                    timestamp: message.timestamp,
                    body: cleaned.text,
                }
            })
            .collect()
    }
}

/// Clean a conversation with the default rules
#[must_use]
pub fn clean_thread(messages: &[RawMessage]) -> Vec<CleanedMessage> {
    Cleaner::default().clean_thread(messages)
}

fn header_value(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().eq_ignore_ascii_case(name))
        .map(mailparse::MailHeader::get_value)
}

/// First `text/plain` and first `text/html` leaf of the message
fn body_parts(parsed: &mailparse::ParsedMail) -> (Option<String>, Option<String>) {
    let mut text = None;
    let mut html = None;
    collect_parts(parsed, &mut text, &mut html);
    (text, html)
}

fn collect_parts(
    part: &mailparse::ParsedMail,
    text: &mut Option<String>,
    html: &mut Option<String>,
) {
    if part.subparts.is_empty() {
        let content_type = part.ctype.mimetype.to_lowercase();
        if let Ok(body) = part.get_body() {
            if content_type.contains("text/html") {
                if html.is_none() {
                    *html = Some(body);
                }
            } else if content_type.contains("text/plain") && text.is_none() {
                *text = Some(body);
            }
        }
        return;
    }

    for sub in &part.subparts {
        collect_parts(sub, text, html);
    }
}

/// Crude HTML to text: tags dropped, block ends become newlines.
///
/// Entities and link duplicates are left for the artifact cleaner.
fn html_to_text(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut skipping = false;
    let mut tag = String::new();

    for c in html.chars() {
        match (in_tag, c) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                let name = tag.trim().to_lowercase();
                if name.starts_with("script") || name.starts_with("style") {
                    skipping = true;
                } else if name.starts_with("/script") || name.starts_with("/style") {
                    skipping = false;
                } else if ["br", "/p", "/div", "/li", "/h", "/tr"]
                    .iter()
                    .any(|block| name.starts_with(block))
                {
                    result.push('\n');
                }
            }
            (true, _) => tag.push(c),
            (false, _) if !skipping => result.push(c),
            (false, _) => {}
        }
    }

    result
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
