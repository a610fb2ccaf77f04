// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Body Cleaner
//!
//! Turns a raw plain-text email body, complete with quoted history, reply
//! headers, signatures and soft line wraps, into the text its author
//! actually wrote.
//!
//! # Pipeline
//!
//! - Unicode repair and symbol pruning
//! - Removal of HTML-to-text conversion artifacts
//! - Quote boundary detection over an ordered rule table
//! - Paragraph reflow that keeps lists and deliberate short lines
//!
//! Every stage is a pure function of its input and never fails.
//!
//! # Example
//!
//! ```rust
//! use email_clean::{clean_body, render_html};
//!
//! let raw = "Thanks, see https://example.com.\n\n-----Original Message-----\nFrom: bob@example.com";
//! let body = clean_body(raw);
//!
//! assert_eq!(body, "Thanks, see https://example.com.");
//! println!("{}", render_html(&body));
//! ```

mod artifacts;
mod cleaner;
mod config;
mod detector;
mod error;
mod normalize;
mod reflow;
mod render;
mod source;

pub use artifacts::{clean_artifacts, decode_entities};
pub use cleaner::{CleanedBody, Cleaner, clean_body};
pub use config::{CleanerConfig, Thresholds};
pub use detector::{
    Action, Detection, Gate, LineRecord, RULES, Retract, Rule, RuleName, ScanContext,
    detect_boundary, is_header_line, split_lines,
};
pub use error::{CleanError, Result};
pub use normalize::{SYMBOL_WHITELIST, is_whitelisted_symbol, normalize_unicode};
pub use reflow::{
    Paragraph, ParagraphKind, is_list_item, join_paragraphs, paragraphs, reflow, reflow_text,
};
pub use render::{escape_html, linkify, render_html};
pub use source::{CleanedMessage, RawMessage, clean_thread};
