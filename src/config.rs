//! Cleaner configuration

use crate::detector::RuleName;
use crate::error::{CleanError, Result};
use serde::{Deserialize, Serialize};

/// Numeric limits used by detection and reflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Signature, disclaimer and dash rules need more retained lines than this
    pub signature_min_lines: usize,

    /// Header rules need more retained lines than this
    pub header_min_lines: usize,

    /// A bare `...wrote:` line must be shorter than this
    pub attribution_max_len: usize,

    /// Lines shorter than this count as short during reflow
    pub short_line_len: usize,

    /// Minimum length of a dash or underscore separator run
    pub long_rule_len: usize,

    /// Leading spaces that mark an indented block
    pub indent_width: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            signature_min_lines: 5,
            header_min_lines: 3,
            attribution_max_len: 100,
            short_line_len: 40,
            long_rule_len: 10,
            indent_width: 3,
        }
    }
}

/// Full cleaner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub thresholds: Thresholds,

    /// Rules left out of detection
    pub disabled_rules: Vec<RuleName>,
}

impl CleanerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let checks = [
            ("short_line_len", t.short_line_len > 0, "must be positive"),
            ("attribution_max_len", t.attribution_max_len > 0, "must be positive"),
            ("long_rule_len", t.long_rule_len >= 3, "must be at least 3"),
            ("indent_width", t.indent_width > 0, "must be positive"),
        ];

        match checks.iter().find(|(_, ok, _)| !ok) {
            Some((field, _, details)) => Err(CleanError::InvalidConfig {
                field: (*field).to_string(),
                details: (*details).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Disable a rule, builder style
    #[must_use]
    pub fn without_rule(mut self, rule: RuleName) -> Self {
        if !self.disabled_rules.contains(&rule) {
            self.disabled_rules.push(rule);
        }
        self
    }

    #[must_use]
    pub fn is_enabled(&self, rule: RuleName) -> bool {
        !self.disabled_rules.contains(&rule)
    }
}
