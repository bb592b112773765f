// Tool parameter types and validation shared by the clients and the tools

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failure for a caller-supplied argument
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains invalid characters: {value}")]
    InvalidCharacters { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Time window for top posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Hour,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order for subreddit search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SearchSort {
    pub const ALL: [SearchSort; 5] = [
        SearchSort::Relevance,
        SearchSort::Hot,
        SearchSort::Top,
        SearchSort::New,
        SearchSort::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Relevance => "relevance",
            SearchSort::Hot => "hot",
            SearchSort::Top => "top",
            SearchSort::New => "new",
            SearchSort::Comments => "comments",
        }
    }
}

impl fmt::Display for SearchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MAX_LIMIT: u32 = 100;
pub const MAX_COMMENT_DEPTH: u32 = 10;

/// Subreddit name without the `r/` prefix
pub fn subreddit(raw: &str) -> ValidationResult<String> {
    let name = strip_prefix_ci(raw.trim(), "r/");
    identifier("subreddit", name, 50, |c| c.is_ascii_alphanumeric() || c == '_')
}

/// Username without the `u/` prefix
pub fn username(raw: &str) -> ValidationResult<String> {
    let raw = raw.trim();
    let name = strip_prefix_ci(strip_prefix_ci(raw, "/"), "u/");
    identifier("username", name, 50, |c| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    })
}

/// Post id (base36) without the `t3_` prefix
pub fn post_id(raw: &str) -> ValidationResult<String> {
    let id = strip_prefix_ci(raw.trim(), "t3_");
    identifier("post_id", id, 20, |c| c.is_ascii_alphanumeric())
}

/// Trimmed free text that must not be empty
pub fn non_empty(field: &'static str, raw: &str) -> ValidationResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value.to_string())
}

pub fn in_range(field: &'static str, value: u32, min: u32, max: u32) -> ValidationResult<u32> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(value)
}

pub fn limit(field: &'static str, value: u32) -> ValidationResult<u32> {
    in_range(field, value, 1, MAX_LIMIT)
}

fn identifier(
    field: &'static str,
    value: &str,
    max: usize,
    allowed: impl Fn(char) -> bool,
) -> ValidationResult<String> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.len() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    if !value.chars().all(allowed) {
        return Err(ValidationError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

fn strip_prefix_ci<'a>(value: &'a str, prefix: &str) -> &'a str {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &value[prefix.len()..],
        _ => value,
    }
}
