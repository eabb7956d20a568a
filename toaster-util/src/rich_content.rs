use serde::{Deserialize, Serialize};
use std::fmt;

/// Toast payload. The lifecycle core never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    Text(String),
    Rich(RichContent),
}

impl Content {
    /// Single-line text, for logging and plain-text fallbacks
    pub fn plain_text(&self) -> &str {
        match self {
            Content::Text(text) => text,
            Content::Rich(rich) => &rich.summary,
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Rich(rich) if rich.body.is_empty() => f.write_str(&rich.summary),
            Content::Rich(rich) => write!(f, "{}: {}", rich.summary, rich.body),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<RichContent> for Content {
    fn from(rich: RichContent) -> Self {
        Content::Rich(rich)
    }
}

/// Structured payload with a summary line, body text and optional progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichContent {
    pub summary: String,
    pub body: String,
    /// Progress in the 0.0-1.0 range
    pub progress: Option<f32>,
}

impl RichContent {
    pub fn new(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            body: body.into(),
            progress: None,
        }
    }

    /// Set progress from a percentage, clamped to 0-100
    pub fn with_progress(mut self, percent: i32) -> Self {
        let clamped = percent.clamp(0, 100);
        self.progress = Some(clamped as f32 / 100.0);
        self
    }
}
