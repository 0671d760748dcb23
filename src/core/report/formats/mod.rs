//! Report format implementations
//!
//! Provides exporters for plain console text, JSON and Markdown.

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Console statistics block
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown document
    Markdown,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    /// Report destination for `path`, adding this format's extension when the
    /// path has none
    #[must_use]
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(self.extension())
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("TXT".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("Md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn output_path_gains_missing_extension() {
        assert_eq!(
            ReportFormat::Markdown.output_path(Path::new("out/summary")),
            PathBuf::from("out/summary.md")
        );
        assert_eq!(
            ReportFormat::Text.output_path(Path::new("summary")),
            PathBuf::from("summary.txt")
        );
        assert_eq!(
            ReportFormat::Json.output_path(Path::new("stats.out")),
            PathBuf::from("stats.out")
        );
    }
}
