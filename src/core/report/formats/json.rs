//! JSON summary export

use crate::core::error::Result;
use crate::core::report::{GraphSummary, ReportGenerator};

/// Pretty-printed JSON reporter
pub struct JsonReporter;

impl ReportGenerator for JsonReporter {
    fn render(&self, summary: &GraphSummary) -> Result<String> {
        let mut out = serde_json::to_string_pretty(summary)?;
        out.push('\n');
        Ok(out)
    }
}
