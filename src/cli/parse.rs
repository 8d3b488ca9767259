//! Value parsers for CLI arguments

use linkweight_core::format::OutputFormat;

/// Parse an output format name
pub fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
