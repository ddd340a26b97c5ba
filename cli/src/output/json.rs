//! JSON renderer and error-object formatter.
//!
//! Every `--json` code path prints exactly one pretty-printed document to
//! stdout: the command's result, or the error object when it fails.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print `value` as one JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", to_document(value)?);
        Ok(())
    }
}

/// The pretty-printed document `JsonRenderer::render` prints.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}
