use serde::de::IgnoredAny;
use serde_json::error::Category;
use thiserror::Error;

use crate::core::models::report::CostReport;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed report: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Schema mismatch at '{path}': {message}")]
    SchemaMismatch { path: String, message: String },
}

/// Encode a report as compact JSON.
pub fn encode(report: &CostReport) -> Vec<u8> {
    // Records hold only strings, numbers, sequences and string-keyed structs.
    serde_json::to_vec(report).expect("Failed to serialize cost report")
}

/// Encode a report as indented JSON.
pub fn encode_pretty(report: &CostReport) -> Vec<u8> {
    serde_json::to_vec_pretty(report).expect("Failed to serialize cost report")
}

/// Decode a report, failing rather than returning a partially populated value.
pub fn decode(bytes: &[u8]) -> Result<CostReport, DecodeError> {
    // Syntax is checked over the whole input first, so a truncated document
    // is reported as malformed even when an earlier field is also mistyped.
    serde_json::from_slice::<IgnoredAny>(bytes).map_err(DecodeError::Malformed)?;

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let report: CostReport = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = field_path(&e.path().to_string(), &e.inner().to_string());
        let inner = e.into_inner();
        match inner.classify() {
            Category::Syntax | Category::Eof | Category::Io => DecodeError::Malformed(inner),
            Category::Data => DecodeError::SchemaMismatch {
                path,
                message: inner.to_string(),
            },
        }
    })?;
    de.end().map_err(DecodeError::Malformed)?;
    Ok(report)
}

/// Full path of the failing field.
///
/// A missing field is reported by serde at the enclosing record, so the
/// field name is taken from the message and appended. The document root is
/// written as ".".
fn field_path(at: &str, message: &str) -> String {
    let at = if at == "." { "" } else { at };
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(name) if at.is_empty() => name.to_string(),
        Some(name) => format!("{}.{}", at, name),
        None if at.is_empty() => ".".to_string(),
        None => at.to_string(),
    }
}
