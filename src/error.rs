//! CLI-facing errors.
//!
//! The core pipeline (`infer` → `resolve` → `emit`) cannot fail for any
//! valid value tree, so errors only exist at the shell boundary: reading
//! input, decoding JSON text, writing output. Decode failures carry the
//! JSON path of the offending token so the message points at the problem.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON at {path}: {message}")]
    ParseJson { path: String, message: String },

    #[error("failed to write {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode one JSON document with JSON-path context in error messages.
pub fn parse_document(src: &str) -> Result<serde_json::Value, Error> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize(de).map_err(|err| Error::ParseJson {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_json_path() {
        let err = parse_document(r#"{"items": [1, "two", }"#).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid JSON at "), "got: {message}");
    }

    #[test]
    fn parse_accepts_any_valid_document() {
        assert!(parse_document("null").is_ok());
        assert!(parse_document("[1, 2]").is_ok());
        assert!(parse_document(r#"{"a": {"b": []}}"#).is_ok());
    }
}
