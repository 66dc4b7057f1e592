//! Error types for catalog operations.

use std::path::PathBuf;

/// Errors that can occur while parsing or loading catalog documents.
///
/// Listing and lookup operations never surface these to callers; they are
/// logged and the offending document is skipped. [`load_file`] returns them
/// for callers that need the precise cause.
///
/// [`load_file`]: crate::loader::load_file
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failed, or the header does not fit the kind's shape.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// The header block parsed but is not a key/value mapping.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The document has no header block.
    #[error("missing header block")]
    MissingHeader,

    /// A required field is missing from the header.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A header field is present but holds an unusable value.
    #[error("invalid value for {field}: {reason}")]
    InvalidField {
        /// The header key.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The slug cannot name a document file.
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    /// The path is not a document under the content root.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// The string does not name a catalog kind.
    #[error("unknown kind: {0}")]
    UnknownKind(String),

    /// An environment variable could not be read.
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// A specialized Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_field() {
        let err = Error::MissingField("description".to_string());
        assert_eq!(err.to_string(), "missing required field: description");
    }

    #[test]
    fn error_display_invalid_field() {
        let err = Error::InvalidField {
            field: "difficulty".to_string(),
            reason: "unknown level 'expert'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for difficulty: unknown level 'expert'"
        );
    }

    #[test]
    fn error_display_invalid_slug() {
        let err = Error::InvalidSlug("../etc".to_string());
        assert_eq!(err.to_string(), "invalid slug: \"../etc\"");
    }

    #[test]
    fn error_display_unknown_kind() {
        let err = Error::UnknownKind("plugins".to_string());
        assert_eq!(err.to_string(), "unknown kind: plugins");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
