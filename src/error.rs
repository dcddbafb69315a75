//! Error types for the style compiler

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {file}: {message}")]
    Json { file: String, message: String },

    #[error("TOML error in {file}: {message}")]
    Toml { file: String, message: String },

    #[error("Unresolved token '{reference}' for property '{property}'")]
    UnresolvedToken { property: String, reference: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

pub type Result<T> = std::result::Result<T, StyleError>;

impl StyleError {
    pub fn json(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Json {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn toml(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Toml {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn unresolved_token(property: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::UnresolvedToken {
            property: property.into(),
            reference: reference.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Returns true when the error stems from an unresolved `$token` reference
    pub fn is_unresolved_token(&self) -> bool {
        matches!(self, Self::UnresolvedToken { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StyleError::unresolved_token("color", "$brand.primary");
        assert_eq!(
            err.to_string(),
            "Unresolved token '$brand.primary' for property 'color'"
        );
        assert!(err.is_unresolved_token());

        let err = StyleError::json("styles.json", "expected value at line 1");
        assert_eq!(err.to_string(), "JSON error in styles.json: expected value at line 1");
        assert!(!err.is_unresolved_token());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StyleError = io.into();
        assert!(matches!(err, StyleError::Io(_)));
    }
}
