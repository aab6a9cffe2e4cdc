//! Error types for relsql.

use crate::ast::Kind;
use thiserror::Error;

/// The main error type for compiling a node tree.
#[derive(Debug, Error)]
pub enum CompileError {
    /// No handler exists for the variant or any of its ancestors.
    #[error("Unsupported argument type: {0}. Wrap host values in a literal node")]
    UnsupportedVisit(Kind),

    /// The grammar has the construct but the active dialect cannot render it.
    #[error("{feature} not implemented for this db ({dialect})")]
    NotImplemented {
        feature: &'static str,
        dialect: &'static str,
    },

    /// A statement-level combination the target database rejects.
    #[error("Invalid combination: {0}")]
    InvalidCombination(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A placeholder inside a bound SQL literal has no value.
    #[error("Missing bind value for placeholder {0}")]
    MissingBind(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Create a not-implemented error for a dialect feature.
    pub fn not_implemented(feature: &'static str, dialect: &'static str) -> Self {
        Self::NotImplemented { feature, dialect }
    }
}

/// Result type alias for compilation.
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompileError::UnsupportedVisit(Kind::String);
        assert_eq!(
            err.to_string(),
            "Unsupported argument type: String. Wrap host values in a literal node"
        );

        let err = CompileError::not_implemented("DISTINCT ON", "ansi");
        assert_eq!(err.to_string(), "DISTINCT ON not implemented for this db (ansi)");
    }
}
