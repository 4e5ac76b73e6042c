//! Error types for taxonomy loading and lookups

use crate::parser::CategoryId;
use thiserror::Error;

/// Top-level error type returned by taxonomy construction and lookups
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to load '{filename}': {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset for language '{language}': {source}")]
    Parse {
        language: String,
        #[source]
        source: ParseError,
    },

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while parsing a single dataset line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("line {line}: invalid category id '{value}'")]
    InvalidIdentifier { line: usize, value: String },
}

/// Structural integrity violations found while building the key-language tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("category '{name}' referenced by record {record} is not declared")]
    UnresolvedAncestor { name: String, record: CategoryId },

    #[error("category {child} already has parent {existing}, cannot attach it under {attempted}")]
    ConflictingParent {
        child: CategoryId,
        existing: CategoryId,
        attempted: CategoryId,
    },

    #[error("category name '{name}' is used by both {first} and {second}")]
    DuplicateCategoryName {
        name: String,
        first: CategoryId,
        second: CategoryId,
    },

    #[error("category {id} would become its own ancestor")]
    CyclicAncestry { id: CategoryId },
}

/// Lookup failures when rendering category names in a language
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("language '{0}' is not loaded")]
    LanguageNotLoaded(String),

    #[error("no name for category {id} in '{language}' or the key language")]
    TranslationNotFound { id: CategoryId, language: String },
}

/// Errors reading or writing a taxonomy config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
