//! Error taxonomy.
//!
//! Only construction-time misconfiguration and terminal I/O reach callers.
//! Search pattern and capacity failures are recovered where they happen.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("a menu needs at least one item")]
    EmptyItems,

    #[error("invalid width {0}; width must be positive")]
    InvalidWidth(i32),

    #[error("invalid height {0}; height must be positive")]
    InvalidHeight(i32),

    #[error("invalid position ({x}, {y}); must lie inside the {columns}x{rows} terminal")]
    InvalidPosition {
        x: i32,
        y: i32,
        columns: u16,
        rows: u16,
    },

    #[error("control {id} is not a {expected}")]
    UnknownControl { id: u64, expected: &'static str },
}

/// A find pattern that failed to compile. Never surfaced to hosts.
#[derive(Debug, Error)]
#[error("invalid search pattern {pattern:?}: {source}")]
pub struct SearchPatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A control has no cells to render into.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("control area {width}x{height} leaves nothing to render")]
pub struct CapacityError {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Error)]
pub enum CluiError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CluiError>;
