//! Error types
//!
//! The simulation itself never fails: out-of-range queries answer `false`.
//! Errors only come from building a maze out of raw codes or from loading
//! settings.

use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("maze layout has no cells")]
    EmptyLayout,

    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell code {code} at ({x}, {y})")]
    UnknownCellCode { code: u8, x: usize, y: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
