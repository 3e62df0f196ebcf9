//! Error types.

use thiserror::Error;

/// Errors raised while building widgets or driving the terminal.
///
/// Interaction no-ops (sorting a non-sortable column, selecting without a
/// row key) are not errors; they simply produce no event.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("a table needs at least one column")]
    NoColumns,

    #[error("rows per page must be greater than zero")]
    ZeroRowsPerPage,

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;
