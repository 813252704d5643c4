//! Encoding errors.

use thiserror::Error;

/// Errors raised while mapping raw categorical values to codes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EncodeError {
    /// The value was never observed during training, so it has no valid
    /// code. Propagated to the caller; the request fails rather than
    /// emitting a row with a fabricated code.
    #[error("categorical value {value:?} was not seen during training")]
    UnseenValue { value: String },

    /// The registry has no encoder for this column.
    #[error("no encoder was trained for column {column:?}")]
    MissingEncoder { column: String },
}
