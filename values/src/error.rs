use thiserror::Error;

use crate::Kind;

/// Failure of a value constructor or accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Negative length, non-positive container size, malformed raw record.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Accessor used against a value of another kind.
    #[error("expected {expected}, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    /// A reserved kind (bigint, symbol, function, date) was encountered.
    #[error("{0} values are not supported")]
    UnsupportedKind(Kind),
}
