//! Public error types for the codec.
//!
//! Value construction failures come from `jsbridge-values` as
//! [`ValueError`]; failures reported by the engine arrive as [`HostError`].
//! Both are folded into [`ConversionError`] at the codec boundary.

use thiserror::Error;

use crate::String;
use crate::host::HostKind;
use crate::values::{Kind, ValueError};

/// A failure reported by the engine while reading or building values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("host ran out of memory")]
    OutOfMemory,

    #[error("script execution is terminating")]
    Terminating,

    #[error("handle does not refer to a live value")]
    InvalidHandle,

    /// The engine answered with data the codec cannot use.
    #[error("malformed host data: {0}")]
    Malformed(&'static str),

    /// The engine threw while servicing the request.
    #[error("{0}")]
    Exception(String),
}

/// Why an import or export did not produce a result.
///
/// A conversion never returns a partial tree: whatever was built before the
/// failure has already been released when this error is seen.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The input cannot be represented, e.g. an empty host container.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("expected {expected}, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    /// A host value kind with no tagged representation.
    #[error("unsupported host value kind: {0}")]
    UnsupportedKind(HostKind),

    #[error("host conversion failed: {0}")]
    HostConversionFailure(#[from] HostError),

    #[error("value nesting exceeds the limit of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },
}

impl From<ValueError> for ConversionError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::InvalidInput(reason) => ConversionError::InvalidInput(reason),
            ValueError::KindMismatch { expected, found } => {
                ConversionError::KindMismatch { expected, found }
            }
            ValueError::UnsupportedKind(kind) => ConversionError::UnsupportedKind(host_kind(kind)),
        }
    }
}

fn host_kind(kind: Kind) -> HostKind {
    match kind {
        Kind::Undefined => HostKind::Undefined,
        Kind::Boolean => HostKind::Boolean,
        Kind::Null => HostKind::Null,
        Kind::Number => HostKind::Number,
        Kind::String => HostKind::String,
        Kind::BigInt => HostKind::BigInt,
        Kind::Symbol => HostKind::Symbol,
        Kind::Object => HostKind::Object,
        Kind::Array => HostKind::Array,
        Kind::Set => HostKind::Set,
        Kind::Map => HostKind::Map,
        Kind::Function => HostKind::Function,
        Kind::Date => HostKind::Date,
    }
}
