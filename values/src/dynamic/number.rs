use crate::Specifier;

/// Largest integer magnitude a float64 represents exactly (2^53).
pub const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// A JavaScript number together with the specifier it was stored with.
///
/// Reads between specifiers are value-preserving where possible: integers
/// widen exactly to `f64` (up to 2^53), floats truncate toward zero when read
/// as integers, and every narrowing saturates at the bounds of the target type.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Float64(f64),
    Int64(i64),
    Int32(i32),
    Uint32(u32),
}

/// Same specifier and same payload. Doubles compare by bit pattern, so a
/// NaN equals itself and `-0` differs from `+0`.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Float64(a), Number::Float64(b)) => a.to_bits() == b.to_bits(),
            (Number::Int64(a), Number::Int64(b)) => a == b,
            (Number::Int32(a), Number::Int32(b)) => a == b,
            (Number::Uint32(a), Number::Uint32(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Number {
    /// Picks the narrowest integer specifier that holds `value` exactly.
    ///
    /// `0..=i32::MAX` is `Uint32`, `i32::MIN..0` is `Int32`, anything else `Int64`.
    pub fn integer(value: i64) -> Self {
        if (0..=i32::MAX as i64).contains(&value) {
            Number::Uint32(value as u32)
        } else if (i32::MIN as i64..0).contains(&value) {
            Number::Int32(value as i32)
        } else {
            Number::Int64(value)
        }
    }

    pub fn specifier(self) -> Specifier {
        match self {
            Number::Float64(_) => Specifier::Float64,
            Number::Int64(_) => Specifier::Int64,
            Number::Int32(_) => Specifier::Int32,
            Number::Uint32(_) => Specifier::Uint32,
        }
    }

    pub fn is_double(self) -> bool {
        matches!(self, Number::Float64(_))
    }

    pub fn is_integer(self) -> bool {
        !self.is_double()
    }

    /// Exact for every integer specifier up to 2^53 in magnitude.
    pub fn to_double(self) -> f64 {
        match self {
            Number::Float64(value) => value,
            Number::Int64(value) => value as f64,
            Number::Int32(value) => value as f64,
            Number::Uint32(value) => value as f64,
        }
    }

    /// Truncates floats toward zero; NaN reads as 0, infinities saturate.
    pub fn to_int64(self) -> i64 {
        match self {
            Number::Float64(value) => value as i64,
            Number::Int64(value) => value,
            Number::Int32(value) => value as i64,
            Number::Uint32(value) => value as i64,
        }
    }

    pub fn to_int32(self) -> i32 {
        match self {
            Number::Float64(value) => value as i32,
            Number::Int32(value) => value,
            other => other.to_int64().clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        }
    }

    pub fn to_uint32(self) -> u32 {
        match self {
            Number::Float64(value) => value as u32,
            Number::Uint32(value) => value,
            other => other.to_int64().clamp(0, u32::MAX as i64) as u32,
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float64(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::integer(value as i64)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::integer(value as i64)
    }
}
