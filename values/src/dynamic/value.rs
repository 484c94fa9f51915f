use jsbridge_small_str::SmallStr;

use crate::{Kind, Specifier, ValueError};

use super::{Number, Pair, Pairs, Values};

/// One JavaScript-shaped datum that can cross the host boundary.
///
/// Scalars are plain data. Strings use the small-string optimization and
/// composites own their element buffers, so a `Value` tree has exactly one
/// owner and is released post-order when dropped or [destroyed](Value::destroy).
///
/// # Example
///
/// ```
/// use jsbridge_values::{Kind, Specifier, Value};
///
/// let v = Value::integer(-1);
/// assert_eq!(v.kind(), Kind::Number);
/// assert_eq!(v.specifier(), Specifier::Int32);
/// assert_eq!(v.to_int32(), Ok(-1));
///
/// let mut array = Value::array(2);
/// array.to_array_mut().unwrap()[0] = Value::string("short");
/// assert_eq!(array.size(), 2);
///
/// array.destroy();
/// assert!(array.is_undefined());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Boolean(bool),
    Null,
    Number(Number),
    String(SmallStr),
    Object(Pairs),
    Array(Values),
    Set(Values),
    Map(Pairs),
}

// =============================================================================
// Constructors
// =============================================================================

impl Value {
    pub const fn undefined() -> Self {
        Value::Undefined
    }

    pub const fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    pub const fn null() -> Self {
        Value::Null
    }

    /// A number stored as `float64`.
    pub const fn number(value: f64) -> Self {
        Value::Number(Number::Float64(value))
    }

    /// A number stored with the narrowest integer specifier that holds `value`.
    pub fn integer(value: i64) -> Self {
        Value::Number(Number::integer(value))
    }

    /// Fails if `value` is longer than the 32-bit size field can record.
    pub fn try_string(value: &str) -> Result<Self, ValueError> {
        checked_string_len(value.len())?;
        Ok(Value::String(SmallStr::from(value)))
    }

    /// Like [`try_string`](Self::try_string), but an oversized string yields `undefined`.
    pub fn string(value: &str) -> Self {
        Self::try_string(value).unwrap_or_default()
    }

    /// Copies the first `length` bytes of `bytes`.
    ///
    /// Fails if `length` is negative or runs past the end of `bytes`.
    pub fn try_from_bytes(bytes: &[u8], length: i32) -> Result<Self, ValueError> {
        let length = usize::try_from(length)
            .map_err(|_| ValueError::InvalidInput("string length must not be negative"))?;
        let content = bytes
            .get(..length)
            .ok_or(ValueError::InvalidInput("string length exceeds the buffer"))?;
        Ok(Value::String(SmallStr::new(content)))
    }

    /// Like [`try_from_bytes`](Self::try_from_bytes), but invalid input yields `undefined`.
    pub fn from_bytes(bytes: &[u8], length: i32) -> Self {
        Self::try_from_bytes(bytes, length).unwrap_or_default()
    }

    /// An array of `size` undefined elements. `size` must be positive.
    pub fn try_array(size: i32) -> Result<Self, ValueError> {
        Values::new(size).map(Value::Array)
    }

    pub fn try_set(size: i32) -> Result<Self, ValueError> {
        Values::new(size).map(Value::Set)
    }

    /// A map of `size` pairs of undefined key and value. `size` must be positive.
    pub fn try_map(size: i32) -> Result<Self, ValueError> {
        Pairs::new(size).map(Value::Map)
    }

    pub fn try_object(size: i32) -> Result<Self, ValueError> {
        Pairs::new(size).map(Value::Object)
    }

    /// Like [`try_array`](Self::try_array), but a non-positive size yields `undefined`.
    pub fn array(size: i32) -> Self {
        Self::try_array(size).unwrap_or_default()
    }

    pub fn set(size: i32) -> Self {
        Self::try_set(size).unwrap_or_default()
    }

    pub fn map(size: i32) -> Self {
        Self::try_map(size).unwrap_or_default()
    }

    pub fn object(size: i32) -> Self {
        Self::try_object(size).unwrap_or_default()
    }
}

fn checked_string_len(len: usize) -> Result<i32, ValueError> {
    i32::try_from(len).map_err(|_| ValueError::InvalidInput("string length exceeds i32::MAX"))
}

// =============================================================================
// Inspection
// =============================================================================

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Boolean(_) => Kind::Boolean,
            Value::Null => Kind::Null,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn specifier(&self) -> Specifier {
        match self {
            Value::Number(number) => number.specifier(),
            Value::String(s) if s.is_inline() => Specifier::Inline,
            Value::String(_) => Specifier::Heap,
            _ => Specifier::NotSpecial,
        }
    }

    /// Element count for composites, byte length for strings, 0 otherwise.
    pub fn size(&self) -> i32 {
        match self {
            Value::String(s) => s.len() as i32,
            Value::Array(items) | Value::Set(items) => items.size(),
            Value::Object(pairs) | Value::Map(pairs) => pairs.size(),
            _ => 0,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// A number stored as `float64`.
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_double())
    }

    /// A number stored with one of the integer specifiers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_integer())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl Value {
    fn mismatch(&self, expected: Kind) -> ValueError {
        ValueError::KindMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Boolean(value) => Ok(*value),
            _ => Err(self.mismatch(Kind::Boolean)),
        }
    }

    pub fn to_number(&self) -> Result<Number, ValueError> {
        match self {
            Value::Number(number) => Ok(*number),
            _ => Err(self.mismatch(Kind::Number)),
        }
    }

    pub fn to_double(&self) -> Result<f64, ValueError> {
        self.to_number().map(Number::to_double)
    }

    pub fn to_int64(&self) -> Result<i64, ValueError> {
        self.to_number().map(Number::to_int64)
    }

    pub fn to_int32(&self) -> Result<i32, ValueError> {
        self.to_number().map(Number::to_int32)
    }

    pub fn to_uint32(&self) -> Result<u32, ValueError> {
        self.to_number().map(Number::to_uint32)
    }

    /// String content without the terminator.
    pub fn to_bytes(&self) -> Result<&[u8], ValueError> {
        self.to_small_str().map(SmallStr::as_bytes)
    }

    pub fn to_str(&self) -> Result<&str, ValueError> {
        self.to_small_str()?
            .as_str()
            .map_err(|_| ValueError::InvalidInput("string is not valid UTF-8"))
    }

    pub fn to_small_str(&self) -> Result<&SmallStr, ValueError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    pub fn to_array(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Array(items) => Ok(&items[..]),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    pub fn to_array_mut(&mut self) -> Result<&mut [Value], ValueError> {
        let found = self.kind();
        match self {
            Value::Array(items) => Ok(&mut items[..]),
            _ => Err(ValueError::KindMismatch {
                expected: Kind::Array,
                found,
            }),
        }
    }

    pub fn to_set(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Set(items) => Ok(&items[..]),
            _ => Err(self.mismatch(Kind::Set)),
        }
    }

    pub fn to_set_mut(&mut self) -> Result<&mut [Value], ValueError> {
        let found = self.kind();
        match self {
            Value::Set(items) => Ok(&mut items[..]),
            _ => Err(ValueError::KindMismatch {
                expected: Kind::Set,
                found,
            }),
        }
    }

    pub fn to_map(&self) -> Result<&[Pair], ValueError> {
        match self {
            Value::Map(pairs) => Ok(&pairs[..]),
            _ => Err(self.mismatch(Kind::Map)),
        }
    }

    pub fn to_map_mut(&mut self) -> Result<&mut [Pair], ValueError> {
        let found = self.kind();
        match self {
            Value::Map(pairs) => Ok(&mut pairs[..]),
            _ => Err(ValueError::KindMismatch {
                expected: Kind::Map,
                found,
            }),
        }
    }

    pub fn to_object(&self) -> Result<&[Pair], ValueError> {
        match self {
            Value::Object(pairs) => Ok(&pairs[..]),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    pub fn to_object_mut(&mut self) -> Result<&mut [Pair], ValueError> {
        let found = self.kind();
        match self {
            Value::Object(pairs) => Ok(&mut pairs[..]),
            _ => Err(ValueError::KindMismatch {
                expected: Kind::Object,
                found,
            }),
        }
    }
}

// =============================================================================
// Ownership
// =============================================================================

impl Value {
    /// Moves the value out, leaving `undefined` in its place.
    pub fn take(&mut self) -> Value {
        core::mem::take(self)
    }

    /// Releases everything this value owns and resets it to `undefined`.
    ///
    /// Children are released before their parent buffer. Calling it again is a
    /// no-op.
    pub fn destroy(&mut self) {
        *self = Value::Undefined;
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}
