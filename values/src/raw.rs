#![allow(unsafe_code)]

//! Fixed-layout record for passing values across a compiled-library boundary.
//!
//! [`Value`] is the safe, owning representation used inside Rust. `RawValue`
//! is its 16-byte, C-compatible twin:
//!
//! ```text
//! offset  0: payload    8 bytes   bits | pointer | inline string bytes
//! offset  8: kind       i16       Kind tag
//! offset 10: specifier  i16       Specifier tag
//! offset 12: size       i32       element count / string length
//! ```
//!
//! `kind`, `specifier` and `size` alone decide how `payload` is read:
//!
//! | kind / specifier        | payload                                    |
//! |-------------------------|--------------------------------------------|
//! | boolean                 | `bits` is 0 or 1                           |
//! | number / float64        | `bits` are the IEEE-754 bits               |
//! | number / int*, uint32   | `bits` are the sign-extended `i64`         |
//! | string / inline         | `bytes` hold content plus NUL              |
//! | string / heap           | `ptr` to `size + 1` bytes ending in NUL    |
//! | array, set              | `ptr` to `size` [`RawValue`]s              |
//! | map, object             | `ptr` to `size` [`RawPair`]s               |
//! | undefined, null         | zero                                       |
//!
//! [`Value::into_raw`] hands ownership of a whole tree to raw buffers and
//! [`Value::from_raw`] takes it back. Every raw tree must be reclaimed exactly
//! once, either through `from_raw` or through [`RawValue::destroy`].

use alloc::{boxed::Box, vec::Vec};
use core::{
    ffi::{c_char, c_void},
    fmt,
    mem::offset_of,
    ptr,
};

use jsbridge_small_str::{INLINE_CAPACITY, RawParts, SmallStr, WORD_SIZE};

use crate::{Kind, Number, Pair, Pairs, Specifier, Value, ValueError, Values};

/// The payload word of a [`RawValue`].
#[repr(C)]
#[derive(Clone, Copy)]
pub union Payload {
    pub ptr: *mut c_void,
    pub bits: u64,
    pub bytes: [u8; WORD_SIZE],
}

/// C-compatible tagged value. See [module docs](self) for the layout.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct RawValue {
    pub payload: Payload,
    pub kind: i16,
    pub specifier: i16,
    pub size: i32,
}

/// C-compatible element of a raw map or object buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawPair {
    pub first: RawValue,
    pub second: RawValue,
}

/// Borrowed view of a raw array or set buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawArray {
    pub size: i32,
    pub data: *mut RawValue,
}

/// Borrowed view of a raw map or object buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawPairs {
    pub size: i32,
    pub data: *mut RawPair,
}

/// Borrowed view of raw string content. `data` is NUL-terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawString {
    pub size: i32,
    pub data: *const c_char,
}

static_assertions::assert_eq_size!(Payload, u64);
static_assertions::assert_eq_size!(RawValue, [u64; 2]);
static_assertions::assert_eq_size!(RawPair, [u64; 4]);
static_assertions::const_assert_eq!(offset_of!(RawValue, payload), 0);
static_assertions::const_assert_eq!(offset_of!(RawValue, kind), 8);
static_assertions::const_assert_eq!(offset_of!(RawValue, specifier), 10);
static_assertions::const_assert_eq!(offset_of!(RawValue, size), 12);

impl RawValue {
    pub const UNDEFINED: RawValue = RawValue {
        payload: Payload { bits: 0 },
        kind: Kind::Undefined.tag(),
        specifier: Specifier::NotSpecial.tag(),
        size: 0,
    };

    pub fn kind(&self) -> Option<Kind> {
        Kind::from_tag(self.kind)
    }

    pub fn specifier(&self) -> Option<Specifier> {
        Specifier::from_tag(self.specifier)
    }

    fn bits(&self) -> u64 {
        // SAFETY: every payload variant is 8 bytes of plain data.
        unsafe { self.payload.bits }
    }

    fn ptr(&self) -> *mut c_void {
        // SAFETY: pointers are 8 bytes on the targets this module is built for.
        unsafe { self.payload.ptr }
    }

    /// Decodes a boolean without taking ownership.
    pub fn boolean(&self) -> Option<bool> {
        (self.kind() == Some(Kind::Boolean)).then(|| self.bits() != 0)
    }

    /// Decodes a number without taking ownership.
    pub fn number(&self) -> Option<Number> {
        if self.kind() != Some(Kind::Number) {
            return None;
        }
        let bits = self.bits();
        Some(match self.specifier()? {
            Specifier::Float64 => Number::Float64(f64::from_bits(bits)),
            Specifier::Int64 => Number::Int64(bits as i64),
            Specifier::Int32 => Number::Int32(bits as i64 as i32),
            Specifier::Uint32 => Number::Uint32(bits as u32),
            _ => return None,
        })
    }

    /// Whether string content lives in the payload word. Records without a
    /// string specifier fall back to the size threshold.
    fn is_inline_string(&self) -> Result<bool, ValueError> {
        match self.specifier() {
            Some(Specifier::Inline) => Ok(true),
            Some(Specifier::Heap) => Ok(false),
            Some(Specifier::NotSpecial) => {
                Ok(self.size >= 0 && (self.size as usize) <= INLINE_CAPACITY)
            }
            _ => Err(ValueError::InvalidInput("invalid string specifier")),
        }
    }

    /// Pointer to the NUL-terminated content of a string record.
    ///
    /// Inline strings point into `self`, so the result is only valid while
    /// `self` is neither moved nor dropped.
    pub fn string_data(&self) -> Option<*const c_char> {
        if self.kind() != Some(Kind::String) {
            return None;
        }
        if self.is_inline_string().ok()? {
            Some(ptr::from_ref(&self.payload).cast())
        } else {
            Some(self.ptr().cast_const().cast())
        }
    }

    /// Borrows the content of a string record, without the terminator.
    ///
    /// # Safety
    ///
    /// A heap string record must point to a live buffer of `size + 1` bytes.
    pub unsafe fn string_bytes(&self) -> Option<&[u8]> {
        let data = self.string_data()?;
        let len = usize::try_from(self.size).ok()?;
        if data.is_null() {
            return None;
        }
        // SAFETY: inline data lives in `self`; heap data is guaranteed by the caller.
        Some(unsafe { core::slice::from_raw_parts(data.cast::<u8>(), len) })
    }

    /// Element buffer of an array or set record.
    pub fn elements(&self) -> Option<RawArray> {
        matches!(self.kind()?, Kind::Array | Kind::Set).then(|| RawArray {
            size: self.size,
            data: self.ptr().cast(),
        })
    }

    /// Pair buffer of a map or object record.
    pub fn pairs(&self) -> Option<RawPairs> {
        matches!(self.kind()?, Kind::Map | Kind::Object).then(|| RawPairs {
            size: self.size,
            data: self.ptr().cast(),
        })
    }

    /// Releases the tree owned by this record and resets it to undefined.
    ///
    /// Idempotent: an undefined record owns nothing.
    ///
    /// # Safety
    ///
    /// The record must have been produced by [`Value::into_raw`] (or be a
    /// scalar) and must not have been reclaimed already through a copy.
    pub unsafe fn destroy(&mut self) {
        let raw = core::mem::replace(self, RawValue::UNDEFINED);
        // SAFETY: forwarded from the caller. Reserved kinds own nothing.
        drop(unsafe { Value::from_raw(raw) });
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::UNDEFINED
    }
}

impl fmt::Debug for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawValue")
            .field("payload", &format_args!("{:#018x}", self.bits()))
            .field("kind", &self.kind)
            .field("specifier", &self.specifier)
            .field("size", &self.size)
            .finish()
    }
}

// =============================================================================
// Ownership transfer
// =============================================================================

fn element_count(size: i32) -> Result<usize, ValueError> {
    if size <= 0 {
        return Err(ValueError::InvalidInput("container size must be positive"));
    }
    Ok(size as usize)
}

impl Value {
    /// Hands the whole tree over to raw buffers.
    ///
    /// The result must eventually be passed to [`Value::from_raw`] or
    /// [`RawValue::destroy`], otherwise it leaks.
    pub fn into_raw(self) -> RawValue {
        let kind = self.kind().tag();
        let specifier = self.specifier().tag();
        let size = self.size();

        let payload = match self {
            Value::Undefined | Value::Null => Payload { bits: 0 },
            Value::Boolean(value) => Payload { bits: value as u64 },
            Value::Number(Number::Float64(value)) => Payload {
                bits: value.to_bits(),
            },
            Value::Number(number) => Payload {
                bits: number.to_int64() as u64,
            },
            Value::String(s) => match s.into_raw_parts() {
                RawParts::Inline(bytes) => Payload { bytes },
                RawParts::Heap(buffer) => Payload {
                    ptr: Box::into_raw(buffer).cast(),
                },
            },
            Value::Array(items) | Value::Set(items) => {
                let buffer: Box<[RawValue]> = items
                    .into_boxed_slice()
                    .into_vec()
                    .into_iter()
                    .map(Value::into_raw)
                    .collect();
                Payload {
                    ptr: Box::into_raw(buffer).cast(),
                }
            }
            Value::Object(pairs) | Value::Map(pairs) => {
                let buffer: Box<[RawPair]> = pairs
                    .into_boxed_slice()
                    .into_vec()
                    .into_iter()
                    .map(|pair| RawPair {
                        first: pair.key.into_raw(),
                        second: pair.value.into_raw(),
                    })
                    .collect();
                Payload {
                    ptr: Box::into_raw(buffer).cast(),
                }
            }
        };

        RawValue {
            payload,
            kind,
            specifier,
            size,
        }
    }

    /// Takes back ownership of a tree produced by [`Value::into_raw`].
    ///
    /// Reserved kinds fail with [`ValueError::UnsupportedKind`] and unknown
    /// tags with [`ValueError::InvalidInput`]. A bad element does not stop the
    /// reclamation of its siblings; they are released before the error is
    /// returned.
    ///
    /// # Safety
    ///
    /// `raw` must come from [`Value::into_raw`] (or describe a scalar) and
    /// must not be used again afterwards, including through copies.
    pub unsafe fn from_raw(raw: RawValue) -> Result<Value, ValueError> {
        let kind = raw
            .kind()
            .ok_or(ValueError::InvalidInput("unknown kind tag"))?;

        match kind {
            Kind::Undefined => Ok(Value::Undefined),
            Kind::Null => Ok(Value::Null),
            Kind::Boolean => Ok(Value::Boolean(raw.bits() != 0)),
            Kind::Number => raw
                .number()
                .map(Value::Number)
                .ok_or(ValueError::InvalidInput("invalid number specifier")),
            Kind::String => {
                let len = usize::try_from(raw.size)
                    .map_err(|_| ValueError::InvalidInput("string length must not be negative"))?;
                if raw.is_inline_string()? {
                    // SAFETY: inline payloads are plain bytes.
                    let word = unsafe { raw.payload.bytes };
                    SmallStr::from_word(word, len)
                        .map(Value::String)
                        .ok_or(ValueError::InvalidInput("inline string is too long"))
                } else {
                    let data = raw.ptr().cast::<u8>();
                    if data.is_null() {
                        return Err(ValueError::InvalidInput("null string buffer"));
                    }
                    // SAFETY: heap strings are `Box<[u8]>` of `len + 1` bytes.
                    let buffer = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len + 1)) };
                    SmallStr::from_boxed_with_nul(buffer)
                        .map(Value::String)
                        .ok_or(ValueError::InvalidInput("heap string is not NUL-terminated"))
                }
            }
            Kind::Array => Ok(Value::Array(unsafe { reclaim_values(&raw) }?)),
            Kind::Set => Ok(Value::Set(unsafe { reclaim_values(&raw) }?)),
            Kind::Map => Ok(Value::Map(unsafe { reclaim_pairs(&raw) }?)),
            Kind::Object => Ok(Value::Object(unsafe { reclaim_pairs(&raw) }?)),
            Kind::BigInt | Kind::Symbol | Kind::Function | Kind::Date => {
                Err(ValueError::UnsupportedKind(kind))
            }
        }
    }
}

/// # Safety
///
/// `raw` must be an array or set record produced by [`Value::into_raw`].
unsafe fn reclaim_values(raw: &RawValue) -> Result<Values, ValueError> {
    let len = element_count(raw.size)?;
    let data = raw.ptr().cast::<RawValue>();
    if data.is_null() {
        return Err(ValueError::InvalidInput("null container buffer"));
    }
    // SAFETY: the buffer was a `Box<[RawValue]>` of `len` elements.
    let buffer = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)) };

    let mut first_error = None;
    let mut items = Vec::with_capacity(len);
    for element in buffer.iter() {
        // SAFETY: each element is owned by the buffer being reclaimed.
        match unsafe { Value::from_raw(*element) } {
            Ok(value) => items.push(value),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Values::from_vec(items),
    }
}

/// # Safety
///
/// `raw` must be a map or object record produced by [`Value::into_raw`].
unsafe fn reclaim_pairs(raw: &RawValue) -> Result<Pairs, ValueError> {
    let len = element_count(raw.size)?;
    let data = raw.ptr().cast::<RawPair>();
    if data.is_null() {
        return Err(ValueError::InvalidInput("null container buffer"));
    }
    // SAFETY: the buffer was a `Box<[RawPair]>` of `len` elements.
    let buffer = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(data, len)) };

    let mut first_error = None;
    let mut pairs = Vec::with_capacity(len);
    for element in buffer.iter() {
        // SAFETY: both halves are owned by the buffer being reclaimed.
        let key = unsafe { Value::from_raw(element.first) };
        let value = unsafe { Value::from_raw(element.second) };
        match (key, value) {
            (Ok(key), Ok(value)) => pairs.push(Pair::new(key, value)),
            (Err(err), _) | (_, Err(err)) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Pairs::from_vec(pairs),
    }
}
