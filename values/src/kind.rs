//! Primary and secondary tags of a tagged value.
//!
//! Both enums carry stable numeric discriminants. They are part of the
//! [`RawValue`](crate::raw::RawValue) layout and must not be renumbered.

use core::fmt;

/// The JavaScript-shaped kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum Kind {
    Undefined = 0,
    Boolean = 1,
    Null = 2,
    Number = 3,
    String = 4,
    /// Reserved, not implemented.
    BigInt = 5,
    /// Reserved, not implemented.
    Symbol = 6,
    Object = 7,
    Array = 8,
    Set = 9,
    Map = 10,
    /// Reserved, not implemented.
    Function = 11,
    /// Reserved, not implemented.
    Date = 12,
}

impl Kind {
    /// Decodes a raw tag. Unknown tags yield `None`.
    pub const fn from_tag(tag: i16) -> Option<Self> {
        Some(match tag {
            0 => Kind::Undefined,
            1 => Kind::Boolean,
            2 => Kind::Null,
            3 => Kind::Number,
            4 => Kind::String,
            5 => Kind::BigInt,
            6 => Kind::Symbol,
            7 => Kind::Object,
            8 => Kind::Array,
            9 => Kind::Set,
            10 => Kind::Map,
            11 => Kind::Function,
            12 => Kind::Date,
            _ => return None,
        })
    }

    pub const fn tag(self) -> i16 {
        self as i16
    }

    /// Kinds that have a tag but no representation. Meeting one is an error.
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Kind::BigInt | Kind::Symbol | Kind::Function | Kind::Date
        )
    }

    /// Kinds whose payload owns a buffer of elements.
    pub const fn is_composite(self) -> bool {
        matches!(self, Kind::Object | Kind::Array | Kind::Set | Kind::Map)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::BigInt => "bigint",
            Kind::Symbol => "symbol",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Function => "function",
            Kind::Date => "date",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Refines how the payload of a `number` or `string` is interpreted.
///
/// Every other kind uses [`Specifier::NotSpecial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum Specifier {
    NotSpecial = 0,
    Float64 = 1,
    Int64 = 2,
    Int32 = 3,
    Uint32 = 4,
    /// String bytes and NUL live in the payload word.
    Inline = 5,
    /// String bytes and NUL live in an owned heap buffer.
    Heap = 6,
}

impl Specifier {
    pub const fn from_tag(tag: i16) -> Option<Self> {
        Some(match tag {
            0 => Specifier::NotSpecial,
            1 => Specifier::Float64,
            2 => Specifier::Int64,
            3 => Specifier::Int32,
            4 => Specifier::Uint32,
            5 => Specifier::Inline,
            6 => Specifier::Heap,
            _ => return None,
        })
    }

    pub const fn tag(self) -> i16 {
        self as i16
    }
}
