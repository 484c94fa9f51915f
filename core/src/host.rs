//! The seam between the codec and an embedded engine's live value graph.
//!
//! Running scripts, managing isolates and scoping handles all belong to the
//! embedder. The codec only needs to read a value graph and build a new one,
//! which is what [`Host`] describes. [`crate::memory::MemoryHost`] is a
//! complete implementation over an in-memory arena.

use core::fmt;

use crate::String;
use crate::api::HostError;

/// Classification of a live host value, as far as the codec cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Set,
    Map,
    Object,
    BigInt,
    Symbol,
    Function,
    Date,
    /// Anything else the engine can produce (promises, proxies, typed arrays, ...).
    Other,
}

impl HostKind {
    pub fn name(self) -> &'static str {
        match self {
            HostKind::Undefined => "undefined",
            HostKind::Null => "null",
            HostKind::Boolean => "boolean",
            HostKind::Number => "number",
            HostKind::String => "string",
            HostKind::Array => "array",
            HostKind::Set => "set",
            HostKind::Map => "map",
            HostKind::Object => "object",
            HostKind::BigInt => "bigint",
            HostKind::Symbol => "symbol",
            HostKind::Function => "function",
            HostKind::Date => "date",
            HostKind::Other => "other",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read and build access to an engine's value graph.
///
/// Handles are cheap copies that stay valid for as long as the embedder keeps
/// its handle scope open. Any operation may fail with a [`HostError`], for
/// example when the engine runs out of memory or execution is terminating.
pub trait Host {
    type Handle: Copy;

    // =========================================================================
    // Reading
    // =========================================================================

    fn kind_of(&self, value: Self::Handle) -> HostKind;

    fn to_boolean(&self, value: Self::Handle) -> Result<bool, HostError>;

    fn to_number(&self, value: Self::Handle) -> Result<f64, HostError>;

    /// UTF-8 form of a string value.
    fn to_utf8(&self, value: Self::Handle) -> Result<String, HostError>;

    fn array_length(&self, array: Self::Handle) -> Result<u32, HostError>;

    fn array_get(&self, array: Self::Handle, index: u32) -> Result<Self::Handle, HostError>;

    /// A new array holding the elements of `set` in iteration order.
    fn set_as_array(&mut self, set: Self::Handle) -> Result<Self::Handle, HostError>;

    /// A new array holding `key0, value0, key1, value1, ...` for `map` in
    /// iteration order.
    fn map_as_array(&mut self, map: Self::Handle) -> Result<Self::Handle, HostError>;

    /// A new array holding the own enumerable string keys of `object`.
    fn own_property_names(&mut self, object: Self::Handle) -> Result<Self::Handle, HostError>;

    fn get_property(&self, object: Self::Handle, key: Self::Handle)
    -> Result<Self::Handle, HostError>;

    // =========================================================================
    // Building
    // =========================================================================

    fn new_undefined(&mut self) -> Result<Self::Handle, HostError>;

    fn new_null(&mut self) -> Result<Self::Handle, HostError>;

    fn new_boolean(&mut self, value: bool) -> Result<Self::Handle, HostError>;

    fn new_number(&mut self, value: f64) -> Result<Self::Handle, HostError>;

    /// Engines with a dedicated small-integer representation override this.
    fn new_int32(&mut self, value: i32) -> Result<Self::Handle, HostError> {
        self.new_number(value as f64)
    }

    fn new_uint32(&mut self, value: u32) -> Result<Self::Handle, HostError> {
        self.new_number(value as f64)
    }

    /// A string from raw bytes. Invalid UTF-8 is up to the engine.
    fn new_string(&mut self, bytes: &[u8]) -> Result<Self::Handle, HostError>;

    fn new_array(&mut self, length: u32) -> Result<Self::Handle, HostError>;

    fn array_set(
        &mut self,
        array: Self::Handle,
        index: u32,
        value: Self::Handle,
    ) -> Result<(), HostError>;

    fn new_set(&mut self) -> Result<Self::Handle, HostError>;

    fn set_add(&mut self, set: Self::Handle, value: Self::Handle) -> Result<(), HostError>;

    fn new_map(&mut self) -> Result<Self::Handle, HostError>;

    fn map_set(
        &mut self,
        map: Self::Handle,
        key: Self::Handle,
        value: Self::Handle,
    ) -> Result<(), HostError>;

    fn new_object(&mut self) -> Result<Self::Handle, HostError>;

    fn object_set(
        &mut self,
        object: Self::Handle,
        key: Self::Handle,
        value: Self::Handle,
    ) -> Result<(), HostError>;
}
