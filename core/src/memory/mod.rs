//! An in-memory [`Host`] and exception context.
//!
//! [`MemoryHost`] keeps every value in an append-only arena of [`Node`]s and
//! hands out indices as handles, much like an engine's handle scope. It
//! follows JavaScript semantics where the codec can observe them: sets
//! ignore duplicates, map and object keys are unique and keep first
//! insertion order. [`Node::Failing`] and [`MemoryHost::with_allocation_limit`]
//! inject engine failures.

mod exception;

pub use exception::ExceptionSnapshot;

use crate::api::HostError;
use crate::host::{Host, HostKind};
use crate::{String, ToString, Vec};

/// Index of a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    /// Stands for a value that does not exist, such as a missing property.
    /// The host reports it as undefined.
    pub const MISSING: Handle = Handle(u32::MAX);
}

/// One live value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<Handle>),
    Set(Vec<Handle>),
    Map(Vec<(Handle, Handle)>),
    /// Own enumerable properties, in insertion order.
    Object(Vec<(String, Handle)>),
    /// A value of a kind the codec does not represent (bigint, symbol, ...).
    Opaque(HostKind),
    /// A value of the given kind whose every read fails with the message.
    Failing(HostKind, String),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    nodes: Vec<Node>,
    allocation_limit: Option<usize>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that reports [`HostError::OutOfMemory`] once it holds `limit` nodes.
    pub fn with_allocation_limit(limit: usize) -> Self {
        Self {
            nodes: Vec::new(),
            allocation_limit: Some(limit),
        }
    }

    /// Adds a node regardless of the allocation limit. Meant for setting up
    /// fixtures; builders used by the codec go through the limit.
    pub fn insert(&mut self, node: Node) -> Handle {
        let handle = Handle(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }

    pub fn get(&self, handle: Handle) -> Option<&Node> {
        self.nodes.get(handle.0 as usize)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate(&mut self, node: Node) -> Result<Handle, HostError> {
        if self
            .allocation_limit
            .is_some_and(|limit| self.nodes.len() >= limit)
        {
            return Err(HostError::OutOfMemory);
        }
        Ok(self.insert(node))
    }

    /// Resolves a handle, turning [`Node::Failing`] into its error.
    fn node(&self, handle: Handle) -> Result<&Node, HostError> {
        match self.get(handle) {
            Some(Node::Failing(_, message)) => Err(HostError::Exception(message.clone())),
            Some(node) => Ok(node),
            None => Err(HostError::InvalidHandle),
        }
    }

    fn node_mut(&mut self, handle: Handle) -> Result<&mut Node, HostError> {
        self.nodes
            .get_mut(handle.0 as usize)
            .ok_or(HostError::InvalidHandle)
    }

    fn elements(&self, handle: Handle) -> Result<&[Handle], HostError> {
        match self.node(handle)? {
            Node::Array(items) | Node::Set(items) => Ok(items),
            _ => Err(HostError::Malformed("not an array")),
        }
    }

    fn string(&self, handle: Handle) -> Result<&str, HostError> {
        match self.node(handle)? {
            Node::String(s) => Ok(s),
            _ => Err(HostError::Malformed("not a string")),
        }
    }

    /// SameValueZero for primitives, identity for everything else.
    fn same_value_zero(&self, a: Handle, b: Handle) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(Node::Undefined), Some(Node::Undefined)) => true,
            (Some(Node::Null), Some(Node::Null)) => true,
            (Some(Node::Boolean(x)), Some(Node::Boolean(y))) => x == y,
            (Some(Node::Number(x)), Some(Node::Number(y))) => x == y || (x.is_nan() && y.is_nan()),
            (Some(Node::String(x)), Some(Node::String(y))) => x == y,
            _ => false,
        }
    }
}

impl Host for MemoryHost {
    type Handle = Handle;

    fn kind_of(&self, value: Handle) -> HostKind {
        match self.get(value) {
            None | Some(Node::Undefined) => HostKind::Undefined,
            Some(Node::Null) => HostKind::Null,
            Some(Node::Boolean(_)) => HostKind::Boolean,
            Some(Node::Number(_)) => HostKind::Number,
            Some(Node::String(_)) => HostKind::String,
            Some(Node::Array(_)) => HostKind::Array,
            Some(Node::Set(_)) => HostKind::Set,
            Some(Node::Map(_)) => HostKind::Map,
            Some(Node::Object(_)) => HostKind::Object,
            Some(Node::Opaque(kind)) | Some(Node::Failing(kind, _)) => *kind,
        }
    }

    fn to_boolean(&self, value: Handle) -> Result<bool, HostError> {
        match self.node(value)? {
            Node::Boolean(b) => Ok(*b),
            _ => Err(HostError::Malformed("not a boolean")),
        }
    }

    fn to_number(&self, value: Handle) -> Result<f64, HostError> {
        match self.node(value)? {
            Node::Number(n) => Ok(*n),
            _ => Err(HostError::Malformed("not a number")),
        }
    }

    fn to_utf8(&self, value: Handle) -> Result<String, HostError> {
        self.string(value).map(ToString::to_string)
    }

    fn array_length(&self, array: Handle) -> Result<u32, HostError> {
        Ok(self.elements(array)?.len() as u32)
    }

    fn array_get(&self, array: Handle, index: u32) -> Result<Handle, HostError> {
        self.elements(array)?
            .get(index as usize)
            .copied()
            .ok_or(HostError::Malformed("array index out of bounds"))
    }

    fn set_as_array(&mut self, set: Handle) -> Result<Handle, HostError> {
        let items = match self.node(set)? {
            Node::Set(items) => items.clone(),
            _ => return Err(HostError::Malformed("not a set")),
        };
        self.allocate(Node::Array(items))
    }

    fn map_as_array(&mut self, map: Handle) -> Result<Handle, HostError> {
        let flat = match self.node(map)? {
            Node::Map(entries) => entries.iter().flat_map(|&(k, v)| [k, v]).collect(),
            _ => return Err(HostError::Malformed("not a map")),
        };
        self.allocate(Node::Array(flat))
    }

    fn own_property_names(&mut self, object: Handle) -> Result<Handle, HostError> {
        let names: Vec<String> = match self.node(object)? {
            Node::Object(properties) => properties.iter().map(|(k, _)| k.clone()).collect(),
            _ => return Err(HostError::Malformed("not an object")),
        };
        let mut keys = Vec::with_capacity(names.len());
        for name in names {
            keys.push(self.allocate(Node::String(name))?);
        }
        self.allocate(Node::Array(keys))
    }

    fn get_property(&self, object: Handle, key: Handle) -> Result<Handle, HostError> {
        let name = self.string(key)?;
        match self.node(object)? {
            Node::Object(properties) => Ok(properties
                .iter()
                .find(|(k, _)| k == name)
                .map(|&(_, v)| v)
                .unwrap_or(Handle::MISSING)),
            _ => Err(HostError::Malformed("not an object")),
        }
    }

    fn new_undefined(&mut self) -> Result<Handle, HostError> {
        self.allocate(Node::Undefined)
    }

    fn new_null(&mut self) -> Result<Handle, HostError> {
        self.allocate(Node::Null)
    }

    fn new_boolean(&mut self, value: bool) -> Result<Handle, HostError> {
        self.allocate(Node::Boolean(value))
    }

    fn new_number(&mut self, value: f64) -> Result<Handle, HostError> {
        self.allocate(Node::Number(value))
    }

    fn new_string(&mut self, bytes: &[u8]) -> Result<Handle, HostError> {
        self.allocate(Node::String(String::from_utf8_lossy(bytes).into_owned()))
    }

    fn new_array(&mut self, length: u32) -> Result<Handle, HostError> {
        let undefined = self.new_undefined()?;
        self.allocate(Node::Array(crate::vec![undefined; length as usize]))
    }

    fn array_set(&mut self, array: Handle, index: u32, value: Handle) -> Result<(), HostError> {
        let index = index as usize;
        let len = match self.node(array)? {
            Node::Array(items) => items.len(),
            _ => return Err(HostError::Malformed("not an array")),
        };
        // Writing past the end leaves holes, which read as undefined.
        let hole = if index > len {
            Some(self.new_undefined()?)
        } else {
            None
        };
        match self.node_mut(array)? {
            Node::Array(items) => {
                if let Some(undefined) = hole {
                    items.resize(index, undefined);
                }
                if index == items.len() {
                    items.push(value);
                } else {
                    items[index] = value;
                }
                Ok(())
            }
            _ => Err(HostError::Malformed("not an array")),
        }
    }

    fn new_set(&mut self) -> Result<Handle, HostError> {
        self.allocate(Node::Set(Vec::new()))
    }

    fn set_add(&mut self, set: Handle, value: Handle) -> Result<(), HostError> {
        let duplicate = self
            .elements(set)?
            .iter()
            .any(|&item| self.same_value_zero(item, value));
        match self.node_mut(set)? {
            Node::Set(items) => {
                if !duplicate {
                    items.push(value);
                }
                Ok(())
            }
            _ => Err(HostError::Malformed("not a set")),
        }
    }

    fn new_map(&mut self) -> Result<Handle, HostError> {
        self.allocate(Node::Map(Vec::new()))
    }

    fn map_set(&mut self, map: Handle, key: Handle, value: Handle) -> Result<(), HostError> {
        let existing = match self.node(map)? {
            Node::Map(entries) => entries
                .iter()
                .position(|&(k, _)| self.same_value_zero(k, key)),
            _ => return Err(HostError::Malformed("not a map")),
        };
        if let Node::Map(entries) = self.node_mut(map)? {
            match existing {
                Some(index) => entries[index].1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(())
    }

    fn new_object(&mut self) -> Result<Handle, HostError> {
        self.allocate(Node::Object(Vec::new()))
    }

    /// Non-string keys are converted the way property keys are: numbers and
    /// other primitives by their display form.
    fn object_set(&mut self, object: Handle, key: Handle, value: Handle) -> Result<(), HostError> {
        let name = self.property_key(key)?;
        match self.node_mut(object)? {
            Node::Object(properties) => {
                match properties.iter_mut().find(|(k, _)| *k == name) {
                    Some(slot) => slot.1 = value,
                    None => properties.push((name, value)),
                }
                Ok(())
            }
            _ => Err(HostError::Malformed("not an object")),
        }
    }
}

impl MemoryHost {
    fn property_key(&self, key: Handle) -> Result<String, HostError> {
        Ok(match self.node(key)? {
            Node::String(s) => s.clone(),
            Node::Undefined => "undefined".to_string(),
            Node::Null => "null".to_string(),
            Node::Boolean(b) => b.to_string(),
            Node::Number(n) if *n == 0.0 => "0".to_string(),
            Node::Number(n) => n.to_string(),
            _ => return Err(HostError::Malformed("property key must be a primitive")),
        })
    }
}
