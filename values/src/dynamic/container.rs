use alloc::{boxed::Box, vec::Vec};
use core::ops::{Deref, DerefMut};

use crate::ValueError;

use super::Value;

/// A key/value pair, the element type of maps and objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pair {
    pub key: Value,
    pub value: Value,
}

impl Pair {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}

/// Validates a requested container size. Zero-length containers are not representable.
fn checked_len(size: i32) -> Result<usize, ValueError> {
    if size <= 0 {
        return Err(ValueError::InvalidInput("container size must be positive"));
    }
    Ok(size as usize)
}

fn checked_size(len: usize) -> Result<i32, ValueError> {
    if len == 0 {
        return Err(ValueError::InvalidInput("container size must be positive"));
    }
    i32::try_from(len).map_err(|_| ValueError::InvalidInput("container size exceeds i32::MAX"))
}

/// Fixed-length, non-empty, singly owned buffer of values (array and set payload).
///
/// Slots start as `undefined` and are filled in place. The length never
/// changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Values(Box<[Value]>);

impl Values {
    /// Allocates `size` undefined slots.
    pub fn new(size: i32) -> Result<Self, ValueError> {
        let len = checked_len(size)?;
        Ok(Self((0..len).map(|_| Value::Undefined).collect()))
    }

    /// Takes ownership of already built elements.
    pub fn from_vec(elements: Vec<Value>) -> Result<Self, ValueError> {
        checked_size(elements.len())?;
        Ok(Self(elements.into_boxed_slice()))
    }

    /// Element count as stored in the `size` field.
    pub fn size(&self) -> i32 {
        self.0.len() as i32
    }

    pub fn into_boxed_slice(self) -> Box<[Value]> {
        self.0
    }
}

impl Deref for Values {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl DerefMut for Values {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.0
    }
}

/// Fixed-length, non-empty, singly owned buffer of pairs (map and object payload).
#[derive(Debug, Clone, PartialEq)]
pub struct Pairs(Box<[Pair]>);

impl Pairs {
    /// Allocates `size` pairs of undefined key and value.
    pub fn new(size: i32) -> Result<Self, ValueError> {
        let len = checked_len(size)?;
        Ok(Self((0..len).map(|_| Pair::default()).collect()))
    }

    pub fn from_vec(pairs: Vec<Pair>) -> Result<Self, ValueError> {
        checked_size(pairs.len())?;
        Ok(Self(pairs.into_boxed_slice()))
    }

    pub fn size(&self) -> i32 {
        self.0.len() as i32
    }

    pub fn into_boxed_slice(self) -> Box<[Pair]> {
        self.0
    }
}

impl Deref for Pairs {
    type Target = [Pair];

    fn deref(&self) -> &[Pair] {
        &self.0
    }
}

impl DerefMut for Pairs {
    fn deref_mut(&mut self) -> &mut [Pair] {
        &mut self.0
    }
}
