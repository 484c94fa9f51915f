//! Portable tagged values for the JavaScript/host boundary.
//!
//! A [`Value`] is one JavaScript-shaped datum (scalar, string, array, set, map
//! or plain object) with single ownership of everything it points to. The
//! [`raw`] module gives it a fixed 16-byte C layout for crossing a compiled
//! library boundary, and [`ffi`] exposes that layout through a C ABI.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod dynamic;
mod error;
mod kind;

#[cfg(target_pointer_width = "64")]
pub mod ffi;
#[cfg(target_pointer_width = "64")]
pub mod raw;

pub use dynamic::{MAX_SAFE_INTEGER, Number, Pair, Pairs, Value, Values};
pub use error::ValueError;
pub use jsbridge_small_str::{INLINE_CAPACITY, SmallStr, WORD_SIZE};
pub use kind::{Kind, Specifier};
