//! SmallStr: an owned, NUL-terminated byte string with small-string optimization.
//!
//! A `SmallStr` keeps its bytes *and* the trailing NUL inside one payload word
//! when they fit, and moves to an exact-size heap buffer otherwise:
//!
//! ```text
//! len + 1 <= WORD_SIZE   Inline:  [b0 b1 .. bn 00 ..]        (no allocation)
//! len + 1 >  WORD_SIZE   Heap:    ptr ──▶ [b0 b1 .. bn 00]   (exactly len + 1 bytes)
//! ```
//!
//! The threshold is fixed by the width of the payload word and is the same one
//! used by construction, inspection and destruction, so a string of
//! `INLINE_CAPACITY` bytes is always inline and one byte more is always on the heap.
//!
//! ```
//! use jsbridge_small_str::{SmallStr, INLINE_CAPACITY};
//!
//! let short = SmallStr::new(b"short");
//! assert!(short.is_inline());
//!
//! let long = SmallStr::new(b"long enough");
//! assert!(!long.is_inline());
//! assert_eq!(long.as_bytes(), b"long enough");
//! assert_eq!(long.as_bytes_with_nul().last(), Some(&0));
//! assert_eq!(INLINE_CAPACITY, 7);
//! ```

#![no_std]

extern crate alloc;

use alloc::{boxed::Box, vec::Vec};
use core::{fmt, hash, ops::Deref, str::Utf8Error};

/// Width in bytes of the payload word that inline strings live in.
pub const WORD_SIZE: usize = core::mem::size_of::<u64>();

/// Longest content (excluding the NUL terminator) that is stored inline.
pub const INLINE_CAPACITY: usize = WORD_SIZE - 1;

static_assertions::const_assert!(INLINE_CAPACITY <= u8::MAX as usize);

#[derive(Clone)]
enum Repr {
    // Bytes past `len` are always zero, so the word is NUL-terminated.
    Inline { len: u8, word: [u8; WORD_SIZE] },
    // Always `len + 1` bytes, the last one being NUL.
    Heap(Box<[u8]>),
}

/// An owned byte string that avoids heap allocation for short contents.
///
/// See [crate-level docs](crate) for the storage rules.
#[derive(Clone)]
pub struct SmallStr {
    repr: Repr,
}

/// Storage of a [`SmallStr`] after giving up the wrapper.
///
/// Used to move a string across a raw boundary and back again with
/// [`SmallStr::from_word`] / [`SmallStr::from_boxed_with_nul`].
#[derive(Debug)]
pub enum RawParts {
    /// Content plus NUL packed into a payload word.
    Inline([u8; WORD_SIZE]),
    /// Exact-size heap buffer ending in NUL.
    Heap(Box<[u8]>),
}

impl SmallStr {
    /// Copies `bytes` into a new string, inline if `bytes.len() + 1` fits the word.
    pub fn new(bytes: &[u8]) -> Self {
        if bytes.len() <= INLINE_CAPACITY {
            let mut word = [0u8; WORD_SIZE];
            word[..bytes.len()].copy_from_slice(bytes);
            return Self {
                repr: Repr::Inline {
                    len: bytes.len() as u8,
                    word,
                },
            };
        }

        let mut buffer = Vec::with_capacity(bytes.len() + 1);
        buffer.extend_from_slice(bytes);
        buffer.push(0);
        Self {
            repr: Repr::Heap(buffer.into_boxed_slice()),
        }
    }

    /// Rebuilds an inline string from a payload word and its content length.
    ///
    /// Returns `None` when `len` does not fit inline. Bytes of `word` past
    /// `len` are cleared.
    pub fn from_word(mut word: [u8; WORD_SIZE], len: usize) -> Option<Self> {
        if len > INLINE_CAPACITY {
            return None;
        }
        word[len..].fill(0);
        Some(Self {
            repr: Repr::Inline {
                len: len as u8,
                word,
            },
        })
    }

    /// Takes ownership of a NUL-terminated heap buffer.
    ///
    /// Returns `None` if the buffer does not end in NUL. Contents short enough
    /// to be inline are copied inline and the buffer is released.
    pub fn from_boxed_with_nul(bytes: Box<[u8]>) -> Option<Self> {
        let (&last, content) = bytes.split_last()?;
        if last != 0 {
            return None;
        }
        if content.len() <= INLINE_CAPACITY {
            return Some(Self::new(content));
        }
        Some(Self {
            repr: Repr::Heap(bytes),
        })
    }

    /// Gives up the wrapper and returns the underlying storage.
    pub fn into_raw_parts(self) -> RawParts {
        match self.repr {
            Repr::Inline { word, .. } => RawParts::Inline(word),
            Repr::Heap(bytes) => RawParts::Heap(bytes),
        }
    }

    /// Content length in bytes, excluding the NUL terminator.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } => *len as usize,
            Repr::Heap(bytes) => bytes.len() - 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the content lives in the payload word rather than on the heap.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// Content bytes without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        let with_nul = self.as_bytes_with_nul();
        &with_nul[..with_nul.len() - 1]
    }

    /// Content bytes followed by the NUL terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { len, word } => &word[..*len as usize + 1],
            Repr::Heap(bytes) => bytes,
        }
    }

    /// Content as UTF-8 text.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }
}

impl Default for SmallStr {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl From<&str> for SmallStr {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<&[u8]> for SmallStr {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl Deref for SmallStr {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for SmallStr {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for SmallStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SmallStr {}

impl PartialOrd for SmallStr {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallStr {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl hash::Hash for SmallStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for SmallStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => fmt::Debug::fmt(s, f),
            Err(_) => fmt::Debug::fmt(self.as_bytes(), f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_inline() {
        let s = SmallStr::default();
        assert!(s.is_inline());
        assert_eq!(s.len(), 0);
        assert_eq!(s.as_bytes_with_nul(), &[0]);
    }

    #[test]
    fn test_inline_boundary() {
        // 7 bytes + NUL fill the word exactly.
        let s = SmallStr::new(b"1234567");
        assert!(s.is_inline());
        assert_eq!(s.as_bytes(), b"1234567");
        assert_eq!(s.as_bytes_with_nul(), b"1234567\0");

        // One more byte no longer fits.
        let s = SmallStr::new(b"12345678");
        assert!(!s.is_inline());
        assert_eq!(s.len(), 8);
        assert_eq!(s.as_bytes(), b"12345678");
        assert_eq!(s.as_bytes_with_nul(), b"12345678\0");
    }

    #[test]
    fn test_heap_buffer_is_exact() {
        let s = SmallStr::new(b"long long long string");
        match s.into_raw_parts() {
            RawParts::Heap(bytes) => assert_eq!(bytes.len(), 22),
            RawParts::Inline(_) => panic!("expected heap storage"),
        }
    }

    #[test]
    fn test_raw_parts_round_trip() {
        for text in ["", "abc", "1234567", "12345678", "a much longer string"] {
            let s = SmallStr::from(text);
            let back = match s.clone().into_raw_parts() {
                RawParts::Inline(word) => SmallStr::from_word(word, text.len()).unwrap(),
                RawParts::Heap(bytes) => SmallStr::from_boxed_with_nul(bytes).unwrap(),
            };
            assert_eq!(back, s);
            assert_eq!(back.is_inline(), s.is_inline());
        }
    }

    #[test]
    fn test_from_word_rejects_long_length() {
        assert!(SmallStr::from_word([b'x'; WORD_SIZE], WORD_SIZE).is_none());
    }

    #[test]
    fn test_from_word_clears_tail() {
        let s = SmallStr::from_word(*b"abcdefgh", 3).unwrap();
        assert_eq!(s.as_bytes_with_nul(), b"abc\0");
    }

    #[test]
    fn test_from_boxed_requires_nul() {
        let bytes: Box<[u8]> = Box::from(&b"no terminator here"[..]);
        assert!(SmallStr::from_boxed_with_nul(bytes).is_none());
        let bytes: Box<[u8]> = Box::from(&b""[..]);
        assert!(SmallStr::from_boxed_with_nul(bytes).is_none());
    }

    #[test]
    fn test_from_boxed_short_content_moves_inline() {
        let bytes: Box<[u8]> = Box::from(&b"hi\0"[..]);
        let s = SmallStr::from_boxed_with_nul(bytes).unwrap();
        assert!(s.is_inline());
        assert_eq!(s.as_bytes(), b"hi");
    }

    #[test]
    fn test_interior_nul_is_content() {
        let s = SmallStr::new(b"a\0b");
        assert_eq!(s.len(), 3);
        assert_eq!(s.as_bytes(), b"a\0b");
    }

    #[test]
    fn test_as_str_rejects_invalid_utf8() {
        assert!(SmallStr::new(&[0xff, 0xfe]).as_str().is_err());
        assert_eq!(SmallStr::from("ok").as_str(), Ok("ok"));
    }
}
