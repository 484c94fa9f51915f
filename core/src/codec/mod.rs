//! Depth-first conversion between tagged values and a [`Host`](crate::host::Host)
//! value graph.
//!
//! Both directions either produce a complete result or fail without one.
//! Import builds each composite into a local buffer that is dropped, children
//! first, as soon as any element fails. Export builds a fresh host container
//! and abandons it to the engine on failure.

mod export;
mod import;

pub use export::{export, export_with};
pub use import::{import, import_with};

#[cfg(test)]
mod import_test;
