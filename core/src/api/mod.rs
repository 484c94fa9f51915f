//! Public API for the JavaScript/host value bridge.
//!
//! A [`Bridge`] bundles the codec and the diagnostic extractor behind one set
//! of defaults. On success the embedder hands the result of a script to
//! [`Bridge::import`]; on failure it hands the exception context to
//! [`Bridge::extract_diagnostic`].
//!
//! # Example
//!
//! ```
//! use jsbridge_core::api::{Bridge, BridgeOptions, MarshalOptionsOverride};
//! use jsbridge_core::memory::{MemoryHost, Node};
//! use jsbridge_core::values::Value;
//!
//! let bridge = Bridge::new(BridgeOptions::default());
//! let mut host = MemoryHost::new();
//!
//! // Host -> tagged
//! let one = host.insert(Node::Number(1.0));
//! let text = host.insert(Node::String("two".into()));
//! let array = host.insert(Node::Array(vec![one, text]));
//! let value = bridge.import(Default::default(), &mut host, array).unwrap();
//! assert_eq!(value.size(), 2);
//!
//! // Tagged -> host, with a tighter nesting limit for this call only
//! let limit = MarshalOptionsOverride { max_depth: Some(4) };
//! let handle = bridge.export(limit, &mut host, &Value::string("back")).unwrap();
//! assert_eq!(host.get(handle), Some(&Node::String("back".into())));
//! ```

pub mod bridge;
pub mod error;
pub mod options;

pub use bridge::Bridge;
pub use error::{ConversionError, HostError};
pub use options::{
    BridgeOptions, DiagnosticOptions, DiagnosticOptionsOverride, MarshalOptions,
    MarshalOptionsOverride,
};
