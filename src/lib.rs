//! jsbridge - Value marshaling and diagnostics at a JavaScript engine boundary
//!
//! # Overview
//!
//! jsbridge moves data between a host program and an embedded JavaScript
//! engine. Host code builds tagged [`Value`]s (scalars, strings, arrays,
//! sets, maps and objects), exports them into the engine as call arguments
//! and imports script results back. When a script throws, the failure is
//! turned into a [`DiagnosticRecord`] with the message, location, a marked
//! source line and a formatted stack trace.
//!
//! # Quick Start
//!
//! ```
//! use jsbridge::Bridge;
//! use jsbridge::memory::{MemoryHost, Node};
//! use jsbridge::values::{Specifier, Value};
//!
//! let bridge = Bridge::default();
//! let mut host = MemoryHost::new();
//!
//! // A script result like `[7, "seven"]`
//! let seven = host.insert(Node::Number(7.0));
//! let name = host.insert(Node::String("seven".into()));
//! let result = host.insert(Node::Array(vec![seven, name]));
//!
//! let value = bridge.import(Default::default(), &mut host, result).unwrap();
//! let elements = value.to_array().unwrap();
//! assert_eq!(elements[0].specifier(), Specifier::Uint32);
//! assert_eq!(elements[1], Value::string("seven"));
//!
//! // And back into the engine
//! let handle = bridge.export(Default::default(), &mut host, &value).unwrap();
//! assert_eq!(bridge.import(Default::default(), &mut host, handle).unwrap(), value);
//! ```
//!
//! # Diagnostics
//!
//! ```
//! use jsbridge::{Bridge, StackFrame};
//! use jsbridge::memory::ExceptionSnapshot;
//!
//! let context = ExceptionSnapshot::thrown("Error: nope")
//!     .with_source("throw new Error('nope')", 0, 5)
//!     .with_location("main.js", 3)
//!     .with_frames(vec![StackFrame::new("main", "main.js", 3)]);
//!
//! let record = Bridge::default().extract_diagnostic(Default::default(), &context);
//! assert_eq!(
//!     record.to_string(),
//!     "main.js:3: Error: nope\nthrow new Error('nope')\n^~~~~\nstack trace:\n    main @ main.js:3"
//! );
//! ```

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_diagnostic, render_diagnostic_to};

// Re-export public API from jsbridge_core
pub use jsbridge_core::api::{
    Bridge, BridgeOptions, ConversionError, DiagnosticOptions, DiagnosticOptionsOverride,
    HostError, MarshalOptions, MarshalOptionsOverride,
};
pub use jsbridge_core::codec::{export, export_with, import, import_with};
pub use jsbridge_core::diagnostics::{
    DiagnosticRecord, ExceptionContext, SourceMarker, StackFrame, extract_diagnostic,
    extract_diagnostic_with, render_stack_trace,
};
pub use jsbridge_core::host::{self, Host, HostKind};
pub use jsbridge_core::memory;

// Re-export commonly used values
pub use jsbridge_core::values::{self, Kind, Number, Pair, Specifier, Value, ValueError};
