//! Configuration for the codec and the diagnostic extractor.
//!
//! Each options struct has an `*Override` twin whose fields are all
//! `Option`s. A [`Bridge`](super::Bridge) keeps one set of defaults and every
//! call merges the override it was given on top of them, so callers only
//! spell out what they want to change:
//!
//! ```
//! use jsbridge_core::api::{MarshalOptions, MarshalOptionsOverride};
//!
//! let mut options = MarshalOptions::default();
//! options.override_with(&MarshalOptionsOverride { max_depth: Some(16) });
//! assert_eq!(options.max_depth, 16);
//! ```

use crate::{String, ToString};

/// Limits applied while converting values in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalOptions {
    /// Maximum number of nested composite levels. A top-level array counts
    /// as one level; scalars never count.
    pub max_depth: usize,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarshalOptionsOverride {
    pub max_depth: Option<usize>,
}

impl MarshalOptions {
    pub fn override_with(&mut self, other: &MarshalOptionsOverride) {
        if let Some(max_depth) = other.max_depth {
            self.max_depth = max_depth;
        }
    }
}

/// Text used when rendering diagnostic records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticOptions {
    /// Display name of stack frames without a function name.
    pub anonymous_function: String,
    /// Display name of stack frames without a script name.
    pub unknown_script: String,
    /// Prefix of every stack trace line.
    pub indent: String,
    /// Message used when execution was terminated without an exception.
    pub terminated_message: String,
    /// Message used when the engine gave no information at all.
    pub no_information_message: String,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            anonymous_function: "(anonymous function)".to_string(),
            unknown_script: "<unknown>".to_string(),
            indent: "    ".to_string(),
            terminated_message: "Script execution terminated".to_string(),
            no_information_message: "<engine didn't provide any information about error>"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticOptionsOverride {
    pub anonymous_function: Option<String>,
    pub unknown_script: Option<String>,
    pub indent: Option<String>,
    pub terminated_message: Option<String>,
    pub no_information_message: Option<String>,
}

impl DiagnosticOptions {
    pub fn override_with(&mut self, other: &DiagnosticOptionsOverride) {
        if let Some(anonymous_function) = &other.anonymous_function {
            self.anonymous_function = anonymous_function.clone();
        }
        if let Some(unknown_script) = &other.unknown_script {
            self.unknown_script = unknown_script.clone();
        }
        if let Some(indent) = &other.indent {
            self.indent = indent.clone();
        }
        if let Some(terminated_message) = &other.terminated_message {
            self.terminated_message = terminated_message.clone();
        }
        if let Some(no_information_message) = &other.no_information_message {
            self.no_information_message = no_information_message.clone();
        }
    }
}

/// Defaults held by a [`Bridge`](super::Bridge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeOptions {
    pub default_marshal_options: MarshalOptions,
    pub default_diagnostic_options: DiagnosticOptions,
}
