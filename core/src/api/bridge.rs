//! The bridge facade.

use super::{
    BridgeOptions, ConversionError, DiagnosticOptionsOverride, MarshalOptionsOverride,
};
use crate::codec;
use crate::diagnostics::{self, DiagnosticRecord, ExceptionContext};
use crate::host::Host;
use crate::values::Value;

/// Codec and diagnostic extractor sharing one set of default options.
///
/// A bridge holds no engine state, so one instance can serve any number of
/// hosts, one call at a time per host.
#[derive(Debug, Clone, Default)]
pub struct Bridge {
    options: BridgeOptions,
}

impl Bridge {
    pub fn new(options: BridgeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Converts a live host value into a tagged value tree owned by the caller.
    pub fn import<H: Host>(
        &self,
        options_override: MarshalOptionsOverride,
        host: &mut H,
        value: H::Handle,
    ) -> Result<Value, ConversionError> {
        let mut options = self.options.default_marshal_options.clone();
        options.override_with(&options_override);
        codec::import_with(&options, host, value)
    }

    /// Builds a fresh host value mirroring `value`.
    pub fn export<H: Host>(
        &self,
        options_override: MarshalOptionsOverride,
        host: &mut H,
        value: &Value,
    ) -> Result<H::Handle, ConversionError> {
        let mut options = self.options.default_marshal_options.clone();
        options.override_with(&options_override);
        codec::export_with(&options, host, value)
    }

    /// Describes a failed execution. Never fails.
    pub fn extract_diagnostic<C: ExceptionContext + ?Sized>(
        &self,
        options_override: DiagnosticOptionsOverride,
        context: &C,
    ) -> DiagnosticRecord {
        let mut options = self.options.default_diagnostic_options.clone();
        options.override_with(&options_override);
        diagnostics::extract_diagnostic_with(&options, context)
    }
}
