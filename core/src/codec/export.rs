use tracing::debug;

use crate::api::{ConversionError, MarshalOptions};
use crate::host::Host;
use crate::values::{MAX_SAFE_INTEGER, Number, Pair, Value};

/// Builds a host value with the default [`MarshalOptions`].
pub fn export<H: Host>(host: &mut H, value: &Value) -> Result<H::Handle, ConversionError> {
    export_with(&MarshalOptions::default(), host, value)
}

/// Builds a fresh host value mirroring `value`.
///
/// `int64` numbers become host doubles, so magnitudes beyond 2^53 lose
/// precision.
pub fn export_with<H: Host>(
    options: &MarshalOptions,
    host: &mut H,
    value: &Value,
) -> Result<H::Handle, ConversionError> {
    let mut exporter = Exporter {
        host,
        max_depth: options.max_depth,
    };
    exporter.export(value, 0).inspect_err(|err| {
        debug!(error = %err, "Export failed");
    })
}

struct Exporter<'h, H> {
    host: &'h mut H,
    max_depth: usize,
}

impl<H: Host> Exporter<'_, H> {
    fn export(&mut self, value: &Value, depth: usize) -> Result<H::Handle, ConversionError> {
        let handle = match value {
            Value::Undefined => self.host.new_undefined()?,
            Value::Null => self.host.new_null()?,
            Value::Boolean(b) => self.host.new_boolean(*b)?,
            Value::Number(number) => self.number(*number)?,
            Value::String(s) => self.host.new_string(s.as_bytes())?,
            Value::Array(items) => {
                self.enter(depth)?;
                let array = self.host.new_array(items.len() as u32)?;
                for (index, item) in items.iter().enumerate() {
                    let element = self.export(item, depth + 1)?;
                    self.host.array_set(array, index as u32, element)?;
                }
                array
            }
            Value::Set(items) => {
                self.enter(depth)?;
                let set = self.host.new_set()?;
                for item in items.iter() {
                    let element = self.export(item, depth + 1)?;
                    self.host.set_add(set, element)?;
                }
                set
            }
            Value::Map(pairs) => {
                self.enter(depth)?;
                let map = self.host.new_map()?;
                for pair in pairs.iter() {
                    let (key, value) = self.pair(pair, depth + 1)?;
                    self.host.map_set(map, key, value)?;
                }
                map
            }
            Value::Object(pairs) => {
                self.enter(depth)?;
                let object = self.host.new_object()?;
                for pair in pairs.iter() {
                    let (key, value) = self.pair(pair, depth + 1)?;
                    self.host.object_set(object, key, value)?;
                }
                object
            }
        };
        Ok(handle)
    }

    fn enter(&self, depth: usize) -> Result<(), ConversionError> {
        if depth >= self.max_depth {
            debug!(max_depth = self.max_depth, "Export nesting limit reached");
            return Err(ConversionError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn pair(
        &mut self,
        pair: &Pair,
        depth: usize,
    ) -> Result<(H::Handle, H::Handle), ConversionError> {
        let key = self.export(&pair.key, depth)?;
        let value = self.export(&pair.value, depth)?;
        Ok((key, value))
    }

    fn number(&mut self, number: Number) -> Result<H::Handle, ConversionError> {
        let handle = match number {
            Number::Float64(value) => self.host.new_number(value)?,
            Number::Int64(value) => {
                if value.unsigned_abs() > MAX_SAFE_INTEGER {
                    debug!(value, "int64 exported as a double loses precision");
                }
                self.host.new_number(value as f64)?
            }
            Number::Int32(value) => self.host.new_int32(value)?,
            Number::Uint32(value) => self.host.new_uint32(value)?,
        };
        Ok(handle)
    }
}
