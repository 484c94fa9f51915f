use tracing::debug;

use crate::Vec;
use crate::api::{ConversionError, HostError, MarshalOptions};
use crate::host::{Host, HostKind};
use crate::values::{Number, Pair, Pairs, Value, Values};

/// Converts a host value with the default [`MarshalOptions`].
pub fn import<H: Host>(host: &mut H, value: H::Handle) -> Result<Value, ConversionError> {
    import_with(&MarshalOptions::default(), host, value)
}

/// Converts a host value into a tagged value tree owned by the caller.
///
/// Kinds without a tagged representation fail with
/// [`ConversionError::UnsupportedKind`]; empty containers fail with
/// [`ConversionError::InvalidInput`].
pub fn import_with<H: Host>(
    options: &MarshalOptions,
    host: &mut H,
    value: H::Handle,
) -> Result<Value, ConversionError> {
    let mut importer = Importer {
        host,
        max_depth: options.max_depth,
    };
    importer.import(value, 0).inspect_err(|err| {
        debug!(error = %err, "Import failed");
    })
}

struct Importer<'h, H> {
    host: &'h mut H,
    max_depth: usize,
}

impl<H: Host> Importer<'_, H> {
    /// `depth` is the number of composites enclosing `value`.
    fn import(&mut self, value: H::Handle, depth: usize) -> Result<Value, ConversionError> {
        let kind = self.host.kind_of(value);
        match kind {
            HostKind::Undefined => Ok(Value::undefined()),
            HostKind::Null => Ok(Value::null()),
            HostKind::Boolean => Ok(Value::boolean(self.host.to_boolean(value)?)),
            HostKind::Number => Ok(Value::Number(number(self.host.to_number(value)?))),
            HostKind::String => Ok(Value::try_string(&self.host.to_utf8(value)?)?),
            HostKind::Array => {
                self.enter(depth)?;
                self.elements(value, depth + 1).map(Value::Array)
            }
            HostKind::Set => {
                self.enter(depth)?;
                let view = self.host.set_as_array(value)?;
                self.elements(view, depth + 1).map(Value::Set)
            }
            HostKind::Map => {
                self.enter(depth)?;
                let view = self.host.map_as_array(value)?;
                self.flattened_pairs(view, depth + 1).map(Value::Map)
            }
            HostKind::Object => {
                self.enter(depth)?;
                self.properties(value, depth + 1).map(Value::Object)
            }
            HostKind::BigInt
            | HostKind::Symbol
            | HostKind::Function
            | HostKind::Date
            | HostKind::Other => Err(ConversionError::UnsupportedKind(kind)),
        }
    }

    fn enter(&self, depth: usize) -> Result<(), ConversionError> {
        if depth >= self.max_depth {
            debug!(max_depth = self.max_depth, "Import nesting limit reached");
            return Err(ConversionError::DepthLimitExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn length(&self, array: H::Handle) -> Result<u32, ConversionError> {
        match self.host.array_length(array)? {
            0 => Err(ConversionError::InvalidInput("empty host container")),
            len if len > i32::MAX as u32 => {
                Err(ConversionError::InvalidInput("host container is too large"))
            }
            len => Ok(len),
        }
    }

    fn elements(&mut self, array: H::Handle, depth: usize) -> Result<Values, ConversionError> {
        let len = self.length(array)?;
        let mut items = Vec::with_capacity(len as usize);
        for index in 0..len {
            let element = self.host.array_get(array, index)?;
            items.push(self.import(element, depth)?);
        }
        Ok(Values::from_vec(items)?)
    }

    fn flattened_pairs(&mut self, array: H::Handle, depth: usize) -> Result<Pairs, ConversionError> {
        let len = self.length(array)?;
        if len % 2 != 0 {
            return Err(HostError::Malformed("map view has odd length").into());
        }
        let mut pairs = Vec::with_capacity(len as usize / 2);
        for index in (0..len).step_by(2) {
            let key = self.host.array_get(array, index)?;
            let key = self.import(key, depth)?;
            let value = self.host.array_get(array, index + 1)?;
            let value = self.import(value, depth)?;
            pairs.push(Pair::new(key, value));
        }
        Ok(Pairs::from_vec(pairs)?)
    }

    fn properties(&mut self, object: H::Handle, depth: usize) -> Result<Pairs, ConversionError> {
        let names = self.host.own_property_names(object)?;
        let len = self.length(names)?;
        let mut pairs = Vec::with_capacity(len as usize);
        for index in 0..len {
            let name = self.host.array_get(names, index)?;
            let key = self.import(name, depth)?;
            let value = self.host.get_property(object, name)?;
            let value = self.import(value, depth)?;
            pairs.push(Pair::new(key, value));
        }
        Ok(Pairs::from_vec(pairs)?)
    }
}

/// Integral numbers in `[i32::MIN, u32::MAX]` get an integer specifier,
/// everything else (including `-0`) stays a double.
fn number(value: f64) -> Number {
    let in_range = value >= i32::MIN as f64 && value <= u32::MAX as f64;
    if in_range && (value as i64) as f64 == value && !(value == 0.0 && value.is_sign_negative()) {
        Number::integer(value as i64)
    } else {
        Number::Float64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_get_integer_specifiers() {
        assert_eq!(number(0.0), Number::Uint32(0));
        assert_eq!(number(-1.0), Number::Int32(-1));
        assert_eq!(number(u32::MAX as f64), Number::Int64(u32::MAX as i64));
        assert_eq!(number(i32::MIN as f64), Number::Int32(i32::MIN));
    }

    #[test]
    fn other_numbers_stay_doubles() {
        assert!(matches!(number(-0.0), Number::Float64(v) if v.is_sign_negative()));
        assert_eq!(number(0.5), Number::Float64(0.5));
        assert_eq!(number(u32::MAX as f64 + 1.0), Number::Float64(4294967296.0));
        assert_eq!(number(i32::MIN as f64 - 1.0), Number::Float64(-2147483649.0));
        assert!(matches!(number(f64::NAN), Number::Float64(v) if v.is_nan()));
        assert_eq!(number(f64::INFINITY), Number::Float64(f64::INFINITY));
    }
}
