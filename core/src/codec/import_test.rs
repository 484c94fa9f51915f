use pretty_assertions::assert_eq;

use super::*;
use crate::api::{ConversionError, HostError, MarshalOptions};
use crate::host::{Host, HostKind};
use crate::memory::{Handle, MemoryHost, Node};
use crate::test_utils::init_test_logging;
use crate::values::{Pair, Specifier, Value};
use crate::{ToString, vec};

fn string(host: &mut MemoryHost, s: &str) -> Handle {
    host.insert(Node::String(s.to_string()))
}

fn number(host: &mut MemoryHost, n: f64) -> Handle {
    host.insert(Node::Number(n))
}

// =============================================================================
// Scalars
// =============================================================================

#[test]
fn scalars() {
    let mut host = MemoryHost::new();
    let undefined = host.insert(Node::Undefined);
    let null = host.insert(Node::Null);
    let t = host.insert(Node::Boolean(true));
    let s = string(&mut host, "hello");

    assert_eq!(import(&mut host, undefined), Ok(Value::undefined()));
    assert_eq!(import(&mut host, null), Ok(Value::null()));
    assert_eq!(import(&mut host, t), Ok(Value::boolean(true)));
    assert_eq!(import(&mut host, s), Ok(Value::string("hello")));
}

#[test]
fn numbers_pick_specifiers() {
    let mut host = MemoryHost::new();
    let cases = [
        (42.0, Specifier::Uint32),
        (-42.0, Specifier::Int32),
        (3_000_000_000.0, Specifier::Int64),
        (0.25, Specifier::Float64),
        (-0.0, Specifier::Float64),
        (1e300, Specifier::Float64),
    ];
    for (n, specifier) in cases {
        let h = number(&mut host, n);
        let value = import(&mut host, h).unwrap();
        assert_eq!(value.specifier(), specifier, "{n}");
        assert_eq!(value.to_double(), Ok(n));
    }
}

#[test]
fn long_strings_go_to_the_heap() {
    let mut host = MemoryHost::new();
    let h = string(&mut host, "long enough for the heap");
    let value = import(&mut host, h).unwrap();
    assert_eq!(value.specifier(), Specifier::Heap);
    assert_eq!(value.to_str(), Ok("long enough for the heap"));
}

#[test]
fn unsupported_kinds_fail() {
    let mut host = MemoryHost::new();
    for kind in [
        HostKind::BigInt,
        HostKind::Symbol,
        HostKind::Function,
        HostKind::Date,
        HostKind::Other,
    ] {
        let h = host.insert(Node::Opaque(kind));
        assert_eq!(import(&mut host, h), Err(ConversionError::UnsupportedKind(kind)));
    }
}

// =============================================================================
// Composites
// =============================================================================

#[test]
fn array_in_order() {
    let mut host = MemoryHost::new();
    let a = number(&mut host, 1.0);
    let b = string(&mut host, "two");
    let c = host.insert(Node::Null);
    let array = host.insert(Node::Array(vec![a, b, c]));

    let value = import(&mut host, array).unwrap();
    let items = value.to_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].to_int32(), Ok(1));
    assert_eq!(items[1].to_str(), Ok("two"));
    assert!(items[2].is_null());
}

#[test]
fn set_keeps_iteration_order() {
    let mut host = MemoryHost::new();
    let a = string(&mut host, "z");
    let b = string(&mut host, "a");
    let set = host.insert(Node::Set(vec![a, b]));

    let value = import(&mut host, set).unwrap();
    assert!(value.is_set());
    let items = value.to_set().unwrap();
    assert_eq!(items[0].to_str(), Ok("z"));
    assert_eq!(items[1].to_str(), Ok("a"));
}

#[test]
fn map_pairs_up_flattened_view() {
    let mut host = MemoryHost::new();
    let k1 = number(&mut host, 1.0);
    let v1 = string(&mut host, "one");
    let k2 = host.insert(Node::Boolean(false));
    let v2 = host.insert(Node::Null);
    let map = host.insert(Node::Map(vec![(k1, v1), (k2, v2)]));

    let value = import(&mut host, map).unwrap();
    assert_eq!(
        value.to_map().unwrap(),
        &[
            Pair::new(Value::integer(1), Value::string("one")),
            Pair::new(Value::boolean(false), Value::null()),
        ][..]
    );
}

#[test]
fn object_own_properties_in_order() {
    let mut host = MemoryHost::new();
    let x = number(&mut host, 0.5);
    let inner_value = host.insert(Node::Boolean(true));
    let inner = host.insert(Node::Array(vec![inner_value]));
    let object = host.insert(Node::Object(vec![
        ("x".to_string(), x),
        ("list".to_string(), inner),
    ]));

    let value = import(&mut host, object).unwrap();
    let pairs = value.to_object().unwrap();
    assert_eq!(pairs[0].key.to_str(), Ok("x"));
    assert_eq!(pairs[0].value.to_double(), Ok(0.5));
    assert_eq!(pairs[1].key.to_str(), Ok("list"));
    assert_eq!(pairs[1].value.to_array().unwrap()[0], Value::boolean(true));
}

#[test]
fn empty_containers_are_invalid_input() {
    let mut host = MemoryHost::new();
    for node in [
        Node::Array(vec![]),
        Node::Set(vec![]),
        Node::Map(vec![]),
        Node::Object(vec![]),
    ] {
        let h = host.insert(node);
        assert!(matches!(
            import(&mut host, h),
            Err(ConversionError::InvalidInput(_))
        ));
    }
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn failing_element_fails_the_whole_array() {
    init_test_logging();
    let mut host = MemoryHost::new();
    let ok = string(&mut host, "fine");
    let bad = host.insert(Node::Failing(HostKind::String, "boom".to_string()));
    let array = host.insert(Node::Array(vec![ok, ok, bad, ok, ok]));

    assert_eq!(
        import(&mut host, array),
        Err(ConversionError::HostConversionFailure(HostError::Exception(
            "boom".to_string()
        )))
    );
}

#[test]
fn unsupported_element_fails_the_whole_object() {
    let mut host = MemoryHost::new();
    let ok = number(&mut host, 1.0);
    let symbol = host.insert(Node::Opaque(HostKind::Symbol));
    let object = host.insert(Node::Object(vec![
        ("a".to_string(), ok),
        ("b".to_string(), symbol),
    ]));
    assert_eq!(
        import(&mut host, object),
        Err(ConversionError::UnsupportedKind(HostKind::Symbol))
    );
}

#[test]
fn failing_view_is_a_host_failure() {
    let mut host = MemoryHost::new();
    let set = host.insert(Node::Failing(HostKind::Set, "terminating".to_string()));
    assert!(matches!(
        import(&mut host, set),
        Err(ConversionError::HostConversionFailure(_))
    ));
}

#[test]
fn view_allocation_failure_is_a_host_failure() {
    let mut host = MemoryHost::with_allocation_limit(0);
    let item = host.insert(Node::Null);
    let set = host.insert(Node::Set(vec![item]));
    assert_eq!(
        import(&mut host, set),
        Err(ConversionError::HostConversionFailure(HostError::OutOfMemory))
    );
}

#[test]
fn depth_limit() {
    let mut host = MemoryHost::new();
    let leaf = host.insert(Node::Null);
    let inner = host.insert(Node::Array(vec![leaf]));
    let outer = host.insert(Node::Array(vec![inner]));

    let options = MarshalOptions { max_depth: 2 };
    assert!(import_with(&options, &mut host, outer).is_ok());

    let options = MarshalOptions { max_depth: 1 };
    assert_eq!(
        import_with(&options, &mut host, outer),
        Err(ConversionError::DepthLimitExceeded { max_depth: 1 })
    );

    let options = MarshalOptions { max_depth: 0 };
    assert!(import_with(&options, &mut host, leaf).is_ok());
}

#[test]
fn cycles_hit_the_depth_limit() {
    let mut host = MemoryHost::new();
    let array = host.new_array(1).unwrap();
    host.array_set(array, 0, array).unwrap();

    let options = MarshalOptions { max_depth: 64 };
    assert_eq!(
        import_with(&options, &mut host, array),
        Err(ConversionError::DepthLimitExceeded { max_depth: 64 })
    );
}

/// Delegates to a [`MemoryHost`] but reports a flattened map view with a
/// dangling key, as a misbehaving engine might.
struct DanglingKeyHost {
    inner: MemoryHost,
    view: Handle,
}

impl Host for DanglingKeyHost {
    type Handle = Handle;

    fn kind_of(&self, value: Handle) -> HostKind {
        self.inner.kind_of(value)
    }
    fn to_boolean(&self, value: Handle) -> Result<bool, HostError> {
        self.inner.to_boolean(value)
    }
    fn to_number(&self, value: Handle) -> Result<f64, HostError> {
        self.inner.to_number(value)
    }
    fn to_utf8(&self, value: Handle) -> Result<crate::String, HostError> {
        self.inner.to_utf8(value)
    }
    fn array_length(&self, array: Handle) -> Result<u32, HostError> {
        self.inner.array_length(array)
    }
    fn array_get(&self, array: Handle, index: u32) -> Result<Handle, HostError> {
        self.inner.array_get(array, index)
    }
    fn set_as_array(&mut self, set: Handle) -> Result<Handle, HostError> {
        self.inner.set_as_array(set)
    }
    fn map_as_array(&mut self, _map: Handle) -> Result<Handle, HostError> {
        Ok(self.view)
    }
    fn own_property_names(&mut self, object: Handle) -> Result<Handle, HostError> {
        self.inner.own_property_names(object)
    }
    fn get_property(&self, object: Handle, key: Handle) -> Result<Handle, HostError> {
        self.inner.get_property(object, key)
    }
    fn new_undefined(&mut self) -> Result<Handle, HostError> {
        self.inner.new_undefined()
    }
    fn new_null(&mut self) -> Result<Handle, HostError> {
        self.inner.new_null()
    }
    fn new_boolean(&mut self, value: bool) -> Result<Handle, HostError> {
        self.inner.new_boolean(value)
    }
    fn new_number(&mut self, value: f64) -> Result<Handle, HostError> {
        self.inner.new_number(value)
    }
    fn new_string(&mut self, bytes: &[u8]) -> Result<Handle, HostError> {
        self.inner.new_string(bytes)
    }
    fn new_array(&mut self, length: u32) -> Result<Handle, HostError> {
        self.inner.new_array(length)
    }
    fn array_set(&mut self, array: Handle, index: u32, value: Handle) -> Result<(), HostError> {
        self.inner.array_set(array, index, value)
    }
    fn new_set(&mut self) -> Result<Handle, HostError> {
        self.inner.new_set()
    }
    fn set_add(&mut self, set: Handle, value: Handle) -> Result<(), HostError> {
        self.inner.set_add(set, value)
    }
    fn new_map(&mut self) -> Result<Handle, HostError> {
        self.inner.new_map()
    }
    fn map_set(&mut self, map: Handle, key: Handle, value: Handle) -> Result<(), HostError> {
        self.inner.map_set(map, key, value)
    }
    fn new_object(&mut self) -> Result<Handle, HostError> {
        self.inner.new_object()
    }
    fn object_set(&mut self, object: Handle, key: Handle, value: Handle) -> Result<(), HostError> {
        self.inner.object_set(object, key, value)
    }
}

#[test]
fn odd_length_map_view_is_malformed() {
    let mut inner = MemoryHost::new();
    let key = string(&mut inner, "k");
    let value = number(&mut inner, 1.0);
    let map = inner.insert(Node::Map(vec![(key, value)]));
    let view = inner.insert(Node::Array(vec![key, value, key]));
    let mut host = DanglingKeyHost { inner, view };

    assert!(matches!(
        import(&mut host, map),
        Err(ConversionError::HostConversionFailure(HostError::Malformed(_)))
    ));
}
