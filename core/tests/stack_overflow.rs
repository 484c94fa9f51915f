use jsbridge_core::api::{ConversionError, MarshalOptions};
use jsbridge_core::codec::{export_with, import_with};
use jsbridge_core::memory::{Handle, MemoryHost, Node};
use jsbridge_core::values::Value;

/// `levels` arrays nested inside each other around a `null`.
fn nested_host_arrays(host: &mut MemoryHost, levels: usize) -> Handle {
    let mut handle = host.insert(Node::Null);
    for _ in 0..levels {
        handle = host.insert(Node::Array(vec![handle]));
    }
    handle
}

fn nested_values(levels: usize) -> Value {
    let mut value = Value::null();
    for _ in 0..levels {
        let mut array = Value::array(1);
        array.to_array_mut().unwrap()[0] = value;
        value = array;
    }
    value
}

#[test]
fn test_depth_protection_on_import() {
    let mut host = MemoryHost::new();
    let deep = nested_host_arrays(&mut host, 200);

    let options = MarshalOptions { max_depth: 100 };
    assert_eq!(
        import_with(&options, &mut host, deep),
        Err(ConversionError::DepthLimitExceeded { max_depth: 100 })
    );

    let options = MarshalOptions { max_depth: 200 };
    let value = import_with(&options, &mut host, deep).expect("exactly at the limit");
    assert!(value.is_array());
}

#[test]
fn test_depth_protection_on_export() {
    let deep = nested_values(200);
    let mut host = MemoryHost::new();

    let options = MarshalOptions { max_depth: 199 };
    assert_eq!(
        export_with(&options, &mut host, &deep),
        Err(ConversionError::DepthLimitExceeded { max_depth: 199 })
    );
    assert!(export_with(&MarshalOptions::default(), &mut host, &deep).is_ok());
}
