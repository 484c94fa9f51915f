//! A failed import leaves nothing behind: every tagged value built before
//! the failure is released before the error reaches the caller.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use jsbridge_core::api::{ConversionError, HostError};
use jsbridge_core::codec::import;
use jsbridge_core::host::HostKind;
use jsbridge_core::memory::{Handle, MemoryHost, Node};

struct CountingAlloc;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            adjust(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        adjust(-1);
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn long_string(host: &mut MemoryHost, i: usize) -> Handle {
    host.insert(Node::String(format!("element number {i} lives on the heap")))
}

#[test]
fn third_of_five_elements_fails() {
    let mut host = MemoryHost::new();
    let mut elements: Vec<Handle> = (0..5).map(|i| long_string(&mut host, i)).collect();
    elements[2] = host.insert(Node::Failing(HostKind::String, "boom".into()));
    let array = host.insert(Node::Array(elements));

    let before = live();
    let result = import(&mut host, array);
    assert!(matches!(
        result,
        Err(ConversionError::HostConversionFailure(HostError::Exception(_)))
    ));
    drop(result);
    assert_eq!(live() - before, 0);
}

#[test]
fn failure_deep_inside_nested_composites() {
    let mut host = MemoryHost::new();
    let a = long_string(&mut host, 0);
    let b = long_string(&mut host, 1);
    let symbol = host.insert(Node::Opaque(HostKind::Symbol));
    let inner = host.insert(Node::Array(vec![a, b, symbol]));
    let c = long_string(&mut host, 2);
    let map = host.insert(Node::Map(vec![(c, inner)]));
    let outer = host.insert(Node::Array(vec![a, map, b]));

    let before = live();
    let result = import(&mut host, outer);
    assert_eq!(result, Err(ConversionError::UnsupportedKind(HostKind::Symbol)));
    assert_eq!(live() - before, 0);
}

#[test]
fn successful_import_owns_everything_until_dropped() {
    let mut host = MemoryHost::new();
    let elements: Vec<Handle> = (0..5).map(|i| long_string(&mut host, i)).collect();
    let array = host.insert(Node::Array(elements));

    let before = live();
    let mut value = import(&mut host, array).unwrap();
    // One buffer for the array, one per heap string.
    assert_eq!(live() - before, 6);
    value.destroy();
    assert_eq!(live() - before, 0);
}
