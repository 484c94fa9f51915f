//! Release accounting: every allocation made while building a value tree is
//! returned when the tree is destroyed.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use jsbridge_values::{Pair, Value, raw::RawValue};

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

/// Allocations made and not yet freed by `f` on the current thread.
fn leaked_by(f: impl FnOnce()) -> isize {
    let before = LIVE.with(Cell::get);
    f();
    LIVE.with(Cell::get) - before
}

fn long(i: usize) -> Value {
    Value::string(&format!("heap allocated string #{i}"))
}

#[test]
fn scalars_and_short_strings_do_not_allocate() {
    let leaked = leaked_by(|| {
        let mut v = Value::string("short");
        v.destroy();
        let mut n = Value::integer(1 << 40);
        n.destroy();
    });
    assert_eq!(leaked, 0);
}

#[test]
fn array_of_heap_strings_is_fully_released() {
    let leaked = leaked_by(|| {
        let mut v = Value::array(16);
        for (i, slot) in v.to_array_mut().unwrap().iter_mut().enumerate() {
            *slot = long(i);
        }
        v.destroy();
        assert!(v.is_undefined());
    });
    assert_eq!(leaked, 0);
}

#[test]
fn nested_tree_is_fully_released() {
    let leaked = leaked_by(|| {
        let mut inner = Value::set(2);
        inner.to_set_mut().unwrap()[0] = long(0);
        inner.to_set_mut().unwrap()[1] = Value::string("s");

        let mut map = Value::map(2);
        map.to_map_mut().unwrap()[0] = Pair::new(long(1), inner);
        map.to_map_mut().unwrap()[1] = Pair::new(Value::null(), long(2));

        let mut root = Value::object(1);
        root.to_object_mut().unwrap()[0] = Pair::new(Value::string("m"), map);
        root.destroy();
    });
    assert_eq!(leaked, 0);
}

#[test]
fn second_destroy_is_a_no_op() {
    let leaked = leaked_by(|| {
        let mut v = Value::array(1);
        v.to_array_mut().unwrap()[0] = long(0);
        v.destroy();
        v.destroy();
    });
    assert_eq!(leaked, 0);
}

#[test]
fn raw_tree_is_released_by_raw_destroy() {
    let leaked = leaked_by(|| {
        let mut v = Value::array(3);
        for (i, slot) in v.to_array_mut().unwrap().iter_mut().enumerate() {
            *slot = long(i);
        }
        let mut raw = v.into_raw();
        unsafe { raw.destroy() };
        assert_eq!(raw.kind, 0);
        unsafe { raw.destroy() };
    });
    assert_eq!(leaked, 0);
}

#[test]
fn raw_tree_is_released_by_delete_value() {
    let leaked = leaked_by(|| {
        let mut v = Value::object(2);
        v.to_object_mut().unwrap()[0] = Pair::new(long(0), long(1));
        let mut raw: RawValue = v.into_raw();
        unsafe { jsbridge_values::ffi::jsb_delete_value(&mut raw) };
        assert!(jsbridge_values::ffi::jsb_is_undefined(raw));
    });
    assert_eq!(leaked, 0);
}
