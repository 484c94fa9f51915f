#![allow(unsafe_code)]

//! C ABI over [`RawValue`].
//!
//! Every `jsb_new_*` result owns its tree and must be released with
//! [`jsb_delete_value`]. Invalid input (a negative length, a non-positive
//! container size, a null pointer) yields an undefined record. Accessors used
//! against the wrong kind return a neutral value (`false`, `NaN`, `0`, or an
//! empty view).

use core::{ffi::c_char, ptr};

use crate::raw::{RawArray, RawPairs, RawString, RawValue};
use crate::{Kind, Number, Specifier, Value};

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_undefined() -> RawValue {
    RawValue::UNDEFINED
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_boolean(value: bool) -> RawValue {
    Value::boolean(value).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_null() -> RawValue {
    Value::null().into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_number(value: f64) -> RawValue {
    Value::number(value).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_integer(value: i64) -> RawValue {
    Value::integer(value).into_raw()
}

/// Copies `length` bytes starting at `value`.
///
/// # Safety
///
/// `value` must be null or point to at least `length` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jsb_new_string(value: *const c_char, length: i32) -> RawValue {
    if value.is_null() || length < 0 {
        return RawValue::UNDEFINED;
    }
    // SAFETY: guaranteed by the caller.
    let bytes = unsafe { core::slice::from_raw_parts(value.cast::<u8>(), length as usize) };
    Value::from_bytes(bytes, length).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_array(size: i32) -> RawValue {
    Value::array(size).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_set(size: i32) -> RawValue {
    Value::set(size).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_map(size: i32) -> RawValue {
    Value::map(size).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_new_object(size: i32) -> RawValue {
    Value::object(size).into_raw()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_get_value_type(value: RawValue) -> i32 {
    value.kind as i32
}

fn has_kind(value: &RawValue, kind: Kind) -> bool {
    value.kind == kind.tag()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_undefined(value: RawValue) -> bool {
    has_kind(&value, Kind::Undefined)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_boolean(value: RawValue) -> bool {
    has_kind(&value, Kind::Boolean)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_null(value: RawValue) -> bool {
    has_kind(&value, Kind::Null)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_number(value: RawValue) -> bool {
    has_kind(&value, Kind::Number)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_double(value: RawValue) -> bool {
    has_kind(&value, Kind::Number) && value.specifier == Specifier::Float64.tag()
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_integer(value: RawValue) -> bool {
    value.number().is_some_and(Number::is_integer)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_string(value: RawValue) -> bool {
    has_kind(&value, Kind::String)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_object(value: RawValue) -> bool {
    has_kind(&value, Kind::Object)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_array(value: RawValue) -> bool {
    has_kind(&value, Kind::Array)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_set(value: RawValue) -> bool {
    has_kind(&value, Kind::Set)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_is_map(value: RawValue) -> bool {
    has_kind(&value, Kind::Map)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_bool(value: RawValue) -> bool {
    value.boolean().unwrap_or(false)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_double(value: RawValue) -> f64 {
    value.number().map_or(f64::NAN, Number::to_double)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_int64(value: RawValue) -> i64 {
    value.number().map_or(0, Number::to_int64)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_int32(value: RawValue) -> i32 {
    value.number().map_or(0, Number::to_int32)
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_uint32(value: RawValue) -> u32 {
    value.number().map_or(0, Number::to_uint32)
}

/// Borrows string content. Inline content points into `*value`, so the view
/// is only valid while that record stays in place.
///
/// # Safety
///
/// `value` must be null or point to a live record.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jsb_to_string(value: *const RawValue) -> RawString {
    const EMPTY: RawString = RawString {
        size: 0,
        data: ptr::null(),
    };

    // SAFETY: guaranteed by the caller.
    let Some(value) = (unsafe { value.as_ref() }) else {
        return EMPTY;
    };
    match value.string_data() {
        Some(data) => RawString {
            size: value.size,
            data,
        },
        None => EMPTY,
    }
}

const EMPTY_ARRAY: RawArray = RawArray {
    size: 0,
    data: ptr::null_mut(),
};

const EMPTY_PAIRS: RawPairs = RawPairs {
    size: 0,
    data: ptr::null_mut(),
};

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_array(value: RawValue) -> RawArray {
    match value.elements() {
        Some(view) if has_kind(&value, Kind::Array) => view,
        _ => EMPTY_ARRAY,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_set(value: RawValue) -> RawArray {
    match value.elements() {
        Some(view) if has_kind(&value, Kind::Set) => view,
        _ => EMPTY_ARRAY,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_map(value: RawValue) -> RawPairs {
    match value.pairs() {
        Some(view) if has_kind(&value, Kind::Map) => view,
        _ => EMPTY_PAIRS,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jsb_to_object(value: RawValue) -> RawPairs {
    match value.pairs() {
        Some(view) if has_kind(&value, Kind::Object) => view,
        _ => EMPTY_PAIRS,
    }
}

/// Releases the tree owned by `*value` and resets it to undefined.
///
/// # Safety
///
/// `value` must be null or point to a record produced by this library that
/// has not been released through another copy.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn jsb_delete_value(value: *mut RawValue) {
    // SAFETY: guaranteed by the caller.
    if let Some(value) = unsafe { value.as_mut() } {
        unsafe { value.destroy() };
    }
}
