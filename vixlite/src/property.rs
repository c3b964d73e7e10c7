//! The property codec.
//!
//! VIX properties are dynamically typed: the type of a (handle, property)
//! pair is only known after asking the foreign layer, and the same ID could
//! in principle report different types on different objects. The codec
//! therefore queries the type tag first and dispatches on it, instead of
//! keeping any per-ID compile-time table.
//!
//! Foreign-owned string and blob buffers are copied into binding-owned
//! values and freed immediately; a missed free here would leak native
//! memory on every property fetch.

use std::collections::BTreeMap;
use std::ffi::CStr;

use crate::error::{Error, Result, check};
use crate::ffi::{PropertyId, RawHandle, VixApi, consts};

/// A decoded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Int64(i64),
    Str(String),
    Bool(bool),
    /// A sub-handle. Ownership of the referenced object passes to the
    /// caller, who must wrap it into an owning object.
    Handle(RawHandle),
    Blob(Vec<u8>),
}

impl PropertyValue {
    fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Int(_) => "an integer",
            PropertyValue::Int64(_) => "a 64-bit integer",
            PropertyValue::Str(_) => "a string",
            PropertyValue::Bool(_) => "a boolean",
            PropertyValue::Handle(_) => "a handle",
            PropertyValue::Blob(_) => "a blob",
        }
    }
}

/// Fetch and decode a named property of any handle-bearing object.
pub(crate) fn get_property(
    api: &dyn VixApi,
    handle: RawHandle,
    property: PropertyId,
) -> Result<PropertyValue> {
    decode(api, handle, property, None)
}

/// Fetch and decode one property of the N-th result record of a job.
pub(crate) fn get_nth_property(
    api: &dyn VixApi,
    job: RawHandle,
    index: i32,
    property: PropertyId,
) -> Result<PropertyValue> {
    decode(api, job, property, Some(index))
}

fn decode(
    api: &dyn VixApi,
    handle: RawHandle,
    property: PropertyId,
    index: Option<i32>,
) -> Result<PropertyValue> {
    let (err, tag) = api.property_type(handle, property);
    check(api, err)?;

    match tag {
        consts::VIX_PROPERTYTYPE_INTEGER => {
            let (err, value) = match index {
                Some(i) => api.nth_property_int(handle, i, property),
                None => api.property_int(handle, property),
            };
            check(api, err)?;
            Ok(PropertyValue::Int(value))
        }
        consts::VIX_PROPERTYTYPE_INT64 => {
            let (err, value) = match index {
                Some(i) => api.nth_property_int64(handle, i, property),
                None => api.property_int64(handle, property),
            };
            check(api, err)?;
            Ok(PropertyValue::Int64(value))
        }
        consts::VIX_PROPERTYTYPE_BOOL => {
            let (err, value) = match index {
                Some(i) => api.nth_property_bool(handle, i, property),
                None => api.property_bool(handle, property),
            };
            check(api, err)?;
            Ok(PropertyValue::Bool(value != 0))
        }
        consts::VIX_PROPERTYTYPE_HANDLE => {
            let (err, value) = match index {
                Some(i) => api.nth_property_handle(handle, i, property),
                None => api.property_handle(handle, property),
            };
            check(api, err)?;
            Ok(PropertyValue::Handle(value))
        }
        consts::VIX_PROPERTYTYPE_STRING => {
            let (err, buffer) = match index {
                Some(i) => api.nth_property_string(handle, i, property),
                None => api.property_string(handle, property),
            };
            check(api, err)?;
            let value = if buffer.is_null() {
                String::new()
            } else {
                let copied = unsafe { CStr::from_ptr(buffer) }
                    .to_string_lossy()
                    .into_owned();
                api.free_buffer(buffer);
                copied
            };
            Ok(PropertyValue::Str(value))
        }
        consts::VIX_PROPERTYTYPE_BLOB => {
            let (err, len, buffer) = match index {
                Some(i) => api.nth_property_blob(handle, i, property),
                None => api.property_blob(handle, property),
            };
            check(api, err)?;
            let value = if buffer.is_null() || len <= 0 {
                Vec::new()
            } else {
                let copied =
                    unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), len as usize) }
                        .to_vec();
                api.free_buffer(buffer);
                copied
            };
            Ok(PropertyValue::Blob(value))
        }
        other => Err(Error::UnsupportedPropertyType {
            property,
            tag: other,
        }),
    }
}

/// The decoded result properties of one job (or one indexed job record),
/// keyed by property ID.
#[derive(Debug, Default)]
pub(crate) struct PropertyBag(BTreeMap<PropertyId, PropertyValue>);

impl PropertyBag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, property: PropertyId, value: PropertyValue) {
        self.0.insert(property, value);
    }

    pub(crate) fn get(&self, property: PropertyId) -> Option<&PropertyValue> {
        self.0.get(&property)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    fn require(&self, property: PropertyId) -> Result<&PropertyValue> {
        self.get(property).ok_or(Error::MissingJobResult(property))
    }

    pub(crate) fn int(&self, property: PropertyId) -> Result<i32> {
        match self.require(property)? {
            PropertyValue::Int(value) => Ok(*value),
            other => Err(mismatch(property, "an integer", other)),
        }
    }

    /// A 64-bit result; plain integers widen, since the foreign layer is
    /// free to report either for counter-like properties.
    pub(crate) fn int64(&self, property: PropertyId) -> Result<i64> {
        match self.require(property)? {
            PropertyValue::Int64(value) => Ok(*value),
            PropertyValue::Int(value) => Ok(i64::from(*value)),
            other => Err(mismatch(property, "a 64-bit integer", other)),
        }
    }

    /// Boolean by integer truthiness; both Bool and Integer shapes accepted.
    pub(crate) fn boolean(&self, property: PropertyId) -> Result<bool> {
        match self.require(property)? {
            PropertyValue::Bool(value) => Ok(*value),
            PropertyValue::Int(value) => Ok(*value != 0),
            other => Err(mismatch(property, "a boolean", other)),
        }
    }

    pub(crate) fn string(&self, property: PropertyId) -> Result<String> {
        match self.require(property)? {
            PropertyValue::Str(value) => Ok(value.clone()),
            other => Err(mismatch(property, "a string", other)),
        }
    }

    pub(crate) fn blob(&self, property: PropertyId) -> Result<Vec<u8>> {
        match self.require(property)? {
            PropertyValue::Blob(value) => Ok(value.clone()),
            other => Err(mismatch(property, "a blob", other)),
        }
    }
}

/// Coercions for values fetched outside a job record (direct object
/// properties). Same shape rules as the [`PropertyBag`] accessors.
pub(crate) fn expect_int(value: PropertyValue, property: PropertyId) -> Result<i32> {
    match value {
        PropertyValue::Int(value) => Ok(value),
        other => Err(mismatch(property, "an integer", &other)),
    }
}

pub(crate) fn expect_bool(value: PropertyValue, property: PropertyId) -> Result<bool> {
    match value {
        PropertyValue::Bool(value) => Ok(value),
        PropertyValue::Int(value) => Ok(value != 0),
        other => Err(mismatch(property, "a boolean", &other)),
    }
}

pub(crate) fn expect_string(value: PropertyValue, property: PropertyId) -> Result<String> {
    match value {
        PropertyValue::Str(value) => Ok(value),
        other => Err(mismatch(property, "a string", &other)),
    }
}

fn mismatch(property: PropertyId, expected: &'static str, got: &PropertyValue) -> Error {
    tracing::debug!(property, got = got.kind(), "job result property shape mismatch");
    Error::UnexpectedResultType { property, expected }
}
