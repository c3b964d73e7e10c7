//! The job completion protocol.
//!
//! Every mutating or querying foreign call hands back an asynchronous job
//! handle. [`wait`] blocks until the job reaches a terminal state, classifies
//! the outcome, extracts the requested result properties through the codec,
//! and releases the job handle on every exit path: the job is wrapped in an
//! [`OwnedHandle`] before anything else happens, so the release survives
//! wait failures, decode failures and early returns alike.

use crate::error::{Result, check};
use crate::ffi::{Api, PropertyId, RawHandle};
use crate::handle::OwnedHandle;
use crate::property::{PropertyBag, get_nth_property, get_property};

/// What a caller expects out of a completed job.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WaitRequest<'a> {
    /// Fetch the distinguished result-handle property inline in the wait
    /// call itself (connect, open, create-snapshot, clone).
    pub result_handle: bool,
    /// Properties to decode off the job once it has completed.
    pub properties: &'a [PropertyId],
    /// Interpret the job as an N-indexed result list; the first entry of
    /// `properties` doubles as the count query.
    pub list: bool,
}

impl WaitRequest<'static> {
    /// Wait for completion only.
    pub(crate) const NONE: WaitRequest<'static> = WaitRequest {
        result_handle: false,
        properties: &[],
        list: false,
    };

    /// Wait and take ownership of the result handle.
    pub(crate) const RESULT_HANDLE: WaitRequest<'static> = WaitRequest {
        result_handle: true,
        properties: &[],
        list: false,
    };
}

impl<'a> WaitRequest<'a> {
    /// Wait and decode one record of named properties.
    pub(crate) fn properties(properties: &'a [PropertyId]) -> Self {
        WaitRequest {
            result_handle: false,
            properties,
            list: false,
        }
    }

    /// Wait and decode the full indexed result list.
    pub(crate) fn list(properties: &'a [PropertyId]) -> Self {
        WaitRequest {
            result_handle: false,
            properties,
            list: true,
        }
    }
}

/// Outcome of a completed job.
#[derive(Debug)]
pub(crate) enum JobResult {
    Completed,
    Handle(OwnedHandle),
    Record(PropertyBag),
    Records(Vec<PropertyBag>),
}

impl JobResult {
    pub(crate) fn into_handle(self) -> OwnedHandle {
        match self {
            JobResult::Handle(handle) => handle,
            _ => unreachable!("job was waited with a result-handle request"),
        }
    }

    pub(crate) fn into_record(self) -> PropertyBag {
        match self {
            JobResult::Record(bag) => bag,
            _ => unreachable!("job was waited with a property request"),
        }
    }

    pub(crate) fn into_records(self) -> Vec<PropertyBag> {
        match self {
            JobResult::Records(records) => records,
            _ => unreachable!("job was waited with a list request"),
        }
    }
}

/// Block until `job` completes and extract the requested results.
///
/// If properties were requested they take precedence over the raw result
/// handle; a result handle that was produced anyway is still wrapped, so it
/// is released rather than leaked.
pub(crate) fn wait(api: &Api, job: RawHandle, request: WaitRequest<'_>) -> Result<JobResult> {
    let job = OwnedHandle::new(api.clone(), job);

    let (err, raw_result) = if request.result_handle {
        api.job_wait_result_handle(job.raw())
    } else {
        (api.job_wait(job.raw()), crate::ffi::consts::VIX_INVALID_HANDLE)
    };
    check(api.as_ref(), err)?;

    let result_handle = request
        .result_handle
        .then(|| OwnedHandle::new(api.clone(), raw_result));

    if !request.properties.is_empty() {
        if request.list {
            let count = api.num_properties(job.raw(), request.properties[0]);
            tracing::trace!(count, "decoding indexed job results");
            let mut records = Vec::with_capacity(count.max(0) as usize);
            for index in 0..count {
                let mut record = PropertyBag::new();
                for &property in request.properties {
                    record.insert(
                        property,
                        get_nth_property(api.as_ref(), job.raw(), index, property)?,
                    );
                }
                records.push(record);
            }
            return Ok(JobResult::Records(records));
        }

        let mut record = PropertyBag::new();
        for &property in request.properties {
            record.insert(property, get_property(api.as_ref(), job.raw(), property)?);
        }
        return Ok(JobResult::Record(record));
    }

    match result_handle {
        Some(handle) => Ok(JobResult::Handle(handle)),
        None => Ok(JobResult::Completed),
    }
}
