//! Owning wrapper for foreign handles with RAII release.

use crate::ffi::{Api, RawHandle, consts};

/// Owns exactly one foreign handle and releases it exactly once.
///
/// Release happens on drop or through [`OwnedHandle::release`]; both paths
/// go through the same idempotence guard, so a handle is never forwarded to
/// `Vix_ReleaseHandle` twice. The invalid handle is never released at all.
pub(crate) struct OwnedHandle {
    api: Api,
    raw: RawHandle,
    released: bool,
}

impl std::fmt::Debug for OwnedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("raw", &self.raw)
            .field("released", &self.released)
            .finish()
    }
}

impl OwnedHandle {
    pub(crate) fn new(api: Api, raw: RawHandle) -> Self {
        Self {
            api,
            raw,
            released: false,
        }
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.raw
    }

    /// Release the handle now. Safe to call more than once.
    pub(crate) fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if self.raw != consts::VIX_INVALID_HANDLE {
            self.api.release_handle(self.raw);
        }
    }

    /// Take the raw handle out without releasing it. Used when ownership
    /// moves to an object with a different release primitive (the host
    /// connection, which is torn down via `VixHost_Disconnect`).
    pub(crate) fn into_raw(mut self) -> RawHandle {
        self.released = true;
        self.raw
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        self.release();
    }
}
