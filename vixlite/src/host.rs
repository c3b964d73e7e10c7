//! Host connection facade.

use std::ffi::CString;

use crate::error::{Result, check};
use crate::ffi::libvix::VixLib;
use crate::ffi::{Api, RawHandle, consts};
use crate::job::{self, WaitRequest};
use crate::property::{expect_int, get_property};
use crate::types::ServiceProvider;
use crate::vm::Vm;

/// A connection to a hypervisor host.
///
/// The connection handle is torn down through `VixHost_Disconnect` exactly
/// once, either by [`Host::disconnect`] or on drop. VMs are opened on
/// demand and never cached by the host object.
pub struct Host {
    api: Api,
    handle: RawHandle,
    connected: bool,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("handle", &self.handle)
            .field("connected", &self.connected)
            .finish()
    }
}

impl Host {
    /// Connect to the local hypervisor.
    ///
    /// Loads the VIX library on first use.
    pub fn connect(provider: ServiceProvider) -> Result<Host> {
        Self::connect_with(VixLib::global()?, provider)
    }

    pub(crate) fn connect_with(api: Api, provider: ServiceProvider) -> Result<Host> {
        tracing::debug!(?provider, "connecting to host");
        let job = api.connect(provider.as_raw());
        let handle = job::wait(&api, job, WaitRequest::RESULT_HANDLE)?.into_handle();
        Ok(Host {
            handle: handle.into_raw(),
            api,
            connected: true,
        })
    }

    /// Open the virtual machine at `vmx_path`.
    pub fn open(&self, vmx_path: &str) -> Result<Vm> {
        tracing::debug!(vmx_path, "opening VM");
        let path = CString::new(vmx_path)?;
        let job = self.api.open_vm(self.handle, &path);
        let handle = job::wait(&self.api, job, WaitRequest::RESULT_HANDLE)?.into_handle();
        Ok(Vm::new(self.api.clone(), handle))
    }

    /// Locations (vmx paths or URLs) of the VMs currently running on this
    /// host.
    pub fn running_vms(&self) -> Result<Vec<String>> {
        let (err, locations) = self.api.find_running_vms(self.handle);
        check(self.api.as_ref(), err)?;
        Ok(locations)
    }

    /// The API version the host speaks.
    pub fn api_version(&self) -> Result<i32> {
        let property = consts::VIX_PROPERTY_HOST_API_VERSION;
        expect_int(get_property(self.api.as_ref(), self.handle, property)?, property)
    }

    /// Add a VM to the host's inventory. Server-class hosts only.
    pub fn register_vm(&self, vmx_path: &str) -> Result<()> {
        let path = CString::new(vmx_path)?;
        let job = self.api.register_vm(self.handle, &path);
        job::wait(&self.api, job, WaitRequest::NONE)?;
        Ok(())
    }

    /// Remove a VM from the host's inventory. Server-class hosts only.
    pub fn unregister_vm(&self, vmx_path: &str) -> Result<()> {
        let path = CString::new(vmx_path)?;
        let job = self.api.unregister_vm(self.handle, &path);
        job::wait(&self.api, job, WaitRequest::NONE)?;
        Ok(())
    }

    /// Disconnect now. Also happens automatically on drop.
    pub fn disconnect(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.connected {
            self.connected = false;
            tracing::debug!("disconnecting from host");
            self.api.disconnect(self.handle);
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::ffi::fake::{FakeJob, FakeVix};
    use crate::property::PropertyValue;
    use std::sync::Arc;

    fn connect(fake: &Arc<FakeVix>) -> Host {
        Host::connect_with(fake.clone(), ServiceProvider::Workstation).unwrap()
    }

    #[test]
    fn connect_yields_a_host_and_releases_the_job() {
        let fake = Arc::new(FakeVix::new());
        let host = connect(&fake);
        assert!(host.api_version().is_err()); // no property scripted
        fake.assert_all_jobs_released();
    }

    #[test]
    fn refused_connection_reports_code_36_and_builds_no_host() {
        let fake = Arc::new(FakeVix::new());
        fake.script("connect", FakeJob::fail(36));

        let err = Host::connect_with(fake.clone(), ServiceProvider::Workstation).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::HostConnectionLost));
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().len() > "(code 36)".len());
        assert_eq!(fake.disconnect_count(), 0);
        fake.assert_all_jobs_released();
    }

    #[test]
    fn open_wraps_a_new_vm_handle() {
        let fake = Arc::new(FakeVix::new());
        let host = connect(&fake);
        let vm = host.open("/vms/demo/demo.vmx").unwrap();
        assert_ne!(vm.raw_handle(), consts::VIX_INVALID_HANDLE);
        fake.assert_all_jobs_released();
    }

    #[test]
    fn host_disconnects_exactly_once() {
        let fake = Arc::new(FakeVix::new());
        let host = connect(&fake);
        host.disconnect();
        assert_eq!(fake.disconnect_count(), 1);

        let host = connect(&fake);
        drop(host);
        assert_eq!(fake.disconnect_count(), 2);
    }

    #[test]
    fn running_vms_collects_locations() {
        let fake = Arc::new(FakeVix::new());
        fake.set_running_vms(vec!["/vms/a.vmx".into(), "/vms/b.vmx".into()]);
        let host = connect(&fake);
        assert_eq!(host.running_vms().unwrap(), ["/vms/a.vmx", "/vms/b.vmx"]);
    }

    #[test]
    fn api_version_reads_the_host_property() {
        let fake = Arc::new(FakeVix::new());
        let host = connect(&fake);
        fake.set_property(
            host.handle,
            consts::VIX_PROPERTY_HOST_API_VERSION,
            PropertyValue::Int(13),
        );
        assert_eq!(host.api_version().unwrap(), 13);
    }

    #[test]
    fn interior_nul_in_path_is_rejected_before_the_foreign_call() {
        let fake = Arc::new(FakeVix::new());
        let host = connect(&fake);
        assert!(host.open("bad\0path").is_err());
    }
}
