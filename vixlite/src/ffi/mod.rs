//! Foreign surface of the VIX library.
//!
//! [`VixApi`] is the seam between the binding and the native library: one
//! method per consumed foreign primitive, with the variadic C entry points
//! (`VixJob_Wait`, `Vix_GetProperties`, `VixJob_GetNthProperties`) split
//! into the fixed call shapes the binding actually uses. The production
//! implementation is [`libvix::VixLib`], a table of `dlsym`-resolved entry
//! points loaded once per process; tests drive the same trait through a
//! scripted fake.

pub(crate) mod consts;
#[cfg(test)]
pub(crate) mod fake;
pub(crate) mod libvix;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Arc;

/// Opaque foreign handle value. `0` is the invalid handle.
pub(crate) type RawHandle = i32;

/// Numeric property identifier.
pub(crate) type PropertyId = i32;

/// Packed 64-bit foreign error value (low 16 bits carry the code).
pub(crate) type RawError = u64;

/// Shared reference to the foreign entry-point table.
pub(crate) type Api = Arc<dyn VixApi>;

/// The foreign entry points this binding consumes.
///
/// Methods that start an asynchronous operation return the raw job handle;
/// the caller is responsible for driving it through the job completion
/// protocol, which also releases it. Property reads return the raw error
/// alongside the undecoded value; string and blob reads hand back
/// foreign-owned buffers that the caller must pass to [`VixApi::free_buffer`]
/// after copying.
pub(crate) trait VixApi: Send + Sync {
    // Handle and buffer management.
    fn release_handle(&self, handle: RawHandle);
    fn free_buffer(&self, buffer: *mut c_char);
    fn error_text(&self, code: u64) -> String;

    // Property plumbing (named properties on any handle-bearing object).
    fn property_type(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32);
    fn property_int(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32);
    fn property_int64(&self, handle: RawHandle, property: PropertyId) -> (RawError, i64);
    fn property_bool(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32);
    fn property_handle(&self, handle: RawHandle, property: PropertyId) -> (RawError, RawHandle);
    fn property_string(&self, handle: RawHandle, property: PropertyId) -> (RawError, *mut c_char);
    fn property_blob(&self, handle: RawHandle, property: PropertyId)
    -> (RawError, i32, *mut c_char);

    // N-indexed job results.
    fn num_properties(&self, job: RawHandle, property: PropertyId) -> i32;
    fn nth_property_int(&self, job: RawHandle, index: i32, property: PropertyId)
    -> (RawError, i32);
    fn nth_property_int64(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i64);
    fn nth_property_bool(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32);
    fn nth_property_handle(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, RawHandle);
    fn nth_property_string(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, *mut c_char);
    fn nth_property_blob(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32, *mut c_char);

    // Job completion.
    fn job_wait(&self, job: RawHandle) -> RawError;
    /// Wait and fetch the distinguished result-handle property inline.
    fn job_wait_result_handle(&self, job: RawHandle) -> (RawError, RawHandle);

    // Host connection.
    fn connect(&self, provider: i32) -> RawHandle;
    fn disconnect(&self, host: RawHandle);
    fn open_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle;
    /// Runs the find-items event loop to completion, collecting the
    /// locations of running VMs. Owns its job internally.
    fn find_running_vms(&self, host: RawHandle) -> (RawError, Vec<String>);
    fn register_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle;
    fn unregister_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle;

    // VM power and lifecycle.
    fn power_on(&self, vm: RawHandle, options: i32) -> RawHandle;
    fn power_off(&self, vm: RawHandle, options: i32) -> RawHandle;
    fn reset(&self, vm: RawHandle, options: i32) -> RawHandle;
    fn suspend(&self, vm: RawHandle) -> RawHandle;
    fn pause(&self, vm: RawHandle) -> RawHandle;
    fn unpause(&self, vm: RawHandle) -> RawHandle;
    fn delete_vm(&self, vm: RawHandle, options: i32) -> RawHandle;
    fn clone_vm(
        &self,
        vm: RawHandle,
        snapshot: RawHandle,
        clone_type: i32,
        dest_path: &CStr,
    ) -> RawHandle;
    fn upgrade_virtual_hardware(&self, vm: RawHandle) -> RawHandle;
    fn install_tools(&self, vm: RawHandle, options: i32) -> RawHandle;
    fn wait_for_tools(&self, vm: RawHandle, timeout_secs: i32) -> RawHandle;
    fn capture_screen_image(&self, vm: RawHandle) -> RawHandle;

    // Guest session and processes.
    fn login(&self, vm: RawHandle, user: &CStr, password: &CStr, options: i32) -> RawHandle;
    fn logout(&self, vm: RawHandle) -> RawHandle;
    fn run_program(
        &self,
        vm: RawHandle,
        program: &CStr,
        arguments: &CStr,
        options: i32,
    ) -> RawHandle;
    fn run_script(
        &self,
        vm: RawHandle,
        interpreter: &CStr,
        script: &CStr,
        options: i32,
    ) -> RawHandle;
    fn list_processes(&self, vm: RawHandle) -> RawHandle;
    fn kill_process(&self, vm: RawHandle, pid: u64) -> RawHandle;

    // Guest filesystem.
    fn copy_file_to_guest(&self, vm: RawHandle, host_path: &CStr, guest_path: &CStr) -> RawHandle;
    fn copy_file_from_guest(&self, vm: RawHandle, guest_path: &CStr, host_path: &CStr)
    -> RawHandle;
    fn delete_file(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn file_exists(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn rename_file(&self, vm: RawHandle, old_path: &CStr, new_path: &CStr) -> RawHandle;
    fn create_temp_file(&self, vm: RawHandle) -> RawHandle;
    fn file_info(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn list_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn create_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn delete_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle;
    fn directory_exists(&self, vm: RawHandle, path: &CStr) -> RawHandle;

    // Guest variables.
    fn read_variable(&self, vm: RawHandle, scope: i32, name: &CStr) -> RawHandle;
    fn write_variable(&self, vm: RawHandle, scope: i32, name: &CStr, value: &CStr) -> RawHandle;

    // Shared folders.
    fn enable_shared_folders(&self, vm: RawHandle, enabled: bool) -> RawHandle;
    fn shared_folder_count(&self, vm: RawHandle) -> RawHandle;
    fn shared_folder_state(&self, vm: RawHandle, index: i32) -> RawHandle;
    fn set_shared_folder_state(
        &self,
        vm: RawHandle,
        name: &CStr,
        host_path: &CStr,
        flags: i32,
    ) -> RawHandle;
    fn add_shared_folder(
        &self,
        vm: RawHandle,
        name: &CStr,
        host_path: &CStr,
        flags: i32,
    ) -> RawHandle;
    fn remove_shared_folder(&self, vm: RawHandle, name: &CStr) -> RawHandle;

    // Snapshots (job-based).
    fn create_snapshot(
        &self,
        vm: RawHandle,
        name: &CStr,
        description: &CStr,
        options: i32,
    ) -> RawHandle;
    fn remove_snapshot(&self, vm: RawHandle, snapshot: RawHandle, options: i32) -> RawHandle;
    fn revert_to_snapshot(&self, vm: RawHandle, snapshot: RawHandle, options: i32) -> RawHandle;

    // Snapshot tree navigation (synchronous foreign calls, no job).
    fn num_root_snapshots(&self, vm: RawHandle) -> (RawError, i32);
    fn root_snapshot(&self, vm: RawHandle, index: i32) -> (RawError, RawHandle);
    fn current_snapshot(&self, vm: RawHandle) -> (RawError, RawHandle);
    fn named_snapshot(&self, vm: RawHandle, name: &CStr) -> (RawError, RawHandle);
    fn snapshot_num_children(&self, snapshot: RawHandle) -> (RawError, i32);
    fn snapshot_child(&self, snapshot: RawHandle, index: i32) -> (RawError, RawHandle);
    fn snapshot_parent(&self, snapshot: RawHandle) -> (RawError, RawHandle);
}
