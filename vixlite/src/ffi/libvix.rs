//! The process-wide VIX entry-point table.
//!
//! The VIX shared library is loaded with `dlopen` and every consumed symbol
//! is resolved once into a table of typed function pointers. The table is
//! immutable after load and shared behind an `Arc`; no domain object is
//! constructed before it exists. `VIX_LIBRARY_PATH` overrides the per-OS
//! candidate list.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;
use std::sync::{Arc, OnceLock};

use super::consts;
use super::{Api, PropertyId, RawError, RawHandle, VixApi};
use crate::error::{Error, Result, mask};

/// Callback signature of the foreign event procs.
type EventProc = unsafe extern "C" fn(RawHandle, c_int, RawHandle, *mut c_void);
type Callback = Option<EventProc>;

type ReleaseHandleFn = unsafe extern "C" fn(RawHandle);
type FreeBufferFn = unsafe extern "C" fn(*mut c_void);
type GetErrorTextFn = unsafe extern "C" fn(u64, *const c_char) -> *const c_char;
type GetPropertyTypeFn = unsafe extern "C" fn(RawHandle, PropertyId, *mut c_int) -> RawError;
type GetPropertiesFn = unsafe extern "C" fn(RawHandle, PropertyId, ...) -> RawError;
type JobWaitFn = unsafe extern "C" fn(RawHandle, PropertyId, ...) -> RawError;
type JobGetNumPropertiesFn = unsafe extern "C" fn(RawHandle, PropertyId) -> c_int;
type JobGetNthPropertiesFn = unsafe extern "C" fn(RawHandle, c_int, PropertyId, ...) -> RawError;

type HostConnectFn = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_char,
    c_int,
    *const c_char,
    *const c_char,
    c_int,
    RawHandle,
    Callback,
    *mut c_void,
) -> RawHandle;
type HostDisconnectFn = unsafe extern "C" fn(RawHandle);
type HostOpenVmFn =
    unsafe extern "C" fn(RawHandle, *const c_char, c_int, RawHandle, Callback, *mut c_void)
        -> RawHandle;
type HostFindItemsFn =
    unsafe extern "C" fn(RawHandle, c_int, RawHandle, i32, Callback, *mut c_void) -> RawHandle;
type PathJobWithCallbackFn =
    unsafe extern "C" fn(RawHandle, *const c_char, Callback, *mut c_void) -> RawHandle;

type PowerWithPropertyListFn =
    unsafe extern "C" fn(RawHandle, c_int, RawHandle, Callback, *mut c_void) -> RawHandle;
type OptionsJobFn = unsafe extern "C" fn(RawHandle, c_int, Callback, *mut c_void) -> RawHandle;
type PlainJobFn = unsafe extern "C" fn(RawHandle, Callback, *mut c_void) -> RawHandle;

type LoginFn =
    unsafe extern "C" fn(RawHandle, *const c_char, *const c_char, c_int, Callback, *mut c_void)
        -> RawHandle;
type RunProgramFn = unsafe extern "C" fn(
    RawHandle,
    *const c_char,
    *const c_char,
    c_int,
    RawHandle,
    Callback,
    *mut c_void,
) -> RawHandle;
type KillProcessFn = unsafe extern "C" fn(RawHandle, u64, c_int, Callback, *mut c_void) -> RawHandle;
type TwoPathsJobFn = unsafe extern "C" fn(
    RawHandle,
    *const c_char,
    *const c_char,
    c_int,
    RawHandle,
    Callback,
    *mut c_void,
) -> RawHandle;
type OptionsPropertyListJobFn =
    unsafe extern "C" fn(RawHandle, c_int, RawHandle, Callback, *mut c_void) -> RawHandle;
type PathOptionsJobFn =
    unsafe extern "C" fn(RawHandle, *const c_char, c_int, Callback, *mut c_void) -> RawHandle;
type CreateDirectoryFn =
    unsafe extern "C" fn(RawHandle, *const c_char, RawHandle, Callback, *mut c_void) -> RawHandle;
type ReadVariableFn =
    unsafe extern "C" fn(RawHandle, c_int, *const c_char, c_int, Callback, *mut c_void)
        -> RawHandle;
type WriteVariableFn = unsafe extern "C" fn(
    RawHandle,
    c_int,
    *const c_char,
    *const c_char,
    c_int,
    Callback,
    *mut c_void,
) -> RawHandle;
type EnableSharedFoldersFn =
    unsafe extern "C" fn(RawHandle, c_int, c_int, Callback, *mut c_void) -> RawHandle;
type SharedFolderStateFn =
    unsafe extern "C" fn(RawHandle, *const c_char, *const c_char, c_int, Callback, *mut c_void)
        -> RawHandle;
type InstallToolsFn =
    unsafe extern "C" fn(RawHandle, c_int, *const c_char, Callback, *mut c_void) -> RawHandle;
type CloneFn = unsafe extern "C" fn(
    RawHandle,
    RawHandle,
    c_int,
    *const c_char,
    c_int,
    RawHandle,
    Callback,
    *mut c_void,
) -> RawHandle;
type CreateSnapshotFn = unsafe extern "C" fn(
    RawHandle,
    *const c_char,
    *const c_char,
    c_int,
    RawHandle,
    Callback,
    *mut c_void,
) -> RawHandle;
type RemoveSnapshotFn =
    unsafe extern "C" fn(RawHandle, RawHandle, c_int, Callback, *mut c_void) -> RawHandle;
type RevertSnapshotFn =
    unsafe extern "C" fn(RawHandle, RawHandle, c_int, RawHandle, Callback, *mut c_void)
        -> RawHandle;
type CountOutFn = unsafe extern "C" fn(RawHandle, *mut c_int) -> RawError;
type HandleOutFn = unsafe extern "C" fn(RawHandle, *mut RawHandle) -> RawError;
type IndexedHandleOutFn = unsafe extern "C" fn(RawHandle, c_int, *mut RawHandle) -> RawError;
type NamedHandleOutFn =
    unsafe extern "C" fn(RawHandle, *const c_char, *mut RawHandle) -> RawError;

macro_rules! vix_table {
    ($($field:ident: $ty:ty = $symbol:literal,)+) => {
        /// Resolved VIX entry points. One field per consumed symbol.
        pub(crate) struct VixLib {
            $($field: $ty,)+
        }

        impl VixLib {
            #[cfg(unix)]
            fn resolve(handle: *mut c_void) -> std::result::Result<Self, String> {
                unsafe {
                    Ok(Self {
                        $($field: {
                            let sym = libc::dlsym(
                                handle,
                                concat!($symbol, "\0").as_ptr().cast::<c_char>(),
                            );
                            if sym.is_null() {
                                return Err(format!("symbol {} not found", $symbol));
                            }
                            std::mem::transmute::<*mut c_void, $ty>(sym)
                        },)+
                    })
                }
            }
        }
    };
}

vix_table! {
    vix_release_handle: ReleaseHandleFn = "Vix_ReleaseHandle",
    vix_free_buffer: FreeBufferFn = "Vix_FreeBuffer",
    vix_get_error_text: GetErrorTextFn = "Vix_GetErrorText",
    vix_get_property_type: GetPropertyTypeFn = "Vix_GetPropertyType",
    vix_get_properties: GetPropertiesFn = "Vix_GetProperties",
    vix_job_wait: JobWaitFn = "VixJob_Wait",
    vix_job_get_num_properties: JobGetNumPropertiesFn = "VixJob_GetNumProperties",
    vix_job_get_nth_properties: JobGetNthPropertiesFn = "VixJob_GetNthProperties",
    vix_host_connect: HostConnectFn = "VixHost_Connect",
    vix_host_disconnect: HostDisconnectFn = "VixHost_Disconnect",
    vix_host_open_vm: HostOpenVmFn = "VixHost_OpenVM",
    vix_host_find_items: HostFindItemsFn = "VixHost_FindItems",
    vix_host_register_vm: PathJobWithCallbackFn = "VixHost_RegisterVM",
    vix_host_unregister_vm: PathJobWithCallbackFn = "VixHost_UnregisterVM",
    vix_vm_power_on: PowerWithPropertyListFn = "VixVM_PowerOn",
    vix_vm_power_off: OptionsJobFn = "VixVM_PowerOff",
    vix_vm_reset: OptionsJobFn = "VixVM_Reset",
    vix_vm_suspend: OptionsJobFn = "VixVM_Suspend",
    vix_vm_pause: PowerWithPropertyListFn = "VixVM_Pause",
    vix_vm_unpause: PowerWithPropertyListFn = "VixVM_Unpause",
    vix_vm_delete: OptionsJobFn = "VixVM_Delete",
    vix_vm_clone: CloneFn = "VixVM_Clone",
    vix_vm_upgrade_virtual_hardware: OptionsJobFn = "VixVM_UpgradeVirtualHardware",
    vix_vm_install_tools: InstallToolsFn = "VixVM_InstallTools",
    vix_vm_wait_for_tools: OptionsJobFn = "VixVM_WaitForToolsInGuest",
    vix_vm_capture_screen_image: OptionsPropertyListJobFn = "VixVM_CaptureScreenImage",
    vix_vm_login_in_guest: LoginFn = "VixVM_LoginInGuest",
    vix_vm_logout_from_guest: PlainJobFn = "VixVM_LogoutFromGuest",
    vix_vm_run_program: RunProgramFn = "VixVM_RunProgramInGuest",
    vix_vm_run_script: RunProgramFn = "VixVM_RunScriptInGuest",
    vix_vm_list_processes: OptionsJobFn = "VixVM_ListProcessesInGuest",
    vix_vm_kill_process: KillProcessFn = "VixVM_KillProcessInGuest",
    vix_vm_copy_file_to_guest: TwoPathsJobFn = "VixVM_CopyFileFromHostToGuest",
    vix_vm_copy_file_from_guest: TwoPathsJobFn = "VixVM_CopyFileFromGuestToHost",
    vix_vm_delete_file: PathJobWithCallbackFn = "VixVM_DeleteFileInGuest",
    vix_vm_file_exists: PathJobWithCallbackFn = "VixVM_FileExistsInGuest",
    vix_vm_rename_file: TwoPathsJobFn = "VixVM_RenameFileInGuest",
    vix_vm_create_temp_file: OptionsPropertyListJobFn = "VixVM_CreateTempFileInGuest",
    vix_vm_file_info: PathJobWithCallbackFn = "VixVM_GetFileInfoInGuest",
    vix_vm_list_directory: PathOptionsJobFn = "VixVM_ListDirectoryInGuest",
    vix_vm_create_directory: CreateDirectoryFn = "VixVM_CreateDirectoryInGuest",
    vix_vm_delete_directory: PathOptionsJobFn = "VixVM_DeleteDirectoryInGuest",
    vix_vm_directory_exists: PathJobWithCallbackFn = "VixVM_DirectoryExistsInGuest",
    vix_vm_read_variable: ReadVariableFn = "VixVM_ReadVariable",
    vix_vm_write_variable: WriteVariableFn = "VixVM_WriteVariable",
    vix_vm_enable_shared_folders: EnableSharedFoldersFn = "VixVM_EnableSharedFolders",
    vix_vm_get_num_shared_folders: PlainJobFn = "VixVM_GetNumSharedFolders",
    vix_vm_get_shared_folder_state: OptionsJobFn = "VixVM_GetSharedFolderState",
    vix_vm_set_shared_folder_state: SharedFolderStateFn = "VixVM_SetSharedFolderState",
    vix_vm_add_shared_folder: SharedFolderStateFn = "VixVM_AddSharedFolder",
    vix_vm_remove_shared_folder: PathOptionsJobFn = "VixVM_RemoveSharedFolder",
    vix_vm_create_snapshot: CreateSnapshotFn = "VixVM_CreateSnapshot",
    vix_vm_remove_snapshot: RemoveSnapshotFn = "VixVM_RemoveSnapshot",
    vix_vm_revert_to_snapshot: RevertSnapshotFn = "VixVM_RevertToSnapshot",
    vix_vm_get_num_root_snapshots: CountOutFn = "VixVM_GetNumRootSnapshots",
    vix_vm_get_root_snapshot: IndexedHandleOutFn = "VixVM_GetRootSnapshot",
    vix_vm_get_current_snapshot: HandleOutFn = "VixVM_GetCurrentSnapshot",
    vix_vm_get_named_snapshot: NamedHandleOutFn = "VixVM_GetNamedSnapshot",
    vix_snapshot_get_num_children: CountOutFn = "VixSnapshot_GetNumChildren",
    vix_snapshot_get_child: IndexedHandleOutFn = "VixSnapshot_GetChild",
    vix_snapshot_get_parent: HandleOutFn = "VixSnapshot_GetParent",
}

static GLOBAL: OnceLock<std::result::Result<Arc<VixLib>, String>> = OnceLock::new();

impl VixLib {
    /// The shared entry-point table, loading the library on first use.
    pub(crate) fn global() -> Result<Api> {
        match GLOBAL.get_or_init(Self::load) {
            Ok(lib) => {
                let api: Api = Arc::clone(lib) as Api;
                Ok(api)
            }
            Err(reason) => Err(Error::Library(reason.clone())),
        }
    }

    #[cfg(unix)]
    fn load() -> std::result::Result<Arc<VixLib>, String> {
        let candidates = library_candidates();
        let mut failures = Vec::new();
        for path in &candidates {
            let handle =
                unsafe { libc::dlopen(path.as_ptr(), libc::RTLD_NOW | libc::RTLD_GLOBAL) };
            if handle.is_null() {
                failures.push(format!("{}: {}", path.to_string_lossy(), dlerror_text()));
                continue;
            }
            tracing::debug!(path = %path.to_string_lossy(), "loaded VIX library");
            // The handle is intentionally kept open for the process lifetime.
            return Self::resolve(handle).map(Arc::new);
        }
        Err(failures.join("; "))
    }

    #[cfg(not(unix))]
    fn load() -> std::result::Result<Arc<VixLib>, String> {
        Err("VIX library loading is only supported on unix hosts".to_string())
    }
}

#[cfg(unix)]
fn dlerror_text() -> String {
    let err = unsafe { libc::dlerror() };
    if err.is_null() {
        "unknown dlopen failure".to_string()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

#[cfg(unix)]
fn library_candidates() -> Vec<CString> {
    if let Ok(path) = std::env::var("VIX_LIBRARY_PATH") {
        return CString::new(path).into_iter().collect();
    }

    #[cfg(target_os = "macos")]
    let defaults: &[&str] = &[
        "libvixAllProducts.dylib",
        "/Applications/VMware Fusion.app/Contents/Public/libvixAllProducts.dylib",
    ];
    #[cfg(not(target_os = "macos"))]
    let defaults: &[&str] = &[
        "libvixAllProducts.so",
        "/usr/lib/vmware-vix/libvixAllProducts.so",
    ];

    defaults
        .iter()
        .filter_map(|path| CString::new(*path).ok())
        .collect()
}

/// Client-data payload for the find-items event proc.
struct FindItems {
    lib: *const VixLib,
    locations: Vec<String>,
}

unsafe extern "C" fn collect_found_item(
    _job: RawHandle,
    event_type: c_int,
    more_event_info: RawHandle,
    client_data: *mut c_void,
) {
    if event_type != consts::VIX_EVENTTYPE_FIND_ITEM || client_data.is_null() {
        return;
    }
    let state = unsafe { &mut *client_data.cast::<FindItems>() };
    let lib = unsafe { &*state.lib };
    let mut url: *mut c_char = ptr::null_mut();
    let err = unsafe {
        (lib.vix_get_properties)(
            more_event_info,
            consts::VIX_PROPERTY_FOUND_ITEM_LOCATION,
            &mut url as *mut *mut c_char,
            consts::VIX_PROPERTY_NONE,
        )
    };
    if mask(err) == 0 && !url.is_null() {
        let location = unsafe { CStr::from_ptr(url) }.to_string_lossy().into_owned();
        state.locations.push(location);
        unsafe { (lib.vix_free_buffer)(url.cast()) };
    }
}

impl VixApi for VixLib {
    fn release_handle(&self, handle: RawHandle) {
        unsafe { (self.vix_release_handle)(handle) }
    }

    fn free_buffer(&self, buffer: *mut c_char) {
        unsafe { (self.vix_free_buffer)(buffer.cast()) }
    }

    fn error_text(&self, code: u64) -> String {
        let text = unsafe { (self.vix_get_error_text)(code, ptr::null()) };
        if text.is_null() {
            "Unknown".to_string()
        } else {
            unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
        }
    }

    fn property_type(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        let mut tag: c_int = consts::VIX_PROPERTYTYPE_ANY;
        let err = unsafe { (self.vix_get_property_type)(handle, property, &mut tag) };
        (err, tag)
    }

    fn property_int(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        let mut value: c_int = 0;
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut value as *mut c_int,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn property_int64(&self, handle: RawHandle, property: PropertyId) -> (RawError, i64) {
        let mut value: i64 = 0;
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut value as *mut i64,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn property_bool(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        let mut value: c_int = 0;
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut value as *mut c_int,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn property_handle(&self, handle: RawHandle, property: PropertyId) -> (RawError, RawHandle) {
        let mut value: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut value as *mut RawHandle,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn property_string(&self, handle: RawHandle, property: PropertyId) -> (RawError, *mut c_char) {
        let mut value: *mut c_char = ptr::null_mut();
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut value as *mut *mut c_char,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn property_blob(
        &self,
        handle: RawHandle,
        property: PropertyId,
    ) -> (RawError, i32, *mut c_char) {
        let mut len: c_int = 0;
        let mut value: *mut c_char = ptr::null_mut();
        let err = unsafe {
            (self.vix_get_properties)(
                handle,
                property,
                &mut len as *mut c_int,
                &mut value as *mut *mut c_char,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, len, value)
    }

    fn num_properties(&self, job: RawHandle, property: PropertyId) -> i32 {
        unsafe { (self.vix_job_get_num_properties)(job, property) }
    }

    fn nth_property_int(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32) {
        let mut value: c_int = 0;
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut value as *mut c_int,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn nth_property_int64(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i64) {
        let mut value: i64 = 0;
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut value as *mut i64,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn nth_property_bool(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32) {
        let mut value: c_int = 0;
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut value as *mut c_int,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn nth_property_handle(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, RawHandle) {
        let mut value: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut value as *mut RawHandle,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn nth_property_string(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, *mut c_char) {
        let mut value: *mut c_char = ptr::null_mut();
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut value as *mut *mut c_char,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, value)
    }

    fn nth_property_blob(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32, *mut c_char) {
        let mut len: c_int = 0;
        let mut value: *mut c_char = ptr::null_mut();
        let err = unsafe {
            (self.vix_job_get_nth_properties)(
                job,
                index,
                property,
                &mut len as *mut c_int,
                &mut value as *mut *mut c_char,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, len, value)
    }

    fn job_wait(&self, job: RawHandle) -> RawError {
        unsafe { (self.vix_job_wait)(job, consts::VIX_PROPERTY_NONE) }
    }

    fn job_wait_result_handle(&self, job: RawHandle) -> (RawError, RawHandle) {
        let mut handle: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe {
            (self.vix_job_wait)(
                job,
                consts::VIX_PROPERTY_JOB_RESULT_HANDLE,
                &mut handle as *mut RawHandle,
                consts::VIX_PROPERTY_NONE,
            )
        };
        (err, handle)
    }

    fn connect(&self, provider: i32) -> RawHandle {
        unsafe {
            (self.vix_host_connect)(
                consts::VIX_API_VERSION,
                provider,
                ptr::null(),
                0,
                ptr::null(),
                ptr::null(),
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn disconnect(&self, host: RawHandle) {
        unsafe { (self.vix_host_disconnect)(host) }
    }

    fn open_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle {
        unsafe {
            (self.vix_host_open_vm)(
                host,
                vmx_path.as_ptr(),
                consts::VIX_VMOPEN_NORMAL,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn find_running_vms(&self, host: RawHandle) -> (RawError, Vec<String>) {
        let mut state = FindItems {
            lib: self,
            locations: Vec::new(),
        };
        let job = unsafe {
            (self.vix_host_find_items)(
                host,
                consts::VIX_FIND_RUNNING_VMS,
                consts::VIX_INVALID_HANDLE,
                -1,
                Some(collect_found_item),
                (&mut state as *mut FindItems).cast(),
            )
        };
        let err = unsafe { (self.vix_job_wait)(job, consts::VIX_PROPERTY_NONE) };
        unsafe { (self.vix_release_handle)(job) };
        (err, state.locations)
    }

    fn register_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle {
        unsafe { (self.vix_host_register_vm)(host, vmx_path.as_ptr(), None, ptr::null_mut()) }
    }

    fn unregister_vm(&self, host: RawHandle, vmx_path: &CStr) -> RawHandle {
        unsafe { (self.vix_host_unregister_vm)(host, vmx_path.as_ptr(), None, ptr::null_mut()) }
    }

    fn power_on(&self, vm: RawHandle, options: i32) -> RawHandle {
        unsafe {
            (self.vix_vm_power_on)(vm, options, consts::VIX_INVALID_HANDLE, None, ptr::null_mut())
        }
    }

    fn power_off(&self, vm: RawHandle, options: i32) -> RawHandle {
        unsafe { (self.vix_vm_power_off)(vm, options, None, ptr::null_mut()) }
    }

    fn reset(&self, vm: RawHandle, options: i32) -> RawHandle {
        unsafe { (self.vix_vm_reset)(vm, options, None, ptr::null_mut()) }
    }

    fn suspend(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_suspend)(vm, 0, None, ptr::null_mut()) }
    }

    fn pause(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_pause)(vm, 0, consts::VIX_INVALID_HANDLE, None, ptr::null_mut()) }
    }

    fn unpause(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_unpause)(vm, 0, consts::VIX_INVALID_HANDLE, None, ptr::null_mut()) }
    }

    fn delete_vm(&self, vm: RawHandle, options: i32) -> RawHandle {
        unsafe { (self.vix_vm_delete)(vm, options, None, ptr::null_mut()) }
    }

    fn clone_vm(
        &self,
        vm: RawHandle,
        snapshot: RawHandle,
        clone_type: i32,
        dest_path: &CStr,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_clone)(
                vm,
                snapshot,
                clone_type,
                dest_path.as_ptr(),
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn upgrade_virtual_hardware(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_upgrade_virtual_hardware)(vm, 0, None, ptr::null_mut()) }
    }

    fn install_tools(&self, vm: RawHandle, options: i32) -> RawHandle {
        unsafe { (self.vix_vm_install_tools)(vm, options, ptr::null(), None, ptr::null_mut()) }
    }

    fn wait_for_tools(&self, vm: RawHandle, timeout_secs: i32) -> RawHandle {
        unsafe { (self.vix_vm_wait_for_tools)(vm, timeout_secs, None, ptr::null_mut()) }
    }

    fn capture_screen_image(&self, vm: RawHandle) -> RawHandle {
        unsafe {
            (self.vix_vm_capture_screen_image)(
                vm,
                consts::VIX_CAPTURESCREENFORMAT_PNG,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn login(&self, vm: RawHandle, user: &CStr, password: &CStr, options: i32) -> RawHandle {
        unsafe {
            (self.vix_vm_login_in_guest)(
                vm,
                user.as_ptr(),
                password.as_ptr(),
                options,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn logout(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_logout_from_guest)(vm, None, ptr::null_mut()) }
    }

    fn run_program(
        &self,
        vm: RawHandle,
        program: &CStr,
        arguments: &CStr,
        options: i32,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_run_program)(
                vm,
                program.as_ptr(),
                arguments.as_ptr(),
                options,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn run_script(
        &self,
        vm: RawHandle,
        interpreter: &CStr,
        script: &CStr,
        options: i32,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_run_script)(
                vm,
                interpreter.as_ptr(),
                script.as_ptr(),
                options,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn list_processes(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_list_processes)(vm, 0, None, ptr::null_mut()) }
    }

    fn kill_process(&self, vm: RawHandle, pid: u64) -> RawHandle {
        unsafe { (self.vix_vm_kill_process)(vm, pid, 0, None, ptr::null_mut()) }
    }

    fn copy_file_to_guest(&self, vm: RawHandle, host_path: &CStr, guest_path: &CStr) -> RawHandle {
        unsafe {
            (self.vix_vm_copy_file_to_guest)(
                vm,
                host_path.as_ptr(),
                guest_path.as_ptr(),
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn copy_file_from_guest(
        &self,
        vm: RawHandle,
        guest_path: &CStr,
        host_path: &CStr,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_copy_file_from_guest)(
                vm,
                guest_path.as_ptr(),
                host_path.as_ptr(),
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn delete_file(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_delete_file)(vm, path.as_ptr(), None, ptr::null_mut()) }
    }

    fn file_exists(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_file_exists)(vm, path.as_ptr(), None, ptr::null_mut()) }
    }

    fn rename_file(&self, vm: RawHandle, old_path: &CStr, new_path: &CStr) -> RawHandle {
        unsafe {
            (self.vix_vm_rename_file)(
                vm,
                old_path.as_ptr(),
                new_path.as_ptr(),
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn create_temp_file(&self, vm: RawHandle) -> RawHandle {
        unsafe {
            (self.vix_vm_create_temp_file)(
                vm,
                0,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn file_info(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_file_info)(vm, path.as_ptr(), None, ptr::null_mut()) }
    }

    fn list_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_list_directory)(vm, path.as_ptr(), 0, None, ptr::null_mut()) }
    }

    fn create_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe {
            (self.vix_vm_create_directory)(
                vm,
                path.as_ptr(),
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn delete_directory(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_delete_directory)(vm, path.as_ptr(), 0, None, ptr::null_mut()) }
    }

    fn directory_exists(&self, vm: RawHandle, path: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_directory_exists)(vm, path.as_ptr(), None, ptr::null_mut()) }
    }

    fn read_variable(&self, vm: RawHandle, scope: i32, name: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_read_variable)(vm, scope, name.as_ptr(), 0, None, ptr::null_mut()) }
    }

    fn write_variable(&self, vm: RawHandle, scope: i32, name: &CStr, value: &CStr) -> RawHandle {
        unsafe {
            (self.vix_vm_write_variable)(
                vm,
                scope,
                name.as_ptr(),
                value.as_ptr(),
                0,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn enable_shared_folders(&self, vm: RawHandle, enabled: bool) -> RawHandle {
        unsafe {
            (self.vix_vm_enable_shared_folders)(vm, enabled as c_int, 0, None, ptr::null_mut())
        }
    }

    fn shared_folder_count(&self, vm: RawHandle) -> RawHandle {
        unsafe { (self.vix_vm_get_num_shared_folders)(vm, None, ptr::null_mut()) }
    }

    fn shared_folder_state(&self, vm: RawHandle, index: i32) -> RawHandle {
        unsafe { (self.vix_vm_get_shared_folder_state)(vm, index, None, ptr::null_mut()) }
    }

    fn set_shared_folder_state(
        &self,
        vm: RawHandle,
        name: &CStr,
        host_path: &CStr,
        flags: i32,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_set_shared_folder_state)(
                vm,
                name.as_ptr(),
                host_path.as_ptr(),
                flags,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn add_shared_folder(
        &self,
        vm: RawHandle,
        name: &CStr,
        host_path: &CStr,
        flags: i32,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_add_shared_folder)(
                vm,
                name.as_ptr(),
                host_path.as_ptr(),
                flags,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn remove_shared_folder(&self, vm: RawHandle, name: &CStr) -> RawHandle {
        unsafe { (self.vix_vm_remove_shared_folder)(vm, name.as_ptr(), 0, None, ptr::null_mut()) }
    }

    fn create_snapshot(
        &self,
        vm: RawHandle,
        name: &CStr,
        description: &CStr,
        options: i32,
    ) -> RawHandle {
        unsafe {
            (self.vix_vm_create_snapshot)(
                vm,
                name.as_ptr(),
                description.as_ptr(),
                options,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn remove_snapshot(&self, vm: RawHandle, snapshot: RawHandle, options: i32) -> RawHandle {
        unsafe { (self.vix_vm_remove_snapshot)(vm, snapshot, options, None, ptr::null_mut()) }
    }

    fn revert_to_snapshot(&self, vm: RawHandle, snapshot: RawHandle, options: i32) -> RawHandle {
        unsafe {
            (self.vix_vm_revert_to_snapshot)(
                vm,
                snapshot,
                options,
                consts::VIX_INVALID_HANDLE,
                None,
                ptr::null_mut(),
            )
        }
    }

    fn num_root_snapshots(&self, vm: RawHandle) -> (RawError, i32) {
        let mut count: c_int = 0;
        let err = unsafe { (self.vix_vm_get_num_root_snapshots)(vm, &mut count) };
        (err, count)
    }

    fn root_snapshot(&self, vm: RawHandle, index: i32) -> (RawError, RawHandle) {
        let mut snapshot: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe { (self.vix_vm_get_root_snapshot)(vm, index, &mut snapshot) };
        (err, snapshot)
    }

    fn current_snapshot(&self, vm: RawHandle) -> (RawError, RawHandle) {
        let mut snapshot: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe { (self.vix_vm_get_current_snapshot)(vm, &mut snapshot) };
        (err, snapshot)
    }

    fn named_snapshot(&self, vm: RawHandle, name: &CStr) -> (RawError, RawHandle) {
        let mut snapshot: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe { (self.vix_vm_get_named_snapshot)(vm, name.as_ptr(), &mut snapshot) };
        (err, snapshot)
    }

    fn snapshot_num_children(&self, snapshot: RawHandle) -> (RawError, i32) {
        let mut count: c_int = 0;
        let err = unsafe { (self.vix_snapshot_get_num_children)(snapshot, &mut count) };
        (err, count)
    }

    fn snapshot_child(&self, snapshot: RawHandle, index: i32) -> (RawError, RawHandle) {
        let mut child: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe { (self.vix_snapshot_get_child)(snapshot, index, &mut child) };
        (err, child)
    }

    fn snapshot_parent(&self, snapshot: RawHandle) -> (RawError, RawHandle) {
        let mut parent: RawHandle = consts::VIX_INVALID_HANDLE;
        let err = unsafe { (self.vix_snapshot_get_parent)(snapshot, &mut parent) };
        (err, parent)
    }
}
