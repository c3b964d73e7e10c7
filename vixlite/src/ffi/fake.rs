//! Scripted in-memory stand-in for the VIX library, used by unit tests.
//!
//! Tracks every handle release and every buffer handed across the seam, so
//! tests can pin the resource-safety invariants: jobs released exactly once
//! on every path, foreign buffers freed exactly once, no double releases.

use std::collections::{HashMap, VecDeque};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::Mutex;

use super::{PropertyId, RawError, RawHandle, VixApi};
use crate::property::PropertyValue;

const E_INVALID_ARG: RawError = 3;
const E_UNRECOGNIZED_PROPERTY: RawError = 6000;
const E_PROPERTY_TYPE_MISMATCH: RawError = 6005;
const E_SNAPSHOT_NOTFOUND: RawError = 13003;

/// Scripted outcome for one spawned job.
#[derive(Clone, Default)]
pub(crate) struct FakeJob {
    error: RawError,
    result_handle: Option<RawHandle>,
    properties: Vec<(PropertyId, PropertyValue)>,
    records: Vec<Vec<(PropertyId, PropertyValue)>>,
}

impl FakeJob {
    pub(crate) fn ok() -> Self {
        Self::default()
    }

    pub(crate) fn fail(code: u16) -> Self {
        Self::fail_raw(code as RawError)
    }

    pub(crate) fn fail_raw(raw: RawError) -> Self {
        FakeJob {
            error: raw,
            ..Self::default()
        }
    }

    pub(crate) fn result_handle(mut self, handle: RawHandle) -> Self {
        self.result_handle = Some(handle);
        self
    }

    pub(crate) fn property(mut self, property: PropertyId, value: PropertyValue) -> Self {
        self.properties.push((property, value));
        self
    }

    pub(crate) fn records(mut self, records: Vec<Vec<(PropertyId, PropertyValue)>>) -> Self {
        self.records = records;
        self
    }
}

enum BufKind {
    Str,
    Blob(usize),
}

struct JobState {
    error: RawError,
    result_handle: RawHandle,
}

#[derive(Default)]
struct State {
    next_handle: RawHandle,
    allocated: usize,
    releases: HashMap<RawHandle, u32>,
    disconnects: u32,
    buffers: HashMap<usize, BufKind>,
    buffers_out: usize,
    properties: HashMap<(RawHandle, PropertyId), PropertyValue>,
    tag_overrides: HashMap<(RawHandle, PropertyId), i32>,
    records: HashMap<RawHandle, Vec<Vec<(PropertyId, PropertyValue)>>>,
    jobs: HashMap<RawHandle, JobState>,
    spawned_jobs: Vec<RawHandle>,
    scripts: HashMap<String, VecDeque<FakeJob>>,
    options_log: HashMap<String, i32>,
    variables: HashMap<(RawHandle, i32, String), String>,
    running_vms: Vec<String>,
    named_snapshots: HashMap<(RawHandle, String), RawHandle>,
    roots: HashMap<RawHandle, Vec<RawHandle>>,
    children: HashMap<RawHandle, Vec<RawHandle>>,
    parents: HashMap<RawHandle, RawHandle>,
    current_snapshots: HashMap<RawHandle, RawHandle>,
}

impl State {
    fn alloc(&mut self) -> RawHandle {
        self.next_handle += 1;
        self.allocated += 1;
        self.next_handle
    }

    fn install_job(&mut self, spec: FakeJob, yields_handle: bool) -> RawHandle {
        let job = self.alloc();
        let result_handle = match spec.result_handle {
            Some(handle) => handle,
            None if yields_handle && spec.error == 0 => self.alloc(),
            None => super::consts::VIX_INVALID_HANDLE,
        };
        self.jobs.insert(
            job,
            JobState {
                error: spec.error,
                result_handle,
            },
        );
        for (property, value) in spec.properties {
            self.properties.insert((job, property), value);
        }
        self.records.insert(job, spec.records);
        self.spawned_jobs.push(job);
        job
    }

    fn scripted(&mut self, op: &str) -> Option<FakeJob> {
        self.scripts.get_mut(op).and_then(VecDeque::pop_front)
    }

    fn lease_string(&mut self, value: &str) -> *mut c_char {
        let buffer = CString::new(value).expect("fake property strings have no interior NUL");
        let ptr = buffer.into_raw();
        self.buffers.insert(ptr as usize, BufKind::Str);
        self.buffers_out += 1;
        ptr
    }

    fn lease_blob(&mut self, value: &[u8]) -> (i32, *mut c_char) {
        if value.is_empty() {
            return (0, std::ptr::null_mut());
        }
        let boxed = value.to_vec().into_boxed_slice();
        let len = boxed.len();
        let ptr = Box::into_raw(boxed) as *mut u8;
        self.buffers.insert(ptr as usize, BufKind::Blob(len));
        self.buffers_out += 1;
        (len as i32, ptr.cast())
    }

    fn lookup(&self, handle: RawHandle, property: PropertyId) -> Option<&PropertyValue> {
        self.properties.get(&(handle, property)).or_else(|| {
            self.records
                .get(&handle)?
                .iter()
                .find_map(|record| record.iter().find(|(id, _)| *id == property))
                .map(|(_, value)| value)
        })
    }

    fn lookup_nth(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> Option<&PropertyValue> {
        self.records
            .get(&job)?
            .get(index as usize)?
            .iter()
            .find(|(id, _)| *id == property)
            .map(|(_, value)| value)
    }
}

fn tag_of(value: &PropertyValue) -> i32 {
    match value {
        PropertyValue::Int(_) => super::consts::VIX_PROPERTYTYPE_INTEGER,
        PropertyValue::Str(_) => super::consts::VIX_PROPERTYTYPE_STRING,
        PropertyValue::Bool(_) => super::consts::VIX_PROPERTYTYPE_BOOL,
        PropertyValue::Handle(_) => super::consts::VIX_PROPERTYTYPE_HANDLE,
        PropertyValue::Int64(_) => super::consts::VIX_PROPERTYTYPE_INT64,
        PropertyValue::Blob(_) => super::consts::VIX_PROPERTYTYPE_BLOB,
    }
}

/// The fake foreign layer.
pub(crate) struct FakeVix {
    state: Mutex<State>,
}

impl FakeVix {
    pub(crate) fn new() -> Self {
        FakeVix {
            state: Mutex::new(State {
                next_handle: 1000,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn op_job(&self, op: &str, options: i32, yields_handle: bool) -> RawHandle {
        let mut state = self.lock();
        state.options_log.insert(op.to_string(), options);
        let spec = state.scripted(op).unwrap_or_default();
        state.install_job(spec, yields_handle)
    }

    // ----- scripting and inspection helpers -----

    pub(crate) fn alloc_handle(&self) -> RawHandle {
        self.lock().alloc()
    }

    pub(crate) fn push_job(&self, spec: FakeJob) -> RawHandle {
        self.lock().install_job(spec, false)
    }

    pub(crate) fn script(&self, op: &str, spec: FakeJob) {
        self.lock()
            .scripts
            .entry(op.to_string())
            .or_default()
            .push_back(spec);
    }

    pub(crate) fn set_property(&self, handle: RawHandle, property: PropertyId, value: PropertyValue) {
        self.lock().properties.insert((handle, property), value);
    }

    pub(crate) fn override_type_tag(&self, handle: RawHandle, property: PropertyId, tag: i32) {
        self.lock().tag_overrides.insert((handle, property), tag);
    }

    pub(crate) fn set_running_vms(&self, locations: Vec<String>) {
        self.lock().running_vms = locations;
    }

    pub(crate) fn add_named_snapshot(&self, vm: RawHandle, name: &str) -> RawHandle {
        let mut state = self.lock();
        let handle = state.alloc();
        state.named_snapshots.insert((vm, name.to_string()), handle);
        handle
    }

    pub(crate) fn add_root_snapshot(&self, vm: RawHandle) -> RawHandle {
        let mut state = self.lock();
        let handle = state.alloc();
        state.roots.entry(vm).or_default().push(handle);
        state.current_snapshots.insert(vm, handle);
        handle
    }

    pub(crate) fn add_child_snapshot(&self, parent: RawHandle) -> RawHandle {
        let mut state = self.lock();
        let handle = state.alloc();
        state.children.entry(parent).or_default().push(handle);
        state.parents.insert(handle, parent);
        handle
    }

    pub(crate) fn release_count(&self, handle: RawHandle) -> u32 {
        self.lock().releases.get(&handle).copied().unwrap_or(0)
    }

    pub(crate) fn total_releases(&self) -> u32 {
        self.lock().releases.values().sum()
    }

    pub(crate) fn disconnect_count(&self) -> u32 {
        self.lock().disconnects
    }

    pub(crate) fn outstanding_buffers(&self) -> usize {
        self.lock().buffers.len()
    }

    pub(crate) fn buffers_handed_out(&self) -> usize {
        self.lock().buffers_out
    }

    pub(crate) fn handles_allocated(&self) -> usize {
        self.lock().allocated
    }

    pub(crate) fn last_options(&self, op: &str) -> i32 {
        self.lock()
            .options_log
            .get(op)
            .copied()
            .unwrap_or_else(|| panic!("operation {op} was never called"))
    }

    /// Every job spawned through this fake must have been released exactly
    /// once by the time a test calls this.
    pub(crate) fn assert_all_jobs_released(&self) {
        let state = self.lock();
        for job in &state.spawned_jobs {
            let count = state.releases.get(job).copied().unwrap_or(0);
            assert_eq!(count, 1, "job handle {job} released {count} times");
        }
    }
}

impl VixApi for FakeVix {
    fn release_handle(&self, handle: RawHandle) {
        *self.lock().releases.entry(handle).or_insert(0) += 1;
    }

    fn free_buffer(&self, buffer: *mut c_char) {
        let kind = self
            .lock()
            .buffers
            .remove(&(buffer as usize))
            .unwrap_or_else(|| panic!("free of a buffer the fake never handed out"));
        match kind {
            BufKind::Str => unsafe {
                drop(CString::from_raw(buffer));
            },
            BufKind::Blob(len) => unsafe {
                drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    buffer.cast::<u8>(),
                    len,
                )));
            },
        }
    }

    fn error_text(&self, code: u64) -> String {
        match code {
            36 => "The connection to the host was lost".to_string(),
            3006 => "The virtual machine needs to be powered on".to_string(),
            6000 => "Unrecognized handle property identifier".to_string(),
            13003 => "A snapshot with this name does not exist".to_string(),
            20001 => "The object is not a file".to_string(),
            other => format!("VIX fake error {other}"),
        }
    }

    fn property_type(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        let state = self.lock();
        if let Some(tag) = state.tag_overrides.get(&(handle, property)) {
            return (0, *tag);
        }
        match state.lookup(handle, property) {
            Some(value) => (0, tag_of(value)),
            None => (E_UNRECOGNIZED_PROPERTY, super::consts::VIX_PROPERTYTYPE_ANY),
        }
    }

    fn property_int(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        match self.lock().lookup(handle, property) {
            Some(PropertyValue::Int(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn property_int64(&self, handle: RawHandle, property: PropertyId) -> (RawError, i64) {
        match self.lock().lookup(handle, property) {
            Some(PropertyValue::Int64(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn property_bool(&self, handle: RawHandle, property: PropertyId) -> (RawError, i32) {
        match self.lock().lookup(handle, property) {
            Some(PropertyValue::Bool(value)) => (0, *value as i32),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn property_handle(&self, handle: RawHandle, property: PropertyId) -> (RawError, RawHandle) {
        match self.lock().lookup(handle, property) {
            Some(PropertyValue::Handle(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn property_string(&self, handle: RawHandle, property: PropertyId) -> (RawError, *mut c_char) {
        let mut state = self.lock();
        match state.lookup(handle, property).cloned() {
            Some(PropertyValue::Str(value)) => {
                let ptr = state.lease_string(&value);
                (0, ptr)
            }
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, std::ptr::null_mut()),
            None => (E_UNRECOGNIZED_PROPERTY, std::ptr::null_mut()),
        }
    }

    fn property_blob(
        &self,
        handle: RawHandle,
        property: PropertyId,
    ) -> (RawError, i32, *mut c_char) {
        let mut state = self.lock();
        match state.lookup(handle, property).cloned() {
            Some(PropertyValue::Blob(value)) => {
                let (len, ptr) = state.lease_blob(&value);
                (0, len, ptr)
            }
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0, std::ptr::null_mut()),
            None => (E_UNRECOGNIZED_PROPERTY, 0, std::ptr::null_mut()),
        }
    }

    fn num_properties(&self, job: RawHandle, _property: PropertyId) -> i32 {
        self.lock().records.get(&job).map_or(0, Vec::len) as i32
    }

    fn nth_property_int(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32) {
        match self.lock().lookup_nth(job, index, property) {
            Some(PropertyValue::Int(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn nth_property_int64(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i64) {
        match self.lock().lookup_nth(job, index, property) {
            Some(PropertyValue::Int64(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn nth_property_bool(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32) {
        match self.lock().lookup_nth(job, index, property) {
            Some(PropertyValue::Bool(value)) => (0, *value as i32),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn nth_property_handle(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, RawHandle) {
        match self.lock().lookup_nth(job, index, property) {
            Some(PropertyValue::Handle(value)) => (0, *value),
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0),
            None => (E_UNRECOGNIZED_PROPERTY, 0),
        }
    }

    fn nth_property_string(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, *mut c_char) {
        let mut state = self.lock();
        match state.lookup_nth(job, index, property).cloned() {
            Some(PropertyValue::Str(value)) => {
                let ptr = state.lease_string(&value);
                (0, ptr)
            }
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, std::ptr::null_mut()),
            None => (E_UNRECOGNIZED_PROPERTY, std::ptr::null_mut()),
        }
    }

    fn nth_property_blob(
        &self,
        job: RawHandle,
        index: i32,
        property: PropertyId,
    ) -> (RawError, i32, *mut c_char) {
        let mut state = self.lock();
        match state.lookup_nth(job, index, property).cloned() {
            Some(PropertyValue::Blob(value)) => {
                let (len, ptr) = state.lease_blob(&value);
                (0, len, ptr)
            }
            Some(_) => (E_PROPERTY_TYPE_MISMATCH, 0, std::ptr::null_mut()),
            None => (E_UNRECOGNIZED_PROPERTY, 0, std::ptr::null_mut()),
        }
    }

    fn job_wait(&self, job: RawHandle) -> RawError {
        self.lock()
            .jobs
            .get(&job)
            .unwrap_or_else(|| panic!("wait on unknown job handle {job}"))
            .error
    }

    fn job_wait_result_handle(&self, job: RawHandle) -> (RawError, RawHandle) {
        let state = self.lock();
        let job = state
            .jobs
            .get(&job)
            .unwrap_or_else(|| panic!("wait on unknown job handle {job}"));
        (job.error, job.result_handle)
    }

    fn connect(&self, provider: i32) -> RawHandle {
        self.op_job("connect", provider, true)
    }

    fn disconnect(&self, _host: RawHandle) {
        self.lock().disconnects += 1;
    }

    fn open_vm(&self, _host: RawHandle, _vmx_path: &CStr) -> RawHandle {
        self.op_job("open_vm", 0, true)
    }

    fn find_running_vms(&self, _host: RawHandle) -> (RawError, Vec<String>) {
        (0, self.lock().running_vms.clone())
    }

    fn register_vm(&self, _host: RawHandle, _vmx_path: &CStr) -> RawHandle {
        self.op_job("register_vm", 0, false)
    }

    fn unregister_vm(&self, _host: RawHandle, _vmx_path: &CStr) -> RawHandle {
        self.op_job("unregister_vm", 0, false)
    }

    fn power_on(&self, _vm: RawHandle, options: i32) -> RawHandle {
        self.op_job("power_on", options, false)
    }

    fn power_off(&self, _vm: RawHandle, options: i32) -> RawHandle {
        self.op_job("power_off", options, false)
    }

    fn reset(&self, _vm: RawHandle, options: i32) -> RawHandle {
        self.op_job("reset", options, false)
    }

    fn suspend(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("suspend", 0, false)
    }

    fn pause(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("pause", 0, false)
    }

    fn unpause(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("unpause", 0, false)
    }

    fn delete_vm(&self, _vm: RawHandle, options: i32) -> RawHandle {
        self.op_job("delete_vm", options, false)
    }

    fn clone_vm(
        &self,
        _vm: RawHandle,
        _snapshot: RawHandle,
        clone_type: i32,
        _dest_path: &CStr,
    ) -> RawHandle {
        self.op_job("clone_vm", clone_type, true)
    }

    fn upgrade_virtual_hardware(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("upgrade_virtual_hardware", 0, false)
    }

    fn install_tools(&self, _vm: RawHandle, options: i32) -> RawHandle {
        self.op_job("install_tools", options, false)
    }

    fn wait_for_tools(&self, _vm: RawHandle, timeout_secs: i32) -> RawHandle {
        self.op_job("wait_for_tools", timeout_secs, false)
    }

    fn capture_screen_image(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("capture_screen_image", 0, false)
    }

    fn login(&self, _vm: RawHandle, _user: &CStr, _password: &CStr, options: i32) -> RawHandle {
        self.op_job("login", options, false)
    }

    fn logout(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("logout", 0, false)
    }

    fn run_program(
        &self,
        _vm: RawHandle,
        _program: &CStr,
        _arguments: &CStr,
        options: i32,
    ) -> RawHandle {
        self.op_job("run_program", options, false)
    }

    fn run_script(
        &self,
        _vm: RawHandle,
        _interpreter: &CStr,
        _script: &CStr,
        options: i32,
    ) -> RawHandle {
        self.op_job("run_script", options, false)
    }

    fn list_processes(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("list_processes", 0, false)
    }

    fn kill_process(&self, _vm: RawHandle, _pid: u64) -> RawHandle {
        self.op_job("kill_process", 0, false)
    }

    fn copy_file_to_guest(
        &self,
        _vm: RawHandle,
        _host_path: &CStr,
        _guest_path: &CStr,
    ) -> RawHandle {
        self.op_job("copy_file_to_guest", 0, false)
    }

    fn copy_file_from_guest(
        &self,
        _vm: RawHandle,
        _guest_path: &CStr,
        _host_path: &CStr,
    ) -> RawHandle {
        self.op_job("copy_file_from_guest", 0, false)
    }

    fn delete_file(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("delete_file", 0, false)
    }

    fn file_exists(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("file_exists", 0, false)
    }

    fn rename_file(&self, _vm: RawHandle, _old_path: &CStr, _new_path: &CStr) -> RawHandle {
        self.op_job("rename_file", 0, false)
    }

    fn create_temp_file(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("create_temp_file", 0, false)
    }

    fn file_info(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("file_info", 0, false)
    }

    fn list_directory(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("list_directory", 0, false)
    }

    fn create_directory(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("create_directory", 0, false)
    }

    fn delete_directory(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("delete_directory", 0, false)
    }

    fn directory_exists(&self, _vm: RawHandle, _path: &CStr) -> RawHandle {
        self.op_job("directory_exists", 0, false)
    }

    fn read_variable(&self, vm: RawHandle, scope: i32, name: &CStr) -> RawHandle {
        let mut state = self.lock();
        state.options_log.insert("read_variable".to_string(), scope);
        let spec = state.scripted("read_variable").unwrap_or_else(|| {
            let key = (vm, scope, name.to_string_lossy().into_owned());
            let value = state.variables.get(&key).cloned().unwrap_or_default();
            FakeJob::ok().property(
                super::consts::VIX_PROPERTY_JOB_RESULT_VM_VARIABLE_STRING,
                PropertyValue::Str(value),
            )
        });
        state.install_job(spec, false)
    }

    fn write_variable(&self, vm: RawHandle, scope: i32, name: &CStr, value: &CStr) -> RawHandle {
        let mut state = self.lock();
        state.options_log.insert("write_variable".to_string(), scope);
        let spec = state.scripted("write_variable").unwrap_or_default();
        if spec.error == 0 {
            state.variables.insert(
                (vm, scope, name.to_string_lossy().into_owned()),
                value.to_string_lossy().into_owned(),
            );
        }
        state.install_job(spec, false)
    }

    fn enable_shared_folders(&self, _vm: RawHandle, enabled: bool) -> RawHandle {
        self.op_job("enable_shared_folders", enabled as i32, false)
    }

    fn shared_folder_count(&self, _vm: RawHandle) -> RawHandle {
        self.op_job("shared_folder_count", 0, false)
    }

    fn shared_folder_state(&self, _vm: RawHandle, index: i32) -> RawHandle {
        self.op_job("shared_folder_state", index, false)
    }

    fn set_shared_folder_state(
        &self,
        _vm: RawHandle,
        _name: &CStr,
        _host_path: &CStr,
        flags: i32,
    ) -> RawHandle {
        self.op_job("set_shared_folder_state", flags, false)
    }

    fn add_shared_folder(
        &self,
        _vm: RawHandle,
        _name: &CStr,
        _host_path: &CStr,
        flags: i32,
    ) -> RawHandle {
        self.op_job("add_shared_folder", flags, false)
    }

    fn remove_shared_folder(&self, _vm: RawHandle, _name: &CStr) -> RawHandle {
        self.op_job("remove_shared_folder", 0, false)
    }

    fn create_snapshot(
        &self,
        _vm: RawHandle,
        _name: &CStr,
        _description: &CStr,
        options: i32,
    ) -> RawHandle {
        self.op_job("create_snapshot", options, true)
    }

    fn remove_snapshot(&self, _vm: RawHandle, _snapshot: RawHandle, options: i32) -> RawHandle {
        self.op_job("remove_snapshot", options, false)
    }

    fn revert_to_snapshot(&self, _vm: RawHandle, _snapshot: RawHandle, options: i32) -> RawHandle {
        self.op_job("revert_to_snapshot", options, false)
    }

    fn num_root_snapshots(&self, vm: RawHandle) -> (RawError, i32) {
        (0, self.lock().roots.get(&vm).map_or(0, Vec::len) as i32)
    }

    fn root_snapshot(&self, vm: RawHandle, index: i32) -> (RawError, RawHandle) {
        match self
            .lock()
            .roots
            .get(&vm)
            .and_then(|roots| roots.get(index as usize))
        {
            Some(handle) => (0, *handle),
            None => (E_INVALID_ARG, super::consts::VIX_INVALID_HANDLE),
        }
    }

    fn current_snapshot(&self, vm: RawHandle) -> (RawError, RawHandle) {
        match self.lock().current_snapshots.get(&vm) {
            Some(handle) => (0, *handle),
            None => (E_SNAPSHOT_NOTFOUND, super::consts::VIX_INVALID_HANDLE),
        }
    }

    fn named_snapshot(&self, vm: RawHandle, name: &CStr) -> (RawError, RawHandle) {
        let key = (vm, name.to_string_lossy().into_owned());
        match self.lock().named_snapshots.get(&key) {
            Some(handle) => (0, *handle),
            None => (E_SNAPSHOT_NOTFOUND, super::consts::VIX_INVALID_HANDLE),
        }
    }

    fn snapshot_num_children(&self, snapshot: RawHandle) -> (RawError, i32) {
        (0, self.lock().children.get(&snapshot).map_or(0, Vec::len) as i32)
    }

    fn snapshot_child(&self, snapshot: RawHandle, index: i32) -> (RawError, RawHandle) {
        match self
            .lock()
            .children
            .get(&snapshot)
            .and_then(|children| children.get(index as usize))
        {
            Some(handle) => (0, *handle),
            None => (E_INVALID_ARG, super::consts::VIX_INVALID_HANDLE),
        }
    }

    fn snapshot_parent(&self, snapshot: RawHandle) -> (RawError, RawHandle) {
        match self.lock().parents.get(&snapshot) {
            Some(handle) => (0, *handle),
            None => (E_INVALID_ARG, super::consts::VIX_INVALID_HANDLE),
        }
    }
}
