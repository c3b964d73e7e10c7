//! Virtual machine facade.
//!
//! Every method is one foreign call driven through the job completion
//! protocol: encode string arguments, fold option flags into the option
//! word, obtain the job, wait with the operation's result shape. The
//! binding is strictly blocking; the "return immediately" flags of the run
//! and install operations only control guest-side completion, never the
//! wait itself.

use std::ffi::CString;
use std::time::Duration;

use crate::error::{Result, check};
use crate::ffi::{Api, PropertyId, RawHandle, consts};
use crate::handle::OwnedHandle;
use crate::job::{self, WaitRequest};
use crate::property::{PropertyValue, expect_bool, expect_int, expect_string, get_property};
use crate::snapshot::Snapshot;
use crate::types::{
    CloneType, DirEntry, FileInfo, GuestProcess, PowerState, ProgramResult, SharedFolder,
    ToolsState, VariableScope,
};

const PROCESS_RECORD: &[PropertyId] = &[
    consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME,
    consts::VIX_PROPERTY_JOB_RESULT_PROCESS_ID,
    consts::VIX_PROPERTY_JOB_RESULT_PROCESS_OWNER,
    consts::VIX_PROPERTY_JOB_RESULT_PROCESS_COMMAND,
    consts::VIX_PROPERTY_JOB_RESULT_PROCESS_BEING_DEBUGGED,
    consts::VIX_PROPERTY_JOB_RESULT_PROCESS_START_TIME,
];

const DIRECTORY_RECORD: &[PropertyId] = &[
    consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME,
    consts::VIX_PROPERTY_JOB_RESULT_FILE_FLAGS,
];

/// An opened virtual machine.
///
/// Owns the VM handle; it is released exactly once when the value is
/// dropped. Guest operations require the tools to be running and, for most
/// of them, a prior [`Vm::login`].
pub struct Vm {
    api: Api,
    handle: OwnedHandle,
}

impl Vm {
    pub(crate) fn new(api: Api, handle: OwnedHandle) -> Self {
        Self { api, handle }
    }

    fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    #[cfg(test)]
    pub(crate) fn raw_handle(&self) -> RawHandle {
        self.raw()
    }

    fn complete(&self, job: RawHandle) -> Result<()> {
        job::wait(&self.api, job, WaitRequest::NONE)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Power operations
    // ------------------------------------------------------------------

    /// Power the VM on, optionally with the hypervisor GUI.
    pub fn power_on(&self, launch_gui: bool) -> Result<()> {
        let options = if launch_gui {
            consts::VIX_VMPOWEROP_LAUNCH_GUI
        } else {
            consts::VIX_VMPOWEROP_NORMAL
        };
        tracing::debug!(options, "powering on");
        self.complete(self.api.power_on(self.raw(), options))
    }

    /// Power off, either hard or through the guest OS.
    pub fn power_off(&self, from_guest: bool) -> Result<()> {
        let options = if from_guest {
            consts::VIX_VMPOWEROP_FROM_GUEST
        } else {
            consts::VIX_VMPOWEROP_NORMAL
        };
        self.complete(self.api.power_off(self.raw(), options))
    }

    /// Reset, either hard or through the guest OS.
    pub fn reset(&self, from_guest: bool) -> Result<()> {
        let options = if from_guest {
            consts::VIX_VMPOWEROP_FROM_GUEST
        } else {
            consts::VIX_VMPOWEROP_NORMAL
        };
        self.complete(self.api.reset(self.raw(), options))
    }

    pub fn suspend(&self) -> Result<()> {
        self.complete(self.api.suspend(self.raw()))
    }

    pub fn pause(&self) -> Result<()> {
        self.complete(self.api.pause(self.raw()))
    }

    pub fn unpause(&self) -> Result<()> {
        self.complete(self.api.unpause(self.raw()))
    }

    /// Delete the VM from the host, optionally removing its disk files.
    pub fn delete(self, remove_disk_files: bool) -> Result<()> {
        let options = if remove_disk_files {
            consts::VIX_VMDELETE_DISK_FILES
        } else {
            0
        };
        self.complete(self.api.delete_vm(self.raw(), options))
    }

    /// Block until the guest tools service is up, or until `timeout`
    /// expires. `None` waits without bound.
    pub fn wait_for_tools(&self, timeout: Option<Duration>) -> Result<()> {
        let secs = timeout.map(|t| t.as_secs() as i32).unwrap_or(0);
        self.complete(self.api.wait_for_tools(self.raw(), secs))
    }

    /// Install or upgrade the guest tools.
    pub fn install_tools(&self, wait_for_completion: bool, auto_upgrade: bool) -> Result<()> {
        let mut options = 0;
        if !wait_for_completion {
            options |= consts::VIX_INSTALLTOOLS_RETURN_IMMEDIATELY;
        }
        if auto_upgrade {
            options |= consts::VIX_INSTALLTOOLS_AUTO_UPGRADE;
        } else {
            options |= consts::VIX_INSTALLTOOLS_MOUNT_TOOLS_INSTALLER;
        }
        self.complete(self.api.install_tools(self.raw(), options))
    }

    pub fn upgrade_virtual_hardware(&self) -> Result<()> {
        self.complete(self.api.upgrade_virtual_hardware(self.raw()))
    }

    /// Clone this VM to `dest_vmx_path`, from a snapshot if one is given.
    pub fn clone_to(
        &self,
        dest_vmx_path: &str,
        snapshot: Option<&Snapshot>,
        clone_type: CloneType,
    ) -> Result<Vm> {
        let dest = CString::new(dest_vmx_path)?;
        let snapshot = snapshot.map_or(consts::VIX_INVALID_HANDLE, Snapshot::raw_handle);
        let job = self
            .api
            .clone_vm(self.raw(), snapshot, clone_type.as_raw(), &dest);
        let handle = job::wait(&self.api, job, WaitRequest::RESULT_HANDLE)?.into_handle();
        Ok(Vm::new(self.api.clone(), handle))
    }

    /// Capture the console as a PNG image.
    pub fn capture_screen_image(&self) -> Result<Vec<u8>> {
        let job = self.api.capture_screen_image(self.raw());
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[consts::VIX_PROPERTY_JOB_RESULT_SCREEN_IMAGE_DATA]),
        )?
        .into_record();
        record.blob(consts::VIX_PROPERTY_JOB_RESULT_SCREEN_IMAGE_DATA)
    }

    // ------------------------------------------------------------------
    // Guest session and processes
    // ------------------------------------------------------------------

    /// Authenticate against the guest OS.
    pub fn login(&self, user: &str, password: &str, interactive: bool) -> Result<()> {
        let user = CString::new(user)?;
        let password = CString::new(password)?;
        let options = if interactive {
            consts::VIX_LOGIN_IN_GUEST_REQUIRE_INTERACTIVE_ENVIRONMENT
        } else {
            0
        };
        self.complete(self.api.login(self.raw(), &user, &password, options))
    }

    pub fn logout(&self) -> Result<()> {
        self.complete(self.api.logout(self.raw()))
    }

    /// Run a program in the guest.
    ///
    /// With `wait_for_completion` the call blocks until the program exits
    /// and the exit code is meaningful; without it the job completes once
    /// the program has started.
    pub fn run_program(
        &self,
        program: &str,
        arguments: &str,
        wait_for_completion: bool,
        activate_window: bool,
    ) -> Result<ProgramResult> {
        let program = CString::new(program)?;
        let arguments = CString::new(arguments)?;
        let mut options = 0;
        if !wait_for_completion {
            options |= consts::VIX_RUNPROGRAM_RETURN_IMMEDIATELY;
        }
        if activate_window {
            options |= consts::VIX_RUNPROGRAM_ACTIVATE_WINDOW;
        }
        let job = self
            .api
            .run_program(self.raw(), &program, &arguments, options);
        self.program_result(job)
    }

    /// Run a script through `interpreter` in the guest.
    pub fn run_script(
        &self,
        interpreter: &str,
        script: &str,
        wait_for_completion: bool,
    ) -> Result<ProgramResult> {
        let interpreter = CString::new(interpreter)?;
        let script = CString::new(script)?;
        let options = if wait_for_completion {
            0
        } else {
            consts::VIX_RUNPROGRAM_RETURN_IMMEDIATELY
        };
        let job = self
            .api
            .run_script(self.raw(), &interpreter, &script, options);
        self.program_result(job)
    }

    fn program_result(&self, job: RawHandle) -> Result<ProgramResult> {
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[
                consts::VIX_PROPERTY_JOB_RESULT_PROCESS_ID,
                consts::VIX_PROPERTY_JOB_RESULT_GUEST_PROGRAM_EXIT_CODE,
            ]),
        )?
        .into_record();
        Ok(ProgramResult {
            pid: record.int64(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_ID)? as u64,
            exit_code: record.int(consts::VIX_PROPERTY_JOB_RESULT_GUEST_PROGRAM_EXIT_CODE)?,
        })
    }

    /// List the processes running in the guest.
    pub fn list_processes(&self) -> Result<Vec<GuestProcess>> {
        let job = self.api.list_processes(self.raw());
        let records = job::wait(&self.api, job, WaitRequest::list(PROCESS_RECORD))?.into_records();
        records
            .into_iter()
            .map(|record| {
                Ok(GuestProcess {
                    name: record.string(consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME)?,
                    pid: record.int64(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_ID)? as u64,
                    owner: record.string(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_OWNER)?,
                    command: record.string(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_COMMAND)?,
                    is_debugged: record
                        .boolean(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_BEING_DEBUGGED)?,
                    start_time: record
                        .int64(consts::VIX_PROPERTY_JOB_RESULT_PROCESS_START_TIME)?,
                })
            })
            .collect()
    }

    pub fn kill_process(&self, pid: u64) -> Result<()> {
        self.complete(self.api.kill_process(self.raw(), pid))
    }

    // ------------------------------------------------------------------
    // Guest filesystem
    // ------------------------------------------------------------------

    pub fn copy_file_to_guest(&self, host_path: &str, guest_path: &str) -> Result<()> {
        let host_path = CString::new(host_path)?;
        let guest_path = CString::new(guest_path)?;
        self.complete(
            self.api
                .copy_file_to_guest(self.raw(), &host_path, &guest_path),
        )
    }

    pub fn copy_file_from_guest(&self, guest_path: &str, host_path: &str) -> Result<()> {
        let guest_path = CString::new(guest_path)?;
        let host_path = CString::new(host_path)?;
        self.complete(
            self.api
                .copy_file_from_guest(self.raw(), &guest_path, &host_path),
        )
    }

    pub fn delete_file(&self, path: &str) -> Result<()> {
        let path = CString::new(path)?;
        self.complete(self.api.delete_file(self.raw(), &path))
    }

    pub fn file_exists(&self, path: &str) -> Result<bool> {
        let path = CString::new(path)?;
        let job = self.api.file_exists(self.raw(), &path);
        self.exists_result(job)
    }

    pub fn rename_file(&self, old_path: &str, new_path: &str) -> Result<()> {
        let old_path = CString::new(old_path)?;
        let new_path = CString::new(new_path)?;
        self.complete(self.api.rename_file(self.raw(), &old_path, &new_path))
    }

    /// Create a temporary file in the guest and return its path.
    pub fn create_temp_file(&self) -> Result<String> {
        let job = self.api.create_temp_file(self.raw());
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME]),
        )?
        .into_record();
        record.string(consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME)
    }

    pub fn file_info(&self, path: &str) -> Result<FileInfo> {
        let path = CString::new(path)?;
        let job = self.api.file_info(self.raw(), &path);
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[
                consts::VIX_PROPERTY_JOB_RESULT_FILE_FLAGS,
                consts::VIX_PROPERTY_JOB_RESULT_FILE_SIZE,
                consts::VIX_PROPERTY_JOB_RESULT_FILE_MOD_TIME,
            ]),
        )?
        .into_record();
        Ok(FileInfo {
            size: record.int64(consts::VIX_PROPERTY_JOB_RESULT_FILE_SIZE)?,
            flags: record.int(consts::VIX_PROPERTY_JOB_RESULT_FILE_FLAGS)?,
            mod_time: record.int64(consts::VIX_PROPERTY_JOB_RESULT_FILE_MOD_TIME)?,
        })
    }

    /// List a guest directory. Entries come back in the order the guest
    /// reported them.
    pub fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>> {
        let path = CString::new(path)?;
        let job = self.api.list_directory(self.raw(), &path);
        let records =
            job::wait(&self.api, job, WaitRequest::list(DIRECTORY_RECORD))?.into_records();
        records
            .into_iter()
            .map(|record| {
                Ok(DirEntry {
                    name: record.string(consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME)?,
                    flags: record.int(consts::VIX_PROPERTY_JOB_RESULT_FILE_FLAGS)?,
                })
            })
            .collect()
    }

    pub fn create_directory(&self, path: &str) -> Result<()> {
        let path = CString::new(path)?;
        self.complete(self.api.create_directory(self.raw(), &path))
    }

    pub fn delete_directory(&self, path: &str) -> Result<()> {
        let path = CString::new(path)?;
        self.complete(self.api.delete_directory(self.raw(), &path))
    }

    pub fn directory_exists(&self, path: &str) -> Result<bool> {
        let path = CString::new(path)?;
        let job = self.api.directory_exists(self.raw(), &path);
        self.exists_result(job)
    }

    fn exists_result(&self, job: RawHandle) -> Result<bool> {
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[consts::VIX_PROPERTY_JOB_RESULT_GUEST_OBJECT_EXISTS]),
        )?
        .into_record();
        record.boolean(consts::VIX_PROPERTY_JOB_RESULT_GUEST_OBJECT_EXISTS)
    }

    // ------------------------------------------------------------------
    // Guest variables
    // ------------------------------------------------------------------

    pub fn read_variable(&self, scope: VariableScope, name: &str) -> Result<String> {
        let name = CString::new(name)?;
        let job = self.api.read_variable(self.raw(), scope.as_raw(), &name);
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[consts::VIX_PROPERTY_JOB_RESULT_VM_VARIABLE_STRING]),
        )?
        .into_record();
        record.string(consts::VIX_PROPERTY_JOB_RESULT_VM_VARIABLE_STRING)
    }

    pub fn write_variable(&self, scope: VariableScope, name: &str, value: &str) -> Result<()> {
        let name = CString::new(name)?;
        let value = CString::new(value)?;
        self.complete(
            self.api
                .write_variable(self.raw(), scope.as_raw(), &name, &value),
        )
    }

    // ------------------------------------------------------------------
    // Shared folders
    // ------------------------------------------------------------------

    pub fn enable_shared_folders(&self, enabled: bool) -> Result<()> {
        self.complete(self.api.enable_shared_folders(self.raw(), enabled))
    }

    pub fn shared_folder_count(&self) -> Result<i32> {
        let job = self.api.shared_folder_count(self.raw());
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_COUNT]),
        )?
        .into_record();
        record.int(consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_COUNT)
    }

    pub fn shared_folder(&self, index: i32) -> Result<SharedFolder> {
        let job = self.api.shared_folder_state(self.raw(), index);
        let record = job::wait(
            &self.api,
            job,
            WaitRequest::properties(&[
                consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME,
                consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_HOST,
                consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_FLAGS,
            ]),
        )?
        .into_record();
        Ok(SharedFolder {
            name: record.string(consts::VIX_PROPERTY_JOB_RESULT_ITEM_NAME)?,
            host_path: record.string(consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_HOST)?,
            writable: record.int(consts::VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_FLAGS)?
                & consts::VIX_SHAREDFOLDER_WRITE_ACCESS
                != 0,
        })
    }

    pub fn set_shared_folder(&self, name: &str, host_path: &str, writable: bool) -> Result<()> {
        let name = CString::new(name)?;
        let host_path = CString::new(host_path)?;
        let flags = if writable {
            consts::VIX_SHAREDFOLDER_WRITE_ACCESS
        } else {
            0
        };
        self.complete(
            self.api
                .set_shared_folder_state(self.raw(), &name, &host_path, flags),
        )
    }

    pub fn add_shared_folder(&self, name: &str, host_path: &str, writable: bool) -> Result<()> {
        let name = CString::new(name)?;
        let host_path = CString::new(host_path)?;
        let flags = if writable {
            consts::VIX_SHAREDFOLDER_WRITE_ACCESS
        } else {
            0
        };
        self.complete(
            self.api
                .add_shared_folder(self.raw(), &name, &host_path, flags),
        )
    }

    pub fn remove_shared_folder(&self, name: &str) -> Result<()> {
        let name = CString::new(name)?;
        self.complete(self.api.remove_shared_folder(self.raw(), &name))
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn num_root_snapshots(&self) -> Result<i32> {
        let (err, count) = self.api.num_root_snapshots(self.raw());
        check(self.api.as_ref(), err)?;
        Ok(count)
    }

    pub fn root_snapshot(&self, index: i32) -> Result<Snapshot> {
        let (err, snapshot) = self.api.root_snapshot(self.raw(), index);
        check(self.api.as_ref(), err)?;
        Ok(self.wrap_snapshot(snapshot))
    }

    pub fn current_snapshot(&self) -> Result<Snapshot> {
        let (err, snapshot) = self.api.current_snapshot(self.raw());
        check(self.api.as_ref(), err)?;
        Ok(self.wrap_snapshot(snapshot))
    }

    pub fn named_snapshot(&self, name: &str) -> Result<Snapshot> {
        let name = CString::new(name)?;
        let (err, snapshot) = self.api.named_snapshot(self.raw(), &name);
        check(self.api.as_ref(), err)?;
        Ok(self.wrap_snapshot(snapshot))
    }

    /// Take a snapshot, optionally including the memory image.
    pub fn create_snapshot(
        &self,
        name: &str,
        description: &str,
        include_memory: bool,
    ) -> Result<Snapshot> {
        let name = CString::new(name)?;
        let description = CString::new(description)?;
        let options = if include_memory {
            consts::VIX_SNAPSHOT_INCLUDE_MEMORY
        } else {
            0
        };
        let job = self
            .api
            .create_snapshot(self.raw(), &name, &description, options);
        let handle = job::wait(&self.api, job, WaitRequest::RESULT_HANDLE)?.into_handle();
        Ok(Snapshot::new(self.api.clone(), handle))
    }

    /// Remove a snapshot, optionally together with its children.
    pub fn remove_snapshot(&self, snapshot: &Snapshot, remove_children: bool) -> Result<()> {
        let options = if remove_children {
            consts::VIX_SNAPSHOT_REMOVE_CHILDREN
        } else {
            0
        };
        self.complete(
            self.api
                .remove_snapshot(self.raw(), snapshot.raw_handle(), options),
        )
    }

    /// Restore the VM to a snapshot, optionally launching the GUI.
    pub fn revert_to_snapshot(&self, snapshot: &Snapshot, launch_gui: bool) -> Result<()> {
        let options = if launch_gui {
            consts::VIX_VMPOWEROP_LAUNCH_GUI
        } else {
            consts::VIX_VMPOWEROP_NORMAL
        };
        self.complete(
            self.api
                .revert_to_snapshot(self.raw(), snapshot.raw_handle(), options),
        )
    }

    fn wrap_snapshot(&self, snapshot: RawHandle) -> Snapshot {
        Snapshot::new(
            self.api.clone(),
            OwnedHandle::new(self.api.clone(), snapshot),
        )
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Fetch an arbitrary property of this VM by numeric ID.
    pub fn property(&self, property: i32) -> Result<PropertyValue> {
        get_property(self.api.as_ref(), self.raw(), property)
    }

    pub fn name(&self) -> Result<String> {
        self.string_property(consts::VIX_PROPERTY_VM_NAME)
    }

    pub fn guest_os(&self) -> Result<String> {
        self.string_property(consts::VIX_PROPERTY_VM_GUESTOS)
    }

    pub fn vmx_path(&self) -> Result<String> {
        self.string_property(consts::VIX_PROPERTY_VM_VMX_PATHNAME)
    }

    pub fn memory_size(&self) -> Result<i32> {
        self.int_property(consts::VIX_PROPERTY_VM_MEMORY_SIZE)
    }

    pub fn cpu_count(&self) -> Result<i32> {
        self.int_property(consts::VIX_PROPERTY_VM_NUM_VCPUS)
    }

    pub fn read_only(&self) -> Result<bool> {
        let property = consts::VIX_PROPERTY_VM_READ_ONLY;
        expect_bool(self.property(property)?, property)
    }

    pub fn is_running(&self) -> Result<bool> {
        let property = consts::VIX_PROPERTY_VM_IS_RUNNING;
        expect_bool(self.property(property)?, property)
    }

    pub fn power_state(&self) -> Result<PowerState> {
        Ok(PowerState::from_bits(
            self.int_property(consts::VIX_PROPERTY_VM_POWER_STATE)?,
        ))
    }

    pub fn tools_state(&self) -> Result<ToolsState> {
        Ok(ToolsState::from_raw(
            self.int_property(consts::VIX_PROPERTY_VM_TOOLS_STATE)?,
        ))
    }

    /// Host-side path under which shared folders surface in the guest.
    pub fn shares_path(&self) -> Result<String> {
        self.string_property(consts::VIX_PROPERTY_GUEST_SHAREDFOLDERS_SHARES_PATH)
    }

    fn string_property(&self, property: PropertyId) -> Result<String> {
        expect_string(self.property(property)?, property)
    }

    fn int_property(&self, property: PropertyId) -> Result<i32> {
        expect_int(self.property(property)?, property)
    }
}
