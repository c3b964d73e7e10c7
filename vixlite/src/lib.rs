//! Safe Rust bindings for the VMware VIX automation API.
//!
//! VIX is a handle-based C API for scripting hypervisor hosts: connecting,
//! opening virtual machines, driving their power state, and operating inside
//! the guest OS (processes, files, variables, snapshots). Every native
//! operation is asynchronous and hands back a job handle; this crate drives
//! each job to completion, decodes its runtime-typed result properties, and
//! maps the manual handle-release discipline onto RAII, so handles are
//! released exactly once on every path.
//!
//! ## Entity model
//!
//! - [`Host`]: a hypervisor connection; opens VMs and lists running ones.
//! - [`Vm`]: one virtual machine; power, guest and snapshot operations.
//! - [`Snapshot`]: one node of a VM's snapshot tree, navigated on demand.
//!
//! All calls block until the underlying job has reached a terminal state.
//! Objects are not internally synchronised; do not drive one handle from
//! several threads at once without external locking.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vixlite::{Host, ServiceProvider, VariableScope};
//!
//! fn main() -> vixlite::Result<()> {
//!     let host = Host::connect(ServiceProvider::Workstation)?;
//!     let vm = host.open("/vms/demo/demo.vmx")?;
//!     vm.power_on(false)?;
//!     vm.wait_for_tools(None)?;
//!     vm.login("user", "secret", false)?;
//!     let result = vm.run_program("/bin/uname", "-a", true, false)?;
//!     println!("uname exited with {}", result.exit_code);
//!     vm.write_variable(VariableScope::Guest, "run", "done")?;
//!     Ok(())
//! }
//! ```
//!
//! The VIX shared library is loaded at runtime; point `VIX_LIBRARY_PATH`
//! at `libvixAllProducts` if it is not on the default search path.

mod error;
mod ffi;
mod handle;
mod host;
mod job;
mod property;
mod snapshot;
mod types;
mod vm;

pub use error::{Error, ErrorCode, Result};
pub use host::Host;
pub use property::PropertyValue;
pub use snapshot::Snapshot;
pub use types::{
    CloneType, DirEntry, FileInfo, GuestProcess, PowerState, ProgramResult, ServiceProvider,
    SharedFolder, ToolsState, VariableScope,
};
pub use vm::Vm;

// The facade objects travel across thread boundaries (the caller serialises
// use per handle, the objects themselves hold only the shared entry-point
// table and one handle each).
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Host>;
    let _ = assert_send_sync::<Vm>;
    let _ = assert_send_sync::<Snapshot>;
};
