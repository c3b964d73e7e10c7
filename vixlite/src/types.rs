//! Public value types: selectors, state words and result records.

use std::fmt;

use crate::ffi::consts;

/// The hypervisor product backing a host connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceProvider {
    Default,
    Server,
    #[default]
    Workstation,
    Player,
    ViServer,
}

impl ServiceProvider {
    pub(crate) fn as_raw(self) -> i32 {
        match self {
            ServiceProvider::Default => consts::VIX_SERVICEPROVIDER_DEFAULT,
            ServiceProvider::Server => consts::VIX_SERVICEPROVIDER_VMWARE_SERVER,
            ServiceProvider::Workstation => consts::VIX_SERVICEPROVIDER_VMWARE_WORKSTATION,
            ServiceProvider::Player => consts::VIX_SERVICEPROVIDER_VMWARE_PLAYER,
            ServiceProvider::ViServer => consts::VIX_SERVICEPROVIDER_VMWARE_VI_SERVER,
        }
    }
}

/// Which namespace a guest variable lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    /// Runtime variables shared between host and guest ("guestinfo").
    Guest,
    /// The VM's runtime configuration.
    ConfigRuntime,
    /// Environment variables of the logged-in guest user.
    GuestEnvironment,
}

impl VariableScope {
    pub(crate) fn as_raw(self) -> i32 {
        match self {
            VariableScope::Guest => consts::VIX_VM_GUEST_VARIABLE,
            VariableScope::ConfigRuntime => consts::VIX_VM_CONFIG_RUNTIME_ONLY,
            VariableScope::GuestEnvironment => consts::VIX_GUEST_ENVIRONMENT_VARIABLE,
        }
    }
}

/// Full or linked clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneType {
    #[default]
    Full,
    Linked,
}

impl CloneType {
    pub(crate) fn as_raw(self) -> i32 {
        match self {
            CloneType::Full => consts::VIX_CLONETYPE_FULL,
            CloneType::Linked => consts::VIX_CLONETYPE_LINKED,
        }
    }
}

/// The VM power state word.
///
/// This is a bit set, not a plain enumeration, and the foreign layer may
/// grow new bits; unknown bits are kept verbatim rather than rejected.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PowerState(i32);

impl PowerState {
    pub const POWERING_OFF: i32 = 0x0001;
    pub const POWERED_OFF: i32 = 0x0002;
    pub const POWERING_ON: i32 = 0x0004;
    pub const POWERED_ON: i32 = 0x0008;
    pub const SUSPENDING: i32 = 0x0010;
    pub const SUSPENDED: i32 = 0x0020;
    pub const TOOLS_RUNNING: i32 = 0x0040;
    pub const RESETTING: i32 = 0x0080;
    pub const BLOCKED_ON_MSG: i32 = 0x0100;
    pub const PAUSED: i32 = 0x0200;
    pub const RESUMING: i32 = 0x0800;

    pub fn from_bits(bits: i32) -> Self {
        PowerState(bits)
    }

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn contains(self, flag: i32) -> bool {
        self.0 & flag != 0
    }

    pub fn is_powered_on(self) -> bool {
        self.contains(Self::POWERED_ON)
    }

    pub fn is_powered_off(self) -> bool {
        self.contains(Self::POWERED_OFF)
    }

    pub fn is_suspended(self) -> bool {
        self.contains(Self::SUSPENDED)
    }

    pub fn is_paused(self) -> bool {
        self.contains(Self::PAUSED)
    }

    pub fn tools_running(self) -> bool {
        self.contains(Self::TOOLS_RUNNING)
    }
}

const POWER_STATE_NAMES: &[(i32, &str)] = &[
    (PowerState::POWERING_OFF, "powering-off"),
    (PowerState::POWERED_OFF, "powered-off"),
    (PowerState::POWERING_ON, "powering-on"),
    (PowerState::POWERED_ON, "powered-on"),
    (PowerState::SUSPENDING, "suspending"),
    (PowerState::SUSPENDED, "suspended"),
    (PowerState::TOOLS_RUNNING, "tools-running"),
    (PowerState::RESETTING, "resetting"),
    (PowerState::BLOCKED_ON_MSG, "blocked-on-msg"),
    (PowerState::PAUSED, "paused"),
    (PowerState::RESUMING, "resuming"),
];

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut remaining = self.0;
        let mut first = true;
        for &(flag, name) in POWER_STATE_NAMES {
            if self.0 & flag != 0 {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
                remaining &= !flag;
            }
        }
        if remaining != 0 || first {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "unknown(0x{remaining:x})")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PowerState({self})")
    }
}

/// State of the guest tools service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsState {
    Unknown,
    Running,
    NotInstalled,
    /// A value this binding does not know; kept verbatim.
    Other(i32),
}

impl ToolsState {
    pub(crate) fn from_raw(raw: i32) -> Self {
        match raw {
            0x0001 => ToolsState::Unknown,
            0x0002 => ToolsState::Running,
            0x0004 => ToolsState::NotInstalled,
            other => ToolsState::Other(other),
        }
    }
}

/// One process running in the guest.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestProcess {
    pub name: String,
    pub pid: u64,
    pub owner: String,
    pub command: String,
    pub is_debugged: bool,
    /// Seconds since the epoch, as reported by the guest tools.
    pub start_time: i64,
}

/// Outcome of running a program or script in the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramResult {
    pub pid: u64,
    /// Meaningful only when the call waited for guest-side completion.
    pub exit_code: i32,
}

/// Metadata of one guest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub size: i64,
    pub flags: i32,
    /// Modification time, seconds since the epoch.
    pub mod_time: i64,
}

impl FileInfo {
    pub fn is_directory(&self) -> bool {
        self.flags & consts::VIX_FILE_ATTRIBUTES_DIRECTORY != 0
    }

    pub fn is_symlink(&self) -> bool {
        self.flags & consts::VIX_FILE_ATTRIBUTES_SYMLINK != 0
    }
}

/// One entry of a guest directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub flags: i32,
}

impl DirEntry {
    pub fn is_directory(&self) -> bool {
        self.flags & consts::VIX_FILE_ATTRIBUTES_DIRECTORY != 0
    }

    pub fn is_symlink(&self) -> bool {
        self.flags & consts::VIX_FILE_ATTRIBUTES_SYMLINK != 0
    }
}

/// Configuration of one shared folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFolder {
    pub name: String,
    pub host_path: String,
    pub writable: bool,
}
