//! Numeric constants of the VIX wire surface.
//!
//! Values are the ones published in `vix.h`; the binding never invents its
//! own numbering. Only the constants this crate actually drives are listed.

#![allow(dead_code)]

use super::{PropertyId, RawHandle};

pub const VIX_INVALID_HANDLE: RawHandle = 0;
pub const VIX_API_VERSION: i32 = -1;

// Property type tags, as reported by Vix_GetPropertyType.
pub const VIX_PROPERTYTYPE_ANY: i32 = 0;
pub const VIX_PROPERTYTYPE_INTEGER: i32 = 1;
pub const VIX_PROPERTYTYPE_STRING: i32 = 2;
pub const VIX_PROPERTYTYPE_BOOL: i32 = 3;
pub const VIX_PROPERTYTYPE_HANDLE: i32 = 4;
pub const VIX_PROPERTYTYPE_INT64: i32 = 5;
pub const VIX_PROPERTYTYPE_BLOB: i32 = 6;

// Property identifiers.
pub const VIX_PROPERTY_NONE: PropertyId = 0;
pub const VIX_PROPERTY_HOST_HOSTTYPE: PropertyId = 50;
pub const VIX_PROPERTY_HOST_API_VERSION: PropertyId = 51;
pub const VIX_PROPERTY_VM_NUM_VCPUS: PropertyId = 101;
pub const VIX_PROPERTY_VM_VMX_PATHNAME: PropertyId = 103;
pub const VIX_PROPERTY_VM_VMTEAM_PATHNAME: PropertyId = 105;
pub const VIX_PROPERTY_VM_MEMORY_SIZE: PropertyId = 106;
pub const VIX_PROPERTY_VM_READ_ONLY: PropertyId = 107;
pub const VIX_PROPERTY_VM_IN_VMTEAM: PropertyId = 128;
pub const VIX_PROPERTY_VM_POWER_STATE: PropertyId = 129;
pub const VIX_PROPERTY_VM_TOOLS_STATE: PropertyId = 152;
pub const VIX_PROPERTY_VM_IS_RUNNING: PropertyId = 196;
pub const VIX_PROPERTY_VM_SUPPORTED_FEATURES: PropertyId = 197;

pub const VIX_PROPERTY_JOB_RESULT_ERROR_CODE: PropertyId = 3000;
pub const VIX_PROPERTY_JOB_RESULT_USER_MESSAGE: PropertyId = 3002;
pub const VIX_PROPERTY_JOB_RESULT_EXIT_CODE: PropertyId = 3004;
pub const VIX_PROPERTY_JOB_RESULT_COMMAND_OUTPUT: PropertyId = 3005;
pub const VIX_PROPERTY_JOB_RESULT_HANDLE: PropertyId = 3010;
pub const VIX_PROPERTY_JOB_RESULT_GUEST_OBJECT_EXISTS: PropertyId = 3011;
pub const VIX_PROPERTY_JOB_RESULT_GUEST_PROGRAM_ELAPSED_TIME: PropertyId = 3017;
pub const VIX_PROPERTY_JOB_RESULT_GUEST_PROGRAM_EXIT_CODE: PropertyId = 3018;
pub const VIX_PROPERTY_JOB_RESULT_ITEM_NAME: PropertyId = 3035;
pub const VIX_PROPERTY_JOB_RESULT_FOUND_ITEM_DESCRIPTION: PropertyId = 3036;
pub const VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_COUNT: PropertyId = 3046;
pub const VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_HOST: PropertyId = 3048;
pub const VIX_PROPERTY_JOB_RESULT_SHARED_FOLDER_FLAGS: PropertyId = 3049;
pub const VIX_PROPERTY_JOB_RESULT_PROCESS_ID: PropertyId = 3051;
pub const VIX_PROPERTY_JOB_RESULT_PROCESS_OWNER: PropertyId = 3052;
pub const VIX_PROPERTY_JOB_RESULT_PROCESS_COMMAND: PropertyId = 3053;
pub const VIX_PROPERTY_JOB_RESULT_FILE_FLAGS: PropertyId = 3054;
pub const VIX_PROPERTY_JOB_RESULT_PROCESS_START_TIME: PropertyId = 3055;
pub const VIX_PROPERTY_JOB_RESULT_VM_VARIABLE_STRING: PropertyId = 3056;
pub const VIX_PROPERTY_JOB_RESULT_PROCESS_BEING_DEBUGGED: PropertyId = 3057;
pub const VIX_PROPERTY_JOB_RESULT_SCREEN_IMAGE_SIZE: PropertyId = 3058;
pub const VIX_PROPERTY_JOB_RESULT_SCREEN_IMAGE_DATA: PropertyId = 3059;
pub const VIX_PROPERTY_JOB_RESULT_FILE_SIZE: PropertyId = 3061;
pub const VIX_PROPERTY_JOB_RESULT_FILE_MOD_TIME: PropertyId = 3062;

pub const VIX_PROPERTY_FOUND_ITEM_LOCATION: PropertyId = 4010;

pub const VIX_PROPERTY_VM_NAME: PropertyId = 4100;
pub const VIX_PROPERTY_VM_GUESTOS: PropertyId = 4101;

pub const VIX_PROPERTY_SNAPSHOT_DISPLAYNAME: PropertyId = 4200;
pub const VIX_PROPERTY_SNAPSHOT_DESCRIPTION: PropertyId = 4201;
pub const VIX_PROPERTY_SNAPSHOT_POWERSTATE: PropertyId = 4205;

pub const VIX_PROPERTY_GUEST_SHAREDFOLDERS_SHARES_PATH: PropertyId = 4525;

// Event types delivered to VixHost_FindItems callbacks.
pub const VIX_EVENTTYPE_FIND_ITEM: i32 = 8;

// Host connection.
pub const VIX_SERVICEPROVIDER_DEFAULT: i32 = 1;
pub const VIX_SERVICEPROVIDER_VMWARE_SERVER: i32 = 2;
pub const VIX_SERVICEPROVIDER_VMWARE_WORKSTATION: i32 = 3;
pub const VIX_SERVICEPROVIDER_VMWARE_PLAYER: i32 = 4;
pub const VIX_SERVICEPROVIDER_VMWARE_VI_SERVER: i32 = 10;

pub const VIX_FIND_RUNNING_VMS: i32 = 1;
pub const VIX_VMOPEN_NORMAL: i32 = 0;

// Power operation option words.
pub const VIX_VMPOWEROP_NORMAL: i32 = 0;
pub const VIX_VMPOWEROP_FROM_GUEST: i32 = 0x0004;
pub const VIX_VMPOWEROP_SUPPRESS_SNAPSHOT_POWERON: i32 = 0x0080;
pub const VIX_VMPOWEROP_LAUNCH_GUI: i32 = 0x0200;
pub const VIX_VMPOWEROP_START_VM_PAUSED: i32 = 0x1000;

pub const VIX_VMDELETE_DISK_FILES: i32 = 0x0002;

// Guest login / program options.
pub const VIX_LOGIN_IN_GUEST_REQUIRE_INTERACTIVE_ENVIRONMENT: i32 = 0x08;
pub const VIX_RUNPROGRAM_RETURN_IMMEDIATELY: i32 = 0x0001;
pub const VIX_RUNPROGRAM_ACTIVATE_WINDOW: i32 = 0x0002;

// Guest variable scopes.
pub const VIX_VM_GUEST_VARIABLE: i32 = 1;
pub const VIX_VM_CONFIG_RUNTIME_ONLY: i32 = 2;
pub const VIX_GUEST_ENVIRONMENT_VARIABLE: i32 = 3;

// Snapshot options.
pub const VIX_SNAPSHOT_REMOVE_CHILDREN: i32 = 0x0001;
pub const VIX_SNAPSHOT_INCLUDE_MEMORY: i32 = 0x0002;

pub const VIX_SHAREDFOLDER_WRITE_ACCESS: i32 = 0x04;

pub const VIX_CAPTURESCREENFORMAT_PNG: i32 = 0x01;

pub const VIX_CLONETYPE_FULL: i32 = 0;
pub const VIX_CLONETYPE_LINKED: i32 = 1;

pub const VIX_INSTALLTOOLS_MOUNT_TOOLS_INSTALLER: i32 = 0x00;
pub const VIX_INSTALLTOOLS_AUTO_UPGRADE: i32 = 0x01;
pub const VIX_INSTALLTOOLS_RETURN_IMMEDIATELY: i32 = 0x02;

// Guest file attribute flags (VIX_PROPERTY_JOB_RESULT_FILE_FLAGS).
pub const VIX_FILE_ATTRIBUTES_DIRECTORY: i32 = 0x0001;
pub const VIX_FILE_ATTRIBUTES_SYMLINK: i32 = 0x0002;
