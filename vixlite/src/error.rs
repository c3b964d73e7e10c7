//! Error types for the VIX binding.
//!
//! The foreign layer reports failures as a packed 64-bit value whose low 16
//! bits carry the error code proper; the remaining bits are flags that must
//! be stripped before the code is interpreted. Every foreign failure is
//! surfaced as [`Error::Vix`] with the classified code and the message text
//! resolved through `Vix_GetErrorText`.

use crate::ffi::VixApi;

/// Result type alias for VIX operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the VIX API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A foreign call or job reported a non-zero error code.
    #[error("{text} (code {})", .code.as_raw())]
    Vix { code: ErrorCode, text: String },

    /// The foreign layer reported a property type this binding does not know
    /// how to decode.
    #[error("property {property} reported unsupported type tag {tag}")]
    UnsupportedPropertyType { property: i32, tag: i32 },

    /// A completed job did not carry a property the operation requires.
    #[error("job result is missing property {0}")]
    MissingJobResult(i32),

    /// A job result property decoded to a different shape than the
    /// operation expects.
    #[error("job result property {property} is not {expected}")]
    UnexpectedResultType {
        property: i32,
        expected: &'static str,
    },

    /// A string argument contained an interior NUL byte and cannot cross
    /// the C boundary.
    #[error("argument contains an interior NUL byte")]
    InvalidCString(#[from] std::ffi::NulError),

    /// The VIX shared library could not be located or loaded.
    #[error("failed to load the VIX library: {0}")]
    Library(String),
}

impl Error {
    /// The classified VIX error code, if this error came from the foreign
    /// layer.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Vix { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Build an [`Error::Vix`] from a raw foreign error value, masking the
    /// packed flag bits and resolving the message text.
    pub(crate) fn vix(api: &dyn VixApi, raw: u64) -> Error {
        let masked = mask(raw);
        Error::Vix {
            code: ErrorCode::from_raw(masked),
            text: api.error_text(masked as u64),
        }
    }
}

/// Strip the packed flag bits down to the 16-bit error code.
pub(crate) fn mask(raw: u64) -> u16 {
    (raw & 0xFFFF) as u16
}

/// Check a raw foreign error value, converting failures into [`Error::Vix`].
pub(crate) fn check(api: &dyn VixApi, raw: u64) -> Result<()> {
    if mask(raw) == 0 {
        Ok(())
    } else {
        Err(Error::vix(api, raw))
    }
}

macro_rules! error_codes {
    ($($name:ident = $value:literal,)+) => {
        /// The VIX error-code enumeration.
        ///
        /// Codes this binding does not know fold into [`ErrorCode::Unknown`]
        /// so a newer library never turns into a panic.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($name,)+
            Unknown(u16),
        }

        impl ErrorCode {
            pub fn from_raw(code: u16) -> Self {
                match code {
                    $($value => ErrorCode::$name,)+
                    other => ErrorCode::Unknown(other),
                }
            }

            pub fn as_raw(self) -> u16 {
                match self {
                    $(ErrorCode::$name => $value,)+
                    ErrorCode::Unknown(code) => code,
                }
            }
        }
    };
}

error_codes! {
    Fail = 1,
    OutOfMemory = 2,
    InvalidArg = 3,
    FileNotFound = 4,
    ObjectIsBusy = 5,
    NotSupported = 6,
    FileError = 7,
    DiskFull = 8,
    IncorrectFileType = 9,
    Cancelled = 10,
    FileReadOnly = 11,
    FileAlreadyExists = 12,
    FileAccessError = 13,
    RequiresLargeFiles = 14,
    FileAlreadyLocked = 15,
    Vmdb = 16,
    NotSupportedOnRemoteObject = 20,
    FileTooBig = 21,
    FileNameInvalid = 22,
    AlreadyExists = 23,
    BufferTooSmall = 24,
    ObjectNotFound = 25,
    HostNotConnected = 26,
    InvalidUtf8String = 27,
    UnfinishedJob = 29,
    NeedKey = 30,
    OperationAlreadyInProgress = 31,
    License = 32,
    VmHostDisconnected = 34,
    AuthenticationFail = 35,
    HostConnectionLost = 36,
    InvalidHandle = 1000,
    NotSupportedOnHandleType = 1001,
    TooManyHandles = 1002,
    NotFound = 2000,
    TypeMismatch = 2001,
    InvalidXml = 2002,
    TimeoutWaitingForTools = 3000,
    UnrecognizedCommand = 3001,
    OpNotSupportedOnGuest = 3003,
    ProgramNotStarted = 3004,
    CannotStartReadOnlyVm = 3005,
    VmNotRunning = 3006,
    VmIsRunning = 3007,
    CannotConnectToVm = 3008,
    PowerOpScriptsNotAvailable = 3009,
    NoGuestOsInstalled = 3010,
    VmInsufficientHostMemory = 3011,
    SuspendError = 3012,
    VmNotEnoughCpus = 3013,
    HostUserPermissions = 3014,
    GuestUserPermissions = 3015,
    ToolsNotRunning = 3016,
    GuestOperationsProhibited = 3017,
    AnonGuestOperationsProhibited = 3018,
    RootGuestOperationsProhibited = 3019,
    MissingAnonGuestAccount = 3023,
    CannotAuthenticateWithGuest = 3024,
    UnrecognizedCommandInGuest = 3025,
    ConsoleGuestOperationsProhibited = 3026,
    MustBeConsoleUser = 3027,
    VmxMsgDialogAndNoUi = 3028,
    NotAllowedDuringVmRecording = 3029,
    NotAllowedDuringVmReplay = 3030,
    OperationNotAllowedForLoginType = 3031,
    LoginTypeNotSupported = 3032,
    EmptyPasswordNotAllowedInGuest = 3033,
    InteractiveSessionNotPresent = 3034,
    InteractiveSessionUserMismatch = 3035,
    UnableToReplayVm = 3039,
    CannotPowerOnVm = 3041,
    NoDisplayServer = 3043,
    VmNotRecording = 3044,
    VmNotReplaying = 3045,
    VmNotFound = 4000,
    NotSupportedForVmVersion = 4001,
    CannotReadVmConfig = 4002,
    TemplateVm = 4003,
    VmAlreadyLoaded = 4004,
    VmAlreadyUpToDate = 4006,
    UnrecognizedProperty = 6000,
    InvalidPropertyValue = 6001,
    ReadOnlyProperty = 6002,
    MissingRequiredProperty = 6003,
    InvalidSerializedData = 6004,
    PropertyTypeMismatch = 6005,
    BadVmIndex = 8000,
    InvalidMessageHeader = 10000,
    InvalidMessageBody = 10001,
    SnapshotInval = 13000,
    SnapshotDumper = 13001,
    SnapshotDisklib = 13002,
    SnapshotNotFound = 13003,
    SnapshotExists = 13004,
    SnapshotVersion = 13005,
    SnapshotNoPerm = 13006,
    SnapshotConfig = 13007,
    SnapshotNoChange = 13008,
    SnapshotCheckpoint = 13009,
    SnapshotLocked = 13010,
    SnapshotInconsistent = 13011,
    SnapshotNameTooLong = 13012,
    SnapshotVixFile = 13013,
    SnapshotDiskLocked = 13014,
    SnapshotDuplicatedDisk = 13015,
    SnapshotIndependentDisk = 13016,
    SnapshotNonUniqueName = 13017,
    SnapshotMemoryOnIndependentDisk = 13018,
    SnapshotMaxSnapshots = 13019,
    SnapshotMinFreeSpace = 13020,
    SnapshotRrSuspend = 13021,
    HostDiskInvalidValue = 14003,
    HostDiskSectorSize = 14004,
    HostFileErrorEof = 14005,
    HostNetBlkDevHandshake = 14006,
    HostSocketCreationError = 14007,
    HostServerNotFound = 14008,
    HostNetworkConnRefused = 14009,
    HostTcpSocketError = 14010,
    HostTcpConnLost = 14011,
    HostNbdHashFileVolume = 14012,
    HostNbdHashFileInit = 14013,
    DiskInval = 16000,
    DiskNoInit = 16001,
    DiskNoIo = 16002,
    DiskPartialChain = 16003,
    DiskNeedsRepair = 16006,
    DiskOutOfRange = 16007,
    DiskCidMismatch = 16008,
    DiskCantShrink = 16009,
    DiskPartMismatch = 16010,
    DiskUnsupportedDiskVersion = 16011,
    DiskOpenParent = 16012,
    DiskNotSupported = 16013,
    DiskNeedKey = 16014,
    DiskNoKeyOverride = 16015,
    DiskNotEncrypted = 16016,
    DiskNoKey = 16017,
    DiskInvalidPartitionTable = 16018,
    DiskNotNormal = 16019,
    DiskNotEncDesc = 16020,
    DiskNeedVmfs = 16022,
    DiskRawTooBig = 16024,
    DiskTooManyOpenFiles = 16027,
    DiskTooManyRedo = 16028,
    DiskRawTooSmall = 16029,
    DiskInvalidChain = 16030,
    DiskKeyNotFound = 16052,
    DiskSubsystemInitFail = 16053,
    DiskInvalidConnection = 16054,
    DiskEncoding = 16061,
    DiskCantRepair = 16062,
    DiskInvalidDisk = 16063,
    DiskNoLicense = 16064,
    DiskNoDevice = 16065,
    DiskUnsupportedDevice = 16066,
    CryptoUnknownAlgorithm = 17000,
    CryptoBadBufferSize = 17001,
    CryptoInvalidOperation = 17002,
    CryptoRandomDevice = 17003,
    CryptoNeedPassword = 17004,
    CryptoBadPassword = 17005,
    CryptoNotInDictionary = 17006,
    CryptoNoCrypto = 17007,
    CryptoError = 17008,
    CryptoBadFormat = 17009,
    CryptoLocked = 17010,
    CryptoEmpty = 17011,
    CryptoKeysafeLocator = 17012,
    CannotConnectToHost = 18000,
    NotForRemoteHost = 18001,
    InvalidHostnameSpecification = 18002,
    ScreenCaptureError = 19000,
    ScreenCaptureBadFormat = 19001,
    ScreenCaptureCompressionFail = 19002,
    ScreenCaptureLargeData = 19003,
    GuestVolumesNotFrozen = 20000,
    NotAFile = 20001,
    NotADirectory = 20002,
    NoSuchProcess = 20003,
    FileNameTooLong = 20004,
    ToolsInstallNoImage = 21000,
    ToolsInstallImageInaccessible = 21001,
    ToolsInstallNoDevice = 21002,
    ToolsInstallDeviceNotConnected = 21003,
    ToolsInstallCancelled = 21004,
    ToolsInstallInitFailed = 21005,
    ToolsInstallAutoNotSupported = 21006,
    ToolsInstallGuestNotReady = 21007,
    ToolsInstallSigCheckFailed = 21008,
    ToolsInstallError = 21009,
    ToolsInstallAlreadyUpToDate = 21010,
    ToolsInstallInProgress = 21011,
    WrapperWorkstationNotInstalled = 22001,
    WrapperVersionNotFound = 22002,
    WrapperServiceProviderNotFound = 22003,
    WrapperPlayerNotInstalled = 22004,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::Unknown(code) => write!(f, "Unknown({code})"),
            other => write!(f, "{other:?}"),
        }
    }
}
