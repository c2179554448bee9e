//! Error types for cs-sharecode
//!
//! Every failure of the resolution pipeline surfaces as exactly one [`Error`]
//! variant. Helper-process exit codes get their own nested [`HelperError`]
//! so that the exit-code table stays a closed set of named outcomes.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for cs-sharecode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cs-sharecode
#[derive(Debug, Error)]
pub enum Error {
    /// The share code does not have the expected shape or alphabet
    #[error("invalid share code: {0}")]
    InvalidShareCode(String),

    /// The share code is well-formed but could not be decoded
    #[error("error decoding share code: {0}")]
    DecodeShareCode(String),

    /// The helper executable could not be located or started
    #[error("failed to launch helper {path}: {source}")]
    ProcessLaunch {
        /// Path of the helper that was attempted
        path: PathBuf,
        /// Underlying launch error
        #[source]
        source: std::io::Error,
    },

    /// The helper exited with a non-success code
    #[error(transparent)]
    Helper(#[from] HelperError),

    /// The match-list payload was missing or could not be deserialized
    #[error("failed to decode match payload: {0}")]
    PayloadDecode(String),

    /// The helper succeeded but the match list was empty
    #[error("no matches found for the provided share code")]
    NoMatchesFound,

    /// The demo URL is blank or no longer retrievable
    #[error("download link has expired")]
    DownloadLinkExpired,

    /// A caller-imposed timeout fired while waiting on the helper
    #[error("operation timed out after {after:?}")]
    OperationTimedOut {
        /// The timeout that elapsed
        after: Duration,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "helper.path")
        key: Option<String>,
    },
}

/// Failures reported by the helper process through its exit code
///
/// Each variant corresponds to one row of the helper's exit-code contract.
/// Codes outside the table, and terminations without a code, become
/// [`HelperError::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HelperError {
    /// Exit code 1
    #[error("helper failed with a generic error")]
    Generic,

    /// Exit code 2
    #[error("invalid arguments provided to helper")]
    InvalidArgs,

    /// Exit code 3
    #[error("failed to communicate with Steam")]
    CommunicationFailure,

    /// Exit code 4
    #[error("already connected to Steam")]
    AlreadyConnected,

    /// Exit code 5
    #[error("Steam restart required")]
    RestartRequired,

    /// Exit code 6
    #[error("Steam is not running or user is not logged in")]
    NotRunningOrLoggedIn,

    /// Exit code 7
    #[error("user not logged in to Steam")]
    UserNotLoggedIn,

    /// Exit code 8
    #[error("helper reported no matches for the given coordinates")]
    NoMatches,

    /// Exit code 9
    #[error("helper failed to write matches info file")]
    WriteFailure,

    /// Any other exit code, or no exit code at all (killed by a signal)
    #[error("unknown error occurred while fetching match data (exit code {code:?})")]
    Unknown {
        /// The raw exit code, if the process reported one
        code: Option<i32>,
    },
}

impl HelperError {
    /// The exit code this failure was mapped from
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            HelperError::Generic => Some(1),
            HelperError::InvalidArgs => Some(2),
            HelperError::CommunicationFailure => Some(3),
            HelperError::AlreadyConnected => Some(4),
            HelperError::RestartRequired => Some(5),
            HelperError::NotRunningOrLoggedIn => Some(6),
            HelperError::UserNotLoggedIn => Some(7),
            HelperError::NoMatches => Some(8),
            HelperError::WriteFailure => Some(9),
            HelperError::Unknown { code } => *code,
        }
    }
}

impl Error {
    /// Stable, machine-readable identifier for this error kind
    ///
    /// Outer layers (CLI, HTTP front ends) can match on this instead of the
    /// human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidShareCode(_) => "invalid_share_code",
            Error::DecodeShareCode(_) => "decode_error",
            Error::ProcessLaunch { .. } => "process_launch_failure",
            Error::Helper(helper) => match helper {
                HelperError::Generic => "generic_failure",
                HelperError::InvalidArgs => "invalid_args",
                HelperError::CommunicationFailure => "communication_failure",
                HelperError::AlreadyConnected => "already_connected",
                HelperError::RestartRequired => "restart_required",
                HelperError::NotRunningOrLoggedIn => "not_running_or_logged_in",
                HelperError::UserNotLoggedIn => "user_not_logged_in",
                HelperError::NoMatches => "no_matches_from_helper",
                HelperError::WriteFailure => "write_failure",
                HelperError::Unknown { .. } => "unknown_helper_error",
            },
            Error::PayloadDecode(_) => "payload_decode_failure",
            Error::NoMatchesFound => "no_matches_found",
            Error::DownloadLinkExpired => "download_link_expired",
            Error::OperationTimedOut { .. } => "operation_timed_out",
            Error::Config { .. } => "config_error",
        }
    }
}
