//! Helper exit-code contract

use crate::error::HelperError;

/// Terminal state of one helper invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperExit {
    /// Exit code 0: the payload file was written
    Success,
    /// Any other outcome
    Failed(HelperError),
}

impl HelperExit {
    /// Map a process exit code to its outcome
    ///
    /// `None` means the process was terminated without an exit code (e.g. by
    /// a signal) and maps to [`HelperError::Unknown`].
    pub fn from_code(code: Option<i32>) -> Self {
        let error = match code {
            Some(0) => return HelperExit::Success,
            Some(1) => HelperError::Generic,
            Some(2) => HelperError::InvalidArgs,
            Some(3) => HelperError::CommunicationFailure,
            Some(4) => HelperError::AlreadyConnected,
            Some(5) => HelperError::RestartRequired,
            Some(6) => HelperError::NotRunningOrLoggedIn,
            Some(7) => HelperError::UserNotLoggedIn,
            Some(8) => HelperError::NoMatches,
            Some(9) => HelperError::WriteFailure,
            other => HelperError::Unknown { code: other },
        };
        HelperExit::Failed(error)
    }

    /// Whether the helper reported success
    pub fn is_success(&self) -> bool {
        matches!(self, HelperExit::Success)
    }
}
