//! Helper-process fetcher using the external `boiler-writter` binary

use super::exit::HelperExit;
use super::payload::PayloadFile;
use super::traits::MatchFetcher;
use crate::config::{HELPER_BINARY_NAME, HelperConfig};
use crate::error::{Error, HelperError};
use crate::proto::MatchList;
use crate::sharecode::MatchCoordinates;
use async_trait::async_trait;
use prost::Message;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Match fetcher that spawns the `boiler-writter` helper once per call
///
/// The helper is invoked as
/// `<helper> <payload-path> <matchId> <reservationId> <tvPort>`. It talks to
/// the game coordinator and reports its outcome through the exit code. On
/// success it leaves a serialized [`MatchList`] at `<payload-path>`.
///
/// # Examples
///
/// ```no_run
/// use cs_sharecode::boiler::BoilerFetcher;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let fetcher = BoilerFetcher::new(PathBuf::from("/opt/cs/boiler-writter"))
///     .with_timeout(Some(Duration::from_secs(20)));
/// ```
#[derive(Debug, Clone)]
pub struct BoilerFetcher {
    helper: HelperLocation,
    temp_dir: PathBuf,
    timeout: Option<Duration>,
}

/// Where the helper executable comes from
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelperLocation {
    /// Known path, used as is
    Explicit(PathBuf),
    /// Looked up on every call: PATH (if enabled), then next to the executable
    Discover { search_path: bool },
}

impl BoilerFetcher {
    /// Create a fetcher for an explicit helper path
    ///
    /// Payload files go to the OS temp dir and no timeout is applied.
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            helper: HelperLocation::Explicit(binary_path),
            temp_dir: std::env::temp_dir(),
            timeout: None,
        }
    }

    /// Attempt to find the helper in PATH
    pub fn from_path() -> Option<Self> {
        which::which(HELPER_BINARY_NAME).ok().map(Self::new)
    }

    /// Build a fetcher from configuration
    ///
    /// Without an explicit `path`, the helper is located when a fetch
    /// starts: PATH first (if `search_path` is set), then the directory of
    /// the running executable. A missing helper therefore surfaces as
    /// [`Error::ProcessLaunch`] from [`MatchFetcher::fetch_matches`], never
    /// from here.
    pub fn from_config(config: &HelperConfig) -> Self {
        let helper = match &config.path {
            Some(path) => HelperLocation::Explicit(path.clone()),
            None => HelperLocation::Discover {
                search_path: config.search_path,
            },
        };
        Self {
            helper,
            temp_dir: config.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
            timeout: config.timeout,
        }
    }

    /// Directory for transient payload files
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Kill the helper and fail with
    /// [`Error::OperationTimedOut`] if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured helper path, if one was given rather than discovered
    pub fn binary_path(&self) -> Option<&Path> {
        match &self.helper {
            HelperLocation::Explicit(path) => Some(path),
            HelperLocation::Discover { .. } => None,
        }
    }

    fn locate_helper(&self) -> crate::Result<PathBuf> {
        let search_path = match &self.helper {
            HelperLocation::Explicit(path) => return Ok(path.clone()),
            HelperLocation::Discover { search_path } => *search_path,
        };

        if search_path {
            if let Ok(path) = which::which(HELPER_BINARY_NAME) {
                return Ok(path);
            }
        }

        let sibling = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(HELPER_BINARY_NAME)));
        if let Some(path) = sibling.filter(|p| p.is_file()) {
            return Ok(path);
        }

        Err(Error::ProcessLaunch {
            path: PathBuf::from(HELPER_BINARY_NAME),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "helper executable not configured, not in PATH and not next to the executable",
            ),
        })
    }
}

async fn read_payload(payload: &PayloadFile) -> crate::Result<MatchList> {
    let bytes = tokio::fs::read(payload.path()).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::PayloadDecode(format!(
                "matches info file not found at {}",
                payload.path().display()
            ))
        } else {
            Error::PayloadDecode(format!(
                "failed to read {}: {}",
                payload.path().display(),
                e
            ))
        }
    })?;

    MatchList::decode(bytes.as_slice())
        .map_err(|e| Error::PayloadDecode(format!("invalid match list message: {e}")))
}

#[async_trait]
impl MatchFetcher for BoilerFetcher {
    async fn fetch_matches(&self, coordinates: &MatchCoordinates) -> crate::Result<MatchList> {
        let binary_path = self.locate_helper()?;
        // Dropping the guard removes the payload on every return path below.
        let payload = PayloadFile::unique_in(&self.temp_dir);

        tracing::debug!(
            helper = ?binary_path,
            payload = ?payload.path(),
            match_id = coordinates.match_id,
            reservation_id = coordinates.reservation_id,
            tv_port = coordinates.tv_port,
            "starting helper process"
        );

        let child = Command::new(&binary_path)
            .arg(payload.path())
            .arg(coordinates.match_id.to_string())
            .arg(coordinates.reservation_id.to_string())
            .arg(coordinates.tv_port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::ProcessLaunch {
                path: binary_path.clone(),
                source,
            })?;

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| {
                    tracing::warn!(helper = ?binary_path, timeout = ?limit, "helper timed out, killing it");
                    Error::OperationTimedOut { after: limit }
                })?,
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|e| {
            tracing::warn!(helper = ?binary_path, error = %e, "failed to wait for helper");
            Error::Helper(HelperError::Unknown { code: None })
        })?;

        let code = output.status.code();
        tracing::debug!(
            code = ?code,
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "helper process exited"
        );

        match HelperExit::from_code(code) {
            HelperExit::Success => read_payload(&payload).await,
            HelperExit::Failed(error) => {
                tracing::warn!(code = ?code, error = %error, "helper reported failure");
                Err(error.into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "boiler-writter"
    }
}
