//! Share code resolution pipeline
//!
//! [`ShareCodeResolver::resolve`] chains codec → helper → normalizer → link
//! probe and stops at the first failure.

use crate::boiler::{BoilerFetcher, MatchFetcher};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::link::{HttpLinkChecker, LinkChecker};
use crate::sharecode::{self, ShareCodeError};
use crate::types::DownloadResult;
use crate::valve_match::normalize;
use std::sync::Arc;

/// Progress output: `info` normally, `debug` in quiet mode.
macro_rules! progress {
    ($quiet:expr, $($arg:tt)+) => {
        if $quiet {
            tracing::debug!($($arg)+)
        } else {
            tracing::info!($($arg)+)
        }
    };
}

/// Resolves share codes into verified demo download results
///
/// Holds no per-call state; clone it freely or share it behind an `Arc`.
/// Concurrent calls each spawn their own helper process.
///
/// # Examples
///
/// ```no_run
/// use cs_sharecode::{Config, ShareCodeResolver};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = ShareCodeResolver::from_config(&Config::default())?;
/// let result = resolver
///     .resolve("CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK", false)
///     .await?;
/// println!("{} -> {}", result.file_name, result.demo_url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ShareCodeResolver {
    fetcher: Arc<dyn MatchFetcher>,
    link_checker: Arc<dyn LinkChecker>,
}

impl ShareCodeResolver {
    /// Create a resolver from explicit collaborators
    pub fn new(fetcher: Arc<dyn MatchFetcher>, link_checker: Arc<dyn LinkChecker>) -> Self {
        Self {
            fetcher,
            link_checker,
        }
    }

    /// Create a resolver backed by the helper process and an HTTP probe
    ///
    /// The helper is located per call, after the share code is decoded, so
    /// this only fails if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = BoilerFetcher::from_config(&config.helper);
        let link_checker = HttpLinkChecker::new(&config.link_check)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(link_checker)))
    }

    /// Resolve a share code into a verified download result
    ///
    /// `quiet` only lowers the level of progress logging; control flow and
    /// errors are identical.
    ///
    /// When the helper returns several matches the first one is used.
    pub async fn resolve(&self, share_code: &str, quiet: bool) -> Result<DownloadResult> {
        let coordinates = sharecode::decode(share_code).map_err(|e| match e {
            ShareCodeError::InvalidFormat => Error::InvalidShareCode(share_code.to_string()),
            other => {
                tracing::debug!(share_code = %share_code, error = %other, "share code decode failed");
                Error::DecodeShareCode(share_code.to_string())
            }
        })?;

        progress!(
            quiet,
            match_id = coordinates.match_id,
            fetcher = self.fetcher.name(),
            "connecting to Steam to fetch match information"
        );

        let list = self.fetcher.fetch_matches(&coordinates).await?;

        let Some(record) = list.matches.first() else {
            return Err(Error::NoMatchesFound);
        };
        if list.matches.len() > 1 {
            tracing::debug!(count = list.matches.len(), "helper returned several matches, using the first");
        }

        let valve_match = normalize(record)?;

        if valve_match.demo_url.trim().is_empty() {
            return Err(Error::DownloadLinkExpired);
        }

        progress!(quiet, demo_url = %valve_match.demo_url, "demo URL found, checking whether the download link is still valid");

        if self.link_checker.is_expired(&valve_match.demo_url).await {
            return Err(Error::DownloadLinkExpired);
        }

        if valve_match.share_code != share_code.trim() {
            tracing::debug!(
                input = %share_code,
                canonical = %valve_match.share_code,
                "re-derived share code differs from input"
            );
        }

        Ok(DownloadResult::from(valve_match))
    }
}
