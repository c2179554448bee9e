//! Trait for fetching raw match lists

use crate::proto::MatchList;
use crate::sharecode::MatchCoordinates;
use async_trait::async_trait;

/// Source of raw match records for a set of match coordinates
///
/// The production implementation is
/// [`BoilerFetcher`](super::BoilerFetcher), which drives the external helper
/// process. Tests and embedders can supply their own implementation to feed
/// fixture payloads into the resolver.
///
/// # Examples
///
/// ```no_run
/// use cs_sharecode::boiler::{BoilerFetcher, MatchFetcher};
/// use cs_sharecode::sharecode;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = BoilerFetcher::from_path().expect("boiler-writter not found");
/// let coords = sharecode::decode("CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK")?;
/// let list = fetcher.fetch_matches(&coords).await?;
/// println!("{} match(es)", list.matches.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MatchFetcher: Send + Sync {
    /// Fetch the match list for the given coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The helper cannot be started ([`Error::ProcessLaunch`](crate::Error::ProcessLaunch))
    /// - The helper exits with a failure code ([`Error::Helper`](crate::Error::Helper))
    /// - The payload is missing or malformed ([`Error::PayloadDecode`](crate::Error::PayloadDecode))
    /// - The configured timeout fires ([`Error::OperationTimedOut`](crate::Error::OperationTimedOut))
    async fn fetch_matches(&self, coordinates: &MatchCoordinates) -> crate::Result<MatchList>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
