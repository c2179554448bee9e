//! # cs-sharecode
//!
//! Resolve Counter-Strike match share codes into demo download information.
//!
//! A share code (`CSGO-xxxxx-xxxxx-xxxxx-xxxxx-xxxxx`) encodes the triple
//! (match id, reservation id, TV port). This crate decodes it, asks the
//! external `boiler-writter` helper to fetch the match record from the game
//! coordinator, normalizes that record and checks that the demo archive can
//! still be downloaded.
//!
//! ## Quick Start
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = cs_sharecode::resolve("CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK", false).await?;
//!
//!     println!("{} on {} ({})", result.match_id, result.map_name, result.game);
//!     println!("demo: {}", result.demo_url);
//!     Ok(())
//! }
//! ```
//!
//! Use [`ShareCodeResolver`] directly to supply your own [`Config`], or to
//! swap the helper process or the link probe for other implementations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Helper process orchestration
pub mod boiler;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Demo link liveness probe
pub mod link;
/// Map name lookup
pub mod maps;
/// Game-coordinator protobuf messages
#[allow(missing_docs)]
pub mod proto;
/// Share code resolution pipeline
pub mod resolver;
/// Retry logic with exponential backoff
pub mod retry;
/// Share code codec
pub mod sharecode;
/// Public result types
pub mod types;
/// Match record normalization
pub mod valve_match;

// Re-export commonly used types
pub use boiler::{BoilerFetcher, MatchFetcher};
pub use config::Config;
pub use error::{Error, HelperError, Result};
pub use link::{HttpLinkChecker, LinkChecker};
pub use resolver::ShareCodeResolver;
pub use sharecode::MatchCoordinates;
pub use types::DownloadResult;
pub use valve_match::{Game, MatchResult, ValveMatch};

/// Resolve a share code with the default configuration
///
/// Equivalent to building a [`ShareCodeResolver`] from [`Config::default`]
/// and calling [`ShareCodeResolver::resolve`]. A malformed share code fails
/// with [`Error::InvalidShareCode`] before the helper is looked up; a
/// missing helper fails with [`Error::ProcessLaunch`].
pub async fn resolve(share_code: &str, quiet: bool) -> Result<DownloadResult> {
    ShareCodeResolver::from_config(&Config::default())?
        .resolve(share_code, quiet)
        .await
}
