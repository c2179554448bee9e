//! Helper process orchestration
//!
//! Match records come from an external helper (`boiler-writter`) that speaks
//! the game-coordinator protocol on our behalf. This module spawns it, maps
//! its exit code onto a closed set of outcomes, and decodes the payload it
//! leaves behind.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MatchFetcher`] trait. [`BoilerFetcher`] is
//! the process-backed implementation; the resolver only depends on the trait,
//! so normalization and the pipeline can be exercised with fixture payloads.
//!
//! ## Usage
//!
//! ```no_run
//! use cs_sharecode::boiler::{BoilerFetcher, MatchFetcher};
//! use cs_sharecode::sharecode::MatchCoordinates;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = BoilerFetcher::from_path().expect("boiler-writter not found");
//!     let coords = MatchCoordinates {
//!         match_id: 3230642215713767580,
//!         reservation_id: 3230647599455273103,
//!         tv_port: 55788,
//!     };
//!
//!     let list = fetcher.fetch_matches(&coords).await?;
//!     for m in &list.matches {
//!         println!("match {:?}", m.matchid);
//!     }
//!     Ok(())
//! }
//! ```

mod cli;
mod exit;
mod payload;
mod traits;

pub use cli::BoilerFetcher;
pub use exit::HelperExit;
pub use payload::PayloadFile;
pub use traits::MatchFetcher;
