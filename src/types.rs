//! Core result types

use crate::valve_match::{Game, ValveMatch};
use serde::{Deserialize, Serialize};

/// Caller-facing result of resolving a share code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
    /// Match id, as a decimal string
    pub match_id: String,
    /// Engine edition (`"csgo"` or `"cs2"`)
    pub game: Game,
    /// Decoded map name, or `"Unknown"`
    pub map_name: String,
    /// Match date, ISO-8601 with milliseconds
    pub date: String,
    /// Verified demo download URL
    pub demo_url: String,
    /// Suggested file name for the demo
    pub file_name: String,
    /// Canonical share code re-derived from the match record
    pub share_code: String,
}

impl From<ValveMatch> for DownloadResult {
    fn from(m: ValveMatch) -> Self {
        let date = m.date_iso();
        Self {
            match_id: m.id,
            game: m.game,
            map_name: m.map_name,
            date,
            demo_url: m.demo_url,
            file_name: m.name,
            share_code: m.share_code,
        }
    }
}
