//! Normalization of raw match records
//!
//! [`normalize`] turns one decoded [`MatchInfo`] into a [`ValveMatch`]. It is a
//! pure function of its input: no I/O, no clock, no network.

use crate::error::{Error, Result};
use crate::maps::map_name;
use crate::proto::{MatchInfo, RoundStats, TournamentTeam};
use crate::sharecode::{self, MatchCoordinates};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public CS2 release (2023-09-27T00:00:00Z) in unix milliseconds
pub const CS2_RELEASE_MILLIS: i64 = 1_695_772_800_000;

const DEFAULT_TEAM_NAME_CT: &str = "Team CT";
const DEFAULT_TEAM_NAME_T: &str = "Team T";

/// Engine edition a match was played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    /// Legacy edition, matches before the CS2 release
    Csgo,
    /// Current edition, matches at or after the CS2 release
    Cs2,
}

impl Game {
    /// Classify a match date against the CS2 release cutoff
    pub fn from_date(date: DateTime<Utc>) -> Self {
        if date.timestamp_millis() >= CS2_RELEASE_MILLIS {
            Game::Cs2
        } else {
            Game::Csgo
        }
    }

    /// Wire name of the edition
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::Csgo => "csgo",
            Game::Cs2 => "cs2",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final outcome of a match, relative to the starting sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// Neither team won
    Tied,
    /// The team that started as T won
    TWon,
    /// The team that started as CT won
    CtWon,
}

/// A normalized match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveMatch {
    /// Match id, as a decimal string
    pub id: String,
    /// Engine edition
    pub game: Game,
    /// Suggested demo file name
    pub name: String,
    /// Decoded map name, or `"Unknown"`
    pub map_name: String,
    /// Match start time
    pub date: DateTime<Utc>,
    /// Match duration in seconds
    pub duration_in_seconds: i32,
    /// Final score of the team that started as CT
    pub score_team_started_ct: i32,
    /// Final score of the team that started as T
    pub score_team_started_t: i32,
    /// Match outcome
    pub result: MatchResult,
    /// Name of the team that started as CT
    pub team_name_started_ct: String,
    /// Name of the team that started as T
    pub team_name_started_t: String,
    /// Sum of the per-player kill counts
    pub kill_count: i64,
    /// Sum of the per-player assist counts
    pub assist_count: i64,
    /// Sum of the per-player death counts
    pub death_count: i64,
    /// Authoritative demo download URL
    pub demo_url: String,
    /// Share code re-derived from the record
    pub share_code: String,
}

impl ValveMatch {
    /// Match date as ISO-8601 with millisecond precision, e.g.
    /// `2023-10-01T18:30:00.000Z`
    pub fn date_iso(&self) -> String {
        self.date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Attribute a pair of raw per-slot values to the starting sides
///
/// Raw slots are reported without regard to which side each team started on.
/// When `switched` is set the slots are swapped. Returns
/// `(started_ct, started_t)`.
///
/// This is the only place the switched-teams flag is interpreted, so scores
/// and the match result always agree.
pub fn by_starting_side<T>(switched: bool, first: T, second: T) -> (T, T) {
    if switched {
        (second, first)
    } else {
        (first, second)
    }
}

/// Normalize a raw match record
///
/// Fails with [`Error::PayloadDecode`] only when the record carries no round
/// stats at all. Other missing fields fall back to their protobuf defaults.
pub fn normalize(info: &MatchInfo) -> Result<ValveMatch> {
    let stats = select_round_stats(info)
        .ok_or_else(|| Error::PayloadDecode("match record has no round stats".into()))?;

    let switched = stats.b_switched_teams.unwrap_or(false);
    let raw_score = |slot: usize| stats.team_scores.get(slot).copied().unwrap_or(0);
    let (score_team_started_ct, score_team_started_t) =
        by_starting_side(switched, raw_score(0), raw_score(1));

    let reservation = stats.reservation.as_ref();
    let game_type = reservation.and_then(|r| r.game_type).unwrap_or(0);
    let teams = reservation.map_or(&[][..], |r| r.tournament_teams.as_slice());
    let (team_name_started_ct, team_name_started_t) = team_names(teams);

    let watchable = info.watchablematchinfo.as_ref();
    let tv_port = watchable.and_then(|w| w.tv_port).unwrap_or(0);
    let server_ip = watchable.and_then(|w| w.server_ip).unwrap_or(0);

    let match_id = info.matchid.unwrap_or(0);
    let reservation_id = stats.reservationid.unwrap_or(0);
    let date = DateTime::from_timestamp(i64::from(info.matchtime.unwrap_or(0)), 0)
        .unwrap_or_default();

    let share_code = sharecode::encode(&MatchCoordinates {
        match_id,
        reservation_id,
        // the codec only carries the low 16 bits
        tv_port: tv_port as u16,
    });

    Ok(ValveMatch {
        id: match_id.to_string(),
        game: Game::from_date(date),
        name: demo_name(reservation_id, tv_port, server_ip),
        map_name: map_name(game_type).to_string(),
        date,
        duration_in_seconds: stats.match_duration.unwrap_or(0),
        score_team_started_ct,
        score_team_started_t,
        result: match_result(stats.match_result.unwrap_or(0), switched),
        team_name_started_ct,
        team_name_started_t,
        kill_count: total(&stats.kills),
        assist_count: total(&stats.assists),
        death_count: total(&stats.deaths),
        demo_url: stats.map.clone().unwrap_or_default(),
        share_code,
    })
}

/// Legacy aggregate stats win; otherwise the last per-round entry.
fn select_round_stats(info: &MatchInfo) -> Option<&RoundStats> {
    info.roundstats_legacy
        .as_ref()
        .or_else(|| info.roundstatsall.last())
}

fn match_result(code: i32, switched: bool) -> MatchResult {
    let (first, second) = by_starting_side(switched, MatchResult::CtWon, MatchResult::TWon);
    match code {
        0 => MatchResult::Tied,
        // code 1 names the second raw slot
        1 => second,
        _ => first,
    }
}

fn team_names(teams: &[TournamentTeam]) -> (String, String) {
    match teams {
        [ct, t, ..] => (
            ct.team_name.clone().unwrap_or_default(),
            t.team_name.clone().unwrap_or_default(),
        ),
        _ => (
            DEFAULT_TEAM_NAME_CT.to_string(),
            DEFAULT_TEAM_NAME_T.to_string(),
        ),
    }
}

fn demo_name(reservation_id: u64, tv_port: u32, server_ip: u32) -> String {
    format!("match730_{reservation_id:021}_{tv_port:010}_{server_ip}")
}

fn total(values: &[i32]) -> i64 {
    values.iter().map(|&v| i64::from(v)).sum()
}
