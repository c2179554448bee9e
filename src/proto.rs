//! Match-list protobuf messages
//!
//! Hand-written `prost` definitions for the subset of the game coordinator's
//! `cstrike15_gcmessages.proto` that the helper writes to its payload file.
//! Tags match the upstream schema; fields not listed here are skipped by the
//! decoder.

/// `CMsgGCCStrike15_v2_MatchList`
#[derive(Clone, PartialEq, prost::Message)]
pub struct MatchList {
    #[prost(uint32, optional, tag = "1")]
    pub msgrequestid: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub accountid: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub servertime: Option<u32>,
    #[prost(message, repeated, tag = "4")]
    pub matches: Vec<MatchInfo>,
}

/// `CDataGCCStrike15_v2_MatchInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct MatchInfo {
    #[prost(uint64, optional, tag = "1")]
    pub matchid: Option<u64>,
    /// Unix timestamp in seconds
    #[prost(uint32, optional, tag = "2")]
    pub matchtime: Option<u32>,
    #[prost(message, optional, tag = "3")]
    pub watchablematchinfo: Option<WatchableMatchInfo>,
    #[prost(message, optional, tag = "4")]
    pub roundstats_legacy: Option<RoundStats>,
    #[prost(message, repeated, tag = "5")]
    pub roundstatsall: Vec<RoundStats>,
}

/// `WatchableMatchInfo`
#[derive(Clone, PartialEq, prost::Message)]
pub struct WatchableMatchInfo {
    #[prost(uint32, optional, tag = "1")]
    pub server_ip: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub tv_port: Option<u32>,
    #[prost(uint32, optional, tag = "3")]
    pub tv_spectators: Option<u32>,
    #[prost(uint32, optional, tag = "4")]
    pub tv_time: Option<u32>,
}

/// `CMsgGCCStrike15_v2_MatchmakingServerRoundStats`
#[derive(Clone, PartialEq, prost::Message)]
pub struct RoundStats {
    #[prost(uint64, optional, tag = "1")]
    pub reservationid: Option<u64>,
    #[prost(message, optional, tag = "2")]
    pub reservation: Option<ServerReservation>,
    /// Demo download URL (the upstream field name is `map`)
    #[prost(string, optional, tag = "3")]
    pub map: Option<String>,
    #[prost(int32, optional, tag = "4")]
    pub round: Option<i32>,
    #[prost(int32, repeated, packed = "false", tag = "5")]
    pub kills: Vec<i32>,
    #[prost(int32, repeated, packed = "false", tag = "6")]
    pub assists: Vec<i32>,
    #[prost(int32, repeated, packed = "false", tag = "7")]
    pub deaths: Vec<i32>,
    #[prost(int32, repeated, packed = "false", tag = "8")]
    pub scores: Vec<i32>,
    #[prost(int32, optional, tag = "11")]
    pub match_result: Option<i32>,
    #[prost(int32, repeated, packed = "false", tag = "12")]
    pub team_scores: Vec<i32>,
    #[prost(int32, optional, tag = "15")]
    pub match_duration: Option<i32>,
    #[prost(bool, optional, tag = "27")]
    pub b_switched_teams: Option<bool>,
}

/// `CMsgGCCStrike15_v2_MatchmakingGC2ServerReserve`
#[derive(Clone, PartialEq, prost::Message)]
pub struct ServerReservation {
    #[prost(uint32, repeated, packed = "false", tag = "1")]
    pub account_ids: Vec<u32>,
    /// Map bit flags in bits 8..32, game mode in bits 0..8
    #[prost(uint32, optional, tag = "2")]
    pub game_type: Option<u32>,
    #[prost(uint64, optional, tag = "3")]
    pub match_id: Option<u64>,
    #[prost(message, repeated, tag = "12")]
    pub tournament_teams: Vec<TournamentTeam>,
}

/// `TournamentTeam`
#[derive(Clone, PartialEq, prost::Message)]
pub struct TournamentTeam {
    #[prost(int32, optional, tag = "1")]
    pub team_id: Option<i32>,
    #[prost(string, optional, tag = "2")]
    pub team_tag: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub team_name: Option<String>,
}
