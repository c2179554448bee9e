//! Match-list fixtures

use cs_sharecode::MatchCoordinates;
use cs_sharecode::maps::MODE_COMPETITIVE;
use cs_sharecode::proto::{
    MatchInfo, MatchList, RoundStats, ServerReservation, TournamentTeam, WatchableMatchInfo,
};
use prost::Message;

/// A real-format share code and the coordinates it encodes
pub const SHARE_CODE: &str = "CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK";
pub const MATCH_ID: u64 = 3230642215713767580;
pub const RESERVATION_ID: u64 = 3230647599455273103;
pub const TV_PORT: u16 = 55788;

/// 2023-11-14T22:13:20Z, after the CS2 cutoff
pub const MATCH_TIME: u32 = 1_700_000_000;

/// 127.0.0.1 as a packed u32
pub const SERVER_IP: u32 = 2_130_706_433;

pub fn coordinates() -> MatchCoordinates {
    MatchCoordinates {
        match_id: MATCH_ID,
        reservation_id: RESERVATION_ID,
        tv_port: TV_PORT,
    }
}

/// One competitive de_mirage match whose demo lives at `demo_url`
pub fn match_info(demo_url: &str) -> MatchInfo {
    MatchInfo {
        matchid: Some(MATCH_ID),
        matchtime: Some(MATCH_TIME),
        watchablematchinfo: Some(WatchableMatchInfo {
            server_ip: Some(SERVER_IP),
            tv_port: Some(u32::from(TV_PORT)),
            ..Default::default()
        }),
        roundstatsall: vec![RoundStats {
            reservationid: Some(RESERVATION_ID),
            reservation: Some(ServerReservation {
                game_type: Some(((1 << 7) << 8) | MODE_COMPETITIVE),
                tournament_teams: vec![
                    TournamentTeam {
                        team_name: Some("Alpha".into()),
                        ..Default::default()
                    },
                    TournamentTeam {
                        team_name: Some("Bravo".into()),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }),
            map: Some(demo_url.to_string()),
            kills: vec![20, 18, 15, 12, 9, 21, 17, 14, 11, 8],
            assists: vec![3; 10],
            deaths: vec![15; 10],
            match_result: Some(1),
            team_scores: vec![13, 9],
            match_duration: Some(2400),
            b_switched_teams: Some(true),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Serialized payload holding the given matches
pub fn match_list_bytes(matches: Vec<MatchInfo>) -> Vec<u8> {
    MatchList {
        matches,
        ..Default::default()
    }
    .encode_to_vec()
}

/// Demo file name the fixture match should produce
pub fn expected_file_name() -> String {
    format!("match730_{RESERVATION_ID:021}_{TV_PORT:010}_{SERVER_IP}")
}
