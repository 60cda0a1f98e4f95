use crate::{MatchId, PlayerKey};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    pub observed_at: chrono::DateTime<chrono::Utc>,
    pub team_a_name: String,
    pub team_a_roster: Vec<PlayerKey>,
    pub team_b_name: String,
    pub team_b_roster: Vec<PlayerKey>,
    pub map_name: String,
    pub tick_rate: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundRecord {
    pub match_id: MatchId,
    pub round_number: i32,
    pub duration_seconds: i32,
    pub losing_team_name: String,
    pub losing_side_id: i32,
    pub start_tick: i32,
    pub end_tick: i32,
    pub end_official_tick: i32,
    pub survivors: Vec<PlayerKey>,
    pub leftover_money: i32,
    pub saved_equipment_value: i32,
    pub kill_ticks: Vec<i32>,
    pub smoke_ticks: Vec<i32>,
    pub incendiary_ticks: Vec<i32>,
    pub explosive_ticks: Vec<i32>,
    pub longest_kill_gap: i32,
    pub last_kill_to_end: i32,
    pub explosive_damage: i32,
}
