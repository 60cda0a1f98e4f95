use diesel::prelude::*;

use common::demo_analysis::{MatchRecord, RoundRecord};

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewPlayer<'a> {
    pub steam_id: i64,
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Player {
    pub steam_id: i64,
    pub name: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewMatch {
    pub observed_at: String,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_roster: String,
    pub team_b_roster: String,
    pub map_name: String,
    pub tick_rate: Option<i32>,
}

impl TryFrom<&MatchRecord> for NewMatch {
    type Error = serde_json::Error;

    fn try_from(record: &MatchRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            observed_at: record
                .observed_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            team_a_name: record.team_a_name.clone(),
            team_b_name: record.team_b_name.clone(),
            team_a_roster: serde_json::to_string(&record.team_a_roster)?,
            team_b_roster: serde_json::to_string(&record.team_b_roster)?,
            map_name: record.map_name.clone(),
            tick_rate: record.tick_rate,
        })
    }
}

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::schema::matches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Match {
    pub id: i64,
    pub observed_at: String,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_roster: String,
    pub team_b_roster: String,
    pub map_name: String,
    pub tick_rate: Option<i32>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::rounds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewRound {
    pub match_id: i64,
    pub duration_seconds: i32,
    pub losing_team_name: String,
    pub losing_side_id: i32,
    pub start_tick: i32,
    pub end_tick: i32,
    pub end_official_tick: i32,
    pub survivors: String,
    pub leftover_money: i32,
    pub saved_equipment_value: i32,
    pub kill_ticks: String,
    pub smoke_ticks: String,
    pub incendiary_ticks: String,
    pub explosive_ticks: String,
    pub longest_kill_gap: i32,
    pub last_kill_to_end: i32,
    pub round_number: i32,
    pub explosive_damage: i32,
}

impl TryFrom<&RoundRecord> for NewRound {
    type Error = serde_json::Error;

    fn try_from(record: &RoundRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            match_id: record.match_id.0,
            duration_seconds: record.duration_seconds,
            losing_team_name: record.losing_team_name.clone(),
            losing_side_id: record.losing_side_id,
            start_tick: record.start_tick,
            end_tick: record.end_tick,
            end_official_tick: record.end_official_tick,
            survivors: serde_json::to_string(&record.survivors)?,
            leftover_money: record.leftover_money,
            saved_equipment_value: record.saved_equipment_value,
            kill_ticks: serde_json::to_string(&record.kill_ticks)?,
            smoke_ticks: serde_json::to_string(&record.smoke_ticks)?,
            incendiary_ticks: serde_json::to_string(&record.incendiary_ticks)?,
            explosive_ticks: serde_json::to_string(&record.explosive_ticks)?,
            longest_kill_gap: record.longest_kill_gap,
            last_kill_to_end: record.last_kill_to_end,
            round_number: record.round_number,
            explosive_damage: record.explosive_damage,
        })
    }
}

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::schema::rounds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Round {
    pub id: i64,
    pub match_id: i64,
    pub duration_seconds: i32,
    pub losing_team_name: String,
    pub losing_side_id: i32,
    pub start_tick: i32,
    pub end_tick: i32,
    pub end_official_tick: i32,
    pub survivors: String,
    pub leftover_money: i32,
    pub saved_equipment_value: i32,
    pub kill_ticks: String,
    pub smoke_ticks: String,
    pub incendiary_ticks: String,
    pub explosive_ticks: String,
    pub longest_kill_gap: i32,
    pub last_kill_to_end: i32,
    pub round_number: i32,
    pub explosive_damage: i32,
}
