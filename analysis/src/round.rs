use common::MatchId;

use crate::event::{Side, TeamSnapshot};
use crate::ticks::TickSequences;

/// Everything known about the round currently in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub match_id: Option<MatchId>,
    pub number: i32,
    /// Whole seconds between freeze-time end and the result, 0 until known.
    pub duration: i32,
    pub losing_side: Option<Side>,
    pub losing_team_name: String,
    pub losing_side_id: i32,
    pub start_tick: i32,
    pub end_tick: i32,
    pub ticks: TickSequences,
    pub explosive_damage: i32,
}

impl RoundState {
    pub fn reset(&mut self) {
        self.match_id = None;
        self.number = 0;
        self.duration = 0;
        self.losing_side = None;
        self.losing_team_name.clear();
        self.losing_side_id = 0;
        self.start_tick = 0;
        self.end_tick = 0;
        self.ticks.clear();
        self.explosive_damage = 0;
    }

    pub fn record_result(
        &mut self,
        end_tick: i32,
        tick_rate: Option<i32>,
        losing_side: Side,
        losing_team: &TeamSnapshot,
    ) {
        self.end_tick = end_tick;
        self.duration = duration_seconds(self.start_tick, end_tick, tick_rate);
        self.losing_side = Some(losing_side);
        self.losing_side_id = losing_team.id;
        self.losing_team_name = losing_team.clan_name.clone();
    }
}

/// Integer seconds between two ticks; an unknown tick rate yields 0.
pub fn duration_seconds(start_tick: i32, end_tick: i32, tick_rate: Option<i32>) -> i32 {
    match tick_rate {
        Some(rate) if rate > 0 => end_tick.saturating_sub(start_tick) / rate,
        _ => 0,
    }
}
