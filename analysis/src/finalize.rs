//! Derived per-round metrics, computed once the official end is observed.

use common::demo_analysis::RoundRecord;
use common::{MatchId, PlayerKey};

use crate::event::TeamSnapshot;
use crate::registrar::player_key;
use crate::round::RoundState;

/// Largest positive difference between consecutive kill ticks.
pub fn longest_kill_gap(kill_ticks: &[i32]) -> i32 {
    kill_ticks
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0]))
        .fold(0, i32::max)
}

/// Ticks between the last kill at or before `end_tick` and `end_tick`.
pub fn last_kill_to_end(kill_ticks: &[i32], end_tick: i32) -> i32 {
    kill_ticks
        .iter()
        .rev()
        .find(|tick| **tick <= end_tick)
        .map(|tick| end_tick.saturating_sub(*tick))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LosingSideEconomy {
    pub survivors: Vec<PlayerKey>,
    pub leftover_money: i32,
    pub saved_equipment_value: i32,
}

/// Money is counted for the whole roster, survivors and equipment only for
/// players still alive.
pub fn losing_side_economy(team: &TeamSnapshot, use_numeric_ids: bool) -> LosingSideEconomy {
    let mut economy = LosingSideEconomy::default();

    for player in team.members.iter() {
        if player.alive {
            economy.survivors.push(player_key(player, use_numeric_ids));
            economy.saved_equipment_value =
                economy.saved_equipment_value.saturating_add(player.equipment_value);
        }
        economy.leftover_money = economy.leftover_money.saturating_add(player.money);
    }

    economy
}

/// Builds the stored round, `None` for rounds without a duration.
pub fn finalize(
    round: &RoundState,
    match_id: MatchId,
    end_official_tick: i32,
    losing_team: &TeamSnapshot,
    use_numeric_ids: bool,
) -> Option<RoundRecord> {
    if round.duration == 0 {
        return None;
    }

    let kill_ticks = &round.ticks.kills;
    let economy = losing_side_economy(losing_team, use_numeric_ids);

    Some(RoundRecord {
        match_id,
        round_number: round.number,
        duration_seconds: round.duration,
        losing_team_name: round.losing_team_name.clone(),
        losing_side_id: round.losing_side_id,
        start_tick: round.start_tick,
        end_tick: round.end_tick,
        end_official_tick,
        survivors: economy.survivors,
        leftover_money: economy.leftover_money,
        saved_equipment_value: economy.saved_equipment_value,
        kill_ticks: kill_ticks.clone(),
        smoke_ticks: round.ticks.smokes.clone(),
        incendiary_ticks: round.ticks.incendiaries.clone(),
        explosive_ticks: round.ticks.explosives.clone(),
        longest_kill_gap: longest_kill_gap(kill_ticks),
        last_kill_to_end: last_kill_to_end(kill_ticks, round.end_tick),
        explosive_damage: round.explosive_damage,
    })
}
