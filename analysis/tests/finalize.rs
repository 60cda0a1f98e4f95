use analysis::event::{PlayerSnapshot, TeamSnapshot};
use analysis::finalize::{finalize, last_kill_to_end, longest_kill_gap, losing_side_economy};
use analysis::round::{duration_seconds, RoundState};
use common::{MatchId, PlayerKey};
use pretty_assertions::assert_eq;

fn player(steam_id: u64, alive: bool, money: i32, equipment_value: i32) -> PlayerSnapshot {
    PlayerSnapshot {
        steam_id,
        name: format!("player-{}", steam_id),
        alive,
        money,
        equipment_value,
    }
}

#[test]
fn kill_gaps() {
    let kills = [100, 140, 142];

    assert_eq!(40, longest_kill_gap(&kills));
    assert_eq!(8, last_kill_to_end(&kills, 150));
}

#[test]
fn kill_gaps_short_sequences() {
    assert_eq!(0, longest_kill_gap(&[]));
    assert_eq!(0, longest_kill_gap(&[512]));
    assert_eq!(0, last_kill_to_end(&[], 150));
}

#[test]
fn kills_after_round_end_are_not_the_last_kill() {
    let kills = [100, 120, 180, 190];

    assert_eq!(30, last_kill_to_end(&kills, 150));
    assert_eq!(60, longest_kill_gap(&kills));
    assert_eq!(0, last_kill_to_end(&[160, 170], 150));
}

#[test]
fn kill_at_round_end_counts() {
    assert_eq!(0, last_kill_to_end(&[100, 150], 150));
}

#[test]
fn economy_of_losing_side() {
    let team = TeamSnapshot {
        id: 3,
        clan_name: "Alpha".to_owned(),
        members: vec![player(1, true, 4000, 3200), player(2, false, 0, 0)],
    };

    let economy = losing_side_economy(&team, true);

    assert_eq!(vec![PlayerKey::SteamId(1)], economy.survivors);
    assert_eq!(3200, economy.saved_equipment_value);
    assert_eq!(4000, economy.leftover_money);
}

#[test]
fn economy_counts_money_of_dead_players() {
    let team = TeamSnapshot {
        id: 2,
        clan_name: "Bravo".to_owned(),
        members: vec![
            player(1, false, 1200, 4700),
            player(2, true, 300, 850),
            player(3, false, 50, 0),
        ],
    };

    let economy = losing_side_economy(&team, true);

    assert_eq!(vec![PlayerKey::SteamId(2)], economy.survivors);
    assert_eq!(850, economy.saved_equipment_value);
    assert_eq!(1550, economy.leftover_money);
}

#[test]
fn durations() {
    assert_eq!(14, duration_seconds(200, 1150, Some(64)));
    assert_eq!(7, duration_seconds(200, 1150, Some(128)));
    assert_eq!(0, duration_seconds(200, 1150, None));
    assert_eq!(0, duration_seconds(200, 250, Some(64)));
}

#[test]
fn zero_duration_is_not_finalized() {
    let round = RoundState {
        number: 4,
        start_tick: 200,
        end_tick: 250,
        duration: 0,
        ..Default::default()
    };

    assert_eq!(None, finalize(&round, MatchId(1), 300, &TeamSnapshot::default(), true));
}

#[test]
fn finalized_round() {
    let mut round = RoundState {
        match_id: Some(MatchId(9)),
        number: 12,
        duration: 25,
        losing_team_name: "Bravo".to_owned(),
        losing_side_id: 2,
        start_tick: 1000,
        end_tick: 2600,
        explosive_damage: 98,
        ..Default::default()
    };
    round.ticks.kills = vec![1500, 1580, 2590, 2700];
    round.ticks.smokes = vec![1100, 1120];

    let team = TeamSnapshot {
        id: 2,
        clan_name: "Bravo".to_owned(),
        members: vec![player(7, true, 2000, 1500), player(8, false, 100, 0)],
    };

    let record = finalize(&round, MatchId(9), 2900, &team, true).unwrap();

    assert_eq!(MatchId(9), record.match_id);
    assert_eq!(12, record.round_number);
    assert_eq!(2900, record.end_official_tick);
    assert_eq!(1010, record.longest_kill_gap);
    assert_eq!(10, record.last_kill_to_end);
    assert_eq!(vec![PlayerKey::SteamId(7)], record.survivors);
    assert_eq!(2100, record.leftover_money);
    assert_eq!(1500, record.saved_equipment_value);
    assert_eq!(vec![1100, 1120], record.smoke_ticks);
    assert_eq!(98, record.explosive_damage);
}

#[test]
fn extreme_ticks_saturate() {
    assert_eq!(i32::MAX / 64, duration_seconds(i32::MIN, i32::MAX, Some(64)));
    assert_eq!(i32::MAX, longest_kill_gap(&[i32::MIN, i32::MAX]));
    assert_eq!(i32::MAX, last_kill_to_end(&[i32::MIN], i32::MAX));

    let team = TeamSnapshot {
        id: 2,
        clan_name: "Bravo".to_owned(),
        members: vec![player(1, true, i32::MAX, i32::MAX), player(2, true, 1, 1)],
    };
    let economy = losing_side_economy(&team, true);
    assert_eq!(i32::MAX, economy.leftover_money);
    assert_eq!(i32::MAX, economy.saved_equipment_value);
}
