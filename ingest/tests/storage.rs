use analysis::store::{Store, Write};
use chrono::TimeZone;
use common::demo_analysis::{MatchRecord, RoundRecord};
use common::{MatchId, PlayerIdentity, PlayerKey};
use diesel::prelude::*;
use ingest::storage::DieselStore;
use pretty_assertions::assert_eq;

fn connection() -> SqliteConnection {
    let mut connection = ingest::db_connection(":memory:").unwrap();
    ingest::run_migrations(&mut connection).unwrap();
    connection
}

fn match_record() -> MatchRecord {
    MatchRecord {
        observed_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap(),
        team_a_name: "Alpha".to_owned(),
        team_a_roster: vec![PlayerKey::SteamId(76561198000000101), PlayerKey::SteamId(76561198000000102)],
        team_b_name: "Bravo".to_owned(),
        team_b_roster: vec![PlayerKey::SteamId(76561198000000201)],
        map_name: "de_overpass".to_owned(),
        tick_rate: Some(64),
    }
}

#[test]
fn players_keep_first_name() {
    let mut connection = connection();
    let mut store = DieselStore::new(&mut connection);

    store
        .upsert_player(&PlayerIdentity {
            steam_id: 76561198000000101,
            name: "rain".to_owned(),
        })
        .unwrap();
    store
        .upsert_player(&PlayerIdentity {
            steam_id: 76561198000000101,
            name: "renamed".to_owned(),
        })
        .unwrap();

    let players: Vec<ingest::models::Player> = ingest::schema::players::dsl::players
        .select(ingest::models::Player::as_select())
        .load(&mut connection)
        .unwrap();

    assert_eq!(
        vec![ingest::models::Player {
            steam_id: 76561198000000101,
            name: "rain".to_owned(),
        }],
        players
    );
}

#[test]
fn matches_get_sequential_ids() {
    let mut connection = connection();
    let mut store = DieselStore::new(&mut connection);

    assert_eq!(MatchId(1), store.insert_match(&match_record()).unwrap());
    assert_eq!(MatchId(2), store.insert_match(&match_record()).unwrap());

    let stored: ingest::models::Match = ingest::schema::matches::dsl::matches
        .filter(ingest::schema::matches::dsl::id.eq(1))
        .select(ingest::models::Match::as_select())
        .first(&mut connection)
        .unwrap();

    assert_eq!(
        ingest::models::Match {
            id: 1,
            observed_at: "2024-05-01T18:30:00Z".to_owned(),
            team_a_name: "Alpha".to_owned(),
            team_b_name: "Bravo".to_owned(),
            team_a_roster: "[76561198000000101,76561198000000102]".to_owned(),
            team_b_roster: "[76561198000000201]".to_owned(),
            map_name: "de_overpass".to_owned(),
            tick_rate: Some(64),
        },
        stored
    );
}

#[test]
fn unknown_tick_rate_is_null() {
    let mut connection = connection();
    let mut store = DieselStore::new(&mut connection);

    let mut record = match_record();
    record.tick_rate = None;
    store.insert_match(&record).unwrap();

    let tick_rate: Option<i32> = ingest::schema::matches::dsl::matches
        .select(ingest::schema::matches::dsl::tick_rate)
        .first(&mut connection)
        .unwrap();
    assert_eq!(None, tick_rate);
}

#[test]
fn round_lists_are_json() {
    let mut connection = connection();
    let mut store = DieselStore::new(&mut connection);

    let match_id = store.insert_match(&match_record()).unwrap();
    store
        .insert_round(&RoundRecord {
            match_id,
            round_number: 3,
            duration_seconds: 48,
            losing_team_name: "Bravo".to_owned(),
            losing_side_id: 2,
            start_tick: 100,
            end_tick: 3172,
            end_official_tick: 3620,
            survivors: vec![PlayerKey::Name("nova".to_owned())],
            leftover_money: 5400,
            saved_equipment_value: 2900,
            kill_ticks: vec![900, 1200],
            smoke_ticks: vec![],
            incendiary_ticks: vec![400],
            explosive_ticks: vec![410, 2000],
            longest_kill_gap: 300,
            last_kill_to_end: 1972,
            explosive_damage: 76,
        })
        .unwrap();

    let round: ingest::models::Round = ingest::schema::rounds::dsl::rounds
        .select(ingest::models::Round::as_select())
        .first(&mut connection)
        .unwrap();

    assert_eq!(match_id.0, round.match_id);
    assert_eq!("[\"nova\"]", round.survivors);
    assert_eq!("[900,1200]", round.kill_ticks);
    assert_eq!("[]", round.smoke_ticks);
    assert_eq!("[400]", round.incendiary_ticks);
    assert_eq!("[410,2000]", round.explosive_ticks);
    assert_eq!(3, round.round_number);
    assert_eq!(76, round.explosive_damage);
}

#[test]
fn failing_write_names_the_round() {
    let mut connection = connection();
    diesel::sql_query("DROP TABLE rounds")
        .execute(&mut connection)
        .unwrap();
    let mut store = DieselStore::new(&mut connection);

    let err = store
        .insert_round(&RoundRecord {
            match_id: MatchId(4),
            round_number: 7,
            duration_seconds: 1,
            losing_team_name: String::new(),
            losing_side_id: 0,
            start_tick: 0,
            end_tick: 0,
            end_official_tick: 0,
            survivors: vec![],
            leftover_money: 0,
            saved_equipment_value: 0,
            kill_ticks: vec![],
            smoke_ticks: vec![],
            incendiary_ticks: vec![],
            explosive_ticks: vec![],
            longest_kill_gap: 0,
            last_kill_to_end: 0,
            explosive_damage: 0,
        })
        .unwrap_err();

    assert_eq!(
        Write::Round {
            match_id: MatchId(4),
            round_number: 7
        },
        err.write
    );
}

#[test]
fn steam_id_out_of_range() {
    let mut connection = connection();
    let mut store = DieselStore::new(&mut connection);

    let err = store
        .upsert_player(&PlayerIdentity {
            steam_id: u64::MAX,
            name: "overflow".to_owned(),
        })
        .unwrap_err();

    assert_eq!(Write::Player { steam_id: u64::MAX }, err.write);

    let players: i64 = ingest::schema::players::dsl::players
        .count()
        .get_result(&mut connection)
        .unwrap();
    assert_eq!(0, players);
}
