use diesel::prelude::*;

use analysis::store::{Store, StoreError, Write};
use common::demo_analysis::{MatchRecord, RoundRecord};
use common::{MatchId, PlayerIdentity};

/// [`Store`] writing through a diesel SQLite connection.
pub struct DieselStore<'c> {
    connection: &'c mut SqliteConnection,
}

impl<'c> DieselStore<'c> {
    pub fn new(connection: &'c mut SqliteConnection) -> Self {
        Self { connection }
    }
}

impl Store for DieselStore<'_> {
    fn upsert_player(&mut self, player: &PlayerIdentity) -> Result<(), StoreError> {
        let write = || Write::Player {
            steam_id: player.steam_id,
        };

        let steam_id = i64::try_from(player.steam_id).map_err(|e| StoreError::new(write(), e))?;
        let query = diesel::dsl::insert_into(crate::schema::players::dsl::players)
            .values(crate::models::NewPlayer {
                steam_id,
                name: &player.name,
            })
            .on_conflict_do_nothing();

        tracing::trace!(steam_id = player.steam_id, "Store player");

        query
            .execute(&mut *self.connection)
            .map_err(|e| StoreError::new(write(), e))?;

        Ok(())
    }

    fn insert_match(&mut self, record: &MatchRecord) -> Result<MatchId, StoreError> {
        let values = crate::models::NewMatch::try_from(record)
            .map_err(|e| StoreError::new(Write::Match, e))?;

        let id: i64 = diesel::dsl::insert_into(crate::schema::matches::dsl::matches)
            .values(&values)
            .returning(crate::schema::matches::dsl::id)
            .get_result(&mut *self.connection)
            .map_err(|e| StoreError::new(Write::Match, e))?;

        Ok(MatchId(id))
    }

    fn insert_round(&mut self, record: &RoundRecord) -> Result<(), StoreError> {
        let write = || Write::Round {
            match_id: record.match_id,
            round_number: record.round_number,
        };

        let values =
            crate::models::NewRound::try_from(record).map_err(|e| StoreError::new(write(), e))?;

        diesel::dsl::insert_into(crate::schema::rounds::dsl::rounds)
            .values(&values)
            .execute(&mut *self.connection)
            .map_err(|e| StoreError::new(write(), e))?;

        Ok(())
    }
}
