use common::demo_analysis::MatchRecord;
use common::{MatchId, PlayerIdentity, PlayerKey};

use crate::event::{PlayerSnapshot, TeamSnapshot};
use crate::store::{Store, StoreError};

/// Number of players a side fields in a regular competitive match.
pub const FULL_TEAM_SIZE: usize = 5;

pub fn has_full_rosters(team_a: &TeamSnapshot, team_b: &TeamSnapshot) -> bool {
    team_a.members.len() >= FULL_TEAM_SIZE && team_b.members.len() >= FULL_TEAM_SIZE
}

pub fn player_key(player: &PlayerSnapshot, use_numeric_ids: bool) -> PlayerKey {
    if use_numeric_ids {
        PlayerKey::SteamId(player.steam_id)
    } else {
        PlayerKey::Name(player.name.clone())
    }
}

/// Creates the match record once per file and hands out its id afterwards.
#[derive(Debug)]
pub struct MatchRegistrar {
    observed_at: chrono::DateTime<chrono::Utc>,
    use_numeric_ids: bool,
    match_id: Option<MatchId>,
}

impl MatchRegistrar {
    pub fn new(observed_at: chrono::DateTime<chrono::Utc>, use_numeric_ids: bool) -> Self {
        Self {
            observed_at,
            use_numeric_ids,
            match_id: None,
        }
    }

    pub fn match_id(&self) -> Option<MatchId> {
        self.match_id
    }

    /// Returns the id of the already registered match, or registers one from
    /// the given rosters. Both rosters being empty registers nothing.
    pub fn register_if_new(
        &mut self,
        team_a: &TeamSnapshot,
        team_b: &TeamSnapshot,
        map_name: &str,
        tick_rate: Option<i32>,
        store: &mut dyn Store,
    ) -> Result<Option<MatchId>, StoreError> {
        if let Some(id) = self.match_id {
            return Ok(Some(id));
        }

        if team_a.members.is_empty() && team_b.members.is_empty() {
            tracing::trace!("No players on either side yet");
            return Ok(None);
        }

        for player in team_a.members.iter().chain(team_b.members.iter()) {
            store.upsert_player(&PlayerIdentity {
                steam_id: player.steam_id,
                name: player.name.clone(),
            })?;
        }

        let record = MatchRecord {
            observed_at: self.observed_at,
            team_a_name: team_a.clan_name.clone(),
            team_a_roster: self.roster(team_a),
            team_b_name: team_b.clan_name.clone(),
            team_b_roster: self.roster(team_b),
            map_name: map_name.to_owned(),
            tick_rate,
        };

        let id = store.insert_match(&record)?;
        tracing::info!(match_id = %id, map = map_name, team_a = %record.team_a_name, team_b = %record.team_b_name, "Registered match");

        self.match_id = Some(id);
        Ok(Some(id))
    }

    fn roster(&self, team: &TeamSnapshot) -> Vec<PlayerKey> {
        team.members
            .iter()
            .map(|p| player_key(p, self.use_numeric_ids))
            .collect()
    }
}
