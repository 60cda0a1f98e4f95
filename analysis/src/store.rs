//! Write side the aggregator talks to.

use common::demo_analysis::{MatchRecord, RoundRecord};
use common::{MatchId, PlayerIdentity};

/// The write a [`StoreError`] originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Player { steam_id: u64 },
    Match,
    Round { match_id: MatchId, round_number: i32 },
}

impl std::fmt::Display for Write {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player { steam_id } => write!(f, "player {}", steam_id),
            Self::Match => write!(f, "match"),
            Self::Round {
                match_id,
                round_number,
            } => write!(f, "round {} of match {}", round_number, match_id),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("storing {write} failed")]
pub struct StoreError {
    pub write: Write,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StoreError {
    pub fn new<E>(write: Write, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            write,
            source: source.into(),
        }
    }
}

pub trait Store {
    /// Inserts the player unless the id is already known, in which case the
    /// stored name is kept.
    fn upsert_player(&mut self, player: &PlayerIdentity) -> Result<(), StoreError>;

    fn insert_match(&mut self, record: &MatchRecord) -> Result<MatchId, StoreError>;

    fn insert_round(&mut self, record: &RoundRecord) -> Result<(), StoreError>;
}

/// Keeps every write in memory. Ids are assigned sequentially from 1.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryStore {
    pub players: std::collections::BTreeMap<u64, String>,
    pub matches: Vec<(MatchId, MatchRecord)>,
    pub rounds: Vec<RoundRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn upsert_player(&mut self, player: &PlayerIdentity) -> Result<(), StoreError> {
        self.players
            .entry(player.steam_id)
            .or_insert_with(|| player.name.clone());
        Ok(())
    }

    fn insert_match(&mut self, record: &MatchRecord) -> Result<MatchId, StoreError> {
        let id = MatchId(self.matches.len() as i64 + 1);
        self.matches.push((id, record.clone()));
        Ok(id)
    }

    fn insert_round(&mut self, record: &RoundRecord) -> Result<(), StoreError> {
        self.rounds.push(record.clone());
        Ok(())
    }
}
