//! Event vocabulary consumed by the aggregator and the game-state view it reads
//! alongside every event.

/// Team number the source engine uses for the terrorist side.
pub const TEAM_TERRORIST: i32 = 2;
/// Team number the source engine uses for the counter-terrorist side.
pub const TEAM_COUNTER_TERRORIST: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    CounterTerrorist,
    Terrorist,
}

impl Side {
    pub fn from_team_number(number: i32) -> Option<Self> {
        match number {
            TEAM_TERRORIST => Some(Self::Terrorist),
            TEAM_COUNTER_TERRORIST => Some(Self::CounterTerrorist),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::CounterTerrorist => Self::Terrorist,
            Self::Terrorist => Self::CounterTerrorist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Init,
    Pregame,
    StartGamePhase,
    TeamSideSwitch,
    GameHalfEnded,
    GameEnded,
    StaleMate,
    GameOver,
}

// https://github.com/markus-wa/demoinfocs-golang/blob/master/pkg/demoinfocs/common/common.go
pub static GAME_PHASES: phf::Map<i32, GamePhase> = phf::phf_map! {
    0_i32 => GamePhase::Init,
    1_i32 => GamePhase::Pregame,
    2_i32 => GamePhase::StartGamePhase,
    3_i32 => GamePhase::TeamSideSwitch,
    4_i32 => GamePhase::GameHalfEnded,
    5_i32 => GamePhase::GameEnded,
    6_i32 => GamePhase::StaleMate,
    7_i32 => GamePhase::GameOver,
};

impl GamePhase {
    pub fn from_code(code: i32) -> Option<Self> {
        GAME_PHASES.get(&code).copied()
    }
}

/// Field deserializer that turns `null` or a value of the wrong shape into the
/// field's default instead of rejecting the whole line.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    match T::deserialize(value) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::debug!(error = %e, "Defaulting malformed field");
            Ok(T::default())
        }
    }
}

/// Weapon category reported with a damage event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    HeGrenade,
    Molotov,
    Incendiary,
    Smoke,
    Flash,
    Decoy,
    #[default]
    #[serde(other)]
    Other,
}

impl Equipment {
    pub fn is_explosive(self) -> bool {
        matches!(self, Self::HeGrenade)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RoundStart,
    FreezeTimeEnd,
    RoundEnd {
        /// Team number of the winner, absent when the round had none.
        #[serde(default, deserialize_with = "lenient")]
        winner: Option<i32>,
    },
    RoundEndOfficial,
    GamePhaseChanged {
        #[serde(default, deserialize_with = "lenient")]
        new_phase: i32,
    },
    Kill,
    SmokeStart,
    IncendiaryStart,
    ExplosiveDetonation,
    PlayerDamage {
        #[serde(default, deserialize_with = "lenient")]
        weapon: Equipment,
        #[serde(default, deserialize_with = "lenient")]
        health_damage: i32,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    #[serde(deserialize_with = "lenient")]
    pub steam_id: u64,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub alive: bool,
    #[serde(deserialize_with = "lenient")]
    pub money: i32,
    #[serde(deserialize_with = "lenient")]
    pub equipment_value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TeamSnapshot {
    #[serde(deserialize_with = "lenient")]
    pub id: i32,
    #[serde(deserialize_with = "lenient")]
    pub clan_name: String,
    #[serde(deserialize_with = "lenient")]
    pub members: Vec<PlayerSnapshot>,
}

/// Read access to the match state at the moment an event is delivered.
pub trait GameState {
    fn ingame_tick(&self) -> i32;

    fn total_rounds_played(&self) -> i32;

    fn team(&self, side: Side) -> &TeamSnapshot;

    fn map_name(&self) -> &str;

    /// Ticks per second, `None` when the source could not determine it.
    fn tick_rate(&self) -> Option<i32>;
}
