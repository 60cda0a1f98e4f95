pub mod demo_analysis;

/// Identifier the store assigned to a registered match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MatchId(pub i64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerIdentity {
    pub steam_id: u64,
    pub name: String,
}

/// How a player is referenced inside stored roster and survivor lists.
///
/// Serialized untagged, so a list renders as `[7656..., 7656...]` or as
/// `["name", "name"]` depending on which keys were captured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PlayerKey {
    SteamId(u64),
    Name(String),
}
