//! Round lifecycle state machine driven by the event stream of one match.

use common::MatchId;

use crate::event::{Event, GamePhase, GameState, Side};
use crate::finalize::finalize;
use crate::registrar::{has_full_rosters, MatchRegistrar};
use crate::round::RoundState;
use crate::store::{Store, StoreError};
use crate::ticks::TickKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorOptions {
    /// Key rosters and survivors by steam id instead of display name.
    pub use_numeric_ids: bool,
    /// Only register the match once both sides field a full roster.
    pub apply_roster_guard: bool,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            use_numeric_ids: true,
            apply_roster_guard: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No round has started yet.
    Idle,
    Active,
    /// The winner is known, the official end is still pending.
    ResultKnown,
    /// The round was finalized, waiting for the next round start.
    Finalized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub match_id: Option<MatchId>,
    pub events: usize,
    pub rounds_stored: usize,
    pub rounds_skipped: usize,
}

pub struct RoundAggregator {
    options: AggregatorOptions,
    phase: Phase,
    round: RoundState,
    registrar: MatchRegistrar,
    summary: Summary,
}

impl RoundAggregator {
    pub fn new(options: AggregatorOptions, observed_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            options,
            phase: Phase::Idle,
            round: RoundState::default(),
            registrar: MatchRegistrar::new(observed_at, options.use_numeric_ids),
            summary: Summary::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn match_id(&self) -> Option<MatchId> {
        self.registrar.match_id()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            match_id: self.registrar.match_id(),
            ..self.summary.clone()
        }
    }

    pub fn handle(
        &mut self,
        event: &Event,
        state: &dyn GameState,
        store: &mut dyn Store,
    ) -> Result<(), StoreError> {
        self.summary.events += 1;

        match event {
            Event::RoundStart => self.start_round(state, store)?,
            Event::FreezeTimeEnd => {
                self.round.start_tick = state.ingame_tick();
            }
            Event::Kill => self.record_tick(TickKind::Kill, state),
            Event::SmokeStart => self.record_tick(TickKind::Smoke, state),
            Event::IncendiaryStart => self.record_tick(TickKind::Incendiary, state),
            Event::ExplosiveDetonation => self.record_tick(TickKind::Explosive, state),
            Event::PlayerDamage {
                weapon,
                health_damage,
            } => {
                if self.in_round() && weapon.is_explosive() {
                    self.round.explosive_damage =
                        self.round.explosive_damage.saturating_add(*health_damage);
                }
            }
            Event::RoundEnd { winner } => {
                self.end_round(winner.and_then(Side::from_team_number), state);
            }
            Event::RoundEndOfficial => self.finish_round(state, store)?,
            Event::GamePhaseChanged { new_phase } => match GamePhase::from_code(*new_phase) {
                Some(GamePhase::GameEnded) => self.finish_round(state, store)?,
                Some(GamePhase::StartGamePhase) => self.start_round(state, store)?,
                _ => {}
            },
            Event::Unknown => {}
        };

        Ok(())
    }

    fn in_round(&self) -> bool {
        matches!(self.phase, Phase::Active | Phase::ResultKnown)
    }

    fn start_round(&mut self, state: &dyn GameState, store: &mut dyn Store) -> Result<(), StoreError> {
        self.round.reset();
        self.round.number = state.total_rounds_played();

        let team_a = state.team(Side::CounterTerrorist);
        let team_b = state.team(Side::Terrorist);

        if self.options.apply_roster_guard && !has_full_rosters(team_a, team_b) {
            tracing::debug!(
                round = self.round.number,
                team_a = team_a.members.len(),
                team_b = team_b.members.len(),
                "Rosters incomplete, not registering match"
            );
        } else {
            self.registrar.register_if_new(
                team_a,
                team_b,
                state.map_name(),
                state.tick_rate(),
                store,
            )?;
        }

        self.round.match_id = self.registrar.match_id();
        self.phase = Phase::Active;

        tracing::trace!(round = self.round.number, tick = state.ingame_tick(), "Round started");

        Ok(())
    }

    fn record_tick(&mut self, kind: TickKind, state: &dyn GameState) {
        if !self.in_round() {
            tracing::trace!(?kind, tick = state.ingame_tick(), "Outside of a round");
            return;
        }

        self.round.ticks.push(kind, state.ingame_tick());
    }

    fn end_round(&mut self, winner: Option<Side>, state: &dyn GameState) {
        if !self.in_round() {
            return;
        }

        let winner = match winner {
            Some(w) => w,
            None => {
                tracing::debug!(round = self.round.number, "Round ended without a winner");
                return;
            }
        };

        let losing_side = winner.opponent();
        self.round.record_result(
            state.ingame_tick(),
            state.tick_rate(),
            losing_side,
            state.team(losing_side),
        );
        self.phase = Phase::ResultKnown;
    }

    fn finish_round(&mut self, state: &dyn GameState, store: &mut dyn Store) -> Result<(), StoreError> {
        if !self.in_round() {
            return Ok(());
        }
        self.phase = Phase::Finalized;

        let number = self.round.number;
        if self.round.duration == 0 {
            tracing::debug!(round = number, "Skipping round without duration");
            self.summary.rounds_skipped += 1;
            return Ok(());
        }

        let (losing_side, match_id) = match (self.round.losing_side, self.round.match_id) {
            (Some(side), Some(id)) => (side, id),
            (None, _) => {
                tracing::debug!(round = number, "Skipping round without a result");
                self.summary.rounds_skipped += 1;
                return Ok(());
            }
            (Some(_), None) => {
                tracing::warn!(round = number, "Skipping round of an unregistered match");
                self.summary.rounds_skipped += 1;
                return Ok(());
            }
        };

        let record = match finalize(
            &self.round,
            match_id,
            state.ingame_tick(),
            state.team(losing_side),
            self.options.use_numeric_ids,
        ) {
            Some(r) => r,
            None => {
                self.summary.rounds_skipped += 1;
                return Ok(());
            }
        };

        store.insert_round(&record)?;
        self.summary.rounds_stored += 1;

        tracing::debug!(
            round = number,
            duration = record.duration_seconds,
            survivors = record.survivors.len(),
            "Stored round"
        );

        Ok(())
    }
}
