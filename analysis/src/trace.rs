//! Line oriented event trace, the decoded form of a demo.
//!
//! The first non-blank line is a header object (`map_name`, `tick_rate`).
//! Every following line may update the game-state snapshot (`tick`,
//! `rounds_played`, `teams`) and may carry one `event`, which is delivered after
//! the snapshot update of the same line has been applied.

use crate::event::{lenient, Event, GameState, Side, TeamSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("trace has no header")]
    MissingHeader,
    #[error("unreadable trace header")]
    Header(#[source] serde_json::Error),
    #[error("malformed trace line {line}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceHeader {
    #[serde(deserialize_with = "lenient")]
    pub map_name: String,
    #[serde(deserialize_with = "lenient")]
    pub tick_rate: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TraceLine {
    #[serde(deserialize_with = "lenient")]
    tick: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    rounds_played: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    teams: Option<TeamsUpdate>,
    #[serde(deserialize_with = "lenient")]
    event: Option<Event>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TeamsUpdate {
    #[serde(deserialize_with = "lenient")]
    ct: Option<TeamSnapshot>,
    #[serde(deserialize_with = "lenient")]
    t: Option<TeamSnapshot>,
}

/// Game state as reconstructed from the trace so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceState {
    pub tick: i32,
    pub rounds_played: i32,
    pub counter_terrorists: TeamSnapshot,
    pub terrorists: TeamSnapshot,
    pub map_name: String,
    pub tick_rate: Option<i32>,
}

impl GameState for TraceState {
    fn ingame_tick(&self) -> i32 {
        self.tick
    }

    fn total_rounds_played(&self) -> i32 {
        self.rounds_played
    }

    fn team(&self, side: Side) -> &TeamSnapshot {
        match side {
            Side::CounterTerrorist => &self.counter_terrorists,
            Side::Terrorist => &self.terrorists,
        }
    }

    fn map_name(&self) -> &str {
        &self.map_name
    }

    fn tick_rate(&self) -> Option<i32> {
        self.tick_rate
    }
}

/// Converts the header's tick rate, where anything below one tick per second
/// (including the `-1` sentinel) means unknown.
pub fn normalize_tick_rate(rate: Option<f64>) -> Option<i32> {
    rate.filter(|r| r.is_finite() && *r >= 1.0).map(|r| r as i32)
}

pub struct Trace<'b> {
    remaining: &'b [u8],
    line: usize,
    state: TraceState,
}

impl<'b> Trace<'b> {
    pub fn parse(buf: &'b [u8]) -> Result<Self, DecodeError> {
        let mut trace = Self {
            remaining: buf,
            line: 0,
            state: TraceState::default(),
        };

        let header_line = loop {
            match trace.next_line() {
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
                None => return Err(DecodeError::MissingHeader),
            }
        };
        let header: TraceHeader =
            serde_json::from_slice(header_line).map_err(DecodeError::Header)?;

        tracing::debug!(map = %header.map_name, tick_rate = ?header.tick_rate, "Read trace header");

        trace.state.map_name = header.map_name;
        trace.state.tick_rate = normalize_tick_rate(header.tick_rate);

        Ok(trace)
    }

    pub fn state(&self) -> &TraceState {
        &self.state
    }

    /// Advances to the next event, applying every snapshot update on the way.
    pub fn next_event(&mut self) -> Option<Result<Event, DecodeError>> {
        loop {
            let raw = self.next_line()?;
            if raw.is_empty() {
                continue;
            }

            let line: TraceLine = match serde_json::from_slice(raw) {
                Ok(l) => l,
                Err(source) => {
                    return Some(Err(DecodeError::Line {
                        line: self.line,
                        source,
                    }))
                }
            };

            let TraceLine {
                tick,
                rounds_played,
                teams,
                event,
            } = line;
            self.apply(tick, rounds_played, teams);

            match event {
                Some(Event::Unknown) => {
                    tracing::trace!(line = self.line, "Ignoring unknown event");
                }
                Some(event) => return Some(Ok(event)),
                None => {}
            };
        }
    }

    fn apply(&mut self, tick: Option<i32>, rounds_played: Option<i32>, teams: Option<TeamsUpdate>) {
        if let Some(tick) = tick {
            if tick < self.state.tick {
                tracing::warn!(line = self.line, previous = self.state.tick, tick, "Tick went backwards");
            }
            self.state.tick = tick;
        }
        if let Some(rounds_played) = rounds_played {
            self.state.rounds_played = rounds_played;
        }
        if let Some(teams) = teams {
            if let Some(ct) = teams.ct {
                self.state.counter_terrorists = ct;
            }
            if let Some(t) = teams.t {
                self.state.terrorists = t;
            }
        }
    }

    fn next_line(&mut self) -> Option<&'b [u8]> {
        if self.remaining.is_empty() {
            return None;
        }

        let (line, rest) = match self.remaining.iter().position(|b| *b == b'\n') {
            Some(idx) => (&self.remaining[..idx], &self.remaining[idx + 1..]),
            None => (self.remaining, &self.remaining[self.remaining.len()..]),
        };
        self.remaining = rest;
        self.line += 1;

        Some(line.trim_ascii())
    }
}
