/// Category of tick-stamped occurrences tracked per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Kill,
    Smoke,
    Incendiary,
    Explosive,
}

/// Ordered, append-only tick lists of the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSequences {
    pub kills: Vec<i32>,
    pub smokes: Vec<i32>,
    pub incendiaries: Vec<i32>,
    pub explosives: Vec<i32>,
}

impl TickSequences {
    pub fn push(&mut self, kind: TickKind, tick: i32) {
        self.sequence_mut(kind).push(tick);
    }

    pub fn get(&self, kind: TickKind) -> &[i32] {
        match kind {
            TickKind::Kill => &self.kills,
            TickKind::Smoke => &self.smokes,
            TickKind::Incendiary => &self.incendiaries,
            TickKind::Explosive => &self.explosives,
        }
    }

    pub fn clear(&mut self) {
        self.kills.clear();
        self.smokes.clear();
        self.incendiaries.clear();
        self.explosives.clear();
    }

    fn sequence_mut(&mut self, kind: TickKind) -> &mut Vec<i32> {
        match kind {
            TickKind::Kill => &mut self.kills,
            TickKind::Smoke => &mut self.smokes,
            TickKind::Incendiary => &mut self.incendiaries,
            TickKind::Explosive => &mut self.explosives,
        }
    }
}
