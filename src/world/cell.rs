//! Cell state and lifecycle flags

/// Derived classification of an alive cell's recent history
///
/// Never stored: computed from the cell's flags on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaState {
    /// Born this generation and not condemned
    JustBorn,
    /// Survived at least one generation and condemned to die next step
    WillDie,
    /// Born this generation and already condemned
    ShortLived,
    /// Survived at least one generation and not condemned
    LongLived,
}

/// A single grid cell
///
/// `just_born` and `will_die` carry no meaning while the cell is dead; `die`
/// clears them so a dead cell always compares equal to `Cell::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
    just_born: bool,
    will_die: bool,
}

impl Cell {
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn just_born(&self) -> bool {
        self.alive && self.just_born
    }

    pub fn will_die(&self) -> bool {
        self.alive && self.will_die
    }

    /// Bring the cell to life. No-op on an already alive cell.
    pub fn born(&mut self) {
        if !self.alive {
            self.alive = true;
            self.just_born = true;
            self.will_die = false;
        }
    }

    /// Kill the cell, clearing all lifecycle flags
    pub fn die(&mut self) {
        self.alive = false;
        self.just_born = false;
        self.will_die = false;
    }

    /// Survive into the next generation
    pub(crate) fn age(&mut self) {
        self.just_born = false;
    }

    /// Record whether the cell is doomed to die on the next step
    pub(crate) fn condemn(&mut self, doomed: bool) {
        self.will_die = self.alive && doomed;
    }

    /// `None` for dead cells
    pub fn meta_state(&self) -> Option<MetaState> {
        if !self.alive {
            return None;
        }
        Some(match (self.just_born, self.will_die) {
            (true, true) => MetaState::ShortLived,
            (true, false) => MetaState::JustBorn,
            (false, true) => MetaState::WillDie,
            (false, false) => MetaState::LongLived,
        })
    }
}
