//! Forward-only state machines.
//!
//! Each status enum lists its allowed successors. A transition is legal iff
//! the target appears in the successor set of the current state.

pub trait Lifecycle: Copy + PartialEq + std::fmt::Display + 'static {
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, next: Self) -> bool {
        self.successors().contains(&next)
    }

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
