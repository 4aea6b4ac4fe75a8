//! Trailing-edge debouncing
//!
//! Each event takes a [`Ticket`]; after the delay, only the holder of the latest
//! ticket runs. The timer itself belongs to the caller.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Debouncer {
    generation: Cell<u64>,
}

impl Debouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: Cell::new(0),
        }
    }

    /// Register an event, superseding every earlier ticket.
    pub fn trigger(&self) -> Ticket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        Ticket(next)
    }

    #[must_use]
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.generation.get() == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_event_fires() {
        let d = Debouncer::new();
        let first = d.trigger();
        let second = d.trigger();
        let third = d.trigger();
        assert!(!d.is_latest(first));
        assert!(!d.is_latest(second));
        assert!(d.is_latest(third));
    }
}
