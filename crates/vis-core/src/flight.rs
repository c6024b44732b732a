//! Generation counters for latest-wins computations.
//!
//! Each computation started through a [`FlightTracker`] gets a [`Ticket`]
//! stamped with a monotonically increasing generation. Starting a new
//! computation supersedes the previous one; when the superseded one finishes,
//! [`FlightTracker::finish`] reports it as stale and its result is dropped.

/// Handle for one in-flight computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    generation: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }
}

/// Tracks at most one current computation per stage.
#[derive(Debug, Clone)]
pub struct FlightTracker<K> {
    generation: u64,
    current: Option<(u64, K)>,
}

impl<K> Default for FlightTracker<K> {
    fn default() -> Self {
        Self {
            generation: 0,
            current: None,
        }
    }
}

impl<K: Clone + PartialEq> FlightTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a computation for `key`, superseding any current one.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        self.current = Some((self.generation, key.clone()));
        Ticket {
            generation: self.generation,
            key,
        }
    }

    /// Key of the current computation, if one is in flight.
    pub fn in_flight(&self) -> Option<&K> {
        self.current.as_ref().map(|(_, key)| key)
    }

    /// Returns true if `ticket` belongs to the current computation.
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        matches!(&self.current, Some((generation, _)) if *generation == ticket.generation)
    }

    /// Mark `ticket` finished. Returns false if it was superseded.
    pub fn finish(&mut self, ticket: &Ticket<K>) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Supersede the current computation without starting a new one.
    pub fn cancel(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
    }

    /// Generation stamped on the most recent ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ticket_finishes() {
        let mut tracker = FlightTracker::new();
        let ticket = tracker.begin("a");
        assert_eq!(tracker.in_flight(), Some(&"a"));
        assert!(tracker.finish(&ticket));
        assert_eq!(tracker.in_flight(), None);
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut tracker = FlightTracker::new();
        let old = tracker.begin("a");
        let new = tracker.begin("b");
        assert!(!tracker.is_current(&old));
        assert!(tracker.finish(&new));
        assert!(!tracker.finish(&old));
    }

    #[test]
    fn test_stale_arrival_before_current_is_rejected() {
        let mut tracker = FlightTracker::new();
        let old = tracker.begin(1);
        let new = tracker.begin(2);
        assert!(!tracker.finish(&old));
        assert_eq!(tracker.in_flight(), Some(&2));
        assert!(tracker.finish(&new));
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut tracker = FlightTracker::new();
        let ticket = tracker.begin(1);
        tracker.cancel();
        assert!(!tracker.finish(&ticket));
        assert_eq!(tracker.in_flight(), None);
    }

    #[test]
    fn test_ticket_finishes_once() {
        let mut tracker = FlightTracker::new();
        let ticket = tracker.begin(1);
        assert!(tracker.finish(&ticket));
        assert!(!tracker.finish(&ticket));
    }
}
