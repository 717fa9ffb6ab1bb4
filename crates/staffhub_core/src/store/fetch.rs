//! Fetch sequencing and the API record-source seam.
//!
//! # Responsibility
//! - Pair every fetch start with its completion through a `FetchTicket`.
//! - Decide whether a completion may still be committed.
//! - Retry record sources according to the configured retry count.
//!
//! # Invariants
//! - Ticket sequence numbers are strictly increasing per sequencer.
//! - A completion older than the last committed one is never committed.
//! - Cancelling invalidates every ticket issued so far.

use log::warn;

/// Sequence token handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Result of handing a completion back to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records were committed.
    Committed,
    /// Fetch failed; message stored as the store error.
    Failed,
    /// A newer fetch already committed, or the ticket was cancelled.
    Stale,
}

/// Monotonic ticket issuer for one store.
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    issued: u64,
    committed: u64,
    cancelled_through: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket { seq: self.issued }
    }

    /// Records `ticket` as committed when it is still current.
    pub fn try_commit(&mut self, ticket: FetchTicket) -> bool {
        if ticket.seq <= self.committed || ticket.seq <= self.cancelled_through {
            return false;
        }
        self.committed = ticket.seq;
        true
    }

    /// Invalidates all tickets issued so far.
    pub fn cancel_all(&mut self) {
        self.cancelled_through = self.issued;
    }

    /// Whether some issued ticket can still commit.
    pub fn has_pending(&self) -> bool {
        self.issued > self.committed.max(self.cancelled_through)
    }

    pub fn last_committed(&self) -> Option<u64> {
        (self.committed > 0).then_some(self.committed)
    }
}

/// API boundary returning the record list for one store.
///
/// Errors are display strings; they surface as the owning store's `error`.
pub trait RecordSource<R> {
    fn fetch(&self) -> Result<Vec<R>, String>;
}

impl<R, F> RecordSource<R> for F
where
    F: Fn() -> Result<Vec<R>, String>,
{
    fn fetch(&self) -> Result<Vec<R>, String> {
        self()
    }
}

/// Calls `source` up to `1 + retry` times, returning the first success or
/// the last error.
pub fn fetch_with_retry<R>(source: &impl RecordSource<R>, retry: u32) -> Result<Vec<R>, String> {
    let mut attempt = 0;
    loop {
        match source.fetch() {
            Ok(records) => return Ok(records),
            Err(err) if attempt < retry => {
                attempt += 1;
                warn!(
                    "event=fetch_retry module=store status=retry attempt={} max_retry={} error={}",
                    attempt,
                    retry,
                    crate::logging::sanitize_message(&err, 120)
                );
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fetch_with_retry, FetchSequencer};
    use std::cell::Cell;

    #[test]
    fn newer_ticket_wins_over_older_completion() {
        let mut sequencer = FetchSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(sequencer.try_commit(second));
        assert!(!sequencer.try_commit(first));
        assert_eq!(sequencer.last_committed(), Some(second.seq()));
        assert!(!sequencer.has_pending());
    }

    #[test]
    fn in_order_completions_both_commit() {
        let mut sequencer = FetchSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(sequencer.try_commit(first));
        assert!(sequencer.has_pending());
        assert!(sequencer.try_commit(second));
    }

    #[test]
    fn cancel_invalidates_outstanding_tickets_only() {
        let mut sequencer = FetchSequencer::new();
        let abandoned = sequencer.begin();
        sequencer.cancel_all();
        assert!(!sequencer.has_pending());
        assert!(!sequencer.try_commit(abandoned));

        let fresh = sequencer.begin();
        assert!(sequencer.try_commit(fresh));
    }

    #[test]
    fn retry_stops_at_first_success() {
        let calls = Cell::new(0u32);
        let source = || {
            calls.set(calls.get() + 1);
            if calls.get() < 2 {
                Err("timeout".to_string())
            } else {
                Ok(vec![1, 2, 3])
            }
        };

        let records = fetch_with_retry(&source, 3).expect("second attempt succeeds");
        assert_eq!(records, vec![1, 2, 3]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn retry_returns_last_error_after_budget() {
        let calls = Cell::new(0u32);
        let source = || -> Result<Vec<u8>, String> {
            calls.set(calls.get() + 1);
            Err(format!("failure {}", calls.get()))
        };

        let err = fetch_with_retry(&source, 1).expect_err("all attempts fail");
        assert_eq!(err, "failure 2");
        assert_eq!(calls.get(), 2);
    }
}
