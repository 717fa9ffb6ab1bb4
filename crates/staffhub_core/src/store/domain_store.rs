//! Generic per-feature record store with derived statistics.
//!
//! # Responsibility
//! - Hold one feature's record list, its stats and fetch state.
//! - Apply optimistic local mutations and server refetch results.
//!
//! # Invariants
//! - `stats` equals `S::from_records(records)` after every mutation.
//! - Mutations addressing a missing id are silent no-ops.
//! - Fetch completions commit only through a current `FetchTicket`.

use crate::config::QueryPolicy;
use crate::logging::sanitize_message;
use crate::model::{DomainRecord, RecordStats};
use crate::store::fetch::{
    fetch_with_retry, FetchOutcome, FetchSequencer, FetchTicket, RecordSource,
};
use log::{debug, warn};

const MAX_LOGGED_ERROR_CHARS: usize = 120;

/// Record list plus derived stats and fetch state for one feature.
#[derive(Debug, Clone)]
pub struct DomainStore<R, S> {
    name: &'static str,
    records: Vec<R>,
    stats: S,
    loading: bool,
    error: Option<String>,
    sequencer: FetchSequencer,
    last_fetched_at: Option<i64>,
}

impl<R, S> DomainStore<R, S>
where
    R: DomainRecord,
    S: RecordStats<R>,
{
    /// Creates an empty store. `name` tags log events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Vec::new(),
            stats: S::from_records(&[]),
            loading: false,
            error: None,
            sequencer: FetchSequencer::new(),
            last_fetched_at: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Epoch millis of the last committed fetch.
    pub fn last_fetched_at(&self) -> Option<i64> {
        self.last_fetched_at
    }

    /// Replaces the full record list.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.recompute();
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// Returns `false` and leaves the store untouched when `id` is absent.
    pub fn update_record(&mut self, id: &str, patch: &R::Patch) -> bool {
        let Some(index) = self.position(id) else {
            debug!(
                "event=store_update module=store status=skipped store={} reason=not_found",
                self.name
            );
            return false;
        };

        let next = self.records[index].patched(patch);
        self.records[index] = next;
        self.recompute();
        true
    }

    /// Removes the record with `id`. Returns `false` when absent.
    pub fn delete_record(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        if self.records.len() == before {
            return false;
        }
        self.recompute();
        true
    }

    /// Replaces the record sharing `record.id()`, or appends it.
    pub fn upsert_record(&mut self, record: R) {
        match self.position(record.id()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
        self.recompute();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Clears records, stats and fetch state, invalidating in-flight fetches.
    pub fn reset(&mut self) {
        self.sequencer.cancel_all();
        self.records.clear();
        self.loading = false;
        self.error = None;
        self.last_fetched_at = None;
        self.recompute();
    }

    /// Marks a fetch as started and returns its ticket.
    ///
    /// Clears any previous error so a retry shows loading, not the old failure.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.error = None;
        self.loading = true;
        self.sequencer.begin()
    }

    /// Hands a fetch result back to the store.
    ///
    /// Stale tickets are discarded without touching records, error or loading.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<R>, String>,
        now_ms: i64,
    ) -> FetchOutcome {
        if !self.sequencer.try_commit(ticket) {
            debug!(
                "event=store_fetch module=store status=stale store={} seq={}",
                self.name,
                ticket.seq()
            );
            return FetchOutcome::Stale;
        }

        self.loading = self.sequencer.has_pending();
        match result {
            Ok(records) => {
                self.set_records(records);
                self.last_fetched_at = Some(now_ms);
                debug!(
                    "event=store_fetch module=store status=ok store={} seq={} records={}",
                    self.name,
                    ticket.seq(),
                    self.records.len()
                );
                FetchOutcome::Committed
            }
            Err(err) => {
                warn!(
                    "event=store_fetch module=store status=error store={} seq={} error={}",
                    self.name,
                    ticket.seq(),
                    sanitize_message(&err, MAX_LOGGED_ERROR_CHARS)
                );
                self.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    /// Abandons every in-flight fetch, e.g. when the owning screen unmounts.
    pub fn cancel_fetches(&mut self) {
        self.sequencer.cancel_all();
        self.loading = false;
    }

    /// Fetches from `source` with the policy's retry budget and commits.
    pub fn refresh(
        &mut self,
        source: &impl RecordSource<R>,
        policy: &QueryPolicy,
        now_ms: i64,
    ) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = fetch_with_retry(source, policy.retry);
        self.complete_fetch(ticket, result, now_ms)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn recompute(&mut self) {
        self.stats = S::from_records(&self.records);
    }
}
