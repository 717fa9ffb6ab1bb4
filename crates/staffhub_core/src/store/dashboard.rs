//! Dashboard store holding server-computed figures.

use crate::logging::sanitize_message;
use crate::model::dashboard::DashboardStats;
use crate::store::fetch::{FetchOutcome, FetchSequencer, FetchTicket};
use log::warn;

/// Single-object store; the API computes the figures, the client stores them.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    stats: Option<DashboardStats>,
    loading: bool,
    error: Option<String>,
    sequencer: FetchSequencer,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.error = None;
        self.loading = true;
        self.sequencer.begin()
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<DashboardStats, String>,
    ) -> FetchOutcome {
        if !self.sequencer.try_commit(ticket) {
            return FetchOutcome::Stale;
        }
        self.loading = self.sequencer.has_pending();
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                FetchOutcome::Committed
            }
            Err(err) => {
                warn!(
                    "event=store_fetch module=store status=error store=dashboard seq={} error={}",
                    ticket.seq(),
                    sanitize_message(&err, 120)
                );
                self.error = Some(err);
                FetchOutcome::Failed
            }
        }
    }

    pub fn cancel_fetches(&mut self) {
        self.sequencer.cancel_all();
        self.loading = false;
    }

    pub fn reset(&mut self) {
        self.cancel_fetches();
        self.stats = None;
        self.error = None;
    }
}
