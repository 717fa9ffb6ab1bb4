//! Training session store.

use crate::model::training::{TrainingPatch, TrainingSession, TrainingStats, TrainingStatus};
use crate::store::domain_store::DomainStore;

pub type TrainingStore = DomainStore<TrainingSession, TrainingStats>;

/// Result of an enrollment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    Full,
    /// Session is not `scheduled` or no longer exists.
    Unavailable,
}

impl TrainingStore {
    pub fn training() -> Self {
        Self::new("training")
    }

    /// Takes one seat in a scheduled session.
    pub fn enroll(&mut self, id: &str) -> EnrollOutcome {
        let Some(session) = self.get(id) else {
            return EnrollOutcome::Unavailable;
        };
        if session.status != TrainingStatus::Scheduled {
            return EnrollOutcome::Unavailable;
        }
        if !session.has_open_seat() {
            return EnrollOutcome::Full;
        }

        let enrolled = session.enrolled + 1;
        self.update_record(
            id,
            &TrainingPatch {
                enrolled: Some(enrolled),
                ..TrainingPatch::default()
            },
        );
        EnrollOutcome::Enrolled
    }

    pub fn update_session_status(&mut self, id: &str, status: TrainingStatus) -> bool {
        self.update_record(
            id,
            &TrainingPatch {
                status: Some(status),
                ..TrainingPatch::default()
            },
        )
    }

    /// Scheduled sessions starting at or after `now_ms`, soonest first.
    pub fn upcoming(&self, now_ms: i64) -> Vec<&TrainingSession> {
        let mut upcoming: Vec<&TrainingSession> = self
            .records()
            .iter()
            .filter(|session| {
                session.status == TrainingStatus::Scheduled && session.starts_at >= now_ms
            })
            .collect();
        upcoming.sort_by_key(|session| session.starts_at);
        upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::{EnrollOutcome, TrainingStore};
    use crate::model::training::{TrainingSession, TrainingStatus};

    #[test]
    fn enroll_respects_capacity_and_status() {
        let mut store = TrainingStore::training();
        store.set_records(vec![TrainingSession::new("t-1", "Safety", 1_000, 1)]);

        assert_eq!(store.enroll("t-1"), EnrollOutcome::Enrolled);
        assert_eq!(store.stats().total_enrolled, 1);
        assert_eq!(store.enroll("t-1"), EnrollOutcome::Full);
        assert_eq!(store.enroll("t-404"), EnrollOutcome::Unavailable);

        assert!(store.update_session_status("t-1", TrainingStatus::Cancelled));
        assert_eq!(store.enroll("t-1"), EnrollOutcome::Unavailable);
        assert_eq!(store.stats().cancelled, 1);
    }

    #[test]
    fn upcoming_sorted_by_start() {
        let mut store = TrainingStore::training();
        store.set_records(vec![
            TrainingSession::new("late", "B", 3_000, 5),
            TrainingSession::new("past", "A", 500, 5),
            TrainingSession::new("soon", "C", 2_000, 5),
        ]);
        let ids: Vec<&str> = store
            .upcoming(1_000)
            .iter()
            .map(|session| session.id.as_str())
            .collect();
        assert_eq!(ids, vec!["soon", "late"]);
    }
}
