//! Schedule provider.

use super::{DataProvider, Snapshot, SnapshotCell};
use crate::models::SessionData;

/// Supplies the sessions currently worth showing on the schedule panel.
///
/// The host publishes the filtered session list; an optional limit caps the
/// view at the number of grid slots the panel can hold.
#[derive(Debug)]
pub struct ScheduleDataProvider {
    sessions: SnapshotCell<SessionData>,
    limit: Option<usize>,
}

impl ScheduleDataProvider {
    pub fn new(sessions: Vec<SessionData>) -> Self {
        Self {
            sessions: SnapshotCell::new(sessions),
            limit: None,
        }
    }

    /// Cap the filtered view at `limit` sessions.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Replace the session list.
    pub fn publish(&self, sessions: Vec<SessionData>) {
        self.sessions.publish(sessions);
    }

    /// Current filtered view, in schedule order.
    pub fn filtered_snapshot(&self) -> Snapshot<SessionData> {
        let all = self.sessions.snapshot();
        match self.limit {
            Some(limit) if limit < all.len() => all[..limit].into(),
            _ => all,
        }
    }
}

impl DataProvider for ScheduleDataProvider {
    fn name(&self) -> &'static str {
        "ScheduleDataProvider"
    }
}
