//! Ranked talk providers.

use super::{DataProvider, Snapshot, SnapshotCell};
use crate::models::VotedTalk;

/// Top rated talks of the current conference day, best first.
#[derive(Debug)]
pub struct TopTalksTodayDataProvider {
    talks: SnapshotCell<VotedTalk>,
}

impl TopTalksTodayDataProvider {
    pub fn new(talks: Vec<VotedTalk>) -> Self {
        Self {
            talks: SnapshotCell::new(talks),
        }
    }

    pub fn publish(&self, talks: Vec<VotedTalk>) {
        self.talks.publish(talks);
    }

    pub fn filtered_snapshot(&self) -> Snapshot<VotedTalk> {
        self.talks.snapshot()
    }
}

impl DataProvider for TopTalksTodayDataProvider {
    fn name(&self) -> &'static str {
        "TopTalksTodayDataProvider"
    }
}

/// Top rated talks of the whole conference week, best first.
#[derive(Debug)]
pub struct TopTalksWeekDataProvider {
    talks: SnapshotCell<VotedTalk>,
}

impl TopTalksWeekDataProvider {
    pub fn new(talks: Vec<VotedTalk>) -> Self {
        Self {
            talks: SnapshotCell::new(talks),
        }
    }

    pub fn publish(&self, talks: Vec<VotedTalk>) {
        self.talks.publish(talks);
    }

    pub fn filtered_snapshot(&self) -> Snapshot<VotedTalk> {
        self.talks.snapshot()
    }
}

impl DataProvider for TopTalksWeekDataProvider {
    fn name(&self) -> &'static str {
        "TopTalksWeekDataProvider"
    }
}
