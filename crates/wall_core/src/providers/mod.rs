//! Data providers and the capability map steps read them through.
//!
//! A provider is identified by its concrete type. Steps declare the
//! capabilities they need through their factory; the host fills a
//! [`DataProviders`] map once and checks the declaration before scheduling
//! the step, so steps themselves never test for presence.
//!
//! Providers hand out point-in-time [`Snapshot`]s. The host may publish a
//! new snapshot at any time; a snapshot already handed to a step never
//! changes underneath it.

mod capability;
mod loader;
mod schedule;
mod speakers;
mod top_talks;

pub use capability::{DataProvider, DataProviders, ProviderId};
pub use loader::{load_records, load_speaker_images, ProviderError};
pub use schedule::ScheduleDataProvider;
pub use speakers::SpeakerImageProvider;
pub use top_talks::{TopTalksTodayDataProvider, TopTalksWeekDataProvider};

use std::sync::Arc;

use parking_lot::RwLock;

/// Ordered, immutable view of a provider's records at one point in time.
pub type Snapshot<T> = Arc<[T]>;

/// Publish/read cell shared by the record providers.
#[derive(Debug)]
pub(crate) struct SnapshotCell<T> {
    current: RwLock<Snapshot<T>>,
}

impl<T> SnapshotCell<T> {
    pub(crate) fn new(records: Vec<T>) -> Self {
        Self {
            current: RwLock::new(records.into()),
        }
    }

    pub(crate) fn publish(&self, records: Vec<T>) {
        *self.current.write() = records.into();
    }

    pub(crate) fn snapshot(&self) -> Snapshot<T> {
        Arc::clone(&self.current.read())
    }
}
