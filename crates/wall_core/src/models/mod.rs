//! Domain records supplied by the data providers.
//!
//! Records are plain attribute bags with no identity beyond field equality.
//! Providers produce them; steps only read them. Any field may be absent in
//! the source data and formats as an empty string rather than failing.

use serde::{Deserialize, Deserializer};

pub mod format;
mod session;
mod talk;

pub use session::SessionData;
pub use talk::{SpeakerImage, SpeakerKey, VotedTalk};

/// Read a JSON `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
