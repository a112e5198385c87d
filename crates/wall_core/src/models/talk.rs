//! Ranked talks and speaker images.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::format;

/// Identity of a speaker, used to look up their picture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerKey(pub String);

impl SpeakerKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeakerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picture shown next to a rated talk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "source")]
pub enum SpeakerImage {
    /// Image resolved from a path or URL.
    Loaded(String),
    /// Stand-in used when the speaker has no known picture.
    #[default]
    Placeholder,
}

impl SpeakerImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SpeakerImage::Placeholder)
    }
}

/// A talk with its audience rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotedTalk {
    #[serde(default)]
    pub proposal_title: Option<String>,
    /// Speaker display names.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub speakers: Vec<String>,
    /// Speaker whose picture is shown on the card.
    #[serde(default)]
    pub speaker: Option<SpeakerKey>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rating_average_score: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rating_total_votes: u32,
}

impl VotedTalk {
    pub fn new(title: impl Into<String>, average: f64, votes: u32) -> Self {
        Self {
            proposal_title: Some(title.into()),
            rating_average_score: average,
            rating_total_votes: votes,
            ..Default::default()
        }
    }

    /// Add a speaker name. The first speaker added also becomes the picture key.
    pub fn with_speaker(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.speaker.is_none() {
            self.speaker = Some(SpeakerKey::new(name.clone()));
        }
        self.speakers.push(name);
        self
    }

    pub fn title_label(&self) -> String {
        self.proposal_title.clone().unwrap_or_default()
    }

    pub fn speakers_label(&self) -> String {
        format::speakers(&self.speakers)
    }

    pub fn rating_label(&self) -> String {
        format::rating(self.rating_average_score)
    }

    pub fn votes_label(&self) -> String {
        format::vote_count(self.rating_total_votes)
    }
}
