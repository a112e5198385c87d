//! Schedule entries.

use serde::{Deserialize, Serialize};

use super::format;

/// One entry of the conference schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Talk title.
    #[serde(default)]
    pub title: Option<String>,
    /// Speaker display names, in billing order.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub speakers: Vec<String>,
    /// Room name.
    #[serde(default)]
    pub room: Option<String>,
    /// Start time as shown on the wall (e.g. "09:30").
    #[serde(default)]
    pub begin_time: Option<String>,
    /// End time as shown on the wall.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl SessionData {
    /// Create a session with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a speaker.
    pub fn with_speaker(mut self, name: impl Into<String>) -> Self {
        self.speakers.push(name.into());
        self
    }

    /// Set the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Set the time window.
    pub fn with_time(mut self, begin: impl Into<String>, end: impl Into<String>) -> Self {
        self.begin_time = Some(begin.into());
        self.end_time = Some(end.into());
        self
    }

    pub fn title_label(&self) -> String {
        self.title.clone().unwrap_or_default()
    }

    pub fn speakers_label(&self) -> String {
        format::speakers(&self.speakers)
    }

    pub fn room_label(&self) -> String {
        self.room.clone().unwrap_or_default()
    }

    pub fn time_label(&self) -> String {
        format::time_range(self.begin_time.as_deref(), self.end_time.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_from_full_record() {
        let session = SessionData::new("Rust at Scale")
            .with_speaker("A")
            .with_speaker("B")
            .with_room("Room 1")
            .with_time("09:30", "10:20");

        assert_eq!(session.title_label(), "Rust at Scale");
        assert_eq!(session.speakers_label(), "A, B");
        assert_eq!(session.room_label(), "Room 1");
        assert_eq!(session.time_label(), "09:30 - 10:20");
    }

    #[test]
    fn sparse_json_degrades_to_empty_labels() {
        let session: SessionData = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(session.title_label(), "");
        assert_eq!(session.speakers_label(), "");
        assert_eq!(session.room_label(), "");
        assert_eq!(session.time_label(), "");
    }

    #[test]
    fn null_speakers_degrade_to_empty_label() {
        let sessions: Vec<SessionData> =
            serde_json::from_str(r#"[{"title":"A","speakers":null},{"title":"B"}]"#).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].title_label(), "A");
        assert_eq!(sessions[0].speakers_label(), "");
        assert_eq!(sessions[1].title_label(), "B");
    }

    #[test]
    fn camel_case_fields_deserialize() {
        let json = r#"{"title":"T","speakers":["X"],"room":"R","beginTime":"11:00","endTime":"11:50"}"#;
        let session: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(session.time_label(), "11:00 - 11:50");
    }
}
