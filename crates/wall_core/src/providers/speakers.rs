//! Speaker picture lookup.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::DataProvider;
use crate::models::{SpeakerImage, SpeakerKey};

/// Resolves speaker pictures by speaker key.
#[derive(Debug, Default)]
pub struct SpeakerImageProvider {
    images: RwLock<HashMap<SpeakerKey, String>>,
}

impl SpeakerImageProvider {
    pub fn new(images: HashMap<SpeakerKey, String>) -> Self {
        Self {
            images: RwLock::new(images),
        }
    }

    /// Register or replace a picture source.
    pub fn publish(&self, speaker: SpeakerKey, source: impl Into<String>) {
        self.images.write().insert(speaker, source.into());
    }

    /// Picture for `speaker`, or the placeholder when none is known.
    pub fn speaker_image(&self, speaker: Option<&SpeakerKey>) -> SpeakerImage {
        speaker
            .and_then(|key| self.images.read().get(key).cloned())
            .map(SpeakerImage::Loaded)
            .unwrap_or(SpeakerImage::Placeholder)
    }
}

impl DataProvider for SpeakerImageProvider {
    fn name(&self) -> &'static str {
        "SpeakerImageProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_speaker_gets_placeholder() {
        let provider = SpeakerImageProvider::default();
        provider.publish(SpeakerKey::new("alice"), "img/alice.png");

        assert_eq!(
            provider.speaker_image(Some(&SpeakerKey::new("alice"))),
            SpeakerImage::Loaded("img/alice.png".into())
        );
        assert!(provider
            .speaker_image(Some(&SpeakerKey::new("bob")))
            .is_placeholder());
        assert!(provider.speaker_image(None).is_placeholder());
    }
}
