//! JSON loading for the record providers.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::SpeakerKey;

/// Errors while reading provider data files.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to read data file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a JSON array of records. Record order in the file is kept.
pub fn load_records<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, ProviderError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ProviderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ProviderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON object mapping speaker keys to picture sources.
pub fn load_speaker_images(
    path: impl AsRef<Path>,
) -> Result<HashMap<SpeakerKey, String>, ProviderError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ProviderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|source| ProviderError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(raw
        .into_iter()
        .map(|(key, source)| (SpeakerKey::new(key), source))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionData;
    use tempfile::tempdir;

    #[test]
    fn records_keep_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        fs::write(&path, r#"[{"title":"B"},{"title":"A"}]"#).unwrap();

        let sessions: Vec<SessionData> = load_records(&path).unwrap();
        assert_eq!(sessions[0].title_label(), "B");
        assert_eq!(sessions[1].title_label(), "A");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let err = load_records::<SessionData>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProviderError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_records::<SessionData>(&path).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn speaker_images_map_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("speakers.json");
        fs::write(&path, r#"{"alice":"img/alice.png"}"#).unwrap();

        let images = load_speaker_images(&path).unwrap();
        assert_eq!(
            images.get(&SpeakerKey::new("alice")).map(String::as_str),
            Some("img/alice.png")
        );
    }
}
