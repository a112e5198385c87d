//! In-memory template library with built-in defaults and a directory loader.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Template, TemplateError, TemplateLoader, TemplateRef};
use crate::scene::Node;

/// A template file that failed to load, kept so lookups report it.
#[derive(Debug, Clone)]
enum Broken {
    Read {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Broken {
    fn from_error(err: TemplateError) -> Option<Self> {
        match err {
            TemplateError::Read { path, source } => Some(Broken::Read {
                path,
                kind: source.kind(),
                message: source.to_string(),
            }),
            TemplateError::Parse { path, source } => Some(Broken::Parse { path, source }),
            TemplateError::NotFound(_) => None,
        }
    }

    fn to_error(&self) -> TemplateError {
        match self {
            Broken::Read {
                path,
                kind,
                message,
            } => TemplateError::Read {
                path: path.clone(),
                source: io::Error::new(*kind, message.clone()),
            },
            Broken::Parse { path, source } => TemplateError::Parse {
                path: path.clone(),
                source: source.clone(),
            },
        }
    }
}

/// Templates keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: HashMap<String, Template>,
    /// Files that failed to load, keyed by file stem.
    broken: HashMap<String, Broken>,
}

impl TemplateLibrary {
    /// Empty library. Every lookup fails until templates are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with the four panel and card templates the steps use.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library
            .insert(Template::new(TemplateRef::SCHEDULE.name()).with_grid("sessionGrid"))
            .insert(
                Template::new(TemplateRef::SESSION.name())
                    .with_texts(&["title", "speakers", "room", "startTime"]),
            )
            .insert(Template::new(TemplateRef::TOP_RATED_TODAY.name()).with_grid("sessionGrid"))
            .insert(
                Template::new(TemplateRef::RATED_TALK.name())
                    .with_texts(&["title", "speakers", "averageVote", "voteCount"])
                    .with_image("speakerImage", 64.0, 20.0),
            );
        library
    }

    /// Load every `*.toml` file in `dir` on top of the built-in templates.
    ///
    /// Only an unreadable directory fails the load. A file that cannot be
    /// read or parsed is logged and replaces the template named by its file
    /// stem, so instantiating that template reports the stored error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let mut library = Self::builtin();

        let entries = fs::read_dir(dir).map_err(|source| TemplateError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            match Self::load_file(&path) {
                Ok(template) => {
                    debug!("Loaded template '{}' from {}", template.name, path.display());
                    library.insert(template);
                }
                Err(e) => {
                    warn!("{}", e);
                    let stem = path
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    if let Some(broken) = Broken::from_error(e) {
                        library.remove(&stem);
                        library.broken.insert(stem, broken);
                    }
                }
            }
        }

        Ok(library)
    }

    /// Parse a single template file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Template, TemplateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add or replace a template.
    pub fn insert(&mut self, template: Template) -> &mut Self {
        self.broken.remove(&template.name);
        self.templates.insert(template.name.clone(), template);
        self
    }

    /// Remove a template by name.
    pub fn remove(&mut self, name: &str) -> Option<Template> {
        self.templates.remove(name)
    }

    /// Names of templates whose files failed to load.
    pub fn broken_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.broken.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateLoader for TemplateLibrary {
    fn instantiate(&self, template: TemplateRef) -> Result<Node, TemplateError> {
        let name = template.name();
        if let Some(found) = self.get(name) {
            return Ok(found.instantiate());
        }
        match self.broken.get(name) {
            Some(broken) => Err(broken.to_error()),
            None => Err(TemplateError::NotFound(name.to_string())),
        }
    }
}
