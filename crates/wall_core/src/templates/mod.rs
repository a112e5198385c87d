//! Templates for panels and cards.
//!
//! A template declares the slots a node exposes: text slots, an optional
//! picture slot and the grids cards are placed into. Steps instantiate
//! templates through a [`TemplateLoader`]; a loader that cannot resolve or
//! parse a template fails with [`TemplateError`], which steps treat as a
//! recoverable, per-invocation condition.
//!
//! Templates are TOML documents:
//!
//! ```toml
//! name = "ratedTalk"
//! texts = ["title", "speakers", "averageVote", "voteCount"]
//!
//! [image]
//! slot = "speakerImage"
//! fit = 64.0
//! clip_arc = 20.0
//! ```

mod library;

pub use library::TemplateLibrary;

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::Node;

/// Name of a template resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateRef(&'static str);

impl TemplateRef {
    /// Schedule panel with a `sessionGrid`.
    pub const SCHEDULE: TemplateRef = TemplateRef("schedule");
    /// One schedule entry.
    pub const SESSION: TemplateRef = TemplateRef("session");
    /// Top rated talks panel with a `sessionGrid`.
    pub const TOP_RATED_TODAY: TemplateRef = TemplateRef("topratedtalktoday");
    /// One rated talk with a speaker picture.
    pub const RATED_TALK: TemplateRef = TemplateRef("ratedTalk");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Picture slot declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub slot: String,
    #[serde(default = "default_fit")]
    pub fit: f64,
    #[serde(default)]
    pub clip_arc: f64,
}

fn default_fit() -> f64 {
    64.0
}

/// Declarative description of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub image: Option<ImageSpec>,
    #[serde(default)]
    pub grids: Vec<String>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texts: Vec::new(),
            image: None,
            grids: Vec::new(),
        }
    }

    pub fn with_texts(mut self, slots: &[&str]) -> Self {
        self.texts.extend(slots.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_image(mut self, slot: impl Into<String>, fit: f64, clip_arc: f64) -> Self {
        self.image = Some(ImageSpec {
            slot: slot.into(),
            fit,
            clip_arc,
        });
        self
    }

    pub fn with_grid(mut self, grid: impl Into<String>) -> Self {
        self.grids.push(grid.into());
        self
    }

    /// Build a fresh node with every declared slot empty.
    pub fn instantiate(&self) -> Node {
        let mut node = Node::new(self.name.clone());
        for slot in &self.texts {
            node = node.with_text_slot(slot.clone());
        }
        if let Some(image) = &self.image {
            node = node.with_image_slot(image.slot.clone(), image.fit, image.clip_arc);
        }
        for grid in &self.grids {
            node = node.with_grid(grid.clone());
        }
        node
    }
}

/// Errors while resolving templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse template {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Source of template instances.
pub trait TemplateLoader: Send + Sync {
    /// Create a fresh node from `template`.
    fn instantiate(&self, template: TemplateRef) -> Result<Node, TemplateError>;
}
