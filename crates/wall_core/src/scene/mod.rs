//! Scene model: the keyed registry of panels shown on the wall.
//!
//! Panels are addressed by a stable [`PanelKey`]. The step that creates a
//! panel is the only one that inserts or removes that key, and any step can
//! ask whether it is present. Inside a panel, cards sit in a named grid and
//! expose named text and image slots declared by their template.

mod node;

pub use node::{Grid, GridCell, ImageSlot, Layout, Node, VisualState};

use std::fmt;

use thiserror::Error;

/// Stable identifier of a panel in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelKey(&'static str);

impl PanelKey {
    /// The conference schedule panel.
    pub const SCHEDULE: PanelKey = PanelKey("scheduleNode");
    /// The "top rated talks today" panel.
    pub const TOP_RATED_TODAY: PanelKey = PanelKey("topRatedToday");

    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Address of a node a transition can animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAddress {
    pub panel: PanelKey,
}

impl NodeAddress {
    pub fn panel(panel: PanelKey) -> Self {
        Self { panel }
    }
}

/// Errors from scene mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Panel '{0}' is already on the scene")]
    PanelExists(PanelKey),

    #[error("Template '{template}' has no slot '{slot}'")]
    MissingSlot { template: String, slot: String },

    #[error("Template '{template}' has no grid '{grid}'")]
    MissingGrid { template: String, grid: String },
}

/// The shared scene: panels in insertion (back to front) order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    panels: Vec<(PanelKey, Node)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a panel by key.
    pub fn lookup(&self, key: PanelKey) -> Option<&Node> {
        self.panels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, node)| node)
    }

    pub fn lookup_mut(&mut self, key: PanelKey) -> Option<&mut Node> {
        self.panels
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, key: PanelKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Put a panel on top of the scene.
    pub fn attach(&mut self, key: PanelKey, node: Node) -> Result<(), SceneError> {
        if self.contains(key) {
            return Err(SceneError::PanelExists(key));
        }
        self.panels.push((key, node));
        Ok(())
    }

    /// Take a panel off the scene.
    pub fn detach(&mut self, key: PanelKey) -> Option<Node> {
        let index = self.panels.iter().position(|(k, _)| *k == key)?;
        Some(self.panels.remove(index).1)
    }

    /// Resolve a transition target.
    pub fn node_mut(&mut self, address: &NodeAddress) -> Option<&mut Node> {
        self.lookup_mut(address.panel)
    }

    /// Panel keys in back to front order.
    pub fn keys(&self) -> Vec<PanelKey> {
        self.panels.iter().map(|(k, _)| *k).collect()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
