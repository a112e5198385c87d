//! Scene nodes built from templates.

use std::collections::BTreeMap;

use super::SceneError;
use crate::models::SpeakerImage;

/// Position of a node relative to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub x: f64,
    pub y: f64,
}

/// Animated properties driven by transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Rotation around the horizontal axis, in degrees.
    pub rotate_x: f64,
    pub opacity: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            rotate_x: 0.0,
            opacity: 1.0,
        }
    }
}

/// Picture slot of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlot {
    pub image: Option<SpeakerImage>,
    pub fit_width: f64,
    pub fit_height: f64,
    /// Corner arc of the rounded clip, zero for none.
    pub clip_arc: f64,
}

/// A card placed in a grid.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub column: u32,
    pub row: u32,
    pub node: Node,
}

/// Named grid of cards inside a panel.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: Vec<GridCell>,
}

impl Grid {
    /// Add a card at the given cell. Cards keep insertion order.
    pub fn place(&mut self, node: Node, column: u32, row: u32) {
        self.cells.push(GridCell { column, row, node });
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of occupied rows.
    pub fn row_count(&self) -> u32 {
        self.cells.iter().map(|c| c.row + 1).max().unwrap_or(0)
    }
}

/// A visual node instantiated from a template.
///
/// Slots exist only if the template declared them; writing an undeclared
/// slot is an error rather than a silent no-op.
#[derive(Debug, Clone)]
pub struct Node {
    template: String,
    pub layout: Layout,
    pub visual: VisualState,
    texts: BTreeMap<String, String>,
    images: BTreeMap<String, ImageSlot>,
    grids: BTreeMap<String, Grid>,
}

impl Node {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            layout: Layout::default(),
            visual: VisualState::default(),
            texts: BTreeMap::new(),
            images: BTreeMap::new(),
            grids: BTreeMap::new(),
        }
    }

    /// Declare an empty text slot.
    pub fn with_text_slot(mut self, slot: impl Into<String>) -> Self {
        self.texts.insert(slot.into(), String::new());
        self
    }

    /// Declare an empty image slot.
    pub fn with_image_slot(mut self, slot: impl Into<String>, fit: f64, clip_arc: f64) -> Self {
        self.images.insert(
            slot.into(),
            ImageSlot {
                image: None,
                fit_width: fit,
                fit_height: fit,
                clip_arc,
            },
        );
        self
    }

    /// Declare an empty grid.
    pub fn with_grid(mut self, grid: impl Into<String>) -> Self {
        self.grids.insert(grid.into(), Grid::default());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_text(&mut self, slot: &str, value: impl Into<String>) -> Result<(), SceneError> {
        match self.texts.get_mut(slot) {
            Some(text) => {
                *text = value.into();
                Ok(())
            }
            None => Err(self.missing_slot(slot)),
        }
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.texts.get(slot).map(String::as_str)
    }

    pub fn set_image(&mut self, slot: &str, image: SpeakerImage) -> Result<(), SceneError> {
        match self.images.get_mut(slot) {
            Some(target) => {
                target.image = Some(image);
                Ok(())
            }
            None => Err(self.missing_slot(slot)),
        }
    }

    pub fn image(&self, slot: &str) -> Option<&ImageSlot> {
        self.images.get(slot)
    }

    pub fn grid(&self, grid: &str) -> Option<&Grid> {
        self.grids.get(grid)
    }

    pub fn grid_mut(&mut self, grid: &str) -> Result<&mut Grid, SceneError> {
        let template = &self.template;
        self.grids
            .get_mut(grid)
            .ok_or_else(|| SceneError::MissingGrid {
                template: template.clone(),
                grid: grid.to_string(),
            })
    }

    fn missing_slot(&self, slot: &str) -> SceneError {
        SceneError::MissingSlot {
            template: self.template.clone(),
            slot: slot.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_slot_is_rejected() {
        let mut node = Node::new("session").with_text_slot("title");

        node.set_text("title", "Hello").unwrap();
        assert_eq!(node.text("title"), Some("Hello"));

        let err = node.set_text("room", "R1").unwrap_err();
        assert_eq!(
            err,
            SceneError::MissingSlot {
                template: "session".into(),
                slot: "room".into()
            }
        );
    }

    #[test]
    fn image_slot_keeps_fit_and_clip() {
        let mut node = Node::new("ratedTalk").with_image_slot("speakerImage", 64.0, 20.0);
        node.set_image("speakerImage", SpeakerImage::Placeholder).unwrap();

        let slot = node.image("speakerImage").unwrap();
        assert_eq!(slot.fit_width, 64.0);
        assert_eq!(slot.clip_arc, 20.0);
        assert_eq!(slot.image, Some(SpeakerImage::Placeholder));
    }

    #[test]
    fn grid_row_count_follows_cells() {
        let mut grid = Grid::default();
        assert_eq!(grid.row_count(), 0);
        grid.place(Node::new("a"), 0, 0);
        grid.place(Node::new("b"), 1, 0);
        grid.place(Node::new("c"), 0, 1);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.len(), 3);
    }
}
