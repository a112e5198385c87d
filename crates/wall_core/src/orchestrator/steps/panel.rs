//! Shared panel reveal routine and step config.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::orchestrator::completion::{completion, Completion};
use crate::orchestrator::context::MachineContext;
use crate::orchestrator::errors::StepResult;
use crate::providers::Snapshot;
use crate::scene::{Layout, Node, NodeAddress, PanelKey, SceneError};
use crate::templates::TemplateRef;
use crate::transition::{ParallelTransition, Transition};

/// Config bound to a panel step at construction.
///
/// ```toml
/// [[steps]]
/// step = "ShowSchedule"
/// [steps.config]
/// layoutX = 150.0
/// layoutY = 200.0
/// stepDuration = 15000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    pub layout_x: f64,
    pub layout_y: f64,
    /// Preferred step duration in milliseconds.
    pub step_duration: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            layout_x: 0.0,
            layout_y: 0.0,
            step_duration: 4000,
        }
    }
}

impl PanelConfig {
    pub fn layout(&self) -> Layout {
        Layout {
            x: self.layout_x,
            y: self.layout_y,
        }
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration)
    }
}

/// How cards fill a panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    /// Two cards per row, left to right then down.
    TwoColumn,
    /// One card per row.
    SingleColumn,
}

impl GridLayout {
    /// `(column, row)` of the card at `index`.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        match self {
            Self::TwoColumn => (index % 2, index / 2),
            Self::SingleColumn => (0, index),
        }
    }
}

/// Static description of a revealable panel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelSpec {
    pub key: PanelKey,
    pub template: TemplateRef,
    pub grid: &'static str,
    pub layout: GridLayout,
}

/// Reveal a panel filled with one card per record.
///
/// When the panel is already on the scene nothing is added and the returned
/// completion is already resolved. Otherwise the panel is built from its
/// template, `records` is read once and each record is turned into a card by
/// `build_card`. A card that fails is logged, recorded on the context and
/// left out; the next card takes its cell. The panel then flips in and the
/// completion resolves when the flip ends.
///
/// A panel template that cannot be instantiated is recorded the same way and
/// the step still advances, so the cycle never stalls on a bad template.
pub(crate) fn reveal<T, R, B>(
    ctx: &mut MachineContext<'_>,
    panel: &PanelSpec,
    config: &PanelConfig,
    records: R,
    build_card: B,
) -> StepResult<Completion>
where
    R: FnOnce() -> Snapshot<T>,
    B: Fn(&T) -> StepResult<Node>,
{
    let (advance, completion) = completion();
    let mut group = ParallelTransition::new();

    if ctx.scene().contains(panel.key) {
        debug!("Panel '{}' already shown", panel.key);
    } else {
        match ctx.templates().instantiate(panel.template) {
            Ok(mut node) => {
                node.layout = config.layout();
                match populate(ctx, panel, &mut node, records, build_card) {
                    Ok(placed) => {
                        debug!("Panel '{}' built with {} cards", panel.key, placed);
                        ctx.scene_mut().attach(panel.key, node)?;
                        group.add(Transition::flip_in(NodeAddress::panel(panel.key)));
                    }
                    Err(e) => {
                        error!("Panel template '{}' is unusable: {}", panel.template, e);
                        ctx.record_failure(format!("panel '{}': {}", panel.key, e));
                    }
                }
            }
            Err(e) => {
                error!("Failed to load panel template '{}': {}", panel.template, e);
                ctx.record_failure(format!("panel '{}': {}", panel.key, e));
            }
        }
    }

    ctx.play(group, advance.on_finished());
    Ok(completion)
}

fn populate<T, R, B>(
    ctx: &mut MachineContext<'_>,
    panel: &PanelSpec,
    node: &mut Node,
    records: R,
    build_card: B,
) -> Result<usize, SceneError>
where
    R: FnOnce() -> Snapshot<T>,
    B: Fn(&T) -> StepResult<Node>,
{
    let grid = node.grid_mut(panel.grid)?;
    let records = records();
    for (index, record) in records.iter().enumerate() {
        match build_card(record) {
            Ok(card) => {
                let (column, row) = panel.layout.cell(grid.len());
                grid.place(card, column, row);
            }
            Err(e) => {
                error!("Failed to build card {} for '{}': {}", index, panel.key, e);
                ctx.record_failure(format!("card {}: {}", index, e));
            }
        }
    }
    Ok(grid.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_fills_rows_left_to_right() {
        let cells: Vec<_> = (0..5).map(|i| GridLayout::TwoColumn.cell(i)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn single_column_one_card_per_row() {
        let cells: Vec<_> = (0..3).map(|i| GridLayout::SingleColumn.cell(i)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn config_defaults_apply_to_missing_fields() {
        let config: PanelConfig = toml::from_str("layoutX = 150.0").unwrap();
        assert_eq!(config.layout_x, 150.0);
        assert_eq!(config.layout_y, 0.0);
        assert_eq!(config.step_duration(), Duration::from_millis(4000));
    }
}
