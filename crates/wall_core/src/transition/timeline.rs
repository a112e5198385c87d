//! Presentation timeline.

use std::time::Duration;

use tracing::trace;

use super::{OnFinished, ParallelTransition, Transition};
use crate::scene::Scene;

struct Running {
    transition: Transition,
    elapsed: Duration,
    finished: bool,
}

struct ActiveGroup {
    members: Vec<Running>,
    on_finished: OnFinished,
}

impl ActiveGroup {
    fn is_finished(&self) -> bool {
        self.members.iter().all(|m| m.finished)
    }
}

/// Runs transition groups against the scene.
///
/// The timeline is single threaded: groups advance only inside
/// [`Timeline::tick`], and finish callbacks run there, in the order the
/// groups were started.
#[derive(Default)]
pub struct Timeline {
    groups: Vec<ActiveGroup>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a group.
    ///
    /// Every member's target jumps to its initial visual state. An empty
    /// group finishes immediately: `on_finished` runs before `play` returns.
    pub fn play(&mut self, group: ParallelTransition, scene: &mut Scene, on_finished: OnFinished) {
        if group.is_empty() {
            on_finished(scene);
            return;
        }

        let members = group
            .into_members()
            .into_iter()
            .map(|transition| {
                let finished = match scene.node_mut(&transition.target) {
                    Some(node) => {
                        node.visual = transition.kind.state_at(0.0);
                        false
                    }
                    None => true,
                };
                Running {
                    transition,
                    elapsed: Duration::ZERO,
                    finished,
                }
            })
            .collect();

        self.groups.push(ActiveGroup {
            members,
            on_finished,
        });
    }

    /// Advance every running transition by `dt` and fire the callbacks of
    /// groups whose last member finished.
    pub fn tick(&mut self, dt: Duration, scene: &mut Scene) {
        for group in &mut self.groups {
            for member in group.members.iter_mut().filter(|m| !m.finished) {
                member.elapsed += dt;
                let progress = member.transition.progress(member.elapsed);
                match scene.node_mut(&member.transition.target) {
                    Some(node) => {
                        node.visual = member.transition.kind.state_at(progress);
                        member.finished = progress >= 1.0;
                    }
                    None => {
                        trace!("Transition target {:?} is gone", member.transition.target);
                        member.finished = true;
                    }
                }
            }
        }

        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.groups)
            .into_iter()
            .partition(ActiveGroup::is_finished);
        self.groups = running;

        for group in finished {
            (group.on_finished)(scene);
        }
    }

    /// Number of groups still running.
    pub fn active_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn is_idle(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::scene::{Node, NodeAddress, PanelKey};

    fn counter() -> (Arc<AtomicUsize>, OnFinished) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&count);
        (
            count,
            Box::new(move |_: &mut Scene| {
                hits.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    fn scene_with_panel() -> Scene {
        let mut scene = Scene::new();
        scene
            .attach(PanelKey::SCHEDULE, Node::new("schedule"))
            .unwrap();
        scene
    }

    #[test]
    fn empty_group_finishes_inside_play() {
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let (count, on_finished) = counter();

        timeline.play(ParallelTransition::new(), &mut scene, on_finished);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timeline.is_idle());
    }

    #[test]
    fn group_joins_on_slowest_member() {
        let mut scene = scene_with_panel();
        scene
            .attach(PanelKey::TOP_RATED_TODAY, Node::new("topratedtalktoday"))
            .unwrap();
        let mut timeline = Timeline::new();
        let (count, on_finished) = counter();

        let group = ParallelTransition::new()
            .with(Transition::flip_in(NodeAddress::panel(PanelKey::SCHEDULE)))
            .with(
                Transition::flip_in(NodeAddress::panel(PanelKey::TOP_RATED_TODAY))
                    .with_duration(Duration::from_millis(2000)),
            );
        timeline.play(group, &mut scene, on_finished);

        let panel = scene.lookup(PanelKey::SCHEDULE).unwrap();
        assert_eq!(panel.visual.opacity, 0.0);

        timeline.tick(Duration::from_millis(1000), &mut scene);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(scene.lookup(PanelKey::SCHEDULE).unwrap().visual.opacity, 1.0);

        timeline.tick(Duration::from_millis(1000), &mut scene);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        timeline.tick(Duration::from_millis(1000), &mut scene);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timeline.is_idle());
    }

    #[test]
    fn missing_target_counts_as_finished() {
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let (count, on_finished) = counter();

        let group = ParallelTransition::new()
            .with(Transition::flip_out(NodeAddress::panel(PanelKey::SCHEDULE)));
        timeline.play(group, &mut scene, on_finished);
        assert_eq!(timeline.active_groups(), 1);

        timeline.tick(Duration::from_millis(16), &mut scene);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_can_detach_its_panel() {
        let mut scene = scene_with_panel();
        let mut timeline = Timeline::new();

        let group = ParallelTransition::new()
            .with(Transition::flip_out(NodeAddress::panel(PanelKey::SCHEDULE)));
        timeline.play(
            group,
            &mut scene,
            Box::new(|scene: &mut Scene| {
                scene.detach(PanelKey::SCHEDULE);
            }),
        );

        timeline.tick(Duration::from_millis(500), &mut scene);
        let half = scene.lookup(PanelKey::SCHEDULE).unwrap().visual;
        assert_eq!(half.rotate_x, 45.0);

        timeline.tick(Duration::from_millis(500), &mut scene);
        assert!(!scene.contains(PanelKey::SCHEDULE));
    }
}
