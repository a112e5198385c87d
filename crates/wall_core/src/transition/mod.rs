//! Visual transitions and the timeline that drives them.
//!
//! A [`Transition`] animates one node of the scene. Transitions started
//! together form a [`ParallelTransition`]: the group's finish callback runs
//! exactly once, after its last member has finished. The [`Timeline`] owns
//! every running group and advances them on [`Timeline::tick`]; callbacks
//! receive the scene so they can detach nodes once an exit animation is over.

mod timeline;

pub use timeline::Timeline;

use std::time::Duration;

use crate::scene::{NodeAddress, Scene, VisualState};

/// Callback fired once when a transition group finishes.
pub type OnFinished = Box<dyn FnOnce(&mut Scene) + Send>;

/// Duration of the flip transitions unless overridden.
pub const DEFAULT_FLIP_DURATION: Duration = Duration::from_millis(1000);

/// Supported animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Rotate in around the X axis from -90 degrees while fading in.
    FlipInX,
    /// Rotate out around the X axis to 90 degrees while fading out.
    FlipOutX,
}

impl TransitionKind {
    /// Visual state at `progress` in `[0, 1]`.
    pub fn state_at(&self, progress: f64) -> VisualState {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            Self::FlipInX => VisualState {
                rotate_x: -90.0 * (1.0 - progress),
                opacity: progress,
            },
            Self::FlipOutX => VisualState {
                rotate_x: 90.0 * progress,
                opacity: 1.0 - progress,
            },
        }
    }
}

/// One animation of one scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub target: NodeAddress,
    pub duration: Duration,
}

impl Transition {
    pub fn new(kind: TransitionKind, target: NodeAddress) -> Self {
        Self {
            kind,
            target,
            duration: DEFAULT_FLIP_DURATION,
        }
    }

    pub fn flip_in(target: NodeAddress) -> Self {
        Self::new(TransitionKind::FlipInX, target)
    }

    pub fn flip_out(target: NodeAddress) -> Self {
        Self::new(TransitionKind::FlipOutX, target)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Progress for `elapsed` time, 1.0 once the duration is reached.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Transitions run side by side and joined into one completion.
#[derive(Debug, Clone, Default)]
pub struct ParallelTransition {
    members: Vec<Transition>,
}

impl ParallelTransition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transition: Transition) -> &mut Self {
        self.members.push(transition);
        self
    }

    pub fn with(mut self, transition: Transition) -> Self {
        self.members.push(transition);
        self
    }

    pub fn members(&self) -> &[Transition] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn into_members(self) -> Vec<Transition> {
        self.members
    }
}
