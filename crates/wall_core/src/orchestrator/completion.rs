//! Single-use advance signal.
//!
//! [`completion`] creates a linked pair. The [`Advance`] half goes wherever
//! the step's work ends (usually a transition group's finish callback); the
//! [`Completion`] half is handed back to the engine. `advance` consumes the
//! handle, so a step cannot signal twice, and dropping the handle unfired
//! resolves the completion with [`AdvanceError::Abandoned`] instead of
//! leaving the engine waiting forever.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::errors::AdvanceError;
use crate::scene::Scene;
use crate::transition::OnFinished;

/// Create a linked advance/completion pair.
pub fn completion() -> (Advance, Completion) {
    let (tx, rx) = oneshot::channel();
    (
        Advance { tx },
        Completion {
            state: State::Pending(rx),
        },
    )
}

/// Create a completion that has already advanced.
pub fn advanced() -> Completion {
    let (advance, completion) = completion();
    advance.advance();
    completion
}

/// The sending half: fire once to let the engine move on.
#[derive(Debug)]
pub struct Advance {
    tx: oneshot::Sender<()>,
}

impl Advance {
    pub fn advance(self) {
        // The engine may have stopped waiting after a timeout.
        let _ = self.tx.send(());
    }

    /// Wrap into a transition callback that advances when the group ends.
    pub fn on_finished(self) -> OnFinished {
        Box::new(move |_: &mut Scene| self.advance())
    }
}

#[derive(Debug)]
enum State {
    Pending(oneshot::Receiver<()>),
    Done(Result<(), AdvanceError>),
}

/// The receiving half, awaited by the engine.
#[derive(Debug)]
pub struct Completion {
    state: State,
}

impl Completion {
    /// Outcome if already resolved, without waiting.
    pub fn try_outcome(&mut self) -> Option<Result<(), AdvanceError>> {
        match &mut self.state {
            State::Done(outcome) => Some(*outcome),
            State::Pending(rx) => {
                let outcome = match rx.try_recv() {
                    Ok(()) => Ok(()),
                    Err(oneshot::error::TryRecvError::Closed) => Err(AdvanceError::Abandoned),
                    Err(oneshot::error::TryRecvError::Empty) => return None,
                };
                self.state = State::Done(outcome);
                Some(outcome)
            }
        }
    }

    pub fn is_resolved(&mut self) -> bool {
        self.try_outcome().is_some()
    }
}

impl Future for Completion {
    type Output = Result<(), AdvanceError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match &mut this.state {
            State::Done(outcome) => Poll::Ready(*outcome),
            State::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(result) => {
                    let outcome = result.map_err(|_| AdvanceError::Abandoned);
                    this.state = State::Done(outcome);
                    Poll::Ready(outcome)
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}
