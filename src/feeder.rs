//! Pushing values into a sink from the outside.
//!
//! A [`Sink`] over [`Identity`] normally has its demands answered by an upstream stage.
//! [`Feeder`] turns that around: the caller holds the sink and hands it one value at a
//! time, whenever a value happens to be available.

use thiserror::Error;
use tracing::trace;

use crate::{
    effect::Identity,
    kinds::{Sink, Void},
    stream::{Receive, View},
};

/// Errors from [`Feeder::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The sink finished before this value arrived.
    #[error("sink already finished")]
    Complete,
    /// The sink panicked while handling an earlier value.
    #[error("sink panicked while handling an earlier value")]
    Poisoned,
}

/// A sink waiting to be handed values.
///
/// # Examples
///
/// ```rust
/// use spout::{Feeder, FeedError, prelude::*};
///
/// let pair: Sink<'_, u32, Identity, u32> =
///     demand().and_then(|a: u32| demand().map_return(move |b: u32| a + b));
/// let mut feeder = Feeder::new(pair);
///
/// feeder.push(40).unwrap();
/// feeder.push(2).unwrap();
/// assert_eq!(feeder.push(7), Err(FeedError::Complete));
/// assert_eq!(feeder.into_return(), Some(42));
/// ```
pub struct Feeder<'a, I: 'a, R: 'a> {
    state: FeedState<'a, I, R>,
}

enum FeedState<'a, I: 'a, R: 'a> {
    Waiting(Receive<'a, Void, I, Identity, R>),
    Complete(R),
    Invalid,
}

impl<'a, I: 'a, R: 'a> Feeder<'a, I, R> {
    /// Run `sink` up to its first demand.
    pub fn new(sink: Sink<'a, I, Identity, R>) -> Self {
        Self { state: settle(sink) }
    }

    /// Hand `value` to the sink and run it up to its next demand.
    pub fn push(&mut self, value: I) -> Result<(), FeedError> {
        match std::mem::replace(&mut self.state, FeedState::Invalid) {
            FeedState::Waiting(receive) => {
                self.state = settle(receive(value));
                Ok(())
            }
            FeedState::Complete(r) => {
                self.state = FeedState::Complete(r);
                Err(FeedError::Complete)
            }
            FeedState::Invalid => Err(FeedError::Poisoned),
        }
    }

    /// Check if the sink has finished.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, FeedState::Complete(_))
    }

    /// Get a reference to the return value if the sink has finished.
    pub fn return_value(&self) -> Option<&R> {
        match &self.state {
            FeedState::Complete(r) => Some(r),
            _ => None,
        }
    }

    /// Consume the feeder and return the final value if the sink has finished.
    pub fn into_return(self) -> Option<R> {
        match self.state {
            FeedState::Complete(r) => Some(r),
            _ => None,
        }
    }
}

fn settle<'a, I: 'a, R: 'a>(mut sink: Sink<'a, I, Identity, R>) -> FeedState<'a, I, R> {
    loop {
        sink = match sink.view() {
            View::Pure(r) => {
                trace!("fed sink finished");
                return FeedState::Complete(r);
            }
            View::Effect(next) => next,
            View::Emit(value, _) => match value {},
            View::Await(receive) => return FeedState::Waiting(receive),
        };
    }
}
