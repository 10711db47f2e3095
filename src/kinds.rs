//! Named shapes of [`Stream`].
//!
//! These are aliases, not new machinery. Closing an end of a stream with [`Void`]
//! tells both the reader and the compiler that nothing can ever travel through it:
//! a [`Source`] can never be handed a value, a [`Sink`] can never emit one, and only a
//! [`Saturated`] stream is accepted by [`run`](crate::run).

use std::fmt;

use crate::Stream;

/// The uninhabited type. No value of `Void` can be built, so a stream whose emitted
/// type is `Void` can never reach an `Emit` step.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Void {}

impl Void {
    /// Turn an impossible value into any type.
    pub fn absurd<T>(self) -> T {
        match self {}
    }
}

impl fmt::Debug for Void {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

/// Emits `O`, never receives anything.
pub type Source<'a, O, M, R> = Stream<'a, O, Void, M, R>;

/// Receives `I`, never emits anything.
pub type Sink<'a, I, M, R> = Stream<'a, Void, I, M, R>;

/// Receives `I` and emits `O`. Written input-first, in pipeline order.
pub type Pipe<'a, I, O, M, R> = Stream<'a, O, I, M, R>;

/// Neither emits nor receives; only its effects and its result are left.
pub type Saturated<'a, M, R> = Stream<'a, Void, Void, M, R>;
