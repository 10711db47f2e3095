use crate::{
    effect::Effect,
    stream::{Stream, View},
};

/// Emit `value` downstream and suspend until it has been accepted.
///
/// ```rust
/// use spout::prelude::*;
///
/// let stage: Stream<'_, &str, (), Identity, ()> = emit("hello");
/// let View::Emit(value, resume) = stage.view() else { unreachable!() };
/// assert_eq!(value, "hello");
/// assert_eq!(resume().into_pure(), Some(()));
/// ```
pub fn emit<'a, O: 'a, I: 'a, M: Effect>(value: O) -> Stream<'a, O, I, M, ()> {
    Stream::from_view(View::Emit(value, Box::new(|| Stream::pure(()))))
}

/// Suspend until upstream supplies a value, then finish with it.
///
/// ```rust
/// use spout::prelude::*;
///
/// let stage: Stream<'_, (), char, Identity, char> = demand();
/// let View::Await(receive) = stage.view() else { unreachable!() };
/// assert_eq!(receive('x').into_pure(), Some('x'));
/// ```
pub fn demand<'a, O: 'a, I: 'a, M: Effect>() -> Stream<'a, O, I, M, I> {
    Stream::from_view(View::Await(Box::new(Stream::pure)))
}

/// A stage that finishes immediately with `value`.
#[inline]
pub fn pure<'a, O: 'a, I: 'a, M: Effect, R: 'a>(value: R) -> Stream<'a, O, I, M, R> {
    Stream::pure(value)
}

/// A stage that performs a base action and finishes with its result.
///
/// Shorthand for [`Stream::lift`].
pub fn lift<'a, O: 'a, I: 'a, M: Effect, R: 'a>(action: M::Action<'a, R>) -> Stream<'a, O, I, M, R> {
    Stream::lift(action)
}
