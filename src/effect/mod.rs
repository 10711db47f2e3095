//! The base effect a stream threads through its `Effect` steps.
//!
//! A [`Stream`](crate::Stream) never performs work on its own. Whenever a stage needs
//! its environment (read a clock, write a line, fail) it suspends on an action of the
//! base effect `M`, and the driver performs that action with the instance's own
//! sequencing. The core only needs three capabilities from `M`:
//!
//! - [`Effect::pure`] lifts a plain value,
//! - [`Effect::and_then`] sequences two actions,
//! - [`Effect::tail_rec`] runs a loop of actions without growing the call stack.
//!
//! # Instances
//!
//! - [`Identity`] - no effect at all; actions are plain values
//! - [`Io`] - deferred side effects, run with [`Io::perform`]
//! - [`Fallible`] - actions that may fail with `E`
//! - `Local` - single-threaded futures (feature `async`)

mod fallible;
mod identity;
mod io;
#[cfg(feature = "async")]
mod local;

use either::Either;

pub use fallible::Fallible;
pub use identity::Identity;
pub use io::Io;
#[cfg(feature = "async")]
pub use local::Local;

/// A base effect: a type-level family of actions `Action<'a, T>` with sequencing.
///
/// Implementors are zero-sized markers; the actions themselves are the associated type.
///
/// ```rust
/// use spout::effect::{Effect, Identity};
///
/// let action = Identity::and_then(Identity::pure(20), |x: i32| Identity::pure(x + 1));
/// assert_eq!(action, 21);
/// ```
pub trait Effect: Sized + 'static {
    /// A base computation producing a `T`.
    type Action<'a, T: 'a>: 'a;

    /// Lift a value into an action that produces it without doing anything.
    fn pure<'a, T: 'a>(value: T) -> Self::Action<'a, T>;

    /// Run `action`, then the action built from its result.
    fn and_then<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> Self::Action<'a, B> + 'a;

    /// Transform the result of an action.
    fn map<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> B + 'a,
    {
        Self::and_then::<A, B, _>(action, move |a| Self::pure(f(a)))
    }

    /// Repeat `step` from `seed` until it produces `Right`.
    ///
    /// `Left(state)` feeds `state` into the next iteration. The default implementation
    /// recurses through [`Effect::and_then`]; instances override it with a loop so that
    /// drivers stay within constant stack for unbounded chains of effect steps.
    fn tail_rec<'a, S: 'a, T: 'a, F>(seed: S, mut step: F) -> Self::Action<'a, T>
    where
        F: FnMut(S) -> Self::Action<'a, Either<S, T>> + 'a,
    {
        let first = step(seed);
        Self::and_then::<Either<S, T>, T, _>(first, move |next| match next {
            Either::Left(state) => Self::tail_rec::<S, T, F>(state, step),
            Either::Right(done) => Self::pure(done),
        })
    }
}
