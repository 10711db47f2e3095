use either::Either;

use super::Effect;

/// Deferred side effects.
///
/// An action is a boxed closure that does its work only when [`Io::perform`] calls it.
/// Because nothing runs while a stream is being built, chains of `Io` steps of any
/// length are driven in constant stack.
///
/// ```rust
/// use std::cell::Cell;
/// use spout::effect::{Effect, Io};
///
/// let hits = Cell::new(0);
/// let action = Io::and_then(Io::delay(|| hits.set(hits.get() + 1)), |()| Io::pure(5));
/// assert_eq!(hits.get(), 0);
/// assert_eq!(Io::perform(action), 5);
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Io;

impl Io {
    /// Wrap a side-effecting closure as an action.
    pub fn delay<'a, T: 'a, F>(f: F) -> Box<dyn FnOnce() -> T + 'a>
    where
        F: FnOnce() -> T + 'a,
    {
        Box::new(f)
    }

    /// Execute an action, returning what it produces.
    pub fn perform<T>(action: Box<dyn FnOnce() -> T + '_>) -> T {
        action()
    }
}

impl Effect for Io {
    type Action<'a, T: 'a> = Box<dyn FnOnce() -> T + 'a>;

    fn pure<'a, T: 'a>(value: T) -> Self::Action<'a, T> {
        Box::new(move || value)
    }

    fn and_then<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> Self::Action<'a, B> + 'a,
    {
        Box::new(move || f(action())())
    }

    fn map<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> B + 'a,
    {
        Box::new(move || f(action()))
    }

    fn tail_rec<'a, S: 'a, T: 'a, F>(seed: S, mut step: F) -> Self::Action<'a, T>
    where
        F: FnMut(S) -> Self::Action<'a, Either<S, T>> + 'a,
    {
        Box::new(move || {
            let mut state = seed;
            loop {
                match step(state)() {
                    Either::Left(next) => state = next,
                    Either::Right(done) => return done,
                }
            }
        })
    }
}
