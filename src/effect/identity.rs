use either::Either;

use super::Effect;

/// The trivial base effect: an action is the value it produces.
///
/// Streams over `Identity` are pure. A lifted value is computed before it is lifted,
/// but the effect step itself still waits for a driver to pass it. This is the natural
/// instance for tests and for stages that only emit and demand.
///
/// ```rust
/// use spout::prelude::*;
///
/// let counted: Saturated<'_, Identity, u32> = each(1..=4_u32)
///     .for_each(|_| pure(()))
///     .map_return(|()| 10);
/// assert_eq!(run(counted), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity;

impl Effect for Identity {
    type Action<'a, T: 'a> = T;

    #[inline]
    fn pure<'a, T: 'a>(value: T) -> T {
        value
    }

    #[inline]
    fn and_then<'a, A: 'a, B: 'a, F>(action: A, f: F) -> B
    where
        F: FnOnce(A) -> B + 'a,
    {
        f(action)
    }

    #[inline]
    fn map<'a, A: 'a, B: 'a, F>(action: A, f: F) -> B
    where
        F: FnOnce(A) -> B + 'a,
    {
        f(action)
    }

    fn tail_rec<'a, S: 'a, T: 'a, F>(seed: S, mut step: F) -> T
    where
        F: FnMut(S) -> Either<S, T> + 'a,
    {
        let mut state = seed;
        loop {
            match step(state) {
                Either::Left(next) => state = next,
                Either::Right(done) => return done,
            }
        }
    }
}
