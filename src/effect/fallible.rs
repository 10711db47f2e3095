use std::marker::PhantomData;

use either::Either;

use super::Effect;

/// Actions that may fail with an `E`.
///
/// An action is a `Result<T, E>`. A stream that reaches an `Effect` step holding
/// `Err(e)` ends right there, and every composition operator and driver hands the
/// `Err(e)` through untouched: the core never catches or wraps it.
///
/// ```rust
/// use spout::prelude::*;
/// use spout::effect::Fallible;
///
/// let stream: Saturated<'_, Fallible<String>, u8> =
///     lift(Err::<(), _>("disk on fire".to_string())).then(pure(1));
/// assert_eq!(run(stream), Err("disk on fire".to_string()));
/// ```
pub struct Fallible<E>(PhantomData<fn() -> E>);

impl<E: 'static> Effect for Fallible<E> {
    type Action<'a, T: 'a> = Result<T, E>;

    #[inline]
    fn pure<'a, T: 'a>(value: T) -> Result<T, E> {
        Ok(value)
    }

    #[inline]
    fn and_then<'a, A: 'a, B: 'a, F>(action: Result<A, E>, f: F) -> Result<B, E>
    where
        F: FnOnce(A) -> Result<B, E> + 'a,
    {
        action.and_then(f)
    }

    #[inline]
    fn map<'a, A: 'a, B: 'a, F>(action: Result<A, E>, f: F) -> Result<B, E>
    where
        F: FnOnce(A) -> B + 'a,
    {
        action.map(f)
    }

    fn tail_rec<'a, S: 'a, T: 'a, F>(seed: S, mut step: F) -> Result<T, E>
    where
        F: FnMut(S) -> Result<Either<S, T>, E> + 'a,
    {
        let mut state = seed;
        loop {
            match step(state)? {
                Either::Left(next) => state = next,
                Either::Right(done) => return Ok(done),
            }
        }
    }
}
