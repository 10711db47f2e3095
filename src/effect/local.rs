use std::future::Future;

use either::Either;
use futures::future::{FutureExt, LocalBoxFuture};

use super::Effect;

/// Single-threaded asynchronous actions.
///
/// An action is a boxed, non-`Send` future. Driving a stream over `Local` yields a
/// future that the caller awaits on whatever executor it already runs.
///
/// ```rust
/// use spout::prelude::*;
/// use spout::effect::Local;
///
/// let stream: Saturated<'_, Local, u32> =
///     lift(Local::from_future(async { 40_u32 })).and_then(|x: u32| pure(x + 2));
/// assert_eq!(futures::executor::block_on(run(stream)), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Local;

impl Local {
    /// Box a future as an action.
    pub fn from_future<'a, T: 'a, Fut>(future: Fut) -> LocalBoxFuture<'a, T>
    where
        Fut: Future<Output = T> + 'a,
    {
        future.boxed_local()
    }
}

impl Effect for Local {
    type Action<'a, T: 'a> = LocalBoxFuture<'a, T>;

    fn pure<'a, T: 'a>(value: T) -> Self::Action<'a, T> {
        futures::future::ready(value).boxed_local()
    }

    fn and_then<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> Self::Action<'a, B> + 'a,
    {
        async move { f(action.await).await }.boxed_local()
    }

    fn map<'a, A: 'a, B: 'a, F>(action: Self::Action<'a, A>, f: F) -> Self::Action<'a, B>
    where
        F: FnOnce(A) -> B + 'a,
    {
        action.map(f).boxed_local()
    }

    fn tail_rec<'a, S: 'a, T: 'a, F>(seed: S, mut step: F) -> Self::Action<'a, T>
    where
        F: FnMut(S) -> Self::Action<'a, Either<S, T>> + 'a,
    {
        async move {
            let mut state = seed;
            loop {
                match step(state).await {
                    Either::Left(next) => state = next,
                    Either::Right(done) => return done,
                }
            }
        }
        .boxed_local()
    }
}
