use crate::{
    build::{demand, emit},
    compose::{cat, map_emit},
    effect::Effect,
    kinds::{Pipe, Sink},
    stream::Stream,
};

/// Apply `f` to every value passing through.
///
/// ```rust
/// use spout::prelude::*;
///
/// let squares = each(1..=3_u32).connect(map(|x: u32| x * x));
/// let (items, ()) = to_vec::<_, Identity, _>(squares);
/// assert_eq!(items, vec![1, 4, 9]);
/// ```
pub fn map<'a, A: 'a, B: 'a, M: Effect, R: 'a, F>(f: F) -> Pipe<'a, A, B, M, R>
where
    F: FnMut(A) -> B + 'a,
{
    map_emit(f, cat())
}

/// Forward only the values `keep` accepts.
pub fn filter<'a, A: 'a, M: Effect, R: 'a, P>(mut keep: P) -> Pipe<'a, A, A, M, R>
where
    P: FnMut(&A) -> bool + 'a,
{
    demand().and_then(move |value: A| {
        if keep(&value) {
            emit(value).and_then(move |()| filter(keep))
        } else {
            filter(keep)
        }
    })
}

/// Forward the first `n` values, then finish.
///
/// Upstream is not asked for anything beyond the `n`-th value.
///
/// ```rust
/// use spout::prelude::*;
///
/// let first_two = each(["a", "b", "c"]).connect(take(2));
/// let (items, ()) = to_vec::<_, Identity, _>(first_two);
/// assert_eq!(items, vec!["a", "b"]);
/// ```
pub fn take<'a, A: 'a, M: Effect>(n: usize) -> Pipe<'a, A, A, M, ()> {
    if n == 0 {
        return Stream::pure(());
    }
    demand().and_then(move |value: A| emit(value).and_then(move |()| take(n - 1)))
}

/// Forward values while `keep` accepts them; finish on the first one it rejects.
///
/// The rejected value is dropped.
pub fn take_while<'a, A: 'a, M: Effect, P>(mut keep: P) -> Pipe<'a, A, A, M, ()>
where
    P: FnMut(&A) -> bool + 'a,
{
    demand().and_then(move |value: A| {
        if keep(&value) {
            emit(value).and_then(move |()| take_while(keep))
        } else {
            Stream::pure(())
        }
    })
}

/// Discard the first `n` values, then forward the rest.
pub fn skip<'a, A: 'a, M: Effect, R: 'a>(n: usize) -> Pipe<'a, A, A, M, R> {
    if n == 0 {
        return cat();
    }
    demand().and_then(move |_: A| skip(n - 1))
}

/// Accept and discard every value, forever.
///
/// Connecting a source to `drain` runs it for its effects alone.
pub fn drain<'a, A: 'a, M: Effect, R: 'a>() -> Sink<'a, A, M, R> {
    demand().and_then(|_: A| drain())
}
