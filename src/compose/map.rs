//! Adapting the value types at either end of a stream.
//!
//! Both adapters leave effects, the other end, and the result untouched.

use crate::{
    effect::Effect,
    stream::{Stream, View},
};

/// Transform every value `stream` emits.
///
/// Equivalent to `for_each(stream, |x| emit(f(x)))`.
///
/// # Examples
///
/// ```
/// use spout::prelude::*;
///
/// let lengths = map_emit(|word: &str| word.len(), each(["one", "three"]));
/// let (items, ()) = to_vec::<_, Identity, _>(lengths);
/// assert_eq!(items, vec![3, 5]);
/// ```
pub fn map_emit<'a, O1: 'a, O2: 'a, I: 'a, M: Effect, R: 'a, F>(
    mut f: F,
    stream: Stream<'a, O1, I, M, R>,
) -> Stream<'a, O2, I, M, R>
where
    F: FnMut(O1) -> O2 + 'a,
{
    Stream::defer(move || match stream.view() {
        View::Pure(r) => Stream::pure(r),
        View::Effect(action) => Stream::effect(M::map::<Stream<'a, O1, I, M, R>, Stream<'a, O2, I, M, R>, _>(
            action,
            move |next| map_emit(f, next),
        )),
        View::Emit(value, resume) => {
            let mapped = f(value);
            Stream::from_view(View::Emit(mapped, Box::new(move || map_emit(f, resume()))))
        }
        View::Await(receive) => Stream::from_view(View::Await(Box::new(move |input| map_emit(f, receive(input))))),
    })
}

/// Transform every value before `stream` receives it.
///
/// Equivalent to `feed(stream, || demand().map_return(&mut f))`.
///
/// # Examples
///
/// ```
/// use spout::prelude::*;
///
/// let parsed: Pipe<'_, &str, (), Identity, u32> = map_input(|s: &str| s.len() as u32, demand());
/// let View::Await(receive) = parsed.view() else { unreachable!() };
/// assert_eq!(receive("four").into_pure(), Some(4));
/// ```
pub fn map_input<'a, O: 'a, I1: 'a, I2: 'a, M: Effect, R: 'a, F>(
    mut f: F,
    stream: Stream<'a, O, I2, M, R>,
) -> Stream<'a, O, I1, M, R>
where
    F: FnMut(I1) -> I2 + 'a,
{
    Stream::defer(move || match stream.view() {
        View::Pure(r) => Stream::pure(r),
        View::Effect(action) => Stream::effect(M::map::<Stream<'a, O, I2, M, R>, Stream<'a, O, I1, M, R>, _>(
            action,
            move |next| map_input(f, next),
        )),
        View::Emit(value, resume) => Stream::from_view(View::Emit(value, Box::new(move || map_input(f, resume())))),
        View::Await(receive) => Stream::from_view(View::Await(Box::new(move |input| {
            let converted = f(input);
            map_input(f, receive(converted))
        }))),
    })
}
