use crate::{
    effect::Effect,
    step::Step,
    stream::{Stream, View},
};

/// Emit every item of `items` in order, then finish.
///
/// Items are pulled one at a time: the first when the stream is first driven, each
/// later one when downstream has accepted the previous one.
///
/// ```rust
/// use spout::prelude::*;
///
/// let (items, ()) = to_vec::<_, Identity, _>(each(["a", "b", "c"]));
/// assert_eq!(items, vec!["a", "b", "c"]);
/// ```
pub fn each<'a, O: 'a, I: 'a, M: Effect, It>(items: It) -> Stream<'a, O, I, M, ()>
where
    It: IntoIterator<Item = O>,
    It::IntoIter: 'a,
{
    emit_from(items.into_iter())
}

fn emit_from<'a, O: 'a, I: 'a, M: Effect, It>(mut iter: It) -> Stream<'a, O, I, M, ()>
where
    It: Iterator<Item = O> + 'a,
{
    Stream::defer(move || match iter.next() {
        Some(value) => Stream::from_view(View::Emit(value, Box::new(move || emit_from(iter)))),
        None => Stream::pure(()),
    })
}

/// Emit `f()` forever.
///
/// `f` is first called when the stream is driven, and again each time downstream has
/// accepted the previous value. The stream never finishes on its own; pair it with a
/// consumer that does.
pub fn repeat_with<'a, O: 'a, I: 'a, M: Effect, R: 'a, F>(mut f: F) -> Stream<'a, O, I, M, R>
where
    F: FnMut() -> O + 'a,
{
    Stream::defer(move || {
        let value = f();
        Stream::from_view(View::Emit(value, Box::new(move || repeat_with(f))))
    })
}

/// Emit values computed from a running state until `step` completes.
///
/// `Step::Yielded((value, next))` emits `value` and continues from `next`;
/// `Step::Complete(r)` finishes with `r`. Like [`repeat_with`], `step` runs only as
/// the stream is driven.
///
/// ```rust
/// use spout::prelude::*;
///
/// let countdown = unfold(3_u32, |n| {
///     if n == 0 { Step::Complete("liftoff") } else { Step::Yielded((n, n - 1)) }
/// });
/// let (items, done) = to_vec::<_, Identity, _>(countdown);
/// assert_eq!(items, vec![3, 2, 1]);
/// assert_eq!(done, "liftoff");
/// ```
pub fn unfold<'a, O: 'a, I: 'a, M: Effect, R: 'a, S: 'a, F>(state: S, mut step: F) -> Stream<'a, O, I, M, R>
where
    F: FnMut(S) -> Step<(O, S), R> + 'a,
{
    Stream::defer(move || match step(state) {
        Step::Yielded((value, next)) => Stream::from_view(View::Emit(value, Box::new(move || unfold(next, step)))),
        Step::Complete(r) => Stream::pure(r),
    })
}
