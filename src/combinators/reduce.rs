use either::Either;
use tracing::debug;

use crate::{effect::Effect, handler::contract_violation, kinds::Source, stream::View};

/// Drive `source` to the end, combining every value it emits into an accumulator.
///
/// Returns the accumulator together with the source's own result.
///
/// ```rust
/// use spout::prelude::*;
///
/// let words: Source<'_, &str, Identity, usize> = each(["to", "be"]).map_return(|()| 2);
/// let (sentence, count) = fold(words, String::new(), |acc, word| acc + word);
/// assert_eq!(sentence, "tobe");
/// assert_eq!(count, 2);
/// ```
///
/// # Panics
///
/// Panics if the source demands a value, which only a `Void`-typed
/// [`demand`](crate::demand) can do.
pub fn fold<'a, O: 'a, M: Effect, R: 'a, B: 'a, F>(
    source: Source<'a, O, M, R>,
    init: B,
    mut f: F,
) -> M::Action<'a, (B, R)>
where
    F: FnMut(B, O) -> B + 'a,
{
    let mut emitted = 0_u64;
    M::tail_rec::<(Source<'a, O, M, R>, B), (B, R), _>((source, init), move |(source, acc)| match source.view() {
        View::Pure(r) => {
            debug!(emitted, "fold reached the end of its source");
            M::pure(Either::Right((acc, r)))
        }
        View::Effect(action) => M::map::<Source<'a, O, M, R>, Either<(Source<'a, O, M, R>, B), (B, R)>, _>(
            action,
            move |next| Either::Left((next, acc)),
        ),
        View::Emit(value, resume) => {
            emitted += 1;
            let acc = f(acc, value);
            M::pure(Either::Left((resume(), acc)))
        }
        View::Await(_) => contract_violation("fold", "source demanded a value"),
    })
}

/// Collect everything `source` emits, together with its result.
///
/// ```rust
/// use spout::prelude::*;
///
/// let (items, ()) = to_vec::<_, Identity, _>(each(1..=3));
/// assert_eq!(items, vec![1, 2, 3]);
/// ```
pub fn to_vec<'a, O: 'a, M: Effect, R: 'a>(source: Source<'a, O, M, R>) -> M::Action<'a, (Vec<O>, R)> {
    fold(source, Vec::new(), |mut items, value| {
        items.push(value);
        items
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{each, emit, lift},
        effect::{Fallible, Identity, Io},
    };

    #[test]
    fn test_fold_sums_and_keeps_result() {
        let source: Source<'_, u64, Identity, &str> = each(1..=100).map_return(|()| "done");
        assert_eq!(fold(source, 0, |acc, x| acc + x), (5050, "done"));
    }

    #[test]
    fn test_to_vec_performs_effects_in_order() {
        let source: Source<'_, u32, Io, ()> = lift(Io::delay(|| 4))
            .and_then(|x: u32| emit(x))
            .then(lift(Io::delay(|| 5)))
            .and_then(|y: u32| emit(y));

        let action = to_vec(source);
        assert_eq!(Io::perform(action), (vec![4, 5], ()));
    }

    #[test]
    fn test_fold_stops_at_failure() {
        type Checked = Fallible<String>;

        let source: Source<'_, u32, Checked, ()> = emit(1)
            .then(lift(Err::<(), _>("sensor offline".to_string())))
            .then(emit(2));
        assert_eq!(to_vec(source), Err("sensor offline".to_string()));
    }

    #[test]
    fn test_to_vec_of_long_source() {
        let (items, ()) = to_vec::<_, Identity, _>(each(0..500_000_u32));
        assert_eq!(items.len(), 500_000);
        assert_eq!(items.last(), Some(&499_999));
    }
}
