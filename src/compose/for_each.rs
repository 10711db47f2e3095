use crate::{
    effect::Effect,
    stream::{Stream, View},
};

/// Replace every value `source` emits with the stream `body` builds from it.
///
/// Each `Emit(a)` of `source` runs `body(a)` to completion: its emissions become
/// emissions of the result, its demands and effects are kept in place. Then `source`
/// resumes. Demands and effects of `source` pass through unchanged, and the result
/// finishes with whatever `source` finishes with.
///
/// Neither `source` nor `body` is touched until the result is driven.
///
/// The operator satisfies, for every `m`, `f` and `g`:
///
/// - `for_each(emit(x), f) == f(x)`
/// - `for_each(m, emit) == m`
/// - `for_each(for_each(m, f), g) == for_each(m, |x| for_each(f(x), g))`
///
/// ```rust
/// use spout::prelude::*;
///
/// let twice = for_each(each([1, 2, 3]), |x| emit(x).then(emit(x)));
/// let (items, ()) = to_vec::<_, Identity, _>(twice);
/// assert_eq!(items, vec![1, 1, 2, 2, 3, 3]);
/// ```
pub fn for_each<'a, A: 'a, B: 'a, I: 'a, M: Effect, R: 'a, F>(
    source: Stream<'a, A, I, M, R>,
    mut body: F,
) -> Stream<'a, B, I, M, R>
where
    F: FnMut(A) -> Stream<'a, B, I, M, ()> + 'a,
{
    Stream::defer(move || match source.view() {
        View::Pure(r) => Stream::pure(r),
        View::Effect(action) => Stream::effect(M::map::<Stream<'a, A, I, M, R>, Stream<'a, B, I, M, R>, _>(
            action,
            move |next| for_each(next, body),
        )),
        View::Await(receive) => {
            Stream::from_view(View::Await(Box::new(move |input| for_each(receive(input), body))))
        }
        View::Emit(value, resume) => body(value).and_then(move |()| for_each(resume(), body)),
    })
}

/// Point-free [`for_each`]: the function that runs `f` and substitutes `g` into it.
///
/// Together with [`emit`](crate::emit) as identity this forms a category:
/// `compose_right(emit, f) == f == compose_right(f, emit)`, and composition is
/// associative.
///
/// ```rust
/// use spout::prelude::*;
///
/// let spell = |word: &'static str| each(word.chars());
/// let shout = |c: char| emit(c.to_ascii_uppercase());
/// let mut loud = compose_right(spell, shout);
///
/// let (letters, ()) = to_vec::<_, Identity, _>(loud("hey"));
/// assert_eq!(letters, vec!['H', 'E', 'Y']);
/// ```
pub fn compose_right<'a, X: 'a, A: 'a, B: 'a, I: 'a, M: Effect, R: 'a, F, G>(
    mut f: F,
    g: G,
) -> impl FnMut(X) -> Stream<'a, B, I, M, R> + Clone + 'a
where
    F: FnMut(X) -> Stream<'a, A, I, M, R> + Clone + 'a,
    G: FnMut(A) -> Stream<'a, B, I, M, ()> + Clone + 'a,
{
    move |x| for_each(f(x), g.clone())
}

/// Answer every demand of `consumer` by running the stream `draw` builds.
///
/// This is the dual of [`for_each`]: each `Await` of `consumer` starts a fresh
/// `draw()`, whose emissions, demands and effects are spliced in, and whose result is
/// handed to `consumer` as the awaited value. `feed(c, demand) == c`.
///
/// ```rust
/// use spout::prelude::*;
///
/// let pair: Stream<'_, (), u32, Identity, (u32, u32)> =
///     demand().and_then(|a| demand().map_return(move |b| (a, b)));
///
/// let mut next = 10;
/// let answered: Saturated<'_, Identity, (u32, u32)> = feed(pair, move || {
///     next += 1;
///     pure(next)
/// })
/// .for_each(|()| pure(()));
/// assert_eq!(run(answered), (11, 12));
/// ```
pub fn feed<'a, O: 'a, I: 'a, I2: 'a, M: Effect, R: 'a, F>(
    consumer: Stream<'a, O, I, M, R>,
    mut draw: F,
) -> Stream<'a, O, I2, M, R>
where
    F: FnMut() -> Stream<'a, O, I2, M, I> + 'a,
{
    Stream::defer(move || match consumer.view() {
        View::Pure(r) => Stream::pure(r),
        View::Effect(action) => Stream::effect(M::map::<Stream<'a, O, I, M, R>, Stream<'a, O, I2, M, R>, _>(
            action,
            move |next| feed(next, draw),
        )),
        View::Emit(value, resume) => Stream::from_view(View::Emit(value, Box::new(move || feed(resume(), draw)))),
        View::Await(receive) => draw().and_then(move |input| feed(receive(input), draw)),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        build::{demand, each, emit, lift, pure},
        effect::{Identity, Io},
        handler::run,
        kinds::{Saturated, Void},
        testing::{Event, Recorder, Script},
    };

    type Body = Stream<'static, u32, u32, Io, ()>;
    type Subject = Stream<'static, u32, u32, Io, u32>;

    const CASES: u64 = 64;

    /// A body whose shape depends on both its script and the value it receives.
    fn body(script: Script, recorder: Recorder, salt: u32) -> impl FnMut(u32) -> Body + Clone + 'static {
        move |x| script.build_body(&recorder, x.wrapping_mul(salt))
    }

    #[test]
    fn test_left_identity() {
        for seed in 0..CASES {
            let recorder = Recorder::default();
            let f = body(Script::generate(seed), recorder.clone(), 3);

            let lhs = recorder.trace(for_each(emit(7), f.clone()), seed);
            let rhs = recorder.trace(f.clone()(7), seed);
            assert_eq!(lhs, rhs, "seed {seed}");
        }
    }

    #[test]
    fn test_right_identity() {
        for seed in 0..CASES {
            let recorder = Recorder::default();
            let script = Script::generate(seed);

            let lhs = recorder.trace(for_each(script.build(&recorder), emit), seed);
            let rhs = recorder.trace(script.build(&recorder), seed);
            assert_eq!(lhs, rhs, "seed {seed}");
        }
    }

    #[test]
    fn test_associativity() {
        for seed in 0..CASES {
            let recorder = Recorder::default();
            let m = Script::generate(seed);
            let f = body(Script::generate(seed.wrapping_add(1000)), recorder.clone(), 5);
            let g = body(Script::generate(seed.wrapping_add(2000)), recorder.clone(), 7);

            let lhs: Subject = for_each(for_each(m.build(&recorder), f.clone()), g.clone());
            let rhs: Subject = for_each(m.build(&recorder), {
                let (f, g) = (f.clone(), g.clone());
                move |x| {
                    let mut f = f.clone();
                    for_each(f(x), g.clone())
                }
            });

            assert_eq!(recorder.trace(lhs, seed), recorder.trace(rhs, seed), "seed {seed}");
        }
    }

    #[test]
    fn test_compose_right_category_laws() {
        for seed in 0..CASES {
            let recorder = Recorder::default();
            let f = body(Script::generate(seed), recorder.clone(), 11);
            let g = body(Script::generate(seed + 500), recorder.clone(), 13);
            let h = body(Script::generate(seed + 900), recorder.clone(), 17);

            let plain = recorder.trace(f.clone()(seed as u32), seed);
            let left = recorder.trace(compose_right(emit, f.clone())(seed as u32), seed);
            let right = recorder.trace(compose_right(f.clone(), emit)(seed as u32), seed);
            assert_eq!(left, plain, "seed {seed}");
            assert_eq!(right, plain, "seed {seed}");

            let nested_left = compose_right(compose_right(f.clone(), g.clone()), h.clone());
            let nested_right = compose_right(f.clone(), compose_right(g.clone(), h.clone()));
            assert_eq!(
                recorder.trace(nested_left.clone()(seed as u32), seed),
                recorder.trace(nested_right.clone()(seed as u32), seed),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_for_each_passes_awaits_and_effects_through() {
        let recorder = Recorder::default();
        let log = recorder.clone();
        let source: Subject = demand().and_then(move |x: u32| {
            lift(Io::delay(move || log.record(Event::Effect(x)))).then(emit(x)).map_return(move |()| x)
        });

        let events = recorder.trace(for_each(source, |x| emit(x + 100)), 4);
        assert_eq!(
            events,
            vec![
                Event::Await(4),
                Event::Effect(4),
                Event::Emit(104),
                Event::Return("4".to_string())
            ]
        );
    }

    #[test]
    fn test_for_each_runs_nothing_until_driven() {
        let calls = Cell::new(0);
        let counted: Saturated<'_, Identity, ()> = for_each(each([1, 2, 3]), |_: u32| {
            calls.set(calls.get() + 1);
            pure(())
        });
        assert_eq!(calls.get(), 0);

        run(counted);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_for_each_discarding_body_handles_long_sources() {
        let mut seen = 0_u32;
        let counted: Saturated<'_, Identity, ()> = for_each(each(0..200_000_u32), |_| {
            seen += 1;
            pure(())
        });
        run(counted);
        assert_eq!(seen, 200_000);
    }

    #[test]
    fn test_feed_right_identity() {
        for seed in 0..CASES {
            let recorder = Recorder::default();
            let script = Script::generate(seed);

            let lhs = recorder.trace(feed(script.build(&recorder), demand), seed);
            let rhs = recorder.trace(script.build(&recorder), seed);
            assert_eq!(lhs, rhs, "seed {seed}");
        }
    }

    #[test]
    fn test_feed_splices_draw_emissions() {
        let recorder = Recorder::default();
        let consumer: Subject = demand().and_then(|a: u32| demand().map_return(move |b: u32| a * b));
        let mut ticket = 0;
        let fed = feed(consumer, move || {
            ticket += 1;
            emit(ticket * 10).then(demand())
        });

        assert_eq!(
            recorder.trace(fed, 2),
            vec![
                Event::Emit(10),
                Event::Await(2),
                Event::Emit(20),
                Event::Await(3),
                Event::Return("6".to_string())
            ]
        );
    }

    #[test]
    fn test_feed_from_endless_supply() {
        let mut counter = 0;
        let summed: Stream<'_, Void, Void, Identity, u32> = feed(
            demand().and_then(|a: u32| demand().and_then(move |b: u32| demand().map_return(move |c: u32| a + b + c))),
            move || {
                counter += 1;
                pure(counter)
            },
        );
        assert_eq!(summed.into_pure(), Some(6));
    }
}
