//! Functions for driving streams into their base effect.
//!
//! [`run`] discharges a [`Saturated`] stream. [`handle`] closes both ends of an open
//! stream with callbacks first. [`next`] advances a source only as far as its next
//! emission. All of them loop through [`Effect::tail_rec`], so the stack stays flat
//! however many steps a stream takes.

use either::Either;
use tracing::{debug, error, trace};

use crate::{
    compose::{feed, for_each},
    effect::Effect,
    kinds::{Saturated, Source, Void},
    step::Step,
    stream::{Resume, Stream, View},
};

/// Run a saturated stream to its result.
///
/// Every `Effect` step is sequenced into the returned action; nothing else can
/// occur in a stream that neither emits nor receives.
///
/// # Panics
///
/// Panics if the stream demands a value. A `Saturated` stream can only do so if a
/// [`demand`](crate::demand) was typed with `Void` input, which no caller can answer.
///
/// ```rust
/// use spout::prelude::*;
///
/// let total: Saturated<'_, Identity, u32> = each([1, 2, 3])
///     .map_return(|()| 0)
///     .connect(demand().and_then(|a: u32| demand().map_return(move |b: u32| a + b)));
/// assert_eq!(run(total), 3);
/// ```
pub fn run<'a, M: Effect, R: 'a>(stream: Saturated<'a, M, R>) -> M::Action<'a, R> {
    debug!("running saturated stream");
    let mut steps = 0_u64;
    M::tail_rec::<Saturated<'a, M, R>, R, _>(stream, move |stream| match stream.view() {
        View::Pure(r) => {
            debug!(steps, "saturated stream finished");
            M::pure(Either::Right(r))
        }
        View::Effect(action) => {
            steps += 1;
            M::map::<Saturated<'a, M, R>, Either<Saturated<'a, M, R>, R>, _>(action, Either::Left)
        }
        View::Emit(value, _) => match value {},
        View::Await(_) => contract_violation("run", "saturated stream demanded a value"),
    })
}

/// Drive an open stream, answering its emissions with `on_emit` and its demands
/// with `on_await`.
///
/// Both callbacks return base actions, so answering can itself be effectful.
/// Equivalent to running `for_each(feed(stream, on_await), on_emit)`.
///
/// ```rust
/// use spout::prelude::*;
///
/// let mut printed = Vec::new();
/// let mut next_input = 0;
/// let echo: Stream<'_, u32, u32, Identity, &str> = demand()
///     .and_then(|x: u32| emit(x * 10))
///     .then(demand())
///     .and_then(|y: u32| emit(y * 10))
///     .map_return(|()| "done");
///
/// let done = handle(echo, |value| printed.push(value), || {
///     next_input += 1;
///     next_input
/// });
/// assert_eq!(done, "done");
/// assert_eq!(printed, vec![10, 20]);
/// ```
pub fn handle<'a, O: 'a, I: 'a, M: Effect, R: 'a, E, A>(
    stream: Stream<'a, O, I, M, R>,
    mut on_emit: E,
    mut on_await: A,
) -> M::Action<'a, R>
where
    E: FnMut(O) -> M::Action<'a, ()> + 'a,
    A: FnMut() -> M::Action<'a, I> + 'a,
{
    let answered = feed(stream, move || {
        trace!("answering demand");
        <Stream<'a, O, Void, M, I>>::lift(on_await())
    });
    let saturated = for_each(answered, move |value| {
        trace!("accepting emission");
        <Saturated<'a, M, ()>>::lift(on_emit(value))
    });
    run(saturated)
}

/// Run `source` until it emits, and stop there.
///
/// Yields the value together with the unresumed rest of the source, or completes
/// with the source's result. Nothing after the emission runs until the caller
/// resumes the returned continuation.
///
/// # Panics
///
/// Panics if the source demands a value, which only a `Void`-typed
/// [`demand`](crate::demand) can do.
///
/// ```rust
/// use spout::prelude::*;
///
/// let source: Source<'_, char, Identity, ()> = each(['x', 'y']);
/// let (first, rest) = next(source).unwrap_yielded();
/// assert_eq!(first, 'x');
/// let (second, rest) = next(rest()).unwrap_yielded();
/// assert_eq!(second, 'y');
/// assert!(next(rest()).is_complete());
/// ```
#[allow(clippy::type_complexity)]
pub fn next<'a, O: 'a, M: Effect, R: 'a>(
    source: Source<'a, O, M, R>,
) -> M::Action<'a, Step<(O, Resume<'a, O, Void, M, R>), R>> {
    type Outcome<'a, O, M, R> = Step<(O, Resume<'a, O, Void, M, R>), R>;

    M::tail_rec::<Source<'a, O, M, R>, Outcome<'a, O, M, R>, _>(source, |source| match source.view() {
        View::Pure(r) => M::pure(Either::Right(Step::Complete(r))),
        View::Effect(action) => {
            trace!("source performed an effect");
            M::map::<Source<'a, O, M, R>, Either<Source<'a, O, M, R>, Outcome<'a, O, M, R>>, _>(action, Either::Left)
        }
        View::Emit(value, resume) => M::pure(Either::Right(Step::Yielded((value, resume)))),
        View::Await(_) => contract_violation("next", "source demanded a value"),
    })
}

#[cold]
#[track_caller]
pub(crate) fn contract_violation(driver: &'static str, detail: &'static str) -> ! {
    error!(driver, detail, "stream contract violated");
    panic!("{driver}: {detail}")
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        build::{demand, each, emit, lift, pure},
        effect::{Fallible, Identity, Io},
    };

    fn count_up(n: u64, limit: u64) -> Saturated<'static, Io, u64> {
        lift(Io::delay(move || n)).and_then(move |n: u64| if n == limit { pure(n) } else { count_up(n + 1, limit) })
    }

    #[test]
    fn test_run_identity() {
        let stream: Saturated<'_, Identity, &str> = pure("plain");
        assert_eq!(run(stream), "plain");
    }

    #[test]
    fn test_run_survives_a_million_io_steps() {
        let action = run(count_up(0, 1_000_000));
        assert_eq!(Io::perform(action), 1_000_000);
    }

    #[test]
    fn test_run_survives_a_million_identity_steps() {
        fn count(n: u64, limit: u64) -> Saturated<'static, Identity, u64> {
            lift(n).and_then(move |n: u64| if n == limit { pure(n) } else { count(n + 1, limit) })
        }
        assert_eq!(run(count(0, 1_000_000)), 1_000_000);
    }

    #[test]
    fn test_run_survives_a_million_fallible_steps() {
        type Checked = Fallible<String>;

        fn count(n: u64, limit: u64) -> Saturated<'static, Checked, u64> {
            lift(Ok(n)).and_then(move |n: u64| if n == limit { pure(n) } else { count(n + 1, limit) })
        }
        assert_eq!(run(count(0, 1_000_000)), Ok(1_000_000));
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_run_survives_a_million_local_steps() {
        use futures::executor::block_on;

        use crate::effect::Local;

        fn count(n: u64, limit: u64) -> Saturated<'static, Local, u64> {
            lift(Local::pure(n)).and_then(move |n: u64| if n == limit { pure(n) } else { count(n + 1, limit) })
        }
        assert_eq!(block_on(run(count(0, 1_000_000))), 1_000_000);
    }

    #[test]
    fn test_left_nested_binds_run_in_constant_stack() {
        let mut io_chain: Saturated<'static, Io, u64> = pure(0);
        let mut plain_chain: Saturated<'static, Identity, u64> = pure(0);
        for _ in 0..1_000_000 {
            io_chain = io_chain.and_then(|n: u64| lift(Io::delay(move || n + 1)));
            plain_chain = plain_chain.and_then(|n: u64| lift(n + 1));
        }

        assert_eq!(Io::perform(run(io_chain)), 1_000_000);
        assert_eq!(run(plain_chain), 1_000_000);
    }

    #[test]
    fn test_left_nested_emissions_run_in_constant_stack() {
        let mut source: Source<'static, u32, Identity, u32> = pure(0);
        for _ in 0..500_000 {
            source = source.and_then(|n: u32| emit(n).map_return(move |()| n + 1));
        }

        let mut emitted = 0_u32;
        let mut rest = next(source);
        while let Step::Yielded((value, resume)) = rest {
            assert_eq!(value, emitted);
            emitted += 1;
            rest = next(resume());
        }
        assert_eq!(rest.unwrap_complete(), 500_000);
        assert_eq!(emitted, 500_000);
    }

    #[test]
    fn test_run_is_deterministic() {
        fn build(log: Rc<RefCell<Vec<u32>>>) -> Saturated<'static, Io, u32> {
            let sink = demand().and_then(|a: u32| demand().map_return(move |b: u32| a * 10 + b));
            let noisy = each([3_u32, 4, 5]).for_each(move |x| {
                let log = Rc::clone(&log);
                lift(Io::delay(move || log.borrow_mut().push(x))).then(emit(x))
            });
            noisy.map_return(|()| 0).connect(sink)
        }

        let first_log = Rc::new(RefCell::new(Vec::new()));
        let second_log = Rc::new(RefCell::new(Vec::new()));
        let first = Io::perform(run(build(Rc::clone(&first_log))));
        let second = Io::perform(run(build(Rc::clone(&second_log))));

        assert_eq!(first, 34);
        assert_eq!(first, second);
        assert_eq!(*first_log.borrow(), vec![3, 4]);
        assert_eq!(first_log, second_log);
    }

    #[test]
    fn test_run_stops_at_first_error() {
        type Checked = Fallible<&'static str>;

        let failing: Saturated<'_, Checked, u8> = lift(Err::<u8, _>("no disk")).and_then(|x: u8| pure(x + 1));
        assert_eq!(run(failing), Err("no disk"));

        let ok: Saturated<'_, Checked, u8> = lift(Ok(1)).and_then(|x: u8| lift(Ok(x + 1)));
        assert_eq!(run(ok), Ok(2));
    }

    #[test]
    #[should_panic(expected = "run: saturated stream demanded a value")]
    fn test_run_panics_on_void_demand() {
        let stuck: Saturated<'_, Identity, ()> = demand().map_return(|_: Void| ());
        run(stuck);
    }

    #[test]
    fn test_handle_answers_both_ends_with_io() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stage: Stream<'_, u32, u32, Io, u32> = demand()
            .and_then(|x: u32| emit(x + 1).map_return(move |()| x))
            .and_then(|x| demand().map_return(move |y: u32| x + y));

        let printed = Rc::clone(&log);
        let mut inputs = vec![7, 8].into_iter();
        let action = handle(
            stage,
            move |value| {
                let printed = Rc::clone(&printed);
                Io::delay(move || printed.borrow_mut().push(value))
            },
            move || {
                let input = inputs.next().unwrap_or_default();
                Io::delay(move || input)
            },
        );

        assert!(log.borrow().is_empty());
        assert_eq!(Io::perform(action), 15);
        assert_eq!(*log.borrow(), vec![8]);
    }

    #[test]
    fn test_next_leaves_the_rest_unresumed() {
        let resumed = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&resumed);
        let source: Source<'_, u32, Identity, &str> = emit(1)
            .and_then(move |()| {
                *counter.borrow_mut() += 1;
                emit(2)
            })
            .map_return(|()| "end");

        let (first, rest) = next(source).unwrap_yielded();
        assert_eq!(first, 1);
        assert_eq!(*resumed.borrow(), 0);

        let (second, rest) = next(rest()).unwrap_yielded();
        assert_eq!(second, 2);
        assert_eq!(*resumed.borrow(), 1);
        assert_eq!(next(rest()).unwrap_complete(), "end");
    }

    #[test]
    fn test_next_through_io_effects() {
        let source: Source<'_, &str, Io, ()> = lift(Io::delay(|| "late")).and_then(emit);
        let Step::Yielded((value, _)) = Io::perform(next(source)) else { panic!("expected a value") };
        assert_eq!(value, "late");
    }
}
