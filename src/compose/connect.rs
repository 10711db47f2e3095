use crate::{
    effect::Effect,
    stream::{Receive, Resume, Stream, View},
};

/// Producer side of a [`connect`]: either a stream ready to be driven or one
/// suspended right after an emission, not yet resumed.
enum Upstream<'a, A: 'a, I: 'a, M: Effect, R: 'a> {
    Ready(Stream<'a, A, I, M, R>),
    Paused(Resume<'a, A, I, M, R>),
}

impl<'a, A: 'a, I: 'a, M: Effect, R: 'a> Upstream<'a, A, I, M, R> {
    fn resume(self) -> Stream<'a, A, I, M, R> {
        match self {
            Upstream::Ready(stream) => stream,
            Upstream::Paused(resume) => resume(),
        }
    }
}

/// Consumer side of a [`connect`].
enum Downstream<'a, B: 'a, A: 'a, M: Effect, R: 'a> {
    Running(Stream<'a, B, A, M, R>),
    Waiting(Receive<'a, B, A, M, R>),
}

/// Pull-compose `producer` into `consumer`.
///
/// The consumer drives. Each time it demands a value, the producer runs until it
/// emits one, and that value is handed over. The producer is only resumed when the
/// consumer demands again, so it never runs ahead.
///
/// Whichever side finishes first decides the result; the other side is dropped where
/// it stands, without being resumed. Effects of both sides happen in the order they
/// are reached, and demands of the producer become demands of the composite.
///
/// ```rust
/// use spout::prelude::*;
///
/// let naturals: Source<'_, u32, Identity, &str> = repeat_with({
///     let mut n = 0;
///     move || {
///         n += 1;
///         n
///     }
/// });
/// let first_three: Sink<'_, u32, Identity, &str> = demand()
///     .and_then(|a| demand().and_then(move |b| demand().map_return(move |c| a + b + c)))
///     .map_return(|sum| if sum == 6 { "six" } else { "other" });
///
/// let summed: Saturated<'_, Identity, &str> = connect(naturals, first_three);
/// assert_eq!(run(summed), "six");
/// ```
pub fn connect<'a, A: 'a, B: 'a, I: 'a, M: Effect, R: 'a>(
    producer: Stream<'a, A, I, M, R>,
    consumer: Stream<'a, B, A, M, R>,
) -> Stream<'a, B, I, M, R> {
    pull(Upstream::Ready(producer), Downstream::Running(consumer))
}

fn pull<'a, A: 'a, B: 'a, I: 'a, M: Effect, R: 'a>(
    up: Upstream<'a, A, I, M, R>,
    down: Downstream<'a, B, A, M, R>,
) -> Stream<'a, B, I, M, R> {
    Stream::defer(move || step(up, down))
}

/// Advance both sides until the composite has a step of its own to report.
fn step<'a, A: 'a, B: 'a, I: 'a, M: Effect, R: 'a>(
    mut up: Upstream<'a, A, I, M, R>,
    mut down: Downstream<'a, B, A, M, R>,
) -> Stream<'a, B, I, M, R> {
    loop {
        down = match down {
            Downstream::Running(consumer) => match consumer.view() {
                View::Pure(r) => return Stream::pure(r),
                View::Effect(action) => {
                    return Stream::effect(M::map::<Stream<'a, B, A, M, R>, Stream<'a, B, I, M, R>, _>(
                        action,
                        move |next| pull(up, Downstream::Running(next)),
                    ));
                }
                View::Emit(value, resume) => {
                    return Stream::from_view(View::Emit(
                        value,
                        Box::new(move || pull(up, Downstream::Running(resume()))),
                    ));
                }
                View::Await(receive) => Downstream::Waiting(receive),
            },
            Downstream::Waiting(receive) => match up.resume().view() {
                View::Pure(r) => return Stream::pure(r),
                View::Effect(action) => {
                    return Stream::effect(M::map::<Stream<'a, A, I, M, R>, Stream<'a, B, I, M, R>, _>(
                        action,
                        move |next| pull(Upstream::Ready(next), Downstream::Waiting(receive)),
                    ));
                }
                View::Await(ask) => {
                    return Stream::from_view(View::Await(Box::new(move |input| {
                        pull(Upstream::Ready(ask(input)), Downstream::Waiting(receive))
                    })));
                }
                View::Emit(value, resume) => {
                    up = Upstream::Paused(resume);
                    Downstream::Running(receive(value))
                }
            },
        };
    }
}

/// The identity pipe: forward every value it receives, forever.
///
/// `connect(cat(), p)` and `connect(p, cat())` both behave exactly like `p`.
///
/// ```rust
/// use spout::prelude::*;
///
/// let forwarded: Source<'_, char, Identity, ()> = each("ab".chars()).connect(cat());
/// let (letters, ()) = to_vec::<_, Identity, _>(forwarded);
/// assert_eq!(letters, vec!['a', 'b']);
/// ```
pub fn cat<'a, A: 'a, M: Effect, R: 'a>() -> Stream<'a, A, A, M, R> {
    Stream::from_view(View::Await(Box::new(|value| Stream::from_view(View::Emit(value, Box::new(cat))))))
}
