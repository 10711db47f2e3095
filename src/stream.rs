//! The stream handle.
//!
//! A [`Stream`] is a stage that has been built but not yet (fully) run. Calling
//! [`Stream::view`] tells you what the stage wants next: it is finished
//! ([`View::Pure`]), it needs the base effect to do something ([`View::Effect`]), it has
//! a value for downstream ([`View::Emit`]), or it needs a value from upstream
//! ([`View::Await`]). Everything after that point is captured in a boxed continuation,
//! so a handle of any length occupies a constant amount of memory.
//!
//! Internally a handle is the step it is stopped at plus a queue of continuations
//! waiting for that step's result. [`Stream::and_then`] only pushes onto the queue and
//! [`Stream::view`] drains it in a loop, so chains of binds nested in either direction
//! never deepen the call stack.
//!
//! # Examples
//!
//! ```rust
//! use spout::prelude::*;
//!
//! // Demand two numbers, emit their sum, return how many were read.
//! let adder: Pipe<'_, u32, u32, Identity, usize> = demand()
//!     .and_then(|a| demand().map_return(move |b| a + b))
//!     .and_then(|sum| emit(sum))
//!     .map_return(|()| 2);
//!
//! let summed: Saturated<'_, Identity, usize> = each([3, 4])
//!     .map_return(|()| 0)
//!     .connect(adder)
//!     .for_each(|sum| {
//!         assert_eq!(sum, 7);
//!         pure(())
//!     });
//! assert_eq!(run(summed), 2);
//! ```

use std::{collections::VecDeque, fmt, marker::PhantomData};

use crate::{compose, effect::Effect, erased::Erased};

/// Continuation of an [`View::Emit`] step, run once the value has been accepted.
pub type Resume<'a, O, I, M, R> = Box<dyn FnOnce() -> Stream<'a, O, I, M, R> + 'a>;

/// Continuation of an [`View::Await`] step, run with the value that was supplied.
pub type Receive<'a, O, I, M, R> = Box<dyn FnOnce(I) -> Stream<'a, O, I, M, R> + 'a>;

/// The next step of a [`Stream`].
pub enum View<'a, O: 'a, I: 'a, M: Effect, R: 'a> {
    /// Finished with a result.
    Pure(R),
    /// Waiting on a base action that produces the rest of the stream.
    Effect(M::Action<'a, Stream<'a, O, I, M, R>>),
    /// Holding a value for downstream.
    Emit(O, Resume<'a, O, I, M, R>),
    /// Waiting for a value from upstream.
    Await(Receive<'a, O, I, M, R>),
}

/// A suspended, effectful stream computation.
///
/// - `O` - values this stage emits downstream
/// - `I` - values this stage demands from upstream
/// - `M` - the base [`Effect`] its effect steps run in
/// - `R` - the value it finishes with
///
/// Every operator takes its handles by value, so a handle is advanced at most once.
/// A handle cannot be rewound or driven a second time.
pub struct Stream<'a, O: 'a, I: 'a, M: Effect, R: 'a> {
    raw: Raw<'a, O, I, M>,
    result: PhantomData<fn(R) -> R>,
}

/// A stream with its result type forgotten.
///
/// Applying `frames` from the back, each to the result of the one before, starting
/// with the result of `head`, ends in the result type of the owning [`Stream`].
struct Raw<'a, O: 'a, I: 'a, M: Effect> {
    head: Head<'a, O, I, M>,
    frames: VecDeque<Frame<'a, O, I, M>>,
}

enum Head<'a, O: 'a, I: 'a, M: Effect> {
    Pure(Erased<'a>),
    Effect(Box<M::Action<'a, Raw<'a, O, I, M>>>),
    Emit(O, Box<dyn FnOnce() -> Raw<'a, O, I, M> + 'a>),
    Await(Box<dyn FnOnce(I) -> Raw<'a, O, I, M> + 'a>),
}

type Frame<'a, O, I, M> = Box<dyn FnOnce(Erased<'a>) -> Raw<'a, O, I, M> + 'a>;

impl<'a, O: 'a, I: 'a, M: Effect> Raw<'a, O, I, M> {
    fn new(head: Head<'a, O, I, M>) -> Self {
        Raw {
            head,
            frames: VecDeque::new(),
        }
    }

    /// Queue `outer` to run after this stream's own frames.
    fn within(self, outer: VecDeque<Frame<'a, O, I, M>>) -> Self {
        Raw {
            head: self.head,
            frames: stack(outer, self.frames),
        }
    }
}

/// `above` runs first. The shorter queue is moved onto the longer one.
fn stack<'a, O: 'a, I: 'a, M: Effect>(
    mut below: VecDeque<Frame<'a, O, I, M>>,
    mut above: VecDeque<Frame<'a, O, I, M>>,
) -> VecDeque<Frame<'a, O, I, M>> {
    if below.len() >= above.len() {
        below.append(&mut above);
        below
    } else {
        while let Some(frame) = below.pop_back() {
            above.push_front(frame);
        }
        above
    }
}

impl<'a, O: 'a, I: 'a, M: Effect, R: 'a> Stream<'a, O, I, M, R> {
    fn from_raw(raw: Raw<'a, O, I, M>) -> Self {
        Stream {
            raw,
            result: PhantomData,
        }
    }

    /// A stage that finishes immediately with `value`.
    pub fn pure(value: R) -> Self {
        Self::from_raw(Raw::new(Head::Pure(Erased::new(value))))
    }

    /// A stage that performs `action` and finishes with its result.
    pub fn lift(action: M::Action<'a, R>) -> Self {
        Self::from_raw(Raw::new(Head::Effect(Box::new(M::map::<R, Raw<'a, O, I, M>, _>(
            action,
            |value| Raw::new(Head::Pure(Erased::new(value))),
        )))))
    }

    /// A stage that performs `action` and continues with the stream it produces.
    pub fn effect(action: M::Action<'a, Self>) -> Self {
        Self::from_raw(Raw::new(Head::Effect(Box::new(M::map::<Self, Raw<'a, O, I, M>, _>(
            action,
            |next| next.raw,
        )))))
    }

    /// Rebuild a stream from one of its steps.
    pub fn from_view(view: View<'a, O, I, M, R>) -> Self {
        match view {
            View::Pure(r) => Self::pure(r),
            View::Effect(action) => Self::effect(action),
            View::Emit(value, resume) => {
                Self::from_raw(Raw::new(Head::Emit(value, Box::new(move || resume().raw))))
            }
            View::Await(receive) => {
                Self::from_raw(Raw::new(Head::Await(Box::new(move |input| receive(input).raw))))
            }
        }
    }

    /// A stage that calls `build` only once it is driven.
    pub(crate) fn defer<F>(build: F) -> Self
    where
        F: FnOnce() -> Self + 'a,
    {
        <Stream<'a, O, I, M, ()>>::pure(()).and_then(move |()| build())
    }

    /// Run every pending continuation that needs no input and report the step the
    /// stream is stopped at.
    ///
    /// ```rust
    /// use spout::prelude::*;
    ///
    /// let doubled: Stream<'_, u8, u8, Identity, u8> = demand().and_then(|x| pure(x * 2));
    /// let View::Await(receive) = doubled.view() else { unreachable!() };
    /// assert_eq!(receive(21).into_pure(), Some(42));
    /// ```
    pub fn view(self) -> View<'a, O, I, M, R> {
        let Raw { mut head, mut frames } = self.raw;
        loop {
            head = match head {
                Head::Pure(value) => match frames.pop_back() {
                    Some(frame) => {
                        let next = frame(value);
                        frames = stack(frames, next.frames);
                        next.head
                    }
                    // SAFETY: with every frame applied, the value is this stream's own result.
                    None => return View::Pure(unsafe { value.downcast::<R>() }),
                },
                Head::Effect(action) => {
                    return View::Effect(M::map::<Raw<'a, O, I, M>, Self, _>(*action, move |next| {
                        Self::from_raw(next.within(frames))
                    }));
                }
                Head::Emit(value, resume) => {
                    return View::Emit(value, Box::new(move || Self::from_raw(resume().within(frames))));
                }
                Head::Await(receive) => {
                    return View::Await(Box::new(move |input| Self::from_raw(receive(input).within(frames))));
                }
            };
        }
    }

    /// The result, if the stream finishes without another effect, emission or demand.
    pub fn into_pure(self) -> Option<R> {
        match self.view() {
            View::Pure(r) => Some(r),
            _ => None,
        }
    }

    /// Continue with the stream built from this stream's result.
    ///
    /// Every effect, emit and await step runs exactly as before; only the result is
    /// replaced. `f` is not called here: it is queued and runs when a driver reaches
    /// the end of this stream.
    pub fn and_then<R2: 'a, F>(self, f: F) -> Stream<'a, O, I, M, R2>
    where
        F: FnOnce(R) -> Stream<'a, O, I, M, R2> + 'a,
    {
        let mut raw = self.raw;
        raw.frames.push_front(Box::new(move |value: Erased<'a>| {
            // SAFETY: this frame runs after every frame that was already queued, so by the
            // `Raw` invariant it receives the `R` this stream finishes with.
            f(unsafe { value.downcast::<R>() }).raw
        }));
        Stream::from_raw(raw)
    }

    /// Transform the result when the stream finishes.
    pub fn map_return<R2: 'a, F>(self, f: F) -> Stream<'a, O, I, M, R2>
    where
        F: FnOnce(R) -> R2 + 'a,
    {
        self.and_then(move |r| Stream::pure(f(r)))
    }

    /// Run this stream, discard its result, then run `next`.
    pub fn then<R2: 'a>(self, next: Stream<'a, O, I, M, R2>) -> Stream<'a, O, I, M, R2> {
        self.and_then(move |_| next)
    }

    /// Replace every emitted value with the stream `body` builds from it.
    ///
    /// See [`for_each`](crate::compose::for_each).
    pub fn for_each<O2: 'a, F>(self, body: F) -> Stream<'a, O2, I, M, R>
    where
        F: FnMut(O) -> Stream<'a, O2, I, M, ()> + 'a,
    {
        compose::for_each(self, body)
    }

    /// Answer every demand of this stream by running the stream `draw` builds.
    ///
    /// See [`feed`](crate::compose::feed).
    pub fn feed<I2: 'a, F>(self, draw: F) -> Stream<'a, O, I2, M, R>
    where
        F: FnMut() -> Stream<'a, O, I2, M, I> + 'a,
    {
        compose::feed(self, draw)
    }

    /// Pull-compose: `self` produces the values `consumer` demands.
    ///
    /// See [`connect`](crate::compose::connect).
    pub fn connect<O2: 'a>(self, consumer: Stream<'a, O2, O, M, R>) -> Stream<'a, O2, I, M, R> {
        compose::connect(self, consumer)
    }

    /// Transform every emitted value.
    pub fn map_emit<O2: 'a, F>(self, f: F) -> Stream<'a, O2, I, M, R>
    where
        F: FnMut(O) -> O2 + 'a,
    {
        compose::map_emit(f, self)
    }

    /// Transform every value before this stream receives it.
    pub fn map_input<I2: 'a, F>(self, f: F) -> Stream<'a, O, I2, M, R>
    where
        F: FnMut(I2) -> I + 'a,
    {
        compose::map_input(f, self)
    }
}

impl<'a, O: 'a, I: 'a, M: Effect, R: 'a> From<View<'a, O, I, M, R>> for Stream<'a, O, I, M, R> {
    fn from(view: View<'a, O, I, M, R>) -> Self {
        Self::from_view(view)
    }
}

impl<'a, O: 'a, I: 'a, M: Effect, R: 'a> fmt::Debug for Stream<'a, O, I, M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = match self.raw.head {
            Head::Pure(_) => "Pure",
            Head::Effect(_) => "Effect",
            Head::Emit(..) => "Emit",
            Head::Await(_) => "Await",
        };
        f.debug_struct("Stream")
            .field("head", &format_args!("{head}"))
            .field("pending", &self.raw.frames.len())
            .finish()
    }
}

impl<'a, O, I, M, R> fmt::Debug for View<'a, O, I, M, R>
where
    O: fmt::Debug + 'a,
    I: 'a,
    M: Effect,
    R: fmt::Debug + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Pure(r) => f.debug_tuple("Pure").field(r).finish(),
            View::Effect(_) => f.write_str("Effect(..)"),
            View::Emit(value, _) => f.debug_tuple("Emit").field(value).finish_non_exhaustive(),
            View::Await(_) => f.write_str("Await(..)"),
        }
    }
}
