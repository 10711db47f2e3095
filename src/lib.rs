//! # Spout: pull-driven streams over any base effect
//!
//! Build effectful pipelines out of stages that emit values downstream, demand values
//! from upstream, and finish with a result, then run them in constant memory.
//!
//! ## Core Types
//!
//! - **[`Stream`]**: a stage, frozen at its next step
//! - **[`View`]**: that next step, as one of finished, effect, emit or await
//! - **[`Effect`]**: the base computation a stream threads through its effect steps
//! - **[`Source`]**, **[`Sink`]**, **[`Pipe`]**, **[`Saturated`]**: names for the shapes
//!   a stream takes once an end is closed with [`Void`]
//!
//! ## Key Features
//!
//! - **Two ways to compose**: [`for_each`] substitutes a stream for every emitted value;
//!   [`connect`] lets a consumer pull from a producer, and whichever finishes first wins
//! - **Lawful**: both operators are associative, with [`emit`] and [`cat`] as identities
//! - **Constant stack**: binds are queued rather than nested, and drivers loop through
//!   [`Effect::tail_rec`], so unbounded stages written as recursion and long chains of
//!   [`and_then`](Stream::and_then) run without growing the stack
//! - **Any effect**: [`Identity`], deferred [`Io`](effect::Io),
//!   [`Fallible`](effect::Fallible), and single-threaded futures (feature `async`)
//!
//! ## Example
//!
//! ```
//! use spout::prelude::*;
//!
//! // Every number twice, read by a sink that keeps the first five.
//! let first_five: Saturated<'_, Identity, Vec<u32>> =
//!     for_each(each(1..), |x: u32| emit(x).then(emit(x)))
//!         .map_return(|()| Vec::new())
//!         .connect(collect_five(Vec::new()));
//! assert_eq!(run(first_five), vec![1, 1, 2, 2, 3]);
//!
//! fn collect_five(seen: Vec<u32>) -> Sink<'static, u32, Identity, Vec<u32>> {
//!     if seen.len() == 5 {
//!         return pure(seen);
//!     }
//!     demand().and_then(move |x| {
//!         let mut seen = seen;
//!         seen.push(x);
//!         collect_five(seen)
//!     })
//! }
//! ```
//!
//! ## Common Functions
//!
//! **Building stages:**
//! - [`emit(value)`](emit) - hand a value downstream
//! - [`demand()`](demand) - wait for a value from upstream
//! - [`lift(action)`](lift) - perform a base action
//! - [`each(iter)`](each) - emit every item of an iterator
//!
//! **Composition:**
//! - [`for_each(source, body)`](for_each) - replace every emission with a stream
//! - [`feed(consumer, draw)`](feed) - replace every demand with a stream
//! - [`connect(producer, consumer)`](connect) - pull composition
//!
//! **Execution:**
//! - [`run(stream)`](run) - discharge a saturated stream into its base effect
//! - [`handle(stream, on_emit, on_await)`](handle) - drive an open stream with callbacks
//! - [`next(source)`](next) - run a source to its next emission

pub mod build;
pub mod combinators;
pub mod compose;
pub mod effect;
mod erased;
mod feeder;
mod handler;
mod iter;
pub mod kinds;
pub mod prelude;
mod step;
mod stream;
#[cfg(test)]
mod testing;

pub use build::{demand, each, emit, lift, pure, repeat_with, unfold};
pub use compose::{cat, compose_right, connect, feed, for_each};
pub use effect::{Effect, Identity};
pub use feeder::{FeedError, Feeder};
pub use handler::{handle, next, run};
pub use iter::SourceIter;
pub use kinds::{Pipe, Saturated, Sink, Source, Void};
pub use step::Step;
pub use stream::{Receive, Resume, Stream, View};
