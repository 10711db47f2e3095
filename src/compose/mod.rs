//! Gluing stages together
//!
//! Two independent operators combine streams:
//!
//! - [`for_each`] substitutes a sub-stream for every emitted value ("for" composition).
//!   Its dual [`feed`] substitutes a sub-stream for every demand.
//! - [`connect`] pairs each demand of a consumer with the next emission of a producer
//!   ("pull" composition).
//!
//! Both are associative and have identities: [`emit`](crate::emit) for `for_each`,
//! [`demand`](crate::demand) for `feed`, and [`cat`] for `connect`.

mod connect;
mod for_each;
mod map;

pub use connect::{cat, connect};
pub use for_each::{compose_right, feed, for_each};
pub use map::{map_emit, map_input};
