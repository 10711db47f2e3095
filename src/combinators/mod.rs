//! Ready-made stages.
//!
//! Pipes such as [`map`] and [`take`] sit between a producer and a consumer with
//! [`connect`](crate::connect). Reducers such as [`fold`] drive a source to the end
//! and collect what it emitted.

mod pipe;
mod reduce;

pub use pipe::{drain, filter, map, skip, take, take_while};
pub use reduce::{fold, to_vec};
