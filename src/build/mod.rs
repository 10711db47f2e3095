//! Building stages from scratch
//!
//! [`emit`] and [`demand`] are the only two ways to make a stage suspend; everything
//! else in the crate is assembled from them with [`Stream::and_then`](crate::Stream::and_then)
//! and the operators in [`compose`](crate::compose).

mod func;
mod suspend;

pub use func::{each, repeat_with, unfold};
pub use suspend::{demand, emit, lift, pure};
