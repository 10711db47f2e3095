//! Commonly used imports
//!
//! Use `use spout::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{
    Step, Stream, View,
    effect::{Effect, Identity},
    kinds::{Pipe, Saturated, Sink, Source, Void},
};

// Building stages
pub use crate::build::{demand, each, emit, lift, pure, repeat_with, unfold};

// Composition
pub use crate::compose::{cat, compose_right, connect, feed, for_each, map_emit, map_input};

// Ready-made stages
pub use crate::combinators::{drain, filter, fold, map, skip, take, take_while, to_vec};

// Execution
pub use crate::handler::{handle, next, run};
