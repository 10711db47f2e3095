//! Iterating over sources that need no effects.
//!
//! A [`Source`] over [`Identity`] is an ordinary lazy sequence with a final value at
//! the end. [`SourceIter`] walks it with the standard [`Iterator`] machinery and keeps
//! the final value around once the source finishes.
//!
//! # Examples
//!
//! ```rust
//! use spout::prelude::*;
//!
//! let source: Source<'_, u32, Identity, &str> = each([1, 2, 3]).map_return(|()| "end");
//! let mut iter = source.into_iter();
//!
//! let values: Vec<_> = iter.by_ref().collect();
//! assert_eq!(values, vec![1, 2, 3]);
//! assert_eq!(iter.into_return(), Some("end"));
//! ```

use tracing::trace;

use crate::{
    effect::Identity,
    handler::next,
    kinds::{Source, Void},
    step::Step,
    stream::Resume,
};

/// Iterator adapter for a [`Source`] over [`Identity`].
///
/// Each call to `next` runs the source up to its next emission and no further.
/// Both `SourceIter` and `&mut SourceIter` implement `Iterator`, so a partial
/// iteration can be followed by a look at the return value.
pub struct SourceIter<'a, O: 'a, R: 'a> {
    state: IterState<'a, O, R>,
}

enum IterState<'a, O: 'a, R: 'a> {
    Ready(Source<'a, O, Identity, R>),
    Paused(Resume<'a, O, Void, Identity, R>),
    Complete(R),
    Invalid,
}

impl<'a, O: 'a, R: 'a> SourceIter<'a, O, R> {
    /// Wrap a source.
    pub fn new(source: Source<'a, O, Identity, R>) -> Self {
        Self {
            state: IterState::Ready(source),
        }
    }

    /// Check if the source has finished.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, IterState::Complete(_))
    }

    /// Get a reference to the return value if the source has finished.
    pub fn return_value(&self) -> Option<&R> {
        match &self.state {
            IterState::Complete(r) => Some(r),
            _ => None,
        }
    }

    /// Consume the iterator and return the final value if the source has finished.
    ///
    /// Returns `None` if iteration stopped early.
    pub fn into_return(self) -> Option<R> {
        match self.state {
            IterState::Complete(r) => Some(r),
            _ => None,
        }
    }
}

impl<'a, O: 'a, R: 'a> Iterator for SourceIter<'a, O, R> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        let source = match std::mem::replace(&mut self.state, IterState::Invalid) {
            IterState::Ready(source) => source,
            IterState::Paused(resume) => resume(),
            IterState::Complete(r) => {
                self.state = IterState::Complete(r);
                return None;
            }
            IterState::Invalid => return None,
        };

        match next(source) {
            Step::Yielded((value, rest)) => {
                self.state = IterState::Paused(rest);
                Some(value)
            }
            Step::Complete(r) => {
                trace!("source iterator finished");
                self.state = IterState::Complete(r);
                None
            }
        }
    }
}

impl<'a, O: 'a, R: 'a> IntoIterator for Source<'a, O, Identity, R> {
    type Item = O;
    type IntoIter = SourceIter<'a, O, R>;

    fn into_iter(self) -> Self::IntoIter {
        SourceIter::new(self)
    }
}
