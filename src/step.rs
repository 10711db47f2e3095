/// Where a source stands after running to its next emission: it yielded a value and
/// can go on, or it completed with its final result.
///
/// [`next`](crate::next) reports each emission of a source as a `Step`, and
/// [`unfold`](crate::build::unfold) builds a source from a function returning one.
///
/// ```rust
/// use spout::prelude::*;
///
/// let source: Source<'_, u8, Identity, ()> = each([4, 5]);
/// let (first, rest) = next(source).unwrap_yielded();
/// assert_eq!(first, 4);
///
/// let step = next(rest());
/// assert!(step.is_yielded());
/// let (_, rest) = step.unwrap_yielded();
/// assert!(next(rest()).is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<Y, D> {
    /// Suspended after yielding a value
    Yielded(Y),
    /// Finished with a final value
    Complete(D),
}

impl<Y, D> Step<Y, D> {
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Complete`.
    #[inline]
    #[track_caller]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the final value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Yielded`.
    #[inline]
    #[track_caller]
    pub fn unwrap_complete(self) -> D {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(d) => d,
        }
    }
}
