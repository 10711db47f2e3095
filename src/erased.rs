//! Values whose type is known only to the code that stored them.
//!
//! A stream's pending continuations form one queue even though each of them expects
//! a different type. The value travelling between two of them is boxed as an
//! [`Erased`] and restored by the continuation that was queued for it.

trait Opaque {}

impl<T> Opaque for T {}

/// A boxed value of a forgotten type.
pub(crate) struct Erased<'a>(Box<dyn Opaque + 'a>);

impl<'a> Erased<'a> {
    pub(crate) fn new<T: 'a>(value: T) -> Self {
        Erased(Box::new(value))
    }

    /// Take the value back out.
    ///
    /// # Safety
    ///
    /// The value must have been stored by [`Erased::new`] as a `T`.
    pub(crate) unsafe fn downcast<T: 'a>(self) -> T {
        let raw = Box::into_raw(self.0).cast::<T>();
        // SAFETY: the allocation came from `Box::new::<T>` and the caller vouches for `T`.
        unsafe { *Box::from_raw(raw) }
    }
}
