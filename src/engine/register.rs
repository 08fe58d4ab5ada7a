use std::fmt::Debug;

/// Storage and arithmetic primitives of one register holding `WIDTH` lanes of `T`.
///
/// Two kinds of register implement this trait: the `std::simd` vectors listed in the
/// capability table, and the element type itself as the width-1 scalar register. Both
/// must agree lane by lane, so that an expression evaluated through either produces
/// bit-identical results.
pub trait Register<T>: Copy + Debug {
    /// Number of lanes.
    const WIDTH: usize;

    /// Broadcasts `value` into every lane.
    fn splat(value: T) -> Self;

    /// Reads `WIDTH` consecutive elements starting at `source`.
    ///
    /// # Safety
    ///
    /// `source` must be valid for reads of `WIDTH` elements. No alignment beyond that of
    /// `T` is required.
    unsafe fn load(source: *const T) -> Self;

    /// Writes the lanes to `WIDTH` consecutive elements starting at `target`.
    ///
    /// # Safety
    ///
    /// `target` must be valid for writes of `WIDTH` elements.
    unsafe fn store(self, target: *mut T);

    fn sum(self, rhs: Self) -> Self;
    fn difference(self, rhs: Self) -> Self;
    fn product(self, rhs: Self) -> Self;
    fn quotient(self, rhs: Self) -> Self;
}
