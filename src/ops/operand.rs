use std::marker::PhantomData;

use crate::engine::{compute, Context, Element, Expression, Register, Value};

/// An arithmetic operation applied lane by lane.
pub trait BinaryOp {
    fn apply<T: Element, R: Register<T>>(lhs: Value<T, R>, rhs: Value<T, R>) -> Value<T, R>;
    fn apply_scalar<T: Element, R: Register<T>>(lhs: Value<T, R>, rhs: T) -> Value<T, R>;
}

macro_rules! binary_ops {
    ($($(#[$meta:meta])* $name:ident => $op:tt;)+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $name;

            impl BinaryOp for $name {
                #[inline(always)]
                fn apply<T: Element, R: Register<T>>(lhs: Value<T, R>, rhs: Value<T, R>) -> Value<T, R> {
                    lhs $op rhs
                }

                #[inline(always)]
                fn apply_scalar<T: Element, R: Register<T>>(lhs: Value<T, R>, rhs: T) -> Value<T, R> {
                    lhs $op rhs
                }
            }
        )+
    };
}

binary_ops! {
    /// `lhs + rhs`
    Sum => +;
    /// `lhs - rhs`
    Difference => -;
    /// `lhs * rhs`
    Product => *;
    /// `lhs / rhs`, floating-point elements only.
    Quotient => /;
}

/// Right-hand side of an elementwise operation: another buffer or a scalar.
pub trait Operand<T: Element>: Copy {
    /// Number of elements this operand provides; `None` for a scalar, which fits any
    /// length.
    fn extent(self) -> Option<usize>;

    /// Computes `result[i] = lhs[i] op self[i]` for `i < element_count`.
    ///
    /// # Safety
    ///
    /// `lhs`, `result` and, for buffers, `self` must hold `element_count` elements.
    /// `result` may alias `lhs` exactly, nothing else.
    unsafe fn apply<O: BinaryOp>(self, lhs: *const T, result: *mut T, element_count: usize);
}

impl<'a, T: Element> Operand<T> for &'a [T] {
    #[inline]
    fn extent(self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    unsafe fn apply<O: BinaryOp>(self, lhs: *const T, result: *mut T, element_count: usize) {
        binary::<T, O>(lhs, self.as_ptr(), result, element_count)
    }
}

impl<'a, T: Element> Operand<T> for &'a Vec<T> {
    #[inline]
    fn extent(self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    unsafe fn apply<O: BinaryOp>(self, lhs: *const T, result: *mut T, element_count: usize) {
        self.as_slice().apply::<O>(lhs, result, element_count)
    }
}

impl<'a, T: Element, const M: usize> Operand<T> for &'a [T; M] {
    #[inline]
    fn extent(self) -> Option<usize> {
        Some(M)
    }

    #[inline]
    unsafe fn apply<O: BinaryOp>(self, lhs: *const T, result: *mut T, element_count: usize) {
        self.as_slice().apply::<O>(lhs, result, element_count)
    }
}

impl<T: Element> Operand<T> for T {
    #[inline]
    fn extent(self) -> Option<usize> {
        None
    }

    #[inline]
    unsafe fn apply<O: BinaryOp>(self, lhs: *const T, result: *mut T, element_count: usize) {
        compute(
            [lhs as *mut T, result],
            element_count,
            BinaryScalar::<T, O> {
                rhs: self,
                op: PhantomData,
            },
        )
    }
}

/// `result[i] = lhs[i] op rhs[i]` for `i < element_count`.
///
/// # Safety
///
/// All three pointers must hold `element_count` elements. `result` may equal `lhs` or
/// `rhs`; no other overlap is allowed.
#[inline]
pub(crate) unsafe fn binary<T: Element, O: BinaryOp>(
    lhs: *const T,
    rhs: *const T,
    result: *mut T,
    element_count: usize,
) {
    // Slots 0 and 1 are only loaded from.
    compute(
        [lhs as *mut T, rhs as *mut T, result],
        element_count,
        Binary::<O>(PhantomData),
    )
}

/// `slot 2 = slot 0 op slot 1`
struct Binary<O>(PhantomData<O>);

impl<T: Element, O: BinaryOp> Expression<T> for Binary<O> {
    #[inline(always)]
    fn eval<C: Context<T>>(&mut self, ctx: &mut C) {
        let lhs = ctx.load(0);
        let rhs = ctx.load(1);
        ctx.store(O::apply(lhs, rhs), 2);
    }
}

/// `slot 1 = slot 0 op rhs`
struct BinaryScalar<T, O> {
    rhs: T,
    op: PhantomData<O>,
}

impl<T: Element, O: BinaryOp> Expression<T> for BinaryScalar<T, O> {
    #[inline(always)]
    fn eval<C: Context<T>>(&mut self, ctx: &mut C) {
        let lhs = ctx.load(0);
        ctx.store(O::apply_scalar(lhs, self.rhs), 1);
    }
}
