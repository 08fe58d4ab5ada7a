use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::engine::capability::Element;
use crate::engine::register::Register;

/// One register's worth of `T`, as seen by an expression.
///
/// `R` is either a `std::simd` vector or `T` itself, chosen by the width of the
/// context that produced the value. Both behave identically, so expressions are written
/// once against `Value` and stay correct on the vector sweeps and on the scalar tail.
/// Values of different widths have different types and cannot be mixed.
///
/// Division is only available for floating-point elements. Dividing integer values is
/// rejected when the program is compiled:
///
/// ```compile_fail
/// use wide_compute::{compute_slices, expression};
///
/// let mut a = vec![6i32; 8];
/// let mut b = vec![3i32; 8];
/// compute_slices(
///     [&mut a[..], &mut b[..]],
///     expression!(i32, |ctx| {
///         let q = ctx.load(0) / ctx.load(1);
///         ctx.store(q, 0);
///     }),
/// );
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value<T, R> {
    register: R,
    element: PhantomData<T>,
}

impl<T: Element, R: Register<T>> Value<T, R> {
    pub const WIDTH: usize = R::WIDTH;

    /// Broadcasts `value` into every lane.
    #[inline(always)]
    pub fn splat(value: T) -> Self {
        Self::from_register(R::splat(value))
    }

    #[inline(always)]
    pub fn from_register(register: R) -> Self {
        Self {
            register,
            element: PhantomData,
        }
    }

    #[inline(always)]
    pub fn into_register(self) -> R {
        self.register
    }

    /// Reads `WIDTH` elements starting at `source`.
    ///
    /// # Safety
    ///
    /// `source` must be valid for reads of `WIDTH` elements.
    #[inline(always)]
    pub unsafe fn load(source: *const T) -> Self {
        Self::from_register(R::load(source))
    }

    /// Writes `WIDTH` elements starting at `target`.
    ///
    /// # Safety
    ///
    /// `target` must be valid for writes of `WIDTH` elements.
    #[inline(always)]
    pub unsafe fn store(self, target: *mut T) {
        self.register.store(target)
    }

    #[inline(always)]
    pub fn width(self) -> usize {
        R::WIDTH
    }
}

impl<T: Element, R: Register<T>> From<T> for Value<T, R> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::splat(value)
    }
}

#[inline(always)]
fn assert_divisible<T: Element>() {
    const {
        assert!(
            T::IS_FLOAT,
            "division is only defined for floating-point elements"
        )
    }
}

macro_rules! value_ops {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident => $register_fn:ident, $guard:expr;)+) => {
        $(
            impl<T: Element, R: Register<T>> $trait for Value<T, R> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Self) -> Self {
                    $guard;
                    Self::from_register(self.register.$register_fn(rhs.register))
                }
            }

            impl<T: Element, R: Register<T>> $trait<T> for Value<T, R> {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: T) -> Self {
                    $guard;
                    Self::from_register(self.register.$register_fn(R::splat(rhs)))
                }
            }

            impl<T: Element, R: Register<T>> $assign_trait for Value<T, R> {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = $trait::$method(*self, rhs);
                }
            }

            impl<T: Element, R: Register<T>> $assign_trait<T> for Value<T, R> {
                #[inline(always)]
                fn $assign_method(&mut self, rhs: T) {
                    *self = $trait::$method(*self, rhs);
                }
            }
        )+
    };
}

value_ops! {
    Add, add, AddAssign, add_assign => sum, ();
    Sub, sub, SubAssign, sub_assign => difference, ();
    Mul, mul, MulAssign, mul_assign => product, ();
    Div, div, DivAssign, div_assign => quotient, assert_divisible::<T>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::simd::{f32x4, f64x8, i32x8};

    #[test]
    fn vector_and_scalar_agree() {
        let a = [1.0f32, 2.5, -3.0, 8.0];
        let b = [0.5f32, 4.0, 2.0, -0.25];
        let wide = unsafe {
            let x = Value::<f32, f32x4>::load(a.as_ptr());
            let y = Value::<f32, f32x4>::load(b.as_ptr());
            ((x + y) * y - 1.0f32) / x
        };
        for lane in 0..4 {
            let narrow = unsafe {
                let x = Value::<f32, f32>::load(&a[lane]);
                let y = Value::<f32, f32>::load(&b[lane]);
                ((x + y) * y - 1.0f32) / x
            };
            assert_eq!(wide.into_register()[lane], narrow.into_register());
        }
    }

    #[test]
    fn scalar_operand_is_broadcast() {
        let v = Value::<i32, i32x8>::splat(7);
        assert_eq!((v - 2i32).into_register(), i32x8::splat(5));
        assert_eq!((v * 3i32).into_register(), i32x8::splat(21));
        assert_eq!(v + 1i32, Value::from(8i32));
    }

    #[test]
    fn compound_assignment() {
        let mut v = Value::<f64, f64x8>::splat(1.0);
        v += 2.0f64;
        v *= Value::splat(4.0f64);
        v -= 0.5f64;
        v /= 2.0f64;
        assert_eq!(v.into_register(), f64x8::splat(5.75));
    }

    #[test]
    fn store_writes_every_lane() {
        let mut out = [0u16; 32];
        unsafe { Value::<u16, std::simd::u16x32>::splat(9).store(out.as_mut_ptr()) };
        assert!(out.iter().all(|&x| x == 9));
    }

    #[test]
    fn width_follows_register() {
        assert_eq!(Value::<f32, f32x4>::WIDTH, 4);
        assert_eq!(Value::<f32, f32>::splat(0.0).width(), 1);
    }
}
