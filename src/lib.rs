#![feature(portable_simd)]

//! Elementwise computation over equal-length buffers, dispatched across SIMD widths.
//!
//! An [`Expression`] is written once against [`Context`] `load`/`store` calls and
//! [`Value`] arithmetic. [`compute`] runs it over the buffers with the widest register
//! the capability table lists for the element type, then narrower ones, then one
//! element at a time, so every element is covered exactly once and nothing past the
//! element count is touched.
//!
//! ```
//! use wide_compute::{compute_slices, expression};
//!
//! let mut a: Vec<f32> = (0..10).map(|i| i as f32).collect();
//! let mut b = a.clone();
//! let mut c = vec![0.0f32; 10];
//! compute_slices(
//!     [&mut a[..], &mut b[..], &mut c[..]],
//!     expression!(f32, |ctx| {
//!         let c = ctx.load(0) + ctx.load(1);
//!         ctx.store(c, 2);
//!     }),
//! );
//! assert_eq!(c, [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0]);
//! ```

#[macro_use]
mod private_macros;

pub mod engine;
pub mod ops;

pub use engine::{
    compute, compute_slices, try_compute_slices, BlockContext, ComputeError, Context, Element,
    Expression, Register, Result, Value, WidthChain,
};
pub use ops::{
    add, add_assign, add_assign_rhs, add_in, div, div_assign, div_assign_rhs, div_in,
    element_count_min, mul, mul_assign, mul_assign_rhs, mul_in, sub, sub_assign, sub_assign_rhs,
    sub_in, Operand,
};

/// Builds an [`Expression`] from closure-like syntax.
///
/// The element type comes first. Captured variables are listed in brackets with their
/// types and must be `Copy`; they are copied into the expression when it is built.
///
/// # Examples
/// ```
/// use wide_compute::{compute_slices, expression};
///
/// let scale = 2.5f64;
/// let mut a = vec![4.0f64; 13];
/// let mut b = vec![0.0f64; 13];
/// compute_slices(
///     [&mut a[..], &mut b[..]],
///     expression!(f64, [scale: f64], |ctx| {
///         let scaled = ctx.load(0) * scale;
///         ctx.store(scaled, 1);
///     }),
/// );
/// assert!(b.iter().all(|&x| x == 10.0));
/// ```
/// For expressions that keep mutable state between invocations, implement
/// [`Expression`] directly.
#[macro_export]
macro_rules! expression {
    ($elem:ty, |$ctx:ident| $body:expr) => {
        $crate::expression!($elem, [], |$ctx| $body)
    };
    ($elem:ty, [$($capture:ident : $capture_ty:ty),* $(,)?], |$ctx:ident| $body:expr) => {{
        struct Inline {
            $($capture: $capture_ty,)*
        }

        impl $crate::Expression<$elem> for Inline {
            #[inline(always)]
            #[allow(unused_variables)]
            fn eval<C: $crate::Context<$elem>>(&mut self, $ctx: &mut C) {
                $(let $capture = self.$capture;)*
                $body;
            }
        }

        Inline { $($capture,)* }
    }};
}

/// Length of the shortest of the given containers, anything with a `len()`.
///
/// # Examples
/// ```
/// use wide_compute::element_count_min;
///
/// let a = vec![0.0f32; 25];
/// let b = vec![0.0f32; 26];
/// let c = [0.0f32; 20];
/// assert_eq!(element_count_min!(a, b, c), 20);
/// ```
#[macro_export]
macro_rules! element_count_min {
    ($($buffer:expr),+ $(,)?) => {
        [$($buffer.len()),+].into_iter().min().unwrap_or(0)
    };
}
