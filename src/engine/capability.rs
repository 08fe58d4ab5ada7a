//! The capability table: which register serves each (element type, width) pair.
//!
//! | Element          | Vector widths |
//! |------------------|---------------|
//! | `f32`, `i32`, `u32` | 16, 8, 4   |
//! | `f64`, `i64`, `u64` | 8, 4       |
//! | `i16`, `u16`     | 32, 16, 8     |
//! | `i8`, `u8`       | 64, 32, 16    |
//!
//! Every element type additionally has the width-1 scalar register, which terminates
//! the chain. The table is static: it does not depend on the CPU the program runs on.

use std::fmt::Debug;

use crate::engine::arch;
use crate::engine::dispatch::WidthChain;
use crate::engine::register::Register;

/// An element type the engine can compute over.
pub trait Element: Register<Self> + Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    /// Whether the type is a floating-point type. Only floating-point values divide.
    const IS_FLOAT: bool;

    /// Vector registers in dispatch order, widest first.
    type Chain: WidthChain<Self>;

    /// Vector widths of the chain, widest first. Excludes the scalar width.
    const WIDTHS: &'static [usize] = <Self::Chain as WidthChain<Self>>::WIDTHS;

    /// Width the dispatcher starts at.
    const MAX_WIDTH: usize = Self::WIDTHS[0];

    /// Narrowest vector width; anything left below it is handled one element at a time.
    const MIN_WIDTH: usize = Self::WIDTHS[Self::WIDTHS.len() - 1];

    /// Whether a vector register of `width` lanes exists for this type.
    fn supports(width: usize) -> bool {
        contains(Self::WIDTHS, width)
    }

    /// Every width the dispatcher walks through, ending with the scalar width.
    fn chain() -> impl Iterator<Item = usize> {
        Self::WIDTHS.iter().copied().chain(std::iter::once(1))
    }

    /// Lanes of this type that fit one register of the compilation target.
    fn native_width() -> usize {
        arch::native_lanes::<Self>()
    }
}

element!(f32, float, [16, 8, 4]);
element!(f64, float, [8, 4]);
element!(i64, integer, [8, 4]);
element!(u64, integer, [8, 4]);
element!(i32, integer, [16, 8, 4]);
element!(u32, integer, [16, 8, 4]);
element!(i16, integer, [32, 16, 8]);
element!(u16, integer, [32, 16, 8]);
element!(i8, integer, [64, 32, 16]);
element!(u8, integer, [64, 32, 16]);

/// Whether `widths` is a valid narrowing chain: non-empty, strictly decreasing, every
/// entry a power of two above the scalar width.
pub const fn is_chain(widths: &[usize]) -> bool {
    if widths.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < widths.len() {
        if widths[i] < 2 || !widths[i].is_power_of_two() {
            return false;
        }
        if i > 0 && widths[i] >= widths[i - 1] {
            return false;
        }
        i += 1;
    }
    true
}

const fn contains(widths: &[usize], width: usize) -> bool {
    let mut i = 0;
    while i < widths.len() {
        if widths[i] == width {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_bounds() {
        assert_eq!((f32::MAX_WIDTH, f32::MIN_WIDTH), (16, 4));
        assert_eq!((f64::MAX_WIDTH, f64::MIN_WIDTH), (8, 4));
        assert_eq!((u64::MAX_WIDTH, u64::MIN_WIDTH), (8, 4));
        assert_eq!((i32::MAX_WIDTH, i32::MIN_WIDTH), (16, 4));
        assert_eq!((u16::MAX_WIDTH, u16::MIN_WIDTH), (32, 8));
        assert_eq!((i8::MAX_WIDTH, i8::MIN_WIDTH), (64, 16));
    }

    #[test]
    fn chain_ends_at_scalar() {
        assert_eq!(f32::chain().collect::<Vec<_>>(), vec![16, 8, 4, 1]);
        assert_eq!(f64::chain().collect::<Vec<_>>(), vec![8, 4, 1]);
        assert_eq!(u8::chain().collect::<Vec<_>>(), vec![64, 32, 16, 1]);
    }

    #[test]
    fn supported_widths() {
        assert!(f32::supports(8));
        assert!(!f32::supports(2));
        assert!(!f32::supports(1));
        assert!(!f64::supports(16));
        assert!(i16::supports(32));
    }

    #[test]
    fn chain_validation() {
        assert!(is_chain(&[16, 8, 4]));
        assert!(is_chain(&[8]));
        assert!(!is_chain(&[]));
        assert!(!is_chain(&[4, 8]));
        assert!(!is_chain(&[8, 8]));
        assert!(!is_chain(&[12, 4]));
        assert!(!is_chain(&[4, 1]));
    }

    #[test]
    fn native_width_is_positive() {
        assert!(f64::native_width() >= 1);
        assert!(u8::native_width() >= f32::native_width());
    }
}
