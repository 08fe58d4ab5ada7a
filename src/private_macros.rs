/// Implements [`Register`](crate::engine::register::Register) for `std::simd` vectors of one element
/// type, one impl per listed lane count.
macro_rules! vector_registers {
    ($elem:ty => $($width:literal),+ $(,)?) => {
        $(
            impl crate::engine::register::Register<$elem> for std::simd::Simd<$elem, $width> {
                const WIDTH: usize = $width;

                #[inline(always)]
                fn splat(value: $elem) -> Self {
                    std::simd::Simd::splat(value)
                }

                #[inline(always)]
                unsafe fn load(source: *const $elem) -> Self {
                    core::ptr::read_unaligned(source as *const Self)
                }

                #[inline(always)]
                unsafe fn store(self, target: *mut $elem) {
                    core::ptr::write_unaligned(target as *mut Self, self)
                }

                #[inline(always)]
                fn sum(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline(always)]
                fn difference(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline(always)]
                fn product(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline(always)]
                fn quotient(self, rhs: Self) -> Self {
                    self / rhs
                }
            }
        )+
    };
}

/// Implements the width-1 [`Register`](crate::engine::register::Register) for primitive element types.
/// Integer lanes of `std::simd` vectors wrap on overflow, so the integer scalar
/// form wraps too.
macro_rules! scalar_registers {
    (float: $($elem:ty),+ $(,)?) => {
        $(
            scalar_registers!(
                @impl $elem,
                core::ops::Add::add,
                core::ops::Sub::sub,
                core::ops::Mul::mul,
                core::ops::Div::div
            );
        )+
    };
    (integer: $($elem:ty),+ $(,)?) => {
        $(
            scalar_registers!(
                @impl $elem,
                <$elem>::wrapping_add,
                <$elem>::wrapping_sub,
                <$elem>::wrapping_mul,
                <$elem>::wrapping_div
            );
        )+
    };
    (@impl $elem:ty, $sum:expr, $difference:expr, $product:expr, $quotient:expr) => {
        impl crate::engine::register::Register<$elem> for $elem {
            const WIDTH: usize = 1;

            #[inline(always)]
            fn splat(value: $elem) -> Self {
                value
            }

            #[inline(always)]
            unsafe fn load(source: *const $elem) -> Self {
                core::ptr::read(source)
            }

            #[inline(always)]
            unsafe fn store(self, target: *mut $elem) {
                core::ptr::write(target, self)
            }

            #[inline(always)]
            fn sum(self, rhs: Self) -> Self {
                $sum(self, rhs)
            }

            #[inline(always)]
            fn difference(self, rhs: Self) -> Self {
                $difference(self, rhs)
            }

            #[inline(always)]
            fn product(self, rhs: Self) -> Self {
                $product(self, rhs)
            }

            #[inline(always)]
            fn quotient(self, rhs: Self) -> Self {
                $quotient(self, rhs)
            }
        }
    };
}

/// Registers an element type in the capability table: its vector registers, its
/// scalar register and its narrowing chain. Widths must be listed widest first.
macro_rules! element {
    ($elem:ty, $kind:ident, [$($width:literal),+ $(,)?]) => {
        vector_registers!($elem => $($width),+);
        scalar_registers!($kind: $elem);

        const _: () = assert!(
            crate::engine::capability::is_chain(&[$($width),+]),
            concat!("width chain of ", stringify!($elem), " must be strictly decreasing powers of two above 1"),
        );

        impl crate::engine::capability::Element for $elem {
            const IS_FLOAT: bool = element!(@is_float $kind);
            type Chain = ($(std::simd::Simd<$elem, $width>,)+);
        }
    };
    (@is_float float) => {
        true
    };
    (@is_float integer) => {
        false
    };
}
