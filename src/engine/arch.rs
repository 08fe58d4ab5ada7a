// Native register size of the compilation target, in bytes. Static only: the
// dispatcher never consults this, it is reported alongside the width chain.
#[cfg(target_arch = "x86_64")]
pub const fn register_bytes() -> usize {
    #[cfg(target_feature = "avx512f")]
    {
        64
    }
    #[cfg(all(
        any(target_feature = "avx", target_feature = "avx2"),
        not(target_feature = "avx512f")
    ))]
    {
        32
    }
    #[cfg(all(
        target_feature = "sse2",
        not(any(
            target_feature = "avx",
            target_feature = "avx2",
            target_feature = "avx512f"
        ))
    ))]
    {
        16
    }
    #[cfg(not(any(
        target_feature = "sse2",
        target_feature = "avx",
        target_feature = "avx2",
        target_feature = "avx512f"
    )))]
    {
        8
    }
}

#[cfg(target_arch = "aarch64")]
pub const fn register_bytes() -> usize {
    #[cfg(all(target_feature = "neon", target_feature = "sve2"))]
    {
        64
    }
    #[cfg(all(
        target_feature = "neon",
        target_feature = "sve",
        not(target_feature = "sve2")
    ))]
    {
        32
    }
    #[cfg(all(
        target_feature = "neon",
        not(any(target_feature = "sve", target_feature = "sve2"))
    ))]
    {
        16
    }
    #[cfg(not(target_feature = "neon"))]
    {
        8
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub const fn register_bytes() -> usize {
    16
}

/// Number of `T` lanes that fit in one native register, never less than one.
pub const fn native_lanes<T>() -> usize {
    const fn max(a: usize, b: usize) -> usize {
        if a > b {
            a
        } else {
            b
        }
    }
    max(register_bytes() / std::mem::size_of::<T>(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_a_power_of_two() {
        assert!(register_bytes().is_power_of_two());
        assert!(register_bytes() >= 8);
    }

    #[test]
    fn lanes_scale_with_element_size() {
        assert_eq!(native_lanes::<u8>(), register_bytes());
        assert_eq!(native_lanes::<f32>() * 4, register_bytes());
        assert_eq!(native_lanes::<[u8; 128]>(), 1);
    }
}
