//! Named elementwise operations built on [`compute`](crate::compute).
//!
//! Each operation reconciles the element count to the shortest participating buffer
//! and hands a fixed expression to the dispatcher. The right-hand operand may be a
//! buffer or a scalar, see [`Operand`].

mod elementwise;
mod operand;

pub use self::elementwise::*;
pub use self::operand::{BinaryOp, Difference, Operand, Product, Quotient, Sum};

/// Length of the shortest buffer, the number of elements that can safely be computed
/// over all of them. Zero when there are no buffers.
///
/// The [`element_count_min!`](crate::element_count_min) macro does the same for any mix
/// of containers with a `len()`.
pub fn element_count_min<T>(buffers: &[&[T]]) -> usize {
    buffers.iter().map(|buffer| buffer.len()).min().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_buffer_wins() {
        let a = vec![0.0f32; 25];
        let b = vec![0.0f32; 26];
        let c = vec![0.0f32; 20];
        assert_eq!(element_count_min(&[&a[..], &b[..], &c[..]]), 20);
        assert_eq!(element_count_min::<f32>(&[]), 0);
    }
}
