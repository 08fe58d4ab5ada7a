use crate::engine::Element;
use crate::ops::operand::{binary, BinaryOp, Difference, Operand, Product, Quotient, Sum};

/// Smallest of the known lengths.
fn reconcile(lengths: &[Option<usize>]) -> usize {
    let element_count = lengths.iter().flatten().copied().min().unwrap_or(0);
    if lengths.iter().flatten().any(|&len| len != element_count) {
        log::debug!(
            "operand lengths {:?} differ, processing the first {} elements",
            lengths,
            element_count
        );
    }
    element_count
}

fn copying<T: Element, O: BinaryOp>(a: &[T], b: impl Operand<T>) -> Vec<T> {
    let element_count = reconcile(&[Some(a.len()), b.extent()]);
    let mut result = vec![T::default(); element_count];
    // SAFETY: every buffer holds at least `element_count` elements; `result` is fresh.
    unsafe { b.apply::<O>(a.as_ptr(), result.as_mut_ptr(), element_count) };
    result
}

fn into<T: Element, O: BinaryOp>(a: &[T], b: impl Operand<T>, result: &mut [T]) {
    let element_count = reconcile(&[Some(a.len()), b.extent(), Some(result.len())]);
    // SAFETY: as above; `result` is an exclusive borrow so it aliases neither operand.
    unsafe { b.apply::<O>(a.as_ptr(), result.as_mut_ptr(), element_count) };
}

fn assign<T: Element, O: BinaryOp>(a: &mut [T], b: impl Operand<T>) {
    let element_count = reconcile(&[Some(a.len()), b.extent()]);
    let a = a.as_mut_ptr();
    // SAFETY: the result slot is the left operand at the same position.
    unsafe { b.apply::<O>(a, a, element_count) };
}

fn assign_rhs<T: Element, O: BinaryOp>(a: &[T], b: &mut [T]) {
    let element_count = reconcile(&[Some(a.len()), Some(b.len())]);
    let b = b.as_mut_ptr();
    // SAFETY: the result slot is the right operand at the same position; `a` is a
    // shared borrow, so it cannot overlap the exclusive `b`.
    unsafe { binary::<T, O>(a.as_ptr(), b, b, element_count) };
}

macro_rules! elementwise {
    ($($op:ident, $symbol:literal => $copying:ident, $into:ident, $assign:ident, $assign_rhs:ident;)+) => {
        $(
            #[doc = concat!("Returns `a[i] ", $symbol, " b[i]` (or `a[i] ", $symbol, " b` for a scalar `b`) over the")]
            /// length of the shorter operand.
            #[inline]
            pub fn $copying<T: Element>(a: &[T], b: impl Operand<T>) -> Vec<T> {
                copying::<T, $op>(a, b)
            }

            #[doc = concat!("Writes `a[i] ", $symbol, " b[i]` (or `a[i] ", $symbol, " b`) into `result`, over the")]
            /// length of the shortest of the buffers. Elements of `result` beyond it are left
            /// untouched.
            #[inline]
            pub fn $into<T: Element>(a: &[T], b: impl Operand<T>, result: &mut [T]) {
                into::<T, $op>(a, b, result)
            }

            #[doc = concat!("Overwrites `a[i]` with `a[i] ", $symbol, " b[i]` (or `a[i] ", $symbol, " b`), reading")]
            /// each `a[i]` before it is replaced.
            #[inline]
            pub fn $assign<T: Element>(a: &mut [T], b: impl Operand<T>) {
                assign::<T, $op>(a, b)
            }

            #[doc = concat!("Overwrites `b[i]` with `a[i] ", $symbol, " b[i]`, reading each `b[i]` before it is")]
            /// replaced. Covers the case of a result buffer that is also the right operand.
            #[inline]
            pub fn $assign_rhs<T: Element>(a: &[T], b: &mut [T]) {
                assign_rhs::<T, $op>(a, b)
            }
        )+
    };
}

elementwise! {
    Sum, "+" => add, add_in, add_assign, add_assign_rhs;
    Difference, "-" => sub, sub_in, sub_assign, sub_assign_rhs;
    Product, "*" => mul, mul_in, mul_assign, mul_assign_rhs;
    Quotient, "/" => div, div_in, div_assign, div_assign_rhs;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota<T: Element + From<u8>>(len: u8) -> Vec<T> {
        (0..len).map(T::from).collect()
    }

    #[test]
    fn add_ten_elements_over_vector_and_scalar_paths() {
        let a: Vec<f32> = iota(10);
        let b: Vec<f32> = iota(10);
        assert_eq!(
            add(&a, &b),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0]
        );
    }

    #[test]
    fn copying_ops_are_idempotent() {
        let a: Vec<f64> = (0..37).map(|i| i as f64 * 0.75).collect();
        let b: Vec<f64> = (0..37).map(|i| 3.0 - i as f64).collect();
        let first = mul(&a, &b);
        let second = mul(&a, &b);
        assert_eq!(first, second);
        assert_eq!(a[5], 3.75);
        assert_eq!(b[5], -2.0);
    }

    #[test]
    fn scalar_operands() {
        let a: Vec<i32> = iota(21);
        assert_eq!(add(&a, 100i32), (100..121).collect::<Vec<i32>>());
        assert_eq!(sub(&a, 1i32)[0], -1);
        assert_eq!(mul(&a, -2i32)[20], -40);

        let x = vec![1.0f32; 19];
        assert!(div(&x, 4.0f32).iter().all(|&v| v == 0.25));
    }

    #[test]
    fn copying_truncates_to_shorter_operand() {
        let a: Vec<u16> = iota(40);
        let b: Vec<u16> = iota(33);
        let diff = sub(&a, &b);
        assert_eq!(diff.len(), 33);
        assert!(diff.iter().all(|&v| v == 0));
    }

    #[test]
    fn in_place_into_distinct_result() {
        let a: Vec<f32> = iota(26);
        let b = [2.0f32; 25];
        let mut result = vec![-1.0f32; 27];
        div_in(&a, &b, &mut result);
        for i in 0..25 {
            assert_eq!(result[i], i as f32 / 2.0);
        }
        assert_eq!(&result[25..], &[-1.0, -1.0]);

        mul_in(&a, 3.0f32, &mut result);
        assert_eq!(result[25], 75.0);
        assert_eq!(result[26], -1.0);
    }

    #[test]
    fn assign_reads_before_it_writes() {
        let mut a: Vec<i64> = iota(19);
        let b: Vec<i64> = iota(19);
        add_assign(&mut a, &b);
        assert_eq!(a, (0..19).map(|i| 2 * i).collect::<Vec<i64>>());

        sub_assign(&mut a, 1i64);
        mul_assign(&mut a, &b);
        assert_eq!(a[18], 35 * 18);
    }

    #[test]
    fn right_operand_overwrite_reads_before_it_writes() {
        let a: Vec<f32> = iota(21);
        let mut b = vec![4.0f32; 21];
        sub_assign_rhs(&a, &mut b);
        for i in 0..21 {
            assert_eq!(b[i], i as f32 - 4.0);
        }

        let mut b = vec![2.0f32; 21];
        div_assign_rhs(&a, &mut b);
        for i in 0..21 {
            assert_eq!(b[i], i as f32 / 2.0);
        }

        // Integers: 16 lanes of the widest i32 register, then 8, then one scalar step.
        let a: Vec<i32> = iota(25);
        let mut b: Vec<i32> = (0..26).map(|i| 100 * i).collect();
        sub_assign_rhs(&a, &mut b);
        for i in 0..25 {
            assert_eq!(b[i], i as i32 - 100 * i as i32);
        }
        assert_eq!(b[25], 2500);
    }

    #[test]
    fn every_named_op_matches_its_operator() {
        macro_rules! check {
            ($copying:ident, $into:ident, $assign:ident, $assign_rhs:ident, $op:expr) => {{
                let op: fn(f64, f64) -> f64 = $op;
                let a: Vec<f64> = (1..=21).map(|i| i as f64 * 1.5).collect();
                let b: Vec<f64> = (1..=21).map(|i| 22.0 - i as f64).collect();
                let s = 4.0f64;
                let expected: Vec<f64> = a.iter().zip(&b).map(|(&x, &y)| op(x, y)).collect();
                let expected_scalar: Vec<f64> = a.iter().map(|&x| op(x, s)).collect();
                let name = stringify!($copying);

                assert_eq!($copying(&a, &b), expected, "{name}");
                assert_eq!($copying(&a, s), expected_scalar, "{name} scalar");

                let mut result = vec![0.0f64; 21];
                $into(&a, &b, &mut result);
                assert_eq!(result, expected, "{name} into");
                $into(&a, s, &mut result);
                assert_eq!(result, expected_scalar, "{name} into scalar");

                let mut lhs = a.clone();
                $assign(&mut lhs, &b);
                assert_eq!(lhs, expected, "{name} assign");
                let mut lhs = a.clone();
                $assign(&mut lhs, s);
                assert_eq!(lhs, expected_scalar, "{name} assign scalar");

                let mut rhs = b.clone();
                $assign_rhs(&a, &mut rhs);
                assert_eq!(rhs, expected, "{name} assign rhs");
            }};
        }

        check!(add, add_in, add_assign, add_assign_rhs, |x, y| x + y);
        check!(sub, sub_in, sub_assign, sub_assign_rhs, |x, y| x - y);
        check!(mul, mul_in, mul_assign, mul_assign_rhs, |x, y| x * y);
        check!(div, div_in, div_assign, div_assign_rhs, |x, y| x / y);
    }

    #[test]
    fn integer_lanes_wrap_on_every_path() {
        // One full 64-lane vector, then a six-element scalar tail.
        let a = vec![250u8; 70];
        let sum = add(&a, 10u8);
        assert!(sum.iter().all(|&v| v == 4));

        let b = vec![i8::MIN; 70];
        let diff = sub(&b, 1i8);
        assert!(diff.iter().all(|&v| v == i8::MAX));
    }

    #[test]
    fn array_operand() {
        let a = [1u32, 2, 3, 4, 5];
        let b = [10u32, 20, 30, 40, 50];
        assert_eq!(add(&a, &b), vec![11, 22, 33, 44, 55]);
    }

    #[test]
    fn reconcile_ignores_scalars() {
        assert_eq!(reconcile(&[Some(25), Some(26), Some(20)]), 20);
        assert_eq!(reconcile(&[Some(7), None]), 7);
        assert_eq!(reconcile(&[]), 0);
    }
}
