//! Width dispatch: runs an expression over a whole run, widest registers first.
//!
//! For each width of the element's chain the dispatcher consumes as many whole blocks
//! as fit in the remaining range, then hands the remainder, always shorter than one
//! block, to the next narrower width. The scalar width closes the chain, so every
//! element in `[0, element_count)` is visited exactly once.

use std::mem::size_of;

use crate::engine::capability::Element;
use crate::engine::context::{BlockContext, Expression};
use crate::engine::error::{ComputeError, Result};
use crate::engine::register::Register;
use crate::engine::state::State;

/// A statically known sequence of vector registers, widest first.
///
/// Implemented for tuples of one to three registers; an element type's
/// [`Chain`](Element::Chain) names its entry in the capability table.
pub trait WidthChain<T: Element> {
    const WIDTHS: &'static [usize];

    /// Runs the vector sweeps of the chain, in order.
    ///
    /// # Safety
    ///
    /// The state's buffers must be valid for its element count.
    unsafe fn sweep<const N: usize, E: Expression<T>>(state: &mut State<T, N>, expression: &mut E);
}

macro_rules! width_chain {
    ($($register:ident),+) => {
        impl<T: Element, $($register: Register<T>),+> WidthChain<T> for ($($register,)+) {
            const WIDTHS: &'static [usize] = &[$(<$register as Register<T>>::WIDTH),+];

            #[inline(always)]
            unsafe fn sweep<const N: usize, E: Expression<T>>(
                state: &mut State<T, N>,
                expression: &mut E,
            ) {
                $(sweep::<T, $register, N, E>(state, expression);)+
            }
        }
    };
}

width_chain!(A);
width_chain!(A, B);
width_chain!(A, B, C);

/// Consumes every whole block of `R::WIDTH` elements left in the run.
#[inline(always)]
unsafe fn sweep<T, R, const N: usize, E>(state: &mut State<T, N>, expression: &mut E)
where
    T: Element,
    R: Register<T>,
    E: Expression<T>,
{
    let block = R::WIDTH * size_of::<T>();
    while state.remaining_bytes() >= block {
        let mut ctx = BlockContext::<T, R, N>::new(state);
        expression.eval(&mut ctx);
        ctx.commit();
        state.advance(block);
    }
}

/// Runs `expression` over the first `element_count` elements of every buffer.
///
/// `buffers[i]` is addressed as slot `i` from the expression. Buffers may alias one
/// another only at identical positions (for instance an operand that is also the
/// result); stores are written back in slot order after each invocation.
///
/// # Safety
///
/// Every pointer must be valid for reads and writes of `element_count` elements for the
/// duration of the call, and no other code may access those elements meanwhile. Slots
/// that are only loaded from are never written.
///
/// # Examples
///
/// ```
/// use wide_compute::{compute, expression};
///
/// let mut a: Vec<f32> = (0..100).map(|i| i as f32).collect();
/// let mut b = a.clone();
/// let mut c = vec![0.0f32; 100];
/// unsafe {
///     compute(
///         [a.as_mut_ptr(), b.as_mut_ptr(), c.as_mut_ptr()],
///         100,
///         expression!(f32, |ctx| {
///             let sum = ctx.load(0) + ctx.load(1);
///             ctx.store(sum * 0.5f32, 2);
///         }),
///     );
/// }
/// assert_eq!(c, a);
/// ```
pub unsafe fn compute<T, const N: usize, E>(buffers: [*mut T; N], element_count: usize, mut expression: E)
where
    T: Element,
    E: Expression<T>,
{
    log::trace!(
        "compute: {} x {} over {} buffers, widths {:?} then scalar (native {})",
        element_count,
        std::any::type_name::<T>(),
        N,
        T::WIDTHS,
        T::native_width(),
    );

    let mut state = State::new(buffers, element_count);
    <T::Chain as WidthChain<T>>::sweep(&mut state, &mut expression);
    // The scalar register closes the chain: it takes whatever the vectors left over.
    sweep::<T, T, N, E>(&mut state, &mut expression);
    debug_assert_eq!(state.remaining_bytes(), 0);
}

/// Safe front end of [`compute`]: processes the length of the shortest slice and returns
/// that count.
pub fn compute_slices<T, const N: usize, E>(slices: [&mut [T]; N], expression: E) -> usize
where
    T: Element,
    E: Expression<T>,
{
    let element_count = slices.iter().map(|slice| slice.len()).min().unwrap_or(0);
    let buffers = slices.map(|slice| slice.as_mut_ptr());
    // SAFETY: the slices are distinct exclusive borrows at least `element_count` long.
    unsafe { compute(buffers, element_count, expression) };
    element_count
}

/// Like [`compute_slices`], but processes exactly `element_count` elements and fails if
/// any slice is shorter.
pub fn try_compute_slices<T, const N: usize, E>(
    slices: [&mut [T]; N],
    element_count: usize,
    expression: E,
) -> Result<()>
where
    T: Element,
    E: Expression<T>,
{
    if let Some((slot, slice)) = slices
        .iter()
        .enumerate()
        .find(|(_, slice)| slice.len() < element_count)
    {
        return Err(ComputeError::BufferTooShort {
            slot,
            len: slice.len(),
            required: element_count,
        });
    }
    let buffers = slices.map(|slice| slice.as_mut_ptr());
    // SAFETY: every slice holds at least `element_count` elements, and they are distinct.
    unsafe { compute(buffers, element_count, expression) };
    Ok(())
}
