use crate::engine::capability::Element;
use crate::engine::register::Register;
use crate::engine::state::State;
use crate::engine::value::Value;

/// Typed access to the current block of every buffer of a run.
///
/// Slots are the positions of the buffers in the array handed to
/// [`compute`](crate::compute). Loads always observe memory as it was when the
/// expression was invoked; stores are staged and written back once the expression
/// returns, the last store to a slot winning. A slot that is never stored to is left
/// untouched.
pub trait Context<T: Element> {
    /// Register backing the values of this context.
    type Register: Register<T>;

    fn load(&self, slot: usize) -> Value<T, Self::Register>;

    /// Stores a value, or a scalar broadcast to every lane, into `slot`.
    fn store(&mut self, value: impl Into<Value<T, Self::Register>>, slot: usize);

    /// Element index of the first lane.
    fn index(&self) -> usize;

    /// Number of elements covered by one value of this context.
    #[inline(always)]
    fn width(&self) -> usize {
        <Self::Register as Register<T>>::WIDTH
    }
}

/// The per-element computation.
///
/// `eval` is invoked once per block: once for every full block at each vector width,
/// then once for every element of the tail. Because the context type changes with the
/// width, `eval` is generic over it. For small expressions the
/// [`expression!`](crate::expression) macro writes the impl.
pub trait Expression<T: Element> {
    fn eval<C: Context<T>>(&mut self, ctx: &mut C);
}

impl<T: Element, E: Expression<T> + ?Sized> Expression<T> for &mut E {
    #[inline(always)]
    fn eval<C: Context<T>>(&mut self, ctx: &mut C) {
        (**self).eval(ctx)
    }
}

/// The context the dispatcher hands to an expression for one block at width
/// `R::WIDTH`.
pub struct BlockContext<'s, T: Element, R: Register<T>, const N: usize> {
    state: &'s State<T, N>,
    staged: [Option<Value<T, R>>; N],
}

impl<'s, T: Element, R: Register<T>, const N: usize> BlockContext<'s, T, R, N> {
    /// The state must have at least `R::WIDTH` elements remaining.
    #[inline(always)]
    pub(crate) fn new(state: &'s State<T, N>) -> Self {
        debug_assert!(state.remaining_bytes() >= R::WIDTH * std::mem::size_of::<T>());
        Self {
            state,
            staged: [None; N],
        }
    }

    /// Writes the staged stores back to memory, in slot order.
    #[inline(always)]
    pub(crate) fn commit(self) {
        for (slot, value) in self.staged.into_iter().enumerate() {
            if let Some(value) = value {
                // SAFETY: `new` guarantees a full register remains at the cursor.
                unsafe { value.store(self.state.slot(slot)) };
            }
        }
    }
}

impl<'s, T: Element, R: Register<T>, const N: usize> Context<T> for BlockContext<'s, T, R, N> {
    type Register = R;

    #[inline(always)]
    fn load(&self, slot: usize) -> Value<T, R> {
        // SAFETY: `new` guarantees a full register remains at the cursor.
        unsafe { Value::load(self.state.slot(slot)) }
    }

    #[inline(always)]
    fn store(&mut self, value: impl Into<Value<T, R>>, slot: usize) {
        self.staged[slot] = Some(value.into());
    }

    #[inline(always)]
    fn index(&self) -> usize {
        self.state.index()
    }
}
