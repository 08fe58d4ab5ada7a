mod arch;
pub mod capability;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod register;
pub mod state;
pub mod value;

pub use self::capability::Element;
pub use self::context::{BlockContext, Context, Expression};
pub use self::dispatch::{compute, compute_slices, try_compute_slices, WidthChain};
pub use self::error::{ComputeError, Result};
pub use self::register::Register;
pub use self::value::Value;
