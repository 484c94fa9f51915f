mod container;
mod number;
mod value;

pub use container::{Pair, Pairs, Values};
pub use number::{MAX_SAFE_INTEGER, Number};
pub use value::Value;
