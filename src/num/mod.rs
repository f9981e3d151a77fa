mod number;

pub use number::{is_valid_number, Number};
pub(crate) use number::is_valid_strict_number;
