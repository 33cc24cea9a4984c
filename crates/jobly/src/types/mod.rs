//! Bind value types.

pub mod value;

pub use value::{BindError, SqlValue};
