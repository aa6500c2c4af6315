//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! Capitalising element symbols and consistent scientific formatting are
//! useful in every crate of the workspace.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod string_ext;
mod value_ext;

// Flatten
pub use string_ext::StringExt;
pub use value_ext::ValueExt;
