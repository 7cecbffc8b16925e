//! Cache Module
//!
//! Key-value facade: stores values under generated keys and reads them back
//! with optional decoding.

mod facade;
mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use facade::{Cache, StoreOperation};
pub use value::StoredValue;

// == Public Constants ==
/// Maximum accepted encoded value size in bytes for the HTTP surface
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
