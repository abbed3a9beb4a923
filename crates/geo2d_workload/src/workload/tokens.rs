//! Placeholder tokens the harness resolves at execution time.
//!
//! Their spelling and argument shapes are part of the harness contract.
use serde_json::{json, Value};

/// Replaced by the benchmark database name.
pub const DATABASE: &str = "#B_DB";
/// Replaced by the benchmark collection name.
pub const COLLECTION: &str = "#B_COLL";

/// A random string of `length` characters.
pub fn rand_string(length: u32) -> Value {
    json!({ "#RAND_STRING": [length] })
}

/// A random integer in `[min, max)` offset by the worker thread id.
pub fn rand_int_plus_thread(min: i64, max: i64) -> Value {
    json!({ "#RAND_INT_PLUS_THREAD": [min, max] })
}

/// The value bound by an earlier `let` operation.
pub fn variable(name: &str) -> Value {
    json!({ "#VARIABLE": name })
}
