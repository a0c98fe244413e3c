//! Small helpers shared by commands

pub mod tools;

pub use tools::{extract_url, format_bytes, is_url, runtime};
