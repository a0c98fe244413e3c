//! Application layer - What command handlers work with
//!
//! This layer contains:
//! - Message: The facade handed to command handlers
//! - Messaging: Dispatching events to commands
//! - Errors: Domain-specific errors

pub mod errors;
pub mod message;
pub mod messaging;
