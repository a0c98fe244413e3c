//! Domain layer - Message shapes and the command table
//!
//! This layer contains:
//! - Entities: Message data, JIDs, commands
//! - Traits: The boundary to the external chat client
pub mod entities;
pub mod traits;
