//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Lang: User-facing string table
//! - Media / HTTP: Sniffing, downloading and fetching media
//! - Adapters: Stand-in chat clients (console, memory)

pub mod adapters;
pub mod config;
pub mod http;
pub mod lang;
pub mod media;
