//! Domain traits - Abstractions over the external chat client

pub mod client;

pub use client::{ChatClient, ContextInfo, ExternalAdReply, OutgoingContent, SendOptions};
