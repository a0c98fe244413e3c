//! wabot - command plugins for a WhatsApp automation bot
//!
//! Commands are registered into an ordered regex table and receive a
//! [`application::message::Message`] that wraps the external client.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod utils;
