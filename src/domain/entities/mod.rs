//! Domain entities - Plain data shapes exchanged with the client library

pub mod command;
pub mod jid;
pub mod message;

pub use command::{Command, CommandHandler, CommandInput, CommandRegistry};
pub use message::{MediaKind, MessageData, MessageKey, QuotedMessage, ReplyMessage};
