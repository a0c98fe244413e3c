//! Message handling - Routing incoming events to commands

pub mod dispatcher;

pub use dispatcher::{Dispatch, Dispatcher};
