//! Platform-free core of the chat client.
//!
//! The session controller owns conversation state and talks to the
//! inference backend only through [`ports::ChatBackend`].

pub mod event_bus;
pub mod ports;
pub mod reply;
pub mod request;
pub mod session;
