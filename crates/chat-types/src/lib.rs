pub mod message;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::{ChatError, FailureKind};

pub type Result<T> = std::result::Result<T, ChatError>;
