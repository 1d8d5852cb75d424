//! Display layer. Renders a `SessionView` and reports user intent as
//! [`state::ChatAction`]s; it never touches session state directly.

pub mod panels;
pub mod state;
pub mod theme;
