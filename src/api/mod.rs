//! API Lambda handler and request processing

pub mod auth;
pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod view;

// Re-export the main handler for convenience
pub use auth::Authenticator;
pub use handler::{function_handler, handle_request};
pub use view::SlackView;
