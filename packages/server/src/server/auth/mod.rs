// Admin session management
pub mod session;

pub use session::*;
