// HTTP routes
pub mod admin;
pub mod health;
pub mod rsvp;
pub mod save_responses;

pub use admin::*;
pub use health::*;
pub use rsvp::*;
pub use save_responses::*;
