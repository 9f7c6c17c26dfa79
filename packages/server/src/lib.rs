// Yahavi Society AGM RSVP - API Core
//
// This crate provides the backend for collecting residents' RSVP responses
// through a single form and serving an admin view over the collected set.
// Persistence is deliberately modest: the in-memory collection is snapshotted
// to a local JSON file, with an optional fire-and-forget mirror push.

pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
