// Business domains
pub mod rsvp;
