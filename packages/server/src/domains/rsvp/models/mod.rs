pub mod response;
pub mod unit;

pub use response::{Attendance, Response, Submission};
pub use unit::{Floor, ParseFieldError, Tower, UnitAddress, Wing};
