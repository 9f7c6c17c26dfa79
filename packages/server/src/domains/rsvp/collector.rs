//! Form collector - turns raw form fields into a validated submission
//!
//! Every check runs on every call so the caller gets one message per
//! offending field, worded exactly as the form page shows them. Validation
//! never mutates anything; the duplicate-email rule is enforced again by
//! the store at insert.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::models::response::{Attendance, Submission};
use super::models::unit::{Floor, Tower, UnitAddress, Wing};

lazy_static! {
    // Deliberately loose: something@something.something, unanchored
    static ref EMAIL_REGEX: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();
}

/// Raw form fields as posted by the RSVP page
///
/// Everything is optional so that validation can report all missing fields
/// at once instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpForm {
    pub tower: Option<String>,
    pub wing: Option<String>,
    pub floor: Option<String>,
    pub flat_number: Option<String>,
    pub email: Option<String>,
    pub attendance: Option<String>,
}

/// Per-field validation messages, keyed by wire field name
///
/// BTreeMap keeps the serialized error order deterministic.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validate a raw form against the currently registered emails
///
/// On success returns the normalized submission: lower-cased email and a
/// unit address whose flat index fits the floor. On failure returns one
/// message per offending field; the first failed check per field wins.
pub fn validate(form: &RsvpForm, existing_emails: &HashSet<String>) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::new();

    let tower = match form.tower.as_deref().map(|s| s.parse::<Tower>()) {
        Some(Ok(tower)) => Some(tower),
        _ => {
            errors.insert("tower", "Please select a tower");
            None
        }
    };

    let wing = match form.wing.as_deref().map(|s| s.parse::<Wing>()) {
        Some(Ok(wing)) => Some(wing),
        _ => {
            errors.insert("wing", "Please select a wing");
            None
        }
    };

    let floor = match form.floor.as_deref().map(|s| s.parse::<Floor>()) {
        Some(Ok(floor)) => Some(floor),
        _ => {
            errors.insert("floor", "Please select a floor");
            None
        }
    };

    let flat = form
        .flat_number
        .as_deref()
        .and_then(|s| s.parse::<u8>().ok());
    let unit = match (tower, wing, floor, flat) {
        (Some(tower), Some(wing), Some(floor), Some(flat)) => {
            match UnitAddress::new(tower, wing, floor, flat) {
                Ok(unit) => Some(unit),
                Err(_) => {
                    // Flat index outside the floor's range
                    errors.insert("flatNumber", "Please select a flat number");
                    None
                }
            }
        }
        _ => {
            if flat.is_none() {
                errors.insert("flatNumber", "Please select a flat number");
            }
            None
        }
    };

    let email = match form.email.as_deref().filter(|e| !e.is_empty()) {
        None => {
            errors.insert("email", "Please enter your email");
            None
        }
        Some(raw) if !EMAIL_REGEX.is_match(raw) => {
            errors.insert("email", "Please enter a valid email address");
            None
        }
        Some(raw) => {
            let email = raw.to_lowercase();
            if existing_emails.contains(&email) {
                errors.insert("email", "This email has already been registered");
                None
            } else {
                Some(email)
            }
        }
    };

    let attendance = match form.attendance.as_deref().map(|s| s.parse::<Attendance>()) {
        Some(Ok(attendance)) => Some(attendance),
        _ => {
            errors.insert("attendance", "Please select your attendance status");
            None
        }
    };

    match (unit, email, attendance) {
        (Some(unit), Some(email), Some(attendance)) if errors.is_empty() => {
            Ok(Submission::new(unit, email, attendance))
        }
        _ => Err(errors),
    }
}
