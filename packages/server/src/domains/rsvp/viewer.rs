//! Admin read side - sorting, filtering, and CSV export
//!
//! Pure functions over a store snapshot. Sorting is stable and filtering
//! happens after the sort, so a filtered view preserves the relative order
//! of the full sorted view.

use chrono::NaiveDate;
use serde::Deserialize;

use super::models::response::{Attendance, Response};

/// Sort keys accepted by the admin response table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest submissions first
    #[default]
    Date,
    /// Canonical unit string, ascending
    Flat,
    /// Attending, then undecided, then not attending
    Attendance,
}

/// Attendance filter; `All` keeps every response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceFilter {
    #[default]
    All,
    Yes,
    Undecided,
    No,
}

impl AttendanceFilter {
    fn keeps(&self, attendance: Attendance) -> bool {
        match self {
            AttendanceFilter::All => true,
            AttendanceFilter::Yes => attendance == Attendance::Attending,
            AttendanceFilter::Undecided => attendance == Attendance::Undecided,
            AttendanceFilter::No => attendance == Attendance::NotAttending,
        }
    }
}

/// Sort then filter a snapshot for display
pub fn visible(
    mut responses: Vec<Response>,
    sort: SortKey,
    filter: AttendanceFilter,
) -> Vec<Response> {
    match sort {
        SortKey::Date => responses.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at)),
        SortKey::Flat => responses.sort_by(|a, b| a.full_flat_number.cmp(&b.full_flat_number)),
        SortKey::Attendance => responses.sort_by_key(|r| r.attendance.sort_rank()),
    }
    responses.retain(|r| filter.keeps(r.attendance));
    responses
}

/// Header row of the CSV export
pub const CSV_HEADER: &str = "Flat Number,Tower,Wing,Floor,Flat,Email,Attendance,Submitted At";

/// Serialize responses to CSV, one row per response after the header
///
/// Zero responses produce the header row alone. Fields are joined bare,
/// with no quoting or delimiter escaping; timestamps are RFC 3339 rather
/// than locale strings. An email that itself contains a comma shifts that
/// row's columns.
pub fn to_csv(responses: &[Response]) -> String {
    let mut out = String::from(CSV_HEADER);
    for r in responses {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}",
            r.full_flat_number,
            r.unit.tower,
            r.unit.wing,
            r.unit.floor,
            r.unit.flat,
            r.email,
            r.attendance,
            r.submitted_at.to_rfc3339(),
        ));
    }
    out
}

/// Dated attachment filename for the CSV download
pub fn export_filename(date: NaiveDate) -> String {
    format!("agm_rsvp_{}.csv", date.format("%Y-%m-%d"))
}
