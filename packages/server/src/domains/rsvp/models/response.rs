use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::unit::{ParseFieldError, UnitAddress};

/// Attendance intent, one of three fixed values
///
/// Wire values match the form's radio values: `yes`, `undecided`, `no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attendance {
    #[serde(rename = "yes")]
    Attending,
    #[serde(rename = "undecided")]
    Undecided,
    #[serde(rename = "no")]
    NotAttending,
}

impl Attendance {
    /// Wire value as submitted by the form
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Attending => "yes",
            Attendance::Undecided => "undecided",
            Attendance::NotAttending => "no",
        }
    }

    /// Rank for attendance sorting: attending, then undecided, then not
    pub fn sort_rank(&self) -> u8 {
        match self {
            Attendance::Attending => 0,
            Attendance::Undecided => 1,
            Attendance::NotAttending => 2,
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attendance {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Attendance::Attending),
            "undecided" => Ok(Attendance::Undecided),
            "no" => Ok(Attendance::NotAttending),
            other => Err(ParseFieldError::new("attendance", other)),
        }
    }
}

/// One resident's stored RSVP record
///
/// Serialized in the camelCase shape shared by the API and the snapshot
/// file: `{id, tower, wing, floor, flatNumber, fullFlatNumber, email,
/// attendance, submittedAt}`. The id is an opaque token; `fullFlatNumber`
/// is the canonical unit string, derived once at insert and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    #[serde(flatten)]
    pub unit: UnitAddress,
    pub full_flat_number: String,
    pub email: String,
    pub attendance: Attendance,
    pub submitted_at: DateTime<Utc>,
}

/// A validated submission on its way into the store
///
/// `id` and `submitted_at` are normally absent; the store assigns them on
/// insert. They are carried so that imported records keep their history.
#[derive(Debug, Clone)]
pub struct Submission {
    pub unit: UnitAddress,
    pub email: String,
    pub attendance: Attendance,
    pub id: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(unit: UnitAddress, email: impl Into<String>, attendance: Attendance) -> Self {
        Self {
            unit,
            email: email.into(),
            attendance,
            id: None,
            submitted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::rsvp::models::unit::{Floor, Tower, Wing};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_attendance_wire_values() {
        assert_eq!(
            serde_json::to_value(Attendance::Attending).unwrap(),
            json!("yes")
        );
        assert_eq!(
            serde_json::to_value(Attendance::NotAttending).unwrap(),
            json!("no")
        );
        assert_eq!(
            serde_json::from_value::<Attendance>(json!("undecided")).unwrap(),
            Attendance::Undecided
        );
    }

    #[test]
    fn test_attendance_sort_rank_order() {
        assert!(Attendance::Attending.sort_rank() < Attendance::Undecided.sort_rank());
        assert!(Attendance::Undecided.sort_rank() < Attendance::NotAttending.sort_rank());
    }

    #[test]
    fn test_response_wire_shape() {
        let unit = UnitAddress::new(Tower::T1, Wing::A, Floor::Level(3), 2).unwrap();
        let response = Response {
            id: "abc-123".to_string(),
            full_flat_number: unit.canonical(),
            unit,
            email: "resident@example.com".to_string(),
            attendance: Attendance::Attending,
            submitted_at: Utc.with_ymd_and_hms(2025, 9, 21, 10, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc-123",
                "tower": "T1",
                "wing": "A",
                "floor": "3",
                "flatNumber": "2",
                "fullFlatNumber": "T01-A-0302",
                "email": "resident@example.com",
                "attendance": "yes",
                "submittedAt": "2025-09-21T10:30:00Z"
            })
        );

        let parsed: Response = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, response);
    }
}
