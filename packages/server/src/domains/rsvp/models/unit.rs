use std::fmt;
use std::str::FromStr;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest numbered floor in every tower. Ground sits below floor 1.
pub const TOP_FLOOR: u8 = 21;

/// Error for a form token that does not name a valid unit-address part
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {field} value: {value:?}")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

impl ParseFieldError {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

// =============================================================================
// Tower
// =============================================================================

/// One of the society's three towers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tower {
    T1,
    T2,
    T3,
}

impl Tower {
    pub const ALL: [Tower; 3] = [Tower::T1, Tower::T2, Tower::T3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tower::T1 => "T1",
            Tower::T2 => "T2",
            Tower::T3 => "T3",
        }
    }

    /// Tower digits for the canonical unit string ("T1" becomes "01")
    fn padded_number(&self) -> &'static str {
        match self {
            Tower::T1 => "01",
            Tower::T2 => "02",
            Tower::T3 => "03",
        }
    }
}

impl fmt::Display for Tower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tower {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T1" => Ok(Tower::T1),
            "T2" => Ok(Tower::T2),
            "T3" => Ok(Tower::T3),
            other => Err(ParseFieldError::new("tower", other)),
        }
    }
}

impl Serialize for Tower {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tower {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

// =============================================================================
// Wing
// =============================================================================

/// Wing within a tower; every tower has an A and a B wing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    A,
    B,
}

impl Wing {
    pub const ALL: [Wing; 2] = [Wing::A, Wing::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wing::A => "A",
            Wing::B => "B",
        }
    }
}

impl fmt::Display for Wing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wing {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Wing::A),
            "B" => Ok(Wing::B),
            other => Err(ParseFieldError::new("wing", other)),
        }
    }
}

impl Serialize for Wing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Wing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

// =============================================================================
// Floor
// =============================================================================

/// Floor within a wing: ground ("G" on the wire) or a numbered level 1..=21
///
/// The ground floor has four flats; every numbered floor has five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Floor {
    Ground,
    Level(u8),
}

impl Floor {
    /// All floors in form order: ground first, then 1 through 21
    pub fn all() -> impl Iterator<Item = Floor> {
        std::iter::once(Floor::Ground).chain((1..=TOP_FLOOR).map(Floor::Level))
    }

    /// Number of flats on this floor
    pub fn flat_count(&self) -> u8 {
        match self {
            Floor::Ground => 4,
            Floor::Level(_) => 5,
        }
    }

    /// Floor digits for the canonical unit string ("G" becomes "00")
    fn padded_number(&self) -> String {
        match self {
            Floor::Ground => "00".to_string(),
            Floor::Level(n) => format!("{:02}", n),
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Floor::Ground => f.write_str("G"),
            Floor::Level(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Floor {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "G" {
            return Ok(Floor::Ground);
        }
        s.parse::<u8>()
            .ok()
            .filter(|n| (1..=TOP_FLOOR).contains(n))
            .map(Floor::Level)
            .ok_or_else(|| ParseFieldError::new("floor", s))
    }
}

impl Serialize for Floor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Floor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

// =============================================================================
// UnitAddress
// =============================================================================

/// A fully specified residence: tower, wing, floor, and 1-based flat index
///
/// Construct through [`UnitAddress::new`], which checks the flat index
/// against the floor's flat count. On the wire the flat index travels as a
/// digit string under `flatNumber`, matching the form's select values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAddress {
    pub tower: Tower,
    pub wing: Wing,
    pub floor: Floor,
    #[serde(
        rename = "flatNumber",
        serialize_with = "serialize_flat",
        deserialize_with = "deserialize_flat"
    )]
    pub flat: u8,
}

impl UnitAddress {
    pub fn new(tower: Tower, wing: Wing, floor: Floor, flat: u8) -> Result<Self, ParseFieldError> {
        if flat == 0 || flat > floor.flat_count() {
            return Err(ParseFieldError::new("flatNumber", flat.to_string()));
        }
        Ok(Self {
            tower,
            wing,
            floor,
            flat,
        })
    }

    /// Canonical unit string: zero-padded tower digits, wing letter, then
    /// floor and flat digits run together. T1 wing A floor 3 flat 2 is
    /// `T01-A-0302`; the ground floor contributes `00`.
    pub fn canonical(&self) -> String {
        format!(
            "T{}-{}-{}{:02}",
            self.tower.padded_number(),
            self.wing,
            self.floor.padded_number(),
            self.flat
        )
    }
}

fn serialize_flat<S: Serializer>(flat: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(flat)
}

fn deserialize_flat<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse::<u8>()
        .map_err(|_| DeError::custom(format!("unrecognized flatNumber value: {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_unit_string() {
        let unit = UnitAddress::new(Tower::T1, Wing::A, Floor::Level(3), 2).unwrap();
        assert_eq!(unit.canonical(), "T01-A-0302");
    }

    #[test]
    fn test_canonical_ground_floor() {
        let unit = UnitAddress::new(Tower::T3, Wing::B, Floor::Ground, 4).unwrap();
        assert_eq!(
            unit.canonical(),
            "T03-B-0004",
            "Ground floor should contribute 00"
        );
    }

    #[test]
    fn test_canonical_double_digit_floor() {
        let unit = UnitAddress::new(Tower::T2, Wing::A, Floor::Level(21), 5).unwrap();
        assert_eq!(unit.canonical(), "T02-A-2105");
    }

    #[test]
    fn test_ground_floor_has_four_flats() {
        assert_eq!(Floor::Ground.flat_count(), 4);
        assert!(UnitAddress::new(Tower::T1, Wing::A, Floor::Ground, 4).is_ok());
        assert!(
            UnitAddress::new(Tower::T1, Wing::A, Floor::Ground, 5).is_err(),
            "Flat 5 should not exist on the ground floor"
        );
    }

    #[test]
    fn test_numbered_floors_have_five_flats() {
        assert_eq!(Floor::Level(7).flat_count(), 5);
        assert!(UnitAddress::new(Tower::T1, Wing::A, Floor::Level(7), 5).is_ok());
        assert!(UnitAddress::new(Tower::T1, Wing::A, Floor::Level(7), 6).is_err());
    }

    #[test]
    fn test_flat_index_is_one_based() {
        assert!(
            UnitAddress::new(Tower::T1, Wing::A, Floor::Level(1), 0).is_err(),
            "Flat 0 should be rejected"
        );
    }

    #[test]
    fn test_floor_roster() {
        let floors: Vec<Floor> = Floor::all().collect();
        assert_eq!(floors.len(), 22, "Ground plus 21 numbered floors");
        assert_eq!(floors[0], Floor::Ground);
        assert_eq!(floors[21], Floor::Level(21));
    }

    #[test]
    fn test_floor_parse() {
        assert_eq!("G".parse::<Floor>().unwrap(), Floor::Ground);
        assert_eq!("21".parse::<Floor>().unwrap(), Floor::Level(21));
        assert!("0".parse::<Floor>().is_err(), "Floor 0 is spelled G");
        assert!("22".parse::<Floor>().is_err());
        assert!("g".parse::<Floor>().is_err());
    }

    #[test]
    fn test_tower_and_wing_parse() {
        assert_eq!("T2".parse::<Tower>().unwrap(), Tower::T2);
        assert!("T4".parse::<Tower>().is_err());
        assert_eq!("B".parse::<Wing>().unwrap(), Wing::B);
        assert!("C".parse::<Wing>().is_err());
    }

    #[test]
    fn test_unit_wire_shape() {
        let unit = UnitAddress::new(Tower::T1, Wing::A, Floor::Ground, 3).unwrap();
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(
            value,
            json!({
                "tower": "T1",
                "wing": "A",
                "floor": "G",
                "flatNumber": "3"
            })
        );
    }

    #[test]
    fn test_unit_from_wire() {
        let unit: UnitAddress = serde_json::from_value(json!({
            "tower": "T3",
            "wing": "B",
            "floor": "12",
            "flatNumber": "5"
        }))
        .unwrap();
        assert_eq!(unit.tower, Tower::T3);
        assert_eq!(unit.floor, Floor::Level(12));
        assert_eq!(unit.flat, 5);
    }
}
