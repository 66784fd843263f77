#![allow(dead_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a carrier row entered the district record. `NLG` and `MIDLAND` are the
/// seeded singleton carriers; the `B403`/`B457` rows come from free-text
/// "other vendor" columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierType {
    Nlg,
    Midland,
    B403,
    B457,
}

impl CarrierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierType::Nlg => "NLG",
            CarrierType::Midland => "MIDLAND",
            CarrierType::B403 => "B403",
            CarrierType::B457 => "B457",
        }
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NLG" => Ok(CarrierType::Nlg),
            "MIDLAND" => Ok(CarrierType::Midland),
            "B403" => Ok(CarrierType::B403),
            "B457" => Ok(CarrierType::B457),
            other => Err(format!("unknown carrier type '{other}'")),
        }
    }
}

/// A vendor approved for exactly one district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub carrier_type: CarrierType,
    pub recommended: bool,
    pub link: Option<String>,
}

impl Carrier {
    pub fn new(name: impl Into<String>, carrier_type: CarrierType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            carrier_type,
            recommended: false,
            link: None,
        }
    }
}

/// A school district aggregate. The district exclusively owns its carriers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub county: String,
    pub city: String,
    pub nces_id: String,
    pub tpa_name: String,
    pub carriers: Vec<Carrier>,
}

impl District {
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            state: state.into(),
            county: String::new(),
            city: String::new(),
            nces_id: String::new(),
            tpa_name: String::new(),
            carriers: Vec::new(),
        }
    }

    pub fn with_carrier(mut self, carrier: Carrier) -> Self {
        self.carriers.push(carrier);
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Database rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
pub struct DistrictRow {
    pub id: Uuid,
    pub name: String,
    pub state: String,
    pub county: String,
    pub city: String,
    pub nces_id: String,
    pub tpa_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CarrierRow {
    pub id: Uuid,
    pub district_id: Uuid,
    pub name: String,
    pub carrier_type: String,
    pub recommended: bool,
    pub link: Option<String>,
}

impl DistrictRow {
    /// Assembles the aggregate from its row and the carrier rows that belong to it.
    pub fn into_district(self, carriers: Vec<Carrier>) -> District {
        District {
            id: self.id,
            name: self.name,
            state: self.state,
            county: self.county,
            city: self.city,
            nces_id: self.nces_id,
            tpa_name: self.tpa_name,
            carriers,
        }
    }
}

impl TryFrom<CarrierRow> for Carrier {
    type Error = String;

    fn try_from(row: CarrierRow) -> Result<Self, Self::Error> {
        Ok(Carrier {
            id: row.id,
            name: row.name,
            carrier_type: row.carrier_type.parse()?,
            recommended: row.recommended,
            link: row.link.filter(|l| !l.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_carrier_type_round_trips_through_text() {
        for ty in [
            CarrierType::Nlg,
            CarrierType::Midland,
            CarrierType::B403,
            CarrierType::B457,
        ] {
            assert_eq!(ty.as_str().parse::<CarrierType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_carrier_type_is_rejected() {
        assert!("ROTH".parse::<CarrierType>().is_err());
    }

    #[test]
    fn test_carrier_serializes_type_field() {
        let carrier = Carrier::new("Midland", CarrierType::Midland);
        let value = serde_json::to_value(&carrier).unwrap();
        assert_eq!(value["type"], json!("MIDLAND"));
        assert_eq!(value["recommended"], json!(false));
    }

    #[test]
    fn test_carrier_row_drops_blank_link() {
        let row = CarrierRow {
            id: Uuid::new_v4(),
            district_id: Uuid::new_v4(),
            name: "Equitable".into(),
            carrier_type: "B403".into(),
            recommended: false,
            link: Some("  ".into()),
        };
        let carrier = Carrier::try_from(row).unwrap();
        assert_eq!(carrier.link, None);
        assert_eq!(carrier.carrier_type, CarrierType::B403);
    }
}
