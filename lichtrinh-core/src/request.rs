//! Body of the itinerary generation call.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Requested itinerary density.
pub enum Pace {
    /// Few stops per day.
    Relaxed,
    /// Default density.
    Moderate,
    /// As many stops as fit.
    Packed,
}

impl fmt::Display for Pace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Packed => "packed",
        };
        write!(formatter, "{slug}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// `POST /api/v1/itineraries/generate` body.
pub struct GenerateItineraryRequest {
    /// Destination identifier.
    pub destination_id: String,
    /// Departure province identifier.
    pub departure_province_id: String,
    /// Number of days.
    pub num_days: u32,
    /// First day, serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Total budget in VND.
    pub budget_amount: i64,
    /// Requested density.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<Pace>,
    /// Companion codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion_codes: Option<Vec<String>>,
    /// Vibe codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe_codes: Option<Vec<String>>,
    /// Stay in one place for the whole trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_same_accommodation: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let request = GenerateItineraryRequest {
            destination_id: "ha-giang".to_owned(),
            departure_province_id: "hn".to_owned(),
            num_days: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 11, 5).expect("date"),
            budget_amount: 6_000_000,
            pace: None,
            companion_codes: None,
            vibe_codes: Some(vec!["foodie".to_owned()]),
            keep_same_accommodation: None,
        };
        let json = serde_json::to_value(&request).expect("json");
        assert_eq!(json["start_date"], "2026-11-05");
        assert_eq!(json["vibe_codes"][0], "foodie");
        assert!(json.get("pace").is_none());
        assert!(json.get("companion_codes").is_none());
    }

    #[test]
    fn pace_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Pace::Packed).expect("json"),
            "\"packed\""
        );
        assert_eq!(Pace::Relaxed.to_string(), "relaxed");
    }
}
