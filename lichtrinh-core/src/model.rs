//! Itinerary payload as returned by the generation service.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Items scoring at or above this value are flagged as must-try.
pub const MUST_TRY_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier of a generated itinerary.
pub struct ItineraryId(pub String);

impl fmt::Display for ItineraryId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A visitable place.
pub struct Poi {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// WGS84 latitude in decimal degrees.
    pub latitude: f64,
    /// WGS84 longitude in decimal degrees.
    pub longitude: f64,
    /// Budget tier label such as `budget` or `luxury`.
    pub budget_level: String,
    /// Average cost in VND.
    pub avg_cost_vnd: i64,
    /// Google rating between 0 and 5.
    #[serde(default)]
    pub google_rating: Option<f64>,
    /// Number of Google reviews.
    #[serde(default)]
    pub google_reviews_count: Option<u32>,
    /// Category tags, most specific first.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Local tips.
    #[serde(default)]
    pub tips: Vec<String>,
    /// Warnings shown next to the stop.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Accommodation has the same shape as any other place.
pub type Accommodation = Poi;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One scheduled visit within a day.
pub struct Item {
    /// Visit sequence within the day.
    pub order_index: i32,
    /// Visit time as sent by the service (`HH:MM:SS`).
    pub visit_time: String,
    /// Planned stay in minutes, 0 when unspecified.
    #[serde(default)]
    pub duration_minutes: u32,
    /// Relevance between 0 and 1.
    #[serde(default)]
    pub match_score: f64,
    /// Free-text notes, meal markers such as `lunch` included.
    #[serde(default)]
    pub notes: Option<String>,
    /// Travel time from the previous stop, absent for the first stop.
    #[serde(default)]
    pub travel_time_from_prev_minutes: Option<u32>,
    /// Travel distance from the previous stop in km.
    #[serde(default)]
    pub distance_from_prev_km: Option<f64>,
    /// Place being visited.
    pub poi: Poi,
}

impl Item {
    /// Whether the stop should carry the must-try badge.
    #[must_use]
    pub fn is_must_try(&self) -> bool {
        self.match_score >= MUST_TRY_THRESHOLD
    }

    /// Whether the notes mark this stop as a meal.
    #[must_use]
    pub fn is_meal(&self) -> bool {
        self.notes.as_deref().is_some_and(|notes| {
            let notes = notes.trim();
            ["breakfast", "lunch", "dinner"]
                .iter()
                .any(|meal| notes.eq_ignore_ascii_case(meal))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One day of the trip.
pub struct Day {
    /// 1-based day number.
    pub day_number: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Short theme line.
    #[serde(default)]
    pub theme: String,
    /// Distance travelled that day in km.
    #[serde(default)]
    pub distance_km: f64,
    /// Where the night is spent.
    #[serde(default)]
    pub accommodation: Option<Accommodation>,
    /// Visits, not necessarily sorted.
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A generated trip.
pub struct Itinerary {
    /// Identifier used for deep links.
    pub id: ItineraryId,
    /// Display title.
    pub title: String,
    /// Destination display name.
    pub destination_name: String,
    /// Departure province display name.
    #[serde(default)]
    pub departure_province_name: String,
    /// Number of days requested.
    pub num_days: u32,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Total budget in VND.
    #[serde(default)]
    pub budget_amount: i64,
    /// Requested pace, opaque to the client.
    #[serde(default)]
    pub pace: String,
    /// Sum of all day distances in km.
    #[serde(default)]
    pub total_distance_km: f64,
    /// Companion codes used for generation.
    #[serde(default)]
    pub companions: Vec<String>,
    /// Vibe codes used for generation.
    #[serde(default)]
    pub vibes: Vec<String>,
    /// Days ordered by day number.
    #[serde(default)]
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Data-quality finding reported by [`Itinerary::validate`].
pub enum DataIssue {
    /// `num_days` disagrees with the number of days in the payload.
    DayCountMismatch {
        /// Declared day count.
        declared: u32,
        /// Days actually present.
        actual: usize,
    },
    /// Day at `position` does not carry the expected 1-based number.
    DayOutOfSequence {
        /// Zero-based position in the payload.
        position: usize,
        /// Day number found there.
        day_number: u32,
    },
    /// Two items of the same day share an order index.
    DuplicateOrderIndex {
        /// Affected day.
        day_number: u32,
        /// Repeated index.
        order_index: i32,
    },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::DayCountMismatch { declared, actual } => {
                write!(formatter, "num_days is {declared} but {actual} days were sent")
            }
            DataIssue::DayOutOfSequence {
                position,
                day_number,
            } => write!(
                formatter,
                "day at position {position} has day_number {day_number}"
            ),
            DataIssue::DuplicateOrderIndex {
                day_number,
                order_index,
            } => write!(
                formatter,
                "day {day_number} repeats order_index {order_index}"
            ),
        }
    }
}

impl Itinerary {
    /// Check the ordering invariants of the payload.
    ///
    /// The payload is still usable when issues are found; callers log them.
    #[must_use]
    pub fn validate(&self) -> Vec<DataIssue> {
        let mut issues = Vec::new();

        if usize::try_from(self.num_days).ok() != Some(self.days.len()) {
            issues.push(DataIssue::DayCountMismatch {
                declared: self.num_days,
                actual: self.days.len(),
            });
        }

        for (position, day) in self.days.iter().enumerate() {
            let expected = u32::try_from(position + 1).ok();
            if expected != Some(day.day_number) {
                issues.push(DataIssue::DayOutOfSequence {
                    position,
                    day_number: day.day_number,
                });
            }

            let mut seen = HashSet::new();
            for item in &day.items {
                if !seen.insert(item.order_index) {
                    issues.push(DataIssue::DuplicateOrderIndex {
                        day_number: day.day_number,
                        order_index: item.order_index,
                    });
                }
            }
        }

        issues
    }

    /// Look up a day by its day number.
    #[must_use]
    pub fn day(&self, day_number: u32) -> Option<&Day> {
        self.days.iter().find(|day| day.day_number == day_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn deserializes_api_payload() {
        let itinerary = fixtures::sample_itinerary();
        assert_eq!(itinerary.id, ItineraryId("it-42".to_owned()));
        assert_eq!(itinerary.days.len(), 3);
        let first = itinerary.days.first().expect("day 1");
        assert_eq!(first.items.len(), 4);
        assert!(first.accommodation.is_some());
        assert!(itinerary.validate().is_empty());
    }

    #[test]
    fn missing_tip_and_warning_lists_default_to_empty() {
        let poi: Poi = serde_json::from_str(
            r#"{"id":"p","name":"Chợ","latitude":23.0,"longitude":105.0,
                "budget_level":"budget","avg_cost_vnd":0,"google_rating":null,
                "categories":["food"]}"#,
        )
        .expect("poi");
        assert!(poi.tips.is_empty());
        assert!(poi.warnings.is_empty());
        assert_eq!(poi.google_reviews_count, None);
    }

    #[test]
    fn must_try_threshold_is_inclusive() {
        let mut item = fixtures::item(1, "08:00:00", &["attraction"]);
        item.match_score = 0.85;
        assert!(item.is_must_try());
        item.match_score = 0.849;
        assert!(!item.is_must_try());
    }

    #[test]
    fn meal_detection_ignores_case() {
        let mut item = fixtures::item(1, "12:00:00", &["food"]);
        item.notes = Some("LUNCH".to_owned());
        assert!(item.is_meal());
        item.notes = Some("lunch with a view".to_owned());
        assert!(!item.is_meal());
        item.notes = None;
        assert!(!item.is_meal());
    }

    #[test]
    fn validate_reports_sequence_problems() {
        let mut itinerary = fixtures::sample_itinerary();
        itinerary.num_days = 4;
        if let Some(day) = itinerary.days.get_mut(1) {
            day.day_number = 7;
            let duplicate = day.items.first().cloned().expect("item");
            day.items.push(duplicate);
        }

        let issues = itinerary.validate();
        assert!(issues.contains(&DataIssue::DayCountMismatch {
            declared: 4,
            actual: 3
        }));
        assert!(issues.contains(&DataIssue::DayOutOfSequence {
            position: 1,
            day_number: 7
        }));
        assert!(
            issues
                .iter()
                .any(|issue| matches!(issue, DataIssue::DuplicateOrderIndex { day_number: 7, .. }))
        );
    }

    #[test]
    fn day_lookup_uses_day_number() {
        let itinerary = fixtures::sample_itinerary();
        assert_eq!(itinerary.day(2).map(|day| day.day_number), Some(2));
        assert!(itinerary.day(9).is_none());
    }
}
