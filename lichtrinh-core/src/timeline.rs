//! Timeline cards for one day.

use crate::catalog::CategoryPresentation;
use crate::format::{format_distance, format_duration, format_rating, format_time, translate_notes};
use crate::model::{Day, Item};
use crate::view::{resolve_category_presentation, sort_items};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Movement from the previous stop.
pub struct TravelSegment {
    /// Travel time, e.g. `35 phút`.
    pub duration: Option<String>,
    /// Travel distance, e.g. `21.0 km`.
    pub distance: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// One stop on the timeline.
pub struct TimelineCard<'a> {
    /// Source item.
    pub item: &'a Item,
    /// 1-based position within the day.
    pub position: usize,
    /// `HH:MM`.
    pub time: String,
    /// Shared category styling.
    pub category: CategoryPresentation,
    /// Stay duration, absent when unspecified.
    pub duration: Option<String>,
    /// Rating with review count.
    pub rating: Option<String>,
    /// Must-try badge.
    pub must_try: bool,
    /// Translated notes.
    pub notes: Option<String>,
    /// Travel segment drawn above the card; never set for the first stop.
    pub travel: Option<TravelSegment>,
    /// Warnings shown before the card.
    pub warnings: &'a [String],
    /// Tips behind the expand toggle.
    pub tips: &'a [String],
}

impl TimelineCard<'_> {
    /// Whether the card offers the tips toggle.
    #[must_use]
    pub fn has_tips(&self) -> bool {
        !self.tips.is_empty()
    }
}

/// Cards of a day in visit order.
#[must_use]
pub fn timeline(day: &Day) -> Vec<TimelineCard<'_>> {
    sort_items(day)
        .into_iter()
        .enumerate()
        .map(|(index, item)| card(index, item))
        .collect()
}

fn card(index: usize, item: &Item) -> TimelineCard<'_> {
    let travel = if index == 0 {
        None
    } else {
        travel_segment(item)
    };

    TimelineCard {
        item,
        position: index + 1,
        time: format_time(&item.visit_time),
        category: resolve_category_presentation(&item.poi.categories),
        duration: (item.duration_minutes > 0).then(|| format_duration(item.duration_minutes)),
        rating: item.poi.google_rating.map(|rating| {
            match item.poi.google_reviews_count {
                Some(count) => format!("⭐ {} ({count})", format_rating(rating)),
                None => format!("⭐ {}", format_rating(rating)),
            }
        }),
        must_try: item.is_must_try(),
        notes: item
            .notes
            .as_deref()
            .filter(|notes| !notes.trim().is_empty())
            .map(translate_notes),
        travel,
        warnings: &item.poi.warnings,
        tips: &item.poi.tips,
    }
}

fn travel_segment(item: &Item) -> Option<TravelSegment> {
    let duration = item.travel_time_from_prev_minutes.map(format_duration);
    let distance = item.distance_from_prev_km.map(format_distance);
    if duration.is_none() && distance.is_none() {
        return None;
    }
    Some(TravelSegment { duration, distance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn cards_follow_visit_order() {
        let itinerary = fixtures::sample_itinerary();
        let day = itinerary.days.first().expect("day");
        let cards = timeline(day);
        let names: Vec<&str> = cards
            .iter()
            .map(|card| card.item.poi.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "Phở chua Hà Giang",
                "Cổng trời Quản Bạ",
                "Quán thắng cố Yên Minh",
                "Rừng thông Yên Minh"
            ]
        );
        assert_eq!(cards.first().map(|card| card.position), Some(1));
    }

    #[test]
    fn first_card_has_no_travel_segment() {
        let itinerary = fixtures::sample_itinerary();
        let cards = timeline(itinerary.days.first().expect("day"));
        let first = cards.first().expect("first");
        assert!(first.travel.is_none());

        let second = cards.get(1).expect("second");
        assert_eq!(
            second.travel,
            Some(TravelSegment {
                duration: Some("50 phút".to_owned()),
                distance: Some("42.3 km".to_owned()),
            })
        );
    }

    #[test]
    fn card_details() {
        let itinerary = fixtures::sample_itinerary();
        let cards = timeline(itinerary.days.first().expect("day"));
        let breakfast = cards.first().expect("breakfast");
        assert_eq!(breakfast.time, "07:00");
        assert_eq!(breakfast.notes.as_deref(), Some("🥐 Bữa sáng"));
        assert_eq!(breakfast.category.label, "Bữa sáng");
        assert!(breakfast.rating.is_none());
        assert!(!breakfast.must_try);

        let pass = cards.get(1).expect("pass");
        assert!(pass.must_try);
        assert_eq!(pass.rating.as_deref(), Some("⭐ 4.6 (2310)"));
        assert_eq!(pass.warnings.len(), 1);
        assert!(pass.has_tips());
        assert_eq!(pass.duration.as_deref(), Some("45 phút"));
    }

    #[test]
    fn zero_duration_is_hidden() {
        let itinerary = fixtures::sample_itinerary();
        let cards = timeline(itinerary.days.get(2).expect("day 3"));
        let lunch = cards.get(2).expect("lunch");
        assert!(lunch.duration.is_none());
    }
}
