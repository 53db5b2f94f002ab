//! Shared test data.

use crate::model::{Itinerary, Item, Poi};

pub(crate) const SAMPLE_JSON: &str = include_str!("../../testdata/itinerary.json");

pub(crate) fn sample_itinerary() -> Itinerary {
    serde_json::from_str(SAMPLE_JSON).expect("sample itinerary parses")
}

pub(crate) fn poi(id: &str, categories: &[&str]) -> Poi {
    Poi {
        id: id.to_owned(),
        name: format!("Điểm {id}"),
        latitude: 23.0,
        longitude: 105.0,
        budget_level: "budget".to_owned(),
        avg_cost_vnd: 50_000,
        google_rating: None,
        google_reviews_count: None,
        categories: categories.iter().map(|tag| (*tag).to_owned()).collect(),
        tips: Vec::new(),
        warnings: Vec::new(),
    }
}

pub(crate) fn item(order_index: i32, visit_time: &str, categories: &[&str]) -> Item {
    Item {
        order_index,
        visit_time: visit_time.to_owned(),
        duration_minutes: 30,
        match_score: 0.5,
        notes: None,
        travel_time_from_prev_minutes: None,
        distance_from_prev_km: None,
        poi: poi(&format!("poi-{order_index}"), categories),
    }
}
