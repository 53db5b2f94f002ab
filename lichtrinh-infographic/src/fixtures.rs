//! Shared test data.

use lichtrinh_core::model::Itinerary;

pub(crate) fn sample_itinerary() -> Itinerary {
    serde_json::from_str(include_str!("../../testdata/itinerary.json"))
        .expect("sample itinerary parses")
}
