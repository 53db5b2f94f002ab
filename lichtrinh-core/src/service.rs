//! High-level service facade over the itinerary backend.

use std::sync::Arc;

use tracing::{info, warn};

use crate::model::{Itinerary, ItineraryId};
use crate::ports::{ItineraryPort, PortError};
use crate::request::GenerateItineraryRequest;

/// Public entry point for generating and loading itineraries.
pub struct LichtrinhService {
    port: Arc<dyn ItineraryPort>,
}

impl LichtrinhService {
    /// Create a new service bound to the provided backend.
    #[must_use]
    pub fn new(port: Arc<dyn ItineraryPort>) -> Self {
        Self { port }
    }

    /// Generate an itinerary from wizard answers.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the backend call fails.
    pub async fn generate(
        &self,
        request: &GenerateItineraryRequest,
    ) -> Result<Itinerary, PortError> {
        info!(
            destination = %request.destination_id,
            num_days = request.num_days,
            "generating itinerary"
        );
        let itinerary = self.port.generate(request).await?;
        report_issues(&itinerary);
        Ok(itinerary)
    }

    /// Load an itinerary by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotFound`] for unknown ids, another [`PortError`]
    /// if the backend call fails.
    pub async fn itinerary(&self, id: &ItineraryId) -> Result<Itinerary, PortError> {
        info!(%id, "loading itinerary");
        let itinerary = self.port.itinerary(id).await?;
        report_issues(&itinerary);
        Ok(itinerary)
    }
}

fn report_issues(itinerary: &Itinerary) {
    for issue in itinerary.validate() {
        warn!(id = %itinerary.id, %issue, "itinerary payload issue");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::fixtures;

    #[derive(Default)]
    struct FakePort {
        requests: Mutex<Vec<GenerateItineraryRequest>>,
    }

    #[async_trait]
    impl ItineraryPort for FakePort {
        async fn generate(
            &self,
            request: &GenerateItineraryRequest,
        ) -> Result<Itinerary, PortError> {
            self.requests
                .lock()
                .expect("lock")
                .push(request.clone());
            Ok(fixtures::sample_itinerary())
        }

        async fn itinerary(&self, id: &ItineraryId) -> Result<Itinerary, PortError> {
            if id.0 == "it-42" {
                Ok(fixtures::sample_itinerary())
            } else {
                Err(PortError::NotFound(id.clone()))
            }
        }
    }

    fn request() -> GenerateItineraryRequest {
        GenerateItineraryRequest {
            destination_id: "ha-giang".to_owned(),
            departure_province_id: "hn".to_owned(),
            num_days: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 11, 5).expect("date"),
            budget_amount: 3_000_000,
            pace: None,
            companion_codes: None,
            vibe_codes: None,
            keep_same_accommodation: None,
        }
    }

    #[tokio::test]
    async fn generate_forwards_request() {
        let port = Arc::new(FakePort::default());
        let service = LichtrinhService::new(Arc::clone(&port) as Arc<dyn ItineraryPort>);

        let itinerary = service.generate(&request()).await.expect("itinerary");
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(port.requests.lock().expect("lock").len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let service = LichtrinhService::new(Arc::new(FakePort::default()));
        let err = service
            .itinerary(&ItineraryId("missing".to_owned()))
            .await
            .expect_err("not found");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Itinerary not found: missing");
    }
}
