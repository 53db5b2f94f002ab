//! Traits describing the itinerary backend and shared error types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{Itinerary, ItineraryId};
use crate::request::GenerateItineraryRequest;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the itinerary backend.
pub enum PortError {
    /// Network layer failed or the body could not be decoded.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Backend answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or the status reason when the body is empty.
        body: String,
    },
    /// No itinerary exists under the requested id.
    #[error("Itinerary not found: {0}")]
    NotFound(ItineraryId),
    /// The backend location is not configured.
    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

impl PortError {
    /// Whether the error means the itinerary does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound(_))
    }
}

#[async_trait]
/// Backend that generates and serves itineraries.
pub trait ItineraryPort: Send + Sync {
    /// Ask the backend to generate a new itinerary.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or is rejected.
    async fn generate(&self, request: &GenerateItineraryRequest) -> Result<Itinerary, PortError>;

    /// Fetch a previously generated itinerary.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotFound`] for unknown ids, another [`PortError`]
    /// when the request fails.
    async fn itinerary(&self, id: &ItineraryId) -> Result<Itinerary, PortError>;
}
