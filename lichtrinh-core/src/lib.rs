//! Core types and service wiring for the lichtrinh itinerary viewer.

/// Static presentation tables and wizard options.
pub mod catalog;
/// Vietnamese display formatting.
pub mod format;
/// Map scene derivation.
pub mod map;
/// Itinerary payload types.
pub mod model;
/// Traits describing the backend interface.
pub mod ports;
/// Generation request body.
pub mod request;
/// High-level service facade used by clients.
pub mod service;
/// Timeline cards.
pub mod timeline;
/// View-model derivation.
pub mod view;
/// Wizard selection record.
pub mod wizard;

#[cfg(test)]
mod fixtures;

pub use model::*;
pub use ports::*;
pub use request::*;
pub use service::*;
