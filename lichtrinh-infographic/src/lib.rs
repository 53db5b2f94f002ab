//! Shareable infographic of an itinerary: layout, SVG scene and PNG export.

/// Export trigger state and file output.
pub mod export;
/// Block layout of the infographic.
pub mod layout;
/// PNG rendering.
pub mod raster;
/// SVG serialization.
pub mod svg;

#[cfg(test)]
mod fixtures;

pub use export::{ExportError, ExportState, Exporter, export_itinerary, export_png, file_name};
pub use layout::Infographic;
pub use raster::{RasterError, Rasterizer, ResvgRasterizer};
