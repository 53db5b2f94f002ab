//! Export of the infographic to a PNG file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{error, info};

use lichtrinh_core::model::Itinerary;

use crate::layout::Infographic;
use crate::raster::{RasterError, Rasterizer};

const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(thiserror::Error, Debug)]
/// Failures of an export.
pub enum ExportError {
    /// Another export is still running.
    #[error("an export is already in progress")]
    Busy,
    /// The image could not be produced.
    #[error(transparent)]
    Raster(#[from] RasterError),
    /// The file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// State of the export trigger.
pub enum ExportState {
    /// Ready.
    #[default]
    Idle,
    /// An export is running; the trigger is disabled.
    Generating,
    /// The last export failed; the trigger is enabled again.
    Failed(String),
}

#[derive(Debug, Default)]
/// Guards the export trigger so at most one export runs at a time.
pub struct Exporter {
    state: ExportState,
}

impl Exporter {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Whether the trigger accepts a new export.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state != ExportState::Generating
    }

    /// Disable the trigger; false when an export is already running.
    pub fn begin(&mut self) -> bool {
        if self.state == ExportState::Generating {
            return false;
        }
        self.state = ExportState::Generating;
        true
    }

    /// Re-enable the trigger, whatever the outcome.
    pub fn complete<T>(&mut self, outcome: &Result<T, ExportError>) {
        self.state = match outcome {
            Ok(_) => ExportState::Idle,
            Err(err) => ExportState::Failed(err.to_string()),
        };
    }

    /// Run `job` between [`begin`](Self::begin) and [`complete`](Self::complete).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Busy`] when an export is running, otherwise the
    /// job's own error.
    pub fn run<T>(
        &mut self,
        job: impl FnOnce() -> Result<T, ExportError>,
    ) -> Result<T, ExportError> {
        if !self.begin() {
            return Err(ExportError::Busy);
        }
        let outcome = job();
        self.complete(&outcome);
        outcome
    }
}

/// `{title}_infographic.png` with whitespace runs and reserved path
/// characters replaced by `_`.
#[must_use]
pub fn file_name(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.trim().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if RESERVED.contains(&ch) || ch.is_control() {
            stem.push('_');
        } else {
            stem.push(ch);
        }
    }
    if stem.is_empty() {
        stem.push_str("itinerary");
    }
    format!("{stem}_infographic.png")
}

/// Rasterize `infographic` and write it into `output_dir`.
///
/// The file only appears under its final name once the PNG is fully encoded
/// and written; a failed write leaves nothing behind.
///
/// # Errors
///
/// Returns an [`ExportError`] when rendering or writing fails.
pub fn export_png(
    rasterizer: &dyn Rasterizer,
    infographic: &Infographic,
    title: &str,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let png = rasterizer.rasterize(infographic).inspect_err(|err| {
        error!(error = %err, "infographic rendering failed");
    })?;

    let path = output_dir.join(file_name(title));
    let io_error = |source| ExportError::Io {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(output_dir).map_err(io_error)?;

    let mut staged = NamedTempFile::new_in(output_dir).map_err(io_error)?;
    staged.write_all(&png).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(&path).map_err(|err| io_error(err.error))?;

    info!(path = %path.display(), bytes = png.len(), "infographic exported");
    Ok(path)
}

/// Lay out `itinerary` and export it.
///
/// # Errors
///
/// See [`export_png`].
pub fn export_itinerary(
    rasterizer: &dyn Rasterizer,
    itinerary: &Itinerary,
    export_date: NaiveDate,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    let infographic = Infographic::layout(itinerary, export_date);
    export_png(rasterizer, &infographic, &itinerary.title, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::raster::ResvgRasterizer;

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _infographic: &Infographic) -> Result<Vec<u8>, RasterError> {
            Err(RasterError::Encode("out of memory".to_owned()))
        }
    }

    fn export_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    #[test]
    fn file_name_sanitizes_title() {
        assert_eq!(
            file_name("Hà Giang 3N2Đ · Adventure + Foodie"),
            "Hà_Giang_3N2Đ_·_Adventure_+_Foodie_infographic.png"
        );
        assert_eq!(file_name("Đà Lạt  \t chill"), "Đà_Lạt_chill_infographic.png");
        assert_eq!(file_name("Huế/Hội An: 2N?"), "Huế_Hội_An__2N__infographic.png");
        assert_eq!(file_name("   "), "itinerary_infographic.png");
    }

    #[test]
    fn trigger_disables_while_generating() {
        let mut exporter = Exporter::default();
        assert!(exporter.is_enabled());

        assert!(exporter.begin());
        assert!(!exporter.is_enabled());
        assert!(!exporter.begin(), "second export must be refused");

        exporter.complete(&Ok::<(), ExportError>(()));
        assert!(exporter.is_enabled());
        assert_eq!(exporter.state(), &ExportState::Idle);
    }

    #[test]
    fn failed_export_writes_nothing_and_reenables() {
        let dir = tempfile::tempdir().expect("tempdir");
        let itinerary = fixtures::sample_itinerary();
        let mut exporter = Exporter::default();

        let outcome = exporter.run(|| {
            export_itinerary(&FailingRasterizer, &itinerary, export_date(), dir.path())
        });

        assert!(matches!(outcome, Err(ExportError::Raster(_))));
        assert!(exporter.is_enabled());
        assert!(matches!(
            exporter.state(),
            ExportState::Failed(message) if message.contains("out of memory")
        ));
        let entries = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(entries, 0);
    }

    #[test]
    fn busy_exporter_rejects_run() {
        let mut exporter = Exporter::default();
        assert!(exporter.begin());
        let outcome = exporter.run(|| Ok(()));
        assert!(matches!(outcome, Err(ExportError::Busy)));
        assert!(!exporter.is_enabled());
    }

    #[test]
    fn export_writes_named_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("exports");
        let itinerary = fixtures::sample_itinerary();
        let rasterizer = ResvgRasterizer::new(None).expect("rasterizer");

        let mut exporter = Exporter::default();
        let path = exporter
            .run(|| export_itinerary(&rasterizer, &itinerary, export_date(), &out))
            .expect("export");

        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("Hà_Giang_3N2Đ_·_Adventure_+_Foodie_infographic.png")
        );
        let bytes = fs::read(&path).expect("png");
        assert!(bytes.starts_with(b"\x89PNG"));
        assert_eq!(exporter.state(), &ExportState::Idle);
    }

    #[test]
    fn failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let itinerary = fixtures::sample_itinerary();
        let blocked = dir.path().join(file_name(&itinerary.title));
        fs::create_dir(&blocked).expect("blocking dir");
        let rasterizer = ResvgRasterizer::new(None).expect("rasterizer");

        let outcome = export_itinerary(&rasterizer, &itinerary, export_date(), dir.path());

        assert!(matches!(outcome, Err(ExportError::Io { .. })));
        let entries: Vec<PathBuf> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").path())
            .collect();
        assert_eq!(entries, vec![blocked]);
    }

    #[test]
    fn control_characters_do_not_break_export() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut itinerary = fixtures::sample_itinerary();
        let poi = itinerary
            .days
            .iter_mut()
            .flat_map(|day| day.items.iter_mut())
            .next()
            .map(|item| &mut item.poi)
            .expect("first item");
        "Chợ\u{1}phiên".clone_into(&mut poi.name);
        let rasterizer = ResvgRasterizer::new(None).expect("rasterizer");

        let path = export_itinerary(&rasterizer, &itinerary, export_date(), dir.path())
            .expect("export");

        let bytes = fs::read(&path).expect("png");
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
