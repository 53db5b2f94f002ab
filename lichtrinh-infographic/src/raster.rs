//! Pixel rendering of the infographic.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::layout::Infographic;
use crate::svg::render_svg;

/// Device pixels per logical pixel.
pub const SCALE: f32 = 2.0;

#[derive(thiserror::Error, Debug)]
/// Failures turning a layout into PNG bytes.
pub enum RasterError {
    /// The generated SVG was rejected.
    #[error("invalid SVG scene: {0}")]
    Scene(#[from] usvg::Error),
    /// The pixel buffer could not be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    /// A configured font file could not be loaded.
    #[error("cannot load font {}: {source}", path.display())]
    Font {
        /// Font path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Turns a laid-out infographic into an encoded PNG.
pub trait Rasterizer: Send + Sync {
    /// Render `infographic` at [`SCALE`] and encode it.
    ///
    /// # Errors
    ///
    /// Returns a [`RasterError`] when the scene cannot be rendered or encoded.
    fn rasterize(&self, infographic: &Infographic) -> Result<Vec<u8>, RasterError>;
}

/// [`Rasterizer`] backed by resvg.
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    /// Load system fonts plus `font_file`, if given.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Font`] when `font_file` cannot be read.
    pub fn new(font_file: Option<&Path>) -> Result<Self, RasterError> {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        if let Some(path) = font_file {
            fontdb.load_font_file(path).map_err(|source| RasterError::Font {
                path: path.to_path_buf(),
                source,
            })?;
        }
        debug!(faces = fontdb.len(), "font database loaded");
        Ok(Self {
            fontdb: Arc::new(fontdb),
        })
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, infographic: &Infographic) -> Result<Vec<u8>, RasterError> {
        let svg = render_svg(infographic);
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)?;

        let (width, height) = infographic.pixel_size(SCALE);
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Canvas { width, height })?;
        pixmap.fill(tiny_skia::Color::from_rgba8(0xf0, 0xfd, 0xf4, 0xff));
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(SCALE, SCALE),
            &mut pixmap.as_mut(),
        );

        let png = pixmap
            .encode_png()
            .map_err(|err| RasterError::Encode(err.to_string()))?;
        debug!(width, height, bytes = png.len(), "infographic rasterized");
        Ok(png)
    }
}
