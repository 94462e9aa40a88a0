//! Page rasterization for the blank-page filter.
//!
//! Rasterization is an externally supplied capability: the merge engine only
//! needs "give me a grayscale-convertible image of page N of this file", so
//! it talks to a [`PageRenderer`] trait object. The default implementation
//! wraps pdfium behind the optional `render` cargo feature; tests substitute
//! synthetic images.

use image::DynamicImage;
use std::path::Path;

use crate::error::Result;

/// Renders single PDF pages to images.
pub trait PageRenderer {
    /// Rasterize the page at the given zero-based index of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfStitchError::RenderFailed`] when the page cannot
    /// be rasterized, and an I/O-family error when the file cannot be opened.
    fn render_page(&self, path: &Path, page_index: usize) -> Result<DynamicImage>;

    /// Rasterize several pages of `path` in one session.
    ///
    /// The returned images are in `page_indices` order. Implementations that
    /// pay a per-document open cost should override this to open the file
    /// once; the default delegates to [`render_page`](Self::render_page) per
    /// index.
    fn render_pages(&self, path: &Path, page_indices: &[usize]) -> Result<Vec<DynamicImage>> {
        page_indices
            .iter()
            .map(|&index| self.render_page(path, index))
            .collect()
    }
}

#[cfg(feature = "render")]
pub use pdfium::PdfiumRenderer;

#[cfg(feature = "render")]
mod pdfium {
    use super::PageRenderer;
    use crate::error::{PdfStitchError, Result};
    use image::DynamicImage;
    use pdfium_render::prelude::*;
    use std::path::Path;
    use tracing::debug;

    /// Longest-edge pixel cap for rendered pages.
    ///
    /// The blank heuristic only needs a rough intensity histogram, so a
    /// modest raster keeps memory bounded regardless of physical page size.
    const DEFAULT_MAX_PIXELS: u32 = 1024;

    /// Pdfium-backed page renderer.
    pub struct PdfiumRenderer {
        max_pixels: u32,
    }

    impl PdfiumRenderer {
        /// Create a renderer with the default raster size cap.
        pub fn new() -> Self {
            Self {
                max_pixels: DEFAULT_MAX_PIXELS,
            }
        }

        /// Create a renderer capping the longest rendered edge at `max_pixels`.
        pub fn with_max_pixels(max_pixels: u32) -> Self {
            Self { max_pixels }
        }
    }

    impl Default for PdfiumRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PdfiumRenderer {
        fn render_from(
            &self,
            document: &PdfDocument<'_>,
            path: &Path,
            page_index: usize,
        ) -> Result<DynamicImage> {
            let render_config = PdfRenderConfig::new()
                .set_target_width(self.max_pixels as i32)
                .set_maximum_height(self.max_pixels as i32);

            let page = document.pages().get(page_index as u16).map_err(|e| {
                PdfStitchError::RenderFailed {
                    path: path.to_path_buf(),
                    page: page_index as u32 + 1,
                    detail: format!("{e:?}"),
                }
            })?;

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PdfStitchError::RenderFailed {
                    path: path.to_path_buf(),
                    page: page_index as u32 + 1,
                    detail: format!("{e:?}"),
                }
            })?;

            let image = bitmap.as_image();
            debug!(
                "rendered page {} of {} at {}x{} px",
                page_index + 1,
                path.display(),
                image.width(),
                image.height()
            );

            Ok(image)
        }

        fn open<'a>(pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>> {
            pdfium
                .load_pdf_from_file(path, None)
                .map_err(|e| PdfStitchError::CorruptedPdf {
                    path: path.to_path_buf(),
                    details: format!("{e:?}"),
                })
        }
    }

    impl PageRenderer for PdfiumRenderer {
        fn render_page(&self, path: &Path, page_index: usize) -> Result<DynamicImage> {
            let pdfium = Pdfium::default();
            let document = Self::open(&pdfium, path)?;
            self.render_from(&document, path, page_index)
        }

        // One document open per file, not per page.
        fn render_pages(&self, path: &Path, page_indices: &[usize]) -> Result<Vec<DynamicImage>> {
            let pdfium = Pdfium::default();
            let document = Self::open(&pdfium, path)?;
            page_indices
                .iter()
                .map(|&index| self.render_from(&document, path, index))
                .collect()
        }
    }
}
