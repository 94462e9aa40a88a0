//! Content-based page filters.
//!
//! Two interchangeable strategies decide whether a page survives a merge
//! beyond the explicit deletion formula:
//!
//! - [`marker`]: drop pages whose first extracted text line starts with a
//!   known "conversion failed" placeholder prefix. Runs as a second pass
//!   over an already-merged document (see [`crate::merge`]).
//! - [`blank`]: drop pages whose rasterized content is almost entirely
//!   white. Runs inline during a streaming merge, one page at a time.
//!
//! A page is kept unless the active strategy says to drop it. The blank
//! heuristic's thresholds are compatibility constants; documents filtered by
//! earlier versions of this tool must filter identically here.

pub mod blank;
pub mod marker;

pub use blank::{is_blank_image, white_ratio, BLANK_RATIO, WHITE_THRESHOLD};
pub use marker::{is_marker_text, MARKER_PREFIX};
