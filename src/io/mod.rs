//! PDF file input and output.

pub mod reader;
pub mod writer;

pub use reader::{LoadStatistics, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteStatistics};
