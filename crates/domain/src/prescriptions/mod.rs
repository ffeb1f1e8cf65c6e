/// Prescription record and reply parsing
pub mod record;

/// Medical coding prompt
pub mod prompt;

/// PDF text extraction
pub mod pdf;

/// Spreadsheet rendering
pub mod sheet;

/// Upload pipeline
pub mod extractor;

pub use extractor::PrescriptionExtractor;
pub use record::{parse_records, PrescriptionRecord};
