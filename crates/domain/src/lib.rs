//! Prescription Coding Domain

/// Chat relay
pub mod chat;

/// Domain errors
pub mod errors;

/// Language model capability
pub mod llm;

/// Prescription extraction
pub mod prescriptions;

pub use chat::ChatRelay;
pub use errors::{Error, FormatError};
pub use llm::{ChatModel, OpenAiClient};
pub use prescriptions::{PrescriptionExtractor, PrescriptionRecord};
