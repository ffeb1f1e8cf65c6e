use thiserror::Error;

/// The language model replied with text that is not a JSON array of records.
#[derive(Error, Debug)]
#[error("Model reply is not a JSON array of records: {source}")]
pub struct FormatError {
    #[from]
    source: serde_json::Error,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Upstream error: {message}")]
    Upstream { message: String },

    #[error(transparent)]
    UpstreamFormat(#[from] FormatError),

    #[error("PDF error: {message}")]
    Pdf { message: String },

    #[error("Document contains no extractable text")]
    EmptyDocument,

    #[error("Spreadsheet error: {message}")]
    Spreadsheet { message: String },
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Whether the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::upstream(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf {
            message: err.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet {
            message: err.to_string(),
        }
    }
}
