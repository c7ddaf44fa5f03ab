//! Error types for the camsx-core library.

use thiserror::Error;

/// Main error type for the camsx library.
#[derive(Error, Debug)]
pub enum CamsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement scan error.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the file from disk.
    #[error("failed to read file: {0}")]
    Read(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and the password did not unlock it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Failure of the page/line scan over a statement.
///
/// Any of these aborts the whole scan; records gathered before the fault are
/// discarded by the caller.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The document could not be opened for text extraction.
    #[error("{0}")]
    Open(#[from] PdfError),

    /// A single page could not be read.
    #[error("page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: PdfError,
    },
}

/// Result type for the camsx library.
pub type Result<T> = std::result::Result<T, CamsError>;
