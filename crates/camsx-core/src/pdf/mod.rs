//! PDF access: password pre-check and per-page text extraction.

mod extractor;

pub use extractor::{PdfExtractor, PdfStatement};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Outcome of checking a password against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStatus {
    /// The document opens with the password (or needs none).
    Valid,
    /// The document is encrypted and the password does not unlock it.
    InvalidPassword,
    /// The file is not a readable PDF.
    InvalidFile,
}

/// Checks whether a password opens a document without decoding page content.
pub trait PasswordChecker {
    fn check(&self, path: &Path, password: Option<&str>) -> PasswordStatus;
}

/// An opened document whose pages can be read as layout-preserving text.
pub trait StatementDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text of a page (1-indexed). `None` when the page has no extractable text.
    fn page_text(&self, page: u32) -> Result<Option<String>>;
}

/// Opens documents for text extraction.
pub trait TextProvider {
    type Document: StatementDocument;

    /// Open a document. The returned handle is dropped by the caller when the
    /// extraction finishes.
    fn open(&self, path: &Path, password: Option<&str>) -> Result<Self::Document>;
}

impl<T: PasswordChecker + ?Sized> PasswordChecker for &T {
    fn check(&self, path: &Path, password: Option<&str>) -> PasswordStatus {
        (**self).check(path, password)
    }
}

impl<T: TextProvider + ?Sized> TextProvider for &T {
    type Document = T::Document;

    fn open(&self, path: &Path, password: Option<&str>) -> Result<Self::Document> {
        (**self).open(path, password)
    }
}
