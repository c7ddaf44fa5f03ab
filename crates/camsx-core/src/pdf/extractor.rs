//! Statement text extraction using lopdf and pdf-extract.

use lopdf::Document;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, trace, warn};

use super::{PasswordChecker, PasswordStatus, Result, StatementDocument, TextProvider};
use crate::error::PdfError;

/// PDF backend for statements, built on lopdf (decryption) and pdf-extract (text).
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

/// Text of every page of an opened statement.
#[derive(Debug, Clone)]
pub struct PdfStatement {
    pages: Vec<String>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Load a document from bytes and unlock it with `password`.
    ///
    /// Returns the parsed document together with bytes pdf-extract can read
    /// (re-saved without encryption when the input was encrypted).
    fn load(&self, data: &[u8], password: Option<&str>) -> Result<(Document, Vec<u8>)> {
        contained(PdfError::Parse, || Self::unlock(data, password))
    }

    fn unlock(data: &[u8], password: Option<&str>) -> Result<(Document, Vec<u8>)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let plain = if doc.is_encrypted() {
            if doc.decrypt(password.unwrap_or("")).is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with supplied password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        Ok((doc, plain))
    }

    fn read(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| PdfError::Read(format!("{}: {}", path.display(), e)))
    }
}

impl PasswordChecker for PdfExtractor {
    fn check(&self, path: &Path, password: Option<&str>) -> PasswordStatus {
        let data = match Self::read(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Password check could not read file: {}", e);
                return PasswordStatus::InvalidFile;
            }
        };

        match self.load(&data, password) {
            Ok(_) => PasswordStatus::Valid,
            Err(PdfError::Encrypted) => {
                debug!("Incorrect password provided for {}", path.display());
                PasswordStatus::InvalidPassword
            }
            Err(e) => {
                debug!("Password check failed for {}: {}", path.display(), e);
                PasswordStatus::InvalidFile
            }
        }
    }
}

impl TextProvider for PdfExtractor {
    type Document = PdfStatement;

    fn open(&self, path: &Path, password: Option<&str>) -> Result<PdfStatement> {
        let data = Self::read(path)?;
        let (doc, plain) = self.load(&data, password)?;

        let pages = contained(PdfError::TextExtraction, || {
            pdf_extract::extract_text_from_mem_by_pages(&plain)
                .map_err(|e| PdfError::TextExtraction(e.to_string()))
        })?;

        debug!(
            "Loaded statement with {} pages ({} with text)",
            doc.get_pages().len(),
            pages.len()
        );
        Ok(PdfStatement { pages })
    }
}

impl PdfStatement {
    /// Build a statement from already extracted page texts.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

impl StatementDocument for PdfStatement {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<Option<String>> {
        let index = page.checked_sub(1).ok_or(PdfError::InvalidPage(page))? as usize;
        let text = self.pages.get(index).ok_or(PdfError::InvalidPage(page))?;

        if text.trim().is_empty() {
            trace!("Page {} has no extractable text", page);
            return Ok(None);
        }
        Ok(Some(text.clone()))
    }
}

/// Run a PDF library call, turning a panic inside it into `to_error`.
fn contained<T>(to_error: fn(String) -> PdfError, f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        warn!("PDF library panicked: {}", message);
        Err(to_error(format!("malformed PDF content ({})", message)))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_statement_page_text() {
        let statement = PdfStatement::from_pages(vec!["Folio No: 1/1".to_string(), "  \n ".to_string()]);
        assert_eq!(statement.page_count(), 2);
        assert_eq!(statement.page_text(1).unwrap().as_deref(), Some("Folio No: 1/1"));
        assert_eq!(statement.page_text(2).unwrap(), None);
        assert!(matches!(statement.page_text(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(statement.page_text(3), Err(PdfError::InvalidPage(3))));
    }

    #[test]
    fn test_check_missing_file() {
        let extractor = PdfExtractor::new();
        let status = extractor.check(Path::new("/nonexistent/statement.pdf"), None);
        assert_eq!(status, PasswordStatus::InvalidFile);
    }

    #[test]
    fn test_check_not_a_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let extractor = PdfExtractor::new();
        assert_eq!(extractor.check(&path, Some("secret")), PasswordStatus::InvalidFile);
        assert!(extractor.open(&path, None).is_err());
    }

    #[test]
    fn test_panic_becomes_error() {
        let result: Result<()> = contained(PdfError::TextExtraction, || panic!("bad font encoding"));
        match result {
            Err(PdfError::TextExtraction(message)) => assert!(message.contains("bad font encoding")),
            other => panic!("unexpected result: {:?}", other),
        }

        let ok = contained(PdfError::Parse, || Ok(7));
        assert!(matches!(ok, Ok(7)));
    }
}
