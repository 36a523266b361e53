use std::path::Path;

use base64::Engine as _;
use thiserror::Error;

// Re-export domain types for convenience
pub use quizforge_core::{DocumentKind, DocumentPayload};

/// Default ceiling on document size; inline payloads beyond this are
/// rejected by the provider anyway.
pub const DEFAULT_MAX_DOCUMENT_MB: u64 = 20;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported document type: .{0}")]
    UnsupportedKind(String),
    #[error("empty document")]
    Empty,
    #[error("document too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

/// A fully loaded document, ready to attach to a library entry.
#[derive(Debug, Clone)]
pub struct IngestedFile {
    pub name: String,
    pub kind: DocumentKind,
    pub size_bytes: u64,
    pub size_label: String,
    pub payload: DocumentPayload,
}

/// Whether the path has an extension the ingest layer accepts.
pub fn is_supported_path(path: &Path) -> bool {
    detect_kind(path).is_ok()
}

/// Determine the document kind from the file extension.
pub fn detect_kind(path: &Path) -> Result<DocumentKind, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    DocumentKind::from_extension(&ext).ok_or(IngestError::UnsupportedKind(ext))
}

/// Load a document from disk into an embeddable payload.
///
/// Checks the size ceiling before reading. `max_mb == 0` falls back to the
/// default limit.
pub fn ingest_file(path: &Path, max_mb: u64) -> Result<IngestedFile, IngestError> {
    let kind = detect_kind(path)?;

    let effective_mb = if max_mb == 0 {
        DEFAULT_MAX_DOCUMENT_MB
    } else {
        max_mb
    };
    let limit = effective_mb.saturating_mul(1024 * 1024);

    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(IngestError::Empty);
    }
    if size > limit {
        return Err(IngestError::TooLarge { size, limit });
    }

    let bytes = std::fs::read(path)?;
    let payload = DocumentPayload {
        base64: base64::engine::general_purpose::STANDARD.encode(&bytes),
        mime: kind.mime().to_string(),
    };

    tracing::debug!(
        path = %path.display(),
        size,
        kind = kind.label(),
        "ingested document"
    );

    Ok(IngestedFile {
        name: display_name(path),
        kind,
        size_bytes: size,
        size_label: size_label(size),
        payload,
    })
}

/// The file name portion of a path, for library display.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human-readable size: "342 B", "1.4 KB", "2.0 MB".
pub fn size_label(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn ingest_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "notes.md", b"# Photosynthesis\nLight reactions.");

        let ingested = ingest_file(&path, 0).unwrap();
        assert_eq!(ingested.name, "notes.md");
        assert_eq!(ingested.kind, DocumentKind::Markdown);
        assert_eq!(ingested.payload.mime, "text/markdown");
        assert_eq!(ingested.size_bytes as usize, "# Photosynthesis\nLight reactions.".len());

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&ingested.payload.base64)
            .unwrap();
        assert_eq!(decoded, b"# Photosynthesis\nLight reactions.");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "slides.pptx", b"zip bytes");
        assert!(matches!(
            ingest_file(&path, 0),
            Err(IngestError::UnsupportedKind(ext)) if ext == "pptx"
        ));
        assert!(!is_supported_path(&path));
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "empty.txt", b"");
        assert!(matches!(ingest_file(&path, 0), Err(IngestError::Empty)));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = vec![b'x'; 1024 * 1024 + 1];
        let path = write_fixture(&dir, "big.txt", &body);
        assert!(matches!(
            ingest_file(&path, 1),
            Err(IngestError::TooLarge { .. })
        ));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.pdf");
        assert!(matches!(ingest_file(&path, 0), Err(IngestError::Io(_))));
    }

    #[test]
    fn size_labels() {
        assert_eq!(size_label(342), "342 B");
        assert_eq!(size_label(1433), "1.4 KB");
        assert_eq!(size_label(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn detect_kind_by_extension() {
        assert_eq!(
            detect_kind(Path::new("a.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            detect_kind(Path::new("b.docx")).unwrap(),
            DocumentKind::Docx
        );
        assert_eq!(
            detect_kind(Path::new("c.markdown")).unwrap(),
            DocumentKind::Markdown
        );
        assert!(detect_kind(Path::new("noext")).is_err());
    }
}
