//! Static document store.
//!
//! The narrative ("journey") and resume documents are plain-text files in a
//! data directory. A missing file is not an error: it reads as empty text.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Long-form narrative document.
pub const JOURNEY_DOC: &str = "journey.txt";
/// Structured resume document.
pub const RESUME_DOC: &str = "resume.txt";

/// Reads named plain-text documents from a directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a document exists on disk.
    pub fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    /// Read a document, or empty text when it is absent or unreadable.
    pub async fn load(&self, name: &str) -> String {
        let path = self.root.join(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Document not found, using empty text");
                String::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Document unreadable, using empty text");
                String::new()
            }
        }
    }
}
