//! Download and clipboard surfaces for a rendered prompt.
//!
//! Neither surface is part of prompt assembly. [`Download`] describes the file
//! a front-end offers (name, MIME type, UTF-8 bytes) and can write it into a
//! directory. [`Clipboard`] is the collaborator a front-end injects to copy
//! the prompt text; the library only hands it the text.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use crate::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};

/// A file offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// `zettel_prompt.txt`, `text/plain`, UTF-8 encoded `text`.
    pub fn text(text: &str) -> Self {
        Self {
            file_name: DOWNLOAD_FILE_NAME.to_string(),
            mime: DOWNLOAD_MIME.to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// Write the file into `dir`, returning its final path.
    ///
    /// Atomic write: the bytes go to a temp file first, which is then renamed
    /// into place. An existing file with the same name is replaced.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, String> {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create output dir '{}': {e}", dir.display()))?;

        let final_path = dir.join(&self.file_name);
        let tmp_path = dir.join(format!(".{}.tmp", self.file_name));

        std::fs::write(&tmp_path, &self.bytes)
            .map_err(|e| format!("Failed to write temp file '{}': {e}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &final_path)
            .map_err(|e| format!("Failed to rename into '{}': {e}", final_path.display()))?;

        info!(path = %final_path.display(), bytes = self.bytes.len(), "wrote prompt file");
        Ok(final_path)
    }
}

/// Copies text to a platform clipboard.
///
/// Implemented by front-ends. Errors are reported to the user and never
/// affect the prompt that was generated.
///
/// # Example
///
/// ```
/// use zettel_rs::export::Clipboard;
///
/// struct Stdout;
///
/// impl Clipboard for Stdout {
///     fn copy(&self, text: &str) -> Result<(), String> {
///         println!("{text}");
///         Ok(())
///     }
/// }
/// ```
pub trait Clipboard {
    fn copy(&self, text: &str) -> Result<(), String>;
}

/// In-process clipboard. Holds the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// The last copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<(), String> {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_metadata() {
        let download = Download::text("Zettel über Resonanz");
        assert_eq!(download.file_name, "zettel_prompt.txt");
        assert_eq!(download.mime, "text/plain");
        assert_eq!(download.bytes, "Zettel über Resonanz".as_bytes());
    }

    #[test]
    fn write_into_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Download::text("inhalt").write_into(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("zettel_prompt.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "inhalt");
        assert!(!dir.path().join(".zettel_prompt.txt.tmp").exists());
    }

    #[test]
    fn write_into_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        Download::text("alt").write_into(dir.path()).unwrap();
        let path = Download::text("neu").write_into(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "neu");
    }

    #[test]
    fn write_into_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = Download::text("x").write_into(&nested).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn memory_clipboard_keeps_last_copy() {
        let clipboard = MemoryClipboard::default();
        assert_eq!(clipboard.contents(), None);
        clipboard.copy("eins").unwrap();
        clipboard.copy("zwei").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("zwei"));
    }
}
