//! Store traits and filesystem implementations.
//!
//! `DocumentStore` is the host document collaborator (journal entries in a
//! folder); `SessionStore` persists the single resumable interview record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{CoreError, Result};
use crate::session::SessionRecord;

/// Separator written between an existing entry and appended content.
pub const APPEND_SEPARATOR: &str = "\n\n---\n\n";

/// Identity and recency of one stored document.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub id: String,
    pub modified: DateTime<Utc>,
}

/// Host document store. Listing does not guarantee order; callers sort by
/// `modified` descending before truncating to a corpus size.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(&self, folder: &str) -> Result<Vec<DocumentMeta>>;
    async fn read_document(&self, id: &str) -> Result<String>;
    /// Create the file, or append after a separator when it already exists.
    async fn write_document(&self, path: &str, text: &str) -> Result<()>;
    async fn folder_exists(&self, path: &str) -> bool;
    async fn create_folder(&self, path: &str) -> Result<()>;
}

/// Filesystem-backed document store rooted at a base directory. Document ids
/// are paths relative to the root; only markdown files are listed.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn list_documents(&self, folder: &str) -> Result<Vec<DocumentMeta>> {
        let dir = self.resolve(folder);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            let modified: DateTime<Utc> = meta.modified()?.into();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let id = if folder.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", folder.trim_end_matches('/'), name)
            };
            docs.push(DocumentMeta { id, modified });
        }
        Ok(docs)
    }

    async fn read_document(&self, id: &str) -> Result<String> {
        let path = self.resolve(id);
        if !path.is_file() {
            return Err(CoreError::DocumentNotFound(id.to_string()));
        }
        Ok(std::fs::read_to_string(path)?)
    }

    async fn write_document(&self, path: &str, text: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if full.is_file() {
            let existing = std::fs::read_to_string(&full)?;
            std::fs::write(&full, format!("{existing}{APPEND_SEPARATOR}{text}"))?;
        } else {
            std::fs::write(&full, text)?;
        }
        Ok(())
    }

    async fn folder_exists(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    async fn create_folder(&self, path: &str) -> Result<()> {
        std::fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}

/// Persistence for the single resumable interview record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, record: &SessionRecord) -> Result<()>;
    async fn load(&self) -> Result<Option<SessionRecord>>;
    async fn clear(&self) -> Result<()>;
}

/// One JSON file, overwritten on every save, removed on clear.
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `dir/session.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionRecord>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    async fn clear(&self) -> Result<()> {
        if self.path.is_file() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
