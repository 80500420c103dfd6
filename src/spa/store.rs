//! Resource stores
//!
//! A store answers two questions about a request path: does a resource exist
//! there, and what are its bytes. Both must resolve a path the same way so the
//! resolver never sees a file that cannot then be read.

use super::path::RequestPath;
use crate::logger;
use std::future::Future;
use std::path::PathBuf;

/// Backing store of static resources
pub trait ResourceStore {
    /// Whether a regular file exists at exactly this path
    fn exists(&self, path: &RequestPath) -> bool;

    /// Read the whole resource, or `None` if it is absent or unreadable
    fn open(&self, path: &RequestPath) -> impl Future<Output = Option<Vec<u8>>>;
}

/// Store backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request path to a file under the root.
    ///
    /// Returns `None` for anything that is not a regular file inside the
    /// root once symlinks and `..` are resolved.
    pub fn locate(&self, path: &RequestPath) -> Option<PathBuf> {
        if path.is_malformed() {
            return None;
        }

        let relative = path.as_str().trim_start_matches('/');
        let root = match self.root.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                logger::log_warning(&format!(
                    "Web root not found or inaccessible '{}': {e}",
                    self.root.display()
                ));
                return None;
            }
        };

        // Missing files are the common case, not worth a log line
        let file = root.join(relative).canonicalize().ok()?;
        if !file.starts_with(&root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {path} -> {}",
                file.display()
            ));
            return None;
        }

        file.is_file().then_some(file)
    }
}

impl ResourceStore for FsStore {
    fn exists(&self, path: &RequestPath) -> bool {
        self.locate(path).is_some()
    }

    async fn open(&self, path: &RequestPath) -> Option<Vec<u8>> {
        let file = self.locate(path)?;
        match tokio::fs::read(&file).await {
            Ok(content) => Some(content),
            Err(e) => {
                logger::log_error(&format!("Failed to read file '{}': {e}", file.display()));
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Fresh directory layout:
    /// `public/index.html`, `public/css/app.css`, `public/LICENSE`, `public/docs/`,
    /// plus `secret.txt` beside `public`
    fn fixture() -> (TempDir, FsStore) {
        let base = TempDir::new().unwrap();
        let root = base.path().join("public");
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("index.html"), "<html>entry</html>").unwrap();
        fs::write(root.join("css/app.css"), "body{}").unwrap();
        fs::write(root.join("LICENSE"), "MIT").unwrap();
        fs::write(base.path().join("secret.txt"), "secret").unwrap();
        (base, FsStore::new(root))
    }

    fn path(p: &str) -> RequestPath {
        RequestPath::from_uri_path(p)
    }

    #[test]
    fn test_exists_regular_files_only() {
        let (_base, store) = fixture();
        assert!(store.exists(&path("/index.html")));
        assert!(store.exists(&path("/css/app.css")));
        assert!(store.exists(&path("/LICENSE")));
        assert!(!store.exists(&path("/missing.js")));
        assert!(!store.exists(&path("/docs")));
        assert!(!store.exists(&path("/")));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let (_base, store) = fixture();
        assert!(!store.exists(&path("/../secret.txt")));
        assert!(!store.exists(&path("/css/../../secret.txt")));
        assert!(!store.exists(&path("/%2e%2e/secret.txt")));
    }

    #[test]
    fn test_missing_root_is_absent() {
        let store = FsStore::new("/nonexistent/spa_responder/root");
        assert!(!store.exists(&path("/index.html")));
    }

    #[tokio::test]
    async fn test_open_reads_content() {
        let (_base, store) = fixture();
        assert_eq!(store.open(&path("/css/app.css")).await.as_deref(), Some(&b"body{}"[..]));
        assert_eq!(store.open(&path("/nope.css")).await, None);
        assert_eq!(store.open(&path("/../secret.txt")).await, None);
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = memory::MemoryStore::new().with("/index.html", "<html></html>");
        assert!(store.exists(&path("/index.html")));
        assert!(!store.exists(&path("/other")));
        assert_eq!(store.open(&path("/index.html")).await.unwrap(), b"<html></html>");
    }
}
