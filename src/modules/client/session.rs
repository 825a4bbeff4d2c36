use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::shared::constants::TOKEN_STORAGE_KEY;

/// Persistent storage for the session's bearer token.
///
/// The browser front end kept one token string in `localStorage`; here the
/// store is an explicit object the session owns, with a file-backed
/// implementation for real use and an in-memory one for tests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
}

/// Token store backed by a single file under a state directory,
/// named after the fixed storage key.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TOKEN_STORAGE_KEY),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create token store directory: {}", e);
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!("Failed to persist token: {}", e);
        }
    }
}

/// In-memory token store
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(String::from)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }
}

/// Acquires a new token when none is stored or the server rejected the
/// current one (the front end's `prompt()` dialog). Returning `None`
/// aborts the calling request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn acquire(&self) -> Option<String>;
}

/// Interactive token source reading a line from stdin
pub struct StdinTokenSource;

#[async_trait]
impl TokenSource for StdinTokenSource {
    async fn acquire(&self) -> Option<String> {
        tokio::task::spawn_blocking(|| {
            eprint!("Enter your API_TOKEN (Bearer): ");
            let _ = io::stderr().flush();
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).ok()?;
            let token = line.trim();
            if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            }
        })
        .await
        .ok()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.load(), None);
        store.save("tok-1");
        assert_eq!(store.load(), Some("tok-1".to_string()));
        store.save("tok-2");
        assert_eq!(store.load(), Some("tok-2".to_string()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("geocatalog-test-{}", std::process::id()));
        let store = FileTokenStore::new(&dir);
        assert_eq!(store.load(), None);
        store.save("secret");
        assert_eq!(store.load(), Some("secret".to_string()));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
