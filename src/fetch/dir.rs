use std::path::PathBuf;

use crate::error::ChainError;
use crate::fetch::{Fetcher, check_relative};

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// Reads documents from a local directory.
///
/// Locations are confined to `root`: absolute paths and `..` are refused.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, location: &str) -> Result<PathBuf, ChainError> {
        Ok(self.root.join(check_relative(location)?))
    }
}

impl Fetcher for DirFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, ChainError> {
        let path = self.path_for(location)?;
        tracing::debug!(path = %path.display(), "read");
        std::fs::read(&path).map_err(|e| ChainError::fetch(location, e))
    }
}

#[cfg(feature = "async")]
impl crate::fetch::AsyncFetcher for DirFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ChainError>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.path_for(location)?;
            tracing::debug!(path = %path.display(), "read");
            tokio::fs::read(&path)
                .await
                .map_err(|e| ChainError::fetch(location, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dir_fetcher_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reference.json"), b"{}").unwrap();
        let fetcher = DirFetcher::new(dir.path());
        assert_eq!(Fetcher::fetch(&fetcher, "reference.json").unwrap(), b"{}");
    }

    #[test]
    fn test_dir_fetcher_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = DirFetcher::new(dir.path());
        let err = Fetcher::fetch(&fetcher, "nope.json").unwrap_err();
        assert!(matches!(err, ChainError::Fetch { .. }));
        assert_eq!(err.location(), "nope.json");
    }

    #[test]
    fn test_dir_fetcher_refuses_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let inner = dir.path().join("data");
        fs::create_dir(&inner).unwrap();
        fs::write(dir.path().join("secret.json"), b"{}").unwrap();
        let fetcher = DirFetcher::new(&inner);
        let err = Fetcher::fetch(&fetcher, "../secret.json").unwrap_err();
        assert!(format!("{err}").contains("data root"), "error was: {err}");
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_dir_fetcher_async_reads_file() {
        use crate::fetch::AsyncFetcher;

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d1.json"), b"[]").unwrap();
        let fetcher = DirFetcher::new(dir.path());
        let body = AsyncFetcher::fetch(&fetcher, "nested/d1.json").await.unwrap();
        assert_eq!(body, b"[]");
    }
}
