pub mod dir;
pub mod http;

use std::path::{Component, Path};

use crate::config::DataSource;
use crate::error::ChainError;

pub use dir::DirFetcher;
pub use http::HttpFetcher;
#[cfg(feature = "async")]
pub use http::AsyncHttpFetcher;

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use std::pin::Pin;

/// Blocking transport: returns the raw body stored at `location`.
pub trait Fetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, ChainError>;
}

/// Async transport for use on a cooperative runtime.
///
/// Each call is a suspension point; the returned future completes when the
/// whole body has arrived.
#[cfg(feature = "async")]
pub trait AsyncFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, ChainError>> + Send + 'a>>;
}

/// Build the blocking fetcher for a data root.
pub fn blocking_fetcher(source: &DataSource) -> Box<dyn Fetcher> {
    match source {
        DataSource::Http(base) => Box::new(HttpFetcher::new(base.clone())),
        DataSource::Dir(dir) => Box::new(DirFetcher::new(dir.clone())),
    }
}

/// Build the async fetcher for a data root.
#[cfg(feature = "async")]
pub fn async_fetcher(source: &DataSource) -> Box<dyn AsyncFetcher> {
    match source {
        DataSource::Http(base) => Box::new(AsyncHttpFetcher::new(base.clone())),
        DataSource::Dir(dir) => Box::new(DirFetcher::new(dir.clone())),
    }
}

/// Resolve a location under a base URL, percent-encoding it as a browser would.
///
/// The base is always treated as a directory, so its last segment is kept.
pub(crate) fn join_url(base: &str, location: &str) -> Result<String, ChainError> {
    let mut root = url::Url::parse(base)
        .map_err(|e| ChainError::fetch(location, format!("bad base URL {base}: {e}")))?;
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.join(location.trim_start_matches('/'))
        .map(String::from)
        .map_err(|e| ChainError::fetch(location, format!("bad location: {e}")))
}

/// Reject locations that would escape the data root.
pub(crate) fn check_relative(location: &str) -> Result<&Path, ChainError> {
    let path = Path::new(location);
    if location.is_empty() {
        return Err(ChainError::fetch(location, "empty location"));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(ChainError::fetch(
                    location,
                    "location must stay inside the data root",
                ));
            }
        }
    }
    Ok(path)
}
