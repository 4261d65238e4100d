use serde::de::DeserializeOwned;

use crate::config::ChainOptions;
use crate::document::{IntermediateDocument, ReferenceDocument, TerminalDocument, parse_document};
use crate::error::ChainError;
use crate::fetch::Fetcher;

#[cfg(feature = "async")]
use crate::fetch::AsyncFetcher;

/// The three data documents reached from the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChain {
    /// Document the reference pointed at.
    pub first: IntermediateDocument,
    /// Document `first` pointed at.
    pub second: IntermediateDocument,
    /// Document at the fixed terminal location.
    pub terminal: TerminalDocument,
}

fn fetch_as<T: DeserializeOwned>(fetcher: &dyn Fetcher, location: &str) -> Result<T, ChainError> {
    let body = fetcher.fetch(location)?;
    parse_document(location, &body)
}

/// Resolve the chain with a blocking fetcher.
///
/// Every fetch waits for the previous one; the first failure aborts the chain.
pub fn resolve_chain(
    fetcher: &dyn Fetcher,
    options: &ChainOptions,
) -> Result<DocumentChain, ChainError> {
    let reference: ReferenceDocument = fetch_as(fetcher, &options.entry)?;
    let first: IntermediateDocument = fetch_as(fetcher, &reference.data_location)?;
    let second: IntermediateDocument = fetch_as(fetcher, &first.data_location)?;
    let terminal: TerminalDocument = fetch_as(fetcher, &options.terminal)?;

    Ok(DocumentChain {
        first,
        second,
        terminal,
    })
}

#[cfg(feature = "async")]
async fn fetch_as_async<T: DeserializeOwned>(
    fetcher: &dyn AsyncFetcher,
    location: &str,
) -> Result<T, ChainError> {
    let body = fetcher.fetch(location).await?;
    parse_document(location, &body)
}

#[cfg(feature = "async")]
async fn resolve_pointers(
    fetcher: &dyn AsyncFetcher,
    entry: &str,
) -> Result<(IntermediateDocument, IntermediateDocument), ChainError> {
    let reference: ReferenceDocument = fetch_as_async(fetcher, entry).await?;
    let first: IntermediateDocument = fetch_as_async(fetcher, &reference.data_location).await?;
    let second: IntermediateDocument = fetch_as_async(fetcher, &first.data_location).await?;
    Ok((first, second))
}

/// Resolve the chain with an async fetcher.
///
/// With `prefetch_terminal` set, the terminal document is fetched while the
/// pointer chain resolves; otherwise it is fetched last.
#[cfg(feature = "async")]
pub async fn resolve_chain_async(
    fetcher: &dyn AsyncFetcher,
    options: &ChainOptions,
) -> Result<DocumentChain, ChainError> {
    let (first, second, terminal) = if options.prefetch_terminal {
        let ((first, second), terminal) = futures_util::future::try_join(
            resolve_pointers(fetcher, &options.entry),
            fetch_as_async::<TerminalDocument>(fetcher, &options.terminal),
        )
        .await?;
        (first, second, terminal)
    } else {
        let (first, second) = resolve_pointers(fetcher, &options.entry).await?;
        let terminal: TerminalDocument = fetch_as_async(fetcher, &options.terminal).await?;
        (first, second, terminal)
    };

    Ok(DocumentChain {
        first,
        second,
        terminal,
    })
}
