pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod render;
pub mod resolver;

pub use config::{ChainOptions, DataSource};
pub use document::{IntermediateDocument, RawRecord, RecordId, ReferenceDocument, TerminalDocument};
pub use error::ChainError;
#[cfg(feature = "async")]
pub use fetch::AsyncFetcher;
pub use fetch::Fetcher;
pub use normalize::{NormalizedRecord, normalize_record, normalize_records};
pub use render::{HtmlTableBody, MarkdownTable, TableSink, render_rows};
pub use resolver::DocumentChain;

/// Normalize the three documents of a chain and concatenate them in chain order.
pub fn collect_records(chain: &DocumentChain) -> Vec<NormalizedRecord> {
    let mut records = normalize_records(&chain.first.data);
    records.extend(normalize_records(&chain.second.data));
    records.extend(normalize_records(&chain.terminal.data));
    records
}

fn report(result: Result<DocumentChain, ChainError>) -> Result<DocumentChain, ChainError> {
    result.inspect_err(|e| {
        tracing::error!(location = e.location(), error = %e, "document chain failed");
    })
}

fn render_chain(chain: &DocumentChain, sink: &mut dyn TableSink) -> usize {
    let records = collect_records(chain);
    render_rows(&records, sink);
    tracing::info!(rows = records.len(), "rendered document chain");
    records.len()
}

/// Resolve the chain with a blocking fetcher and append its rows to `sink`.
///
/// Returns the number of rows appended. Rows are only rendered once every
/// document has been fetched and parsed, so on error the sink is untouched.
pub fn load_table(
    fetcher: &dyn Fetcher,
    options: &ChainOptions,
    sink: &mut dyn TableSink,
) -> Result<usize, ChainError> {
    let chain = report(resolver::resolve_chain(fetcher, options))?;
    Ok(render_chain(&chain, sink))
}

/// Async version of [`load_table`].
#[cfg(feature = "async")]
pub async fn load_table_async(
    fetcher: &dyn AsyncFetcher,
    options: &ChainOptions,
    sink: &mut dyn TableSink,
) -> Result<usize, ChainError> {
    let chain = report(resolver::resolve_chain_async(fetcher, options).await)?;
    Ok(render_chain(&chain, sink))
}

/// Run the blocking pipeline against a URL or directory data root.
pub fn load_from_source(
    source: &DataSource,
    options: &ChainOptions,
    sink: &mut dyn TableSink,
) -> Result<usize, ChainError> {
    let fetcher = fetch::blocking_fetcher(source);
    load_table(fetcher.as_ref(), options, sink)
}
