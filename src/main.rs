use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use chainfetch::{ChainOptions, DataSource, HtmlTableBody, MarkdownTable, TableSink};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Cooperative single-threaded runtime.
    Async,
    /// Blocking requests, one after another.
    Blocking,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Html,
    Markdown,
}

/// Follow a chain of JSON documents and print their records as a table.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Data root: a base URL (http:// or https://) or a local directory.
    #[arg(default_value = "data")]
    source: String,

    /// Location of the reference document, relative to the data root.
    #[arg(long, default_value = chainfetch::config::DEFAULT_ENTRY)]
    entry: String,

    /// Location of the terminal document, relative to the data root.
    #[arg(long, default_value = chainfetch::config::DEFAULT_TERMINAL)]
    terminal: String,

    /// How requests are executed.
    #[arg(long, value_enum, default_value_t = Mode::Async)]
    mode: Mode,

    /// Output table format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Fetch the terminal document while the pointer chain resolves (async mode only).
    #[arg(long)]
    prefetch_terminal: bool,

    /// Write output to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_options(cli: &Cli) -> ChainOptions {
    ChainOptions {
        entry: cli.entry.clone(),
        terminal: cli.terminal.clone(),
        prefetch_terminal: cli.prefetch_terminal,
    }
}

#[cfg(feature = "async")]
fn load_async(
    source: &DataSource,
    options: &ChainOptions,
    sink: &mut dyn TableSink,
) -> Result<usize, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    let fetcher = chainfetch::fetch::async_fetcher(source);
    runtime
        .block_on(chainfetch::load_table_async(fetcher.as_ref(), options, sink))
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "async"))]
fn load_async(
    source: &DataSource,
    options: &ChainOptions,
    sink: &mut dyn TableSink,
) -> Result<usize, String> {
    tracing::warn!("built without the `async` feature, falling back to blocking mode");
    chainfetch::load_from_source(source, options, sink).map_err(|e| e.to_string())
}

fn load(cli: &Cli, sink: &mut dyn TableSink) -> Result<usize, String> {
    let source = DataSource::parse(&cli.source);
    let options = build_options(cli);
    tracing::info!(%source, mode = ?cli.mode, "resolving document chain");

    match cli.mode {
        Mode::Async => load_async(&source, &options, sink),
        Mode::Blocking => {
            if options.prefetch_terminal {
                tracing::warn!("--prefetch-terminal has no effect in blocking mode");
            }
            chainfetch::load_from_source(&source, &options, sink).map_err(|e| e.to_string())
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, ExitCode> {
    let output_buf = match cli.format {
        Format::Html => {
            let mut sink = HtmlTableBody::new();
            load(&cli, &mut sink).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::from(1)
            })?;
            sink.to_table_html()
        }
        Format::Markdown => {
            let mut sink = MarkdownTable::new();
            load(&cli, &mut sink).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::from(1)
            })?;
            sink.to_markdown()
        }
    };

    if let Some(ref out_path) = cli.output {
        std::fs::write(out_path, &output_buf).map_err(|e| {
            eprintln!("error: {}: {e}", out_path.display());
            ExitCode::from(1)
        })?;
    } else {
        io::stdout().write_all(output_buf.as_bytes()).map_err(|e| {
            eprintln!("error: stdout: {e}");
            ExitCode::from(1)
        })?;
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(code) => code,
    }
}
