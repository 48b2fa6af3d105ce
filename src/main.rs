mod cli;
mod error;
mod output;

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use crate::output::Printer;
use clap::Parser;
use exn::ResultExt;
use sift_cache::DocumentCache;
use sift_config::Settings;
use sift_extract::ContentExtractor;
use sift_search::{ScanOrchestrator, ScanSummary};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match run(args).await {
        Ok(summary) if summary.matched > 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("sift: {err:?}");
            ExitCode::from(2)
        },
    }
}

async fn run(args: Args) -> Result<ScanSummary> {
    let mut settings = Settings::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    args.apply(&mut settings);
    let query = args.query(&settings.search);
    tracing::debug!(?settings, ?query, "Resolved settings");

    let orchestrator = ScanOrchestrator::new(Arc::new(DocumentCache::new()), extractor());
    let handle = orchestrator.spawn(&settings.scan, &query, Printer).or_raise(|| ErrorKind::Search)?;

    let cancel = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted; stopping after the current document");
            cancel.cancel();
        }
    });

    handle.wait().await.or_raise(|| ErrorKind::Search)
}

#[cfg(feature = "pdf")]
fn extractor() -> impl ContentExtractor {
    sift_extract::PdfExtractor
}

#[cfg(not(feature = "pdf"))]
fn extractor() -> impl ContentExtractor {
    sift_extract::PlainTextExtractor
}
