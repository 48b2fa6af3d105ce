use clap::{ArgAction, Parser};
use sift_config::{SearchDefaults, Settings};
use sift_query::SearchQuery;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Search the text of every document under one or more folders.
///
/// Documents that haven't changed since they were last read are served from
/// an in-memory cache. Prints one line per matching document:
/// `<documents scanned so far>\t<path>\t<first matching line>`.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
pub struct Args {
    /// Text to search for. Each line of a document is searched on its own.
    pub text: String,

    /// Configuration file (TOML, YAML or JSON).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder to search; repeat for more. Replaces the configured roots.
    #[arg(short, long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Treat `*` as any run of characters; a leading `^` or trailing `$`
    /// anchors the match to the start or end of the line.
    #[arg(short, long)]
    pub wildcard: bool,

    /// Ignore case.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Only search the top level of each folder.
    #[arg(long)]
    pub no_recursive: bool,

    /// Extract every document again, even when its content hasn't changed.
    #[arg(long)]
    pub no_cache: bool,

    /// Number of documents to read and extract at the same time.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
impl Args {
    /// Command line flags override whatever the configuration says.
    pub fn apply(&self, settings: &mut Settings) {
        if !self.roots.is_empty() {
            settings.scan.roots = self.roots.clone();
        }
        if settings.scan.roots.is_empty() {
            settings.scan.roots.push(PathBuf::from("."));
        }
        if self.no_recursive {
            settings.scan.recursive = false;
        }
        if self.no_cache {
            settings.scan.caching = false;
        }
        if let Some(jobs) = self.jobs {
            settings.scan.concurrency = jobs;
        }
    }

    pub fn query(&self, defaults: &SearchDefaults) -> SearchQuery {
        let mut query = defaults.query(&self.text);
        query.wildcard |= self.wildcard;
        query.case_insensitive |= self.ignore_case;
        query
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
