// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use crate::{
    config::{consts::DEFAULT_SEARCH, options::Options},
    driver::{PageDriver, WebDriverSession},
    progress::Progress,
    runner::{RunSummary, Runner},
    specs::{self, DatasetSpec},
    store::SnapshotStore,
};

/// Exit code when at least one dataset failed.
pub const EXIT_PARTIAL: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "tdec_scrape", version, about = "Scrape TDEC water-resource dataviewers into JSON snapshots")]
pub struct Args {
    /// Which dataset to scrape, `all`, or `search` the saved snapshots
    #[arg(long, value_enum, default_value_t = Mode::All)]
    pub mode: Mode,

    /// Search term for `--mode search`
    #[arg(long)]
    pub search: Option<String>,

    /// Directory for snapshots and the log file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// WebDriver endpoint (a running chromedriver)
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    All,
    Complaints,
    Permits,
    Inspections,
    Wells,
    Drillers,
    Search,
}

impl Mode {
    pub fn datasets(self) -> Vec<&'static DatasetSpec> {
        match self {
            Mode::All => specs::ALL.to_vec(),
            Mode::Complaints => vec![&specs::COMPLAINTS],
            Mode::Permits => vec![&specs::PERMITS],
            Mode::Inspections => vec![&specs::INSPECTIONS],
            Mode::Wells => vec![&specs::WATER_WELLS],
            Mode::Drillers => vec![&specs::DRILLERS],
            Mode::Search => Vec::new(),
        }
    }
}

impl Args {
    /// Config file (if any) with command-line overrides applied.
    pub fn options(&self) -> Result<Options> {
        let mut opts = match &self.config {
            Some(p) => Options::load(p).wrap_err("loading config")?,
            None => Options::default(),
        };
        if let Some(d) = &self.data_dir { opts.data_dir = d.clone(); }
        if let Some(w) = &self.webdriver { opts.webdriver = w.clone(); }
        if self.headless { opts.headless = true; }
        Ok(opts)
    }
}

struct LogProgress {
    done: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, dataset: &str) {
        info!("[{}/{}] {dataset}", self.done + 1, self.total);
    }
    fn finish(&mut self, ok: bool) {
        self.done += 1;
        if !ok { warn!("dataset {} of {} did not complete", self.done, self.total); }
    }
}

/// Returns the process exit code.
pub fn run(args: Args) -> Result<i32> {
    let opts = args.options()?;
    let _guard = crate::log::init(&opts.data_dir, &args.log_level).wrap_err("starting logging")?;
    let store = SnapshotStore::new(&opts.data_dir);
    info!(data_dir = %store.root().display(), "snapshot directory");

    if args.mode == Mode::Search {
        let term = args.search.as_deref().unwrap_or(DEFAULT_SEARCH);
        search(&store, term)?;
        return Ok(0);
    }

    info!("TDEC scraper v{}", env!("CARGO_PKG_VERSION"));
    let mut session = WebDriverSession::connect(&opts.webdriver, &opts.browser())
        .wrap_err_with(|| format!("connecting to webdriver at {}", opts.webdriver))?;

    let datasets = args.mode.datasets();
    let policy = opts.policy();
    let summary = {
        let mut runner = Runner::new(&mut session, &store, &policy, opts.settle);
        let mut progress = LogProgress { done: 0, total: datasets.len() };
        runner.run_all(&datasets, opts.dataset_pause(), &mut progress)
    };

    if let Err(e) = session.close() {
        warn!("closing browser session: {e}");
    }
    for r in &summary.reports {
        info!(dataset = r.key, pages = r.pages, statewide = r.statewide, local = r.kept, "complete");
    }
    info!("Done.");

    Ok(exit_code(&summary))
}

/// 0 when every dataset completed, `EXIT_PARTIAL` otherwise.
pub fn exit_code(summary: &RunSummary) -> i32 {
    if summary.all_ok() { 0 } else { EXIT_PARTIAL }
}

fn search(store: &SnapshotStore, term: &str) -> Result<()> {
    info!("=== Search: {term} ===");
    let outcome = store.search(term).wrap_err_with(|| format!("searching for {term:?}"))?;
    info!("  {} matches", outcome.hits.len());
    for hit in &outcome.hits {
        info!("    {} {}", hit.file, hit.record.text());
    }
    info!(path = %outcome.path.display(), "search results written");
    Ok(())
}
