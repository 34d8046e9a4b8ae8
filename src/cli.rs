// src/cli.rs
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use crate::config::options::parse_periods;
use crate::config::{RunOptions, Source};
use crate::core::net::{FileFetcher, HttpFetcher, PageFetcher};
use crate::csv::Delim;
use crate::pipeline::{run_periods, ExtractionResult, Pipeline, RunSummary, Status};
use crate::progress::Progress;
use crate::store::CsvStore;
use crate::teams::list_teams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Stats,
    Payroll,
    All,
}

impl SourceArg {
    fn sources(self) -> Vec<Source> {
        match self {
            SourceArg::Stats => vec![Source::Stats],
            SourceArg::Payroll => vec![Source::Payroll],
            SourceArg::All => Source::ALL.to_vec(),
        }
    }
}

/// Pull MLB team stats and payroll tables into per-season CSV files.
#[derive(Debug, Parser)]
#[command(name = "mlb_scrape", version)]
struct Args {
    /// Seasons to process, e.g. `1998-2003,2010`
    #[arg(long)]
    years: Option<String>,

    #[arg(long, value_enum)]
    source: Option<SourceArg>,

    /// Seconds allowed per season
    #[arg(long)]
    budget: Option<u64>,

    /// Output root directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Ask for a visible session; only browser-backed fetchers have one
    #[arg(long)]
    headed: bool,

    #[arg(long, value_enum)]
    format: Option<Delim>,

    /// YAML options file; flags given here win over its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    /// Print `ABBR,Name` for every team and exit
    #[arg(long)]
    list_teams: bool,

    /// Read saved pages from a directory instead of the network
    #[arg(long)]
    from_dir: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> Result<RunOptions> {
        let mut opts = match &self.config {
            Some(path) => RunOptions::load(path)?,
            None => RunOptions::default(),
        };
        if let Some(years) = &self.years {
            opts.periods = parse_periods(years)?;
        }
        if let Some(source) = self.source {
            opts.sources = source.sources();
        }
        if let Some(budget) = self.budget {
            opts.period_budget_secs = budget;
        }
        if let Some(out) = &self.out {
            opts.out_root = out.clone();
        }
        if self.headed {
            opts.headless = false;
        }
        if let Some(format) = self.format {
            opts.format = format;
        }
        Ok(opts.validate()?)
    }
}

pub fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if args.list_teams {
        for (abbr, name) in list_teams() {
            println!("{abbr},{name}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    crate::log::init(args.verbose).wrap_err("installing log subscriber")?;
    let opts = args.options()?;
    info!(
        periods = opts.periods.len(),
        sources = ?opts.sources,
        out = %opts.out_root.display(),
        "run configured"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    spawn_interrupt_listener(Arc::clone(&cancel));

    let summary = match &args.from_dir {
        Some(dir) => drive(FileFetcher::new(dir), &opts, cancel),
        None => {
            if !opts.headless {
                warn!("the http fetcher has no visible session; --headed is ignored");
            }
            let fetcher = HttpFetcher::new(opts.nav_timeout()).wrap_err("starting fetch session")?;
            drive(fetcher, &opts, cancel)
        }
    };

    print_summary(&summary);
    Ok(if summary.any_failed() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn drive<F: PageFetcher>(fetcher: F, opts: &RunOptions, cancel: Arc<AtomicBool>) -> RunSummary {
    let store = CsvStore::new(&opts.out_root, opts.format);
    let pause = pause_for(&fetcher, opts);
    let mut pipeline = Pipeline::new(fetcher, store, opts).with_cancel(cancel);
    let mut progress = ConsoleProgress::default();
    run_periods(&mut pipeline, &opts.periods, pause, &mut progress)
}

/// Saved pages need no politeness pause.
fn pause_for<F: PageFetcher>(fetcher: &F, opts: &RunOptions) -> Duration {
    if fetcher.is_remote() { opts.pause_between_periods() } else { Duration::ZERO }
}

/// First Ctrl-C asks the driver to stop at the next boundary, second one exits.
fn spawn_interrupt_listener(cancel: Arc<AtomicBool>) {
    let spawned = thread::Builder::new().name(s!("ctrl-c")).spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                warn!("no interrupt handler: {e}");
                return;
            }
        };
        rt.block_on(async {
            while tokio::signal::ctrl_c().await.is_ok() {
                if cancel.swap(true, Ordering::Relaxed) {
                    eprintln!("interrupted twice, exiting");
                    std::process::exit(130);
                }
                eprintln!("interrupt received, stopping after the current season");
            }
        });
    });
    if let Err(e) = spawned {
        warn!("no interrupt handler: {e}");
    }
}

/* ---------------- console output ---------------- */

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("{total} season(s) queued");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("  {msg}");
    }

    fn item_done(&mut self, period: u16, result: &ExtractionResult) {
        self.done += 1;
        eprintln!(
            "[{}/{}] {period}: {} ({} file(s), {} warning(s))",
            self.done,
            self.total,
            result.status,
            result.files.len(),
            result.warnings.len()
        );
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("season  status       files  tables  warnings");
    for (period, r) in &summary.results {
        println!(
            "{period:<7} {:<12} {:>5}  {:>6}  {:>8}",
            r.status.to_string(),
            r.files.len(),
            r.tables_found.len(),
            r.warnings.len()
        );
        for w in &r.warnings {
            println!("        - {w}");
        }
        if let Some(reason) = &r.failure {
            println!("        ! {reason}");
        }
    }
    println!(
        "\n{} ok, {} partial, {} failed",
        summary.count(Status::Succeeded),
        summary.count(Status::PartialFailure),
        summary.count(Status::Failed)
    );
    if let Some(p) = summary.interrupted {
        println!("interrupted during {p}; later seasons were not attempted");
    }
    let files = summary.files().count();
    if files > 0 {
        println!("{files} file(s) written");
    }
}
