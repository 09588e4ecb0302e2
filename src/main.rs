use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use quotebook::config::Config;
use quotebook::filter::CategoryFilter;
use quotebook::logging::{init_file_tracing, init_tracing};
use quotebook::render::{Renderer, TextRenderer};
use quotebook::repository::QuoteRepository;
use quotebook::session::QuoteSession;
use quotebook::shutdown::ShutdownHandle;
use quotebook::sync::{spawn_publish, HttpRemote, MergeOutcome, Reconciler, SyncScheduler};
use quotebook::transfer::{export_to, import_from, DEFAULT_EXPORT_FILE};
use quotebook::ui::app::App;
use quotebook::ui::mvi::Reducer;
use quotebook::ui::notice::{SyncNoticeIntent, SyncNoticeReducer, SyncNoticeState};

#[derive(Debug, Parser)]
#[command(name = "quotebook", version, about = "Categorized quote collection with remote sync")]
struct Cli {
    /// Path to the config file (default: <config_dir>/quotebook/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding persisted quotes; overrides `storage.data_dir`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print quotes matching the saved (or given) category.
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Print the category selector.
    Categories,
    /// Set the saved category filter ("all" clears it) and print the view.
    Filter { category: String },
    /// Add a quote and publish it to the endpoint.
    Add {
        text: String,
        category: String,
        /// Keep the quote local.
        #[arg(long)]
        no_post: bool,
    },
    /// Print one random quote from the saved filter.
    Random,
    /// Write the whole collection as JSON.
    Export { path: Option<PathBuf> },
    /// Append quotes from a JSON file.
    Import { path: PathBuf },
    /// Fetch one batch from the endpoint and merge it.
    Sync,
    /// Reconcile on the configured interval until interrupted.
    Watch,
    /// Interactive terminal UI (default).
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = Some(dir);
    }
    let data_dir = config.storage.resolved_data_dir();

    let command = cli.command.unwrap_or(Command::Tui);
    if matches!(command, Command::Tui) {
        let log_path = data_dir.join("quotebook.log");
        init_file_tracing(&log_path, "info", cli.verbose)
            .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;
    } else {
        init_tracing("warn", cli.verbose);
    }
    info!(data_dir = %data_dir.display(), "Starting quotebook");

    let repository = QuoteRepository::open(&data_dir)
        .with_context(|| format!("Failed to open data directory '{}'", data_dir.display()))?;
    let mut session = QuoteSession::open(repository).context("Failed to load quotes")?;

    match command {
        Command::List { category } => {
            if let Some(category) = category {
                session
                    .apply_filter(CategoryFilter::parse(&category))
                    .context("Failed to save category filter")?;
            }
            print_view(&session, false)
        }
        Command::Categories => {
            let mut renderer = TextRenderer::new(io::stdout().lock()).with_categories();
            renderer.render_categories(&session.category_options())?;
            Ok(())
        }
        Command::Filter { category } => {
            session
                .apply_filter(CategoryFilter::parse(&category))
                .context("Failed to save category filter")?;
            print_view(&session, true)
        }
        Command::Add {
            text,
            category,
            no_post,
        } => add(&config, session, &text, &category, no_post),
        Command::Random => {
            let quote = session.random_quote().context("Failed to save last viewed quote")?;
            TextRenderer::new(io::stdout().lock()).render_single(quote.as_ref())?;
            Ok(())
        }
        Command::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            export_to(&path, session.quotes())?;
            println!("Exported {} quotes to {}", session.quotes().len(), path.display());
            Ok(())
        }
        Command::Import { path } => {
            let quotes = import_from(&path)?;
            let count = session.import(quotes).context("Failed to save imported quotes")?;
            println!("Quotes imported successfully! ({count} added)");
            Ok(())
        }
        Command::Sync => sync_once(&config, session),
        Command::Watch => watch(&config, session),
        Command::Tui => tui(&config, session),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn reconciler(config: &Config) -> Result<Reconciler<HttpRemote>> {
    let remote = HttpRemote::new(&config.sync)?;
    Ok(Reconciler::new(Arc::new(remote), config.sync.conflict_policy))
}

fn print_view(session: &QuoteSession, with_categories: bool) -> Result<()> {
    let renderer = TextRenderer::new(io::stdout().lock());
    let mut renderer = if with_categories {
        renderer.with_categories()
    } else {
        renderer
    };
    session.render_to(&mut renderer)?;
    Ok(())
}

fn add(config: &Config, mut session: QuoteSession, text: &str, category: &str, no_post: bool) -> Result<()> {
    let quote = session.add_quote(text, category)?;
    println!("Added {quote}");

    if no_post || !config.sync.post_new_quotes {
        return Ok(());
    }
    let remote = Arc::new(HttpRemote::new(&config.sync)?);
    let runtime = runtime()?;
    // Publishing never rolls back the local add.
    match runtime.block_on(async move { spawn_publish(remote, quote).await }) {
        Ok(Ok(receipt)) => match receipt.id {
            Some(id) => println!("Posted to server (id {id})"),
            None => println!("Posted to server (status {})", receipt.status),
        },
        Ok(Err(err)) => eprintln!("warning: posting quote failed: {err}"),
        Err(err) => eprintln!("warning: posting quote did not complete: {err}"),
    }
    Ok(())
}

fn report(outcome: &MergeOutcome, notice: SyncNoticeState) -> SyncNoticeState {
    println!(
        "Fetched {}, {} new, {} conflicts, {} total",
        outcome.fetched, outcome.added, outcome.conflicts, outcome.total
    );
    let intent = if outcome.has_conflict() {
        SyncNoticeIntent::ConflictDetected {
            conflicts: outcome.conflicts,
        }
    } else {
        SyncNoticeIntent::CleanSync
    };
    let notice = SyncNoticeReducer::reduce(notice, intent);
    if let Some(message) = notice.message() {
        println!("{message}");
    }
    notice
}

fn sync_once(config: &Config, mut session: QuoteSession) -> Result<()> {
    let reconciler = reconciler(config)?;
    let runtime = runtime()?;
    let outcome = runtime.block_on(reconciler.reconcile(&mut session))?;
    report(&outcome, SyncNoticeState::default());
    Ok(())
}

fn watch(config: &Config, mut session: QuoteSession) -> Result<()> {
    let reconciler = reconciler(config)?;
    let period = Duration::from_secs(config.sync.interval_seconds);
    let policy = reconciler.policy();
    let endpoint = reconciler.remote().endpoint().to_string();
    let runtime = runtime()?;

    runtime.block_on(async move {
        let shutdown = ShutdownHandle::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let scheduler = SyncScheduler::new(reconciler, period).spawn(shutdown.clone(), move |result| {
            let _ = tx.send(result);
        });
        println!("Watching {endpoint} every {}s ({policy:?} on conflict, Ctrl+C to stop)", period.as_secs());

        let mut notice = SyncNoticeState::default();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                received = rx.recv() => {
                    let Some(result) = received else { break };
                    match result {
                        Ok(batch) => {
                            let outcome = session.apply_remote(batch, policy)?;
                            notice = report(&outcome, notice);
                        }
                        Err(err) => warn!(error = %err, "Sync failed, retrying on next tick"),
                    }
                }
            }
        }

        shutdown.signal();
        let _ = scheduler.await;
        Ok::<(), anyhow::Error>(())
    })
}

fn tui(config: &Config, session: QuoteSession) -> Result<()> {
    let reconciler = reconciler(config)?;
    let period = Duration::from_secs(config.sync.interval_seconds);
    let export_path = std::env::current_dir()
        .unwrap_or_default()
        .join(DEFAULT_EXPORT_FILE);
    let app = App::new(session, config.sync.clone(), export_path);

    let runtime = runtime()?;
    let _enter = runtime.enter();
    quotebook::ui::run(app, reconciler, period).context("Terminal UI failed")?;
    Ok(())
}
