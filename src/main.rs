// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use chrono::Utc;
use chukfi_store::config::{load_config, load_config_from, StoreConfig};
use chukfi_store::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use chukfi_store::{
    days_remaining, BlogPost, ChangeNotifier, EntityCache, EntityKind, FileStore, KeyValueStore,
    Page, Purgeable, Restorable, SoftDeletable, StoreError, TrashAggregator, TrashFilter,
    TrashItem,
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Chukfi Store - soft-delete trash for dashboard pages and blog posts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the stored JSON arrays (default: ~/.chukfi/data)
    #[arg(long, env = "CHUKFI_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.chukfi/config.toml)
    #[arg(long, env = "CHUKFI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable JSON log format (for log aggregation)
    #[arg(long, env = "CHUKFI_LOG_JSON", default_value = "false", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "CHUKFI_LOG_ROTATION", default_value = "daily", global = true)]
    log_rotation: String,

    /// Custom log directory (default: ~/.chukfi/logs)
    #[arg(long, env = "CHUKFI_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List live records of a kind, in display order
    List {
        /// page or post
        kind: EntityKind,
    },
    /// List the trash across every kind, most recently deleted first
    Trash {
        /// Only show this kind
        #[arg(long)]
        kind: Option<EntityKind>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },
    /// Move a record to the trash
    Delete { kind: EntityKind, id: String },
    /// Bring a record back from the trash
    Restore { kind: EntityKind, id: String },
    /// Permanently remove a trashed record
    Purge { kind: EntityKind, id: String },
    /// Permanently remove every trashed record of every kind
    EmptyTrash,
    /// Permanently remove trashed records past the retention window
    PurgeExpired {
        /// Override `[trash] retention_days`
        #[arg(long)]
        retention_days: Option<u32>,
    },
}

/// One row of `trash` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrashRow {
    kind: EntityKind,
    id: String,
    title: String,
    deleted_at: Option<String>,
    days_remaining: Option<i64>,
}

impl TrashRow {
    fn new(item: &TrashItem, retention_days: u32) -> Self {
        let deleted_at = item.deleted_at().map(ToString::to_string);
        let days_remaining = deleted_at
            .as_deref()
            .and_then(|at| days_remaining(at, Utc::now(), retention_days));
        Self {
            kind: item.kind(),
            id: item.id().to_string(),
            title: item.title().to_string(),
            deleted_at,
            days_remaining,
        }
    }
}

/// Caches and trash view over one storage directory.
struct Store {
    pages: EntityCache<Page>,
    posts: EntityCache<BlogPost>,
    trash: TrashAggregator,
    retention_days: u32,
}

impl Store {
    fn open(config: &StoreConfig) -> Self {
        let data_dir = config.resolve_data_dir();
        debug!("Using data directory {}", data_dir.display());
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(data_dir));
        let notifier = ChangeNotifier::new();
        let keys = &config.storage.keys;
        let pages = EntityCache::<Page>::new(
            Arc::clone(&store),
            notifier.clone(),
            keys.key_for(EntityKind::Page),
        );
        let posts =
            EntityCache::<BlogPost>::new(store, notifier, keys.key_for(EntityKind::Post));
        let trash = TrashAggregator::new()
            .register(pages.clone())
            .register(posts.clone());
        Self {
            pages,
            posts,
            trash,
            retention_days: config.trash.retention_days,
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Editor-facing error text, e.g. for a protected home page.
fn user_facing<T>(result: Result<T, StoreError>) -> Result<T> {
    result.map_err(|e| eyre!(e.user_message()))
}

async fn run_list(store: &Store, kind: EntityKind) -> Result<()> {
    match kind {
        EntityKind::Page => print_json(&store.pages.load_active().await),
        EntityKind::Post => print_json(&store.posts.load_active().await),
    }
}

async fn run_trash(store: &Store, filter: &TrashFilter) -> Result<()> {
    let rows: Vec<TrashRow> = store
        .trash
        .list_trash_filtered(filter)
        .await
        .iter()
        .map(|item| TrashRow::new(item, store.retention_days))
        .collect();
    print_json(&rows)
}

async fn run_delete(store: &Store, kind: EntityKind, id: &str) -> Result<()> {
    let found = match kind {
        EntityKind::Page => user_facing(store.pages.soft_delete(id).await)?.is_some(),
        EntityKind::Post => user_facing(store.posts.soft_delete(id).await)?.is_some(),
    };
    if found {
        println!("Moved {kind} '{id}' to trash");
    } else {
        println!("No {kind} with id '{id}'; nothing to delete");
    }
    Ok(())
}

async fn run_restore(store: &Store, kind: EntityKind, id: &str) -> Result<()> {
    let found = match kind {
        EntityKind::Page => user_facing(store.pages.restore(id).await)?.is_some(),
        EntityKind::Post => user_facing(store.posts.restore(id).await)?.is_some(),
    };
    if found {
        println!("Restored {kind} '{id}'");
    } else {
        println!("No {kind} with id '{id}'; nothing to restore");
    }
    Ok(())
}

async fn run_purge(store: &Store, kind: EntityKind, id: &str) -> Result<()> {
    let removed = match kind {
        EntityKind::Page => user_facing(store.pages.purge(id).await)?,
        EntityKind::Post => user_facing(store.posts.purge(id).await)?,
    };
    if removed {
        println!("Permanently deleted {kind} '{id}'");
    } else {
        println!("No {kind} with id '{id}'; nothing to purge");
    }
    Ok(())
}

async fn run(store: &Store, command: Command) -> Result<()> {
    match command {
        Command::List { kind } => run_list(store, kind).await,
        Command::Trash { kind, search } => {
            let filter = TrashFilter { kind, search };
            run_trash(store, &filter).await
        }
        Command::Delete { kind, id } => run_delete(store, kind, &id).await,
        Command::Restore { kind, id } => run_restore(store, kind, &id).await,
        Command::Purge { kind, id } => run_purge(store, kind, &id).await,
        Command::EmptyTrash => print_json(&store.trash.purge_all_across_kinds().await),
        Command::PurgeExpired { retention_days } => {
            let days = retention_days.unwrap_or(store.retention_days);
            print_json(&store.trash.purge_expired_across_kinds(Utc::now(), days).await)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let mut log_config = LogConfig {
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        console: args.verbose,
        ..Default::default()
    };
    if let Some(dir) = args.log_dir {
        log_config.log_dir = dir;
    }
    let log_file = log_config.log_dir.join(LOG_FILENAME);

    if let Err(e) = init_logging(log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        return Err(e);
    }

    let mut config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let store = Store::open(&config);
    info!(command = ?args.command, "Running command");
    run(&store, args.command).await
}
