//! Command line front end for the theme preference store.
//!
//! Run with: cargo run --features cli -- <command>

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colorpref::{
    filter_commands, AdaptiveTheme, ClassList, DisabledStorage, FileStorage, OsSignal,
    PreferenceStorage, Renderer, StoreConfig, ThemeStore,
};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "colorpref", about = "Inspect and change the light/dark theme preference")]
struct Cli {
    /// Origin the preference is stored for
    #[arg(long, global = true, default_value = "portfolio")]
    origin: String,

    /// Storage directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// YAML store configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored preference
    Get,
    /// Print the mode that would be rendered
    Effective,
    /// Store a new preference (light, dark or system)
    Set { value: String },
    /// Move to the next preference: light, dark, system
    Cycle,
    /// List theme commands matching a query
    Commands { query: Option<String> },
    /// Print every change of the effective mode
    Watch {
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}

#[derive(Serialize)]
struct StatusView {
    preference: String,
    system: String,
    effective: String,
}

const STATUS_TEMPLATE: &str = r#"{{ "preference" | style("muted") }} {{ preference | style("accent") }}
{{ "system" | style("muted") }}     {{ system | style("text") }}
{{ "effective" | style("muted") }}  {{ effective | style("stroke") }}"#;

type Store = ThemeStore<Box<dyn PreferenceStorage>, ClassList>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StoreConfig::default(),
    };

    let signal = OsSignal::new();
    let store: Store = ThemeStore::new(config, open_storage(&cli), ClassList::new(), &signal);

    match cli.command {
        Command::Get => println!("{}", store.preference()),
        Command::Effective => println!("{}", store.effective_theme()),
        Command::Set { value } => {
            store.set_preference_str(&value)?;
            print_status(&store)?;
        }
        Command::Cycle => {
            store.cycle_preference();
            print_status(&store)?;
        }
        Command::Commands { query } => {
            for command in filter_commands(query.as_deref().unwrap_or_default()) {
                println!("{:<14} {:<14} {}", command.id, command.title, command.description);
            }
        }
        Command::Watch { interval_ms } => watch(&store, &signal, interval_ms),
    }

    Ok(())
}

fn open_storage(cli: &Cli) -> Box<dyn PreferenceStorage> {
    let storage = match &cli.dir {
        Some(dir) => Some(FileStorage::new(dir, &cli.origin)),
        None => FileStorage::for_origin(&cli.origin),
    };
    match storage {
        Some(storage) => {
            log::debug!("using storage file {}", storage.path().display());
            Box::new(storage)
        }
        None => {
            log::warn!("no data directory available, preference will not be saved");
            Box::new(DisabledStorage)
        }
    }
}

fn print_status(store: &Store) -> Result<()> {
    let mut renderer = Renderer::new(AdaptiveTheme::portfolio());
    renderer.add_template("status", STATUS_TEMPLATE)?;
    let view = StatusView {
        preference: store.preference().to_string(),
        system: store.system_scheme().to_string(),
        effective: store.effective_theme().to_string(),
    };
    println!("{}", renderer.render("status", &view, store.effective_theme())?);
    Ok(())
}

fn watch(store: &Store, signal: &OsSignal, interval_ms: u64) -> ! {
    println!("{}", store.effective_theme());
    let _subscription = store.subscribe(|mode| println!("{}", mode));
    loop {
        thread::sleep(Duration::from_millis(interval_ms));
        signal.poll();
        store.sync_from_storage();
    }
}

fn setup_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} -- {}", record.level(), message));
        })
        .level(log::LevelFilter::Off)
        .level_for("colorpref", level)
        .chain(std::io::stderr())
        .apply()
        .context("installing logger")?;
    Ok(())
}
