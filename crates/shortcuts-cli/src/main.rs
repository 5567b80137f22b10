//! Shortcuts CLI - manage NextUI launcher shortcuts from a shell.
//!
//! Thin front end over shortcuts-core: every subcommand maps onto one
//! `ShortcutsApi` call.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use shortcuts_core::{DeviceClass, Layout, Platform, Position, Shortcut, ShortcutsApi};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "shortcuts")]
#[command(about = "Create and manage NextUI launcher shortcuts")]
struct Args {
    /// SD-card root (defaults to $SDCARD_PATH, then /mnt/SDCARD)
    #[arg(long, global = true)]
    sdcard: Option<PathBuf>,

    /// Platform: tg5040, tg5050 or mac (defaults to $PLATFORM)
    #[arg(long, global = true)]
    platform: Option<String>,

    /// Screen class: widescreen or brick (defaults to $DEVICE)
    #[arg(long, global = true, value_parser = parse_device)]
    device: Option<DeviceClass>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Write logs to a file instead of stderr (`--log-file=<path>`); without a path, the device log location
    #[arg(long, global = true, num_args = 0..=1, require_equals = true)]
    log_file: Option<Option<PathBuf>>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories in the content root
    Categories,
    /// List games in a category (folder name, display name or tag)
    Games { category: String },
    /// List installed utility packages
    Utilities,
    /// List existing shortcuts
    List,
    /// Create a shortcut to a game
    AddGame {
        category: String,
        /// File name, relative path or display name
        entry: String,
        #[arg(long, short, default_value = "bottom", value_parser = parse_position)]
        position: Position,
    },
    /// Create a shortcut to a utility package
    AddUtility {
        package: String,
        #[arg(long, short, default_value = "bottom", value_parser = parse_position)]
        position: Position,
    },
    /// Remove a shortcut by folder or display name
    Remove {
        name: String,
        /// Tag that picks one shortcut when several share a display name
        #[arg(long, short)]
        tag: Option<String>,
    },
    /// Check whether a shortcut exists at any position
    Exists { display: String, tag: String },
    /// Bulk artwork operations
    Artwork {
        #[command(subcommand)]
        action: ArtworkAction,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
enum ArtworkAction {
    /// Regenerate background artwork for every shortcut
    Regenerate,
    /// Remove generated artwork from every shortcut
    Remove,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Show,
    /// Set one preference, e.g. `copy_artwork on`
    Set { key: String, value: String },
}

fn parse_position(s: &str) -> std::result::Result<Position, String> {
    Position::from_str(s).ok_or_else(|| format!("unknown position '{}' (top, alphabetical, bottom)", s))
}

fn parse_device(s: &str) -> std::result::Result<DeviceClass, String> {
    DeviceClass::from_str(s).ok_or_else(|| format!("unknown device '{}' (widescreen, brick)", s))
}

fn init_logging(args: &Args, layout: &Layout) -> Result<()> {
    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    match &args.log_file {
        Some(path) => {
            let path = path.clone().unwrap_or_else(|| layout.log_file());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .init();
        }
        None => {
            FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }
    Ok(())
}

fn print_shortcut(shortcut: &Shortcut) {
    let target = shortcut
        .target
        .as_ref()
        .map(|t| t.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut flags = Vec::new();
    if shortcut.has_artwork {
        flags.push("art".to_string());
    }
    if !shortcut.is_complete() {
        flags.push(format!("missing {:?}", shortcut.missing_files));
    }
    println!(
        "{:<40} {:<10} {:<12} {}{}",
        shortcut.display,
        shortcut.tag,
        shortcut.position.as_str(),
        target,
        if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(", "))
        }
    );
}

fn run(args: Args) -> Result<()> {
    let platform = match &args.platform {
        Some(value) => Platform::from_signal(Some(value.as_str())),
        None => Platform::detect(),
    };
    let layout = match &args.sdcard {
        Some(sdcard) => Layout::new(sdcard, platform),
        None => Layout::from_env(platform)?,
    };
    init_logging(&args, &layout)?;

    let mut builder = ShortcutsApi::builder(&layout.sdcard).platform(platform);
    if let Some(device) = args.device {
        builder = builder.device(device);
    }
    let api = builder.build().context("Failed to open SD card")?;
    debug!("Using settings at {}", api.layout().settings.display());

    match args.command {
        Command::Categories => {
            let categories = api.categories()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                for c in &categories {
                    let disabled = if c.disabled { "  (disabled)" } else { "" };
                    println!("{:<32} {:<10} {}{}", c.display, c.tag, c.name, disabled);
                }
            }
        }
        Command::Games { category } => {
            let category = api.find_category(&category)?;
            let games = api.games(&category)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else {
                for g in &games {
                    let disabled = if g.disabled { "  (disabled)" } else { "" };
                    println!(
                        "{:<40} {:<12} {}{}",
                        g.display,
                        g.kind.label(),
                        g.relative_path.display(),
                        disabled
                    );
                }
            }
        }
        Command::Utilities => {
            let packages = api.utilities()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&packages)?);
            } else {
                for p in &packages {
                    println!("{:<32} {}", p.display, p.path.display());
                }
            }
        }
        Command::List => {
            let shortcuts = api.shortcuts()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&shortcuts)?);
            } else {
                for s in &shortcuts {
                    print_shortcut(s);
                }
            }
        }
        Command::AddGame {
            category,
            entry,
            position,
        } => {
            let category = api.find_category(&category)?;
            let game = api.find_game(&category, &entry)?;
            let shortcut = api
                .create_game_shortcut(&category, &game, position)
                .with_context(|| format!("Failed to create shortcut for {}", game.display))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&shortcut)?);
            } else {
                print_shortcut(&shortcut);
            }
        }
        Command::AddUtility { package, position } => {
            let package = api.find_utility(&package)?;
            let shortcut = api
                .create_utility_shortcut(&package, position)
                .with_context(|| format!("Failed to create shortcut for {}", package.display))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&shortcut)?);
            } else {
                print_shortcut(&shortcut);
            }
        }
        Command::Remove { name, tag } => {
            let shortcut = api.find_shortcut(&name, tag.as_deref())?;
            api.remove_shortcut(&shortcut)
                .with_context(|| format!("Failed to remove {}", shortcut.path.display()))?;
            info!("Removed {} ({})", shortcut.display, shortcut.tag);
        }
        Command::Exists { display, tag } => {
            let exists = api.shortcut_exists(&display, &tag);
            if args.json {
                println!("{}", json!({ "display": display, "tag": tag, "exists": exists }));
            } else {
                println!("{}", exists);
            }
        }
        Command::Artwork { action } => {
            let report = match action {
                ArtworkAction::Regenerate => api.regenerate_artwork()?,
                ArtworkAction::Remove => api.remove_artwork()?,
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "processed={} written={} skipped={} failed={}",
                    report.processed, report.written, report.skipped, report.failed
                );
            }
        }
        Command::Settings { action } => {
            let prefs = match action {
                SettingsAction::Show => api.preferences(),
                SettingsAction::Set { key, value } => api.set_preference(&key, &value)?,
            };
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_flag_does_not_swallow_subcommand() {
        let args = Args::try_parse_from(["shortcuts", "--log-file", "list"]).unwrap();
        assert_eq!(args.log_file, Some(None));
        assert!(matches!(args.command, Command::List));

        let args = Args::try_parse_from(["shortcuts", "--log-file=/tmp/shortcuts.log", "list"]).unwrap();
        assert_eq!(args.log_file, Some(Some(PathBuf::from("/tmp/shortcuts.log"))));
    }

    #[test]
    fn test_remove_accepts_tag() {
        let args = Args::try_parse_from(["shortcuts", "remove", "Tetris", "--tag", "GB"]).unwrap();
        match args.command {
            Command::Remove { name, tag } => {
                assert_eq!(name, "Tetris");
                assert_eq!(tag.as_deref(), Some("GB"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
