//! bracepad - a minimal terminal code pad
//!
//! Highlights as you type, auto-indents on Enter and completes braces.

mod caret;
mod config;
mod display;
mod editor;
mod error;
mod highlight;
mod input;
mod logging;
mod surface;
mod syntax;
mod terminal;
mod view;
mod viewport;

use std::env;
use std::path::PathBuf;
use std::process;

use config::Config;
use editor::EditorState;
use error::{EditorError, Result};
use terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let mut args = env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => return Err(EditorError::Message("--config needs a path".to_string())),
            },
            other => {
                return Err(EditorError::Message(format!("Unknown argument: {}", other)));
            }
        }
    }

    // Config problems are reported before the terminal is touched
    let config = Config::load(config_path.as_deref())?;
    logging::init(&config)?;
    tracing::info!(?config, "configuration loaded");

    let mut editor = EditorState::new(&config)?;
    let mut terminal = Terminal::new()?;
    editor.run(&mut terminal)?;

    Ok(())
}

fn print_usage() {
    println!("bracepad {} - a minimal terminal code pad", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: bracepad [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config PATH  Read settings from PATH instead of ~/.bracepad.toml");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Keys:");
    println!("  Enter              New line, keeping indentation and closing braces");
    println!("  Tab                Insert spaces");
    println!("  Arrows, Home, End  Move (Shift extends the selection)");
    println!("  C-Home, C-End      Start / end of document");
    println!("  F2                 Toggle line numbers");
    println!("  F3                 Toggle highlighting");
    println!("  C-n, C-s, C-w      New File, Save, Save As (not implemented)");
    println!("  C-q                Exit");
}

fn print_version() {
    println!("bracepad {}", env!("CARGO_PKG_VERSION"));
}
