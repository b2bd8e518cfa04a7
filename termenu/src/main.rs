//! Console menu toolkit demo.
//!
//! Runs a small contact book built from `termenu` menus on stdin/stdout.
//! The menu look (border, prompts) comes from an optional TOML style file.

mod demo;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use termenu::exit_codes;
use termenu::io::config::{MenuStyle, load_style, write_style};
use termenu::io::terminal::ConsoleIo;
use termenu::item::Item;
use termenu::logging;
use tracing::info;

const DEFAULT_STYLE_PATH: &str = "termenu.toml";

#[derive(Parser)]
#[command(name = "termenu", version, about = "Console menu toolkit demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the demo contact book on this terminal.
    Run {
        /// Menu style file. Defaults apply when it does not exist.
        #[arg(short, long, default_value = DEFAULT_STYLE_PATH)]
        config: PathBuf,
    },
    /// Write the default menu style file.
    InitConfig {
        /// Where to write the style file.
        #[arg(short, long, default_value = DEFAULT_STYLE_PATH)]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Run { config } => cmd_run(&config),
        Command::InitConfig { path, force } => match cmd_init_config(&path, force) {
            Ok(()) => exit_codes::OK,
            Err(err) => {
                eprintln!("{:#}", err);
                exit_codes::INVALID
            }
        },
    };
    std::process::exit(code);
}

fn cmd_run(config: &Path) -> i32 {
    let menu = match load_style(config).and_then(|style| {
        demo::build_menu(
            Rc::new(demo::ContactBook::default()),
            &style,
            chrono::Local::now().date_naive(),
        )
    }) {
        Ok(menu) => menu,
        Err(err) => {
            eprintln!("{:#}", err);
            return exit_codes::INVALID;
        }
    };

    let mut io = ConsoleIo::console();
    match menu.perform(&mut io) {
        Ok(()) => {
            info!("session finished");
            exit_codes::OK
        }
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::ABORTED
        }
    }
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_style(path, &MenuStyle::default())
        .with_context(|| format!("write style {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}
