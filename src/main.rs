//! Terminal host and entry point.
//!
//! A thin line-oriented shell around [`Session`]: each input line is parsed
//! into a [`Command`], applied to the session, and the list is redrawn when the
//! session asks for it. Input comes from `--script <file>` or stdin; a prompt
//! is shown only when stdin is a terminal.
//!
//! # Startup
//!
//! 1. **Config**: `--config` or the default config file, then CLI overrides
//! 2. **Tracing**: Rotating log file in the data directory
//! 3. **Storage**: `store.json` in the data directory (`--ephemeral` keeps it in memory)
//! 4. **Session**: Load the stored list and draw it
//!
//! # Example
//!
//! ```text
//! $ shoplist --ephemeral
//! 🔒 Shopping list (locked)
//! > add dairy Milk
//! > lock
//! > drag-start dairy Milk
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use shoplist::app::command::{parse_command, Command, HELP};
use shoplist::share::ClipboardChain;
use shoplist::storage::{JsonStorage, MemoryStorage, Storage, STORE_FILE_NAME};
use shoplist::{Config, Session, Theme};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "shoplist", version, about = "Categorized shopping list with drag reordering")]
struct Args {
    /// Config file (default: <config dir>/shoplist/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the list store and log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    trace_level: Option<String>,

    /// Keep the list in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

impl Args {
    fn apply_to(&self, config: &mut Config) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = Some(dir.clone());
        }
        if let Some(level) = &self.trace_level {
            config.trace_level = Some(level.clone());
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("shoplist: {e}");
            return ExitCode::from(2);
        }
    };
    args.apply_to(&mut config);

    let data_dir = config.data_dir();
    shoplist::observability::init_tracing(&config, &data_dir);

    let span = tracing::debug_span!("host_start");
    let guard = span.entered();
    tracing::debug!(data_dir = %data_dir.display(), ephemeral = args.ephemeral, "starting");

    let storage: Box<dyn Storage> = if args.ephemeral {
        Box::new(MemoryStorage::default())
    } else {
        match JsonStorage::new(data_dir.join(STORE_FILE_NAME)) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                eprintln!("shoplist: cannot open the list store: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    let clipboard = ClipboardChain::from_names(config.clipboard.as_slice());
    tracing::debug!(strategies = ?clipboard.names(), "clipboard chain");

    let session = Session::start(&config, storage, clipboard);
    drop(guard);

    let theme = (!args.no_color && io::stdout().is_terminal()).then(|| session.state().theme.clone());

    let result = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => run(session, BufReader::new(file), false, theme.as_ref()),
            Err(e) => {
                eprintln!("shoplist: cannot read {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => {
            let interactive = io::stdin().is_terminal();
            run(session, io::stdin().lock(), interactive, theme.as_ref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "terminal io failed");
            eprintln!("shoplist: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads commands until end of input or `quit`.
fn run<R: BufRead>(
    mut session: Session,
    input: R,
    interactive: bool,
    theme: Option<&Theme>,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    shoplist::ui::render(session.state(), &mut out, theme)?;
    prompt(&mut out, interactive)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                prompt(&mut out, interactive)?;
                continue;
            }
            Err(e) => {
                writeln!(out, "error: {e} (type `help` for usage)")?;
                prompt(&mut out, interactive)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            command => {
                tracing::debug!(?command, "command");
                let redraw = session.apply(command);
                for notice in session.take_notices() {
                    let color = theme.map(|t| Theme::fg(&t.colors.notice_fg)).unwrap_or_default();
                    let reset = if theme.is_some() { Theme::reset() } else { "" };
                    writeln!(out, "{color}{notice}{reset}")?;
                }
                if redraw {
                    shoplist::ui::render(session.state(), &mut out, theme)?;
                }
            }
        }
        prompt(&mut out, interactive)?;
    }

    out.flush()
}

fn prompt<W: Write>(out: &mut W, interactive: bool) -> io::Result<()> {
    if interactive {
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
