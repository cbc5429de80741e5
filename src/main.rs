// SPDX-License-Identifier: MIT
//
// seedtone — reproducible palettes and font pairings from a seed.
//
// This is the command-line front end. Each invocation boots a Studio over
// the on-disk store, applies one command, prints the result and exits:
//
//   args → Config + FileStore → Studio::boot → command → stdout
//                                                  │
//                                                  └→ notices → stderr
//
// Logs go to stderr through tracing-subscriber, filtered by SEEDTONE_LOG
// (default `warn`, `-v` for `debug`).

use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use seedtone_studio::{
    Config, Entry, FileStore, MemoryQuery, QueryState, SHARE_PARAM, Snapshot, Studio, share,
};
use seedtone_theme::{Mode, Mood, Token, font_stack};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SEEDTONE_LOG";

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "seedtone",
    about = "Reproducible color palettes and font pairings from a seed",
    version
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/seedtone/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where favorites, history and the last session are kept.
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Open a shared aesthetic before running the command.
    #[arg(long, global = true, value_name = "TOKEN")]
    share: Option<String>,

    /// Debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Print the current aesthetic (the default).
    Show,

    /// New aesthetic from a fresh random seed, or from `--seed`.
    Generate {
        #[arg(long)]
        seed: Option<String>,
    },

    /// Re-run generation with the current seed.
    Regenerate,

    /// Switch light/dark.
    Mode { mode: ModeArg },

    /// Switch mood: Minimal, Bold, Pastel, Neon or Earthy.
    Mood { mood: Mood },

    /// Toggle a lock: `palette`, `fonts`, or a token name.
    Lock { target: String },

    /// Set one token to a `#rrggbb` color.
    Set { token: Token, hex: String },

    /// Pick a font from the catalog.
    Font { role: FontRole, name: String },

    /// Swap display and body fonts.
    Swap,

    /// Repair text and muted contrast.
    Fix,

    /// Star or unstar the current aesthetic, or a stored entry by id.
    Favorite { id: Option<String> },

    /// Bring back a history or favorites entry.
    Restore { id: String },

    /// List history, optionally filtered.
    History { query: Option<String> },

    /// List favorites, optionally filtered.
    Favorites { query: Option<String> },

    /// Empty history or favorites.
    Clear { target: ClearTarget },

    /// Print the aesthetic in another format.
    Export { format: ExportFormat },

    /// Print the aesthetic inside a share token without loading it.
    Decode { token: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FontRole {
    Display,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClearTarget {
    History,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Css,
    Fonts,
    Link,
    Token,
}

// ─── Logging ────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Show);

    if let Command::Decode { token } = &command {
        let snapshot = share::decode(token).context("decoding share token")?;
        print!("{}", render_snapshot(&snapshot));
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).context("loading config")?;
    let state_dir = cli.state_dir.unwrap_or_else(|| config.state_dir());
    tracing::debug!(state_dir = %state_dir.display(), "opening store");

    let query = MemoryQuery::new();
    if let Some(token) = &cli.share {
        query.replace(SHARE_PARAM, token);
    }

    let mut studio = Studio::builder()
        .store(FileStore::new(&state_dir))
        .query(query)
        .config(&config)
        .boot();

    let output = execute(&mut studio, &config, command)?;
    for notice in studio.drain_notices() {
        eprintln!("{notice}");
    }
    studio.flush();
    print!("{output}");
    Ok(())
}

/// Apply one command and return what it prints.
fn execute(studio: &mut Studio, config: &Config, command: Command) -> Result<String> {
    match command {
        Command::Show | Command::Decode { .. } => {}
        Command::Generate { seed: Some(seed) } => studio.generate_from(&seed),
        Command::Generate { seed: None } => studio.generate(),
        Command::Regenerate => studio.regenerate(),
        Command::Mode { mode } => match mode {
            ModeArg::Light => studio.set_mode(Mode::Light),
            ModeArg::Dark => studio.set_mode(Mode::Dark),
            ModeArg::Toggle => studio.toggle_mode(),
        },
        Command::Mood { mood } => studio.set_mood(mood),
        Command::Lock { target } => match target.trim().to_ascii_lowercase().as_str() {
            "palette" => {
                studio.toggle_palette_lock();
            }
            "fonts" => {
                studio.toggle_fonts_lock();
            }
            _ => {
                let token = target.parse::<Token>()?;
                studio.toggle_token_lock(token);
            }
        },
        Command::Set { token, hex } => studio.set_token(token, &hex)?,
        Command::Font { role, name } => match role {
            FontRole::Display => studio.set_display_font(&name)?,
            FontRole::Body => studio.set_body_font(&name)?,
        },
        Command::Swap => studio.swap_fonts(),
        Command::Fix => studio.auto_fix(),
        Command::Favorite { id: Some(id) } => {
            studio.toggle_favorite(&id)?;
        }
        Command::Favorite { id: None } => {
            studio.toggle_current_favorite();
        }
        Command::Restore { id } => studio.restore(&id)?,
        Command::History { query } => {
            let found = studio.search(query.as_deref().unwrap_or_default());
            return Ok(render_entries(&found.history));
        }
        Command::Favorites { query } => {
            let found = studio.search(query.as_deref().unwrap_or_default());
            return Ok(render_entries(&found.favorites));
        }
        Command::Clear { target } => match target {
            ClearTarget::History => studio.clear_history(),
            ClearTarget::Favorites => studio.clear_favorites(),
        },
        Command::Export { format } => {
            return Ok(match format {
                ExportFormat::Css => format!("{}\n", studio.css_variables()),
                ExportFormat::Fonts => format!("{}\n", studio.font_snippet()),
                ExportFormat::Link => format!("{}\n", config.share_link(studio.share_token())),
                ExportFormat::Token => format!("{}\n", studio.share_token()),
            });
        }
    }
    Ok(render_studio(studio))
}

// ─── Rendering ──────────────────────────────────────────────────────────────

const fn lock_mark(locked: bool) -> &'static str {
    if locked { "  [locked]" } else { "" }
}

fn render_snapshot(s: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "seed     {}", s.seed);
    let _ = writeln!(out, "mode     {}", s.mode);
    let _ = writeln!(out, "mood     {}", s.mood);
    let _ = writeln!(out, "display  {}", font_stack(&s.fonts.display));
    let _ = writeln!(out, "body     {}", font_stack(&s.fonts.body));
    for (token, color) in s.palette.iter() {
        let _ = writeln!(out, "  {:<8} {color}", token.as_str());
    }
    out
}

/// Everything `show` prints: the snapshot plus locks, contrast and the
/// share token.
fn render_studio(studio: &Studio) -> String {
    let s = studio.snapshot();
    let locks = studio.locks();
    let report = studio.report();

    let mut out = String::new();
    let _ = writeln!(out, "seed     {}", s.seed);
    let _ = writeln!(out, "mode     {}", s.mode);
    let _ = writeln!(out, "mood     {}", s.mood);
    let _ = writeln!(out, "fonts    {}{}", s.fonts, lock_mark(locks.fonts));
    let _ = writeln!(out, "palette{}", lock_mark(locks.palette));
    for (token, color) in s.palette.iter() {
        let mark = lock_mark(locks.tokens.get(token));
        let _ = writeln!(out, "  {:<8} {color}{mark}", token.as_str());
    }
    let _ = writeln!(out, "contrast");
    for pair in &report.pairs {
        let _ = writeln!(out, "  {pair}");
    }
    let _ = writeln!(out, "  on primary use {}", report.on_primary);
    if studio.is_current_favorite() {
        let _ = writeln!(out, "favorite yes");
    }
    let _ = writeln!(out, "token    {}", studio.share_token());
    out
}

fn render_entries(entries: &[&Entry]) -> String {
    let mut out = String::new();
    for e in entries {
        let s = &e.snapshot;
        let _ = writeln!(
            out,
            "{:<28} {:<10} {:<5} {:<7} {}",
            e.id, s.seed, s.mode, s.mood, s.fonts
        );
    }
    out
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("seedtone: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
