//! `billboard`: terminal dashboard for marketing campaigns.
//!
//! # Usage
//!
//! ```text
//! billboard
//! billboard --dataset campaigns.json --stats zero
//! billboard --config ~/.config/billboard/config.toml --log-file billboard.log
//! ```

mod app;
mod config;
mod form;
mod ui;

use std::{fs::File, io, path::Path, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use billboard_core::dataset::{load_campaigns, sample_campaigns};
use clap::Parser;
use config::{Args, ConfigFile, Settings};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let mut args = Args::parse();

  // Load config file if provided.
  let file_cfg = match args.config.take() {
    Some(path) => ConfigFile::load(&path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(args, file_cfg);

  if let Some(path) = &settings.log_file {
    init_tracing(path)?;
  }

  let campaigns = match &settings.dataset {
    Some(path) => load_campaigns(path)
      .with_context(|| format!("loading dataset {}", path.display()))?,
    None => sample_campaigns().context("parsing bundled sample dataset")?,
  };
  tracing::info!(count = campaigns.len(), stats = ?settings.stats, "starting");

  let mut app = App::new(campaigns, settings.stats_source(), settings.created_by.clone());

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Send logs to `path`; stdout belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
  let file = File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal events")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      // Windows reports releases too.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
