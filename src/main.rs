//! Grid arcade runner (default binary).
//!
//! Picks a game (from the command line or the numbered panel), builds one
//! round from the layered configuration and drives it with crossterm input
//! and the canvas renderer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use grid_arcade::core::{ArcadeConfig, BattleshipMode, Game, GameRng, GameRules};
use grid_arcade::engine::{Engine, QuitSignal};
use grid_arcade::input::KeyMap;
use grid_arcade::term::{ArcadeView, Canvas, Frame, TerminalRenderer, Viewport};
use grid_arcade::types::GameKind;

#[derive(Parser, Debug)]
#[command(name = "grid-arcade", about = "Six small grid games in the terminal")]
struct Args {
    /// Game to play (snake, tetris, 2048, minesweeper, hangman, battleship)
    /// or its panel number. Omit to pick from the panel.
    game: Option<String>,

    /// Fixed RNG seed (overrides ARCADE_SEED and the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file (overrides ARCADE_CONFIG).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Battleship mode: vs-ai or hotseat. Asked for when battleship is
    /// picked from the panel without it.
    #[arg(long)]
    mode: Option<BattleshipMode>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut config = match &args.config {
        Some(path) => {
            let mut config = ArcadeConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            config.apply_env(|key| std::env::var(key).ok());
            config
        }
        None => ArcadeConfig::from_env().context("loading config")?,
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let kind = match &args.game {
        Some(name) => name
            .parse::<GameKind>()
            .ok()
            .or_else(|| GameKind::from_panel_choice(name)),
        None => choose_from_panel()?,
    };
    let Some(kind) = kind else {
        println!("Unknown choice");
        return Ok(());
    };

    if kind == GameKind::Battleship {
        let mode = match (args.mode, &args.game) {
            (Some(mode), _) => Some(mode),
            (None, None) => choose_battleship_mode()?,
            (None, Some(_)) => Some(config.battleship.mode),
        };
        let Some(mode) = mode else {
            println!("Invalid choice");
            return Ok(());
        };
        config.battleship.mode = mode;
    }

    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    tracing::info!(game = kind.as_str(), seed = rng.seed(), "starting round");
    let game = Game::new(kind, &config, rng)
        .with_context(|| format!("creating {} round", kind.as_str()))?;
    let engine = Engine::for_game(game, &config, QuitSignal::new());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "round aborted");
    }
    result
}

/// Print the game panel and read one choice from stdin.
fn choose_from_panel() -> Result<Option<GameKind>> {
    let titles: Vec<&str> = GameKind::PANEL.iter().map(|k| k.title()).collect();
    let line = prompt(None, &titles, "> ")?;
    Ok(GameKind::from_panel_choice(&line))
}

fn choose_battleship_mode() -> Result<Option<BattleshipMode>> {
    let labels: Vec<&str> = BattleshipMode::PANEL.iter().map(|m| m.label()).collect();
    let line = prompt(Some("Battleship Mode:"), &labels, "Choose mode: ")?;
    Ok(BattleshipMode::from_panel_choice(&line))
}

/// Print a numbered menu and read one line from stdin.
fn prompt(heading: Option<&str>, entries: &[&str], ask: &str) -> Result<String> {
    let mut out = io::stdout().lock();
    if let Some(heading) = heading {
        writeln!(out, "{}", heading)?;
    }
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, entry)?;
    }
    write!(out, "{}", ask)?;
    out.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading menu choice")?;
    Ok(line.trim().to_string())
}

/// Log to `ARCADE_LOG_PATH` when set; otherwise stay silent so the
/// alternate screen is not disturbed.
fn init_logging() -> Result<()> {
    let path = match std::env::var("ARCADE_LOG_PATH") {
        Ok(p) if !p.trim().is_empty() => p,
        _ => return Ok(()),
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.trim())
        .with_context(|| format!("opening log file {}", path.trim()))?;
    let filter = EnvFilter::try_from_env("ARCADE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Board size the cursor moves over. Battleship aims at the enemy sea only.
fn cursor_board(kind: GameKind, config: &ArcadeConfig, game: &Game) -> (i32, i32) {
    match kind {
        GameKind::Battleship => (config.battleship.size, config.battleship.size),
        _ => {
            let view = game.view();
            (view.width(), view.height())
        }
    }
}

fn run(term: &mut TerminalRenderer, mut engine: Engine<GameRng>, config: &ArcadeConfig) -> Result<()> {
    let kind = engine.game().kind();
    let view = ArcadeView::for_kind(kind);
    let mut keys = KeyMap::new(kind, cursor_board(kind, config, engine.game()));
    let mut canvas = Canvas::new(0, 0);
    let mut last = Instant::now();

    loop {
        if engine.quit_signal().is_raised() {
            return Ok(());
        }

        draw(term, &view, &engine, &keys, &mut canvas)?;

        if engine.game().status().is_terminal() {
            tracing::info!(
                game = kind.as_str(),
                status = engine.game().status().as_str(),
                score = engine.game().score(),
                "round over"
            );
            wait_for_key(term, &view, &engine, &keys, &mut canvas)?;
            return Ok(());
        }

        // Tick games wait at most until the next quantum; turn games block.
        let ready = match engine.poll_timeout() {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };
        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = keys.handle_key(key) {
                        engine.step(action).context("applying action")?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis() as u64;
        last = now;
        engine.advance(elapsed).context("advancing round")?;
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &ArcadeView,
    engine: &Engine<GameRng>,
    keys: &KeyMap,
    canvas: &mut Canvas,
) -> Result<()> {
    let game = engine.game();
    let board = game.view();
    let summary = game.summary();
    let frame = Frame {
        kind: game.kind(),
        board: &board,
        score: game.score(),
        status: game.status(),
        summary: &summary,
        cursor: keys.cursor().map(|c| c.at()),
    };
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_into(&frame, Viewport::new(w, h), canvas);
    term.draw(canvas)
}

/// Keep the WON/LOST overlay up until a key is pressed.
fn wait_for_key(
    term: &mut TerminalRenderer,
    view: &ArcadeView,
    engine: &Engine<GameRng>,
    keys: &KeyMap,
    canvas: &mut Canvas,
) -> Result<()> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            Event::Resize(_, _) => {
                term.invalidate();
                draw(term, view, engine, keys, canvas)?;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag_parses() {
        let args =
            Args::try_parse_from(["grid-arcade", "battleship", "--mode", "hotseat"]).unwrap();
        assert_eq!(args.game.as_deref(), Some("battleship"));
        assert_eq!(args.mode, Some(BattleshipMode::Hotseat));

        let args = Args::try_parse_from(["grid-arcade", "--mode", "vs-ai"]).unwrap();
        assert_eq!(args.game, None);
        assert_eq!(args.mode, Some(BattleshipMode::VsAi));
    }

    #[test]
    fn test_unknown_mode_is_a_usage_error() {
        assert!(Args::try_parse_from(["grid-arcade", "battleship", "--mode", "solo"]).is_err());
    }

    #[test]
    fn test_no_flags() {
        let args = Args::try_parse_from(["grid-arcade"]).unwrap();
        assert!(args.game.is_none() && args.mode.is_none() && args.seed.is_none());
    }
}
