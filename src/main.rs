use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use space_shooter::compute::{init_state, SimulationLoop};
use space_shooter::config::GameConfig;
use space_shooter::display::{arena_for, SpriteSheet, TerminalCanvas};
use space_shooter::error::GameError;
use space_shooter::input::{apply, translate, Action, Flow, Overlay};
use space_shooter::sound::TerminalSound;

/// Side-scrolling laser shooter for the terminal.
///
/// Move the mouse to steer, left-click to fire, hold the right button for
/// the menu.  Arrow keys / WASD and Space work too; Q quits.
#[derive(Parser)]
#[command(name = "space_shooter", version, about)]
struct Cli {
    /// JSON config file; omitted fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log (the terminal itself is the play surface)
    #[arg(long, default_value = "space_shooter.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Silence the bell
    #[arg(long)]
    mute: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn init_logging(cli: &Cli) -> Result<(), GameError> {
    let file = File::create(&cli.log_file)?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::Logging(e.to_string()))
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Puts the terminal into game mode and restores it when dropped, including
/// when setup itself fails halfway.
struct TerminalGuard;

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self, GameError> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;
        out.execute(EnableFocusChange)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut stdout());
    }
}

fn restore_terminal<W: Write>(out: &mut W) {
    let _ = out.execute(DisableFocusChange);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame drains pending input, ticks the
/// simulation and presents the canvas; while paused only overlay changes
/// are drawn, over a blurred copy of the last frame.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    mute: bool,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let frame = Duration::from_millis(config.frame_ms.max(1));

    let (cols, rows) = terminal::size()?;
    let arena = arena_for(cols, rows);
    let mut canvas = TerminalCanvas::new(cols, rows, Some(SpriteSheet::builtin()));
    let mut sim = SimulationLoop::new(init_state(config, arena, &mut rng));
    let mut overlay = Overlay::default();
    let volume = if mute { 0.0 } else { config.volume };
    let mut sound = TerminalSound::with_stock_clips(stdout(), volume);

    info!(cols, rows, width = arena.width, height = arena.height, "game started");
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Some(action) = translate(&ev) else { continue };
            if let Action::Resize { cols, rows } = action {
                canvas = TerminalCanvas::new(cols, rows, Some(SpriteSheet::builtin()));
                sim.state.resize(arena_for(cols, rows));
                overlay.dirty = true;
                info!(cols, rows, "resized");
            }
            if apply(action, &mut sim, &mut overlay, &mut sound, config.cheats) == Flow::Quit {
                info!(score = sim.state.score.count(), "quit");
                return Ok(());
            }
        }

        // ── Simulate and draw ─────────────────────────────────────────────────
        if !sim.is_paused() {
            canvas.begin_frame();
            canvas.set_blurred(false);
        }
        let now = started.elapsed().as_millis() as u64;
        if sim.tick(now, &mut rng, &mut canvas, &mut sound) {
            overlay.render(&mut canvas, &sim.state.arena);
            canvas.present(out)?;
        } else if overlay.dirty {
            canvas.set_blurred(true);
            canvas.clear_text();
            overlay.render(&mut canvas, &sim.state.arena);
            canvas.present(out)?;
        }
        overlay.dirty = false;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    let config = GameConfig::load_or_default(cli.config.as_deref())?;

    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    init_logging(&cli)?;
    info!(?config, "config loaded");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);
    let _terminal = TerminalGuard::enter(&mut out)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    game_loop(&mut out, &config, &rx, cli.mute)
}
