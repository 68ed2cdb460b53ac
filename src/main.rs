mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use neon_invaders::config::Cli;
use neon_invaders::entities::{Difficulty, FrameEvent, InputState};
use neon_invaders::leaderboard::{Leaderboard, LeaderboardError};
use neon_invaders::session::{Screen, Session};

use display::Viewport;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key-repeat runs at ≥ 15 Hz, so 8 frames (≈133 ms) is always
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

/// Snapshot the live key map into the copy handed to the simulation.
fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, quit: bool) -> InputState {
    InputState {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame),
        fast_fall: any_held(
            key_frame,
            &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            frame,
        ),
        quit,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Whether the program keeps running after a screen hands back control.
enum Flow {
    Continue,
    Exit,
}

/// Block until the next key press.  `None` once the input thread is gone.
fn next_key(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Some(key),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

// ── Menu screens ──────────────────────────────────────────────────────────────

fn menu_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    leaderboard: &Leaderboard,
) -> anyhow::Result<Flow> {
    display::render_menu(out, Viewport::current()?, session, leaderboard)?;

    let Some(key) = next_key(rx) else {
        return Ok(Flow::Exit);
    };
    match key.code {
        _ if is_ctrl_c(&key) => return Ok(Flow::Exit),
        KeyCode::Enter | KeyCode::Char(' ') => session.start_game(),
        KeyCode::Char('v') | KeyCode::Char('V') => session.toggle_show_all_scores(leaderboard),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(Flow::Exit),
        _ => {}
    }
    Ok(Flow::Continue)
}

fn difficulty_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    display::render_difficulty(out, Viewport::current()?, session)?;

    let Some(key) = next_key(rx) else {
        return Ok(Flow::Exit);
    };
    match key.code {
        _ if is_ctrl_c(&key) => return Ok(Flow::Exit),
        KeyCode::Char(c @ '1'..='5') => {
            // Digit range is already checked by the pattern.
            if let Ok(difficulty) = Difficulty::new(c as u8 - b'0') {
                session.choose_difficulty(difficulty);
            }
        }
        KeyCode::Esc | KeyCode::Backspace => session.back_to_menu(),
        _ => {}
    }
    Ok(Flow::Continue)
}

fn game_over_screen<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    leaderboard: &mut Leaderboard,
    save_path: Option<&Path>,
) -> anyhow::Result<Flow> {
    let mut message: Option<String> = None;

    // Drop keys still queued from play (a held Space would become a name).
    while rx.try_recv().is_ok() {}

    while session.screen() == Screen::GameOver {
        display::render_game_over(out, Viewport::current()?, session, message.as_deref())?;

        let Some(key) = next_key(rx) else {
            return Ok(Flow::Exit);
        };
        if is_ctrl_c(&key) {
            return Ok(Flow::Exit);
        }
        match key.code {
            KeyCode::Enter => match session.submit_score(leaderboard) {
                Ok(()) => {
                    if let Some(path) = save_path {
                        if let Err(err) = leaderboard.save(path) {
                            warn!("could not persist leaderboard: {err}");
                        }
                    }
                }
                Err(LeaderboardError::EmptyName) => {
                    message = Some("Enter a name to submit your score".to_string());
                }
                Err(err) => return Err(err.into()),
            },
            KeyCode::Esc => session.back_to_menu(),
            KeyCode::Backspace => session.pop_name_char(),
            KeyCode::Char(c) => session.push_name_char(c),
            _ => {}
        }
    }
    Ok(Flow::Continue)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the session leaves the playing screen.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame the keys still "fresh" (within
/// `HOLD_WINDOW` frames) are copied into one `InputState`, so Space and a
/// direction can be held together.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
) -> anyhow::Result<Flow> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    while session.screen() == Screen::Playing {
        let frame_start = Instant::now();
        frame += 1;
        let mut quit = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            let event = match rx.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(Flow::Exit),
            };
            let Event::Key(key) = event else { continue };
            match key.kind {
                KeyEventKind::Press => {
                    if is_ctrl_c(&key) {
                        return Ok(Flow::Exit);
                    }
                    if key.code == KeyCode::Esc {
                        quit = true;
                    }
                    key_frame.insert(key.code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(key.code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&key.code);
                }
            }
        }

        let input = held_input(&key_frame, frame, quit);
        for event in session.step(&input) {
            if let FrameEvent::GameOver { final_score } = event {
                info!(final_score, "run finished");
            }
        }

        if let Some(simulation) = session.simulation() {
            display::render_game(out, Viewport::current()?, simulation.snapshot())?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(Flow::Continue)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    // Logging to the terminal would scribble over the alternate screen.
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &cli);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, cli: &Cli) -> anyhow::Result<()> {
    let leaderboard_path = cli.leaderboard_path();
    // Scores are only written back to a file that was read successfully.
    let (mut leaderboard, save_path) = match Leaderboard::open(&leaderboard_path) {
        Ok(board) => (board, Some(leaderboard_path.as_path())),
        Err(err) => {
            warn!("leaderboard unavailable, scores will not be saved: {err}");
            (Leaderboard::new(), None)
        }
    };

    let mut session = Session::new(cli.seed);
    if let Some(difficulty) = cli.difficulty {
        session.start_game();
        session.choose_difficulty(difficulty);
    }

    loop {
        let flow = match session.screen() {
            Screen::Menu => menu_screen(out, rx, &mut session, &leaderboard)?,
            Screen::Difficulty => difficulty_screen(out, rx, &mut session)?,
            Screen::Playing => game_loop(out, rx, &mut session)?,
            Screen::GameOver => game_over_screen(
                out,
                rx,
                &mut session,
                &mut leaderboard,
                save_path,
            )?,
        };
        if let Flow::Exit = flow {
            return Ok(());
        }
    }
}
