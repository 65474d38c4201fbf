mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroid_blaster::events::dispatch_audio;
use asteroid_blaster::{Audio, Game, GameConfig, InputState, Sound, UiTrigger};

use display::Screen;

/// Fixed simulation step, also used as the render interval (≈60 FPS).
const FRAME: Duration = Duration::from_millis(16);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const CONFIG_ENV: &str = "ASTEROID_BLASTER_CONFIG";
const SEED_ENV: &str = "ASTEROID_BLASTER_SEED";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal has no mixer: sound cues are logged, and collisions ring the
/// bell on the next flush.
#[derive(Default)]
struct TerminalAudio {
    bell: bool,
}

impl Audio for TerminalAudio {
    fn play(&mut self, sound: Sound) {
        log::debug!("play {sound:?}");
        if sound == Sound::Collision {
            self.bell = true;
        }
    }

    fn stop(&mut self, sound: Sound) {
        log::debug!("stop {sound:?}");
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> std::io::Result<GameConfig> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let config = match path {
        Some(path) => GameConfig::load(&path),
        None => Ok(GameConfig::default()),
    };
    config.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}

fn make_rng() -> StdRng {
    match std::env::var(SEED_ENV).ok().and_then(|s| s.trim().parse().ok()) {
        Some(seed) => {
            log::info!("using fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and build one `InputState` from them, so
/// Space + A/D can be held at the same time.  One-shot keys (menu actions,
/// quit) are handled as they arrive.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = make_rng();
    let mut audio = TerminalAudio::default();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    let trigger = match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => Some(UiTrigger::Start),
                        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiTrigger::Retry),
                        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiTrigger::PlayAgain),
                        KeyCode::Char('m') | KeyCode::Char('M') => Some(UiTrigger::Menu),
                        _ => None,
                    };
                    if let Some(trigger) = trigger {
                        events.extend(game.trigger(trigger));
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys → this tick's input ─────────────────────────────────────
        let input = InputState {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        events.extend(game.tick(&input, FRAME, &mut rng));
        dispatch_audio(&events, &mut audio);

        let (width, height) = terminal::size()?;
        display::render(out, game, Screen { width, height })?;
        if std::mem::take(&mut audio.bell) {
            out.queue(Print("\x07"))?;
            out.flush()?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Bad config is reported before the terminal switches to raw mode
    let config = load_config()?;
    let mut game = Game::new(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

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

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
