mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::info;
use rand::thread_rng;

use mouse_knight::config::Tuning;
use mouse_knight::scheduler::{Scheduler, Step};
use mouse_knight::world::World;

const LOG_FILE: &str = "mouse_knight.log";
const RESUME_COUNTDOWN: u32 = 3;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: anything written to stderr would tear the raw-mode screen.
/// `RUST_LOG` picks the filter, `info` by default.
fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already installed")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one game to completion.  Returns the player-dead flag.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<bool> {
    let mut rng = thread_rng();
    let tuning = Tuning::default();
    let idle_sleep = tuning.idle_sleep;
    let frame_interval = tuning.frame_interval;
    let mut world = World::new(tuning, &mut rng).context("invalid built-in tuning")?;
    let mut scheduler = Scheduler::new(Instant::now(), frame_interval);
    info!("game started");

    let dead = loop {
        let command = input::poll(rx);
        let now = Instant::now();
        match scheduler.step(&mut world, command, now, &mut rng) {
            Step::Ticked => {
                display::render(out, &world.snapshot(scheduler.elapsed(now)))?;
            }
            Step::Idle => thread::sleep(idle_sleep),
            Step::Paused => {
                display::pause_screen(out)?;
                if !input::wait_any_key(rx) {
                    break false;
                }
                for secs in (1..=RESUME_COUNTDOWN).rev() {
                    display::countdown_screen(out, secs)?;
                    thread::sleep(Duration::from_secs(1));
                }
                input::flush(rx);
                out.execute(terminal::Clear(terminal::ClearType::All))?;
                scheduler.resume(Instant::now());
            }
            Step::Over { dead } => break dead,
        }
    };

    let snap = world.snapshot(scheduler.elapsed(Instant::now()));
    info!(
        "survived {} s, {} kills, score {}",
        snap.elapsed.as_secs(),
        snap.kills,
        snap.score
    );
    thread::sleep(Duration::from_millis(1500));
    input::flush(rx);
    display::game_over_screen(out, &snap)?;
    input::wait_any_key(rx);
    Ok(dead)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enter raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release and repeat events where the terminal supports them; pause
    // relies on telling a fresh press from auto-repeat.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // A dedicated thread does the blocking reads so the game loop only ever
    // polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    display::start_screen(out)?;
    if !input::wait_any_key(rx) {
        return Ok(());
    }
    input::flush(rx);
    out.execute(terminal::Clear(terminal::ClearType::All))?;
    let dead = game_loop(out, rx)?;
    info!("exiting (player dead: {})", dead);
    Ok(())
}
