use std::io::{self, BufRead, IsTerminal, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use indicatif::{ProgressBar, ProgressStyle};

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Ask whether to move on to the next target. Only `y` continues.
pub fn confirm_continue<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "Do you want to continue with the next URL? (y/n): ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Elapsed,
    KeyPressed,
}

/// Poll `key_available` every `interval` until `total` has passed.
/// `key_available` is handed the longest it may block for.
pub fn wait_for_key<F, T>(total: Duration, interval: Duration, mut key_available: F, mut on_tick: T) -> io::Result<Countdown>
where
    F: FnMut(Duration) -> io::Result<bool>,
    T: FnMut(Duration),
{
    let start = Instant::now();
    loop {
        let elapsed = start.elapsed();
        if elapsed >= total {
            return Ok(Countdown::Elapsed);
        }
        let remaining = total - elapsed;
        on_tick(remaining);
        if key_available(interval.min(remaining))? {
            return Ok(Countdown::KeyPressed);
        }
    }
}

/// Raw terminal mode for as long as the guard lives.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn key_pressed(wait: Duration) -> io::Result<bool> {
    if !event::poll(wait)? {
        return Ok(false);
    }
    match event::read()? {
        Event::Key(key) => Ok(key.kind == KeyEventKind::Press),
        _ => Ok(false),
    }
}

/// Terminal countdown before escalating to the larger scan. Any key cancels.
/// Without a terminal there is nobody to press a key, so it elapses immediately.
pub fn countdown(secs: u64, message: &str) -> io::Result<Countdown> {
    if !io::stdin().is_terminal() {
        tracing::warn!("stdin is not a terminal; skipping countdown");
        return Ok(Countdown::Elapsed);
    }

    let bar = ProgressBar::new(secs);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:20}] {pos}/{len}s")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message.to_string());

    let outcome = {
        let _raw = RawModeGuard::acquire()?;
        let total = Duration::from_secs(secs);
        wait_for_key(total, POLL_INTERVAL, key_pressed, |remaining| {
            bar.set_position(secs.saturating_sub(remaining.as_secs()));
        })
    };
    bar.finish_and_clear();
    outcome
}
