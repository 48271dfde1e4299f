use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use rand::Rng;
use std::io::{self, Stdout, stdout};
use std::time::{Duration, Instant};
use tracing::info;

use crate::audio::AudioSink;
use crate::geometry::Viewport;
use crate::input::InputLatch;
use crate::render::{self, PixelBuf};
use crate::run::RunController;
use crate::storage::HighScoreStore;

/// Restores the terminal however the loop exits.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(Screen { out })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

enum Action {
    Quit,
    Jump,
    Start,
    ResetHighScore,
}

fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(Action::Jump),
        KeyCode::Enter | KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('r') => Some(Action::ResetHighScore),
        _ => None,
    }
}

/// Pixel buffer size for a terminal of `cols`×`rows`.
fn pixels(cols: u16, rows: u16) -> (usize, usize) {
    (cols.max(1) as usize, rows.max(1) as usize * 2)
}

/// Runs the game until the player quits.
pub fn run<S, A, R>(
    world_height: f64,
    make: impl FnOnce(Viewport) -> RunController<S, A, R>,
) -> io::Result<()>
where
    S: HighScoreStore,
    A: AudioSink,
    R: Rng,
{
    let mut screen = Screen::enter()?;

    let (cols, rows) = terminal::size()?;
    let (pw, ph) = pixels(cols, rows);
    let mut buf = PixelBuf::new(pw, ph);
    let mut game = make(Viewport::from_pixels(pw, ph, world_height));
    let latch = InputLatch::new();
    info!(cols, rows, "terminal ready");

    loop {
        let now = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match action_for(key.code, key.modifiers) {
                        Some(Action::Quit) => {
                            info!("quit");
                            return Ok(());
                        }
                        Some(Action::Jump) if game.is_running() => latch.press_jump(),
                        Some(Action::Jump) | Some(Action::Start) => {
                            latch.clear();
                            game.start(now);
                        }
                        Some(Action::ResetHighScore) => game.reset_high_score(now),
                        None => {}
                    }
                }
                Event::Resize(c, r) => {
                    let (npw, nph) = pixels(c, r);
                    buf.resize(npw, nph);
                    game.resize(Viewport::from_pixels(npw, nph, world_height));
                }
                _ => {}
            }
        }

        // Update
        game.pump(now);
        game.frame(now, &latch);

        // Render
        render::draw(&mut buf, &game.snapshot(now));
        buf.render(&mut screen.out)?;

        // Frame pacing
        let due = if game.is_running() {
            game.next_frame_due(Instant::now())
        } else {
            now + game.frame_interval()
        };
        let wait = due.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_actions() {
        let none = KeyModifiers::NONE;
        assert!(matches!(action_for(KeyCode::Char(' '), none), Some(Action::Jump)));
        assert!(matches!(action_for(KeyCode::Up, none), Some(Action::Jump)));
        assert!(matches!(action_for(KeyCode::Enter, none), Some(Action::Start)));
        assert!(matches!(action_for(KeyCode::Char('r'), none), Some(Action::ResetHighScore)));
        assert!(matches!(
            action_for(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        ));
        assert!(action_for(KeyCode::Char('c'), none).is_none());
    }

    #[test]
    fn rows_count_twice() {
        assert_eq!(pixels(80, 24), (80, 48));
        assert_eq!(pixels(0, 0), (1, 2));
    }
}
