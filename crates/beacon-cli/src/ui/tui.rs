//! Terminal event loop.
//!
//! Owns the terminal and the session. Key presses and command results are both
//! fed through [`dispatch`]; any command that comes back is handed to the
//! [`Executor`], whose results arrive on the channel.

use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{Event, Executor, Key, Session, dispatch};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct TuiRenderer {
    session: Session,
    executor: Executor,
}

impl TuiRenderer {
    pub fn new(session: Session, executor: Executor) -> Self {
        Self { session, executor }
    }

    pub fn run(mut self, rx: Receiver<Event>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, rx);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("interactive session closed");
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: Receiver<Event>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| super::render(f, &self.session))?;

            if event::poll(POLL_INTERVAL)?
                && let TermEvent::Key(key) = event::read()?
                && let Some(key) = map_key(key)
            {
                self.apply(Event::Input(key));
            }

            while let Ok(event) = rx.try_recv() {
                self.apply(event);
            }

            if self.session.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn apply(&mut self, event: Event) {
        let session = std::mem::take(&mut self.session);
        let (session, command) = dispatch(session, event);
        self.session = session;
        if let Some(command) = command {
            self.executor.execute(command);
        }
    }
}

/// Translate a terminal key press. Releases and unmapped keys yield `None`.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')).then_some(Key::CtrlC);
    }
    Some(match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(press(KeyCode::Up, KeyModifiers::NONE)), Some(Key::Up));
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::CtrlC)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
        assert_eq!(
            map_key(press(KeyCode::Char('Y'), KeyModifiers::SHIFT)),
            Some(Key::Char('Y'))
        );
        assert_eq!(map_key(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(map_key(key), None);
    }
}
