/// Keyboard decoding: crossterm key events → game `Command`s.

use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mouse_knight::entities::{Command, Direction};

/// Decode one key event.  Releases never count, and pause is edge-triggered:
/// auto-repeat while `p` is held down does not pause again.
pub fn decode(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    let ch = match key.code {
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char(ch) => ch.to_ascii_lowercase(),
        _ => return None,
    };
    match ch {
        'w' => Some(Command::Move(Direction::Up)),
        's' => Some(Command::Move(Direction::Down)),
        'a' => Some(Command::Move(Direction::Left)),
        'd' => Some(Command::Move(Direction::Right)),
        'i' => Some(Command::Attack(Direction::Up)),
        'k' => Some(Command::Attack(Direction::Down)),
        'j' => Some(Command::Attack(Direction::Left)),
        'l' => Some(Command::Attack(Direction::Right)),
        'p' if key.kind == KeyEventKind::Press => Some(Command::Pause),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

/// Next decodable command waiting in the channel, skipping everything else.
/// Never blocks.
pub fn poll(rx: &mpsc::Receiver<Event>) -> Option<Command> {
    while let Ok(event) = rx.try_recv() {
        if let Event::Key(key) = event {
            if let Some(command) = decode(&key) {
                return Some(command);
            }
        }
    }
    None
}

/// Block until any key press (releases and repeats don't count).  Returns
/// `false` if the input thread has gone away.
pub fn wait_any_key(rx: &mpsc::Receiver<Event>) -> bool {
    while let Ok(event) = rx.recv() {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            return true;
        }
    }
    false
}

/// Drop everything typed so far, e.g. keys pressed during a pause countdown.
pub fn flush(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
}
