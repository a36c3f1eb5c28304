use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    /// Pause or resume; starts a new game once the last one is over
    TogglePause,
    /// Run a single tick, then pause
    SingleStep,
    Restart,
    ChangeColor,
    ToggleAutoColor,
    LevelUp,
    LevelDown,
    Quit,
    None,
}

/// Maps terminal key presses onto game and simulation commands.
///
/// Letters are matched case-insensitively.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::steering(code) {
            return KeyAction::GameAction(Action::Move(direction));
        }
        Self::simulation(code)
            .or_else(|| Self::appearance(code))
            .unwrap_or(KeyAction::None)
    }

    /// Arrow keys and WASD
    fn steering(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
            _ => None,
        }
    }

    fn simulation(code: KeyCode) -> Option<KeyAction> {
        let action = match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => KeyAction::TogglePause,
            KeyCode::Char('n') => KeyAction::SingleStep,
            KeyCode::Char('r') => KeyAction::Restart,
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            _ => return None,
        };
        Some(action)
    }

    /// Snake colour and the level for the next game
    fn appearance(code: KeyCode) -> Option<KeyAction> {
        let action = match code {
            KeyCode::Char('c') => KeyAction::ChangeColor,
            KeyCode::Char('t') => KeyAction::ToggleAutoColor,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::LevelUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::LevelDown,
            _ => return None,
        };
        Some(action)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(direction: Direction) -> KeyAction {
        KeyAction::GameAction(Action::Move(direction))
    }

    #[test]
    fn test_binding_table() {
        let handler = InputHandler::new();
        let bindings = [
            (KeyCode::Up, moving(Direction::Up)),
            (KeyCode::Down, moving(Direction::Down)),
            (KeyCode::Left, moving(Direction::Left)),
            (KeyCode::Right, moving(Direction::Right)),
            (KeyCode::Char('w'), moving(Direction::Up)),
            (KeyCode::Char('a'), moving(Direction::Left)),
            (KeyCode::Char('s'), moving(Direction::Down)),
            (KeyCode::Char('d'), moving(Direction::Right)),
            (KeyCode::Char(' '), KeyAction::TogglePause),
            (KeyCode::Enter, KeyAction::TogglePause),
            (KeyCode::Char('p'), KeyAction::TogglePause),
            (KeyCode::Char('n'), KeyAction::SingleStep),
            (KeyCode::Char('r'), KeyAction::Restart),
            (KeyCode::Char('q'), KeyAction::Quit),
            (KeyCode::Esc, KeyAction::Quit),
            (KeyCode::Char('c'), KeyAction::ChangeColor),
            (KeyCode::Char('t'), KeyAction::ToggleAutoColor),
            (KeyCode::Char('+'), KeyAction::LevelUp),
            (KeyCode::Char('='), KeyAction::LevelUp),
            (KeyCode::Char('-'), KeyAction::LevelDown),
            (KeyCode::Char('_'), KeyAction::LevelDown),
            (KeyCode::Char('x'), KeyAction::None),
            (KeyCode::Tab, KeyAction::None),
        ];

        for (code, expected) in bindings {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handler.handle_key_event(key), expected, "{code:?}");
        }
    }

    #[test]
    fn test_letters_ignore_shift() {
        let handler = InputHandler::new();
        for c in ['W', 'A', 'S', 'D', 'P', 'N', 'R', 'Q', 'C', 'T'] {
            let lower = KeyEvent::new(KeyCode::Char(c.to_ascii_lowercase()), KeyModifiers::NONE);
            let upper = KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT);
            assert_eq!(
                handler.handle_key_event(upper),
                handler.handle_key_event(lower),
                "{c}"
            );
        }
    }

    #[test]
    fn test_control_c_quits_instead_of_recolouring() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
