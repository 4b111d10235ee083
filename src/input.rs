//! Keyboard input: maps key presses to game actions
//!
//! One recognised key press yields exactly one action. Gravity is not an
//! input concern; the driver loop issues soft drops on its own clock.

use crate::game::Action;
use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();
        let code = match lower.as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let code = Self::parse_key(s);
                if code.is_none() {
                    tracing::warn!("unknown key name {:?} in settings", s);
                }
                code
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            soft_drop: Self::parse_keys(&settings.keys.soft_drop),
            hard_drop: Self::parse_keys(&settings.keys.hard_drop),
            rotate_cw: Self::parse_keys(&settings.keys.rotate_cw),
            rotate_ccw: Self::parse_keys(&settings.keys.rotate_ccw),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }

    /// Translate a key press into an action, if the key is bound
    pub fn action_for(&self, key: KeyEvent) -> Option<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        let code = normalize_key(key.code);
        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.soft_drop, Action::SoftDrop),
            (&self.hard_drop, Action::HardDrop),
            (&self.rotate_cw, Action::RotateCW),
            (&self.rotate_ccw, Action::RotateCCW),
            (&self.quit, Action::Quit),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&code))
            .map(|(_, action)| action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(press(KeyCode::Right)), Some(Action::MoveRight));
        assert_eq!(keys.action_for(press(KeyCode::Down)), Some(Action::SoftDrop));
        assert_eq!(keys.action_for(press(KeyCode::Char(' '))), Some(Action::HardDrop));
        assert_eq!(keys.action_for(press(KeyCode::Up)), Some(Action::RotateCW));
        assert_eq!(keys.action_for(press(KeyCode::Char('x'))), Some(Action::RotateCW));
        assert_eq!(keys.action_for(press(KeyCode::Char('z'))), Some(Action::RotateCCW));
        assert_eq!(keys.action_for(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(keys.action_for(press(KeyCode::Char('k'))), None);
    }

    #[test]
    fn test_uppercase_matches_lowercase_binding() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(press(KeyCode::Char('Z'))), Some(Action::RotateCCW));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.action_for(event), Some(Action::Quit));
    }

    #[test]
    fn test_custom_bindings_from_settings() {
        let mut settings = Settings::default();
        settings.keys.move_left = vec!["a".to_string(), "Left".to_string()];
        settings.keys.hard_drop = vec!["Enter".to_string(), "not-a-key".to_string()];
        let keys = KeyBindings::from_settings(&settings);

        assert_eq!(keys.action_for(press(KeyCode::Char('a'))), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(press(KeyCode::Left)), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(press(KeyCode::Enter)), Some(Action::HardDrop));
        assert_eq!(keys.hard_drop.len(), 1);
    }
}
