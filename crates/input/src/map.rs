//! Key normalization from terminal events to DOM-style key values.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Longest key or code name kept ("BracketRight")
pub const KEY_NAME_CAPACITY: usize = 16;

type KeyName = ArrayString<KEY_NAME_CAPACITY>;

/// A key press as control tables see it.
///
/// - `key`: the produced value, case-sensitive (`"w"`, `"W"`, `"ArrowUp"`, `" "`)
/// - `code`: the physical key, layout independent (`"KeyW"`, `"ArrowUp"`, `"Space"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    key: KeyName,
    code: KeyName,
}

fn name(s: &str) -> KeyName {
    KeyName::from(s).unwrap_or_default()
}

/// Physical code of a character on a US layout
fn char_code(c: char) -> KeyName {
    if c.is_ascii_alphabetic() {
        let mut code = name("Key");
        code.push(c.to_ascii_uppercase());
        return code;
    }
    if c.is_ascii_digit() {
        let mut code = name("Digit");
        code.push(c);
        return code;
    }
    name(match c {
        ' ' => "Space",
        '-' | '_' => "Minus",
        '=' | '+' => "Equal",
        ',' | '<' => "Comma",
        '.' | '>' => "Period",
        '/' | '?' => "Slash",
        ';' | ':' => "Semicolon",
        '\'' | '"' => "Quote",
        '[' | '{' => "BracketLeft",
        ']' | '}' => "BracketRight",
        '\\' | '|' => "Backslash",
        '`' | '~' => "Backquote",
        _ => "Unidentified",
    })
}

impl KeyInput {
    pub fn new(key: &str, code: &str) -> Self {
        Self {
            key: name(key),
            code: name(code),
        }
    }

    /// A named key whose value and code coincide (`"Enter"`, `"ArrowUp"`)
    pub fn named(name: &str) -> Self {
        Self::new(name, name)
    }

    /// A printable character, with its code derived from a US layout
    pub fn from_char(c: char) -> Self {
        let mut key = KeyName::new();
        let _ = key.try_push(c);
        Self {
            key,
            code: char_code(c),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_enter(&self) -> bool {
        self.key() == "Enter"
    }

    /// Normalize a terminal key event.
    ///
    /// Releases are dropped; presses and auto-repeats both count as keydowns.
    /// Keys with no DOM counterpart yield `None`.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let input = match event.code {
            KeyCode::Char(c) => Self::from_char(c),
            KeyCode::Enter => Self::named("Enter"),
            KeyCode::Esc => Self::named("Escape"),
            KeyCode::Tab | KeyCode::BackTab => Self::named("Tab"),
            KeyCode::Backspace => Self::named("Backspace"),
            KeyCode::Delete => Self::named("Delete"),
            KeyCode::Insert => Self::named("Insert"),
            KeyCode::Home => Self::named("Home"),
            KeyCode::End => Self::named("End"),
            KeyCode::PageUp => Self::named("PageUp"),
            KeyCode::PageDown => Self::named("PageDown"),
            KeyCode::Up => Self::named("ArrowUp"),
            KeyCode::Down => Self::named("ArrowDown"),
            KeyCode::Left => Self::named("ArrowLeft"),
            KeyCode::Right => Self::named("ArrowRight"),
            KeyCode::F(n) => {
                let mut f = name("F");
                for digit in n.to_string().chars() {
                    let _ = f.try_push(digit);
                }
                Self { key: f, code: f }
            }
            _ => return None,
        };
        Some(input)
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Option<KeyInput> {
        KeyInput::from_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        let up = press(KeyCode::Up).unwrap();
        assert_eq!(up.key(), "ArrowUp");
        assert_eq!(up.code(), "ArrowUp");
        assert_eq!(press(KeyCode::Left).unwrap().key(), "ArrowLeft");
    }

    #[test]
    fn test_letters_keep_case_in_key_only() {
        let lower = press(KeyCode::Char('w')).unwrap();
        let upper = press(KeyCode::Char('W')).unwrap();
        assert_eq!(lower.key(), "w");
        assert_eq!(upper.key(), "W");
        assert_eq!(lower.code(), "KeyW");
        assert_eq!(upper.code(), "KeyW");
    }

    #[test]
    fn test_space_and_enter() {
        let space = press(KeyCode::Char(' ')).unwrap();
        assert_eq!(space.key(), " ");
        assert_eq!(space.code(), "Space");

        let enter = press(KeyCode::Enter).unwrap();
        assert!(enter.is_enter());
        assert_eq!(enter.code(), "Enter");
    }

    #[test]
    fn test_digits_and_function_keys() {
        assert_eq!(press(KeyCode::Char('7')).unwrap().code(), "Digit7");
        assert_eq!(press(KeyCode::F(12)).unwrap().key(), "F12");
    }

    #[test]
    fn test_release_is_dropped_and_repeat_kept() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(KeyInput::from_key_event(release), None);

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..release
        };
        assert_eq!(
            KeyInput::from_key_event(repeat),
            Some(KeyInput::named("ArrowLeft"))
        );
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(press(KeyCode::Null), None);
        assert_eq!(press(KeyCode::CapsLock), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
