//! Kitty-aware key encoding for keys headed to the backend.
//!
//! The renderer produces legacy encodings on its own. When the foreground
//! application has pushed the "disambiguate escape codes" flag, keys that are
//! ambiguous in legacy mode must instead go out as
//! `ESC [ <keycode> [; <modifier>] u`, with
//! `modifier = 1 + shift(1) + alt(2) + ctrl(4) + meta(8)` omitted when it is 1.

use crate::intercept::KittyModeStack;

/// Key identity as reported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A text-producing key; the character without shift applied
    Char(char),
    Escape,
    Enter,
    Tab,
    Backspace,
    /// Anything the legacy encoding already handles unambiguously
    Other,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// Modifier parameter for CSI u (1 when no modifiers are held)
    pub fn code(self) -> u32 {
        let mut code = 1;
        if self.shift {
            code += 1;
        }
        if self.alt {
            code += 2;
        }
        if self.ctrl {
            code += 4;
        }
        if self.meta {
            code += 8;
        }
        code
    }

    fn any(self) -> bool {
        self.code() > 1
    }
}

/// A key press delivered by the renderer's key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }
}

/// `ESC [ <keycode> [; <modifier>] u`
pub fn encode_csi_u(keycode: u32, modifiers: KeyModifiers) -> Vec<u8> {
    let code = modifiers.code();
    if code == 1 {
        format!("\x1b[{}u", keycode).into_bytes()
    } else {
        format!("\x1b[{};{}u", keycode, code).into_bytes()
    }
}

/// Encode `event` for the current Kitty mode.
///
/// Returns `None` when the legacy encoding is correct, in which case the
/// renderer's own data event carries the key.
pub fn encode_kitty_key(event: &KeyEvent, kitty: &KittyModeStack) -> Option<Vec<u8>> {
    if !kitty.disambiguate() {
        return None;
    }

    let mods = event.modifiers;
    let keycode = match event.key {
        Key::Escape => 27,
        Key::Enter if mods.any() => 13,
        Key::Tab if mods.any() => 9,
        Key::Backspace if mods.any() => 127,
        // Shift alone just produces text.
        Key::Char(c) if mods.alt || mods.ctrl || mods.meta => {
            c.to_lowercase().next().unwrap_or(c) as u32
        }
        _ => return None,
    };
    Some(encode_csi_u(keycode, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disambiguating() -> KittyModeStack {
        let mut stack = KittyModeStack::new(32);
        stack.push(1);
        stack
    }

    fn ctrl() -> KeyModifiers {
        KeyModifiers {
            ctrl: true,
            ..KeyModifiers::NONE
        }
    }

    #[test]
    fn test_modifier_codes() {
        assert_eq!(KeyModifiers::NONE.code(), 1);
        assert_eq!(
            KeyModifiers {
                shift: true,
                alt: true,
                ctrl: true,
                meta: true
            }
            .code(),
            16
        );
        assert_eq!(ctrl().code(), 5);
    }

    #[test]
    fn test_legacy_mode_never_encodes() {
        let stack = KittyModeStack::new(32);
        let event = KeyEvent::new(Key::Escape, KeyModifiers::NONE);
        assert_eq!(encode_kitty_key(&event, &stack), None);
    }

    #[test]
    fn test_escape_disambiguated() {
        let event = KeyEvent::new(Key::Escape, KeyModifiers::NONE);
        assert_eq!(
            encode_kitty_key(&event, &disambiguating()),
            Some(b"\x1b[27u".to_vec())
        );
    }

    #[test]
    fn test_modified_enter_and_plain_enter() {
        let stack = disambiguating();
        let shift_enter = KeyEvent::new(
            Key::Enter,
            KeyModifiers {
                shift: true,
                ..KeyModifiers::NONE
            },
        );
        assert_eq!(
            encode_kitty_key(&shift_enter, &stack),
            Some(b"\x1b[13;2u".to_vec())
        );
        let enter = KeyEvent::new(Key::Enter, KeyModifiers::NONE);
        assert_eq!(encode_kitty_key(&enter, &stack), None);
    }

    #[test]
    fn test_ctrl_char_uses_lowercase_codepoint() {
        let stack = disambiguating();
        let event = KeyEvent::new(Key::Char('C'), ctrl());
        assert_eq!(encode_kitty_key(&event, &stack), Some(b"\x1b[99;5u".to_vec()));

        let plain = KeyEvent::new(Key::Char('a'), KeyModifiers::NONE);
        assert_eq!(encode_kitty_key(&plain, &stack), None);
    }

    #[test]
    fn test_ctrl_backspace_and_tab() {
        let stack = disambiguating();
        assert_eq!(
            encode_kitty_key(&KeyEvent::new(Key::Backspace, ctrl()), &stack),
            Some(b"\x1b[127;5u".to_vec())
        );
        assert_eq!(
            encode_kitty_key(&KeyEvent::new(Key::Tab, ctrl()), &stack),
            Some(b"\x1b[9;5u".to_vec())
        );
    }
}
