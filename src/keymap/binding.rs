//! Key bindings: strings like "ctrl+l", "shift+tab" or "+" mapped to actions.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// A single key binding mapping a key combination to an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string (e.g., "a", "down", "ctrl+l", "shift+tab")
    pub key: String,

    /// The action this key triggers
    pub action: Action,
}

/// Parsed key representation for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }

    /// Check if this binding matches the given key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match parse_key_string(&self.key) {
            Ok(parsed) => {
                parsed.code == code
                    && normalize(code, parsed.modifiers) == normalize(code, modifiers)
            }
            Err(_) => false,
        }
    }

    /// Display string for footers (e.g., "Ctrl+L")
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }
}

/// Terminals report shifted characters both with and without SHIFT; for
/// character keys the character itself already carries the case.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) | KeyCode::BackTab => {
            let mut modifiers = modifiers;
            modifiers.remove(KeyModifiers::SHIFT);
            modifiers
        }
        _ => modifiers,
    }
}

/// Parse a key string like "ctrl+shift+n" into KeyCode and KeyModifiers.
///
/// A trailing "+" is the plus key itself, so "+" and "ctrl++" both parse.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return Err("Empty key".to_string());
    }

    let (prefix, key_part) = if key == "+" {
        ("", "+")
    } else if let Some(stripped) = key.strip_suffix("++") {
        (stripped, "+")
    } else {
        match key.rsplit_once('+') {
            Some((mods, last)) => (mods, last),
            None => ("", key.as_str()),
        }
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.trim() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            other => return Err(format!("Unknown modifier: {}", other)),
        };
    }

    let code = parse_key_code(key_part)?;
    Ok(ParsedKey { code, modifiers })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {}", key)),
            }
        }
    };
    Ok(code)
}

/// Format a key string for display (e.g., "ctrl+l" -> "Ctrl+L")
pub fn format_key_display(key: &str) -> String {
    let key = key.trim().to_lowercase();
    if key == "+" {
        return "+".to_string();
    }
    if let Some(stripped) = key.strip_suffix("++") {
        return format!("{}++", format_key_display(stripped));
    }
    key.split('+')
        .map(|part| match part {
            "ctrl" | "control" => "Ctrl".to_string(),
            "alt" | "option" => "Alt".to_string(),
            "shift" => "Shift".to_string(),
            "up" => "↑".to_string(),
            "down" => "↓".to_string(),
            "left" => "←".to_string(),
            "right" => "→".to_string(),
            "enter" | "return" => "Enter".to_string(),
            "esc" | "escape" => "Esc".to_string(),
            "tab" => "Tab".to_string(),
            "backtab" => "Shift+Tab".to_string(),
            "pageup" | "pgup" => "PgUp".to_string(),
            "pagedown" | "pgdn" => "PgDn".to_string(),
            "delete" | "del" => "Del".to_string(),
            p if p.chars().count() == 1 => p.to_uppercase(),
            p => {
                let mut chars = p.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}
