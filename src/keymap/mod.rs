//! Keymap configuration module
//!
//! Customizable keyboard shortcuts: a preset plus user overrides.

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{format_key_display, parse_key_string, KeyBinding};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    /// Base preset keymap
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.all_bindings()
            .into_iter()
            .find(|binding| binding.matches(code, modifiers))
            .map(|binding| binding.action)
    }

    /// All effective bindings. An action bound in the overrides loses all of
    /// its preset bindings.
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let mut bindings = self.overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|p| !self.overrides.iter().any(|o| o.action == p.action)),
        );
        bindings
    }

    /// Display string for the first key bound to `action`
    pub fn key_for(&self, action: Action) -> String {
        self.all_bindings()
            .iter()
            .find(|b| b.action == action)
            .map(KeyBinding::display)
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hint fragment like "C: Category"
    pub fn hint(&self, action: Action) -> String {
        format!("{}: {}", action.description(), self.key_for(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.preset, KeymapPreset::Standard);
        assert!(keymap.overrides.is_empty());
    }

    #[test]
    fn test_get_action_from_preset() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get_action(KeyCode::Char('f'), KeyModifiers::NONE),
            Some(Action::FinishOrder)
        );
        assert_eq!(
            keymap.get_action(KeyCode::Char('l'), KeyModifiers::CONTROL),
            Some(Action::SignOut)
        );
        assert_eq!(keymap.get_action(KeyCode::Char('z'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_override_shadows_preset() {
        let keymap = Keymap {
            preset: KeymapPreset::Standard,
            overrides: vec![KeyBinding::new("ctrl+f", Action::FinishOrder)],
        };
        assert_eq!(
            keymap.get_action(KeyCode::Char('f'), KeyModifiers::CONTROL),
            Some(Action::FinishOrder)
        );
        // Preset 'f' is shadowed by the override
        assert_eq!(keymap.get_action(KeyCode::Char('f'), KeyModifiers::NONE), None);
        assert_eq!(keymap.key_for(Action::FinishOrder), "Ctrl+F");
    }

    #[test]
    fn test_vim_preset_adds_navigation() {
        let keymap = Keymap {
            preset: KeymapPreset::Vim,
            overrides: Vec::new(),
        };
        assert_eq!(
            keymap.get_action(KeyCode::Char('j'), KeyModifiers::NONE),
            Some(Action::MoveDown)
        );
        assert_eq!(
            keymap.get_action(KeyCode::Down, KeyModifiers::NONE),
            Some(Action::MoveDown)
        );
    }

    #[test]
    fn test_hint() {
        let keymap = Keymap::default();
        assert_eq!(keymap.hint(Action::PickCategory), "Category: C");
    }
}
