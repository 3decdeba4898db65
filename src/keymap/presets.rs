//! Preset keymaps: Standard and Vim
//!
//! Each preset provides a complete set of key bindings for all actions.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Arrows, Enter, Esc and single-letter order actions
    #[default]
    Standard,
    /// Adds hjkl-style list navigation
    Vim,
}

impl KeymapPreset {
    /// Get all key bindings for this preset
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => vim_bindings(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
        }
    }
}

/// Bindings shared by every preset
fn common_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("pageup", Action::PageUp),
        KeyBinding::new("pagedown", Action::PageDown),
        KeyBinding::new("home", Action::GoToTop),
        KeyBinding::new("end", Action::GoToEnd),
        // Forms
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Cancel),
        KeyBinding::new("tab", Action::NextField),
        KeyBinding::new("backtab", Action::PrevField),
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("delete", Action::DeleteChar),
        // Order screen
        KeyBinding::new("c", Action::PickCategory),
        KeyBinding::new("p", Action::PickProduct),
        KeyBinding::new("+", Action::AddItem),
        KeyBinding::new("a", Action::AddItem),
        KeyBinding::new("d", Action::DeleteItem),
        KeyBinding::new("x", Action::CloseOrder),
        KeyBinding::new("f", Action::FinishOrder),
        KeyBinding::new("r", Action::ReloadMenu),
        // Global
        KeyBinding::new("ctrl+l", Action::SignOut),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("q", Action::Quit),
    ]
}

fn standard_bindings() -> Vec<KeyBinding> {
    common_bindings()
}

fn vim_bindings() -> Vec<KeyBinding> {
    let mut bindings = vec![
        KeyBinding::new("k", Action::MoveUp),
        KeyBinding::new("j", Action::MoveDown),
        KeyBinding::new("ctrl+u", Action::PageUp),
        KeyBinding::new("ctrl+d", Action::PageDown),
        KeyBinding::new("g", Action::GoToTop),
    ];
    bindings.extend(common_bindings());
    bindings
}
