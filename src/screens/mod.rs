//! Screen controllers.
//!
//! Each screen implements `Screen`, owns its state and answers events with a
//! `ScreenAction`. The router keeps them on a stack:
//!
//! ```text
//! SignIn ──sign in ok──▶ Dashboard ──open table──▶ Order ──finish──▶ FinishOrder
//!                            ▲                       │                  │
//!                            └──────close (Back)─────┘                  │
//!                            └────────────send (Reset)──────────────────┘
//! ```

pub mod dashboard;
pub mod finish_order;
pub mod order;
pub mod screen_trait;
pub mod sign_in;

pub use dashboard::DashboardScreen;
pub use finish_order::FinishOrderScreen;
pub use order::OrderScreen;
pub use screen_trait::{RenderContext, Route, Screen, ScreenAction, ScreenContext};
pub use sign_in::SignInScreen;

use crate::keymap::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How a key press was consumed.
pub(crate) enum KeyInput {
    /// The character went into a text field.
    Typed,
    Action(Action),
    Unbound,
}

/// Classify a key press. Plain characters are offered to `type_char` first
/// (return true to consume them); everything else goes through the keymap.
pub(crate) fn key_input(
    key: KeyEvent,
    ctx: &ScreenContext,
    mut type_char: impl FnMut(char) -> bool,
) -> KeyInput {
    if key.kind != KeyEventKind::Press {
        return KeyInput::Unbound;
    }
    if let KeyCode::Char(c) = key.code {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if plain && type_char(c) {
            return KeyInput::Typed;
        }
    }
    ctx.config
        .keymap
        .get_action(key.code, key.modifiers)
        .map_or(KeyInput::Unbound, KeyInput::Action)
}

/// Build the screen for `route`.
pub fn build(route: Route, default_amount: u32) -> Box<dyn Screen> {
    match route {
        Route::SignIn => Box::new(SignInScreen::new()),
        Route::Dashboard => Box::new(DashboardScreen::new()),
        Route::Order(ticket) => Box::new(OrderScreen::new(ticket, default_amount)),
        Route::FinishOrder { ticket, items } => Box::new(FinishOrderScreen::new(ticket, items)),
    }
}
