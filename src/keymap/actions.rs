//! Semantic actions triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All user actions the order pad understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move selection up in a list
    MoveUp,
    /// Move selection down in a list
    MoveDown,
    /// Move the cursor left in an input
    MoveLeft,
    /// Move the cursor right in an input
    MoveRight,
    /// Jump up by a page
    PageUp,
    /// Jump down by a page
    PageDown,
    /// Go to the first item
    GoToTop,
    /// Go to the last item
    GoToEnd,

    // ============ Forms ============
    /// Confirm selection / submit form
    Confirm,
    /// Cancel / go back
    Cancel,
    /// Focus the next field
    NextField,
    /// Focus the previous field
    PrevField,
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,

    // ============ Order screen ============
    /// Open the category picker
    PickCategory,
    /// Open the product picker
    PickProduct,
    /// Add the selected product with the typed quantity
    AddItem,
    /// Remove the highlighted item
    DeleteItem,
    /// Discard an empty order
    CloseOrder,
    /// Move on to the finish step
    FinishOrder,
    /// Fetch the menu again
    ReloadMenu,

    // ============ Global ============
    /// End the session and return to sign-in
    SignOut,
    /// Quit the application
    Quit,
}

impl Action {
    /// Human-readable description shown in footers
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Cursor left",
            Action::MoveRight => "Cursor right",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to top",
            Action::GoToEnd => "Go to end",
            Action::Confirm => "Confirm",
            Action::Cancel => "Back",
            Action::NextField => "Next field",
            Action::PrevField => "Previous field",
            Action::Backspace => "Delete back",
            Action::DeleteChar => "Delete",
            Action::PickCategory => "Category",
            Action::PickProduct => "Product",
            Action::AddItem => "Add",
            Action::DeleteItem => "Remove",
            Action::CloseOrder => "Close order",
            Action::FinishOrder => "Finish",
            Action::ReloadMenu => "Reload menu",
            Action::SignOut => "Sign out",
            Action::Quit => "Quit",
        }
    }
}
