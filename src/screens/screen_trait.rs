//! Screen trait and associated types.
//!
//! Screens own their state and never touch the network or the navigation
//! stack directly. They answer key events and API responses with a
//! `ScreenAction`, and the router carries it out.

use crate::auth::AuthContext;
use crate::config::Config;
use crate::dispatch::{ApiRequest, ApiResponse};
use crate::models::{Credentials, OrderItem, OrderTicket};
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub auth: &'a AuthContext,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, auth: &'a AuthContext) -> Self {
        Self { config, auth }
    }
}

/// Read-only resources for event handling.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub auth: &'a AuthContext,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, auth: &'a AuthContext) -> Self {
        Self { config, auth }
    }
}

/// A screen to open, with the parameters it is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    SignIn,
    Dashboard,
    Order(OrderTicket),
    FinishOrder {
        ticket: OrderTicket,
        items: Vec<OrderItem>,
    },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::SignIn => "sign-in",
            Route::Dashboard => "dashboard",
            Route::Order(_) => "order",
            Route::FinishOrder { .. } => "finish-order",
        }
    }
}

/// What a screen wants to happen after handling an event or response.
#[derive(Debug, Clone, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Push a new screen on top of this one.
    Navigate(Route),
    /// Pop this screen, returning to the previous one with its state.
    Back,
    /// Replace the whole navigation stack.
    Reset(Route),
    /// Issue a remote call on behalf of this screen.
    Request(ApiRequest),
    /// Start signing in (the router owns the session).
    SignIn(Credentials),
    SignOut,
    /// Show a toast.
    Notify(Toast),
    /// Several actions, applied in order.
    Batch(Vec<ScreenAction>),
    Quit,
}

impl ScreenAction {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Notify(Toast::error(message))
    }
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Back)
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Handle the outcome of a request this screen issued.
    fn handle_response(
        &mut self,
        _response: ApiResponse,
        _ctx: &ScreenContext,
    ) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Check if a text input is currently focused.
    ///
    /// When true, printable characters are typed rather than treated as
    /// shortcuts.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called once, when the screen is pushed on the stack.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }
}
