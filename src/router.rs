//! Navigation and response routing.
//!
//! The router owns the screen stack and everything screens may only ask
//! for: the session, the dispatcher and the toasts. It has no terminal, so
//! whole flows can be driven from tests.

use crate::auth::AuthContext;
use crate::config::Config;
use crate::dispatch::{ApiRequest, ApiResponse, Dispatcher, Envelope, ScreenId};
use crate::error::ApiError;
use crate::models::Session;
use crate::screens::{self, RenderContext, Route, Screen, ScreenAction, ScreenContext};
use crate::widgets::ToastManager;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::Frame;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

struct Entry {
    id: ScreenId,
    name: &'static str,
    screen: Box<dyn Screen>,
}

pub struct Router {
    config: Config,
    auth: AuthContext,
    dispatcher: Dispatcher,
    toasts: ToastManager,
    stack: Vec<Entry>,
    next_id: ScreenId,
    should_quit: bool,
}

impl Router {
    /// Create a router showing the sign-in screen.
    pub fn new(config: Config, dispatcher: Dispatcher) -> Result<Self> {
        let mut router = Self {
            config,
            auth: AuthContext::new(),
            dispatcher,
            toasts: ToastManager::new(),
            stack: Vec::new(),
            next_id: 1,
            should_quit: false,
        };
        router.push(Route::SignIn)?;
        Ok(router)
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Names of the screens on the stack, bottom first.
    pub fn screen_names(&self) -> Vec<&'static str> {
        self.stack.iter().map(|entry| entry.name).collect()
    }

    pub fn current_screen(&self) -> Option<&'static str> {
        self.stack.last().map(|entry| entry.name)
    }

    pub fn is_input_focused(&self) -> bool {
        self.stack
            .last()
            .is_some_and(|entry| entry.screen.is_input_focused())
    }

    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let ctx = RenderContext::new(&self.config, &self.auth);
        if let Some(entry) = self.stack.last_mut() {
            entry.screen.render(frame, area, &ctx)?;
        }
        self.toasts.render(frame, area);
        Ok(())
    }

    /// Hand an input event to the top screen.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        let Some(entry) = self.stack.last_mut() else {
            return Ok(());
        };
        let origin = entry.id;
        let ctx = ScreenContext::new(&self.config, &self.auth);
        let action = entry.screen.handle_event(event, &ctx)?;
        self.apply(origin, action)
    }

    /// Apply every response that has arrived. Returns how many there were.
    pub fn pump(&mut self) -> Result<usize> {
        let envelopes = self.dispatcher.drain();
        let count = envelopes.len();
        for envelope in envelopes {
            self.deliver(envelope)?;
        }
        Ok(count)
    }

    /// Block until no request is in flight or `timeout` passes.
    pub fn wait_idle(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while self.dispatcher.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!("{} requests still in flight", self.dispatcher.in_flight());
                break;
            }
            if let Some(envelope) = self.dispatcher.recv_timeout(remaining) {
                self.deliver(envelope)?;
            }
        }
        Ok(())
    }

    fn deliver(&mut self, envelope: Envelope) -> Result<()> {
        let Envelope { origin, response } = envelope;
        if let Some(e) = response.error() {
            warn!("Request from screen {} failed: {}", origin, e);
        }

        if let ApiResponse::SignedIn(result) = response {
            return self.finish_sign_in(result);
        }

        if self.auth.is_signed_in() && response.error().is_some_and(|e| e.is_unauthorized()) {
            info!("Session rejected by the server, signing out");
            self.auth.sign_out();
            self.dispatcher.set_token(None);
            self.toasts.error("Session expired, please sign in again");
            return self.reset(Route::SignIn);
        }

        let Some(entry) = self.stack.iter_mut().find(|entry| entry.id == origin) else {
            debug!("Dropping response for screen {} (no longer open)", origin);
            return Ok(());
        };
        let ctx = ScreenContext::new(&self.config, &self.auth);
        let action = entry.screen.handle_response(response, &ctx)?;
        self.apply(origin, action)
    }

    fn finish_sign_in(&mut self, result: Result<Session, ApiError>) -> Result<()> {
        let (token, welcome) = match self.auth.finish_sign_in(result) {
            Ok(session) => (session.token.clone(), format!("Welcome, {}", session.name)),
            Err(e) => {
                self.toasts.error(format!("Sign-in failed: {}", e));
                return Ok(());
            }
        };
        self.dispatcher.set_token(Some(token));
        self.toasts.success(welcome);
        self.reset(Route::Dashboard)
    }

    fn apply(&mut self, origin: ScreenId, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(route) => self.push(route)?,
            ScreenAction::Back => self.back(origin)?,
            ScreenAction::Reset(route) => self.reset(route)?,
            ScreenAction::Request(request) => self.dispatcher.dispatch(origin, request),
            ScreenAction::SignIn(credentials) => {
                match self
                    .auth
                    .begin_sign_in(&credentials.email, &credentials.password)
                {
                    Ok(credentials) => {
                        self.dispatcher
                            .dispatch(origin, ApiRequest::SignIn(credentials));
                    }
                    Err(e) => self.toasts.error(e.to_string()),
                }
            }
            ScreenAction::SignOut => {
                self.auth.sign_out();
                self.dispatcher.set_token(None);
                self.toasts.info("Signed out");
                self.reset(Route::SignIn)?;
            }
            ScreenAction::Notify(toast) => self.toasts.push(toast),
            ScreenAction::Batch(actions) => {
                for action in actions {
                    self.apply(origin, action)?;
                }
            }
            ScreenAction::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn push(&mut self, route: Route) -> Result<()> {
        let id = self.next_id;
        self.next_id += 1;
        let name = route.name();
        info!("Opening {} screen ({})", name, id);

        let mut screen = screens::build(route, self.config.default_amount);
        let ctx = ScreenContext::new(&self.config, &self.auth);
        let action = screen.on_enter(&ctx)?;
        self.stack.push(Entry { id, name, screen });
        self.apply(id, action)
    }

    /// Close `origin` and anything above it.
    fn back(&mut self, origin: ScreenId) -> Result<()> {
        let Some(index) = self.stack.iter().position(|entry| entry.id == origin) else {
            return Ok(());
        };
        for entry in self.stack.drain(index..) {
            debug!("Closing {} screen ({})", entry.name, entry.id);
        }
        if self.stack.is_empty() {
            let home = if self.auth.is_signed_in() {
                Route::Dashboard
            } else {
                Route::SignIn
            };
            return self.push(home);
        }
        Ok(())
    }

    fn reset(&mut self, route: Route) -> Result<()> {
        self.stack.clear();
        self.push(route)
    }
}
