//! tablepad - a terminal order pad for restaurant table service
//!
//! Waiters sign in, open a table, build its order from the menu and send it
//! to the kitchen, all against the restaurant's REST API.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod keymap;
pub mod models;
pub mod router;
pub mod screens;
pub mod state;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod widgets;

pub use config::Config;
pub use error::{ApiError, AuthError, OrderError};
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
