//! Command-line interface.
//!
//! Without a subcommand the TUI starts. Global flags adjust the loaded
//! configuration for this run only; nothing is written back.

mod common;
mod menu;

pub use common::*;
pub use menu::write_menu;

use crate::config::Config;
use crate::styles::ThemeType;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Take restaurant table orders from the terminal
#[derive(Parser, Debug)]
#[command(name = "tablepad", version, long_about = None)]
pub struct Cli {
    /// Restaurant API base URL (overrides config and TABLEPAD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// UI theme: dark, light or nocolor
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Disable all UI colors
    #[arg(long, global = true)]
    pub no_colors: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the menu: every category with its products
    Menu {
        /// Sign in first (needed when the server requires auth)
        #[arg(long, requires = "password")]
        email: Option<String>,
        #[arg(long, requires = "email")]
        password: Option<String>,
    },
    /// Print the config file location
    ConfigPath,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Load the config file and layer env and CLI overrides on top.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_create(&self.config_path())?;
        config.apply_env_overrides();
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        Ok(config)
    }

    /// Theme for this run. `--no-colors` and `NO_COLOR` win over everything.
    pub fn theme_type(&self, config: &Config) -> ThemeType {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if self.no_colors || no_color_env {
            return ThemeType::NoColor;
        }
        config.theme.parse().unwrap_or_default()
    }

    /// Run a subcommand. The caller starts the TUI when there is none.
    pub fn execute(&self, command: &Commands) -> Result<()> {
        match command {
            Commands::Menu { email, password } => {
                let config = self.load_config()?;
                menu::cmd_menu(&config, email.as_deref(), password.as_deref())
            }
            Commands::ConfigPath => {
                println!("{}", self.config_path().display());
                Ok(())
            }
        }
    }
}
