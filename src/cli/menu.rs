//! `tablepad menu`: print categories and products without the TUI.

use super::common::{print_info, print_success};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{Category, Credentials, Product};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tokio::runtime::Runtime;

pub(super) fn cmd_menu(config: &Config, email: Option<&str>, password: Option<&str>) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let mut client = ApiClient::new(&config.api.base_url, config.api.timeout())
        .context("Failed to create API client")?;
    print_info(&format!("Fetching menu from {}", client.base_url()));

    let menu = runtime.block_on(async {
        if let (Some(email), Some(password)) = (email, password) {
            let session = client
                .sign_in(&Credentials::new(email, password))
                .await
                .context("Sign-in failed")?;
            print_success(&format!("Signed in as {}", session.name));
            client.set_token(Some(session.token));
        }

        let categories = client
            .list_categories()
            .await
            .context("Failed to list categories")?;
        let mut menu = Vec::with_capacity(categories.len());
        for category in categories {
            let products = client
                .list_products(&category.id)
                .await
                .with_context(|| format!("Failed to list products of {}", category.name))?;
            menu.push((category, products));
        }
        anyhow::Ok(menu)
    })?;

    let stdout = io::stdout();
    write_menu(&mut stdout.lock(), &menu)?;
    Ok(())
}

/// Render the menu as an indented listing.
pub fn write_menu(out: &mut impl Write, menu: &[(Category, Vec<Product>)]) -> io::Result<()> {
    if menu.is_empty() {
        writeln!(out, "(no categories)")?;
    }
    for (category, products) in menu {
        writeln!(out, "{}", category.name)?;
        if products.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for product in products {
            writeln!(out, "  - {}", product.name)?;
        }
    }
    Ok(())
}
