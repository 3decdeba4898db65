//! Wire and domain types shared by the API client, the order workflow and
//! the screens.

use serde::{Deserialize, Serialize};

/// A menu category (e.g. "Pizza", "Drinks").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A product listed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
}

/// A line item the server has acknowledged for the current order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Server-assigned identifier
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub amount: u32,
}

/// Navigation parameters for an open order: the table number and the
/// server-side order id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTicket {
    pub number: u32,
    pub order_id: String,
}

/// Sign-in payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated user returned by `POST /session`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /order/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddItemRequest {
    pub order_id: String,
    pub product_id: String,
    pub amount: u32,
    /// Display name for the local item once the server confirms it
    #[serde(skip)]
    pub product_name: String,
}

impl AddItemRequest {
    /// Build the local item from the id the server returned.
    pub fn into_item(self, id: String) -> OrderItem {
        OrderItem {
            id,
            product_id: self.product_id,
            name: self.product_name,
            amount: self.amount,
        }
    }
}

/// Response of `POST /order/add`. Only the id matters to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemReceipt {
    pub id: String,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenOrderRequest {
    pub table: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of `POST /order`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenedOrder {
    pub id: String,
    pub table: u32,
}

impl From<OpenedOrder> for OrderTicket {
    fn from(order: OpenedOrder) -> Self {
        Self {
            number: order.table,
            order_id: order.id,
        }
    }
}
