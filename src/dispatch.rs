//! Asynchronous request dispatch.
//!
//! Screens never await the network. They describe a call as an
//! `ApiRequest`; the dispatcher spawns it on the tokio runtime and the
//! outcome comes back as an `Envelope` tagged with the screen that asked for
//! it. The app drains envelopes on every tick, so responses are applied in
//! the order they complete.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{AddItemRequest, Category, Credentials, OrderTicket, Product, Session};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Identifies the screen instance that issued a request.
pub type ScreenId = u64;

/// A remote call a screen wants made.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    SignIn(Credentials),
    OpenOrder { table: u32, name: Option<String> },
    ListCategories,
    ListProducts { category_id: String },
    AddItem(AddItemRequest),
    DeleteItem { item_id: String },
    CloseOrder { order_id: String },
    SendOrder { order_id: String },
}

impl ApiRequest {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SignIn(_) => "sign in",
            Self::OpenOrder { .. } => "open order",
            Self::ListCategories => "list categories",
            Self::ListProducts { .. } => "list products",
            Self::AddItem(_) => "add item",
            Self::DeleteItem { .. } => "delete item",
            Self::CloseOrder { .. } => "close order",
            Self::SendOrder { .. } => "send order",
        }
    }
}

/// Outcome of an `ApiRequest`, carrying whatever the issuer needs to
/// reconcile its state.
#[derive(Debug)]
pub enum ApiResponse {
    SignedIn(Result<Session, ApiError>),
    OrderOpened(Result<OrderTicket, ApiError>),
    Categories(Result<Vec<Category>, ApiError>),
    Products {
        category_id: String,
        result: Result<Vec<Product>, ApiError>,
    },
    ItemAdded {
        request: AddItemRequest,
        result: Result<String, ApiError>,
    },
    ItemDeleted {
        item_id: String,
        result: Result<(), ApiError>,
    },
    OrderClosed {
        order_id: String,
        result: Result<(), ApiError>,
    },
    OrderSent {
        order_id: String,
        result: Result<(), ApiError>,
    },
}

impl ApiResponse {
    /// The failure carried by this response, if any.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::SignedIn(result) => result.as_ref().err(),
            Self::OrderOpened(result) => result.as_ref().err(),
            Self::Categories(result) => result.as_ref().err(),
            Self::Products { result, .. } => result.as_ref().err(),
            Self::ItemAdded { result, .. } => result.as_ref().err(),
            Self::ItemDeleted { result, .. }
            | Self::OrderClosed { result, .. }
            | Self::OrderSent { result, .. } => result.as_ref().err(),
        }
    }
}

/// A response addressed to the screen that issued the request.
#[derive(Debug)]
pub struct Envelope {
    pub origin: ScreenId,
    pub response: ApiResponse,
}

/// Run one request against the API.
pub async fn execute(client: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::SignIn(credentials) => ApiResponse::SignedIn(client.sign_in(&credentials).await),
        ApiRequest::OpenOrder { table, name } => {
            ApiResponse::OrderOpened(client.open_order(table, name).await)
        }
        ApiRequest::ListCategories => ApiResponse::Categories(client.list_categories().await),
        ApiRequest::ListProducts { category_id } => {
            let result = client.list_products(&category_id).await;
            ApiResponse::Products {
                category_id,
                result,
            }
        }
        ApiRequest::AddItem(request) => {
            let result = client.add_item(&request).await.map(|receipt| receipt.id);
            ApiResponse::ItemAdded { request, result }
        }
        ApiRequest::DeleteItem { item_id } => {
            let result = client.delete_item(&item_id).await;
            ApiResponse::ItemDeleted { item_id, result }
        }
        ApiRequest::CloseOrder { order_id } => {
            let result = client.close_order(&order_id).await;
            ApiResponse::OrderClosed { order_id, result }
        }
        ApiRequest::SendOrder { order_id } => {
            let result = client.send_order(&order_id).await;
            ApiResponse::OrderSent { order_id, result }
        }
    }
}

/// Spawns API calls and collects their results.
pub struct Dispatcher {
    handle: Handle,
    client: ApiClient,
    tx: Sender<Envelope>,
    rx: Receiver<Envelope>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(handle: Handle, client: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            handle,
            client,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Install or clear the bearer token for requests dispatched from now on.
    pub fn set_token(&mut self, token: Option<String>) {
        self.client.set_token(token);
    }

    /// Number of requests spawned whose envelopes have not been drained yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spawn `request` on behalf of screen `origin`.
    pub fn dispatch(&mut self, origin: ScreenId, request: ApiRequest) {
        debug!("Dispatching {} for screen {}", request.label(), origin);
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.handle.spawn(async move {
            let response = execute(&client, request).await;
            if tx.send(Envelope { origin, response }).is_err() {
                // Receiver gone: the app is shutting down
                warn!("Dropping API response: dispatcher closed");
            }
        });
    }

    /// Take every envelope that has arrived so far, in completion order.
    pub fn drain(&mut self) -> Vec<Envelope> {
        let mut envelopes = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(envelope) => envelopes.push(envelope),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.in_flight = self.in_flight.saturating_sub(envelopes.len());
        envelopes
    }

    /// Block until the next envelope arrives or `timeout` elapses.
    pub fn recv_timeout(&mut self, timeout: std::time::Duration) -> Option<Envelope> {
        let envelope = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(envelope)
    }
}
