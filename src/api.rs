//! Restaurant API client.
//!
//! Thin wrapper over `reqwest` for the handful of endpoints the order pad
//! talks to. Every call returns `Result<_, ApiError>`; nothing is swallowed
//! here, the screens decide how to surface failures.

use crate::error::ApiError;
use crate::models::{
    AddItemRequest, Category, Credentials, ItemReceipt, OpenOrderRequest, OpenedOrder,
    OrderTicket, Product, Session,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Normalise a server URL:
/// - ensure a scheme is present (http for localhost, https otherwise)
/// - strip trailing slashes
pub fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
            url = format!("http://{url}");
        } else {
            url = format!("https://{url}");
        }
    }

    while url.ends_with('/') {
        url.pop();
    }

    url
}

#[derive(Serialize)]
struct SendOrderBody<'a> {
    order_id: &'a str,
}

/// HTTP client for the restaurant API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted, so
/// each in-flight request gets its own clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|_| ApiError::InvalidUrl(base_url.clone()))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tablepad/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// The normalised base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set (or clear) the bearer token sent with every request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn url_with_query(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let url = self.url(path);
        Url::parse_with_params(&url, params).map_err(|_| ApiError::InvalidUrl(url))
    }

    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        label: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(builder, label).await?;
        response.json::<T>().await.map_err(|e| {
            warn!("{} returned an unexpected body: {}", label, e);
            ApiError::Decode(e.to_string())
        })
    }

    /// Send a request, checking the status and ignoring the body.
    async fn send_empty(&self, builder: RequestBuilder, label: &str) -> Result<(), ApiError> {
        self.send(builder, label).await.map(|_| ())
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        label: &str,
    ) -> Result<reqwest::Response, ApiError> {
        debug!("API request: {}", label);

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&self.base_url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} failed with {}: {}", label, status, body);
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        debug!("API response: {} -> {}", label, status);
        Ok(response)
    }

    /// `POST /session`
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        info!("Signing in as {}", credentials.email);
        let builder = self
            .request(Method::POST, self.url("/session"))
            .json(credentials);
        self.send_json(builder, "POST /session").await
    }

    /// `POST /order`: open an order for a table.
    pub async fn open_order(
        &self,
        table: u32,
        name: Option<String>,
    ) -> Result<OrderTicket, ApiError> {
        let body = OpenOrderRequest { table, name };
        let builder = self.request(Method::POST, self.url("/order")).json(&body);
        let opened: OpenedOrder = self.send_json(builder, "POST /order").await?;
        info!("Opened order {} for table {}", opened.id, opened.table);
        Ok(opened.into())
    }

    /// `GET /category`
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let builder = self.request(Method::GET, self.url("/category"));
        self.send_json(builder, "GET /category").await
    }

    /// `GET /product?category_id=...`
    pub async fn list_products(&self, category_id: &str) -> Result<Vec<Product>, ApiError> {
        let url = self.url_with_query("/product", &[("category_id", category_id)])?;
        let builder = self.request(Method::GET, url);
        self.send_json(builder, "GET /product").await
    }

    /// `POST /order/add`
    pub async fn add_item(&self, request: &AddItemRequest) -> Result<ItemReceipt, ApiError> {
        let builder = self
            .request(Method::POST, self.url("/order/add"))
            .json(request);
        self.send_json(builder, "POST /order/add").await
    }

    /// `DELETE /item?item_id=...`
    pub async fn delete_item(&self, item_id: &str) -> Result<(), ApiError> {
        let url = self.url_with_query("/item", &[("item_id", item_id)])?;
        self.send_empty(self.request(Method::DELETE, url), "DELETE /item")
            .await
    }

    /// `DELETE /order?order_id=...`: discard an order that has no items.
    pub async fn close_order(&self, order_id: &str) -> Result<(), ApiError> {
        let url = self.url_with_query("/order", &[("order_id", order_id)])?;
        self.send_empty(self.request(Method::DELETE, url), "DELETE /order")
            .await
    }

    /// `PUT /order/send`: hand the order over to the kitchen.
    pub async fn send_order(&self, order_id: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, self.url("/order/send"))
            .json(&SendOrderBody { order_id });
        self.send_empty(builder, "PUT /order/send").await
    }
}
