//! Shared helpers for the integration tests.
//!
//! `mount_restaurant` stands up a small restaurant backend on a wiremock
//! server: one waiter account, two categories, a few products, and the
//! order endpoints. Authenticated endpoints only answer when the bearer
//! token from the sign-in response is present.

#![allow(dead_code)]

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use std::time::Duration;
use tablepad::api::ApiClient;
use tablepad::config::Config;
use tablepad::dispatch::Dispatcher;
use tablepad::router::Router;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-123";
pub const EMAIL: &str = "quinn@bistro.io";
pub const PASSWORD: &str = "hunter2";
pub const ORDER_ID: &str = "o-1";

pub fn session_json() -> serde_json::Value {
    json!({ "id": "u1", "name": "Quinn", "email": EMAIL, "token": TOKEN })
}

/// Mount sign-in, menu and order endpoints.
pub async fn mount_restaurant(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session"))
        .and(body_json(json!({ "email": EMAIL, "password": PASSWORD })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Wrong email or password" })),
        )
        .with_priority(10)
        .mount(server)
        .await;

    mount_menu(server).await;

    Mock::given(method("POST"))
        .and(path("/order"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": ORDER_ID, "table": 4 })))
        .mount(server)
        .await;
}

/// Mount the authenticated menu endpoints only.
pub async fn mount_menu(server: &MockServer) {
    let auth = format!("Bearer {}", TOKEN);

    Mock::given(method("GET"))
        .and(path("/category"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Pizza" },
            { "id": "2", "name": "Drinks" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .and(query_param("category_id", "1"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "10", "name": "Margherita", "price": "42", "banner": "m.png" },
            { "id": "11", "name": "Calabresa", "price": "45", "banner": "c.png" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product"))
        .and(query_param("category_id", "2"))
        .and(header("authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "20", "name": "Soda" }
        ])))
        .mount(server)
        .await;
}

/// A client pointed at `server`, already holding the session token.
pub fn signed_in_client(server: &MockServer) -> ApiClient {
    let mut client = ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    client.set_token(Some(TOKEN.to_string()));
    client
}

/// Everything a router flow test needs. Field order matters for drop:
/// the router goes first, the runtime last.
pub struct Harness {
    pub router: Router,
    pub server: MockServer,
    pub runtime: Runtime,
}

impl Harness {
    /// Router at the sign-in screen, talking to a mock restaurant.
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            mount_restaurant(&server).await;
            server
        });
        Self::with_server(runtime, server)
    }

    pub fn with_server(runtime: Runtime, server: MockServer) -> Self {
        let mut config = Config::default();
        config.api.base_url = server.uri();
        let client = ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let dispatcher = Dispatcher::new(runtime.handle().clone(), client);
        let router = Router::new(config, dispatcher).unwrap();
        Self {
            router,
            server,
            runtime,
        }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn press(&mut self, code: KeyCode) {
        self.router
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Deliver every outstanding response.
    pub fn settle(&mut self) {
        self.router.wait_idle(Duration::from_secs(5)).unwrap();
        assert_eq!(self.router.in_flight(), 0, "requests still in flight");
    }

    pub fn sign_in(&mut self) {
        self.type_text(EMAIL);
        self.press(KeyCode::Tab);
        self.type_text(PASSWORD);
        self.press(KeyCode::Enter);
        self.settle();
    }

    /// Sign in and open table 4, landing on the order screen with the
    /// menu loaded.
    pub fn open_table(&mut self) {
        self.sign_in();
        self.type_text("4");
        self.press(KeyCode::Enter);
        self.settle();
    }

    pub fn toast_message(&self) -> Option<String> {
        self.router.toasts().current().map(|t| t.message.clone())
    }
}
