//! End-to-end flows through the router against a mock restaurant API.

mod common;

use common::{Harness, ORDER_ID, TOKEN};
use crossterm::event::KeyCode;
use serde_json::json;
use tablepad::widgets::ToastVariant;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_take_and_send_an_order() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("POST"))
            .and(path("/order/add"))
            .and(body_json(
                json!({ "order_id": ORDER_ID, "product_id": "10", "amount": 2 }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "100" })))
            .expect(1),
    );
    h.mount(
        Mock::given(method("PUT"))
            .and(path("/order/send"))
            .and(body_json(json!({ "order_id": ORDER_ID })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );

    h.sign_in();
    assert_eq!(h.router.screen_names(), vec!["dashboard"]);
    assert_eq!(h.toast_message().as_deref(), Some("Welcome, Quinn"));
    assert!(h.router.auth().is_signed_in());

    h.type_text("4");
    h.press(KeyCode::Enter);
    h.settle();
    assert_eq!(h.router.screen_names(), vec!["dashboard", "order"]);

    // Amount defaults to 1; make it 2
    h.press(KeyCode::Backspace);
    h.type_text("2");
    h.press(KeyCode::Char('a'));
    h.settle();
    assert_eq!(h.toast_message().as_deref(), Some("Added 2 × Margherita"));

    h.press(KeyCode::Char('f'));
    assert_eq!(
        h.router.screen_names(),
        vec!["dashboard", "order", "finish-order"]
    );

    h.press(KeyCode::Enter);
    h.settle();
    assert_eq!(h.router.screen_names(), vec!["dashboard"]);
    let toast = h.router.toasts().current().unwrap();
    assert_eq!(toast.message, "Order for table 4 sent");
    assert_eq!(toast.variant, ToastVariant::Success);

    h.runtime.block_on(h.server.verify());
}

#[test]
fn test_close_empty_order_returns_to_dashboard() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("DELETE"))
            .and(path("/order"))
            .and(query_param("order_id", ORDER_ID))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );

    h.open_table();
    assert_eq!(h.router.current_screen(), Some("order"));

    h.press(KeyCode::Char('x'));
    h.settle();
    assert_eq!(h.router.screen_names(), vec!["dashboard"]);
    assert_eq!(h.toast_message().as_deref(), Some("Table 4 closed"));

    h.runtime.block_on(h.server.verify());
}

#[test]
fn test_escape_keeps_order_on_server() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("DELETE"))
            .and(path("/order"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0),
    );

    h.open_table();
    // Open and dismiss the category picker, then leave the screen
    h.press(KeyCode::Char('c'));
    h.press(KeyCode::Esc);
    assert_eq!(h.router.current_screen(), Some("order"));
    h.press(KeyCode::Esc);
    assert_eq!(h.router.screen_names(), vec!["dashboard"]);
    assert_eq!(h.router.in_flight(), 0);

    h.runtime.block_on(h.server.verify());
}

#[test]
fn test_delete_item_then_close() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("POST"))
            .and(path("/order/add"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "100" }))),
    );
    h.mount(
        Mock::given(method("DELETE"))
            .and(path("/item"))
            .and(query_param("item_id", "100"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );
    h.mount(
        Mock::given(method("DELETE"))
            .and(path("/order"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1),
    );

    h.open_table();
    h.press(KeyCode::Char('a'));
    h.settle();

    // Items block closing
    h.press(KeyCode::Char('x'));
    assert_eq!(h.router.in_flight(), 0);
    assert_eq!(
        h.toast_message().as_deref(),
        Some("Remove all items before closing the order")
    );

    h.press(KeyCode::Char('d'));
    h.settle();
    h.press(KeyCode::Char('x'));
    h.settle();
    assert_eq!(h.router.screen_names(), vec!["dashboard"]);

    h.runtime.block_on(h.server.verify());
}

#[test]
fn test_failed_add_keeps_order_open() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("POST"))
            .and(path("/order/add"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Kitchen is closed" })),
            ),
    );

    h.open_table();
    h.press(KeyCode::Char('a'));
    h.settle();

    assert_eq!(h.router.current_screen(), Some("order"));
    let toast = h.router.toasts().current().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.message.contains("Kitchen is closed"), "{}", toast.message);

    // Nothing was added, so finishing is refused
    h.press(KeyCode::Char('f'));
    assert_eq!(h.router.current_screen(), Some("order"));
}

#[test]
fn test_wrong_password_stays_on_sign_in() {
    let mut h = Harness::start();

    h.type_text("quinn@bistro.io");
    h.press(KeyCode::Tab);
    h.type_text("nope");
    h.press(KeyCode::Enter);
    h.settle();

    assert_eq!(h.router.screen_names(), vec!["sign-in"]);
    assert!(!h.router.auth().is_signed_in());
    assert!(!h.router.auth().is_loading());
    let message = h.toast_message().unwrap();
    assert!(message.contains("Wrong email or password"), "{}", message);
}

#[test]
fn test_empty_credentials_send_nothing() {
    let mut h = Harness::start();
    h.mount(
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .expect(0),
    );

    h.press(KeyCode::Enter);
    assert_eq!(h.router.in_flight(), 0);
    assert_eq!(
        h.toast_message().as_deref(),
        Some("Enter your email and password")
    );

    h.runtime.block_on(h.server.verify());
}

#[test]
fn test_rejected_session_returns_to_sign_in() {
    let mut h = Harness::start();
    // Outranks the working category mock
    h.mount(
        Mock::given(method("GET"))
            .and(path("/category"))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(1),
    );

    h.sign_in();
    h.type_text("4");
    h.press(KeyCode::Enter);
    h.settle();

    assert_eq!(h.router.screen_names(), vec!["sign-in"]);
    assert!(!h.router.auth().is_signed_in());
    assert_eq!(
        h.toast_message().as_deref(),
        Some("Session expired, please sign in again")
    );
}

#[test]
fn test_sign_out_clears_session() {
    let mut h = Harness::start();
    h.sign_in();

    h.router
        .handle_event(crossterm::event::Event::Key(
            crossterm::event::KeyEvent::new(
                KeyCode::Char('l'),
                crossterm::event::KeyModifiers::CONTROL,
            ),
        ))
        .unwrap();

    assert_eq!(h.router.screen_names(), vec!["sign-in"]);
    assert!(!h.router.auth().is_signed_in());
    assert_eq!(h.toast_message().as_deref(), Some("Signed out"));
}

#[test]
fn test_quit_from_sign_in() {
    let mut h = Harness::start();
    h.router
        .handle_event(crossterm::event::Event::Key(
            crossterm::event::KeyEvent::new(
                KeyCode::Char('c'),
                crossterm::event::KeyModifiers::CONTROL,
            ),
        ))
        .unwrap();
    assert!(h.router.should_quit());
}
