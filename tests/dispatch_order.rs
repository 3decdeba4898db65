//! The dispatcher hands results back in completion order, tagged with the
//! screen that asked.

mod common;

use common::{mount_menu, signed_in_client};
use std::time::Duration;
use tablepad::dispatch::{ApiRequest, ApiResponse, Dispatcher};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_fast_response_overtakes_slow_one() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        // Slow categories outrank the regular mock
        Mock::given(method("GET"))
            .and(path("/category"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .with_priority(1)
            .mount(&server)
            .await;
        mount_menu(&server).await;
        server
    });

    let mut dispatcher = Dispatcher::new(runtime.handle().clone(), signed_in_client(&server));
    dispatcher.dispatch(1, ApiRequest::ListCategories);
    dispatcher.dispatch(
        2,
        ApiRequest::ListProducts {
            category_id: "1".to_string(),
        },
    );
    assert_eq!(dispatcher.in_flight(), 2);

    let first = dispatcher.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(first.origin, 2);
    match first.response {
        ApiResponse::Products {
            category_id,
            result,
        } => {
            assert_eq!(category_id, "1");
            assert_eq!(result.unwrap().len(), 2);
        }
        other => panic!("expected products, got {:?}", other),
    }
    assert_eq!(dispatcher.in_flight(), 1);

    let second = dispatcher.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(second.origin, 1);
    assert!(matches!(second.response, ApiResponse::Categories(Ok(ref c)) if c.is_empty()));
    assert_eq!(dispatcher.in_flight(), 0);
    assert!(dispatcher.drain().is_empty());
}

#[test]
fn test_drain_collects_finished_requests() {
    let runtime = Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        mount_menu(&server).await;
        server
    });

    let mut dispatcher = Dispatcher::new(runtime.handle().clone(), signed_in_client(&server));
    dispatcher.dispatch(7, ApiRequest::ListCategories);

    // Give the request time to complete, then collect without blocking
    std::thread::sleep(Duration::from_millis(300));
    let mut envelopes = dispatcher.drain();
    if envelopes.is_empty() {
        envelopes.extend(dispatcher.recv_timeout(Duration::from_secs(5)));
    }
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].origin, 7);
    assert!(envelopes[0].response.error().is_none());
    assert_eq!(dispatcher.in_flight(), 0);
}
