//! Shared helpers for the integration tests: a mock GSTAI service built on
//! an axum router bound to an ephemeral port.

use axum::Router;
use gstai::{Client, Config};
use std::sync::{Arc, Mutex};

/// Serve `router` on 127.0.0.1:0 and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock");
    });
    format!("http://{}", addr)
}

/// Client wired to a mock server, with a short timeout so transport
/// failures surface quickly
pub fn client_for(base_url: &str) -> Client {
    Client::with_config(
        Config::new("sk_test_integration")
            .with_base_url(base_url)
            .with_timeout(std::time::Duration::from_secs(2))
            .with_upload_timeout(std::time::Duration::from_secs(2)),
    )
    .expect("build client")
}

/// Thread-safe capture slot the mock handlers write into
pub type Captured<T> = Arc<Mutex<Option<T>>>;

pub fn capture<T>() -> Captured<T> {
    Arc::new(Mutex::new(None))
}
