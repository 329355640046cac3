//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::net::TcpListener;

use platform_request_service::http::HttpServer;
use platform_request_service::processor::RequestProcessor;
use platform_request_service::storage::RequestRepository;

/// Boot the full service on an ephemeral port with a scratch database.
///
/// Returns the bound address, a repository handle onto the same database for
/// asserting on persisted state, and the TempDir guard keeping the database
/// file alive. The server task dies with the test runtime.
pub async fn start_service() -> (SocketAddr, RequestRepository, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("requests.db");
    let db_path = db_path.to_str().unwrap().to_string();

    let repository = RequestRepository::new(&db_path).await.unwrap();
    let processor = Arc::new(RequestProcessor::new(repository.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(processor);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    (addr, repository, dir)
}

/// Non-pooled client for test stability across many short-lived servers.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
