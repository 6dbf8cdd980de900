//! Mock-server startup guard for sandboxed environments.
//!
//! Some CI sandboxes forbid binding local sockets entirely. Tests that need
//! a mock server call [`start_mock_server_or_skip`] and return early when
//! the environment cannot provide one.

use std::net::TcpListener;

use wiremock::MockServer;

/// Starts a wiremock server, or returns `None` when the environment cannot
/// bind local sockets (the caller should skip its test).
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("skipping test: cannot bind local sockets ({error})");
            return None;
        }
    };
    Some(MockServer::builder().listener(listener).start().await)
}
