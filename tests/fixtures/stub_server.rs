//! Loopback axum server answering with canned responses.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tracing::warn;

/// A request as seen by the stub.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub target: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    /// Delay before answering, for timeout tests.
    pub delay: Duration,
}

impl CannedResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Default)]
struct StubState {
    responses: Arc<Mutex<VecDeque<CannedResponse>>>,
    captured: Arc<Mutex<VecDeque<Captured>>>,
}

pub struct StubServer {
    pub base_url: String,
    state: StubState,
    runtime: Option<Runtime>,
}

impl StubServer {
    /// Serves `responses` in order, one per request on any path. Requests
    /// past the end get a 503.
    pub fn start(responses: Vec<CannedResponse>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("stub runtime");

        let state = StubState {
            responses: Arc::new(Mutex::new(responses.into())),
            ..StubState::default()
        };

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .expect("bind loopback listener");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let app = Router::new().fallback(answer).with_state(state.clone());
        runtime.spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!(error = %err, "stub server stopped");
            }
        });

        Self {
            base_url,
            state,
            runtime: Some(runtime),
        }
    }

    /// Oldest request not yet taken. Requests are recorded before the
    /// response is written, so a completed client call is always visible.
    pub fn next_request(&self) -> Option<Captured> {
        self.state.captured.lock().expect("captured requests").pop_front()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn answer(State(state): State<StubState>, method: Method, uri: Uri, body: String) -> Response {
    state.captured.lock().expect("captured requests").push_back(Captured {
        method: method.to_string(),
        target: uri.to_string(),
        body,
    });

    let next = state.responses.lock().expect("canned responses").pop_front();
    let Some(canned) = next else {
        return (StatusCode::SERVICE_UNAVAILABLE, "no canned response left").into_response();
    };

    tokio::time::sleep(canned.delay).await;
    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], canned.body).into_response()
}
