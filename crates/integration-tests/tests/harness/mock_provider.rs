//! Mock CEP providers for integration tests
//!
//! Serves either the `BrasilAPI` or the `ViaCEP` route and body shape, with
//! configurable latency, status and payload. Each mock counts the lookups it
//! answered and the ones dropped because the client hung up first

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Which provider the mock imitates
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    BrasilApi,
    ViaCep,
}

/// What the mock answers with
#[derive(Debug, Clone)]
enum Reply {
    /// Provider-shaped address for the requested CEP
    Address,
    /// Provider-specific "unknown CEP" answer
    NotFound,
    /// Arbitrary status with a JSON error body
    Status(u16),
    /// 200 with a body that is not JSON
    Garbage,
}

/// Builder for a mock provider
pub struct MockProviderBuilder {
    shape: Shape,
    delay: Duration,
    reply: Reply,
}

impl MockProviderBuilder {
    /// Wait this long before answering
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    /// Answer with the provider's not-found convention
    pub fn not_found(mut self) -> Self {
        self.reply = Reply::NotFound;
        self
    }

    /// Answer with an error status
    pub fn failing_with(mut self, status: u16) -> Self {
        self.reply = Reply::Status(status);
        self
    }

    /// Answer 200 with an undecodable body
    pub fn garbage(mut self) -> Self {
        self.reply = Reply::Garbage;
        self
    }

    pub async fn start(self) -> anyhow::Result<MockProvider> {
        let state = Arc::new(MockState {
            shape: self.shape,
            delay: self.delay,
            reply: self.reply,
            request_count: AtomicU32::new(0),
            completed_count: AtomicU32::new(0),
            abandoned_count: AtomicU32::new(0),
            last_cep: Mutex::new(None),
        });

        let route = match self.shape {
            Shape::BrasilApi => "/api/cep/v1/{cep}",
            Shape::ViaCep => "/ws/{cep}/json/",
        };

        let app = Router::new()
            .route(route, routing::get(handle_lookup))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockProvider { addr, shutdown, state })
    }
}

/// Running mock provider
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    shape: Shape,
    delay: Duration,
    reply: Reply,
    request_count: AtomicU32,
    completed_count: AtomicU32,
    abandoned_count: AtomicU32,
    last_cep: Mutex<Option<String>>,
}

impl MockProvider {
    /// Mock speaking the `BrasilAPI` shape
    pub fn brasil_api() -> MockProviderBuilder {
        MockProviderBuilder {
            shape: Shape::BrasilApi,
            delay: Duration::ZERO,
            reply: Reply::Address,
        }
    }

    /// Mock speaking the `ViaCEP` shape
    pub fn via_cep() -> MockProviderBuilder {
        MockProviderBuilder {
            shape: Shape::ViaCep,
            delay: Duration::ZERO,
            reply: Reply::Address,
        }
    }

    /// URL template pointing at this mock
    pub fn url_template(&self) -> String {
        match self.state.shape {
            Shape::BrasilApi => format!("http://{}/api/cep/v1/{{cep}}", self.addr),
            Shape::ViaCep => format!("http://{}/ws/{{cep}}/json/", self.addr),
        }
    }

    /// Number of lookups received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// Number of lookups that ran to completion
    pub fn completed_count(&self) -> u32 {
        self.state.completed_count.load(Ordering::Relaxed)
    }

    /// Number of lookups dropped by the server before answering, because
    /// the client went away
    pub fn abandoned_count(&self) -> u32 {
        self.state.abandoned_count.load(Ordering::Relaxed)
    }

    /// Wait until at least `count` lookups were abandoned, or `timeout` passes
    pub async fn wait_for_abandoned(&self, count: u32, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;

        while self.abandoned_count() < count {
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        true
    }

    /// CEP path segment of the most recent lookup
    pub fn last_cep(&self) -> Option<String> {
        self.state.last_cep.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Address every mock reports, keyed by whatever CEP was asked for
pub const STREET: &str = "Avenida Paulista";
pub const NEIGHBORHOOD: &str = "Bela Vista";
pub const CITY: &str = "São Paulo";
pub const STATE: &str = "SP";

/// Counts the handler as abandoned if its future is dropped before answering
struct InFlight {
    state: Arc<MockState>,
    answered: bool,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let counter = if self.answered {
            &self.state.completed_count
        } else {
            &self.state.abandoned_count
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

async fn handle_lookup(State(state): State<Arc<MockState>>, Path(cep): Path<String>) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    *state.last_cep.lock().unwrap() = Some(cep.clone());

    let mut in_flight = InFlight {
        state: Arc::clone(&state),
        answered: false,
    };

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    in_flight.answered = true;
    drop(in_flight);

    match (&state.reply, state.shape) {
        (Reply::Address, Shape::BrasilApi) => Json(serde_json::json!({
            "cep": cep,
            "state": STATE,
            "city": CITY,
            "neighborhood": NEIGHBORHOOD,
            "street": STREET,
            "service": "mock",
        }))
        .into_response(),
        (Reply::Address, Shape::ViaCep) => Json(serde_json::json!({
            "cep": hyphenate(&cep),
            "logradouro": STREET,
            "complemento": "",
            "bairro": NEIGHBORHOOD,
            "localidade": CITY,
            "uf": STATE,
            "ibge": "3550308",
        }))
        .into_response(),
        (Reply::NotFound, Shape::BrasilApi) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "name": "CepPromiseError",
                "message": "Todos os serviços de CEP retornaram erro.",
                "type": "service_error",
            })),
        )
            .into_response(),
        (Reply::NotFound, Shape::ViaCep) => Json(serde_json::json!({ "erro": true })).into_response(),
        (Reply::Status(status), _) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(serde_json::json!({ "message": "mock provider intentional failure" })),
        )
            .into_response(),
        (Reply::Garbage, _) => "<html>maintenance</html>".into_response(),
    }
}

/// `01310100` -> `01310-100`, the way `ViaCEP` formats its `cep` field
fn hyphenate(cep: &str) -> String {
    if cep.len() == 8 && cep.is_char_boundary(5) {
        format!("{}-{}", &cep[..5], &cep[5..])
    } else {
        cep.to_owned()
    }
}
