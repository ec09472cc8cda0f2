#![allow(dead_code)]

use async_trait::async_trait;
use lazy_static::lazy_static;
use portfolio_api::configuration::Settings;
use portfolio_api::connectors::{ChatBackend, ChatBackendFactory, ConnectorError, Prediction};
use portfolio_api::forms::chat::HistoryMessage;
use portfolio_api::models::HistoryPair;
use portfolio_api::services::ChatService;
use portfolio_api::telemetry::{get_subscriber, init_subscriber};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

lazy_static! {
    // Set TEST_LOG to see the server logs while running tests.
    static ref TRACING: () = {
        let name = "test".to_string();
        let filter = "debug".to_string();
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(get_subscriber(name, filter, std::io::stdout));
        } else {
            init_subscriber(get_subscriber(name, filter, std::io::sink));
        }
    };
}

pub enum Behavior {
    Reply(String),
    ReplyWithHistory(String, Vec<HistoryPair>),
    NoReply,
    Fail(String),
}

/// Remote chat stand-in that records what it was asked.
pub struct StubBackend {
    behavior: Behavior,
    calls: AtomicUsize,
    received: Mutex<Vec<(String, Vec<HistoryMessage>)>>,
}

impl StubBackend {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(reply: &str) -> Arc<Self> {
        Self::new(Behavior::Reply(reply.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<(String, Vec<HistoryMessage>)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for StubBackend {
    async fn predict(
        &self,
        message: &str,
        history: &[HistoryMessage],
    ) -> Result<Prediction, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap()
            .push((message.to_string(), history.to_vec()));

        match &self.behavior {
            Behavior::Reply(reply) => Ok(Prediction {
                reply: Some(reply.clone()),
                history: vec![],
            }),
            Behavior::ReplyWithHistory(reply, history) => Ok(Prediction {
                reply: Some(reply.clone()),
                history: history.clone(),
            }),
            Behavior::NoReply => Ok(Prediction::default()),
            Behavior::Fail(message) => Err(ConnectorError::Remote(message.clone())),
        }
    }
}

/// Hands out the same backend, failing the first `failures` attempts.
pub struct StubFactory {
    backend: Arc<StubBackend>,
    failures: usize,
    connects: AtomicUsize,
}

impl StubFactory {
    pub fn new(backend: Arc<StubBackend>) -> Arc<Self> {
        Self::failing_first(backend, 0)
    }

    pub fn failing_first(backend: Arc<StubBackend>, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            backend,
            failures,
            connects: AtomicUsize::new(0),
        })
    }

    /// Remote that can never be reached.
    pub fn unreachable() -> Arc<Self> {
        Self::failing_first(StubBackend::new(Behavior::NoReply), usize::MAX)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackendFactory for StubFactory {
    async fn connect(&self) -> Result<Arc<dyn ChatBackend>, ConnectorError> {
        let attempt = self.connects.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(ConnectorError::ServiceUnavailable(
                "Connection failed: space unreachable".to_string(),
            ));
        }
        Ok(self.backend.clone())
    }
}

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_chat(&self, body: serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/chat", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app_with(factory: Arc<dyn ChatBackendFactory>) -> TestApp {
    lazy_static::initialize(&TRACING);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = Settings::default();
    let server = portfolio_api::startup::run(listener, settings, ChatService::new(factory))
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        api_client: reqwest::Client::new(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(StubFactory::new(StubBackend::replying("hi there"))).await
}
