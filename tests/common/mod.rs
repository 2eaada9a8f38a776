//! Shared test transports: scripted (ordered) and routed (stateless)
//! in-memory implementations of the transport contract.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use pexels_rs::transport::{Transport, TransportError, TransportResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// One scripted transport outcome.
pub enum Step {
    Json {
        status: u16,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
    },
    ConnectError(String),
}

impl Step {
    pub fn ok(body: serde_json::Value) -> Self {
        Step::Json {
            status: 200,
            headers: Vec::new(),
            body,
        }
    }

    pub fn status(status: u16, body: serde_json::Value) -> Self {
        Step::Json {
            status,
            headers: Vec::new(),
            body,
        }
    }

    pub fn rate_limited(retry_after: Option<&str>) -> Self {
        let mut headers = Vec::new();
        if let Some(value) = retry_after {
            headers.push(("Retry-After".to_string(), value.to_string()));
        }
        Step::Json {
            status: 429,
            headers,
            body: serde_json::json!({"error": "Rate limit exceeded"}),
        }
    }

    fn into_result(self) -> Result<TransportResponse, TransportError> {
        match self {
            Step::Json {
                status,
                headers,
                body,
            } => Ok(TransportResponse {
                status,
                headers: headers.into_iter().collect(),
                body: Bytes::from(body.to_string()),
            }),
            Step::ConnectError(msg) => Err(TransportError::Other(msg)),
        }
    }
}

/// A transport call observed by a fake.
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub at: Instant,
}

impl Call {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays a fixed sequence of outcomes, one per call, in order.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(
        &self,
        _method: &str,
        path: &str,
        query: &[(String, String)],
        _headers: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            query: query.to_vec(),
            at: Instant::now(),
        });
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Step::ConnectError("script exhausted".to_string()));
        step.into_result()
    }
}

type RouteFn = dyn Fn(&str, &HashMap<String, String>) -> Step + Send + Sync;

/// Computes a response from path and query on every call; stateless, so it
/// suits pagination and concurrency tests.
pub struct RouteTransport {
    route: Box<RouteFn>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RouteTransport {
    pub fn new<F>(route: F) -> Arc<Self>
    where
        F: Fn(&str, &HashMap<String, String>) -> Step + Send + Sync + 'static,
    {
        Arc::new(Self {
            route: Box::new(route),
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RouteTransport {
    async fn call(
        &self,
        _method: &str,
        path: &str,
        query: &[(String, String)],
        _headers: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            query: query.to_vec(),
            at: Instant::now(),
        });
        let query_map: HashMap<String, String> = query.iter().cloned().collect();
        (self.route)(path, &query_map).into_result()
    }
}

/// A photo search page of `count` items with ids starting at `first_id`.
pub fn photo_page(
    page: u32,
    per_page: u32,
    count: usize,
    first_id: u64,
    total: u64,
    has_next: bool,
) -> serde_json::Value {
    let photos: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": first_id + i as u64,
                "url": format!("https://example.com/photo/{}", first_id + i as u64),
                "photographer": "Test Photographer"
            })
        })
        .collect();
    let mut body = serde_json::json!({
        "photos": photos,
        "page": page,
        "per_page": per_page,
        "total_results": total,
    });
    if has_next {
        body["next_page"] =
            serde_json::json!(format!("https://api.pexels.com/v1/search?page={}", page + 1));
    }
    body
}
