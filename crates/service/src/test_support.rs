#![cfg(test)]
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::admin::WhopAdmin;
use crate::errors::UpstreamError;
use crate::whop::{CatalogReader, WhopTransport};
use crate::write_guard::WriteGuard;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport double: records every call and replays queued responses
/// (an empty queue answers `Ok(None)`).
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<Option<Value>, UpstreamError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, r: Result<Option<Value>, UpstreamError>) {
        self.responses.lock().unwrap().push_back(r);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WhopTransport for MockTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Option<Value>, UpstreamError> {
        self.calls.lock().unwrap().push(RecordedCall { method, path: path.to_string(), body });
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}

/// Catalog double returning fixed collections.
pub struct MockCatalog {
    pub access_passes: Value,
    pub plans: Value,
    pub fail_with: Option<String>,
    pub reads: AtomicUsize,
}

impl MockCatalog {
    pub fn new(access_passes: Value, plans: Value) -> Arc<Self> {
        Arc::new(Self { access_passes, plans, fail_with: None, reads: AtomicUsize::new(0) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            access_passes: Value::Null,
            plans: Value::Null,
            fail_with: Some(message.to_string()),
            reads: AtomicUsize::new(0),
        })
    }

    fn read(&self, v: &Value) -> Result<Value, UpstreamError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(m) => Err(UpstreamError::Network(m.clone())),
            None => Ok(v.clone()),
        }
    }
}

#[async_trait]
impl CatalogReader for MockCatalog {
    async fn list_access_passes(&self, _company_id: &str) -> Result<Value, UpstreamError> {
        self.read(&self.access_passes)
    }

    async fn list_plans(&self, _company_id: &str) -> Result<Value, UpstreamError> {
        self.read(&self.plans)
    }
}

pub fn admin_with(allow_writes: bool, rest: Arc<MockTransport>, catalog: Arc<MockCatalog>) -> WhopAdmin {
    WhopAdmin::new(WriteGuard::new(allow_writes), rest, catalog)
}
