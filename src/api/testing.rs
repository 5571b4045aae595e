//! Scripted in-process backend for controller tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ApiError, BackendApi, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<HashMap<String, std::result::Result<Value, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.responses.lock().unwrap().insert(path.to_string(), Ok(body));
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Err(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.path == path).count()
    }

    fn answer(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        match self.responses.lock().unwrap().get(path) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(ApiError::Transport(message.clone())),
            None => Err(ApiError::Transport(format!("no response scripted for {}", path))),
        }
    }
}

#[async_trait]
impl BackendApi for ScriptedBackend {
    async fn get(&self, path: &str) -> Result<Value> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.answer("POST", path, body)
    }
}
