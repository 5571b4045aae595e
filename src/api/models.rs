use serde::{Deserialize, Serialize};
use serde_json::Value;

const SUCCESS: &str = "success";

/// Snapshot returned by `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    #[serde(default)]
    pub bybit_connected: bool,
}

impl SystemStatus {
    pub fn is_running(&self) -> bool {
        self.status == "running"
    }
}

/// Only the number of records is ever shown, so they stay opaque.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyList {
    pub strategies: Vec<Value>,
}

impl StrategyList {
    pub fn count(&self) -> usize {
        self.strategies.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    pub symbol: Value,
    pub rsi: Value,
    pub trend: Value,
    pub support_levels: Vec<Value>,
}

/// Body of `POST /api/strategies/start`.
///
/// Values are forwarded exactly as entered. A volume that did not parse is NaN
/// and goes over the wire as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyConfig {
    pub name: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub strategy_type: String,
    pub volume: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartStrategyResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub strategy_id: Option<Value>,
}

impl StartStrategyResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopStrategyResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StopStrategyResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }
}
