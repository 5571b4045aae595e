pub mod client;
pub mod error;
pub mod models;

pub use client::*;
pub use error::*;
pub use models::*;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use serde_json::Value;

pub const HEALTH: &str = "/api/health";
pub const STRATEGIES: &str = "/api/strategies";
pub const START_STRATEGY: &str = "/api/strategies/start";
pub const ACCOUNT: &str = "/api/account";
pub const SETTINGS: &str = "/api/settings";
pub const RISK_ASSESSMENT: &str = "/api/risk/assessment";

pub fn analysis_path(symbol: &str) -> String {
    format!("/api/analysis/{}", symbol)
}

pub fn stop_strategy_path(strategy_id: &str) -> String {
    format!("/api/strategies/stop/{}", strategy_id)
}

/// Raw JSON access to the trading bot backend.
///
/// Decoding into view-models happens at the call site so that a single helper
/// can treat transport and decode failures the same way.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value>;
    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value>;
}
