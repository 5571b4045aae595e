use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::api::{
    self, AnalysisResult, ApiError, BackendApi, StartStrategyResponse, StopStrategyResponse,
    StrategyList, SystemStatus,
};
use crate::dom::{ids, Document};

use super::form::read_strategy_form;
use super::render::{
    display_value, render_analysis, render_json_block, render_strategy_count, render_system_status,
};
use super::tabs;

pub const DEFAULT_ANALYSIS_SYMBOL: &str = "BTCUSDT";

enum Request {
    Get(String),
    Post(String, Option<Value>),
}

impl Request {
    fn path(&self) -> &str {
        match self {
            Request::Get(path) | Request::Post(path, _) => path,
        }
    }
}

/// Drives every dashboard operation against the backend and renders the
/// results into a shared [`Document`].
///
/// Operations are independent: each one writes only its own region and the
/// log panel, and a failure never escapes past the log.
#[derive(Clone)]
pub struct DashboardController {
    api: Arc<dyn BackendApi>,
    document: Arc<RwLock<Document>>,
    analysis_symbol: String,
}

impl DashboardController {
    pub fn new(api: Arc<dyn BackendApi>, document: Document) -> Self {
        Self {
            api,
            document: Arc::new(RwLock::new(document)),
            analysis_symbol: DEFAULT_ANALYSIS_SYMBOL.to_string(),
        }
    }

    pub fn with_analysis_symbol(mut self, symbol: &str) -> Self {
        self.analysis_symbol = symbol.to_string();
        self
    }

    pub fn document(&self) -> Arc<RwLock<Document>> {
        Arc::clone(&self.document)
    }

    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }

    pub async fn add_log(&self, message: impl Into<String>) {
        self.document.write().await.add_log(message);
    }

    /// Logs `started`, performs the request, decodes the body into `T` and
    /// hands it to `render`. Transport and decode failures end up as a single
    /// `"<failed>: <message>"` log entry and leave the document untouched.
    async fn fetch_and_render<T, O, F>(
        &self,
        request: Request,
        started: &str,
        failed: &str,
        render: F,
    ) -> Option<O>
    where
        T: DeserializeOwned,
        F: FnOnce(&mut Document, T) -> O,
    {
        self.add_log(started).await;
        debug!("Dashboard request {}", request.path());

        let result = match request {
            Request::Get(path) => self.api.get(&path).await,
            Request::Post(path, body) => self.api.post(&path, body).await,
        }
        .and_then(|raw| serde_json::from_value::<T>(raw).map_err(ApiError::from));

        let mut doc = self.document.write().await;
        match result {
            Ok(data) => Some(render(&mut doc, data)),
            Err(e) => {
                warn!("{}: {}", failed, e);
                doc.add_log(format!("{}: {}", failed, e));
                None
            }
        }
    }

    pub async fn open_tab(&self, tab_name: &str, trigger: &str) {
        let mut doc = self.document.write().await;
        tabs::open_tab(&mut doc, tab_name, trigger);
    }

    pub async fn check_health(&self) {
        self.fetch_and_render(
            Request::Get(api::HEALTH.to_string()),
            "Requesting system status...",
            "Status check failed",
            |doc, status: SystemStatus| {
                render_system_status(doc, &status);
                doc.add_log("System status received");
            },
        )
        .await;
    }

    pub async fn get_strategies(&self) {
        self.fetch_and_render(
            Request::Get(api::STRATEGIES.to_string()),
            "Requesting strategy list...",
            "Failed to fetch strategies",
            |doc, list: StrategyList| {
                render_strategy_count(doc, list.count());
                doc.add_log(format!("Strategy list received: {} active", list.count()));
            },
        )
        .await;
    }

    pub async fn get_account_info(&self) {
        self.fetch_and_render(
            Request::Get(api::ACCOUNT.to_string()),
            "Requesting account info...",
            "Failed to fetch account info",
            |doc, _account: Value| {
                doc.add_log("Account info received");
            },
        )
        .await;
    }

    pub async fn get_technical_analysis(&self) {
        self.fetch_and_render(
            Request::Get(api::analysis_path(&self.analysis_symbol)),
            "Requesting technical analysis...",
            "Failed to fetch technical analysis",
            |doc, analysis: AnalysisResult| {
                render_analysis(doc, &analysis);
                doc.add_log("Technical analysis received");
            },
        )
        .await;
    }

    pub async fn load_settings(&self) {
        self.fetch_and_render(
            Request::Get(api::SETTINGS.to_string()),
            "Loading settings...",
            "Failed to load settings",
            |doc, settings: Value| {
                render_json_block(doc, ids::SETTINGS_CONTENT, "Current settings", &settings);
                doc.add_log("Settings loaded");
            },
        )
        .await;
    }

    pub async fn get_risk_assessment(&self) {
        self.fetch_and_render(
            Request::Get(api::RISK_ASSESSMENT.to_string()),
            "Requesting risk assessment...",
            "Failed to fetch risk assessment",
            |doc, assessment: Value| {
                render_json_block(doc, ids::RISK_CONTENT, "Risk assessment", &assessment);
                doc.add_log("Risk assessment received");
            },
        )
        .await;
    }

    /// Posts the strategy form. On success the form is cleared and the
    /// strategy count refreshed; any other status only gets a generic entry.
    pub async fn submit_strategy(&self) {
        let config = read_strategy_form(&*self.document.read().await);

        let body = match serde_json::to_value(&config) {
            Ok(body) => body,
            Err(e) => {
                self.add_log(format!("Failed to start strategy: {}", e)).await;
                return;
            }
        };

        let started = self
            .fetch_and_render(
                Request::Post(api::START_STRATEGY.to_string(), Some(body)),
                &format!("Starting strategy: {}", config.name),
                "Failed to start strategy",
                |doc, resp: StartStrategyResponse| {
                    if !resp.is_success() {
                        doc.add_log("Failed to start strategy");
                        return false;
                    }
                    let id = resp
                        .strategy_id
                        .as_ref()
                        .map(display_value)
                        .unwrap_or_else(|| "unknown".to_string());
                    doc.add_log(format!("Strategy started with ID: {}", id));
                    doc.reset_fields(&ids::STRATEGY_FORM_FIELDS);
                    true
                },
            )
            .await;

        if started == Some(true) {
            self.get_strategies().await;
        }
    }

    pub async fn stop_strategy(&self, strategy_id: &str) {
        let stopped = self
            .fetch_and_render(
                Request::Post(api::stop_strategy_path(strategy_id), None),
                &format!("Stopping strategy: {}", strategy_id),
                "Failed to stop strategy",
                |doc, resp: StopStrategyResponse| {
                    if !resp.is_success() {
                        doc.add_log("Failed to stop strategy");
                        return false;
                    }
                    let message = resp
                        .message
                        .unwrap_or_else(|| format!("Strategy {} stopped", strategy_id));
                    doc.add_log(message);
                    true
                },
            )
            .await;

        if stopped == Some(true) {
            self.get_strategies().await;
        }
    }

    /// Initial page load: status and strategies are fetched side by side.
    pub async fn load(&self) {
        tokio::join!(self.check_health(), self.get_strategies());
        self.add_log("Dashboard loaded").await;
    }
}
