use serde_json::Value;

use crate::api::{AnalysisResult, SystemStatus};
use crate::dom::{classes, ids, Document};

/// Formats a JSON value the way it reads on the page: strings without quotes,
/// whole numbers without a fractional part.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn status_class(ok: bool) -> String {
    let state = if ok { classes::CONNECTED } else { classes::DISCONNECTED };
    format!("{} {}", classes::STATUS_VALUE, state)
}

pub fn render_system_status(doc: &mut Document, status: &SystemStatus) {
    let running = status.is_running();
    if let Some(el) = doc.get_mut(ids::APP_STATUS) {
        el.text = (if running { "Running" } else { "Error" }).to_string();
        el.set_class_name(&status_class(running));
    }

    let connected = status.bybit_connected;
    if let Some(el) = doc.get_mut(ids::BYBIT_STATUS) {
        el.text = (if connected { "Connected" } else { "Disconnected" }).to_string();
        el.set_class_name(&status_class(connected));
    }
}

pub fn render_strategy_count(doc: &mut Document, count: usize) {
    doc.set_text(ids::STRATEGIES_COUNT, count.to_string());
}

pub fn render_analysis(doc: &mut Document, analysis: &AnalysisResult) {
    let levels = analysis
        .support_levels
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ");

    let block = [
        format!("Analysis {}", display_value(&analysis.symbol)),
        format!("RSI: {}", display_value(&analysis.rsi)),
        format!("Trend: {}", display_value(&analysis.trend)),
        format!("Support levels: {}", levels),
    ]
    .join("\n");

    doc.set_text(ids::ANALYSIS_RESULTS, block);
}

/// Heading followed by the payload pretty-printed with a two-space indent.
pub fn render_json_block(doc: &mut Document, id: &str, heading: &str, payload: &Value) {
    let body = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    doc.set_text(id, format!("{}\n{}", heading, body));
}
