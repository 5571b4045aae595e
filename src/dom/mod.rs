//! In-memory page model the dashboard renders into.
//!
//! Elements are addressed by id the way the page script addresses the DOM.
//! Each element carries text content, a class list and, for form inputs, a
//! value. The log container is a dedicated [`LogPanel`].

pub mod log;

pub use log::*;

use std::collections::BTreeMap;
use std::fmt;

pub mod ids {
    pub const APP_STATUS: &str = "appStatus";
    pub const BYBIT_STATUS: &str = "bybitStatus";
    pub const STRATEGIES_COUNT: &str = "strategiesCount";
    pub const ANALYSIS_RESULTS: &str = "analysisResults";
    pub const SETTINGS_CONTENT: &str = "settingsContent";
    pub const RISK_CONTENT: &str = "riskContent";
    pub const LOG_CONTAINER: &str = "logContainer";

    pub const STRATEGY_FORM: &str = "strategyForm";
    pub const STRATEGY_NAME: &str = "strategyName";
    pub const STRATEGY_SYMBOL: &str = "strategySymbol";
    pub const STRATEGY_TYPE: &str = "strategyType";
    pub const STRATEGY_VOLUME: &str = "strategyVolume";

    pub const STRATEGY_FORM_FIELDS: [&str; 4] =
        [STRATEGY_NAME, STRATEGY_SYMBOL, STRATEGY_TYPE, STRATEGY_VOLUME];

    /// Tab panels, each paired with a `<panel>Tab` button.
    pub const TAB_PANELS: [&str; 5] = ["status", "strategies", "analysis", "settings", "risk"];

    pub fn tab_button(panel: &str) -> String {
        format!("{}Tab", panel)
    }
}

pub mod classes {
    pub const TAB_CONTENT: &str = "tab-content";
    pub const TAB_BUTTON: &str = "tab-button";
    pub const ACTIVE: &str = "active";
    pub const STATUS_VALUE: &str = "status-value";
    pub const CONNECTED: &str = "connected";
    pub const DISCONNECTED: &str = "disconnected";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub text: String,
    pub value: String,
    classes: Vec<String>,
}

impl Element {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replaces the whole class list, like assigning `className`.
    pub fn set_class_name(&mut self, class_name: &str) {
        self.classes = class_name.split_whitespace().map(str::to_string).collect();
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

/// Log lines shown by the text view.
const LOG_ROWS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    log: LogPanel,
}

impl Document {
    pub fn new(policy: RetentionPolicy) -> Self {
        Self {
            elements: BTreeMap::new(),
            log: LogPanel::new(policy),
        }
    }

    /// The dashboard page with every element the controller reads or writes.
    /// The status tab starts active.
    pub fn dashboard(policy: RetentionPolicy) -> Self {
        let mut doc = Self::new(policy);

        for panel in ids::TAB_PANELS {
            doc.insert(Element::new(panel).with_class(classes::TAB_CONTENT));
            doc.insert(Element::new(&ids::tab_button(panel)).with_class(classes::TAB_BUTTON));
        }
        if let Some(panel) = doc.get_mut(ids::TAB_PANELS[0]) {
            panel.add_class(classes::ACTIVE);
        }
        if let Some(button) = doc.get_mut(&ids::tab_button(ids::TAB_PANELS[0])) {
            button.add_class(classes::ACTIVE);
        }

        for id in [ids::APP_STATUS, ids::BYBIT_STATUS] {
            let mut indicator = Element::new(id).with_class(classes::STATUS_VALUE);
            indicator.text = "-".to_string();
            doc.insert(indicator);
        }
        for id in [
            ids::STRATEGIES_COUNT,
            ids::ANALYSIS_RESULTS,
            ids::SETTINGS_CONTENT,
            ids::RISK_CONTENT,
            ids::LOG_CONTAINER,
            ids::STRATEGY_FORM,
        ] {
            doc.insert(Element::new(id));
        }
        for id in ids::STRATEGY_FORM_FIELDS {
            doc.insert(Element::new(id));
        }

        doc
    }

    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    #[cfg(test)]
    pub fn elements_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.values().filter(move |e| e.has_class(class))
    }

    pub fn elements_with_class_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> {
        self.elements.values_mut().filter(move |e| e.has_class(class))
    }

    /// Sets the text of an element; missing ids are ignored.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.text = text.into();
        }
    }

    #[cfg(test)]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        if let Some(element) = self.get_mut(id) {
            element.value = value.into();
        }
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.value.as_str())
    }

    pub fn reset_fields(&mut self, field_ids: &[&str]) {
        for id in field_ids {
            self.set_value(id, "");
        }
    }

    pub fn add_log(&mut self, message: impl Into<String>) {
        self.log.push(message);
    }

    #[cfg(test)]
    pub fn log(&self) -> &LogPanel {
        &self.log
    }

    /// Text view of a single region, used by the CLI.
    pub fn describe(&self, id: &str) -> Option<String> {
        self.get(id).map(|e| {
            let classes = e.class_name();
            if classes.is_empty() {
                format!("{}: {}", e.id, e.text)
            } else {
                format!("{} [{}]: {}", e.id, classes, e.text)
            }
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in [
            ids::APP_STATUS,
            ids::BYBIT_STATUS,
            ids::STRATEGIES_COUNT,
            ids::ANALYSIS_RESULTS,
            ids::SETTINGS_CONTENT,
            ids::RISK_CONTENT,
        ] {
            if let Some(line) = self.describe(id) {
                writeln!(f, "{}", line)?;
            }
        }
        writeln!(f, "{} ({} entries):", ids::LOG_CONTAINER, self.log.count())?;
        for line in self.log.window(LOG_ROWS) {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}
