use tracing::debug;

use crate::dom::{classes, Document};

/// Shows the panel `tab_name` and highlights `trigger`, the button that was
/// clicked. Everything else loses the `active` class. When the panel does not
/// exist nothing is activated.
pub fn open_tab(doc: &mut Document, tab_name: &str, trigger: &str) {
    for panel in doc.elements_with_class_mut(classes::TAB_CONTENT) {
        panel.remove_class(classes::ACTIVE);
    }
    for button in doc.elements_with_class_mut(classes::TAB_BUTTON) {
        button.remove_class(classes::ACTIVE);
    }

    let Some(panel) = doc.get_mut(tab_name) else {
        debug!("No tab panel named {}", tab_name);
        return;
    };
    panel.add_class(classes::ACTIVE);

    if let Some(button) = doc.get_mut(trigger) {
        button.add_class(classes::ACTIVE);
    }
}
