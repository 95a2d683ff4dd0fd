use aoc_web_core::UiConfig;
use web_sys::Document;

pub(crate) const CONFIG_ELEMENT_ID: &str = "aoc-config";

pub(crate) fn load_ui_config(document: &Document) -> UiConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return UiConfig::default();
    };
    let raw = element.text_content().unwrap_or_default();
    if raw.trim().is_empty() {
        return UiConfig::default();
    }
    match UiConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            gloo::console::warn!("ignoring page config", err.to_string());
            UiConfig::default()
        }
    }
}
