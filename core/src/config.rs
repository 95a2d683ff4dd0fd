use serde::{Deserialize, Serialize};

use crate::day::PART_COUNT;

pub const DEFAULT_FILE_PICKER_ID: &str = "filePicker";
pub const DEFAULT_DAY_SELECTOR_ID: &str = "selectDay";
pub const DEFAULT_PUZZLE_INPUT_ID: &str = "puzzleInput";
pub const DEFAULT_RESULT_IDS: [&str; PART_COUNT] = ["viewResultPart1", "viewResultPart2"];
pub const DEFAULT_TIMINGS_ID: &str = "timingsOutput";
pub const DEFAULT_DRAGOVER_CLASS: &str = "dragover";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    pub file_picker: String,
    pub day_selector: String,
    pub puzzle_input: String,
    pub results: Vec<String>,
    // No timings element means the solve is not timed at all.
    pub timings: Option<String>,
    pub dragover_class: String,
    pub debug_log: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            file_picker: DEFAULT_FILE_PICKER_ID.to_string(),
            day_selector: DEFAULT_DAY_SELECTOR_ID.to_string(),
            puzzle_input: DEFAULT_PUZZLE_INPUT_ID.to_string(),
            results: DEFAULT_RESULT_IDS.iter().map(|id| id.to_string()).collect(),
            timings: Some(DEFAULT_TIMINGS_ID.to_string()),
            dragover_class: DEFAULT_DRAGOVER_CLASS.to_string(),
            debug_log: false,
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: UiConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.results.is_empty() || self.results.len() > PART_COUNT {
            return Err(ConfigError::ResultSlots {
                found: self.results.len(),
            });
        }
        let required = [
            ("filePicker", self.file_picker.as_str()),
            ("daySelector", self.day_selector.as_str()),
            ("puzzleInput", self.puzzle_input.as_str()),
            ("dragoverClass", self.dragover_class.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        if self.results.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::EmptyField { field: "results" });
        }
        if matches!(self.timings.as_deref(), Some(id) if id.trim().is_empty()) {
            return Err(ConfigError::EmptyField { field: "timings" });
        }
        Ok(())
    }

    pub fn tracks_timings(&self) -> bool {
        self.timings.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 1 or 2 result elements, got {found}")]
    ResultSlots { found: usize },
    #[error("config field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}
