use aoc_web_core::{Day, PageView, FAILED_TEXT, PART_COUNT};

pub(crate) struct TerminalPage {
    results: Vec<String>,
    timings: Option<String>,
    options: Vec<Day>,
    day_value: String,
    text: String,
}

impl TerminalPage {
    pub(crate) fn new() -> Self {
        Self {
            results: vec![String::new(); PART_COUNT],
            timings: None,
            options: Vec::new(),
            day_value: String::new(),
            text: String::new(),
        }
    }

    pub(crate) fn results(&self) -> &[String] {
        &self.results
    }

    pub(crate) fn timings(&self) -> Option<&str> {
        self.timings.as_deref()
    }

    pub(crate) fn offers(&self, day: Day) -> bool {
        self.options.contains(&day)
    }

    pub(crate) fn all_solved(&self) -> bool {
        self.results
            .iter()
            .all(|result| !result.is_empty() && result != FAILED_TEXT)
    }
}

impl PageView for TerminalPage {
    fn result_slot_count(&self) -> usize {
        self.results.len()
    }

    fn set_result_text(&mut self, slot: usize, text: &str) {
        if let Some(result) = self.results.get_mut(slot) {
            *result = text.to_string();
        }
    }

    fn set_timings_text(&mut self, text: &str) {
        // terminals do not need the non-breaking spaces the page uses
        self.timings = Some(text.replace('\u{a0}', " "));
    }

    fn add_day_option(&mut self, day: Day) {
        self.options.push(day);
    }

    fn day_value(&self) -> String {
        self.day_value.clone()
    }

    fn set_day_value(&mut self, day: Day) {
        self.day_value = day.to_string();
    }

    fn puzzle_text(&self) -> String {
        self.text.clone()
    }

    fn set_puzzle_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_drag_indicator(&mut self, _active: bool) {}
}
