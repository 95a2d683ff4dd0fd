use aoc_web_core::{Clock, Day, PageView, UiConfig};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement, Performance,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum PageError {
    #[error("document body missing")]
    MissingBody,
    #[error("element #{id} not found")]
    MissingElement { id: String },
    #[error("element #{id} is not {expected}")]
    WrongElement { id: String, expected: &'static str },
}

impl PageError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            PageError::MissingBody => "page-body",
            PageError::MissingElement { .. } => "page-missing-element",
            PageError::WrongElement { .. } => "page-wrong-element",
        }
    }
}

pub(crate) struct Page {
    pub(crate) body: HtmlElement,
    pub(crate) file_picker: HtmlInputElement,
    pub(crate) day_selector: HtmlSelectElement,
    pub(crate) puzzle_input: HtmlTextAreaElement,
    results: Vec<HtmlElement>,
    timings: Option<HtmlElement>,
    dragover_class: String,
}

impl Page {
    pub(crate) fn bind(document: &Document, config: &UiConfig) -> Result<Self, PageError> {
        let body = document.body().ok_or(PageError::MissingBody)?;
        let file_picker = element::<HtmlInputElement>(document, &config.file_picker, "an input")?;
        let day_selector = element::<HtmlSelectElement>(document, &config.day_selector, "a select")?;
        let puzzle_input =
            element::<HtmlTextAreaElement>(document, &config.puzzle_input, "a textarea")?;
        let results = config
            .results
            .iter()
            .map(|id| element::<HtmlElement>(document, id, "an html element"))
            .collect::<Result<Vec<_>, _>>()?;
        let timings = match config.timings.as_deref() {
            Some(id) => Some(element::<HtmlElement>(document, id, "an html element")?),
            None => None,
        };
        Ok(Self {
            body,
            file_picker,
            day_selector,
            puzzle_input,
            results,
            timings,
            dragover_class: config.dragover_class.clone(),
        })
    }
}

fn element<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T, PageError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement { id: id.to_string() })?;
    element.dyn_into::<T>().map_err(|_| PageError::WrongElement {
        id: id.to_string(),
        expected,
    })
}

impl PageView for Page {
    fn result_slot_count(&self) -> usize {
        self.results.len()
    }

    fn set_result_text(&mut self, slot: usize, text: &str) {
        if let Some(view) = self.results.get(slot) {
            view.set_inner_text(text);
        }
    }

    fn set_timings_text(&mut self, text: &str) {
        if let Some(view) = self.timings.as_ref() {
            view.set_inner_text(text);
        }
    }

    fn add_day_option(&mut self, day: Day) {
        let Ok(option) = HtmlOptionElement::new_with_text_and_value(&day.label(), &day.to_string())
        else {
            return;
        };
        let _ = self.day_selector.append_child(&option);
    }

    fn day_value(&self) -> String {
        self.day_selector.value()
    }

    fn set_day_value(&mut self, day: Day) {
        self.day_selector.set_value(&day.to_string());
    }

    fn puzzle_text(&self) -> String {
        self.puzzle_input.value()
    }

    fn set_puzzle_text(&mut self, text: &str) {
        self.puzzle_input.set_value(text);
    }

    fn set_drag_indicator(&mut self, active: bool) {
        let classes = self.puzzle_input.class_list();
        let _ = if active {
            classes.add_1(&self.dragover_class)
        } else {
            classes.remove_1(&self.dragover_class)
        };
    }
}

pub(crate) struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub(crate) fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|window| window.performance()),
        }
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        match self.performance.as_ref() {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        }
    }
}
