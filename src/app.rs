use std::cell::RefCell;
use std::rc::{Rc, Weak};

use aoc_web_core::{
    resolve_drop, Controller, DropSource, Evaluation, FileDecision, SolutionDelivery, SolveStatus,
    TimingMode,
};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::boot::{self, BootPhase};
use crate::config::load_ui_config;
use crate::page::{Page, PageError, PerformanceClock};
use crate::solver_module::{self, ModuleError, SolverModule};

const PREVENT_DEFAULT: EventListenerOptions = EventListenerOptions {
    phase: EventListenerPhase::Bubble,
    passive: false,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum StartupError {
    #[error("document unavailable")]
    MissingDocument,
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Module(#[from] ModuleError),
}

impl StartupError {
    fn code(&self) -> &'static str {
        match self {
            StartupError::MissingDocument => "page-document",
            StartupError::Page(err) => err.code(),
            StartupError::Module(err) => err.code(),
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            StartupError::MissingDocument | StartupError::Page(_) => {
                "check the element ids in the page and its aoc-config block"
            }
            StartupError::Module(_) => "make sure the solver script is built with cwrap exported",
        }
    }
}

pub(crate) struct App {
    controller: RefCell<Controller<Page, PerformanceClock>>,
    solver: SolverModule,
    listeners: RefCell<Vec<EventListener>>,
    paste_timeout: RefCell<Option<Timeout>>,
}

pub(crate) fn run() {
    boot::set_phase(BootPhase::WaitingForSolver);
    if let Err(err) = solver_module::on_module_ready(start) {
        report_startup_error(&StartupError::from(err));
    }
}

fn start() {
    boot::set_phase(BootPhase::BindingPage);
    match App::new() {
        Ok(app) => {
            app.install_listeners();
            boot::ready();
        }
        Err(err) => report_startup_error(&err),
    }
}

fn report_startup_error(err: &StartupError) {
    gloo::console::error!("startup failed", err.to_string());
    boot::fail(err.code(), &err.to_string(), err.hint());
}

impl App {
    fn new() -> Result<Rc<Self>, StartupError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(StartupError::MissingDocument)?;
        let config = load_ui_config(&document);
        let page = Page::bind(&document, &config)?;
        let solver = SolverModule::connect(config.debug_log)?;
        let timing = if config.tracks_timings() {
            TimingMode::Tracked
        } else {
            TimingMode::Untracked
        };
        let controller = Controller::start(page, PerformanceClock::new(), &solver, timing);
        let days = controller
            .implemented_days()
            .as_slice()
            .iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        gloo::console::log!("implemented days", days);

        let app = Rc::new(Self {
            controller: RefCell::new(controller),
            solver,
            listeners: RefCell::new(Vec::new()),
            paste_timeout: RefCell::new(None),
        });
        let weak = Rc::downgrade(&app);
        app.solver
            .set_late_handler(Rc::new(move |delivery: SolutionDelivery| receive_late(&weak, delivery)));
        Ok(app)
    }

    fn evaluate(&self) {
        let evaluation = self.controller.borrow_mut().evaluate(&self.solver);
        log_evaluation(&evaluation);
    }

    fn load_file(self: &Rc<Self>, file: File) {
        let name = file.name();
        if self.controller.borrow_mut().accept_file(&name) == FileDecision::Ignored {
            gloo::console::log!("ignoring dropped file", name);
            return;
        }
        let app = Rc::clone(self);
        spawn_local(async move {
            let contents = read_file_text(&file).await;
            let evaluation = app
                .controller
                .borrow_mut()
                .finish_file_load(contents, &app.solver);
            match evaluation {
                Some(evaluation) => log_evaluation(&evaluation),
                None => gloo::console::warn!("could not read file as text", file.name()),
            }
        });
    }

    fn set_drag_indicator(&self, active: bool) {
        self.controller.borrow_mut().set_drag_indicator(active);
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        let (body, file_picker, day_selector, puzzle_input) = {
            let controller = self.controller.borrow();
            let page = controller.view();
            (
                page.body.clone(),
                page.file_picker.clone(),
                page.day_selector.clone(),
                page.puzzle_input.clone(),
            )
        };

        let app = Rc::clone(self);
        listeners.push(EventListener::new(&file_picker, "change", move |event: &Event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            app.load_file(file);
        }));

        let app = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &puzzle_input,
            "drop",
            PREVENT_DEFAULT,
            move |event: &Event| {
                event.prevent_default();
                app.set_drag_indicator(false);
                let Some(file) = event.dyn_ref::<DragEvent>().and_then(dropped_file) else {
                    return;
                };
                app.load_file(file);
            },
        ));

        for name in ["dragenter", "dragover"] {
            let app = Rc::clone(self);
            listeners.push(EventListener::new(&body, name, move |_event: &Event| {
                app.set_drag_indicator(true);
            }));
        }
        let app = Rc::clone(self);
        listeners.push(EventListener::new(&body, "dragleave", move |_event: &Event| {
            app.set_drag_indicator(false);
        }));

        let app = Rc::clone(self);
        listeners.push(EventListener::new(&day_selector, "change", move |_event: &Event| {
            app.evaluate();
        }));

        for name in ["keyup", "change"] {
            let app = Rc::clone(self);
            listeners.push(EventListener::new(&puzzle_input, name, move |_event: &Event| {
                app.evaluate();
            }));
        }

        // the textarea only holds the pasted text after the event returns
        let app = Rc::clone(self);
        listeners.push(EventListener::new(&puzzle_input, "paste", move |_event: &Event| {
            let deferred = Rc::clone(&app);
            let timeout = Timeout::new(0, move || deferred.evaluate());
            *app.paste_timeout.borrow_mut() = Some(timeout);
        }));

        *self.listeners.borrow_mut() = listeners;
    }
}

fn receive_late(app: &Weak<App>, delivery: SolutionDelivery) {
    let Some(app) = app.upgrade() else {
        return;
    };
    let Ok(mut controller) = app.controller.try_borrow_mut() else {
        gloo::console::warn!("controller busy, dropping solution for part", delivery.part);
        return;
    };
    controller.receive_solution(delivery);
}

fn dropped_file(event: &DragEvent) -> Option<File> {
    let transfer = event.data_transfer()?;
    let items = transfer.items();
    let files = transfer.files();
    match resolve_drop(Some(items.length()), files.as_ref().map(|files| files.length()))? {
        DropSource::Item => items.get(0)?.get_as_file().ok().flatten(),
        DropSource::FileList => files?.get(0),
    }
}

async fn read_file_text(file: &File) -> Option<String> {
    let value = JsFuture::from(file.text()).await.ok()?;
    value.as_string()
}

fn log_evaluation(evaluation: &Evaluation) {
    match evaluation {
        Evaluation::Unchanged | Evaluation::Cleared => {}
        Evaluation::Solved {
            day,
            status: SolveStatus::Success,
            timings,
        } => {
            let timings = timings.map(|timings| timings.to_string()).unwrap_or_default();
            gloo::console::log!("solved day", day.get(), timings);
        }
        Evaluation::Solved {
            day,
            status: SolveStatus::Failure(code),
            ..
        } => {
            gloo::console::warn!("solver reported failure for day", day.get(), *code);
        }
    }
}
