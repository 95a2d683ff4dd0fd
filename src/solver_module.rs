use std::cell::{Cell, RefCell};
use std::rc::Rc;

use aoc_web_core::{Clock, Day, SolutionDelivery, SolutionSink, SolveStatus, Solver};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::page::PerformanceClock;

const MODULE_KEY: &str = "Module";
const CALLBACKS_KEY: &str = "aocWasmCallbacks";
const READY_HOOK: &str = "onRuntimeInitialized";
const CALLED_RUN: &str = "calledRun";
const SOLVE_EXPORT: &str = "solve_puzzle";
const HAS_IMPLEMENTATION_EXPORT: &str = "has_implementation_for_day";
const RECEIVE_KEY: &str = "receiveSolution";
// spelling used by the compiled module's js library
const LEGACY_RECEIVE_KEY: &str = "reiceivePuzzleSolution";
const DEBUG_KEY: &str = "debug";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ModuleError {
    #[error("window unavailable")]
    MissingWindow,
    #[error("solver module is not an object")]
    MissingModule,
    #[error("solver module has no cwrap")]
    MissingCwrap,
    #[error("solver export {name} unavailable")]
    MissingExport { name: &'static str },
    #[error("could not install {key} on window")]
    Install { key: &'static str },
}

impl ModuleError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            ModuleError::MissingWindow => "module-window",
            ModuleError::MissingModule => "module-missing",
            ModuleError::MissingCwrap | ModuleError::MissingExport { .. } => "module-exports",
            ModuleError::Install { .. } => "module-install",
        }
    }
}

pub(crate) fn on_module_ready<F>(ready: F) -> Result<(), ModuleError>
where
    F: FnOnce() + 'static,
{
    let window = web_sys::window().ok_or(ModuleError::MissingWindow)?;
    let existing = Reflect::get(&window, &JsValue::from_str(MODULE_KEY)).unwrap_or(JsValue::UNDEFINED);
    if existing.is_undefined() || existing.is_null() {
        let module = Object::new();
        Reflect::set(&window, &JsValue::from_str(MODULE_KEY), &module)
            .map_err(|_| ModuleError::Install { key: MODULE_KEY })?;
        return chain_ready_hook(&module, ready);
    }
    let module = existing
        .dyn_into::<Object>()
        .map_err(|_| ModuleError::MissingModule)?;
    let called_run = Reflect::get(&module, &JsValue::from_str(CALLED_RUN))
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    if called_run {
        ready();
        return Ok(());
    }
    chain_ready_hook(&module, ready)
}

fn chain_ready_hook<F>(module: &Object, ready: F) -> Result<(), ModuleError>
where
    F: FnOnce() + 'static,
{
    let previous = Reflect::get(module, &JsValue::from_str(READY_HOOK))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let hook = Closure::once(move || {
        if let Some(previous) = previous {
            let _ = previous.call0(&JsValue::NULL);
        }
        ready();
    });
    Reflect::set(module, &JsValue::from_str(READY_HOOK), hook.as_ref())
        .map_err(|_| ModuleError::Install { key: READY_HOOK })?;
    hook.forget();
    Ok(())
}

struct CallbackRoute {
    solving: Cell<bool>,
    pending: RefCell<Vec<SolutionDelivery>>,
    late: RefCell<Option<Rc<dyn Fn(SolutionDelivery)>>>,
    clock: PerformanceClock,
    debug_log: bool,
}

impl CallbackRoute {
    fn deliver(&self, day: JsValue, part: JsValue, solution: JsValue) {
        let delivery = SolutionDelivery {
            day: js_int(&day),
            part: js_int(&part),
            solution: solution.as_string(),
            received_at_ms: self.clock.now_ms(),
        };
        if self.solving.get() {
            self.pending.borrow_mut().push(delivery);
            return;
        }
        let late = self.late.borrow().clone();
        match late {
            Some(handler) => handler(delivery),
            None => gloo::console::warn!("dropping solution outside of a solve", delivery.part),
        }
    }

    fn debug(&self, code: JsValue) {
        if self.debug_log {
            gloo::console::log!("solver debug", js_int(&code));
        }
    }
}

// Missing or non-numeric values become 0, which every range check rejects.
fn js_int(value: &JsValue) -> i32 {
    value
        .as_f64()
        .filter(|number| number.is_finite())
        .map(|number| number as i32)
        .unwrap_or(0)
}

pub(crate) struct SolverModule {
    solve_fn: Function,
    has_implementation_fn: Function,
    route: Rc<CallbackRoute>,
}

impl SolverModule {
    pub(crate) fn connect(debug_log: bool) -> Result<Self, ModuleError> {
        let window = web_sys::window().ok_or(ModuleError::MissingWindow)?;
        let module = Reflect::get(&window, &JsValue::from_str(MODULE_KEY))
            .ok()
            .and_then(|value| value.dyn_into::<Object>().ok())
            .ok_or(ModuleError::MissingModule)?;
        let cwrap = Reflect::get(&module, &JsValue::from_str("cwrap"))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(ModuleError::MissingCwrap)?;
        let solve_fn = wrap_export(&module, &cwrap, SOLVE_EXPORT, &["number", "string", "number"])?;
        let has_implementation_fn =
            wrap_export(&module, &cwrap, HAS_IMPLEMENTATION_EXPORT, &["number"])?;

        let route = Rc::new(CallbackRoute {
            solving: Cell::new(false),
            pending: RefCell::new(Vec::new()),
            late: RefCell::new(None),
            clock: PerformanceClock::new(),
            debug_log,
        });
        install_callbacks(&window, &route)?;
        Ok(Self {
            solve_fn,
            has_implementation_fn,
            route,
        })
    }

    pub(crate) fn set_late_handler(&self, handler: Rc<dyn Fn(SolutionDelivery)>) {
        *self.route.late.borrow_mut() = Some(handler);
    }
}

fn wrap_export(
    module: &Object,
    cwrap: &Function,
    name: &'static str,
    arg_types: &[&str],
) -> Result<Function, ModuleError> {
    let types = Array::new();
    for arg in arg_types {
        types.push(&JsValue::from_str(arg));
    }
    cwrap
        .call3(
            module,
            &JsValue::from_str(name),
            &JsValue::from_str("number"),
            &types,
        )
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(ModuleError::MissingExport { name })
}

fn install_callbacks(window: &web_sys::Window, route: &Rc<CallbackRoute>) -> Result<(), ModuleError> {
    let callbacks = Object::new();

    let receive_route = Rc::clone(route);
    let receive = Closure::<dyn FnMut(JsValue, JsValue, JsValue)>::new(
        move |day: JsValue, part: JsValue, solution: JsValue| {
            receive_route.deliver(day, part, solution);
        },
    );
    let debug_route = Rc::clone(route);
    let debug = Closure::<dyn FnMut(JsValue)>::new(move |code: JsValue| {
        debug_route.debug(code);
    });

    for key in [RECEIVE_KEY, LEGACY_RECEIVE_KEY] {
        Reflect::set(&callbacks, &JsValue::from_str(key), receive.as_ref())
            .map_err(|_| ModuleError::Install { key })?;
    }
    Reflect::set(&callbacks, &JsValue::from_str(DEBUG_KEY), debug.as_ref())
        .map_err(|_| ModuleError::Install { key: DEBUG_KEY })?;
    Reflect::set(window, &JsValue::from_str(CALLBACKS_KEY), &callbacks)
        .map_err(|_| ModuleError::Install { key: CALLBACKS_KEY })?;
    receive.forget();
    debug.forget();
    Ok(())
}

impl Solver for SolverModule {
    fn has_implementation(&self, day: Day) -> bool {
        self.has_implementation_fn
            .call1(&JsValue::NULL, &JsValue::from(day.get()))
            .map(|value| js_int(&value) == 1)
            .unwrap_or(false)
    }

    fn solve(&self, day: Day, input: &str, sink: &mut dyn SolutionSink) -> SolveStatus {
        self.route.pending.borrow_mut().clear();
        self.route.solving.set(true);
        // the module reads `length` bytes of the utf-8 copy cwrap makes
        let result = self.solve_fn.call3(
            &JsValue::NULL,
            &JsValue::from(day.get()),
            &JsValue::from_str(input),
            &JsValue::from_f64(input.len() as f64),
        );
        self.route.solving.set(false);
        let pending = std::mem::take(&mut *self.route.pending.borrow_mut());
        for delivery in pending {
            sink.receive_solution(delivery);
        }
        match result {
            Ok(value) => SolveStatus::from_exit_code(value.as_f64().map(|code| code as i32).unwrap_or(-1)),
            Err(err) => {
                gloo::console::error!("solver threw", err);
                SolveStatus::Failure(-1)
            }
        }
    }
}
