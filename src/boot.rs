use std::cell::Cell;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

const BOOT_KEY: &str = "__AOC_BOOT";

thread_local! {
    static READY_SENT: Cell<bool> = Cell::new(false);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootPhase {
    WaitingForSolver,
    BindingPage,
}

impl BootPhase {
    fn label(self) -> &'static str {
        match self {
            BootPhase::WaitingForSolver => "waiting for solver",
            BootPhase::BindingPage => "binding page",
        }
    }

    fn detail(self) -> &'static str {
        match self {
            BootPhase::WaitingForSolver => "loading the puzzle module",
            BootPhase::BindingPage => "probing implemented days",
        }
    }
}

fn boot_object() -> Option<Object> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(BOOT_KEY)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    value.dyn_into::<Object>().ok()
}

fn call(method: &str, args: &[JsValue]) {
    let Some(boot) = boot_object() else {
        return;
    };
    let Ok(value) = Reflect::get(&boot, &JsValue::from_str(method)) else {
        return;
    };
    let Ok(func) = value.dyn_into::<Function>() else {
        return;
    };
    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    let _ = func.apply(&boot, &array);
}

pub(crate) fn set_phase(phase: BootPhase) {
    call(
        "setPhase",
        &[
            JsValue::from_str(phase.label()),
            JsValue::from_str(phase.detail()),
        ],
    );
}

pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    call(
        "fail",
        &[
            JsValue::from_str(code),
            JsValue::from_str(message),
            JsValue::from_str(hint),
        ],
    );
}

pub(crate) fn ready() {
    if READY_SENT.with(|flag| flag.replace(true)) {
        return;
    }
    call("ready", &[]);
}
