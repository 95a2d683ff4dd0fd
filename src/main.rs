mod app;
mod boot;
mod config;
mod page;
mod solver_module;

fn main() {
    console_error_panic_hook::set_once();
    app::run();
}
