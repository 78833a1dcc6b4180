//! Clinical Trials Monitor - browser entry point

mod api;
mod app;
mod config;
mod pages;
mod shell;
mod upload;

use leptos::prelude::*;

fn main() {
    let level = if config::debug_enabled() {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();

    mount_to_body(app::App);
}
