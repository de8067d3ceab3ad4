//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Exposing the match to JavaScript (wasm only)

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::WebMatch;

/// Install the native logger (`RUST_LOG` controls verbosity)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Route logs and panics to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
