//! JavaScript bindings
//!
//! The page owns rendering, input capture and the animation loop. Each frame
//! it forwards key presses, calls `advance(performance.now())`, then reads the
//! snapshot and any events back as JSON.

use wasm_bindgen::prelude::*;

use crate::sim::{Intent, Match};
use crate::tuning::Tuning;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    super::init_logging();
    log::info!("Broadside core loaded");
}

/// A match handle for the page
#[wasm_bindgen]
pub struct WebMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WebMatch {
    /// Start a match. `tuning_json` may override any subset of tuning fields.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> Result<WebMatch, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(js_error)?,
            None => Tuning::default(),
        };
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        let inner = Match::new(seed, tuning).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Forward a key press; returns whether it changed anything
    pub fn intent(&mut self, key: &str) -> bool {
        Intent::from_key(key).is_some_and(|intent| self.inner.apply_intent(intent))
    }

    /// Run everything due at `now_ms` (host clock, milliseconds)
    pub fn advance(&mut self, now_ms: f64) {
        self.inner.advance(now_ms.max(0.0) as u64);
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(js_error)
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.drain_events()).map_err(js_error)
    }

    pub fn is_over(&self) -> bool {
        !self.inner.is_running()
    }
}
