//! WASM-compatible controller wrapper

use super::engine::{JsEngine, YtPlayer};
use crate::{
    EngineErrorCode, EngineEvent, EngineState, PlaybackError, PlayerConfig, PlayerController,
    Result,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible jukebox controller
///
/// The page drives the timers: while `isFading()` it calls
/// `fadeTick(fadeGeneration())` every `fadeTickMs` milliseconds (capturing
/// the generation when the interval is created), and while `isPolling()` it
/// calls `progressTick()` every `progressIntervalMs` milliseconds.
#[wasm_bindgen]
pub struct WasmJukebox {
    inner: PlayerController<JsEngine>,

    // Event callbacks
    on_change: Option<Function>,
}

#[wasm_bindgen]
impl WasmJukebox {
    /// Create a controller around the page's player object
    ///
    /// `config` may be `undefined` for the stock playlist.
    #[wasm_bindgen(constructor)]
    pub fn new(player: YtPlayer, config: JsValue) -> std::result::Result<WasmJukebox, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let inner = PlayerController::new(JsEngine::new(player), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_change: None,
        })
    }

    // ===== Engine Callbacks =====

    #[wasm_bindgen(js_name = handleReady)]
    pub fn handle_ready(&mut self) {
        self.inner.handle_engine_event(EngineEvent::Ready);
        self.emit_change();
    }

    #[wasm_bindgen(js_name = handleStateChange)]
    pub fn handle_state_change(&mut self, code: i32) {
        match EngineState::from_code(code) {
            Some(state) => self
                .inner
                .handle_engine_event(EngineEvent::StateChanged(state)),
            None => tracing::debug!(code, "Ignoring unknown engine state"),
        }
        self.emit_change();
    }

    #[wasm_bindgen(js_name = handleError)]
    pub fn handle_error(&mut self, code: i32) {
        self.inner
            .handle_engine_event(EngineEvent::Error(EngineErrorCode(code)));
        web_sys::console::error_1(&JsValue::from_str(
            &PlaybackError::Engine(EngineErrorCode(code)).to_string(),
        ));
        self.emit_change();
    }

    // ===== Controls =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) -> std::result::Result<(), JsValue> {
        let result = self.inner.toggle_play();
        self.finish(result)
    }

    pub fn next(&mut self) -> std::result::Result<(), JsValue> {
        let result = self.inner.next();
        self.finish(result)
    }

    pub fn previous(&mut self) -> std::result::Result<(), JsValue> {
        let result = self.inner.previous();
        self.finish(result)
    }

    #[wasm_bindgen(js_name = volumeInput)]
    pub fn volume_input(&mut self, value: f64) {
        self.inner.volume_input(value);
        self.emit_change();
    }

    #[wasm_bindgen(js_name = progressInput)]
    pub fn progress_input(&mut self, value: f64) {
        self.inner.progress_input(value);
        self.emit_change();
    }

    #[wasm_bindgen(js_name = progressCommit)]
    pub fn progress_commit(&mut self) -> std::result::Result<(), JsValue> {
        let result = self.inner.progress_commit();
        self.finish(result)
    }

    // ===== Timers =====

    #[wasm_bindgen(js_name = fadeTick)]
    pub fn fade_tick(&mut self, generation: u64) -> bool {
        let applied = self.inner.fade_tick(generation);
        if applied {
            self.emit_change();
        }
        applied
    }

    #[wasm_bindgen(js_name = progressTick)]
    pub fn progress_tick(&mut self) -> bool {
        let updated = self.inner.progress_tick();
        if updated {
            self.emit_change();
        }
        updated
    }

    #[wasm_bindgen(js_name = isFading)]
    pub fn is_fading(&self) -> bool {
        self.inner.is_fading()
    }

    #[wasm_bindgen(js_name = fadeGeneration)]
    pub fn fade_generation(&self) -> u64 {
        self.inner.fade_generation()
    }

    #[wasm_bindgen(js_name = isPolling)]
    pub fn is_polling(&self) -> bool {
        self.inner.is_polling()
    }

    #[wasm_bindgen(js_name = fadeTickMs)]
    pub fn fade_tick_ms(&self) -> u32 {
        u32::try_from(self.inner.config().fade_tick_ms).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = progressIntervalMs)]
    pub fn progress_interval_ms(&self) -> u32 {
        u32::try_from(self.inner.config().progress_interval_ms).unwrap_or(u32::MAX)
    }

    // ===== View =====

    /// Current state of every widget control
    pub fn view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.view()).unwrap_or(JsValue::NULL)
    }

    /// Events emitted since the last call
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.drain_events()).unwrap_or(JsValue::NULL)
    }

    /// Register a callback invoked with the view after every change
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: Function) {
        self.on_change = Some(callback);
    }

    // ===== Internal =====

    /// Inputs before the player is ready are silently dropped
    fn finish(&self, result: Result<()>) -> std::result::Result<(), JsValue> {
        match result {
            Ok(()) | Err(PlaybackError::EngineNotReady) => {
                self.emit_change();
                Ok(())
            }
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    fn emit_change(&self) {
        if let Some(ref cb) = self.on_change {
            cb.call1(&JsValue::NULL, &self.view()).ok();
        }
    }
}
