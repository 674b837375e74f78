//! Browser bindings
//!
//! The JS side owns rendering, picking and audio playback. It feeds frame
//! deltas and resolved pointer points in, and gets events and snapshots back
//! as JSON strings.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::scene::Scene;
use crate::sim::{SceneKind, SimEvent};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Coinfall starting...");
}

/// One scene, driven from requestAnimationFrame
#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
}

#[wasm_bindgen]
impl WebScene {
    /// `kind` is "lava" / "lava-lamp" or "galton" / "galton-board"
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str) -> Result<WebScene, JsValue> {
        let kind = SceneKind::from_str(kind).ok_or_else(|| JsValue::from_str(&format!("unknown scene: {kind}")))?;
        Ok(Self {
            scene: Scene::new(kind),
        })
    }

    /// Begin the scene; returns the initial events as JSON
    pub fn start(&mut self) -> Result<String, JsValue> {
        let events = self.scene.start();
        events_json(&events)
    }

    /// Advance one frame (`dt` in seconds); returns the frame's events as JSON
    pub fn frame(&mut self, dt: f32) -> Result<String, JsValue> {
        let events = self.scene.frame(dt);
        events_json(&events)
    }

    /// Pointer press that hit the scene at a world point
    pub fn pointer_down(&mut self, x: f32, y: f32, z: f32) -> Result<String, JsValue> {
        let (_, events) = self.scene.pointer_down(Some(Vec3::new(x, y, z)));
        events_json(&events)
    }

    /// Pointer press whose pick ray hit nothing
    pub fn pointer_miss(&mut self) -> Result<String, JsValue> {
        let (_, events) = self.scene.pointer_down(None);
        events_json(&events)
    }

    pub fn stop(&mut self) {
        self.scene.stop();
    }

    pub fn score(&self) -> f64 {
        self.scene.score() as f64
    }

    /// Full render snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.scene.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Scene preset as JSON (for HUD/debug panels)
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.scene.config()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn events_json(events: &[SimEvent]) -> Result<String, JsValue> {
    serde_json::to_string(events).map_err(|e| JsValue::from_str(&e.to_string()))
}
