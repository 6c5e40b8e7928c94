//! Arena color palette.
//!
//! Persisted in LocalStorage so a customized palette survives reloads.
//! Colors are CSS color strings handed straight to the drawing surface.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_BOLA_COLLISION_COLOR, DEFAULT_BOLA_COLOR, DEFAULT_LINE_COLOR,
};

/// Colors used by the render engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Canvas background (also used to erase the previous preview line)
    pub background: String,
    /// Drag preview line
    pub line: String,
    /// Bola at rest
    pub bola: String,
    /// Bola the service reports as mid-collision
    pub bola_collision: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND_COLOR.to_string(),
            line: DEFAULT_LINE_COLOR.to_string(),
            bola: DEFAULT_BOLA_COLOR.to_string(),
            bola_collision: DEFAULT_BOLA_COLLISION_COLOR.to_string(),
        }
    }
}

impl Palette {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bolas_arena_palette";

    /// Color for one bola, keyed by its reported collision state.
    pub fn bola_color(&self, collided: bool) -> &str {
        if collided {
            &self.bola_collision
        } else {
            &self.bola
        }
    }

    /// Load the palette from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(palette) = serde_json::from_str(&json) {
                    log::info!("Loaded palette from LocalStorage");
                    return palette;
                }
            }
        }

        log::info!("Using default palette");
        Self::default()
    }

    /// Save the palette to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Palette saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
