//! WebAssembly bindings for the CATAMM core.
//!
//! This module exposes a session to JavaScript through wasm-bindgen. All
//! structured data crosses the boundary as JSON strings.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::config::Config;
#[cfg(feature = "wasm")]
use crate::hex::Point;
#[cfg(feature = "wasm")]
use crate::ids::VertexId;
#[cfg(feature = "wasm")]
use crate::ports::market_for_portable_vertex;
#[cfg(feature = "wasm")]
use crate::session::GameSession;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed session wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmSession {
    session: GameSession,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmSession {
    /// Create a session from a config JSON object (may be `{}`) and a JSON array of names
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, player_names_json: &str) -> Result<WasmSession, JsValue> {
        let config = Config::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let player_names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;

        let session = GameSession::new(config, player_names)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSession { session })
    }

    /// Get the full session state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.session).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the board as JSON
    #[wasm_bindgen(js_name = getBoard)]
    pub fn get_board(&self) -> String {
        serde_json::to_string(self.session.board()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the ids of all portable vertices as a JSON array
    #[wasm_bindgen(js_name = getPortableVertices)]
    pub fn get_portable_vertices(&self) -> String {
        serde_json::to_string(&self.session.board().portable_vertices())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the market a vertex would host, or `null`
    #[wasm_bindgen(js_name = getMarketForVertex)]
    pub fn get_market_for_vertex(&self, vertex: &str) -> Result<String, JsValue> {
        let vertex: VertexId = vertex
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let market = market_for_portable_vertex(self.session.board(), vertex);
        Ok(serde_json::to_string(&market).unwrap_or_else(|_| "null".to_string()))
    }

    /// Index of the tile under a pixel position, if any
    #[wasm_bindgen(js_name = tileAt)]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.session.board().tile_at(Point::new(x, y)).map(|t| t.index)
    }

    /// Quote a swap for a player without executing it
    #[wasm_bindgen(js_name = quoteSwap)]
    pub fn quote_swap(
        &self,
        player: u8,
        market: &str,
        resource_json: &str,
        amount_in: u32,
    ) -> Result<u32, JsValue> {
        let market: VertexId = market
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        let resource = serde_json::from_str(resource_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid resource: {}", e)))?;
        self.session
            .quote(player, market, resource, amount_in)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, player: u8, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        match self.session.apply_action(player, action) {
            Ok(events) => {
                Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
            }
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }
}
