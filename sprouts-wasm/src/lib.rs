use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

#[wasm_bindgen]
pub struct Game { pub(crate) inner: sprouts::GameController }

impl Game {
    pub fn rs_new() -> Game { Game { inner: sprouts::GameController::default() } }
    pub fn rs_with_config(config: sprouts::GameConfig) -> Result<Game, sprouts::ConfigError> {
        Ok(Game { inner: sprouts::GameController::new(config)? })
    }
}
