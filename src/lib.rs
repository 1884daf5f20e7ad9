use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub mod board;
pub mod config;
pub mod dom;
pub mod error;
pub mod game;
pub mod storage;
pub mod types;
pub mod view;

use config::GameConfig;
use game::GameController;
use storage::{KeyValueStore, LocalStorage, MemoryStore};
use view::{ViewModel, render_markup};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Browser handle on one game. Clones share the same controller.
#[wasm_bindgen]
#[derive(Clone)]
pub struct TicTacToe {
    controller: Rc<RefCell<GameController>>,
    /// Set by [`mount`]; clicks made through the handle repaint it.
    host: Option<Element>,
}

#[wasm_bindgen]
impl TicTacToe {
    /// `config` may be `undefined` or `{ storageKey?: string }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TicTacToe, JsValue> {
        let config = GameConfig::from_js(config).map_err(to_js_error)?;
        Ok(Self::with_store(config, browser_store()))
    }

    pub fn click(&self, index: usize) -> Result<JsValue, JsValue> {
        self.controller
            .borrow_mut()
            .handle_cell_click(index)
            .map_err(to_js_error)?;
        if let Some(host) = &self.host {
            dom::render(host, &self.controller.borrow());
        }
        self.state()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.controller.borrow().to_game_state();
        serde_wasm_bindgen::to_value(&state).map_err(JsValue::from)
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        let view = ViewModel::from_round(self.controller.borrow().round());
        serde_wasm_bindgen::to_value(&view).map_err(JsValue::from)
    }

    pub fn markup(&self) -> String {
        render_markup(&ViewModel::from_round(self.controller.borrow().round()))
    }
}

impl TicTacToe {
    pub fn with_store(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            controller: Rc::new(RefCell::new(GameController::new(config, store))),
            host: None,
        }
    }
}

/// Mounts a game into the element with id `element_id`.
#[wasm_bindgen]
pub fn mount(element_id: &str, config: JsValue) -> Result<TicTacToe, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let host = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{element_id}`")))?;

    let mut game = TicTacToe::new(config)?;
    dom::mount(&host, Rc::clone(&game.controller))?;
    game.host = Some(host);
    Ok(game)
}

fn browser_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(%err, "scores will not survive a reload");
            Box::new(MemoryStore::new())
        }
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
