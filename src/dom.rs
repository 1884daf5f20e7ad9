use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

use crate::game::GameController;
use crate::view::{CELL_ATTR, ViewModel, render_markup};

/// Renders the game into `host` and keeps it in sync with clicks.
///
/// One delegated listener is installed on `host` and lives as long as the page.
pub fn mount(host: &Element, controller: Rc<RefCell<GameController>>) -> Result<(), JsValue> {
    render(host, &controller.borrow());

    let target = host.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(pos) = clicked_cell(&event) else {
            return;
        };

        let mut game = controller.borrow_mut();
        if let Err(err) = game.handle_cell_click(pos) {
            warn!(%err, "click ignored");
            return;
        }
        render(&target, &game);
    });

    host.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

pub fn render(host: &Element, game: &GameController) {
    host.set_inner_html(&render_markup(&ViewModel::from_round(game.round())));
}

fn clicked_cell(event: &Event) -> Option<usize> {
    let target: Element = event.target()?.dyn_into().ok()?;
    let cell = target.closest(&format!("[{CELL_ATTR}]")).ok()??;
    cell.get_attribute(CELL_ATTR)?.parse().ok()
}
