// ============================================================================
// VIEWS MODULE - Funciones de renderizado (sin lógica de negocio)
// ============================================================================

pub mod login;
pub mod main_screen;
pub mod order_list;
pub mod order_panel;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::state::app_state::AppState;

/// Renderizar la vista raíz según el estado de autenticación
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    if state.auth.is_authenticated() {
        main_screen::render_main_screen(state)
    } else {
        login::render_login(state)
    }
}
