// ============================================================================
// REDSEA DRIVER APP - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Orquestación de operaciones de entrega
// - Services: SOLO comunicación API + geolocalización
// - State: State Management con Rc<RefCell>
// - Models: Pedidos + máquina de estados de la entrega
// ============================================================================

mod app;
mod dom;
mod maps;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(Config::default());
    log::info!("🚀 RedSea Driver App - Rust Puro + MVVM");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ App no está inicializada");
        }
    });
}

/// Click en un marcador del mapa (llamable desde JavaScript). Selecciona el
/// pedido; la sesión ignora el click si hay una entrega activa.
#[wasm_bindgen]
pub fn map_marker_clicked(order_id: String) {
    APP.with(|app_cell| {
        if let Some(ref app) = *app_cell.borrow() {
            let state = app.state();
            if state.session.with_mut(|s| s.select_order(&order_id)) {
                state.notify_subscribers();
            }
        }
    });
}
