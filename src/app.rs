// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::maps::MapView;
use crate::state::app_state::AppState;
use crate::viewmodels::DeliveryViewModel;
use crate::views::main_screen::MAP_CONTAINER_ID;
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    map: MapView,
    root: Element,
}

impl App {
    /// Crear nueva aplicación. AppState restaura token e idioma guardados.
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Con token restaurado, cargar pedidos de entrada
        if state.auth.is_authenticated() {
            log::info!("💾 Token restaurado, cargando pedidos...");
            let state_clone = state.clone();
            spawn_local(async move {
                DeliveryViewModel::new().search(&state_clone).await;
            });
        }

        // Re-render automático ante cambios de estado; Timeout(0) batchea
        // múltiples notificaciones del mismo tick
        state.subscribe_to_changes(move || {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            state,
            map: MapView::new(MAP_CONTAINER_ID),
            root,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;

        // El mapa se sincroniza después de que el contenedor existe en el DOM
        if self.state.auth.is_authenticated() {
            self.map.sync(&self.state.session.get());
        }

        Ok(())
    }
}
