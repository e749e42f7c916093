// ============================================================================
// MAP FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Solo wrappers para funciones JS - Sin estado, sin lógica. El mapa vive en
// JS; los clicks sobre marcadores vuelven por `map_marker_clicked` (ver
// lib.rs) con el id del pedido.
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = initDeliveryMap)]
    pub fn init_delivery_map(container_id: &str);

    #[wasm_bindgen(js_name = renderDeliveryMarkers)]
    pub fn render_delivery_markers(markers_json: &str);

    #[wasm_bindgen(js_name = setSearchCircle)]
    pub fn set_search_circle(lat: f64, lng: f64, radius_km: f64);
}

/// Helper: Centrar mapa en un destino
pub fn center_map_on(lat: f64, lng: f64) {
    if let Some(window) = web_sys::window() {
        let function = js_sys::Function::new_no_args(&format!(
            "if (window.centerDeliveryMap) window.centerDeliveryMap({}, {});",
            lat, lng
        ));
        let _ = function.call0(&window.into());
    }
}
