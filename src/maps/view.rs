// ============================================================================
// MAP VIEW - Proyección de la sesión sobre el mapa
// ============================================================================
// Traduce el estado de la sesión (pedidos, selección, origen de búsqueda) a
// los marcadores que dibuja el lado JS. Sin estado propio más allá del flag
// de inicialización.
// ============================================================================

use serde::Serialize;

use crate::maps::ffi;
use crate::models::session::{DeliverySession, DeliveryState};

/// Marcador tal como lo consume el lado JS del mapa.
#[derive(Debug, Serialize)]
struct MapMarker<'a> {
    id: &'a str,
    order_number: &'a str,
    lat: f64,
    lng: f64,
    selected: bool,
    /// Los clicks solo seleccionan mientras no hay entrega activa; el lado
    /// JS atenúa los marcadores no interactivos.
    interactive: bool,
}

pub struct MapView {
    container_id: String,
}

impl MapView {
    pub fn new(container_id: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
        }
    }

    /// Sincronizar el mapa con el snapshot actual de la sesión.
    pub fn sync(&self, session: &DeliverySession) {
        // El contenedor se recrea en cada render; el lado JS re-adjunta la
        // instancia del mapa al div nuevo
        ffi::init_delivery_map(&self.container_id);

        let idle = session.delivery_state == DeliveryState::Idle;
        let markers: Vec<MapMarker> = session
            .orders
            .iter()
            .map(|order| MapMarker {
                id: &order.id,
                order_number: &order.order_number,
                lat: order.address.lat,
                lng: order.address.lng,
                selected: session.selected_order_id.as_deref() == Some(order.id.as_str()),
                interactive: idle,
            })
            .collect();

        match serde_json::to_string(&markers) {
            Ok(json) => ffi::render_delivery_markers(&json),
            Err(e) => log::error!("❌ Error serializando marcadores: {}", e),
        }

        ffi::set_search_circle(
            session.search_origin.lat,
            session.search_origin.lng,
            session.radius_km,
        );

        // Con entrega activa el mapa sigue al destino, no al origen
        if !idle {
            if let Some(order) = session.selected_order() {
                ffi::center_map_on(order.address.lat, order.address.lng);
            }
        }
    }
}
