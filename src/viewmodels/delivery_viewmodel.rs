// ============================================================================
// DELIVERY VIEWMODEL - Controlador de la sesión de entrega
// ============================================================================
// Orquesta las tres llamadas remotas y la lectura de geolocalización
// alrededor de la máquina de estados pura de models::session. Todo fallo se
// convierte en un DeliveryError en el borde de la operación; un 401/403 de
// cualquier llamada fuerza el logout completo.
// ============================================================================

use gloo_timers::callback::Timeout;

use crate::models::order::Location;
use crate::models::session::NavigationMode;
use crate::services::api_client::{ApiClient, ApiError};
use crate::services::geolocation::{self, GeolocationError};
use crate::state::AppState;
use crate::utils::constants::{DELIVERED_SETTLE_MS, GEOFENCE_RADIUS_M, MAPS_DIRECTIONS_URL};
use crate::utils::geo::distance_meters;
use crate::utils::i18n::t;

/// Taxonomía de errores de las operaciones del controlador.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryError {
    /// 401/403 remoto: se recupera con logout forzado, nunca se muestra
    /// como error reintentable.
    Auth,
    /// Cualquier otro fallo remoto o de red; reintentable por el usuario.
    Remote(String),
    /// Precondición local: lectura fresca fuera de la geocerca. Reporta la
    /// distancia medida; no se hizo ninguna llamada remota.
    GeofenceViolation { meters: u32 },
    /// El proveedor de geolocalización no produjo lectura (permiso o
    /// timeout). Distinto de la violación de geocerca.
    LocationUnavailable(String),
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Auth => write!(f, "Session expired. Please log in again."),
            DeliveryError::Remote(msg) => write!(f, "{}", msg),
            DeliveryError::GeofenceViolation { meters } => write!(
                f,
                "Out of Range: You are {}m from the destination. Please move within {}m to finalize dropoff.",
                meters, GEOFENCE_RADIUS_M
            ),
            DeliveryError::LocationUnavailable(detail) => {
                write!(f, "Location verification failed: {}", detail)
            }
        }
    }
}

impl From<ApiError> for DeliveryError {
    fn from(err: ApiError) -> Self {
        if err.is_auth_failure() {
            DeliveryError::Auth
        } else {
            DeliveryError::Remote(err.message)
        }
    }
}

impl From<GeolocationError> for DeliveryError {
    fn from(err: GeolocationError) -> Self {
        DeliveryError::LocationUnavailable(err.to_string())
    }
}

/// Verificación de proximidad previa al dropoff. Puerta dura: con la lectura
/// fuera de la cerca no se intenta el update remoto.
pub fn geofence_gate(driver: Location, destination: Location) -> Result<u32, DeliveryError> {
    let meters = distance_meters(driver, destination);
    if meters > GEOFENCE_RADIUS_M {
        Err(DeliveryError::GeofenceViolation { meters })
    } else {
        Ok(meters)
    }
}

/// Deep link de direcciones para la app de mapas externa.
pub fn directions_url(origin: Location, destination: Location) -> String {
    format!(
        "{}?api=1&origin={},{}&destination={},{}&travelmode=driving",
        MAPS_DIRECTIONS_URL, origin.lat, origin.lng, destination.lat, destination.lng
    )
}

/// ViewModel de entrega - SOLO lógica de negocio
pub struct DeliveryViewModel {
    api: ApiClient,
}

impl DeliveryViewModel {
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(),
        }
    }

    /// Login del chofer. Con token guardado dispara la búsqueda inicial.
    pub async fn login(&self, state: &AppState, phone: &str, password: &str) -> Result<(), String> {
        match self.api.login(phone, password).await {
            Ok(token) => {
                state.auth.set_token(token);
                log::info!("✅ Login exitoso");
                // Búsqueda inicial con el origen por defecto
                self.search(state).await;
                state.notify_subscribers();
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Error en login: {}", e);
                Err(e.message)
            }
        }
    }

    /// Refrescar el conjunto de pedidos. Bloqueada mientras hay una entrega
    /// activa; no produce ninguna transición de estado.
    pub async fn search(&self, state: &AppState) {
        if *state.searching.borrow() {
            log::warn!("⚠️ Búsqueda ya en vuelo, ignorando");
            return;
        }
        if !state.session.get().is_idle() {
            log::warn!("⚠️ Búsqueda bloqueada: entrega activa");
            return;
        }

        let token = match state.auth.token() {
            Some(t) => t,
            None => {
                self.force_logout(state);
                return;
            }
        };

        *state.searching.borrow_mut() = true;
        state.set_error(None);
        state.set_info(None);
        state.notify_subscribers();

        let (origin, radius_km) = {
            let session = state.session.get();
            (session.search_origin, session.radius_km)
        };

        let result = self
            .api
            .search_by_coordinates(origin.lat, origin.lng, radius_km, Some(&token))
            .await;

        *state.searching.borrow_mut() = false;

        match result.map_err(DeliveryError::from) {
            Ok(orders) => {
                let empty = orders.is_empty();
                state.session.with_mut(|s| s.replace_orders(orders));
                if empty {
                    state.set_info(Some(t("no_products", &state.language())));
                }
            }
            Err(DeliveryError::Auth) => {
                self.force_logout(state);
                return;
            }
            Err(e) => {
                // El conjunto de pedidos queda intacto ante fallo transitorio
                state.set_error(Some(e.to_string()));
            }
        }

        state.notify_subscribers();
    }

    /// Confirmación de pickup: `idle → shipping` vía update remoto a
    /// "shipped". Ante fallo transitorio el estado no cambia y se puede
    /// reintentar.
    pub async fn start_delivery(&self, state: &AppState, order_id: &str) {
        if *state.updating_status.borrow() {
            log::warn!("⚠️ Update de status ya en vuelo, ignorando");
            return;
        }
        {
            let session = state.session.get();
            // Mismas precondiciones que begin_shipping: así el update remoto
            // nunca prospera con una transición local que va a fallar
            if !session.is_idle()
                || session.selected_order_id.as_deref() != Some(order_id)
                || session.order_by_id(order_id).is_none()
            {
                return;
            }
        }

        *state.updating_status.borrow_mut() = true;
        state.set_panel_error(None);
        state.notify_subscribers();

        let token = state.auth.token();
        let result = self
            .api
            .update_order_status(order_id, "shipped", token.as_deref())
            .await;

        *state.updating_status.borrow_mut() = false;

        match result.map_err(DeliveryError::from) {
            Ok(()) => {
                state.session.with_mut(|s| s.begin_shipping(order_id));
                log::info!("🚚 Pedido {} en tránsito", order_id);
            }
            Err(DeliveryError::Auth) => {
                self.force_logout(state);
                return;
            }
            Err(e) => {
                state.set_panel_error(Some(e.to_string()));
            }
        }

        state.notify_subscribers();
    }

    /// Elegir método de navegación. `External` abre el deep link de la app
    /// de mapas en un contexto nuevo (fire-and-forget, sin seguimiento).
    pub fn select_navigation_mode(&self, state: &AppState, mode: NavigationMode) {
        let applied = state.session.with_mut(|s| s.set_navigation_mode(mode));
        if !applied {
            return;
        }

        if mode == NavigationMode::External {
            let session = state.session.get();
            if let Some(order) = session.selected_order() {
                let url = directions_url(session.search_origin, order.destination());
                log::info!("🗺️ Abriendo navegación externa");
                if let Some(window) = web_sys::window() {
                    if window.open_with_url_and_target(&url, "_blank").is_err() {
                        log::warn!("⚠️ No se pudo abrir la app de mapas externa");
                    }
                }
            }
        }

        state.notify_subscribers();
    }

    /// Volver al selector de navegación ("Change Nav").
    pub fn change_navigation(&self, state: &AppState) {
        if state.session.with_mut(|s| s.clear_navigation_mode()) {
            state.notify_subscribers();
        }
    }

    /// Abandonar el episodio de shipping sin tocar el backend (cerrar el
    /// overlay de navegación).
    pub fn cancel_delivery(&self, state: &AppState) {
        if state.session.with_mut(|s| s.cancel_shipping()) {
            state.set_panel_error(None);
            state.notify_subscribers();
        }
    }

    /// Dropoff con puerta de geocerca:
    /// 1. lectura fresca de posición (10s, máxima precisión),
    /// 2. distancia haversine al destino,
    /// 3. >10m ⇒ abortar reportando la distancia, sin llamada remota,
    /// 4. dentro de la cerca ⇒ update remoto a "delivered",
    /// 5. éxito ⇒ `delivered` + timer de cierre que saca el pedido del
    ///    conjunto y vuelve a `idle`.
    pub async fn complete_delivery(&self, state: &AppState, order_id: &str) {
        if *state.updating_status.borrow() {
            log::warn!("⚠️ Update de status ya en vuelo, ignorando");
            return;
        }

        let destination = {
            let session = state.session.get();
            let in_shipping = session.delivery_state == crate::models::DeliveryState::Shipping
                && session.navigation_mode.is_some()
                && session.selected_order_id.as_deref() == Some(order_id);
            if !in_shipping {
                return;
            }
            match session.order_by_id(order_id) {
                Some(order) => order.destination(),
                None => return,
            }
        };

        *state.updating_status.borrow_mut() = true;
        state.set_panel_error(None);
        state.notify_subscribers();

        let outcome = self.verified_dropoff(state, order_id, destination).await;

        *state.updating_status.borrow_mut() = false;

        match outcome {
            Ok(()) => {
                state.session.with_mut(|s| s.mark_delivered(order_id));
                log::info!("🎉 Pedido {} entregado", order_id);
                self.schedule_settle(state, order_id);
            }
            Err(DeliveryError::Auth) => {
                self.force_logout(state);
                return;
            }
            Err(e) => {
                // Shipping se conserva: el chofer reintenta el dropoff con
                // una lectura nueva, el modo de navegación persiste
                state.set_panel_error(Some(e.to_string()));
            }
        }

        state.notify_subscribers();
    }

    /// Pasos 1-4 del dropoff. La puerta de geocerca corta antes de cualquier
    /// llamada remota.
    async fn verified_dropoff(
        &self,
        state: &AppState,
        order_id: &str,
        destination: Location,
    ) -> Result<(), DeliveryError> {
        let position = geolocation::current_position().await?;
        let meters = geofence_gate(position, destination)?;
        log::info!("📏 Dentro de la cerca: {}m del destino", meters);

        let token = state.auth.token();
        self.api
            .update_order_status(order_id, "delivered", token.as_deref())
            .await?;
        Ok(())
    }

    /// Timer único de cierre tras la entrega. Lleva el id del pedido: si un
    /// logout o una sesión nueva ganan la carrera, settle_delivery re-verifica
    /// y el disparo tardío queda en no-op.
    fn schedule_settle(&self, state: &AppState, order_id: &str) {
        let state = state.clone();
        let order_id = order_id.to_string();
        Timeout::new(DELIVERED_SETTLE_MS, move || {
            let settled = state.session.with_mut(|s| s.settle_delivery(&order_id));
            if settled {
                log::info!("🧾 Entrega {} cerrada, sesión en idle", order_id);
                state.notify_subscribers();
            }
        })
        .forget();
    }

    /// Actualizar el origen de búsqueda con la posición actual del chofer.
    pub async fn detect_location(&self, state: &AppState) {
        if *state.locating.borrow() {
            return;
        }
        *state.locating.borrow_mut() = true;
        state.notify_subscribers();

        let result = geolocation::current_position().await;
        *state.locating.borrow_mut() = false;

        match result {
            Ok(location) => {
                state.session.with_mut(|s| s.search_origin = location);
            }
            Err(e) => {
                state.set_error(Some(e.to_string()));
            }
        }

        state.notify_subscribers();
    }

    /// Logout explícito del chofer. Idempotente.
    pub fn logout(&self, state: &AppState) {
        log::info!("👋 Logout - limpiando toda la sesión");
        self.force_logout(state);
    }

    /// Reset completo ante 401/403 o logout: token fuera, sesión a estado
    /// inicial, banners y guards limpios.
    pub fn force_logout(&self, state: &AppState) {
        state.auth.clear();
        state.session.with_mut(|s| s.reset());
        state.set_error(None);
        state.set_panel_error(None);
        state.set_info(None);
        *state.searching.borrow_mut() = false;
        *state.updating_status.borrow_mut() = false;
        *state.locating.borrow_mut() = false;
        state.notify_subscribers();
    }
}

impl Default for DeliveryViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{Order, OrderAddress};
    use crate::models::session::{DeliverySession, DeliveryState, NavigationMode};

    fn order(id: &str, lat: f64, lng: f64) -> Order {
        Order {
            id: id.to_string(),
            order_number: format!("ORD-{}", id),
            status: "processing".to_string(),
            total: "250.00".to_string(),
            address: OrderAddress {
                address_line1: "Bole Rd".to_string(),
                city: "Addis Ababa".to_string(),
                lat,
                lng,
                distance: None,
            },
            order_items: Vec::new(),
        }
    }

    #[test]
    fn gate_accepts_reading_inside_fence() {
        let destination = Location::new(9.0300, 38.7400);
        let driver = Location::new(9.03007, 38.7400);
        let meters = geofence_gate(driver, destination).unwrap();
        assert!(meters <= 10);
    }

    #[test]
    fn gate_rejects_reading_outside_fence_with_measured_distance() {
        let destination = Location::new(9.0300, 38.7400);
        let driver = Location::new(9.0310, 38.7400);
        match geofence_gate(driver, destination) {
            Err(DeliveryError::GeofenceViolation { meters }) => {
                assert!((100..=120).contains(&meters), "midió {}m", meters);
            }
            other => panic!("esperaba GeofenceViolation, obtuve {:?}", other),
        }
    }

    #[test]
    fn geofence_error_reports_meters_to_the_user() {
        let err = DeliveryError::GeofenceViolation { meters: 111 };
        let msg = err.to_string();
        assert!(msg.contains("111m"), "mensaje: {}", msg);
        assert!(msg.contains("10m"), "mensaje: {}", msg);
    }

    #[test]
    fn api_errors_classify_into_taxonomy() {
        let auth: DeliveryError = ApiError { status: 401, message: "nope".into() }.into();
        assert_eq!(auth, DeliveryError::Auth);

        let forbidden: DeliveryError = ApiError { status: 403, message: "nope".into() }.into();
        assert_eq!(forbidden, DeliveryError::Auth);

        let transient: DeliveryError = ApiError { status: 502, message: "bad gateway".into() }.into();
        assert_eq!(transient, DeliveryError::Remote("bad gateway".into()));

        let location: DeliveryError = GeolocationError::Timeout.into();
        assert!(matches!(location, DeliveryError::LocationUnavailable(_)));
    }

    #[test]
    fn directions_url_has_origin_destination_and_mode() {
        let url = directions_url(Location::new(9.03, 38.74), Location::new(9.05, 38.76));
        assert!(url.starts_with("https://www.google.com/maps/dir/?api=1"));
        assert!(url.contains("origin=9.03,38.74"));
        assert!(url.contains("destination=9.05,38.76"));
        assert!(url.contains("travelmode=driving"));
    }

    /// Recorrido completo del escenario de entrega sobre la máquina pura +
    /// la puerta de geocerca: búsqueda → selección → pickup → navegación →
    /// dropoff rechazado a ~500m → dropoff aceptado a ~5m → cierre.
    #[test]
    fn full_delivery_scenario() {
        let destination = Location::new(9.0300, 38.7400);
        let mut session = DeliverySession::new();

        // Búsqueda en (9.03, 38.74) radio 10km devuelve 2 pedidos
        session.replace_orders(vec![
            order("o1", destination.lat, destination.lng),
            order("o2", 9.05, 38.76),
        ]);
        assert_eq!(session.orders.len(), 2);

        // Selección + pickup
        assert!(session.select_order("o1"));
        assert!(session.begin_shipping("o1"));
        assert_eq!(session.delivery_state, DeliveryState::Shipping);

        // Navegación integrada
        assert!(session.set_navigation_mode(NavigationMode::Integrated));

        // Intento de dropoff a ~500m: rechazado, cero llamadas remotas,
        // el estado y el modo quedan como estaban
        let far = Location::new(9.0345, 38.7400);
        let rejection = geofence_gate(far, destination).unwrap_err();
        match rejection {
            DeliveryError::GeofenceViolation { meters } => {
                assert!((480..=520).contains(&meters), "midió {}m", meters);
            }
            other => panic!("esperaba GeofenceViolation, obtuve {:?}", other),
        }
        assert_eq!(session.delivery_state, DeliveryState::Shipping);
        assert_eq!(session.navigation_mode, Some(NavigationMode::Integrated));

        // El chofer se acerca a ~5m: la puerta deja pasar
        let near = Location::new(9.030045, 38.7400);
        assert!(geofence_gate(near, destination).is_ok());

        // Update remoto aceptado → delivered → cierre tras la ventana
        assert!(session.mark_delivered("o1"));
        assert_eq!(session.delivery_state, DeliveryState::Delivered);
        assert!(session.settle_delivery("o1"));

        assert_eq!(session.delivery_state, DeliveryState::Idle);
        assert!(session.order_by_id("o1").is_none());
        assert!(session.selected_order_id.is_none());
        assert_eq!(session.orders.len(), 1);
    }
}
