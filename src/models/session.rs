// ============================================================================
// DELIVERY SESSION - Máquina de estados local de la entrega
// ============================================================================
// Estado vivo del proceso, nunca persistido. Todas las transiciones son
// funciones puras sobre esta estructura; el viewmodel solo orquesta las
// llamadas remotas alrededor de ellas.
// ============================================================================

use crate::models::order::{Location, Order};
use crate::utils::constants::{DEFAULT_LAT, DEFAULT_LNG, DEFAULT_RADIUS_KM};

/// Estado local de la entrega en curso, independiente del `status` remoto
/// del pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    /// Sin entrega activa: se puede buscar, seleccionar y confirmar pickup.
    Idle,
    /// Pickup confirmado, pedido en tránsito.
    Shipping,
    /// Dropoff confirmado; estado terminal hasta que expira la ventana de
    /// confirmación y la sesión vuelve a `Idle`.
    Delivered,
}

/// Método de navegación elegido al comenzar el tránsito. Fijo durante un
/// episodio de shipping, salvo cambio explícito del chofer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Mapa interno de la app.
    Integrated,
    /// Hand-off a la app de mapas externa.
    External,
}

/// Contexto de sesión del chofer: conjunto de pedidos, selección, máquina
/// de estados y origen de búsqueda.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySession {
    /// Pedidos del último resultado de búsqueda, en el orden del servidor.
    pub orders: Vec<Order>,
    /// Referencia débil al pedido seleccionado: si el pedido sale del
    /// conjunto, la selección se limpia.
    pub selected_order_id: Option<String>,
    pub delivery_state: DeliveryState,
    /// Con valor si y solo si `delivery_state == Shipping` y el chofer ya
    /// eligió método de navegación.
    pub navigation_mode: Option<NavigationMode>,
    /// Origen de búsqueda, editable entre búsquedas.
    pub search_origin: Location,
    pub radius_km: f64,
}

impl DeliverySession {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            selected_order_id: None,
            delivery_state: DeliveryState::Idle,
            navigation_mode: None,
            search_origin: Location::new(DEFAULT_LAT, DEFAULT_LNG),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }

    /// Pedido seleccionado, si sigue en el conjunto.
    pub fn selected_order(&self) -> Option<&Order> {
        let id = self.selected_order_id.as_deref()?;
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_by_id(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn is_idle(&self) -> bool {
        self.delivery_state == DeliveryState::Idle
    }

    /// Seleccionar un pedido. Solo se acepta mientras no hay entrega activa;
    /// con una entrega en curso el click se ignora.
    pub fn select_order(&mut self, id: &str) -> bool {
        if self.delivery_state != DeliveryState::Idle {
            return false;
        }
        if self.order_by_id(id).is_none() {
            return false;
        }
        self.selected_order_id = Some(id.to_string());
        true
    }

    /// Cerrar el panel del pedido (solo en `Idle`).
    pub fn clear_selection(&mut self) -> bool {
        if self.delivery_state != DeliveryState::Idle {
            return false;
        }
        self.selected_order_id = None;
        true
    }

    /// Reemplazar el conjunto de pedidos con un resultado de búsqueda nuevo.
    /// Mantiene el orden de la respuesta y reconcilia la selección contra el
    /// conjunto nuevo.
    pub fn replace_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        if let Some(id) = self.selected_order_id.clone() {
            if self.order_by_id(&id).is_none() {
                self.selected_order_id = None;
            }
        }
    }

    /// `Idle → Shipping` tras el update remoto a "shipped". El método de
    /// navegación queda sin elegir.
    pub fn begin_shipping(&mut self, id: &str) -> bool {
        if self.delivery_state != DeliveryState::Idle {
            return false;
        }
        if self.selected_order_id.as_deref() != Some(id) || self.order_by_id(id).is_none() {
            return false;
        }
        self.delivery_state = DeliveryState::Shipping;
        self.navigation_mode = None;
        true
    }

    /// Elegir método de navegación durante el shipping.
    pub fn set_navigation_mode(&mut self, mode: NavigationMode) -> bool {
        if self.delivery_state != DeliveryState::Shipping {
            return false;
        }
        self.navigation_mode = Some(mode);
        true
    }

    /// Volver al selector de método ("Change Nav"). El modo persiste ante
    /// fallos de geocerca; solo esta acción explícita lo limpia.
    pub fn clear_navigation_mode(&mut self) -> bool {
        if self.delivery_state != DeliveryState::Shipping {
            return false;
        }
        self.navigation_mode = None;
        true
    }

    /// `Shipping → Delivered` tras el update remoto a "delivered".
    pub fn mark_delivered(&mut self, id: &str) -> bool {
        if self.delivery_state != DeliveryState::Shipping {
            return false;
        }
        if self.navigation_mode.is_none() {
            return false;
        }
        if self.selected_order_id.as_deref() != Some(id) {
            return false;
        }
        self.delivery_state = DeliveryState::Delivered;
        self.navigation_mode = None;
        true
    }

    /// Cierre de la ventana de confirmación: saca el pedido del conjunto,
    /// limpia selección y modo, y vuelve a `Idle`.
    ///
    /// El timer que dispara esto puede sobrevivir a un logout o a una sesión
    /// nueva, así que se re-verifica estado e id antes de mutar; si ya no
    /// aplica, es un no-op.
    pub fn settle_delivery(&mut self, id: &str) -> bool {
        if self.delivery_state != DeliveryState::Delivered {
            return false;
        }
        if self.selected_order_id.as_deref() != Some(id) {
            return false;
        }
        self.orders.retain(|o| o.id != id);
        self.selected_order_id = None;
        self.navigation_mode = None;
        self.delivery_state = DeliveryState::Idle;
        true
    }

    /// Abandonar el episodio de shipping sin tocar el backend (cerrar el
    /// overlay de navegación en medio del tránsito).
    pub fn cancel_shipping(&mut self) -> bool {
        if self.delivery_state != DeliveryState::Shipping {
            return false;
        }
        self.delivery_state = DeliveryState::Idle;
        self.navigation_mode = None;
        self.selected_order_id = None;
        true
    }

    /// Volver al estado inicial (logout). Idempotente; conserva el origen de
    /// búsqueda que el chofer ya había ajustado.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.selected_order_id = None;
        self.delivery_state = DeliveryState::Idle;
        self.navigation_mode = None;
    }
}

impl Default for DeliverySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderAddress;

    fn order(id: &str, lat: f64, lng: f64) -> Order {
        Order {
            id: id.to_string(),
            order_number: format!("ORD-{}", id),
            status: "processing".to_string(),
            total: "100.00".to_string(),
            address: OrderAddress {
                address_line1: "Addis St".to_string(),
                city: "Addis Ababa".to_string(),
                lat,
                lng,
                distance: None,
            },
            order_items: Vec::new(),
        }
    }

    fn session_with_two_orders() -> DeliverySession {
        let mut s = DeliverySession::new();
        s.replace_orders(vec![order("a", 9.03, 38.74), order("b", 9.05, 38.76)]);
        s
    }

    #[test]
    fn select_only_while_idle() {
        let mut s = session_with_two_orders();
        assert!(s.select_order("a"));
        assert!(s.begin_shipping("a"));

        // Con entrega activa, los clicks de selección se ignoran
        assert!(!s.select_order("b"));
        assert_eq!(s.selected_order_id.as_deref(), Some("a"));
    }

    #[test]
    fn begin_shipping_requires_idle_and_selection() {
        let mut s = session_with_two_orders();
        assert!(!s.begin_shipping("a")); // sin selección
        assert!(s.select_order("a"));
        assert!(!s.begin_shipping("b")); // id no coincide con la selección
        assert!(s.begin_shipping("a"));
        assert_eq!(s.delivery_state, DeliveryState::Shipping);
        assert!(s.navigation_mode.is_none());

        // Ya en shipping, no se puede volver a empezar
        assert!(!s.begin_shipping("a"));
    }

    #[test]
    fn navigation_mode_only_during_shipping() {
        let mut s = session_with_two_orders();
        assert!(!s.set_navigation_mode(NavigationMode::Integrated));

        s.select_order("a");
        s.begin_shipping("a");
        assert!(s.set_navigation_mode(NavigationMode::External));
        assert_eq!(s.navigation_mode, Some(NavigationMode::External));

        // "Change Nav" vuelve al selector sin salir de shipping
        assert!(s.clear_navigation_mode());
        assert_eq!(s.delivery_state, DeliveryState::Shipping);
        assert!(s.navigation_mode.is_none());
    }

    #[test]
    fn mark_delivered_requires_shipping_with_mode() {
        let mut s = session_with_two_orders();
        s.select_order("a");
        assert!(!s.mark_delivered("a")); // todavía idle

        s.begin_shipping("a");
        assert!(!s.mark_delivered("a")); // falta elegir navegación

        s.set_navigation_mode(NavigationMode::Integrated);
        assert!(!s.mark_delivered("b")); // id equivocado
        assert!(s.mark_delivered("a"));
        assert_eq!(s.delivery_state, DeliveryState::Delivered);
        assert!(s.navigation_mode.is_none());
    }

    #[test]
    fn settle_removes_order_and_clears_selection() {
        let mut s = session_with_two_orders();
        s.select_order("a");
        s.begin_shipping("a");
        s.set_navigation_mode(NavigationMode::Integrated);
        s.mark_delivered("a");

        assert!(s.settle_delivery("a"));
        assert_eq!(s.delivery_state, DeliveryState::Idle);
        assert!(s.selected_order_id.is_none());
        assert!(s.navigation_mode.is_none());
        assert!(s.order_by_id("a").is_none());
        assert_eq!(s.orders.len(), 1);
    }

    #[test]
    fn settle_is_noop_for_stale_timer() {
        let mut s = session_with_two_orders();
        s.select_order("a");
        s.begin_shipping("a");
        s.set_navigation_mode(NavigationMode::Integrated);
        s.mark_delivered("a");

        // Un logout gana la carrera contra el timer pendiente
        s.reset();
        let snapshot = s.clone();
        assert!(!s.settle_delivery("a"));
        assert_eq!(s, snapshot);
    }

    #[test]
    fn replace_orders_reconciles_selection() {
        let mut s = session_with_two_orders();
        s.select_order("a");

        // "a" desaparece del resultado nuevo: la selección no puede colgar
        s.replace_orders(vec![order("b", 9.05, 38.76)]);
        assert!(s.selected_order_id.is_none());

        s.select_order("b");
        s.replace_orders(vec![order("b", 9.05, 38.76), order("c", 9.06, 38.77)]);
        assert_eq!(s.selected_order_id.as_deref(), Some("b"));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = session_with_two_orders();
        s.select_order("a");
        s.begin_shipping("a");
        s.set_navigation_mode(NavigationMode::External);

        s.reset();
        let once = s.clone();
        s.reset();
        assert_eq!(s, once);
        assert!(s.orders.is_empty());
        assert_eq!(s.delivery_state, DeliveryState::Idle);
    }

    #[test]
    fn cancel_shipping_abandons_episode() {
        let mut s = session_with_two_orders();
        s.select_order("a");
        s.begin_shipping("a");
        s.set_navigation_mode(NavigationMode::Integrated);

        assert!(s.cancel_shipping());
        assert_eq!(s.delivery_state, DeliveryState::Idle);
        assert!(s.navigation_mode.is_none());
        assert!(s.selected_order_id.is_none());
        // El pedido sigue disponible: no hubo dropoff
        assert!(s.order_by_id("a").is_some());
    }
}
