// ============================================================================
// ORDER - Modelos de pedido tal como los devuelve el backend
// ============================================================================

use serde::{Deserialize, Serialize};

/// Par latitud/longitud. Se usa para la posición del chofer, el origen de
/// búsqueda y el destino del pedido. Los rangos no se validan aquí.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Dirección de entrega. La búsqueda es por coordenadas, así que lat/lng
/// siempre vienen presentes; `distance` es un precálculo opcional del server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAddress {
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Referencia al producto dentro de una línea del pedido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

/// Línea del pedido: cantidad + precio + producto embebido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub product: ProductRef,
}

impl Default for ProductRef {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            price: String::new(),
        }
    }
}

/// Pedido devuelto por la búsqueda por coordenadas.
///
/// El `status` es el ciclo de vida del lado del servidor y es independiente
/// del estado local de entrega (ver `models::session::DeliveryState`).
/// Los campos desconocidos del JSON se ignoran: el backend tiene dos
/// versiones del esquema y la lógica solo necesita resolver `id` y las
/// coordenadas de destino.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: String,
    pub address: OrderAddress,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Coordenadas de destino del pedido.
    pub fn destination(&self) -> Location {
        Location::new(self.address.lat, self.address.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_parses_nested_schema() {
        let json = serde_json::json!({
            "id": "ord-1",
            "order_number": "ORD-1001",
            "status": "processing",
            "total": "520.00",
            "address": {
                "address_line1": "12 Addis St",
                "city": "Addis Ababa",
                "lat": 9.03,
                "lng": 38.74,
                "distance": 1.2
            },
            "order_items": [
                {
                    "id": "item-1",
                    "quantity": 2,
                    "price": "260.00",
                    "product": { "id": "p-1", "name": "Local Honey", "price": "260.00" }
                }
            ]
        });

        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.order_number, "ORD-1001");
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.order_items[0].product.name, "Local Honey");
        assert_eq!(order.destination(), Location::new(9.03, 38.74));
    }

    #[test]
    fn order_tolerates_missing_optional_fields() {
        // Versión simplificada del esquema: solo id y coordenadas resolubles
        let json = serde_json::json!({
            "id": "ord-2",
            "address": { "lat": 8.98, "lng": 38.79 },
            "items_total": 3
        });

        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.id, "ord-2");
        assert!(order.order_items.is_empty());
        assert!(order.address.distance.is_none());
    }
}
