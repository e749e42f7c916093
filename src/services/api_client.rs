// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP. El contrato de error
// es uniforme en los tres endpoints: mensaje en `message`, o el primer
// elemento de `error.errors`, con el status HTTP preservado para que el
// controlador clasifique los 401/403.
// ============================================================================

use gloo_net::http::Request;
use serde_json::Value;

use crate::models::order::Order;
use crate::utils::constants::BACKEND_URL;

/// Error de una llamada remota. `status == 0` significa fallo de red o de
/// parseo, sin respuesta HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }

    /// 401/403: siempre se resuelve con logout forzado a nivel controlador.
    pub fn is_auth_failure(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Extraer el mensaje de un body de error del backend: `message`, o
/// `error.errors[0]` si existe, o el genérico de la operación.
pub fn extract_error_message(body: &Value, default: &str) -> String {
    if let Some(nested) = body
        .get("error")
        .and_then(|e| e.get("errors"))
        .and_then(|e| e.get(0))
        .and_then(|e| e.as_str())
    {
        return nested.to_string();
    }
    body.get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Normalizar la respuesta de búsqueda a una secuencia ordenada de pedidos.
/// El backend responde con cualquiera de tres formas:
/// `{data:{rows:[...]}}`, `{data:[...]}` o `[...]`.
pub fn normalize_search_response(body: Value) -> Vec<Order> {
    let rows = if let Some(rows) = body.get("data").and_then(|d| d.get("rows")) {
        rows.clone()
    } else if body.get("data").map(|d| d.is_array()).unwrap_or(false) {
        body["data"].clone()
    } else if body.is_array() {
        body
    } else {
        return Vec::new();
    };

    serde_json::from_value(rows).unwrap_or_default()
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
        }
    }

    /// Login del chofer. Devuelve el token de `data.token`.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({
            "phone_number": phone_number,
            "password": password,
        });

        log::info!("🔐 Iniciando sesión para: {}", phone_number);

        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| ApiError::network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(self.decode_error(response, "Login failed").await);
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::network(format!("Parse error: {}", e)))?;

        value
            .get("data")
            .and_then(|d| d.get("token"))
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| ApiError::network("Token not found in response"))
    }

    /// Búsqueda de pedidos por coordenadas y radio (km).
    pub async fn search_by_coordinates(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        token: Option<&str>,
    ) -> Result<Vec<Order>, ApiError> {
        let url = format!(
            "{}/orders/search/by-coordinates?latitude={}&longitude={}&radius={}",
            self.base_url, lat, lng, radius_km
        );

        log::info!("🔍 Buscando pedidos en ({}, {}) radio {}km", lat, lng, radius_km);

        let mut request = Request::get(&url);
        if let Some(token) = token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(self.decode_error(response, "Search failed").await);
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::network(format!("Parse error: {}", e)))?;

        let orders = normalize_search_response(value);
        log::info!("✅ Búsqueda completada: {} pedidos", orders.len());
        Ok(orders)
    }

    /// Actualizar el status remoto de un pedido ("shipped" | "delivered").
    pub async fn update_order_status(
        &self,
        id: &str,
        status: &str,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/orders", self.base_url);
        let body = serde_json::json!({ "id": id, "status": status });

        log::info!("📦 Actualizando pedido {} → {}", id, status);

        let mut request = Request::put(&url);
        if let Some(token) = token {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .json(&body)
            .map_err(|e| ApiError::network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::network(format!("Network error: {}", e)))?;

        if !response.ok() {
            return Err(
                self.decode_error(response, "Failed to update order status")
                    .await,
            );
        }

        log::info!("✅ Pedido {} ahora {}", id, status);
        Ok(())
    }

    /// Convertir una respuesta no-2xx al error uniforme del contrato.
    async fn decode_error(&self, response: gloo_net::http::Response, default: &str) -> ApiError {
        let status = response.status();
        let message = match response.json::<Value>().await {
            Ok(body) => extract_error_message(&body, default),
            Err(_) => default.to_string(),
        };
        log::error!("❌ HTTP {}: {}", status, message);
        ApiError { status, message }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_orders() -> Value {
        json!([
            {
                "id": "o1",
                "order_number": "ORD-1",
                "address": { "lat": 9.03, "lng": 38.74 }
            },
            {
                "id": "o2",
                "order_number": "ORD-2",
                "address": { "lat": 9.05, "lng": 38.76 }
            }
        ])
    }

    #[test]
    fn normalizes_all_three_response_shapes() {
        let wrapped = json!({ "data": { "rows": two_orders() } });
        let data_array = json!({ "data": two_orders() });
        let bare = two_orders();

        let a = normalize_search_response(wrapped);
        let b = normalize_search_response(data_array);
        let c = normalize_search_response(bare);

        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        assert_eq!(b, c);
        // El orden del servidor se preserva
        assert_eq!(a[0].id, "o1");
        assert_eq!(a[1].id, "o2");
    }

    #[test]
    fn unrecognized_shape_normalizes_to_empty() {
        assert!(normalize_search_response(json!({ "ok": true })).is_empty());
        assert!(normalize_search_response(json!(null)).is_empty());
        assert!(normalize_search_response(json!({ "data": { "count": 3 } })).is_empty());
    }

    #[test]
    fn error_message_prefers_nested_errors() {
        let body = json!({
            "message": "Validation failed",
            "error": { "errors": ["Phone number is not registered"] }
        });
        assert_eq!(
            extract_error_message(&body, "Login failed"),
            "Phone number is not registered"
        );
    }

    #[test]
    fn error_message_falls_back_to_message_then_default() {
        let with_message = json!({ "message": "Order not found" });
        assert_eq!(
            extract_error_message(&with_message, "Search failed"),
            "Order not found"
        );

        let empty = json!({});
        assert_eq!(extract_error_message(&empty, "Search failed"), "Search failed");
    }

    #[test]
    fn auth_failure_classification() {
        let unauthorized = ApiError { status: 401, message: "Unauthorized".into() };
        let forbidden = ApiError { status: 403, message: "Forbidden".into() };
        let server = ApiError { status: 500, message: "Internal".into() };
        let network = ApiError::network("timeout");

        assert!(unauthorized.is_auth_failure());
        assert!(forbidden.is_auth_failure());
        assert!(!server.is_auth_failure());
        assert!(!network.is_auth_failure());
    }
}
