// ============================================================================
// GEOLOCATION - Lectura puntual de posición del navegador
// ============================================================================
// Una sola lectura con máxima precisión y timeout duro de 10s. El callback
// del navegador se adapta a un Promise para poder esperarlo con JsFuture.
// ============================================================================

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::models::order::Location;
use crate::utils::constants::GEOLOCATION_TIMEOUT_MS;

/// Fallo del proveedor de geolocalización. Distinto de la violación de
/// geocerca: acá ni siquiera hay lectura utilizable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// El navegador no expone la API
    Unsupported,
    /// El usuario negó el permiso
    PermissionDenied,
    /// El dispositivo no pudo producir una posición
    Unavailable,
    /// Venció el timeout sin lectura
    Timeout,
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            GeolocationError::Unsupported => "Geolocation is not supported",
            GeolocationError::PermissionDenied => "Location permission denied",
            GeolocationError::Unavailable => "Location unavailable",
            GeolocationError::Timeout => "Location request timed out",
        };
        write!(f, "{}", msg)
    }
}

/// Obtener una lectura fresca de posición con `enableHighAccuracy` y el
/// timeout configurado. Cada intento de dropoff pide una lectura nueva.
pub async fn current_position() -> Result<Location, GeolocationError> {
    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(GeolocationError::Unsupported)?;

    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if geolocation
            .get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &options,
            )
            .is_err()
        {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("geolocation call failed"));
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: web_sys::Position = value
                .dyn_into()
                .map_err(|_| GeolocationError::Unavailable)?;
            let coords = position.coords();
            let location = Location::new(coords.latitude(), coords.longitude());
            log::info!("📍 Posición obtenida: ({}, {})", location.lat, location.lng);
            Ok(location)
        }
        Err(err) => Err(map_position_error(err)),
    }
}

fn map_position_error(err: JsValue) -> GeolocationError {
    if let Some(position_error) = err.dyn_ref::<web_sys::PositionError>() {
        // Códigos del estándar: 1 permiso, 2 sin posición, 3 timeout
        let error = match position_error.code() {
            1 => GeolocationError::PermissionDenied,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unavailable,
        };
        log::warn!("⚠️ Geolocalización falló: {}", error);
        return error;
    }
    log::warn!("⚠️ Geolocalización falló sin PositionError");
    GeolocationError::Unavailable
}
