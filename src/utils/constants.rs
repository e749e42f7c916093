/// URL base del backend
/// Configurada en tiempo de compilación:
/// - Producción: https://api.redseamart.et (por defecto)
/// - Otros entornos: via BACKEND_URL env var / .env
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "https://api.redseamart.et",
};

/// Base del deep link de direcciones de la app de mapas externa
pub const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// Radio de la geocerca que habilita el dropoff, en metros
pub const GEOFENCE_RADIUS_M: u32 = 10;

/// Timeout de la lectura de geolocalización, en milisegundos
pub const GEOLOCATION_TIMEOUT_MS: u32 = 10_000;

/// Ventana de confirmación tras el dropoff, antes de volver a Idle.
/// Es una pausa de UX, no un reintento.
pub const DELIVERED_SETTLE_MS: u32 = 2_500;

/// Origen de búsqueda por defecto (Addis Abeba)
pub const DEFAULT_LAT: f64 = 9.03;
pub const DEFAULT_LNG: f64 = 38.74;
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Claves de localStorage: lo único que persiste entre sesiones
pub const STORAGE_KEY_TOKEN: &str = "redseamart_token";
pub const STORAGE_KEY_LANG: &str = "redseamart_lang";
