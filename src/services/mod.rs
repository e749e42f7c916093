// ============================================================================
// SERVICES - SOLO comunicación con colaboradores externos
// ============================================================================

pub mod api_client;
pub mod geolocation;

pub use api_client::{ApiClient, ApiError};
pub use geolocation::{current_position, GeolocationError};
