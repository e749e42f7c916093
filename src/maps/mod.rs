// ============================================================================
// MAPS MODULE - Mapa integrado de pedidos
// ============================================================================

pub mod ffi;
pub mod view;

pub use view::MapView;
