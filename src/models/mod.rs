// ============================================================================
// MODELS - Estructuras compartidas con el backend + máquina de estados local
// ============================================================================

pub mod order;
pub mod session;

pub use order::{Location, Order, OrderAddress, OrderItem, ProductRef};
pub use session::{DeliverySession, DeliveryState, NavigationMode};
