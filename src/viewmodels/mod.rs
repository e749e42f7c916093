pub mod delivery_viewmodel;

pub use delivery_viewmodel::{DeliveryError, DeliveryViewModel};
