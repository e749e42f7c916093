// ============================================================================
// SESSION STATE - Envoltorio compartido de la sesión de entrega
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::session::DeliverySession;

/// Celda compartida de la sesión. La sesión en sí es puro estado (ver
/// `models::session`); acá solo vive el Rc<RefCell> que comparten las vistas
/// y el viewmodel.
#[derive(Clone)]
pub struct SessionState {
    session: Rc<RefCell<DeliverySession>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session: Rc::new(RefCell::new(DeliverySession::new())),
        }
    }

    /// Leer un snapshot de la sesión.
    pub fn get(&self) -> DeliverySession {
        self.session.borrow().clone()
    }

    /// Mutar la sesión en el lugar y devolver el resultado del closure.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut DeliverySession) -> R) -> R {
        f(&mut self.session.borrow_mut())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
