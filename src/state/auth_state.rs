// ============================================================================
// AUTH STATE - Token de autenticación
// ============================================================================
// El token es el único credencial persistido; se espeja en localStorage
// bajo STORAGE_KEY_TOKEN y se adjunta a cada request como Bearer.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::constants::STORAGE_KEY_TOKEN;
use crate::utils::storage;

#[derive(Clone)]
pub struct AuthState {
    token: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    /// Crear estado de auth, restaurando el token guardado si existe.
    pub fn new() -> Self {
        Self {
            token: Rc::new(RefCell::new(storage::load_string(STORAGE_KEY_TOKEN))),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// Guardar token tras un login exitoso.
    pub fn set_token(&self, token: String) {
        if let Err(e) = storage::save_string(STORAGE_KEY_TOKEN, &token) {
            log::error!("❌ Error guardando token: {}", e);
        }
        *self.token.borrow_mut() = Some(token);
    }

    /// Limpiar credencial (logout). Idempotente.
    pub fn clear(&self) {
        let _ = storage::remove_key(STORAGE_KEY_TOKEN);
        *self.token.borrow_mut() = None;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
