// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::{AuthState, SessionState};
use crate::utils::constants::STORAGE_KEY_LANG;
use crate::utils::storage;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub auth: AuthState,

    // UI State
    pub language: Rc<RefCell<String>>,

    // Banners de error: global (búsqueda/login) y del panel de entrega
    pub error: Rc<RefCell<Option<String>>>,
    pub panel_error: Rc<RefCell<Option<String>>>,
    // Aviso informativo (búsqueda sin resultados); no es un error
    pub info: Rc<RefCell<Option<String>>>,

    // Guards de vuelo único por categoría de operación
    pub searching: Rc<RefCell<bool>>,
    pub updating_status: Rc<RefCell<bool>>,
    pub locating: Rc<RefCell<bool>>,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    /// Crear nuevo estado de aplicación, restaurando preferencias guardadas
    pub fn new() -> Self {
        let language = storage::load_string(STORAGE_KEY_LANG).unwrap_or_else(|| "en".to_string());

        Self {
            session: SessionState::new(),
            auth: AuthState::new(),

            language: Rc::new(RefCell::new(language)),

            error: Rc::new(RefCell::new(None)),
            panel_error: Rc::new(RefCell::new(None)),
            info: Rc::new(RefCell::new(None)),

            searching: Rc::new(RefCell::new(false)),
            updating_status: Rc::new(RefCell::new(false)),
            locating: Rc::new(RefCell::new(false)),

            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn language(&self) -> String {
        self.language.borrow().clone()
    }

    /// Cambiar idioma y persistir la preferencia
    pub fn set_language(&self, lang: &str) {
        *self.language.borrow_mut() = lang.to_string();
        if let Err(e) = storage::save_string(STORAGE_KEY_LANG, lang) {
            log::error!("❌ Error guardando idioma: {}", e);
        }
    }

    /// Alternar en/am (el toggle del header)
    pub fn toggle_language(&self) {
        let next = if self.language() == "en" { "am" } else { "en" };
        self.set_language(next);
        self.notify_subscribers();
    }

    pub fn set_error(&self, message: Option<String>) {
        *self.error.borrow_mut() = message;
    }

    pub fn set_panel_error(&self, message: Option<String>) {
        *self.panel_error.borrow_mut() = message;
    }

    pub fn set_info(&self, message: Option<String>) {
        *self.info.borrow_mut() = message;
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers de cambios
    pub fn notify_subscribers(&self) {
        for callback in self.change_subscribers.borrow().iter() {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
