// ============================================================================
// LOGIN VIEW - Formulario de ingreso del chofer
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, create_element, input_value, set_attribute, set_class_name, set_text_content,
    ElementBuilder, on_click,
};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::DeliveryViewModel;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();

    let login_screen = ElementBuilder::new("div")?
        .class("login-screen")
        .build();

    let login_container = ElementBuilder::new("div")?
        .class("login-container")
        .build();

    // Header
    let login_header = ElementBuilder::new("div")?
        .class("login-header")
        .build();

    let logo = ElementBuilder::new("div")?
        .class("login-logo")
        .text("🚚")
        .build();

    let title = ElementBuilder::new("h1")?
        .text(&t("brand", &lang))
        .build();

    let subtitle = ElementBuilder::new("p")?
        .text(&t("marketplace", &lang))
        .build();

    append_child(&login_header, &logo)?;
    append_child(&login_header, &title)?;
    append_child(&login_header, &subtitle)?;

    // Toggle de idioma también en el login
    let lang_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-lang")
        .text(if lang == "en" { "አማ" } else { "EN" })
        .build();
    {
        let state_clone = state.clone();
        on_click(&lang_btn, move |_| {
            state_clone.toggle_language();
        })?;
    }
    append_child(&login_header, &lang_btn)?;

    // Formulario
    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    let phone_group = create_form_group("login-phone", &t("phone", &lang), "tel")?;
    let password_group = create_form_group("login-password", &t("password", &lang), "password")?;

    // Error del login (texto directo, sin re-render)
    let error_div = ElementBuilder::new("div")?
        .id("login-error")?
        .class("login-error")
        .build();

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text(&t("login", &lang))
        .build();

    // Submit: login → token → búsqueda inicial
    {
        let state_clone = state.clone();
        let error_div_clone = error_div.clone();
        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();

            let phone = input_value("login-phone").unwrap_or_default();
            let password = input_value("login-password").unwrap_or_default();
            if phone.is_empty() || password.is_empty() {
                set_text_content(&error_div_clone, &t("error", &state_clone.language()));
                return;
            }

            set_text_content(&error_div_clone, "");
            let state_inner = state_clone.clone();
            let error_inner = error_div_clone.clone();
            spawn_local(async move {
                let vm = DeliveryViewModel::new();
                if let Err(message) = vm.login(&state_inner, &phone, &password).await {
                    set_text_content(&error_inner, &message);
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    append_child(&form, &phone_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &error_div)?;
    append_child(&form, &submit_btn)?;

    append_child(&login_container, &login_header)?;
    append_child(&login_container, &form)?;
    append_child(&login_screen, &login_container)?;

    Ok(login_screen)
}

/// Helper para crear form group
fn create_form_group(id: &str, label_text: &str, input_type: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = create_element("input")?;
    set_attribute(&input, "type", input_type)?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "name", id)?;
    set_class_name(&input, "form-input");

    append_child(&group, &label)?;
    append_child(&group, &input)?;

    Ok(group)
}
