// ============================================================================
// MAIN SCREEN - Pantalla principal del chofer
// ============================================================================
// Header + banners + controles de búsqueda + mapa + lista de pedidos + panel
// de entrega. Composición pura; las acciones delegan en el viewmodel.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, create_element, on_click, on_input, set_attribute, set_class_name,
    ElementBuilder,
};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::DeliveryViewModel;
use crate::views::{order_list, order_panel};

/// ID del contenedor del mapa; el MapView lo sincroniza tras cada render.
pub const MAP_CONTAINER_ID: &str = "delivery-map";

pub fn render_main_screen(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();
    let session = state.session.get();

    let screen = ElementBuilder::new("div")?
        .class("driver-screen")
        .build();

    // ------------------------------------------------------------------
    // Header: marca + toggle de idioma + logout
    // ------------------------------------------------------------------
    let header = ElementBuilder::new("header")?
        .class("driver-header")
        .build();

    let brand = ElementBuilder::new("h1")?
        .class("brand")
        .text(&t("brand", &lang))
        .build();

    let lang_btn = ElementBuilder::new("button")?
        .class("btn-lang")
        .text(if lang == "en" { "አማ" } else { "EN" })
        .build();
    {
        let state_clone = state.clone();
        on_click(&lang_btn, move |_| {
            state_clone.toggle_language();
        })?;
    }

    let logout_btn = ElementBuilder::new("button")?
        .class("btn-logout")
        .text(&t("logout", &lang))
        .build();
    {
        let state_clone = state.clone();
        on_click(&logout_btn, move |_| {
            DeliveryViewModel::new().logout(&state_clone);
        })?;
    }

    append_child(&header, &brand)?;
    append_child(&header, &lang_btn)?;
    append_child(&header, &logout_btn)?;
    append_child(&screen, &header)?;

    // ------------------------------------------------------------------
    // Banners: error global (descartable) + aviso informativo
    // ------------------------------------------------------------------
    if let Some(message) = state.error.borrow().clone() {
        let banner = ElementBuilder::new("div")?
            .class("banner banner-error")
            .text(&message)
            .build();
        let dismiss = ElementBuilder::new("button")?
            .class("banner-dismiss")
            .text("✕")
            .build();
        {
            let state_clone = state.clone();
            on_click(&dismiss, move |_| {
                state_clone.set_error(None);
                state_clone.notify_subscribers();
            })?;
        }
        append_child(&banner, &dismiss)?;
        append_child(&screen, &banner)?;
    }

    if let Some(message) = state.info.borrow().clone() {
        let banner = ElementBuilder::new("div")?
            .class("banner banner-info")
            .text(&message)
            .build();
        append_child(&screen, &banner)?;
    }

    // ------------------------------------------------------------------
    // Controles de búsqueda: origen editable + radio + detectar + buscar
    // ------------------------------------------------------------------
    let controls = ElementBuilder::new("div")?
        .class("search-controls")
        .build();

    let lat_input = coordinate_input(state, "search-lat", session.search_origin.lat, |s, v| {
        s.search_origin.lat = v;
    })?;
    let lng_input = coordinate_input(state, "search-lng", session.search_origin.lng, |s, v| {
        s.search_origin.lng = v;
    })?;
    let radius_input = coordinate_input(state, "search-radius", session.radius_km, |s, v| {
        s.radius_km = v;
    })?;

    append_child(&controls, &labeled(&t("latitude", &lang), &lat_input)?)?;
    append_child(&controls, &labeled(&t("longitude", &lang), &lng_input)?)?;
    append_child(&controls, &labeled(&t("radius_km", &lang), &radius_input)?)?;

    let detect_btn = ElementBuilder::new("button")?
        .class("btn-detect")
        .text(&if *state.locating.borrow() {
            t("locating", &lang)
        } else {
            t("detect_location", &lang)
        })
        .build();
    if *state.locating.borrow() {
        set_attribute(&detect_btn, "disabled", "true")?;
    }
    {
        let state_clone = state.clone();
        on_click(&detect_btn, move |_| {
            let state_inner = state_clone.clone();
            spawn_local(async move {
                DeliveryViewModel::new().detect_location(&state_inner).await;
            });
        })?;
    }
    append_child(&controls, &detect_btn)?;

    let search_btn = ElementBuilder::new("button")?
        .class("btn-search")
        .text(&if *state.searching.borrow() {
            t("searching", &lang)
        } else {
            t("search", &lang)
        })
        .build();
    // Deshabilitado en vuelo y durante una entrega activa
    if *state.searching.borrow() || !session.is_idle() {
        set_attribute(&search_btn, "disabled", "true")?;
    }
    {
        let state_clone = state.clone();
        on_click(&search_btn, move |_| {
            let state_inner = state_clone.clone();
            spawn_local(async move {
                DeliveryViewModel::new().search(&state_inner).await;
            });
        })?;
    }
    append_child(&controls, &search_btn)?;
    append_child(&screen, &controls)?;

    // ------------------------------------------------------------------
    // Cuerpo: mapa + lista de pedidos
    // ------------------------------------------------------------------
    let body = ElementBuilder::new("div")?
        .class("driver-body")
        .build();

    let map_container = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("map-container")
        .build();
    append_child(&body, &map_container)?;

    let list = order_list::render_order_list(state)?;
    append_child(&body, &list)?;
    append_child(&screen, &body)?;

    // Panel de entrega (solo con pedido seleccionado)
    if session.selected_order().is_some() {
        let panel = order_panel::render_order_panel(state)?;
        append_child(&screen, &panel)?;
    }

    Ok(screen)
}

/// Input numérico que actualiza la sesión en cada tecla, sin re-render para
/// no perder el foco.
fn coordinate_input(
    state: &AppState,
    id: &str,
    value: f64,
    apply: impl Fn(&mut crate::models::session::DeliverySession, f64) + 'static,
) -> Result<Element, JsValue> {
    let input = create_element("input")?;
    set_attribute(&input, "type", "number")?;
    set_attribute(&input, "step", "any")?;
    set_attribute(&input, "id", id)?;
    set_attribute(&input, "value", &value.to_string())?;
    set_class_name(&input, "coord-input");

    let state_clone = state.clone();
    on_input(&input, move |e: web_sys::InputEvent| {
        if let Some(target) = e
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            if let Ok(parsed) = target.value().parse::<f64>() {
                state_clone.session.with_mut(|s| apply(s, parsed));
            }
        }
    })?;

    Ok(input)
}

fn labeled(label_text: &str, input: &Element) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();
    let label = ElementBuilder::new("label")?
        .text(label_text)
        .build();
    append_child(&group, &label)?;
    append_child(&group, input)?;
    Ok(group)
}
