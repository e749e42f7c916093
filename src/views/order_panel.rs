// ============================================================================
// ORDER PANEL VIEW - Panel de la entrega activa
// ============================================================================
// Cuatro caras según la máquina de estados:
//   idle       → detalle del pedido + confirmar pickup
//   shipping   → selector de navegación (sin modo elegido)
//   shipping   → manifiesto + Change Nav + confirmar dropoff (con modo)
//   delivered  → banner de entrega confirmada
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, set_attribute, ElementBuilder};
use crate::models::order::Order;
use crate::models::session::{DeliverySession, DeliveryState, NavigationMode};
use crate::state::app_state::AppState;
use crate::utils::i18n::t;
use crate::viewmodels::DeliveryViewModel;

pub fn render_order_panel(state: &AppState) -> Result<Element, JsValue> {
    let session = state.session.get();
    let order = match session.selected_order() {
        Some(order) => order.clone(),
        None => {
            return ElementBuilder::new("div").map(|b| b.build());
        }
    };

    let panel = ElementBuilder::new("div")?
        .class("order-panel")
        .build();

    // Error del panel (descartable, no bloquea el reintento)
    if let Some(message) = state.panel_error.borrow().clone() {
        let error = ElementBuilder::new("div")?
            .class("panel-error")
            .text(&message)
            .build();
        let dismiss = ElementBuilder::new("button")?
            .class("banner-dismiss")
            .text("✕")
            .build();
        {
            let state_clone = state.clone();
            on_click(&dismiss, move |_| {
                state_clone.set_panel_error(None);
                state_clone.notify_subscribers();
            })?;
        }
        append_child(&error, &dismiss)?;
        append_child(&panel, &error)?;
    }

    let face = match (session.delivery_state, session.navigation_mode) {
        (DeliveryState::Idle, _) => render_pickup_face(state, &order)?,
        (DeliveryState::Shipping, None) => render_navigation_chooser(state)?,
        (DeliveryState::Shipping, Some(_)) => render_dropoff_face(state, &session, &order)?,
        (DeliveryState::Delivered, _) => render_delivered_face(state)?,
    };
    append_child(&panel, &face)?;

    Ok(panel)
}

/// Detalle del pedido + botón de pickup (idle, pedido seleccionado).
fn render_pickup_face(state: &AppState, order: &Order) -> Result<Element, JsValue> {
    let lang = state.language();

    let face = ElementBuilder::new("div")?
        .class("panel-face panel-pickup")
        .build();

    let close = ElementBuilder::new("button")?
        .class("btn-close")
        .text("✕")
        .build();
    {
        let state_clone = state.clone();
        on_click(&close, move |_| {
            if state_clone.session.with_mut(|s| s.clear_selection()) {
                state_clone.set_panel_error(None);
                state_clone.notify_subscribers();
            }
        })?;
    }
    append_child(&face, &close)?;

    let title = ElementBuilder::new("h3")?
        .text(&order.order_number)
        .build();
    append_child(&face, &title)?;

    append_child(&face, &render_manifest(order)?)?;

    let address = ElementBuilder::new("div")?
        .class("panel-address")
        .text(&format!("{}, {}", order.address.address_line1, order.address.city))
        .build();
    append_child(&face, &address)?;

    let pickup_btn = ElementBuilder::new("button")?
        .class("btn-primary")
        .text(&t("confirm_pickup", &lang))
        .build();
    if *state.updating_status.borrow() {
        set_attribute(&pickup_btn, "disabled", "true")?;
    }
    {
        let state_clone = state.clone();
        let order_id = order.id.clone();
        on_click(&pickup_btn, move |_| {
            let state_inner = state_clone.clone();
            let id = order_id.clone();
            spawn_local(async move {
                DeliveryViewModel::new().start_delivery(&state_inner, &id).await;
            });
        })?;
    }
    append_child(&face, &pickup_btn)?;

    Ok(face)
}

/// Selector de método de navegación (shipping, sin modo elegido).
fn render_navigation_chooser(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();

    let face = ElementBuilder::new("div")?
        .class("panel-face panel-navigation")
        .build();

    // Cerrar el selector abandona el episodio de shipping
    let close = ElementBuilder::new("button")?
        .class("btn-close")
        .text("✕")
        .build();
    {
        let state_clone = state.clone();
        on_click(&close, move |_| {
            DeliveryViewModel::new().cancel_delivery(&state_clone);
        })?;
    }
    append_child(&face, &close)?;

    let title = ElementBuilder::new("h3")?
        .text(&t("choose_navigation", &lang))
        .build();
    append_child(&face, &title)?;

    let integrated_btn = ElementBuilder::new("button")?
        .class("btn-nav")
        .text(&t("integrated_map", &lang))
        .build();
    {
        let state_clone = state.clone();
        on_click(&integrated_btn, move |_| {
            DeliveryViewModel::new()
                .select_navigation_mode(&state_clone, NavigationMode::Integrated);
        })?;
    }
    append_child(&face, &integrated_btn)?;

    let external_btn = ElementBuilder::new("button")?
        .class("btn-nav")
        .text(&t("external_maps", &lang))
        .build();
    {
        let state_clone = state.clone();
        on_click(&external_btn, move |_| {
            DeliveryViewModel::new()
                .select_navigation_mode(&state_clone, NavigationMode::External);
        })?;
    }
    append_child(&face, &external_btn)?;

    Ok(face)
}

/// Manifiesto + Change Nav + confirmar dropoff (shipping con modo elegido).
fn render_dropoff_face(
    state: &AppState,
    session: &DeliverySession,
    order: &Order,
) -> Result<Element, JsValue> {
    let lang = state.language();

    let face = ElementBuilder::new("div")?
        .class("panel-face panel-dropoff")
        .build();

    let title = ElementBuilder::new("h3")?
        .text(&order.order_number)
        .build();
    append_child(&face, &title)?;

    let mode_label = match session.navigation_mode {
        Some(NavigationMode::External) => t("external_maps", &lang),
        _ => t("integrated_map", &lang),
    };
    let mode = ElementBuilder::new("div")?
        .class("panel-nav-mode")
        .text(&mode_label)
        .build();
    append_child(&face, &mode)?;

    append_child(&face, &render_manifest(order)?)?;

    let change_btn = ElementBuilder::new("button")?
        .class("btn-secondary")
        .text(&t("change_nav", &lang))
        .build();
    {
        let state_clone = state.clone();
        on_click(&change_btn, move |_| {
            DeliveryViewModel::new().change_navigation(&state_clone);
        })?;
    }
    append_child(&face, &change_btn)?;

    let dropoff_btn = ElementBuilder::new("button")?
        .class("btn-primary")
        .text(&t("confirm_dropoff", &lang))
        .build();
    if *state.updating_status.borrow() {
        set_attribute(&dropoff_btn, "disabled", "true")?;
    }
    {
        let state_clone = state.clone();
        let order_id = order.id.clone();
        on_click(&dropoff_btn, move |_| {
            let state_inner = state_clone.clone();
            let id = order_id.clone();
            spawn_local(async move {
                DeliveryViewModel::new().complete_delivery(&state_inner, &id).await;
            });
        })?;
    }
    append_child(&face, &dropoff_btn)?;

    Ok(face)
}

/// Banner de entrega confirmada; la sesión vuelve sola a idle al cerrar la
/// ventana de confirmación.
fn render_delivered_face(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();

    let face = ElementBuilder::new("div")?
        .class("panel-face panel-delivered")
        .build();

    let banner = ElementBuilder::new("div")?
        .class("delivered-banner")
        .text(&format!("🎉 {}", t("delivered", &lang)))
        .build();
    append_child(&face, &banner)?;

    Ok(face)
}

/// Líneas del pedido: cantidad × producto, precio.
fn render_manifest(order: &Order) -> Result<Element, JsValue> {
    let manifest = ElementBuilder::new("ul")?
        .class("order-manifest")
        .build();

    for item in &order.order_items {
        let line = ElementBuilder::new("li")?
            .class("manifest-item")
            .text(&format!(
                "{}× {} - {} ETB",
                item.quantity, item.product.name, item.price
            ))
            .build();
        append_child(&manifest, &line)?;
    }

    Ok(manifest)
}
