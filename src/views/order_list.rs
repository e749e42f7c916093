// ============================================================================
// ORDER LIST VIEW - Lista de pedidos cercanos
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::order::Order;
use crate::state::app_state::AppState;
use crate::utils::i18n::t;

pub fn render_order_list(state: &AppState) -> Result<Element, JsValue> {
    let lang = state.language();
    let session = state.session.get();

    let container = ElementBuilder::new("div")?
        .class("order-list")
        .build();

    let title = ElementBuilder::new("h2")?
        .text(&t("nearby_orders", &lang))
        .build();
    append_child(&container, &title)?;

    if session.orders.is_empty() {
        let empty = ElementBuilder::new("div")?
            .class("order-list-empty")
            .text(&t("no_products", &lang))
            .build();
        append_child(&container, &empty)?;
        return Ok(container);
    }

    for order in &session.orders {
        let selected = session.selected_order_id.as_deref() == Some(order.id.as_str());
        let card = render_order_card(state, order, selected)?;
        append_child(&container, &card)?;
    }

    Ok(container)
}

fn render_order_card(state: &AppState, order: &Order, selected: bool) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class(if selected {
            "order-card selected"
        } else {
            "order-card"
        })
        .build();

    let number = ElementBuilder::new("div")?
        .class("order-number")
        .text(&order.order_number)
        .build();

    let address = ElementBuilder::new("div")?
        .class("order-address")
        .text(&format!("{}, {}", order.address.address_line1, order.address.city))
        .build();

    let total = ElementBuilder::new("div")?
        .class("order-total")
        .text(&format!("{} ETB", order.total))
        .build();

    append_child(&card, &number)?;
    append_child(&card, &address)?;
    append_child(&card, &total)?;

    if let Some(distance) = order.address.distance {
        let dist = ElementBuilder::new("div")?
            .class("order-distance")
            .text(&format!("{:.1} km", distance))
            .build();
        append_child(&card, &dist)?;
    }

    // La selección solo prospera en idle; select_order ignora el click
    // durante una entrega activa
    {
        let state_clone = state.clone();
        let order_id = order.id.clone();
        on_click(&card, move |_| {
            if state_clone.session.with_mut(|s| s.select_order(&order_id)) {
                state_clone.notify_subscribers();
            }
        })?;
    }

    Ok(card)
}
