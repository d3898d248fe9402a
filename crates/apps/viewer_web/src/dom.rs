//! DOM wiring.
//!
//! The page owns the markup; this module only attaches listeners and flips
//! visibility. A missing element is reported once on the console and the
//! operation becomes a no-op.

use viewer::ViewMode;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

/// 2D map container and the globe container it swaps with.
const MAP_CONTAINER_ID: &str = "map";
const GLOBE_CONTAINER_ID: &str = "cesiumContainer";

pub(crate) fn console_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn document() -> Option<Document> {
    let doc = web_sys::window().and_then(|w| w.document());
    if doc.is_none() {
        console_warn("no document available");
    }
    doc
}

fn element(id: &str) -> Option<Element> {
    let el = document()?.get_element_by_id(id);
    if el.is_none() {
        console_warn(&format!("missing element #{id}"));
    }
    el
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        console_warn(&format!("could not attach {event} listener"));
    }
    // Listeners live for the lifetime of the page.
    closure.forget();
}

fn event_input(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into::<HtmlInputElement>().ok()
}

fn event_select(event: &Event) -> Option<HtmlSelectElement> {
    event.target()?.dyn_into::<HtmlSelectElement>().ok()
}

fn set_display(id: &str, visible: bool) {
    let Some(el) = element(id) else { return };
    let Some(el) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let _ = el
        .style()
        .set_property("display", if visible { "block" } else { "none" });
}

/// Swaps the 2D and 3D containers.
pub(crate) fn show_view(mode: ViewMode) {
    set_display(MAP_CONTAINER_ID, mode == ViewMode::TwoD);
    set_display(GLOBE_CONTAINER_ID, mode == ViewMode::ThreeD);
}

/// Shows or hides one sidebar row (the `.form-check` wrapping a checkbox).
pub(crate) fn set_layer_row_visible(layer_id: &str, visible: bool) {
    let Some(doc) = document() else { return };
    let Some(input) = doc.get_element_by_id(layer_id) else {
        return;
    };
    let row = match input.closest(".form-check") {
        Ok(Some(row)) => row,
        _ => return,
    };
    if let Some(row) = row.dyn_ref::<HtmlElement>() {
        let _ = row
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }
}

/// Fills a layer's legend container and wires its collapse toggle.
pub(crate) fn set_legend(layer_id: &str, html: &str) {
    let Some(container) = element(&format!("legend-{layer_id}")) else {
        return;
    };
    container.set_inner_html(html);

    let (button, content) = match (
        container.query_selector(".toggle-legend"),
        container.query_selector(".legend-content"),
    ) {
        (Ok(Some(button)), Ok(Some(content))) => (button, content),
        _ => return,
    };
    let Ok(content) = content.dyn_into::<HtmlElement>() else {
        return;
    };
    let icon = button.query_selector("i").ok().flatten();
    listen(&button, "click", move |_| {
        let style = content.style();
        let collapsed = style
            .get_property_value("display")
            .map(|v| v == "none")
            .unwrap_or(false);
        let _ = style.set_property("display", if collapsed { "block" } else { "none" });
        if let Some(icon) = &icon {
            icon.set_class_name(if collapsed {
                "fas fa-chevron-down"
            } else {
                "fas fa-chevron-right"
            });
        }
    });
}

pub(crate) fn clear_legend(layer_id: &str) {
    if let Some(container) = document().and_then(|d| d.get_element_by_id(&format!("legend-{layer_id}"))) {
        container.set_inner_html("");
    }
}

/// Attaches all UI listeners: one checkbox per layer, the sidebar search
/// box, the 2D/3D toggle and the comparison controls.
pub(crate) fn wire_events(layer_ids: &[String]) {
    let Some(doc) = document() else { return };

    for id in layer_ids {
        match doc.get_element_by_id(id) {
            Some(el) => listen(&el, "change", |event| {
                if let Some(input) = event_input(&event) {
                    crate::set_layer_active(&input.id(), input.checked());
                }
            }),
            None => console_warn(&format!("missing checkbox for layer {id}")),
        }
    }

    if let Some(el) = element("layerSearch") {
        listen(&el, "input", |event| {
            if let Some(input) = event_input(&event) {
                crate::filter_layer_list(&input.value());
            }
        });
    }

    if let Some(el) = element("toggle3D") {
        listen(&el, "click", |_| crate::toggle_view_mode());
    }

    if let Some(el) = element("compareEnter") {
        listen(&el, "click", |_| crate::enter_comparison());
    }
    if let Some(el) = element("compareClose") {
        listen(&el, "click", |_| crate::exit_comparison());
    }

    for (slot, select_id, slider_id) in
        [(1u8, "compareLayer1", "compareOpacity1"), (2u8, "compareLayer2", "compareOpacity2")]
    {
        if let Some(el) = element(select_id) {
            listen(&el, "change", move |event| {
                if let Some(select) = event_select(&event) {
                    let value = select.value();
                    let layer = if value.is_empty() { None } else { Some(value) };
                    crate::select_comparison_layer(slot, layer);
                }
            });
        }
        if let Some(el) = element(slider_id) {
            listen(&el, "input", move |event| {
                if let Some(input) = event_input(&event)
                    && let Ok(percent) = input.value().parse::<f64>()
                {
                    crate::set_comparison_opacity(slot, percent);
                }
            });
        }
    }
}
