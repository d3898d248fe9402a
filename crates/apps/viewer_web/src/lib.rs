//! Browser front-end for the dual-viewer WMS overlay.
//!
//! Expected page contract:
//! - one checkbox per layer, element id equal to the catalog layer id, plus
//!   a `#legend-<id>` container next to it;
//! - `#map` (OpenLayers) and `#cesiumContainer` (Cesium) containers;
//! - `#layerSearch` text input, `#toggle3D` button;
//! - comparison controls `#compareEnter`, `#compareClose`, `#compareLayer1`,
//!   `#compareLayer2`, `#compareOpacity1`, `#compareOpacity2`;
//! - a `window.geobridge` object wrapping the two mapping engines (see
//!   `geobridge`).
//!
//! All state lives in one [`ViewController`]; DOM callbacks and the
//! exported functions below are thin adapters over it.

mod dom;
mod geobridge;

use std::cell::RefCell;

use catalog::{LayerId, default_catalog};
use console_error_panic_hook::set_once;
use viewer::{CompareSlot, SwitchOutcome, ViewController, ViewMode};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use wms::WmsEndpoint;

use crate::geobridge::{GlobeBridge, MapBridge};

type Controller = ViewController<MapBridge, GlobeBridge>;

thread_local! {
    static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
}

fn with_controller<R>(f: impl FnOnce(&mut Controller) -> R) -> Option<R> {
    CONTROLLER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(controller) => Some(f(controller)),
        None => {
            dom::console_warn("viewer not initialized");
            None
        }
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the controller (creating all hidden 2D layers) and wires the DOM.
#[wasm_bindgen]
pub fn init_viewer() {
    let controller = Controller::new(
        default_catalog(),
        WmsEndpoint::default(),
        MapBridge,
        GlobeBridge,
    );
    let layer_ids: Vec<String> = controller.catalog().ids().map(|id| id.0.clone()).collect();
    CONTROLLER.with(|cell| *cell.borrow_mut() = Some(controller));

    dom::wire_events(&layer_ids);
    dom::show_view(ViewMode::TwoD);
}

/// Checkbox adapter: toggles a layer and attaches or removes its legend.
#[wasm_bindgen]
pub fn set_layer_active(layer_id: &str, active: bool) {
    let id = LayerId::new(layer_id);
    let known = with_controller(|c| {
        let known = c.catalog().contains(&id);
        c.set_layer_active(&id, active);
        known
    });
    if known != Some(true) {
        return;
    }
    if active {
        if let Some(html) = legend_html(layer_id) {
            dom::set_legend(layer_id, &html);
        }
    } else {
        dom::clear_legend(layer_id);
    }
}

#[wasm_bindgen]
pub fn set_layer_opacity(layer_id: &str, opacity: f64) {
    let id = LayerId::new(layer_id);
    with_controller(|c| c.set_layer_opacity(&id, opacity));
}

/// Legend markup for one layer: custom swatch rows from the catalog, or an
/// `<img>` against the server's GetLegendGraphic endpoint.
#[wasm_bindgen]
pub fn legend_html(layer_id: &str) -> Option<String> {
    with_controller(|c| {
        c.catalog()
            .get(&LayerId::new(layer_id))
            .map(|desc| legend::render_legend(desc, c.endpoint()))
    })
    .flatten()
}

/// The 2D/3D toggle button.
#[wasm_bindgen]
pub fn toggle_view_mode() {
    let target = with_controller(|c| match c.mode() {
        ViewMode::TwoD => ViewMode::ThreeD,
        ViewMode::ThreeD => ViewMode::TwoD,
    });
    if let Some(mode) = target {
        request_mode(mode);
    }
}

fn request_mode(mode: ViewMode) {
    let Some(outcome) = with_controller(|c| c.switch_mode(mode)) else {
        return;
    };
    match outcome {
        SwitchOutcome::Switched(active) => dom::show_view(active),
        SwitchOutcome::GlobeInitNeeded => {
            spawn_local(async {
                let result = geobridge::init_globe().await;
                with_controller(|c| {
                    c.globe_initialized(result);
                    if c.mode() == ViewMode::ThreeD {
                        dom::show_view(ViewMode::ThreeD);
                    }
                });
            });
        }
        // An init is already in flight; its completion will switch the view.
        SwitchOutcome::GlobeInitPending => {}
    }
}

/// Sidebar search: hides rows whose display name does not match.
#[wasm_bindgen]
pub fn filter_layer_list(term: &str) {
    let Some((all, matches)) = with_controller(|c| {
        let all: Vec<String> = c.catalog().ids().map(|id| id.0.clone()).collect();
        let matches: Vec<String> = c
            .catalog()
            .search(term)
            .iter()
            .map(|desc| desc.id.0.clone())
            .collect();
        (all, matches)
    }) else {
        return;
    };
    for id in &all {
        dom::set_layer_row_visible(id, matches.contains(id));
    }
}

#[wasm_bindgen]
pub fn enter_comparison() {
    with_controller(|c| c.enter_comparison());
}

#[wasm_bindgen]
pub fn exit_comparison() {
    with_controller(|c| c.exit_comparison());
}

fn slot_from_index(slot: u8) -> Option<CompareSlot> {
    match slot {
        1 => Some(CompareSlot::One),
        2 => Some(CompareSlot::Two),
        _ => {
            dom::console_warn(&format!("invalid comparison slot {slot}"));
            None
        }
    }
}

/// Comparison select adapter. An empty or missing value clears the slot.
#[wasm_bindgen]
pub fn select_comparison_layer(slot: u8, layer_id: Option<String>) {
    let Some(slot) = slot_from_index(slot) else {
        return;
    };
    let layer = layer_id.filter(|id| !id.is_empty()).map(LayerId::new);
    with_controller(|c| c.select_comparison_layer(slot, layer));
}

/// Comparison slider adapter; `percent` is the raw 0–100 slider value.
#[wasm_bindgen]
pub fn set_comparison_opacity(slot: u8, percent: f64) {
    let Some(slot) = slot_from_index(slot) else {
        return;
    };
    if !percent.is_finite() {
        return;
    }
    let percent = percent.clamp(0.0, 100.0) as u8;
    with_controller(|c| c.set_comparison_opacity(slot, percent));
}
