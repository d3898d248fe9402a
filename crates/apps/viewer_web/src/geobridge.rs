//! Bindings to the page's `window.geobridge` object.
//!
//! The host page wraps OpenLayers and Cesium behind a handful of plain
//! functions taking primitive arguments; everything stateful stays on the
//! Rust side. GetMap parameters cross the boundary as a JSON object string
//! using the uppercase WMS keys.

use viewer::{BackendError, BackendLayer, ImageryBackend, LayerRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = mapAddWmsLayer, catch)]
    fn map_add_wms_layer(
        url: &str,
        params_json: &str,
        stack_order: i32,
        visible: bool,
        opacity: f64,
    ) -> Result<u32, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = mapSetLayerVisible)]
    fn map_set_layer_visible(handle: u32, visible: bool);

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = mapSetLayerOpacity)]
    fn map_set_layer_opacity(handle: u32, opacity: f64);

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = mapRequestRender)]
    fn map_request_render();

    /// Resolves once the globe viewer and its terrain are ready.
    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = globeInit)]
    fn globe_init() -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = globeAddWmsLayer, catch)]
    fn globe_add_wms_layer(
        url: &str,
        params_json: &str,
        stack_order: i32,
        visible: bool,
        opacity: f64,
    ) -> Result<u32, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = globeSetLayerVisible)]
    fn globe_set_layer_visible(handle: u32, visible: bool);

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = globeSetLayerOpacity)]
    fn globe_set_layer_opacity(handle: u32, opacity: f64);

    #[wasm_bindgen(js_namespace = ["window", "geobridge"], js_name = globeRequestRender)]
    fn globe_request_render();
}

fn params_json(request: &LayerRequest) -> Result<String, BackendError> {
    serde_json::to_string(&request.params).map_err(|e| BackendError::AddLayer(e.to_string()))
}

fn describe_js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// The OpenLayers map behind the bridge.
#[derive(Debug, Default)]
pub struct MapBridge;

impl ImageryBackend for MapBridge {
    fn add_layer(&mut self, request: &LayerRequest) -> Result<BackendLayer, BackendError> {
        let params = params_json(request)?;
        map_add_wms_layer(
            &request.url,
            &params,
            request.stack_order,
            request.visible,
            request.opacity,
        )
        .map(BackendLayer)
        .map_err(|e| BackendError::AddLayer(describe_js_error(e)))
    }

    fn set_visible(&mut self, layer: BackendLayer, visible: bool) {
        map_set_layer_visible(layer.0, visible);
    }

    fn set_opacity(&mut self, layer: BackendLayer, opacity: f64) {
        map_set_layer_opacity(layer.0, opacity);
    }

    fn request_render(&mut self) {
        map_request_render();
    }
}

/// The Cesium globe behind the bridge. Layer calls are only valid after
/// [`init_globe`] resolved successfully; the controller guarantees that.
#[derive(Debug, Default)]
pub struct GlobeBridge;

impl ImageryBackend for GlobeBridge {
    fn add_layer(&mut self, request: &LayerRequest) -> Result<BackendLayer, BackendError> {
        let params = params_json(request)?;
        globe_add_wms_layer(
            &request.url,
            &params,
            request.stack_order,
            request.visible,
            request.opacity,
        )
        .map(BackendLayer)
        .map_err(|e| BackendError::AddLayer(describe_js_error(e)))
    }

    fn set_visible(&mut self, layer: BackendLayer, visible: bool) {
        globe_set_layer_visible(layer.0, visible);
    }

    fn set_opacity(&mut self, layer: BackendLayer, opacity: f64) {
        globe_set_layer_opacity(layer.0, opacity);
    }

    fn request_render(&mut self) {
        globe_request_render();
    }
}

/// One-shot globe/terrain initialization. Not cancellable; the controller
/// coalesces duplicate requests onto the pending one.
pub async fn init_globe() -> Result<(), BackendError> {
    JsFuture::from(globe_init())
        .await
        .map(|_| ())
        .map_err(|e| BackendError::Unavailable(describe_js_error(e)))
}
