use wms::GetMapParams;

/// Handle to one renderable layer inside a backend.
///
/// Intentionally a small copyable value so registries can store it without
/// borrowing into the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackendLayer(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The engine is not ready to take layers (e.g. globe not initialized).
    Unavailable(String),
    /// The engine rejected the layer.
    AddLayer(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Unavailable(msg) => write!(f, "backend unavailable: {msg}"),
            BackendError::AddLayer(msg) => write!(f, "backend rejected layer: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Everything a backend needs to materialize one WMS overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRequest {
    /// WMS endpoint URL the engine should issue GetMap requests against.
    pub url: String,
    pub params: GetMapParams,
    /// Draw rank; derived from the geometry class, never set by hand.
    pub stack_order: i32,
    pub visible: bool,
    pub opacity: f64,
}

/// The seam between the synchronizer and a rendering engine.
///
/// Implementations wrap the 2D map and the 3D globe. All methods are
/// synchronous; asynchronous engine initialization happens before a backend
/// accepts its first `add_layer`.
pub trait ImageryBackend {
    fn add_layer(&mut self, request: &LayerRequest) -> Result<BackendLayer, BackendError>;
    fn set_visible(&mut self, layer: BackendLayer, visible: bool);
    fn set_opacity(&mut self, layer: BackendLayer, opacity: f64);
    fn request_render(&mut self);
}
