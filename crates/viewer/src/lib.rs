//! Dual-viewer synchronization core.
//!
//! Owns the per-viewer layer registries and keeps the 2D map and the 3D
//! globe showing the same active layer set. Rendering engines are reached
//! through the [`ImageryBackend`] trait; nothing here touches the DOM or the
//! network.

pub mod backend;
pub mod comparison;
pub mod controller;
pub mod registry;

pub use backend::{BackendError, BackendLayer, ImageryBackend, LayerRequest};
pub use comparison::{Comparison, ComparisonSnapshot, CompareSlot};
pub use controller::{GlobeStatus, SwitchOutcome, ViewController, ViewMode};
pub use registry::{LayerEntry, LayerRegistry};
