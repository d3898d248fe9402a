//! The view synchronizer.
//!
//! One controller instance owns both registries, both backends and the
//! active-mode flag; DOM callbacks are thin adapters over its methods. The
//! 2D registry is canonical: it is always kept current, and changes are
//! mirrored into the 3D registry whenever the globe is the active view.

use catalog::{LayerCatalog, LayerId};
use tracing::{debug, warn};
use wms::WmsEndpoint;

use crate::backend::{BackendError, ImageryBackend, LayerRequest};
use crate::comparison::{Comparison, ComparisonSnapshot, CompareSlot};
use crate::registry::{LayerEntry, LayerRegistry};

/// 2D overlays draw at full strength; the globe keeps terrain shining
/// through its imagery.
pub const MAP_DEFAULT_OPACITY: f64 = 1.0;
pub const GLOBE_DEFAULT_OPACITY: f64 = 0.8;

/// Which viewer is on screen and receives mutations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewMode {
    TwoD,
    ThreeD,
}

/// Lifecycle of the one-shot asynchronous globe initialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlobeStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Result of a mode-switch request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The mode change took effect immediately.
    Switched(ViewMode),
    /// The caller must run the globe initialization and report back via
    /// [`ViewController::globe_initialized`].
    GlobeInitNeeded,
    /// An initialization is already in flight; this request coalesced onto
    /// it. No second initialization is started.
    GlobeInitPending,
}

pub struct ViewController<M, G> {
    catalog: LayerCatalog,
    endpoint: WmsEndpoint,
    map_backend: M,
    globe_backend: G,
    map_layers: LayerRegistry,
    globe_layers: LayerRegistry,
    mode: ViewMode,
    globe_status: GlobeStatus,
    comparison: Comparison,
}

impl<M: ImageryBackend, G: ImageryBackend> ViewController<M, G> {
    /// Builds the controller and eagerly creates one hidden 2D handle per
    /// catalog entry. 3D handles are created lazily on first activation.
    pub fn new(
        catalog: LayerCatalog,
        endpoint: WmsEndpoint,
        mut map_backend: M,
        globe_backend: G,
    ) -> Self {
        let mut map_layers = LayerRegistry::new();
        for desc in catalog.iter() {
            let request = LayerRequest {
                url: endpoint.wms_url(),
                params: endpoint.get_map_params(&desc.source_name),
                stack_order: desc.geometry.stack_rank(),
                visible: false,
                opacity: MAP_DEFAULT_OPACITY,
            };
            match map_backend.add_layer(&request) {
                Ok(handle) => {
                    map_layers.insert(
                        desc.id.clone(),
                        LayerEntry {
                            handle,
                            visible: false,
                            opacity: MAP_DEFAULT_OPACITY,
                            stack_order: request.stack_order,
                        },
                    );
                }
                Err(err) => {
                    warn!(layer = %desc.id, error = %err, "could not create 2D layer");
                }
            }
        }

        Self {
            catalog,
            endpoint,
            map_backend,
            globe_backend,
            map_layers,
            globe_layers: LayerRegistry::new(),
            mode: ViewMode::TwoD,
            globe_status: GlobeStatus::Idle,
            comparison: Comparison::new(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn globe_status(&self) -> GlobeStatus {
        self.globe_status
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    pub fn endpoint(&self) -> &WmsEndpoint {
        &self.endpoint
    }

    pub fn map_layers(&self) -> &LayerRegistry {
        &self.map_layers
    }

    pub fn globe_layers(&self) -> &LayerRegistry {
        &self.globe_layers
    }

    pub fn map_backend(&self) -> &M {
        &self.map_backend
    }

    pub fn globe_backend(&self) -> &G {
        &self.globe_backend
    }

    /// Shows or hides a layer in the active view. Handles are hidden, never
    /// destroyed; an unknown id is logged and skipped.
    pub fn set_layer_active(&mut self, id: &LayerId, active: bool) {
        if !self.catalog.contains(id) {
            warn!(layer = %id, "unknown layer id, ignoring visibility change");
            return;
        }
        self.apply_state(id, Some(active), None);
        self.request_render();
    }

    /// Sets a layer's opacity in the active view, clamped to `[0, 1]`.
    pub fn set_layer_opacity(&mut self, id: &LayerId, opacity: f64) {
        if !self.catalog.contains(id) {
            warn!(layer = %id, "unknown layer id, ignoring opacity change");
            return;
        }
        if !opacity.is_finite() {
            warn!(layer = %id, opacity, "non-finite opacity, ignoring");
            return;
        }
        self.apply_state(id, None, Some(opacity.clamp(0.0, 1.0)));
        self.request_render();
    }

    /// Requests a view-mode change.
    ///
    /// Switching to 2D always succeeds; 2D state is kept current at all
    /// times so no replay happens in that direction. Switching to 3D replays
    /// the full 2D visible set into the globe registry once the globe is
    /// initialized. A failed initialization leaves the mode at 2D; the user
    /// re-triggering the toggle retries.
    pub fn switch_mode(&mut self, new_mode: ViewMode) -> SwitchOutcome {
        match new_mode {
            ViewMode::TwoD => {
                if self.mode != ViewMode::TwoD {
                    self.mode = ViewMode::TwoD;
                    self.map_backend.request_render();
                }
                SwitchOutcome::Switched(ViewMode::TwoD)
            }
            ViewMode::ThreeD => match self.globe_status {
                GlobeStatus::Ready => {
                    self.complete_switch_to_globe();
                    SwitchOutcome::Switched(ViewMode::ThreeD)
                }
                GlobeStatus::Pending => {
                    debug!("globe initialization already pending, coalescing");
                    SwitchOutcome::GlobeInitPending
                }
                GlobeStatus::Idle | GlobeStatus::Failed => {
                    self.globe_status = GlobeStatus::Pending;
                    SwitchOutcome::GlobeInitNeeded
                }
            },
        }
    }

    /// Reports the outcome of the globe initialization started after a
    /// [`SwitchOutcome::GlobeInitNeeded`]. On success the pending switch
    /// completes; on failure the viewer stays in 2D and nothing retries
    /// until the user toggles again.
    pub fn globe_initialized(&mut self, result: Result<(), BackendError>) {
        if self.globe_status != GlobeStatus::Pending {
            warn!(status = ?self.globe_status, "stale globe initialization report, ignoring");
            return;
        }
        match result {
            Ok(()) => {
                self.globe_status = GlobeStatus::Ready;
                self.complete_switch_to_globe();
            }
            Err(err) => {
                warn!(error = %err, "globe initialization failed, staying in 2D");
                self.globe_status = GlobeStatus::Failed;
            }
        }
    }

    pub fn comparison_active(&self) -> bool {
        self.comparison.is_active()
    }

    /// Enters comparison mode: snapshots every layer's (visible, opacity),
    /// then hides everything until slots are chosen.
    pub fn enter_comparison(&mut self) {
        let snapshot = ComparisonSnapshot {
            saved: self.map_layers.snapshot(),
        };
        if !self.comparison.enter(snapshot) {
            warn!("comparison mode already active");
            return;
        }
        let ids: Vec<LayerId> = self.catalog.ids().cloned().collect();
        for id in &ids {
            self.apply_state(id, Some(false), None);
        }
        self.request_render();
    }

    /// Puts a layer (or nothing) into a comparison slot and recomputes both
    /// slots from scratch.
    pub fn select_comparison_layer(&mut self, slot: CompareSlot, layer: Option<LayerId>) {
        if let Some(id) = &layer
            && !self.catalog.contains(id)
        {
            warn!(layer = %id, "unknown layer id for comparison slot");
            return;
        }
        if !self.comparison.set_slot(slot, layer) {
            warn!("comparison mode not active, ignoring slot selection");
            return;
        }
        self.recompute_comparison();
    }

    /// Moves a slot's opacity slider (0–100) and recomputes.
    pub fn set_comparison_opacity(&mut self, slot: CompareSlot, percent: u8) {
        if !self.comparison.set_opacity_pct(slot, percent) {
            warn!("comparison mode not active, ignoring slider change");
            return;
        }
        self.recompute_comparison();
    }

    /// Leaves comparison mode, restoring the snapshot verbatim. The snapshot
    /// is discarded afterwards; a second exit is a logged no-op.
    pub fn exit_comparison(&mut self) {
        let Some(snapshot) = self.comparison.exit() else {
            warn!("comparison mode not active, ignoring exit");
            return;
        };
        for (id, (visible, opacity)) in snapshot.saved {
            self.apply_state(&id, Some(visible), Some(opacity));
        }
        self.request_render();
    }

    /// A layer is visible iff it occupies a slot; slot 2 is applied after
    /// slot 1, so it wins when both hold the same layer.
    fn recompute_comparison(&mut self) {
        let applications: Vec<(LayerId, f64)> = self
            .comparison
            .slots()
            .iter()
            .filter_map(|(id, opacity)| id.map(|i| (i.clone(), *opacity)))
            .collect();

        let ids: Vec<LayerId> = self.catalog.ids().cloned().collect();
        for id in &ids {
            if !applications.iter().any(|(selected, _)| selected == id) {
                self.apply_state(id, Some(false), None);
            }
        }
        for (id, opacity) in &applications {
            self.apply_state(id, Some(true), Some(*opacity));
        }
        self.request_render();
    }

    /// Applies a visibility/opacity change to the canonical 2D entry and,
    /// when the globe is active, mirrors it into the 3D registry (creating
    /// the 3D handle on first show).
    fn apply_state(&mut self, id: &LayerId, visible: Option<bool>, opacity: Option<f64>) {
        match self.map_layers.get_mut(id) {
            Some(entry) => {
                if let Some(v) = visible
                    && entry.visible != v
                {
                    entry.visible = v;
                    self.map_backend.set_visible(entry.handle, v);
                }
                if let Some(o) = opacity
                    && entry.opacity != o
                {
                    entry.opacity = o;
                    self.map_backend.set_opacity(entry.handle, o);
                }
            }
            None => warn!(layer = %id, "no 2D registry entry for layer"),
        }

        if self.mode != ViewMode::ThreeD {
            return;
        }
        if visible == Some(true) && !self.globe_layers.contains(id) {
            self.ensure_globe_entry(id);
        }
        if let Some(entry) = self.globe_layers.get_mut(id) {
            if let Some(v) = visible
                && entry.visible != v
            {
                entry.visible = v;
                self.globe_backend.set_visible(entry.handle, v);
            }
            if let Some(o) = opacity
                && entry.opacity != o
            {
                entry.opacity = o;
                self.globe_backend.set_opacity(entry.handle, o);
            }
        }
    }

    /// Creates the 3D handle for `id` if it does not exist yet. Handles are
    /// created hidden and at the globe's default alpha.
    fn ensure_globe_entry(&mut self, id: &LayerId) -> bool {
        if self.globe_layers.contains(id) {
            return true;
        }
        let Some(desc) = self.catalog.get(id) else {
            warn!(layer = %id, "unknown layer id for 3D registry");
            return false;
        };
        let request = LayerRequest {
            url: self.endpoint.wms_url(),
            params: self.endpoint.get_map_params(&desc.source_name),
            stack_order: desc.geometry.stack_rank(),
            visible: false,
            opacity: GLOBE_DEFAULT_OPACITY,
        };
        match self.globe_backend.add_layer(&request) {
            Ok(handle) => {
                self.globe_layers.insert(
                    id.clone(),
                    LayerEntry {
                        handle,
                        visible: false,
                        opacity: GLOBE_DEFAULT_OPACITY,
                        stack_order: request.stack_order,
                    },
                );
                true
            }
            Err(err) => {
                warn!(layer = %id, error = %err, "could not create 3D layer");
                false
            }
        }
    }

    /// Replays the 2D visible set into the globe registry and makes the
    /// globe the active view.
    fn complete_switch_to_globe(&mut self) {
        let visible = self.map_layers.visible_ids();

        let stale: Vec<LayerId> = self
            .globe_layers
            .iter()
            .filter(|(id, entry)| entry.visible && !visible.contains(id))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &stale {
            if let Some(entry) = self.globe_layers.get_mut(id) {
                entry.visible = false;
                self.globe_backend.set_visible(entry.handle, false);
            }
        }

        for id in &visible {
            self.ensure_globe_entry(id);
            if let Some(entry) = self.globe_layers.get_mut(id)
                && !entry.visible
            {
                entry.visible = true;
                self.globe_backend.set_visible(entry.handle, true);
            }
        }

        self.mode = ViewMode::ThreeD;
        self.globe_backend.request_render();
    }

    fn request_render(&mut self) {
        match self.mode {
            ViewMode::TwoD => self.map_backend.request_render(),
            ViewMode::ThreeD => self.globe_backend.request_render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendLayer;
    use catalog::{GeometryClass, LayerCatalog, LayerDescriptor};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct FakeBackend {
        next_handle: u32,
        adds: Vec<LayerRequest>,
        visible: BTreeMap<u32, bool>,
        opacity: BTreeMap<u32, f64>,
        renders: usize,
        fail_adds: bool,
    }

    impl ImageryBackend for FakeBackend {
        fn add_layer(&mut self, request: &LayerRequest) -> Result<BackendLayer, BackendError> {
            if self.fail_adds {
                return Err(BackendError::Unavailable("engine down".to_string()));
            }
            let handle = self.next_handle;
            self.next_handle += 1;
            self.adds.push(request.clone());
            self.visible.insert(handle, request.visible);
            self.opacity.insert(handle, request.opacity);
            Ok(BackendLayer(handle))
        }

        fn set_visible(&mut self, layer: BackendLayer, visible: bool) {
            self.visible.insert(layer.0, visible);
        }

        fn set_opacity(&mut self, layer: BackendLayer, opacity: f64) {
            self.opacity.insert(layer.0, opacity);
        }

        fn request_render(&mut self) {
            self.renders += 1;
        }
    }

    fn test_catalog() -> LayerCatalog {
        LayerCatalog::new(vec![
            LayerDescriptor::new("relief", "relief", "Relief", GeometryClass::Raster),
            LayerDescriptor::new("parcels", "parcels", "Parcels", GeometryClass::Polygon),
            LayerDescriptor::new("roads", "roads", "Roads", GeometryClass::Line),
            LayerDescriptor::new("wells", "wells", "Wells", GeometryClass::Point),
        ])
        .unwrap()
    }

    fn controller() -> ViewController<FakeBackend, FakeBackend> {
        ViewController::new(
            test_catalog(),
            WmsEndpoint::new("http://example.com/geoserver", "ws"),
            FakeBackend::default(),
            FakeBackend::default(),
        )
    }

    fn id(s: &str) -> LayerId {
        LayerId::new(s)
    }

    fn make_globe_ready(c: &mut ViewController<FakeBackend, FakeBackend>) {
        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitNeeded);
        c.globe_initialized(Ok(()));
        assert_eq!(c.mode(), ViewMode::ThreeD);
    }

    #[test]
    fn eager_2d_handles_start_hidden() {
        let c = controller();
        assert_eq!(c.map_layers().len(), 4);
        assert!(c.map_layers().visible_ids().is_empty());
        assert!(c.globe_layers().is_empty());
        assert!(c.map_backend().visible.values().all(|v| !v));
    }

    #[test]
    fn activate_then_deactivate_leaves_others_untouched() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        assert_eq!(c.map_layers().visible_ids(), vec![id("roads")]);

        c.set_layer_active(&id("roads"), false);
        assert!(c.map_layers().visible_ids().is_empty());
        // Hidden, not destroyed.
        assert!(c.map_layers().contains(&id("roads")));
        for (_, entry) in c.map_layers().iter() {
            assert!(!entry.visible);
            assert_eq!(entry.opacity, MAP_DEFAULT_OPACITY);
        }
    }

    #[test]
    fn stack_order_is_a_pure_function_of_geometry() {
        let c = controller();
        let orders: Vec<i32> = c.map_backend().adds.iter().map(|r| r.stack_order).collect();
        // Catalog order: raster, polygon, line, point.
        assert_eq!(orders, vec![0, 1, 2, 3]);
        for (layer_id, entry) in c.map_layers().iter() {
            let desc = c.catalog().get(layer_id).unwrap();
            assert_eq!(entry.stack_order, desc.geometry.stack_rank());
        }
    }

    #[test]
    fn switching_to_globe_replays_the_visible_set() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        c.set_layer_active(&id("wells"), true);

        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitNeeded);
        assert_eq!(c.globe_status(), GlobeStatus::Pending);
        assert_eq!(c.mode(), ViewMode::TwoD);

        c.globe_initialized(Ok(()));
        assert_eq!(c.globe_status(), GlobeStatus::Ready);
        assert_eq!(c.mode(), ViewMode::ThreeD);
        assert_eq!(
            c.globe_layers().visible_ids(),
            vec![id("roads"), id("wells")]
        );
        // Only the visible layers were materialized on the globe.
        assert_eq!(c.globe_backend().adds.len(), 2);
    }

    #[test]
    fn duplicate_init_requests_coalesce() {
        let mut c = controller();
        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitNeeded);
        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitPending);
        assert_eq!(c.globe_status(), GlobeStatus::Pending);
    }

    #[test]
    fn failed_init_keeps_the_viewer_in_2d() {
        let mut c = controller();
        c.set_layer_active(&id("parcels"), true);
        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitNeeded);
        c.globe_initialized(Err(BackendError::Unavailable("no terrain".to_string())));

        assert_eq!(c.globe_status(), GlobeStatus::Failed);
        assert_eq!(c.mode(), ViewMode::TwoD);
        assert!(c.globe_layers().is_empty());

        // Layer toggles keep working against the 2D registry only.
        c.set_layer_active(&id("roads"), true);
        assert_eq!(
            c.map_layers().visible_ids(),
            vec![id("parcels"), id("roads")]
        );
        assert!(c.globe_layers().is_empty());

        // Re-triggering the toggle retries the initialization.
        assert_eq!(c.switch_mode(ViewMode::ThreeD), SwitchOutcome::GlobeInitNeeded);
    }

    #[test]
    fn globe_handles_are_created_once_and_reused() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        make_globe_ready(&mut c);
        assert_eq!(c.globe_backend().adds.len(), 1);

        c.set_layer_active(&id("roads"), false);
        assert!(c.globe_layers().contains(&id("roads")));
        c.set_layer_active(&id("roads"), true);
        // Looked up, not re-created.
        assert_eq!(c.globe_backend().adds.len(), 1);
        assert_eq!(c.globe_layers().visible_ids(), vec![id("roads")]);
    }

    #[test]
    fn changes_in_3d_mode_keep_2d_current() {
        let mut c = controller();
        make_globe_ready(&mut c);

        c.set_layer_active(&id("parcels"), true);
        c.set_layer_opacity(&id("parcels"), 0.4);
        assert_eq!(c.globe_layers().visible_ids(), vec![id("parcels")]);
        assert_eq!(c.map_layers().visible_ids(), vec![id("parcels")]);
        assert_eq!(c.map_layers().get(&id("parcels")).unwrap().opacity, 0.4);

        // No replay happens on the way back; 2D was never stale.
        assert_eq!(c.switch_mode(ViewMode::TwoD), SwitchOutcome::Switched(ViewMode::TwoD));
        assert_eq!(c.map_layers().visible_ids(), vec![id("parcels")]);
    }

    #[test]
    fn switch_back_to_globe_hides_layers_deactivated_in_2d() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        make_globe_ready(&mut c);
        assert_eq!(c.globe_layers().visible_ids(), vec![id("roads")]);

        c.switch_mode(ViewMode::TwoD);
        c.set_layer_active(&id("roads"), false);
        c.set_layer_active(&id("wells"), true);

        assert_eq!(
            c.switch_mode(ViewMode::ThreeD),
            SwitchOutcome::Switched(ViewMode::ThreeD)
        );
        assert_eq!(c.globe_layers().visible_ids(), vec![id("wells")]);
    }

    #[test]
    fn unknown_layer_id_is_a_noop() {
        let mut c = controller();
        let renders_before = c.map_backend().renders;
        c.set_layer_active(&id("lava"), true);
        c.set_layer_opacity(&id("lava"), 0.5);
        assert_eq!(c.map_backend().renders, renders_before);
        assert!(c.map_layers().visible_ids().is_empty());
    }

    #[test]
    fn opacity_is_clamped() {
        let mut c = controller();
        c.set_layer_opacity(&id("roads"), 1.5);
        assert_eq!(c.map_layers().get(&id("roads")).unwrap().opacity, 1.0);
        c.set_layer_opacity(&id("roads"), -0.5);
        assert_eq!(c.map_layers().get(&id("roads")).unwrap().opacity, 0.0);
        c.set_layer_opacity(&id("roads"), f64::NAN);
        assert_eq!(c.map_layers().get(&id("roads")).unwrap().opacity, 0.0);
    }

    #[test]
    fn comparison_enter_exit_restores_prior_state() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        c.set_layer_opacity(&id("parcels"), 0.5);
        let before = c.map_layers().snapshot();

        c.enter_comparison();
        assert!(c.comparison_active());
        assert!(c.map_layers().visible_ids().is_empty());

        c.exit_comparison();
        assert!(!c.comparison_active());
        assert_eq!(c.map_layers().snapshot(), before);

        // The snapshot was discarded; a second exit changes nothing.
        c.set_layer_active(&id("wells"), true);
        c.exit_comparison();
        assert_eq!(
            c.map_layers().visible_ids(),
            vec![id("roads"), id("wells")]
        );
    }

    #[test]
    fn comparison_slots_drive_exact_visible_set() {
        let mut c = controller();
        c.set_layer_active(&id("relief"), true);
        c.enter_comparison();

        c.select_comparison_layer(CompareSlot::One, Some(id("roads")));
        c.set_comparison_opacity(CompareSlot::One, 30);
        c.select_comparison_layer(CompareSlot::Two, Some(id("wells")));
        c.set_comparison_opacity(CompareSlot::Two, 70);

        assert_eq!(
            c.map_layers().visible_ids(),
            vec![id("roads"), id("wells")]
        );
        assert_eq!(c.map_layers().get(&id("roads")).unwrap().opacity, 0.3);
        assert_eq!(c.map_layers().get(&id("wells")).unwrap().opacity, 0.7);
        assert!(!c.map_layers().get(&id("relief")).unwrap().visible);
    }

    #[test]
    fn same_layer_in_both_slots_takes_slot_two_opacity() {
        let mut c = controller();
        c.enter_comparison();
        c.select_comparison_layer(CompareSlot::One, Some(id("roads")));
        c.set_comparison_opacity(CompareSlot::One, 30);
        c.select_comparison_layer(CompareSlot::Two, Some(id("roads")));
        c.set_comparison_opacity(CompareSlot::Two, 70);

        assert_eq!(c.map_layers().visible_ids(), vec![id("roads")]);
        assert_eq!(c.map_layers().get(&id("roads")).unwrap().opacity, 0.7);
    }

    #[test]
    fn clearing_a_slot_hides_its_layer() {
        let mut c = controller();
        c.enter_comparison();
        c.select_comparison_layer(CompareSlot::One, Some(id("roads")));
        c.select_comparison_layer(CompareSlot::Two, Some(id("wells")));
        c.select_comparison_layer(CompareSlot::Two, None);
        assert_eq!(c.map_layers().visible_ids(), vec![id("roads")]);
    }

    #[test]
    fn comparison_calls_outside_active_state_are_noops() {
        let mut c = controller();
        c.set_layer_active(&id("roads"), true);
        c.select_comparison_layer(CompareSlot::One, Some(id("wells")));
        c.set_comparison_opacity(CompareSlot::One, 10);
        c.exit_comparison();
        assert_eq!(c.map_layers().visible_ids(), vec![id("roads")]);
    }
}
