//! Layer metadata for the dual-viewer WMS front-end.
//!
//! The catalog is fixed configuration: the full set of descriptors is built
//! once at startup and never mutated afterwards. Lookups are by layer id or
//! by the GeoServer source name; the UI additionally filters by display name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable key for a layer across both viewers and the DOM.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry class of the backing WMS layer.
///
/// Also fixes the draw order: rasters sit beneath polygons, polygons beneath
/// lines, lines beneath points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryClass {
    Raster,
    Polygon,
    Line,
    Point,
}

impl GeometryClass {
    /// Draw rank. Higher ranks draw on top of lower ranks.
    pub fn stack_rank(self) -> i32 {
        match self {
            GeometryClass::Raster => 0,
            GeometryClass::Polygon => 1,
            GeometryClass::Line => 2,
            GeometryClass::Point => 3,
        }
    }
}

/// One swatch/label row of a hand-authored legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// CSS color value for the swatch.
    pub color: String,
    pub label: String,
}

impl LegendEntry {
    pub fn new(color: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one overlay layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: LayerId,
    /// Layer name on the WMS server, without the workspace prefix.
    pub source_name: String,
    /// Human-readable name shown next to the checkbox and searched by the UI.
    pub display_name: String,
    pub geometry: GeometryClass,
    /// When present, overrides the server's GetLegendGraphic image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_legend: Option<Vec<LegendEntry>>,
}

impl LayerDescriptor {
    pub fn new(
        id: impl Into<String>,
        source_name: impl Into<String>,
        display_name: impl Into<String>,
        geometry: GeometryClass,
    ) -> Self {
        Self {
            id: LayerId::new(id),
            source_name: source_name.into(),
            display_name: display_name.into(),
            geometry,
            custom_legend: None,
        }
    }

    pub fn with_custom_legend(mut self, entries: Vec<LegendEntry>) -> Self {
        self.custom_legend = Some(entries);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate layer id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The full, immutable layer set.
///
/// Iteration preserves authoring order (the order layers appear in the
/// sidebar); lookups go through an id index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerCatalog {
    entries: Vec<LayerDescriptor>,
    by_id: BTreeMap<String, usize>,
}

impl LayerCatalog {
    pub fn new(entries: Vec<LayerDescriptor>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.0.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(entry.id.0.clone()));
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn get(&self, id: &LayerId) -> Option<&LayerDescriptor> {
        self.by_id.get(id.as_str()).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.by_id.contains_key(id.as_str())
    }

    pub fn by_source_name(&self, source_name: &str) -> Option<&LayerDescriptor> {
        self.entries.iter().find(|e| e.source_name == source_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &LayerId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring match on display names.
    ///
    /// An empty term matches everything, mirroring the sidebar search box.
    pub fn search<'a>(&'a self, term: &str) -> Vec<&'a LayerDescriptor> {
        let needle = term.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.display_name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// The compiled-in layer set of the agronomy viewer.
pub fn default_catalog() -> LayerCatalog {
    let temperature_legend = vec![
        LegendEntry::new("#5bb3e6", "10.0 - 12.5°C"),
        LegendEntry::new("#8cc3c7", "12.5 - 15.0°C"),
        LegendEntry::new("#b7d7b0", "15.0 - 17.5°C"),
        LegendEntry::new("#f3f3a1", "17.5 - 20.0°C"),
        LegendEntry::new("#ffe37a", "20.0 - 22.5°C"),
        LegendEntry::new("#ffc07a", "22.5 - 25.0°C"),
        LegendEntry::new("#ff9a6e", "25.0 - 27.5°C"),
        LegendEntry::new("#f26c6c", "27.5 - 30.0°C"),
    ];
    let erosion_legend = vec![
        LegendEntry::new("#f26c6c", "Riesgo muy alto"),
        LegendEntry::new("#ff9a6e", "Riesgo alto"),
        LegendEntry::new("#ffe37a", "Riesgo moderado"),
        LegendEntry::new("#b7d7b0", "Riesgo bajo"),
    ];

    let entries = vec![
        LayerDescriptor::new("fosforo", "fosforo", "Fósforo", GeometryClass::Polygon),
        LayerDescriptor::new("potasio", "potasio", "Potasio", GeometryClass::Polygon),
        LayerDescriptor::new("ph", "ph suelo", "pH del suelo", GeometryClass::Polygon),
        LayerDescriptor::new("tipo_suelo", "tipo suelo", "Tipo de suelo", GeometryClass::Polygon),
        LayerDescriptor::new(
            "precipitacion",
            "precipitacion",
            "Precipitación",
            GeometryClass::Polygon,
        ),
        LayerDescriptor::new(
            "temperatura",
            "temperatura_media",
            "Temperatura media",
            GeometryClass::Raster,
        )
        .with_custom_legend(temperature_legend),
        LayerDescriptor::new("elevacion", "elevacion", "Elevación", GeometryClass::Polygon),
        LayerDescriptor::new("erosion", "erosion", "Erosión", GeometryClass::Raster)
            .with_custom_legend(erosion_legend),
        LayerDescriptor::new("red_vial", "red vial", "Red vial", GeometryClass::Line),
        LayerDescriptor::new("rios", "rios principales", "Ríos principales", GeometryClass::Line),
        LayerDescriptor::new(
            "areas_urbanas",
            "areas urbanas",
            "Áreas urbanas",
            GeometryClass::Polygon,
        ),
        LayerDescriptor::new(
            "departamentos",
            "departamentos",
            "Departamentos",
            GeometryClass::Polygon,
        ),
        LayerDescriptor::new("distritos", "distritos", "Distritos", GeometryClass::Polygon),
        LayerDescriptor::new(
            "areas_conservacion",
            "areas conservacion",
            "Áreas de conservación",
            GeometryClass::Polygon,
        ),
        LayerDescriptor::new(
            "sitios_contaminados",
            "sitios contaminados",
            "Sitios contaminados",
            GeometryClass::Point,
        ),
    ];

    // The compiled-in set has no duplicate ids.
    LayerCatalog::new(entries).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_by_id_and_source_name() {
        let catalog = default_catalog();
        let ph = catalog.get(&LayerId::new("ph")).unwrap();
        assert_eq!(ph.source_name, "ph suelo");
        assert_eq!(ph.geometry, GeometryClass::Polygon);

        let by_name = catalog.by_source_name("temperatura_media").unwrap();
        assert_eq!(by_name.id, LayerId::new("temperatura"));
        assert!(by_name.custom_legend.is_some());
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = default_catalog();
        assert!(catalog.get(&LayerId::new("nope")).is_none());
        assert!(!catalog.contains(&LayerId::new("nope")));
    }

    #[test]
    fn duplicate_id_rejected() {
        let entries = vec![
            LayerDescriptor::new("a", "a", "A", GeometryClass::Polygon),
            LayerDescriptor::new("a", "b", "B", GeometryClass::Line),
        ];
        assert_eq!(
            LayerCatalog::new(entries),
            Err(CatalogError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn stack_rank_orders_geometry_classes() {
        assert!(GeometryClass::Raster.stack_rank() < GeometryClass::Polygon.stack_rank());
        assert!(GeometryClass::Polygon.stack_rank() < GeometryClass::Line.stack_rank());
        assert!(GeometryClass::Line.stack_rank() < GeometryClass::Point.stack_rank());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = default_catalog();
        let hits = catalog.search("RÍOS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, LayerId::new("rios"));

        // Empty term keeps the whole sidebar visible.
        assert_eq!(catalog.search("  ").len(), catalog.len());
    }

    #[test]
    fn iteration_preserves_authoring_order() {
        let catalog = default_catalog();
        let first: Vec<&str> = catalog.ids().take(3).map(|id| id.as_str()).collect();
        assert_eq!(first, vec!["fosforo", "potasio", "ph"]);
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let desc = LayerDescriptor::new("erosion", "erosion", "Erosión", GeometryClass::Raster)
            .with_custom_legend(vec![LegendEntry::new("#f26c6c", "Riesgo muy alto")]);
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("\"raster\""));
        let back: LayerDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }
}
