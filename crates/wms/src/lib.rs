//! WMS request construction against a GeoServer endpoint.
//!
//! The mapping engines issue the actual GetMap traffic; this crate only
//! builds the endpoint URL, the GetMap parameter set, and GetLegendGraphic
//! URLs, so that every request leaving the front-end is parameterized in one
//! place.

use serde::{Deserialize, Serialize};

/// Compiled-in GeoServer instance of the agronomy viewer.
pub const DEFAULT_BASE_URL: &str = "http://3.142.197.190:8080/geoserver";
pub const DEFAULT_WORKSPACE: &str = "hortalizas";

/// A GeoServer WMS endpoint plus the workspace the layers live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmsEndpoint {
    base_url: String,
    workspace: String,
}

impl WmsEndpoint {
    pub fn new(base_url: impl Into<String>, workspace: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            workspace: workspace.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Workspace-scoped WMS endpoint, e.g. `<base>/<workspace>/wms`.
    pub fn wms_url(&self) -> String {
        format!("{}/{}/wms", self.base_url, self.workspace)
    }

    /// `<workspace>:<layer>` as WMS KVP requests expect it.
    pub fn qualified_layer(&self, source_name: &str) -> String {
        format!("{}:{}", self.workspace, source_name)
    }

    /// GetMap parameters for one tiled overlay layer.
    pub fn get_map_params(&self, source_name: &str) -> GetMapParams {
        let qualified = self.qualified_layer(source_name);
        GetMapParams {
            layers: qualified.clone(),
            // GeoServer style names mirror the qualified layer name here.
            styles: qualified,
            format: IMAGE_PNG.to_string(),
            transparent: true,
            tiled: true,
            srs: EPSG_4326.to_string(),
            version: WMS_VERSION.to_string(),
        }
    }

    /// GetLegendGraphic URL for one layer, with the layer parameter escaped.
    pub fn legend_graphic_url(&self, source_name: &str) -> String {
        format!(
            "{}?REQUEST=GetLegendGraphic&VERSION=1.0.0&FORMAT=image/png\
             &WIDTH=20&HEIGHT=20&LAYER={}&STYLE=&TRANSPARENT=true",
            self.wms_url(),
            escape_query_value(&self.qualified_layer(source_name)),
        )
    }
}

impl Default for WmsEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_WORKSPACE)
    }
}

pub const IMAGE_PNG: &str = "image/png";
pub const EPSG_4326: &str = "EPSG:4326";
pub const WMS_VERSION: &str = "1.1.1";

/// KVP parameter set for tiled GetMap requests.
///
/// Serialized form uses the uppercase WMS keys so it can be handed to the
/// mapping engines as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GetMapParams {
    pub layers: String,
    pub styles: String,
    pub format: String,
    pub transparent: bool,
    pub tiled: bool,
    pub srs: String,
    pub version: String,
}

impl GetMapParams {
    /// KVP pairs in a stable order, values unescaped.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("LAYERS", self.layers.clone()),
            ("STYLES", self.styles.clone()),
            ("FORMAT", self.format.clone()),
            ("TRANSPARENT", self.transparent.to_string()),
            ("TILED", self.tiled.to_string()),
            ("SRS", self.srs.clone()),
            ("VERSION", self.version.clone()),
        ]
    }
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass through).
pub fn escape_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{b:02X}"));
            }
        }
    }
    out
}
