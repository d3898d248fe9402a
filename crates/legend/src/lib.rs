//! Legend HTML generation.
//!
//! A layer's legend is either hand-authored in the catalog (rendered as
//! swatch/label rows) or delegated to the server's GetLegendGraphic endpoint
//! (rendered as a single `<img>`). A broken legend image is a cosmetic
//! failure the browser surfaces on its own; no fetch happens here.

use catalog::{LayerDescriptor, LegendEntry};
use wms::WmsEndpoint;

/// What a layer's legend is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegendContent {
    /// Hand-authored rows from the catalog. No network reference.
    Custom(Vec<LegendEntry>),
    /// URL of the server-rendered legend image.
    Image(String),
}

/// Resolve the legend source for a descriptor.
pub fn legend_content(desc: &LayerDescriptor, endpoint: &WmsEndpoint) -> LegendContent {
    match &desc.custom_legend {
        Some(entries) => LegendContent::Custom(entries.clone()),
        None => LegendContent::Image(endpoint.legend_graphic_url(&desc.source_name)),
    }
}

/// Render the collapsible legend container for a layer.
pub fn render_legend(desc: &LayerDescriptor, endpoint: &WmsEndpoint) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"layer-legend\">");
    html.push_str("<div class=\"legend-header\">");
    html.push_str("<span class=\"legend-title\">Simbología</span>");
    html.push_str(
        "<button class=\"toggle-legend\"><i class=\"fas fa-chevron-down\"></i></button>",
    );
    html.push_str("</div>");
    html.push_str("<div class=\"legend-content\">");
    match legend_content(desc, endpoint) {
        LegendContent::Custom(entries) => push_custom_rows(&mut html, &entries),
        LegendContent::Image(url) => push_image(&mut html, &url, &desc.display_name),
    }
    html.push_str("</div></div>");
    html
}

fn push_custom_rows(html: &mut String, entries: &[LegendEntry]) {
    html.push_str("<div class=\"custom-legend\">");
    for entry in entries {
        html.push_str("<div class=\"custom-legend-item\">");
        html.push_str("<span class=\"custom-legend-symbol\" style=\"background:");
        html.push_str(&escape_html(&entry.color));
        html.push_str("\"></span>");
        html.push_str("<span class=\"custom-legend-label\">");
        html.push_str(&escape_html(&entry.label));
        html.push_str("</span></div>");
    }
    html.push_str("</div>");
}

fn push_image(html: &mut String, url: &str, display_name: &str) {
    html.push_str("<img src=\"");
    html.push_str(&escape_html(url));
    html.push_str("\" alt=\"Leyenda de ");
    html.push_str(&escape_html(display_name));
    html.push_str("\">");
}

/// Escape text for HTML body and attribute positions.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
