mod document;
mod tree;

pub use document::SvgDocument;
pub use tree::{Drawing, Element, NodeId};

/// Formats a coordinate for an SVG attribute.
pub fn number(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        "0".to_owned()
    } else {
        value.to_string()
    }
}
