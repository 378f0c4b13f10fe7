use serde_json::{json, Value};

/// An ordered list of shape descriptors, in paint order.
///
/// Entries are kept as raw JSON so whatever the model emits reaches the
/// canvas untouched.
pub type Design = Vec<Value>;

/// Shape kinds the canvas front-end knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Text,
    Button,
    Input,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rect,
        ShapeKind::Text,
        ShapeKind::Button,
        ShapeKind::Input,
        ShapeKind::Circle,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rect" | "rectangle" => Some(ShapeKind::Rect),
            "text" => Some(ShapeKind::Text),
            "button" => Some(ShapeKind::Button),
            "input" => Some(ShapeKind::Input),
            "circle" => Some(ShapeKind::Circle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Text => "text",
            ShapeKind::Button => "button",
            ShapeKind::Input => "input",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Red placeholder rectangle shown when no usable design came back.
pub fn fallback_shape() -> Value {
    json!({
        "type": "rect",
        "left": 50,
        "top": 50,
        "width": 120,
        "height": 48,
        "fill": "#f44336"
    })
}

pub fn fallback_design() -> Design {
    vec![fallback_shape()]
}
