use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::design::model::{Design, ShapeKind};

const COLOR_FIELDS: [&str; 3] = ["fill", "stroke", "textColor"];

/// A problem spotted in one shape. Shapes are never rejected for these.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub index: usize,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape[{}]: {}", self.index, self.message)
    }
}

#[derive(Debug, Default)]
pub struct DesignReport {
    pub counts: HashMap<ShapeKind, usize>,
    pub findings: Vec<Finding>,
}

impl DesignReport {
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// e.g. `rect=2 text=3`
    pub fn summary(&self) -> String {
        ShapeKind::ALL
            .iter()
            .filter(|kind| self.count(**kind) > 0)
            .map(|kind| format!("{}={}", kind.as_str(), self.count(*kind)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn inspect(design: &Design) -> DesignReport {
    let mut report = DesignReport::default();

    for (index, shape) in design.iter().enumerate() {
        let mut note = |message: String| report.findings.push(Finding { index, message });

        let Some(fields) = shape.as_object() else {
            note("not an object".to_string());
            continue;
        };

        match fields.get("type").and_then(Value::as_str) {
            Some(raw) => match ShapeKind::parse(raw) {
                Some(kind) => *report.counts.entry(kind).or_insert(0) += 1,
                None => note(format!("unknown type {raw:?}")),
            },
            None => note("missing type".to_string()),
        }

        for field in COLOR_FIELDS {
            if let Some(value) = fields.get(field) {
                if let Err(message) = validate_color(value, field) {
                    report.findings.push(Finding { index, message });
                }
            }
        }
    }

    report
}

fn validate_color(value: &Value, field: &str) -> Result<(), String> {
    match value.as_str() {
        Some(color) if is_hex_color(color) => Ok(()),
        _ => Err(format!("{field} must be #RGB or #RRGGBB")),
    }
}

fn is_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    if !(bytes.len() == 4 || bytes.len() == 7) || bytes[0] != b'#' {
        return false;
    }
    bytes[1..].iter().all(u8::is_ascii_hexdigit)
}
