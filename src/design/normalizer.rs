//! Coerces free-form model output into a design.
//!
//! Models routinely wrap the requested JSON in markdown fences or chatty
//! prose. Extraction runs in stages and stops at the first one that yields a
//! top-level JSON array:
//!
//! 1. absent or blank text gives the fallback design
//! 2. fenced blocks (```` ```json ```` or bare ```` ``` ````) are replaced by their content
//! 3. the whole text is parsed as JSON
//! 4. a bracket scan takes everything from the first `[` to the last `]`
//!
//! If nothing matches the result is an empty design. Blank input and
//! unparseable input deliberately end differently.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::design::model::{fallback_design, Design};

pub fn normalize(raw: Option<&str>) -> Design {
    let raw = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            log::warn!("model returned no text, using fallback design");
            return fallback_design();
        }
    };

    let text = strip_fences(raw);

    if let Some(design) = parse_array(&text) {
        log::debug!("parsed {} shapes directly", design.len());
        return design;
    }

    if let Some(candidate) = scan_bracketed(&text) {
        if let Some(design) = parse_array(candidate) {
            log::debug!("extracted {} shapes by bracket scan", design.len());
            return design;
        }
    }

    log::warn!("no JSON array found in model output ({} bytes)", raw.len());
    Vec::new()
}

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```(?:json)?\s*(.*?)\s*```").expect("fence regex"));

static BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("bracket regex"));

/// Replaces every fenced block with its trimmed content. Text outside the
/// fences is kept.
fn strip_fences(text: &str) -> String {
    FENCE.replace_all(text, "${1}").trim().to_string()
}

fn parse_array(text: &str) -> Option<Design> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Best effort only: brackets inside string values are not understood, so
/// the span may start or end in the wrong place.
fn scan_bracketed(text: &str) -> Option<&str> {
    BRACKET.find(text).map(|m| m.as_str())
}
