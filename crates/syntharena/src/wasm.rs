//! WebAssembly bindings for SynthArena
//!
//! JSON in, JSON out. Records are the same flat `RouteNode` objects the
//! CLI reads; errors reach JavaScript as string `JsValue`s.

use wasm_bindgen::prelude::*;

use crate::compare::{ComparisonBuilder, ComparisonConfig};
use crate::core::{ComparisonMode, Point};
use crate::layout::{LayoutConfig, TreeLayout};
use crate::route::{build_tree, RouteNode, RouteTree};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_records(json: &str) -> Result<Vec<RouteNode>, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error("Invalid route records", e))
}

fn parse_layout_config(json: &str) -> Result<LayoutConfig, JsValue> {
    if json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    let config: LayoutConfig =
        serde_json::from_str(json).map_err(|e| js_error("Invalid layout config", e))?;
    config.validate().map_err(|e| js_error("Invalid layout config", e))?;
    Ok(config)
}

/// Build and lay out one route
///
/// # Arguments
/// * `records_json` - JSON array of route node records
/// * `config_json` - JSON layout config; an empty string uses the defaults
///
/// # Returns
/// * The positioned tree as a JSON string
#[wasm_bindgen]
pub fn layout_route_json(records_json: &str, config_json: &str) -> Result<String, JsValue> {
    let records = parse_records(records_json)?;
    let config = parse_layout_config(config_json)?;

    let tree = build_tree(&records).map_err(|e| js_error("Build error", e))?;
    let positioned = TreeLayout::new(config)
        .layout_at(&tree, Point::default())
        .map_err(|e| js_error("Layout error", e))?;

    serde_json::to_string(&positioned).map_err(|e| js_error("Serialization error", e))
}

/// Compare a predicted route with its reference routes
///
/// # Arguments
/// * `prediction_json` - JSON array of the prediction's node records
/// * `references_json` - JSON array of reference routes, each an array of records
/// * `mode` - `"overlay"` (or `"diff"`) or `"side-by-side"`
///
/// # Returns
/// * The comparison graph as a JSON string
#[wasm_bindgen]
pub fn compare_routes_json(
    prediction_json: &str,
    references_json: &str,
    mode: &str,
) -> Result<String, JsValue> {
    let mode: ComparisonMode = mode.parse().map_err(|e| js_error("Invalid mode", e))?;
    let prediction = parse_records(prediction_json)?;
    let references: Vec<Vec<RouteNode>> = serde_json::from_str(references_json)
        .map_err(|e| js_error("Invalid reference routes", e))?;

    let prediction = build_tree(&prediction).map_err(|e| js_error("Prediction error", e))?;
    let references = references
        .iter()
        .enumerate()
        .map(|(index, records)| {
            build_tree(records).map_err(|e| js_error(&format!("Reference {} error", index), e))
        })
        .collect::<Result<Vec<RouteTree>, _>>()?;

    let graph = ComparisonBuilder::new(ComparisonConfig::default())
        .build(mode, &prediction, &references)
        .map_err(|e| js_error("Comparison error", e))?;

    serde_json::to_string(&graph).map_err(|e| js_error("Serialization error", e))
}
