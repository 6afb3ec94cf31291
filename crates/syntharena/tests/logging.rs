//! Tests for logging initialization
//!
//! Only one global subscriber can be installed per test binary, so most of
//! these check that initialization fails gracefully rather than inspecting
//! output.

use syntharena::core::logging::{init_logging, LogFormat};
use syntharena::layout::LayoutConfig;
use syntharena::route::RouteNode;
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    assert_eq!(LogFormat::variants(), &["compact", "pretty", "json"]);
}

#[test]
fn test_init_logging_levels_and_formats() {
    // First call may install the subscriber; later ones report an error.
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_init_logging_invalid_level_does_not_panic() {
    let _ = init_logging(Some("not-a-level"), Some("compact"));
}

#[test]
fn test_instrumented_calls_run_under_subscriber() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let records = vec![
        RouteNode::molecule("A", None, "KA"),
        RouteNode::molecule("B", Some("A"), "KB"),
        RouteNode::molecule("orphan", Some("gone"), "KO"),
    ];
    // Warn-level orphan event plus trace events for the dangling link.
    assert!(syntharena::layout_route(&records, LayoutConfig::default()).is_err());
    assert!(syntharena::layout_route(&records[..2], LayoutConfig::default()).is_ok());
}
