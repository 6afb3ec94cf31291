//! Small display helpers used around route pages
//!
//! Version ordering for model runs, plateau trimming for accuracy curves,
//! and fuzzy stock-name lookup.

pub mod plateau;
pub mod stock_match;
pub mod version;

pub use plateau::{filter_plateau, CurvePoint};
pub use stock_match::{best_stock_match, match_stock, MatchKind, StockMatch};
pub use version::{compare_versions, sort_versions};
