//! Core abstractions for route processing
//!
//! Shared error type, geometry and status types, the layout trait seam and
//! the data-access seam that supplies flat route node records.

mod error;
mod layout;
pub mod logging;
mod source;
mod types;

pub use error::*;
pub use layout::*;
pub use logging::*;
pub use source::*;
pub use types::*;
