//! Dataset normalization: reshaping JSON-ish model output into the fixed
//! category/series shape the chart renderer consumes.
//!
//! JSON recovery failure is the one extraction error that surfaces to the
//! caller; the `api` module catches it there and substitutes the error
//! placeholder, so nothing past that boundary ever sees a failure.

mod dataset;
mod json;

pub use dataset::{error_placeholder, normalize_visualization};
pub use json::parse_payload;
