//! Weather lookups
//!
//! - HTTP fetch and the JSON payload schema (api.rs)
//! - Unit conversions and the display snapshot (convert.rs)

pub mod api;
pub mod convert;

pub use api::fetch_current;
pub use convert::WeatherSnapshot;
