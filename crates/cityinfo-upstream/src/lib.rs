//! Client for the upstream City and Weather APIs.
//!
//! Both APIs are plain JSON-over-HTTP services sharing one base URL. The
//! client normalizes their payloads into [`CityData`] and
//! [`WeatherForecast`] so callers never see the upstream shape variants.

pub mod client;
pub mod error;
pub mod types;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::*;
