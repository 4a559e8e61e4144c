//! HTTP adapters.

pub mod assessment;
