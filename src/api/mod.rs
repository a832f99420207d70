//! HTTP surface for the guard. Enable the `axum_api` feature.

mod types;

pub use types::*;

pub mod axum;
