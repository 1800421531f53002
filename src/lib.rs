//! chart-geometry: value-to-pixel geometry and selection engine for bar and
//! line charts.
//!
//! The crate turns chart data into pixel rectangles and points under a
//! scrollable viewport, resolves pointer positions to entries (including
//! single slices of stacked bars), and keeps a stable linear index over all
//! entries for assistive traversal. Drawing is left to a
//! [`render::GeometryRenderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, VirtualViewProvider};
pub use error::{ChartError, ChartResult};
