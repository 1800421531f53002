mod accessibility;
mod data_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod highlight_controller;
mod render_frame_builder;
mod snapshot_controller;
mod viewport_controller;

pub use accessibility::{VirtualViewCacheStats, VirtualViewDescription, VirtualViewProvider};
pub use engine::ChartEngine;
pub use engine_config::{ChartEngineConfig, DEFAULT_LINE_BOUNDS_HALF_WIDTH, HighlightEmphasis};
pub use engine_snapshot::{
    DataSetSummary, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
