// LogMetrics - app/mod.rs
//
// Application layer: orchestrates discovery, extraction and export for one
// run. Dependencies: core, platform, util.

pub mod collect;
pub mod pipeline;
