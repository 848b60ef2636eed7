// LogMetrics - core/mod.rs
//
// Core business logic: discovery, extraction, tabulation, export.
// Dependencies: util only. Must NOT depend on app or platform.

pub mod discovery;
pub mod export;
pub mod extractor;
pub mod model;
pub mod report;
