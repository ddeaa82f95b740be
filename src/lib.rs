// src/lib.rs
//! Still Life
//!
//! A wgpu renderer for a small still-life scene (table, wine bottle, pear,
//! cheese wedge and wine glass) built from procedural primitives, with a
//! first-person camera driven by mouse and keyboard.

pub mod app;
pub mod config;
pub mod gfx;
pub mod logging;
pub mod time;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::StillLifeApp;
pub use config::AppConfig;
