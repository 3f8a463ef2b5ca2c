//! Metroscope - Metro Station CSV Analysis & Map Generator
//!
//! Loads a metro station CSV export, cleans the opening-date column, computes
//! grouped summaries, and renders static charts plus an interactive station map.

pub mod charts;
pub mod data;
pub mod map;
pub mod stats;
