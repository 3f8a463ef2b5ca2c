//! Stats module - dataset profiling, grouped summaries, density estimation

mod describe;
mod density;
mod summary;

pub use describe::{ColumnProfile, FrameProfiler};
pub use density::{DensityCurve, DensityEstimator};
pub use summary::{NetworkSummarizer, NetworkSummary, SummaryError};
