//! Frame Profiler Module
//! Logs dataset shape, per-column null counts, and descriptive statistics
//! for numeric columns.

use polars::prelude::*;
use tracing::info;

use crate::data::StationLoader;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub column: String,
    pub count: usize,
    pub nulls: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Read-only reporting over a loaded frame.
pub struct FrameProfiler;

impl FrameProfiler {
    /// Log shape, dtypes, null counts, and numeric descriptive stats.
    pub fn log_profile(df: &DataFrame) {
        info!("{} rows x {} columns", df.height(), df.width());
        for col in df.get_columns() {
            info!(
                "column {:?}: {} ({} nulls)",
                col.name().as_str(),
                col.dtype(),
                col.null_count()
            );
        }
        for p in Self::describe(df) {
            info!(
                "{}: count={} mean={:.3} std={:.3} min={:.3} p25={:.3} median={:.3} p75={:.3} max={:.3}",
                p.column, p.count, p.mean, p.std, p.min, p.p25, p.median, p.p75, p.max
            );
        }
    }

    /// Descriptive statistics for every numeric column.
    pub fn describe(df: &DataFrame) -> Vec<ColumnProfile> {
        StationLoader::numeric_columns(df)
            .iter()
            .filter_map(|name| {
                let nulls = df.column(name).ok()?.null_count();
                let values = Self::numeric_values(df, name)?;
                Some(Self::profile(name, nulls, &values))
            })
            .collect()
    }

    fn numeric_values(df: &DataFrame, name: &str) -> Option<Vec<f64>> {
        let cast = df
            .column(name)
            .ok()?
            .as_materialized_series()
            .cast(&DataType::Float64)
            .ok()?;
        let ca = cast.f64().ok()?;
        Some(ca.into_iter().flatten().filter(|v| v.is_finite()).collect())
    }

    fn profile(column: &str, nulls: usize, values: &[f64]) -> ColumnProfile {
        let n = values.len();
        if n == 0 {
            return ColumnProfile {
                column: column.to_string(),
                count: 0,
                nulls,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                p25: f64::NAN,
                median: f64::NAN,
                p75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnProfile {
            column: column.to_string(),
            count: n,
            nulls,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            p25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }
}

/// Percentile via linear interpolation over pre-sorted values.
pub(crate) fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}
