//! Network Summarizer Module
//! Grouped views over the station frame: per-line, per-layout, per-year.

use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::data::{
    COL_DISTANCE_KM, COL_LAYOUT, COL_LINE, COL_OPENING_YEAR, COL_STATION_NAME,
};

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// All grouped views computed in one pass over the frame.
///
/// Value-sorted views are ascending by value, ties broken by label so repeated
/// runs over identical input produce identical tables.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub station_count_by_line: Vec<(String, u32)>,
    pub mean_distance_by_line: Vec<(String, f64)>,
    pub layout_frequency: Vec<(String, u32)>,
    pub openings_per_year: Vec<(i32, u32)>,
}

/// Computes grouped summaries over the cleaned station frame.
///
/// Group keys compare as exact strings; rows with a null key are skipped.
pub struct NetworkSummarizer;

impl NetworkSummarizer {
    pub fn summarize(df: &DataFrame) -> Result<NetworkSummary, SummaryError> {
        Ok(NetworkSummary {
            station_count_by_line: Self::station_count_by_line(df)?,
            mean_distance_by_line: Self::mean_distance_by_line(df)?,
            layout_frequency: Self::layout_frequency(df)?,
            openings_per_year: Self::openings_per_year(df)?,
        })
    }

    /// Distinct station names per line, ascending by count.
    pub fn station_count_by_line(df: &DataFrame) -> Result<Vec<(String, u32)>, SummaryError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(COL_LINE)])
            .agg([col(COL_STATION_NAME).n_unique().alias("stations")])
            .collect()?;

        let lines = grouped.column(COL_LINE)?.str()?;
        let counts = grouped.column("stations")?.u32()?;

        let mut rows = Vec::with_capacity(grouped.height());
        for i in 0..grouped.height() {
            if let (Some(line), Some(n)) = (lines.get(i), counts.get(i)) {
                rows.push((line.to_string(), n));
            }
        }
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(rows)
    }

    /// Mean distance-from-start per line, ascending by mean. Lines whose
    /// distances are all null are skipped.
    pub fn mean_distance_by_line(df: &DataFrame) -> Result<Vec<(String, f64)>, SummaryError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(COL_LINE)])
            .agg([col(COL_DISTANCE_KM)
                .cast(DataType::Float64)
                .mean()
                .alias("mean_distance")])
            .collect()?;

        let lines = grouped.column(COL_LINE)?.str()?;
        let means = grouped.column("mean_distance")?.f64()?;

        let mut rows = Vec::with_capacity(grouped.height());
        for i in 0..grouped.height() {
            if let (Some(line), Some(mean)) = (lines.get(i), means.get(i)) {
                rows.push((line.to_string(), mean));
            }
        }
        rows.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(rows)
    }

    /// Row count per layout category, ascending by frequency.
    pub fn layout_frequency(df: &DataFrame) -> Result<Vec<(String, u32)>, SummaryError> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(COL_LAYOUT)])
            .agg([len().alias("frequency")])
            .collect()?;

        let layouts = grouped.column(COL_LAYOUT)?.str()?;
        let counts = grouped.column("frequency")?.u32()?;

        let mut rows = Vec::with_capacity(grouped.height());
        for i in 0..grouped.height() {
            if let (Some(layout), Some(n)) = (layouts.get(i), counts.get(i)) {
                rows.push((layout.to_string(), n));
            }
        }
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(rows)
    }

    /// Row count per opening year, ascending by year.
    pub fn openings_per_year(df: &DataFrame) -> Result<Vec<(i32, u32)>, SummaryError> {
        let grouped = df
            .clone()
            .lazy()
            .filter(col(COL_OPENING_YEAR).is_not_null())
            .group_by([col(COL_OPENING_YEAR)])
            .agg([len().alias("openings")])
            .collect()?;

        let years = grouped.column(COL_OPENING_YEAR)?.i32()?;
        let counts = grouped.column("openings")?.u32()?;

        let mut rows = Vec::with_capacity(grouped.height());
        for i in 0..grouped.height() {
            if let (Some(year), Some(n)) = (years.get(i), counts.get(i)) {
                rows.push((year, n));
            }
        }
        rows.sort_by_key(|(year, _)| *year);
        Ok(rows)
    }

    /// Finite distance values per layout, keyed alphabetically.
    pub fn distances_by_layout(df: &DataFrame) -> Result<Vec<(String, Vec<f64>)>, SummaryError> {
        let layouts = df.column(COL_LAYOUT)?.str()?.clone();
        let distances = df
            .column(COL_DISTANCE_KM)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let distances = distances.f64()?;

        let mut by_layout: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for i in 0..df.height() {
            if let (Some(layout), Some(v)) = (layouts.get(i), distances.get(i)) {
                if v.is_finite() {
                    by_layout.entry(layout.to_string()).or_default().push(v);
                }
            }
        }

        Ok(by_layout.into_iter().collect())
    }
}
