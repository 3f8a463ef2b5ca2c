//! CSV Station Loader Module
//! Handles CSV file loading and header schema validation using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const COL_LINE: &str = "Line";
pub const COL_STATION_NAME: &str = "Station Name";
pub const COL_DISTANCE_KM: &str = "Distance from Start (km)";
pub const COL_OPENING_DATE: &str = "Opening Date";
pub const COL_LAYOUT: &str = "Station Layout";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";

/// Columns the input file must carry for the pipeline to run.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_LINE,
    COL_STATION_NAME,
    COL_DISTANCE_KM,
    COL_OPENING_DATE,
    COL_LAYOUT,
    COL_LATITUDE,
    COL_LONGITUDE,
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Header is missing required columns: {0}")]
    SchemaMismatch(String),
}

/// Handles CSV file loading with Polars.
pub struct StationLoader;

impl StationLoader {
    /// Load a station CSV and validate its header against the required schema.
    ///
    /// Malformed numeric cells become nulls and are tolerated downstream.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let missing = Self::missing_columns(&df);
        if !missing.is_empty() {
            return Err(LoaderError::SchemaMismatch(missing.join(", ")));
        }

        Ok(df)
    }

    /// Required columns absent from the frame's header.
    pub fn missing_columns(df: &DataFrame) -> Vec<String> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        REQUIRED_COLUMNS
            .iter()
            .filter(|c| !present.iter().any(|p| p == *c))
            .map(|c| c.to_string())
            .collect()
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }
}
