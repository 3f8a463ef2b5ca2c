//! Date Cleaner Module
//! Converts the free-text opening-date column into a structured Date column
//! and appends the derived opening-year column.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

/// Derived Int32 column appended by [`DateCleaner::clean`].
pub const COL_OPENING_YEAR: &str = "Opening Year";

/// Formats tried during whole-column inference, in order.
const CANDIDATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Fixed format used when no candidate parses the whole column.
const FALLBACK_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Could not parse date {value:?} in column '{column}'")]
    DateParse { column: String, value: String },
}

/// Handles in-place cleaning of the opening-date column.
pub struct DateCleaner;

impl DateCleaner {
    /// Parse `date_col` in place and append the derived opening-year column.
    ///
    /// A format inferred from the whole column is tried first; if no candidate
    /// fits, each value is parsed with the fixed `%Y-%m-%d` fallback and the
    /// first unparsable value aborts the run. Null and empty cells stay null.
    pub fn clean(df: &mut DataFrame, date_col: &str) -> Result<(), CleanerError> {
        let values: Vec<Option<String>> = {
            let raw = df.column(date_col)?.str()?;
            raw.into_iter()
                .map(|v| {
                    v.map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .collect()
        };

        let parsed = match Self::infer_format(&values) {
            Some(fmt) => Self::parse_all(&values, fmt, date_col)?,
            None => Self::parse_all(&values, FALLBACK_FORMAT, date_col)?,
        };

        let dates = DateChunked::from_naive_date_options(date_col.into(), parsed.iter().copied());
        df.replace(date_col, dates.into_series())?;

        let years: Vec<Option<i32>> = parsed.iter().map(|d| d.map(|d| d.year())).collect();
        df.with_column(Column::new(COL_OPENING_YEAR.into(), years))?;

        Ok(())
    }

    /// First candidate format that parses every non-null value, if any.
    fn infer_format(values: &[Option<String>]) -> Option<&'static str> {
        CANDIDATE_FORMATS.iter().copied().find(|fmt| {
            values
                .iter()
                .flatten()
                .all(|v| NaiveDate::parse_from_str(v, fmt).is_ok())
        })
    }

    fn parse_all(
        values: &[Option<String>],
        fmt: &str,
        column: &str,
    ) -> Result<Vec<Option<NaiveDate>>, CleanerError> {
        values
            .iter()
            .map(|v| match v {
                Some(s) => NaiveDate::parse_from_str(s, fmt).map(Some).map_err(|_| {
                    CleanerError::DateParse {
                        column: column.to_string(),
                        value: s.clone(),
                    }
                }),
                None => Ok(None),
            })
            .collect()
    }
}
