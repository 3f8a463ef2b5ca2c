//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;

pub use cleaner::{CleanerError, DateCleaner, COL_OPENING_YEAR};
pub use loader::{
    LoaderError, StationLoader, COL_DISTANCE_KM, COL_LATITUDE, COL_LAYOUT, COL_LINE,
    COL_LONGITUDE, COL_OPENING_DATE, COL_STATION_NAME, REQUIRED_COLUMNS,
};
