//! Station Map Module
//! Emits a standalone Leaflet HTML map with one colored marker per station.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::data::{COL_LATITUDE, COL_LINE, COL_LONGITUDE, COL_STATION_NAME};

/// Marker color used when a line has no entry in the lookup table.
pub const DEFAULT_MARKER_COLOR: &str = "black";

const DEFAULT_ZOOM: u32 = 11;

/// Fixed line-to-color lookup. Colors are CSS color names.
const LINE_MARKER_COLORS: [(&str, &str); 13] = [
    ("Red line", "red"),
    ("Blue line", "blue"),
    ("Yellow line", "beige"),
    ("Green line", "green"),
    ("Voilet line", "purple"),
    ("Pink line", "pink"),
    ("Magenta line", "darkred"),
    ("Orange line", "orange"),
    ("Rapid Metro", "cadetblue"),
    ("Aqua line", "black"),
    ("Green line branch", "lightgreen"),
    ("Blue line branch", "lightblue"),
    ("Gray line", "lightgray"),
];

const MAP_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>Station Map</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
"#;

const MAP_SCRIPT: &str = r#"const map = L.map('map').setView(center, zoom);
L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
for (const s of stations) {
    L.circleMarker([s.lat, s.lon], {
        radius: 6,
        color: s.color,
        fillColor: s.color,
        fillOpacity: 0.85
    }).bindPopup(s.name).bindTooltip(`${s.name}, ${s.line}`).addTo(map);
}"#;

/// One plotted station.
#[derive(Debug, Clone, Serialize)]
pub struct StationMarker {
    pub name: String,
    pub line: String,
    pub lat: f64,
    pub lon: f64,
    pub color: &'static str,
}

/// Builds the interactive station map.
pub struct MapBuilder;

impl MapBuilder {
    /// Marker color for a line name.
    pub fn marker_color(line: &str) -> &'static str {
        LINE_MARKER_COLORS
            .iter()
            .find(|(name, _)| *name == line)
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_MARKER_COLOR)
    }

    /// Markers for every row with a name, line, and finite coordinates.
    /// Incomplete rows are skipped.
    pub fn markers(df: &DataFrame) -> Result<Vec<StationMarker>> {
        let names = df.column(COL_STATION_NAME)?.str()?.clone();
        let lines = df.column(COL_LINE)?.str()?.clone();
        let lat = df
            .column(COL_LATITUDE)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let lat = lat.f64()?;
        let lon = df
            .column(COL_LONGITUDE)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let lon = lon.f64()?;

        let mut markers = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if let (Some(name), Some(line), Some(lat), Some(lon)) =
                (names.get(i), lines.get(i), lat.get(i), lon.get(i))
            {
                if lat.is_finite() && lon.is_finite() {
                    markers.push(StationMarker {
                        name: name.to_string(),
                        line: line.to_string(),
                        lat,
                        lon,
                        color: Self::marker_color(line),
                    });
                }
            }
        }
        Ok(markers)
    }

    /// Render the full map document, centered on the mean of the plotted
    /// coordinates.
    pub fn build_html(df: &DataFrame) -> Result<String> {
        let markers = Self::markers(df)?;
        let (lat, lon) = Self::center(&markers);
        let markers_json = serde_json::to_string(&markers)?;

        Ok(format!(
            "{MAP_HEAD}<script>\nconst stations = {markers_json};\nconst center = [{lat:.6}, {lon:.6}];\nconst zoom = {DEFAULT_ZOOM};\n{MAP_SCRIPT}\n</script>\n</body>\n</html>\n"
        ))
    }

    /// Write the map document to `path`.
    pub fn write_html(df: &DataFrame, path: &Path) -> Result<()> {
        let html = Self::build_html(df)?;
        fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
        info!("station map written to {}", path.display());
        Ok(())
    }

    fn center(markers: &[StationMarker]) -> (f64, f64) {
        if markers.is_empty() {
            return (0.0, 0.0);
        }
        let n = markers.len() as f64;
        let lat = markers.iter().map(|m| m.lat).sum::<f64>() / n;
        let lon = markers.iter().map(|m| m.lon).sum::<f64>() / n;
        (lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_frame() -> DataFrame {
        df!(
            COL_STATION_NAME => &["Alpha", "Beta", "Gamma"],
            COL_LINE => &["Red line", "Teal line", "Blue line"],
            COL_LATITUDE => &[Some(28.70f64), Some(28.72), None],
            COL_LONGITUDE => &[Some(77.10f64), Some(77.14), Some(77.20)],
        )
        .unwrap()
    }

    #[test]
    fn known_lines_map_to_their_color() {
        assert_eq!(MapBuilder::marker_color("Red line"), "red");
        assert_eq!(MapBuilder::marker_color("Rapid Metro"), "cadetblue");
    }

    #[test]
    fn unknown_lines_fall_back_to_default() {
        assert_eq!(MapBuilder::marker_color("Teal line"), DEFAULT_MARKER_COLOR);
        assert_eq!(MapBuilder::marker_color(""), DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn rows_without_coordinates_are_skipped() {
        let markers = MapBuilder::markers(&map_frame()).unwrap();

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "Alpha");
        assert_eq!(markers[0].color, "red");
        assert_eq!(markers[1].color, DEFAULT_MARKER_COLOR);
    }

    #[test]
    fn html_embeds_markers_and_leaflet() {
        let html = MapBuilder::build_html(&map_frame()).unwrap();

        assert!(html.contains("leaflet.js"));
        assert!(html.contains("\"name\":\"Alpha\""));
        assert!(html.contains("\"color\":\"red\""));
        assert!(html.contains("bindTooltip"));
        assert!(html.contains("bindPopup"));
    }

    #[test]
    fn map_centers_on_mean_of_plotted_coordinates() {
        let html = MapBuilder::build_html(&map_frame()).unwrap();
        // Mean of the two rows that carry coordinates.
        assert!(html.contains("const center = [28.710000, 77.120000];"));
    }
}
