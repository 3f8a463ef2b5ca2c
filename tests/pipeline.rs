//! End-to-end pipeline test over a small station export.

use std::io::Write;
use std::path::PathBuf;

use metroscope::data::{DateCleaner, StationLoader, COL_OPENING_DATE, COL_OPENING_YEAR};
use metroscope::map::MapBuilder;
use metroscope::stats::{DensityEstimator, NetworkSummarizer};

const FIXTURE: &str = "\
Line,Station Name,Distance from Start (km),Opening Date,Station Layout,Latitude,Longitude
Red line,Alpha,0.0,2002-12-25,Elevated,28.70,77.10
Red line,Beta,1.4,2003-03-01,Underground,28.71,77.12
Blue line,Beta,0.0,2005-06-10,Underground,28.71,77.12
Blue line,Gamma,2.2,2005-06-10,Elevated,28.73,77.15
Teal line,Delta,0.5,2010-09-03,Elevated,,
";

fn fixture_path(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("stations.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    path
}

#[test]
fn pipeline_produces_consistent_reports() {
    let dir = tempfile::tempdir().unwrap();

    let mut df = StationLoader::load_csv(&fixture_path(&dir)).unwrap();
    assert_eq!(df.height(), 5);

    DateCleaner::clean(&mut df, COL_OPENING_DATE).unwrap();
    assert_eq!(df.column(COL_OPENING_YEAR).unwrap().null_count(), 0);

    let summary = NetworkSummarizer::summarize(&df).unwrap();

    // "Beta" sits on two lines and counts once per line.
    assert_eq!(
        summary.station_count_by_line,
        vec![
            ("Teal line".to_string(), 1),
            ("Blue line".to_string(), 2),
            ("Red line".to_string(), 2),
        ]
    );

    // Layout frequencies cover every row.
    let layout_total: u32 = summary.layout_frequency.iter().map(|(_, n)| n).sum();
    assert_eq!(layout_total as usize, df.height());

    // Openings sorted ascending by year.
    assert_eq!(
        summary.openings_per_year,
        vec![(2002, 1), (2003, 1), (2005, 2), (2010, 1)]
    );

    // Re-running over the same frame is bit-for-bit identical.
    assert_eq!(summary, NetworkSummarizer::summarize(&df).unwrap());

    // Density curves exist for every layout with at least two samples.
    let distances = NetworkSummarizer::distances_by_layout(&df).unwrap();
    let densities = DensityEstimator::curves_by_layout(&distances);
    assert_eq!(densities.len(), 2);

    // The map lists only the four stations with coordinates; the unmapped
    // "Teal line" would have fallen back to the default color anyway.
    let markers = MapBuilder::markers(&df).unwrap();
    assert_eq!(markers.len(), 4);
    assert!(markers.iter().all(|m| m.line != "Teal line"));

    let map_path = dir.path().join("stations_map.html");
    MapBuilder::write_html(&df, &map_path).unwrap();
    let html = std::fs::read_to_string(&map_path).unwrap();
    assert!(html.contains("L.circleMarker"));
    assert!(html.contains("\"name\":\"Gamma\""));
}

#[test]
fn pipeline_rejects_unparsable_dates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad_dates.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        b"Line,Station Name,Distance from Start (km),Opening Date,Station Layout,Latitude,Longitude\n\
          Red line,Alpha,0.0,2002-12-25,Elevated,28.70,77.10\n\
          Red line,Beta,1.4,someday soon,Underground,28.71,77.12\n",
    )
    .unwrap();

    let mut df = StationLoader::load_csv(&path).unwrap();
    let err = DateCleaner::clean(&mut df, COL_OPENING_DATE).unwrap_err();
    assert!(err.to_string().contains("someday soon"));
}
