//! Static Chart Renderer
//! Generates the summary chart images with plotters.
//!
//! Output files:
//! - line_overview.png: station count and mean distance per line, side by side
//! - layout_distribution.png: layout frequency
//! - layout_density.png: overlaid distance density curves per layout
//! - openings_per_year.png: stations opened per year

use anyhow::Result;
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use super::palette::{series_color, GREEN, LIGHT_GREEN, SKY_BLUE};
use crate::stats::{DensityCurve, NetworkSummary};

const WIDE_SIZE: (u32, u32) = (1280, 560);
const SINGLE_SIZE: (u32, u32) = (900, 560);

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render every chart into `out_dir`.
    pub fn render_all(
        summary: &NetworkSummary,
        densities: &[DensityCurve],
        out_dir: &Path,
    ) -> Result<()> {
        Self::line_overview(summary, &out_dir.join("line_overview.png"))?;
        Self::layout_distribution(summary, &out_dir.join("layout_distribution.png"))?;
        Self::layout_density(densities, &out_dir.join("layout_density.png"))?;
        Self::openings_per_year(summary, &out_dir.join("openings_per_year.png"))?;
        Ok(())
    }

    /// Two side-by-side bar charts: station count and mean distance per line.
    fn line_overview(summary: &NetworkSummary, path: &Path) -> Result<()> {
        let counts: Vec<(String, f64)> = summary
            .station_count_by_line
            .iter()
            .map(|(line, n)| (line.clone(), *n as f64))
            .collect();
        let means: Vec<(String, f64)> = summary.mean_distance_by_line.clone();

        let root = BitMapBackend::new(path, WIDE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let halves = root.split_evenly((1, 2));

        Self::bar_chart(
            &halves[0],
            "Station Count by Metro Line",
            "Metro Line",
            "Station Count",
            &counts,
            SKY_BLUE,
        )?;
        Self::bar_chart(
            &halves[1],
            "Average Distance from Start by Metro Line",
            "Metro Line",
            "Average Distance (km)",
            &means,
            LIGHT_GREEN,
        )?;

        root.present()?;
        info!("chart written to {}", path.display());
        Ok(())
    }

    /// Sorted bar chart of layout frequency.
    fn layout_distribution(summary: &NetworkSummary, path: &Path) -> Result<()> {
        let bars: Vec<(String, f64)> = summary
            .layout_frequency
            .iter()
            .map(|(layout, n)| (layout.clone(), *n as f64))
            .collect();

        let root = BitMapBackend::new(path, SINGLE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        Self::bar_chart(
            &root,
            "Distribution of Station Layouts Across the Network",
            "Station Layout",
            "Frequency",
            &bars,
            SKY_BLUE,
        )?;

        root.present()?;
        info!("chart written to {}", path.display());
        Ok(())
    }

    /// Overlaid density curves of distance-from-start, one per layout.
    fn layout_density(densities: &[DensityCurve], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, SINGLE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        if densities.is_empty() {
            root.present()?;
            return Ok(());
        }

        let all_points = densities.iter().flat_map(|c| c.points.iter());
        let x_min = all_points
            .clone()
            .map(|(x, _)| *x)
            .fold(f64::INFINITY, f64::min);
        let x_max = all_points
            .clone()
            .map(|(x, _)| *x)
            .fold(f64::NEG_INFINITY, f64::max);
        let y_max = all_points.map(|(_, y)| *y).fold(0.0, f64::max) * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Distance from Start Density by Station Layout",
                ("sans-serif", 20),
            )
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(65)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Distance from Start (km)")
            .y_desc("Density")
            .label_style(("sans-serif", 12))
            .draw()?;

        for (i, curve) in densities.iter().enumerate() {
            let color = series_color(i);
            chart
                .draw_series(LineSeries::new(
                    curve.points.iter().copied(),
                    color.stroke_width(2),
                ))?
                .label(curve.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        root.present()?;
        info!("chart written to {}", path.display());
        Ok(())
    }

    /// Bar chart of stations opened per year.
    fn openings_per_year(summary: &NetworkSummary, path: &Path) -> Result<()> {
        let bars: Vec<(String, f64)> = summary
            .openings_per_year
            .iter()
            .map(|(year, n)| (year.to_string(), *n as f64))
            .collect();

        let root = BitMapBackend::new(path, SINGLE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        Self::bar_chart(
            &root,
            "Number of Stations Opened Each Year",
            "Year",
            "Stations Opened",
            &bars,
            GREEN,
        )?;

        root.present()?;
        info!("chart written to {}", path.display());
        Ok(())
    }

    /// Vertical bar chart over labelled categories.
    fn bar_chart(
        area: &DrawingArea<BitMapBackend, Shift>,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        bars: &[(String, f64)],
        color: RGBColor,
    ) -> Result<()> {
        if bars.is_empty() {
            return Ok(());
        }

        let y_max = bars.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max) * 1.15;
        let y_max = if y_max > 0.0 { y_max } else { 1.0 };

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(55)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..bars.len() as u32).into_segmented(), 0f64..y_max)?;

        let labels: Vec<&str> = bars.iter().map(|(label, _)| label.as_str()).collect();
        let formatter = |seg: &SegmentValue<u32>| match seg {
            SegmentValue::CenterOf(i) => {
                labels.get(*i as usize).copied().unwrap_or("").to_string()
            }
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_desc(x_desc)
            .y_desc(y_desc)
            .x_label_formatter(&formatter)
            .label_style(("sans-serif", 12))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(8)
                .data(bars.iter().enumerate().map(|(i, (_, v))| (i as u32, *v))),
        )?;

        Ok(())
    }
}
