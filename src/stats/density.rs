//! Density Estimator Module
//! Gaussian kernel density estimation for the per-layout distance curves.

use statrs::distribution::{Continuous, Normal};

use super::describe::percentile;

/// Number of evaluation points per curve.
pub const GRID_POINTS: usize = 200;

/// A smoothed distribution curve for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Gaussian KDE with Silverman's rule bandwidth.
pub struct DensityEstimator;

impl DensityEstimator {
    /// One curve per group; groups with fewer than two finite values yield none.
    pub fn curves_by_layout(groups: &[(String, Vec<f64>)]) -> Vec<DensityCurve> {
        groups
            .iter()
            .filter_map(|(label, values)| {
                let points = Self::gaussian_kde(values, GRID_POINTS);
                if points.is_empty() {
                    None
                } else {
                    Some(DensityCurve {
                        label: label.clone(),
                        points,
                    })
                }
            })
            .collect()
    }

    /// Evaluate the estimate on a grid spanning the data range padded by
    /// three bandwidths.
    pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Vec<(f64, f64)> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = finite.len();
        if n < 2 || grid_points < 2 {
            return Vec::new();
        }

        let mut sorted = finite.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let h = Self::silverman_bandwidth(&finite, &sorted);
        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let lo = sorted[0] - 3.0 * h;
        let hi = sorted[n - 1] + 3.0 * h;
        let step = (hi - lo) / (grid_points - 1) as f64;

        (0..grid_points)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = finite
                    .iter()
                    .map(|v| kernel.pdf((x - v) / h))
                    .sum::<f64>()
                    / (n as f64 * h);
                (x, density)
            })
            .collect()
    }

    fn silverman_bandwidth(values: &[f64], sorted: &[f64]) -> f64 {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std = variance.sqrt();

        let iqr = percentile(sorted, 75.0) - percentile(sorted, 25.0);
        let spread = if iqr > 0.0 { std.min(iqr / 1.34) } else { std };

        let h = 0.9 * spread * n.powf(-0.2);
        if h.is_finite() && h > 0.0 {
            h
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrate(points: &[(f64, f64)]) -> f64 {
        points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum()
    }

    #[test]
    fn kde_integrates_to_one() {
        let values = [0.0, 1.2, 1.5, 2.0, 3.3, 4.8, 5.0, 7.1];
        let points = DensityEstimator::gaussian_kde(&values, GRID_POINTS);

        let area = integrate(&points);
        assert!((area - 1.0).abs() < 0.05, "area was {area}");
    }

    #[test]
    fn kde_of_constant_values_still_integrates() {
        let values = [2.0, 2.0, 2.0, 2.0];
        let points = DensityEstimator::gaussian_kde(&values, GRID_POINTS);

        let area = integrate(&points);
        assert!((area - 1.0).abs() < 0.05, "area was {area}");
    }

    #[test]
    fn too_few_samples_yield_no_curve() {
        assert!(DensityEstimator::gaussian_kde(&[1.0], GRID_POINTS).is_empty());
        assert!(DensityEstimator::gaussian_kde(&[], GRID_POINTS).is_empty());
    }

    #[test]
    fn singleton_groups_are_dropped() {
        let groups = vec![
            ("Elevated".to_string(), vec![0.0, 1.0, 2.0]),
            ("At-Grade".to_string(), vec![5.0]),
        ];

        let curves = DensityEstimator::curves_by_layout(&groups);
        assert_eq!(curves.len(), 1);
        assert_eq!(curves[0].label, "Elevated");
        assert_eq!(curves[0].points.len(), GRID_POINTS);
    }
}
