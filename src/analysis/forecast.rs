use thiserror::Error;

use super::aggregate::count_by;
use crate::data::model::{ModelRecord, WorldPeriod};

// ---------------------------------------------------------------------------
// Least-squares trend fitting and extrapolation
// ---------------------------------------------------------------------------

/// Upper bound (exclusive) for the model-growth forecast.
pub const MODEL_HORIZON_YEAR: i32 = 2030;

/// Periods predicted past the end of the world summary.
pub const WORLD_EXTRA_PERIODS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// A trend needs at least two distinct x values; carries how many the
    /// series actually had.
    #[error("need at least 2 distinct x values to fit a trend, got {0}")]
    InsufficientSeries(usize),
}

/// An ordinary-least-squares line `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(x, y)` points. Rejects series with fewer than
    /// two distinct x values rather than producing a degenerate fit.
    pub fn fit(points: &[[f64; 2]]) -> Result<Self, ForecastError> {
        let distinct = distinct_x_count(points);
        if distinct < 2 {
            return Err(ForecastError::InsufficientSeries(distinct));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for p in points {
            let dx = p[0] - mean_x;
            covariance += dx * (p[1] - mean_y);
            variance += dx * dx;
        }

        let slope = covariance / variance;
        Ok(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

fn distinct_x_count(points: &[[f64; 2]]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|p| p[0]).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}

/// Fit once, then predict over a caller-supplied x range.
pub fn forecast_over(
    points: &[[f64; 2]],
    xs: impl IntoIterator<Item = f64>,
) -> Result<Vec<[f64; 2]>, ForecastError> {
    let fit = LinearFit::fit(points)?;
    Ok(xs.into_iter().map(|x| [x, fit.predict(x)]).collect())
}

// ---------------------------------------------------------------------------
// The two dashboard forecasts
// ---------------------------------------------------------------------------

/// Launches per year, ascending by year: the observed series behind the
/// model-growth forecast.
pub fn model_launch_series(models: &[ModelRecord]) -> Vec<[f64; 2]> {
    let mut counts = count_by(models, |m| m.first_year);
    counts.sort_by_key(|&(year, _)| year);
    counts
        .into_iter()
        .map(|(year, n)| [f64::from(year), n as f64])
        .collect()
}

/// Predicted model launches from the first observed year up to (excluding)
/// [`MODEL_HORIZON_YEAR`].
pub fn model_growth_forecast(models: &[ModelRecord]) -> Result<Vec<[f64; 2]>, ForecastError> {
    let series = model_launch_series(models);
    let Some(first) = series.first() else {
        return Err(ForecastError::InsufficientSeries(0));
    };
    let min_year = first[0] as i32;
    forecast_over(&series, (min_year..MODEL_HORIZON_YEAR).map(f64::from))
}

/// The world summary as an `(index, count)` series; row order is the
/// implicit time axis.
pub fn world_growth_series(world: &[WorldPeriod]) -> Vec<[f64; 2]> {
    world
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.count])
        .collect()
}

/// Predicted station counts over the observed indices plus
/// [`WORLD_EXTRA_PERIODS`] more.
pub fn world_growth_forecast(world: &[WorldPeriod]) -> Result<Vec<[f64; 2]>, ForecastError> {
    let series = world_growth_series(world);
    forecast_over(
        &series,
        (0..world.len() + WORLD_EXTRA_PERIODS).map(|i| i as f64),
    )
}
