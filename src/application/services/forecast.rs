//! Naive linear-trend forecast.
//!
//! Closes are indexed `0..n` in date order, a least squares line is fitted
//! over `(index, close)` and evaluated at `n..n + days`.

use crate::constants::MAX_FORECAST_DAYS;
use crate::error::AppError;
use crate::presentation::market::{Forecast, ForecastPoint, HistoricalBar};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How forecast dates advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStep {
    /// Every calendar day
    #[default]
    Calendar,
    /// Monday to Friday only
    Business,
}

impl DateStep {
    /// First date after `date` under this step
    #[must_use]
    pub fn next(&self, date: NaiveDate) -> NaiveDate {
        let mut next = date + Days::new(1);
        if *self == DateStep::Business {
            while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
                next = next + Days::new(1);
            }
        }
        next
    }
}

impl fmt::Display for DateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStep::Calendar => f.write_str("calendar"),
            DateStep::Business => f.write_str("business"),
        }
    }
}

/// Fitted line `y = intercept + slope * x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change per index step
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares over `(i, values[i])`
    ///
    /// Returns `None` for an empty slice. A single value gives a flat line.
    #[must_use]
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    /// Value of the line at `x`
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Extrapolates the closes of `bars` for `days` steps
///
/// Bars are sorted by date first. Dates start at the step after the last
/// observed date and strictly increase.
pub fn forecast_closes(
    ticker: &str,
    bars: &[HistoricalBar],
    days: u32,
    step: DateStep,
) -> Result<Forecast, AppError> {
    if days > MAX_FORECAST_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be at most {MAX_FORECAST_DAYS}"
        )));
    }

    let mut sorted: Vec<&HistoricalBar> = bars.iter().collect();
    sorted.sort_by_key(|bar| bar.date);
    let closes: Vec<f64> = sorted.iter().map(|bar| bar.close).collect();

    let (Some(line), Some(last)) = (LinearFit::fit(&closes), sorted.last()) else {
        return Err(AppError::BadRequest(
            "No historical data available".to_string(),
        ));
    };

    let n = closes.len();
    let mut date = last.date.date();
    let predictions = (0..days as usize)
        .map(|k| {
            date = step.next(date);
            ForecastPoint {
                date,
                predicted_close: line.at((n + k) as f64),
            }
        })
        .collect();

    Ok(Forecast {
        ticker: ticker.to_string(),
        predictions,
    })
}
