use crate::model::{AnalysisError, Result};

/// Window used by both analyzers.
pub const DEFAULT_WINDOW: usize = 3;

/// Moving-average extrapolation.
///
/// Each step appends the mean of the last `window` values of a working buffer, seeded
/// with the tail of `series`. Forecasts re-enter the buffer, so after `window` steps
/// the mean is taken over forecasted values only.
pub fn extrapolate(series: &[f64], window: usize, steps: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(AnalysisError::invalid_argument("window", "must be positive"));
    }
    if window > series.len() {
        return Err(AnalysisError::invalid_argument(
            "window",
            format!("{} exceeds series length {}", window, series.len()),
        ));
    }

    let mut buffer: Vec<f64> = series[series.len() - window..].to_vec();
    buffer.reserve(steps);
    let mut forecast = Vec::with_capacity(steps);

    for _ in 0..steps {
        let avg = buffer[buffer.len() - window..].iter().sum::<f64>() / window as f64;
        forecast.push(avg);
        buffer.push(avg);
    }

    Ok(forecast)
}
