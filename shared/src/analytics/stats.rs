//! Small numeric helpers shared by the engines
//!
//! Every helper returns 0 instead of NaN/Infinity when its denominator would
//! be zero.

/// Arithmetic mean, 0 for empty input
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation
pub fn population_std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Sample standard deviation (n - 1 denominator), 0 below two points
pub fn sample_std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// `numerator / denominator`, or 0 when the denominator is zero or not finite
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Ordinary least squares slope of `data` against its index
pub fn linear_slope(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(data);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    safe_ratio(numerator, denominator)
}

/// Pearson correlation between the series and itself shifted by `lag`
///
/// 0 when either window is constant or the lag leaves fewer than two pairs.
pub fn lagged_correlation(data: &[f64], lag: usize) -> f64 {
    let n = data.len();
    if lag == 0 || lag + 2 > n {
        return 0.0;
    }

    let head = &data[..n - lag];
    let tail = &data[lag..];
    let head_mean = mean(head);
    let tail_mean = mean(tail);

    let mut covariance = 0.0;
    let mut head_var = 0.0;
    let mut tail_var = 0.0;
    for (a, b) in head.iter().zip(tail) {
        let da = a - head_mean;
        let db = b - tail_mean;
        covariance += da * db;
        head_var += da * da;
        tail_var += db * db;
    }

    safe_ratio(covariance, (head_var * tail_var).sqrt())
}
