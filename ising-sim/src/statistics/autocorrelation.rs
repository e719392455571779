/// Normalized autocorrelation Γ(δ) of a series for lags `0..=max_lag`.
///
/// Γ(0) = 1. A constant series has no fluctuations to correlate; its Γ is
/// reported as 1 at lag 0 and 0 elsewhere.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Vec<f64> {
    let m = series.len();
    if m == 0 {
        return vec![];
    }
    let max_lag = max_lag.min(m - 1);
    let mean = series.iter().sum::<f64>() / m as f64;
    let var = series.iter().map(|&o| (o - mean) * (o - mean)).sum::<f64>() / m as f64;
    // The mean of a constant series carries rounding error, which leaves a
    // tiny positive `var` made of one repeated residue.
    let flat = var <= f64::EPSILON * mean * mean || series.iter().all(|&o| o == series[0]);

    (0..=max_lag)
        .map(|delta| {
            if flat {
                return if delta == 0 { 1.0 } else { 0.0 };
            }
            let count = (m - delta) as f64;
            let prod: f64 = series[..m - delta]
                .iter()
                .zip(&series[delta..])
                .map(|(&a, &b)| (a - mean) * (b - mean))
                .sum();
            prod / count / var
        })
        .collect()
}

/// Integrated autocorrelation time with Sokal's automatic window
/// (stop once the window exceeds five times the running estimate).
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

/// τ_int of a sample series, using lags up to a quarter of its length.
pub fn integrated_time(series: &[f64]) -> f64 {
    let max_lag = (series.len() / 4).max(1);
    sokal_tau(&autocorrelation(series, max_lag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_alternating_series() {
        let series: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let g = autocorrelation(&series, 3);
        assert_relative_eq!(g[0], 1.0);
        assert_relative_eq!(g[1], -1.0);
        assert_relative_eq!(g[2], 1.0);
    }

    #[test]
    fn test_constant_series() {
        let g = autocorrelation(&[0.3; 10], 4);
        assert_eq!(g, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_relative_eq!(integrated_time(&[0.3; 10]), 0.5);
    }

    #[test]
    fn test_constant_series_with_inexact_mean() {
        for v in [0.1, 0.3, 0.7, 1.0 / 3.0] {
            for len in [7, 10, 33, 200] {
                let series = vec![v; len];
                let g = autocorrelation(&series, 5);
                assert_eq!(g[0], 1.0);
                assert!(g[1..].iter().all(|&x| x == 0.0), "v={v} len={len}: {g:?}");
                assert_relative_eq!(integrated_time(&series), 0.5);
            }
        }
    }

    #[test]
    fn test_sokal_window() {
        // Γ(δ) = 0.5^δ: τ = 0.5 + Σ 0.5^δ → 1.5.
        let gamma: Vec<f64> = (0..60).map(|d| 0.5f64.powi(d)).collect();
        assert_relative_eq!(sokal_tau(&gamma), 1.5, epsilon = 1e-2);
    }

    #[test]
    fn test_empty_series() {
        assert!(autocorrelation(&[], 5).is_empty());
        assert_relative_eq!(integrated_time(&[]), 0.5);
    }
}
