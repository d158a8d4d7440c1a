
/// Two-sided p-value for a standard normal test statistic, e.g. a Wald z-score.
/// Computed as erfc(|z| / sqrt(2)), which equals 2 * (1 - Phi(|z|)).
/// # Arguments
/// * `zscore` - the observed test statistic
pub fn two_sided_normal_pvalue(zscore: f64) -> f64 {
    use statrs::function::erf::erfc;
    erfc(zscore.abs() / std::f64::consts::SQRT_2)
}

/// Wald z-score for a log-scale estimate against a null ratio of 1.0
/// # Arguments
/// * `log_estimate` - the natural log of the ratio estimate
/// * `standard_error` - the standard error of `log_estimate`
pub fn log_ratio_zscore(log_estimate: f64, standard_error: f64) -> f64 {
    log_estimate / standard_error
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_two_sided_pvalue() {
        assert_approx_eq!(two_sided_normal_pvalue(0.0), 1.0);
        assert_approx_eq!(two_sided_normal_pvalue(1.959963984540054), 0.05, 1e-9);
        assert_approx_eq!(two_sided_normal_pvalue(-1.959963984540054), 0.05, 1e-9);
        assert_approx_eq!(two_sided_normal_pvalue(2.5758293035489), 0.01, 1e-9);

        // far tail should still be positive
        let tiny = two_sided_normal_pvalue(12.0);
        assert!(tiny > 0.0 && tiny < 1e-30);
    }

    #[test]
    fn test_log_ratio_zscore() {
        assert_approx_eq!(log_ratio_zscore(0.0, 1.0), 0.0);
        assert_approx_eq!(log_ratio_zscore(2.0_f64.ln(), 0.5), 2.0 * 2.0_f64.ln());
    }
}
