
use serde::Serialize;

/// Discretized strength of a mutation-drug association
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    #[strum(to_string = "high")]
    High,
    #[strum(to_string = "moderate")]
    Moderate,
    #[strum(to_string = "low")]
    Low,
    #[strum(to_string = "no_association")]
    NoAssociation,
    #[strum(to_string = "indeterminate")]
    Indeterminate
}

impl ConfidenceTier {
    /// Applies the fixed rubric, the first matching rule wins.
    /// # Arguments
    /// * `odds_ratio` - the odds ratio point estimate
    /// * `odds_ratio_pvalue` - p-value for the odds ratio
    /// * `risk_ratio` - the risk ratio point estimate
    /// * `risk_ratio_pvalue` - p-value for the risk ratio
    /// * `pval_cutoff` - significance level, p-values must be strictly below this
    pub fn classify(odds_ratio: f64, odds_ratio_pvalue: f64, risk_ratio: f64, risk_ratio_pvalue: f64, pval_cutoff: f64) -> ConfidenceTier {
        let or_significant = odds_ratio_pvalue < pval_cutoff;
        let rr_significant = risk_ratio_pvalue < pval_cutoff;
        let positive_support = or_significant && risk_ratio > 1.0 && rr_significant;

        if odds_ratio > 10.0 && positive_support {
            ConfidenceTier::High
        } else if odds_ratio > 5.0 && odds_ratio <= 10.0 && positive_support {
            ConfidenceTier::Moderate
        } else if odds_ratio > 1.0 && odds_ratio <= 5.0 && positive_support {
            ConfidenceTier::Low
        } else if (odds_ratio <= 1.0 && or_significant) || (risk_ratio <= 1.0 && rr_significant) {
            ConfidenceTier::NoAssociation
        } else {
            ConfidenceTier::Indeterminate
        }
    }
}
