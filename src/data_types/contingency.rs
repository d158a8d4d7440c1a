
use serde::Serialize;

use crate::data_types::phenotype::Phenotype;
use crate::util::stats::{log_ratio_zscore, two_sided_normal_pvalue};

/// Every cell starts at this value (Haldane-Anscombe correction) so that no ratio divides by zero
pub const CONTINUITY_CORRECTION: f64 = 0.5;

/// A 2x2 table of variant presence (rows) by phenotype (columns).
/// Row 0 is variant present, row 1 is variant absent; column 0 is resistant, column 1 is susceptible.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContingencyTable {
    cells: [[f64; 2]; 2]
}

impl Default for ContingencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ContingencyTable {
    /// Creates a table with each cell seeded by the continuity correction
    pub fn new() -> ContingencyTable {
        ContingencyTable {
            cells: [[CONTINUITY_CORRECTION; 2]; 2]
        }
    }

    /// Creates a table from exact cell values, no correction is applied
    pub fn from_cells(cells: [[f64; 2]; 2]) -> ContingencyTable {
        ContingencyTable { cells }
    }

    /// Counts one sample into the table
    /// # Arguments
    /// * `variant_present` - true if the sample carries the variant
    /// * `phenotype` - the sample label for the drug being scored
    pub fn add_sample(&mut self, variant_present: bool, phenotype: Phenotype) {
        let row = if variant_present { 0 } else { 1 };
        let col = match phenotype {
            Phenotype::Resistant => 0,
            Phenotype::Susceptible => 1
        };
        self.cells[row][col] += 1.0;
    }

    pub fn cells(&self) -> &[[f64; 2]; 2] {
        &self.cells
    }

    /// Sum of all four cells, including the correction
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Cross-product odds ratio, (a*d) / (b*c)
    pub fn odds_ratio(&self) -> f64 {
        let [[a, b], [c, d]] = self.cells;
        (a * d) / (b * c)
    }

    /// Woolf standard error of the log odds ratio
    pub fn log_odds_ratio_se(&self) -> f64 {
        self.cells.iter()
            .flatten()
            .map(|v| 1.0 / v)
            .sum::<f64>()
            .sqrt()
    }

    /// Two-sided Wald p-value for the null hypothesis OR = 1
    pub fn odds_ratio_pvalue(&self) -> f64 {
        let zscore = log_ratio_zscore(self.odds_ratio().ln(), self.log_odds_ratio_se());
        two_sided_normal_pvalue(zscore)
    }

    /// Probability of resistance with the variant divided by the probability without, (a/(a+b)) / (c/(c+d))
    pub fn risk_ratio(&self) -> f64 {
        let [[a, b], [c, d]] = self.cells;
        (a / (a + b)) / (c / (c + d))
    }

    /// Standard error of the log risk ratio, sum over rows of (1 - p) / (n * p)
    pub fn log_risk_ratio_se(&self) -> f64 {
        self.cells.iter()
            .map(|row| {
                let n = row[0] + row[1];
                let p = row[0] / n;
                (1.0 - p) / (n * p)
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Two-sided Wald p-value for the null hypothesis RR = 1
    pub fn risk_ratio_pvalue(&self) -> f64 {
        let zscore = log_ratio_zscore(self.risk_ratio().ln(), self.log_risk_ratio_se());
        two_sided_normal_pvalue(zscore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_seeded_table() {
        let table = ContingencyTable::new();
        assert_eq!(table.cells(), &[[0.5, 0.5], [0.5, 0.5]]);
        assert_approx_eq!(table.total(), 2.0);
        assert_approx_eq!(table.odds_ratio(), 1.0);
        assert_approx_eq!(table.risk_ratio(), 1.0);
        assert_approx_eq!(table.odds_ratio_pvalue(), 1.0);
        assert_approx_eq!(table.risk_ratio_pvalue(), 1.0);
    }

    #[test]
    fn test_add_sample() {
        let mut table = ContingencyTable::new();
        table.add_sample(true, Phenotype::Resistant);
        table.add_sample(true, Phenotype::Resistant);
        table.add_sample(true, Phenotype::Susceptible);
        table.add_sample(false, Phenotype::Resistant);
        table.add_sample(false, Phenotype::Susceptible);
        table.add_sample(false, Phenotype::Susceptible);
        table.add_sample(false, Phenotype::Susceptible);
        assert_eq!(table.cells(), &[[2.5, 1.5], [1.5, 3.5]]);
        assert_approx_eq!(table.total(), 7.0 + 2.0);
    }

    #[test]
    fn test_point_estimates() {
        // 8/10 resistant carry the variant, 0/10 susceptible
        let table = ContingencyTable::from_cells([[8.5, 0.5], [2.5, 10.5]]);
        assert_approx_eq!(table.odds_ratio(), 71.4);
        assert_approx_eq!(table.risk_ratio(), (8.5 / 9.0) / (2.5 / 13.0));

        let expected_or_se = (1.0 / 8.5 + 1.0 / 0.5 + 1.0 / 2.5 + 1.0 / 10.5_f64).sqrt();
        assert_approx_eq!(table.log_odds_ratio_se(), expected_or_se);

        let p1: f64 = 8.5 / 9.0;
        let p2: f64 = 2.5 / 13.0;
        let expected_rr_se = ((1.0 - p1) / (9.0 * p1) + (1.0 - p2) / (13.0 * p2)).sqrt();
        assert_approx_eq!(table.log_risk_ratio_se(), expected_rr_se);

        // z ~ 2.64 and ~ 2.77, both well below 0.05
        assert_approx_eq!(table.odds_ratio_pvalue(), 0.008277, 1e-5);
        assert_approx_eq!(table.risk_ratio_pvalue(), 0.005570, 1e-5);
    }

    #[test]
    fn test_exact_pvalue() {
        // log(OR) = ln(4), se = sqrt(1/2 + 1 + 1 + 1/2) = sqrt(3)
        let table = ContingencyTable::from_cells([[2.0, 1.0], [1.0, 2.0]]);
        assert_approx_eq!(table.log_odds_ratio_se(), 3.0_f64.sqrt());
        let zscore = 4.0_f64.ln() / 3.0_f64.sqrt();
        assert_approx_eq!(table.odds_ratio_pvalue(), two_sided_normal_pvalue(zscore));
        assert_approx_eq!(table.odds_ratio_pvalue(), 0.4234922, 1e-6);
    }

    #[test]
    fn test_axis_symmetry() {
        let [[a, b], [c, d]] = [[12.5, 3.5], [20.5, 40.5]];
        let table = ContingencyTable::from_cells([[a, b], [c, d]]);
        let row_swap = ContingencyTable::from_cells([[c, d], [a, b]]);
        let col_swap = ContingencyTable::from_cells([[b, a], [d, c]]);
        let both_swap = ContingencyTable::from_cells([[d, c], [b, a]]);

        // swapping one axis inverts the odds ratio, swapping both preserves it
        assert_approx_eq!(table.odds_ratio(), 1.0 / row_swap.odds_ratio());
        assert_approx_eq!(table.odds_ratio(), 1.0 / col_swap.odds_ratio());
        assert_approx_eq!(table.odds_ratio(), both_swap.odds_ratio());

        // the test statistic does not depend on orientation
        assert_approx_eq!(table.odds_ratio_pvalue(), row_swap.odds_ratio_pvalue());
        assert_approx_eq!(table.odds_ratio_pvalue(), both_swap.odds_ratio_pvalue());

        // risk ratio inverts when the exposure rows are swapped
        assert_approx_eq!(table.risk_ratio(), 1.0 / row_swap.risk_ratio());
    }
}
