
use crate::data_types::confidence::ConfidenceTier;
use crate::data_types::contingency::ContingencyTable;
use crate::data_types::mutation_key::MutationKey;

/// The statistics for a single added or removed catalog entry, immutable once created
#[derive(Clone, Debug, PartialEq)]
pub struct AssociationResult {
    /// The catalog entry being scored
    key: MutationKey,
    /// Raw classification from the genotype files, None for synthetic or unobserved changes
    variant_type: Option<String>,
    /// The underlying counts
    table: ContingencyTable,
    odds_ratio: f64,
    odds_ratio_pvalue: f64,
    risk_ratio: f64,
    risk_ratio_pvalue: f64,
    /// Tier assigned from the statistics above
    confidence: ConfidenceTier
}

impl AssociationResult {
    /// Computes all statistics from the table and classifies them.
    /// # Arguments
    /// * `key` - the catalog entry
    /// * `variant_type` - the recorded classification for this change, if any
    /// * `table` - the fully populated contingency table
    /// * `pval_cutoff` - the significance level for classification
    pub fn new(key: MutationKey, variant_type: Option<String>, table: ContingencyTable, pval_cutoff: f64) -> AssociationResult {
        let odds_ratio = table.odds_ratio();
        let odds_ratio_pvalue = table.odds_ratio_pvalue();
        let risk_ratio = table.risk_ratio();
        let risk_ratio_pvalue = table.risk_ratio_pvalue();
        let confidence = ConfidenceTier::classify(odds_ratio, odds_ratio_pvalue, risk_ratio, risk_ratio_pvalue, pval_cutoff);
        AssociationResult {
            key,
            variant_type,
            table,
            odds_ratio,
            odds_ratio_pvalue,
            risk_ratio,
            risk_ratio_pvalue,
            confidence
        }
    }

    // getters
    pub fn key(&self) -> &MutationKey {
        &self.key
    }

    pub fn drug(&self) -> &str {
        self.key.drug()
    }

    pub fn gene(&self) -> &str {
        self.key.locus_tag()
    }

    pub fn mutation(&self) -> &str {
        self.key.mutation()
    }

    pub fn variant_type(&self) -> Option<&str> {
        self.variant_type.as_deref()
    }

    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    pub fn odds_ratio(&self) -> f64 {
        self.odds_ratio
    }

    pub fn odds_ratio_pvalue(&self) -> f64 {
        self.odds_ratio_pvalue
    }

    pub fn risk_ratio(&self) -> f64 {
        self.risk_ratio
    }

    pub fn risk_ratio_pvalue(&self) -> f64 {
        self.risk_ratio_pvalue
    }

    pub fn confidence(&self) -> ConfidenceTier {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_association_result() {
        let key = MutationKey::new("isoniazid", "Rv1908c", "p.Ser315Thr");
        let table = ContingencyTable::from_cells([[8.5, 0.5], [2.5, 10.5]]);
        let result = AssociationResult::new(key.clone(), Some("missense".to_string()), table.clone(), 0.05);

        assert_eq!(result.key(), &key);
        assert_eq!(result.drug(), "isoniazid");
        assert_eq!(result.gene(), "Rv1908c");
        assert_eq!(result.mutation(), "p.Ser315Thr");
        assert_eq!(result.variant_type(), Some("missense"));
        assert_eq!(result.table(), &table);
        assert_approx_eq!(result.odds_ratio(), table.odds_ratio());
        assert_approx_eq!(result.risk_ratio(), table.risk_ratio());
        assert_eq!(result.confidence(), ConfidenceTier::High);
    }

    #[test]
    fn test_uninformative_table() {
        let key = MutationKey::new("rifampicin", "Rv0667", "p.Glu761Asp");
        let result = AssociationResult::new(key, None, ContingencyTable::new(), 0.05);
        assert_eq!(result.variant_type(), None);
        assert_eq!(result.confidence(), ConfidenceTier::Indeterminate);
    }
}
