
use log::{debug, info};

use crate::data_types::association::AssociationResult;
use crate::data_types::contingency::ContingencyTable;
use crate::data_types::mutation_key::MutationKey;
use crate::data_types::phenotype::PhenotypeMetadata;
use crate::errors::ConfidenceError;
use crate::variant_index::{MutationTypeIndex, VariantIndex};

/// Read-only inputs shared by every scored catalog entry
pub struct ScoringData<'a> {
    /// The genotyped samples, only those also in `phenotypes` are counted
    pub samples: &'a [String],
    pub phenotypes: &'a PhenotypeMetadata,
    pub variants: &'a VariantIndex,
    pub mutation_types: &'a MutationTypeIndex
}

impl ScoringData<'_> {
    /// Builds the corrected 2x2 table for a single catalog entry.
    /// Samples without a phenotype table row, or without a label for this drug, are skipped.
    pub fn contingency_table(&self, key: &MutationKey) -> ContingencyTable {
        let mut table = ContingencyTable::new();
        for sample in self.samples.iter() {
            if let Some(phenotype) = self.phenotypes.phenotype(sample, key.drug()) {
                let variant_present = self.variants.carries(key.locus_tag(), key.mutation(), sample);
                table.add_sample(variant_present, phenotype);
            }
        }
        table
    }

    /// Makes sure the drug and gene can be scored at all
    /// # Errors
    /// * if the drug is not a column in the phenotype table
    /// * if no genotyped sample has any call in the gene
    pub fn validate(&self, key: &MutationKey) -> Result<(), ConfidenceError> {
        if !self.phenotypes.has_drug(key.drug()) {
            return Err(ConfidenceError::MissingDrug { drug: key.drug().to_string() });
        }
        if !self.variants.contains_gene(key.locus_tag()) {
            return Err(ConfidenceError::MissingGene { gene: key.locus_tag().to_string() });
        }
        Ok(())
    }
}

/// Scores and classifies a list of catalog entries; used identically for added and removed entries.
/// # Arguments
/// * `keys` - the catalog entries to score
/// * `data` - the shared read-only indices
/// * `pval_cutoff` - the significance level for classification
/// # Errors
/// * if any entry fails validation, no partial results are returned
pub fn score_mutations(keys: &[MutationKey], data: &ScoringData, pval_cutoff: f64) -> Result<Vec<AssociationResult>, ConfidenceError> {
    let mut results: Vec<AssociationResult> = Vec::with_capacity(keys.len());
    for key in keys.iter() {
        data.validate(key)?;
        info!("Calculating metrics for {} with {}", key.locus_tag(), key.drug());

        let table = data.contingency_table(key);
        let variant_type = data.mutation_types.get(key.locus_tag(), key.mutation())
            .map(|s| s.to_string());
        let result = AssociationResult::new(key.clone(), variant_type, table, pval_cutoff);
        debug!("\t{key}: table={:?} OR={:.3} ({:.3e}) RR={:.3} ({:.3e}) -> {}",
            result.table().cells(), result.odds_ratio(), result.odds_ratio_pvalue(),
            result.risk_ratio(), result.risk_ratio_pvalue(), result.confidence());
        results.push(result);
    }
    Ok(results)
}
