
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::path::Path;

use crate::data_types::mutation_key::{any_missense_codon, FRAMESHIFT, LARGE_DELETION};
use crate::data_types::variant_record::{SampleResults, VariantClass, VariantRecord};
use crate::errors::ConfidenceError;
use crate::multi_codon::MultiChangeCodons;
use crate::util::file_io::{load_json, result_filename};

lazy_static! {
    /// Extracts the codon number from a protein change, e.g. "p.Ser315Thr" -> 315 or "p.Gln432*" -> 432
    static ref CODON_REGEX: Regex = Regex::new(r"p\.[A-Za-z]+([0-9]+)[A-Za-z*]+").unwrap();
}

/// Gets the codon number from a protein change descriptor
/// # Arguments
/// * `change` - the change descriptor
/// * `sample` - the sample the change came from, only used for error reporting
/// # Errors
/// * if the descriptor does not look like a protein change
pub fn get_codon_number(change: &str, sample: &str) -> Result<u32, ConfidenceError> {
    CODON_REGEX.captures(change)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(|| ConfidenceError::ParseError {
            descriptor: change.to_string(),
            sample: sample.to_string()
        })
}

/// Lookup from locus tag -> change -> samples carrying that change
#[derive(Clone, Debug, Default)]
pub struct VariantIndex {
    variants: HashMap<String, HashMap<String, HashSet<String>>>
}

impl VariantIndex {
    /// Registers a sample under a change, repeated insertions are a no-op
    pub fn insert(&mut self, locus_tag: &str, change: &str, sample: &str) {
        self.variants.entry(locus_tag.to_string())
            .or_default()
            .entry(change.to_string())
            .or_default()
            .insert(sample.to_string());
    }

    /// Returns true if any sample had a change in this locus
    pub fn contains_gene(&self, locus_tag: &str) -> bool {
        self.variants.contains_key(locus_tag)
    }

    /// Returns the samples carrying a change, if any
    pub fn samples(&self, locus_tag: &str, change: &str) -> Option<&HashSet<String>> {
        self.variants.get(locus_tag)
            .and_then(|changes| changes.get(change))
    }

    /// Returns true if `sample` carries `change` in `locus_tag`
    pub fn carries(&self, locus_tag: &str, change: &str, sample: &str) -> bool {
        self.samples(locus_tag, change)
            .map(|s| s.contains(sample))
            .unwrap_or(false)
    }

    pub fn num_genes(&self) -> usize {
        self.variants.len()
    }

    /// Total number of distinct (locus tag, change) pairs, including the synthetic ones
    pub fn num_variants(&self) -> usize {
        self.variants.values().map(|changes| changes.len()).sum()
    }
}

/// Lookup from (locus tag, change) to the raw classification string; last write wins
#[derive(Clone, Debug, Default)]
pub struct MutationTypeIndex {
    types: HashMap<(String, String), String>
}

impl MutationTypeIndex {
    /// Records the classification for a change, replacing any previous value
    pub fn insert(&mut self, locus_tag: &str, change: &str, variant_type: &str) {
        let previous = self.types.insert((locus_tag.to_string(), change.to_string()), variant_type.to_string());
        if let Some(previous) = previous {
            if previous != variant_type {
                // upstream should be deterministic here, we report it but keep the latest value
                debug!("Classification for {locus_tag} {change} changed from {previous} to {variant_type}");
            }
        }
    }

    pub fn get(&self, locus_tag: &str, change: &str) -> Option<&str> {
        self.types.get(&(locus_tag.to_string(), change.to_string()))
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Folds per-sample variant calls into a `VariantIndex` and `MutationTypeIndex`
pub struct VariantIndexBuilder<'a> {
    /// Aggregate codon markers that need synthetic membership
    multi_codons: &'a MultiChangeCodons,
    variants: VariantIndex,
    mutation_types: MutationTypeIndex
}

impl<'a> VariantIndexBuilder<'a> {
    pub fn new(multi_codons: &'a MultiChangeCodons) -> VariantIndexBuilder<'a> {
        VariantIndexBuilder {
            multi_codons,
            variants: Default::default(),
            mutation_types: Default::default()
        }
    }

    /// Adds a single call for a sample, including any synthetic aggregate changes it belongs to.
    /// # Arguments
    /// * `sample` - the sample identifier
    /// * `record` - the variant call
    /// # Errors
    /// * if the record is missense and the change is not a parseable protein change
    pub fn add_record(&mut self, sample: &str, record: &VariantRecord) -> Result<(), ConfidenceError> {
        let locus_tag = record.locus_tag.as_str();
        trace!("\t{sample}: {locus_tag} {} ({})", record.change, record.variant_type);
        self.variants.insert(locus_tag, &record.change, sample);

        match record.variant_class() {
            VariantClass::LargeDeletion => self.variants.insert(locus_tag, LARGE_DELETION, sample),
            VariantClass::Frameshift => self.variants.insert(locus_tag, FRAMESHIFT, sample),
            VariantClass::Missense => {
                let codon = get_codon_number(&record.change, sample)?;
                if let Some(drug) = record.drug.as_deref() {
                    if self.multi_codons.is_active(locus_tag, codon, drug) {
                        self.variants.insert(locus_tag, &any_missense_codon(codon), sample);
                    }
                }
            },
            VariantClass::Other => {}
        };

        self.mutation_types.insert(locus_tag, &record.change, &record.variant_type);
        Ok(())
    }

    /// Adds every call from both variant categories of a sample
    pub fn add_sample(&mut self, sample: &str, results: &SampleResults) -> Result<(), ConfidenceError> {
        for record in results.all_variants() {
            self.add_record(sample, record)?;
        }
        Ok(())
    }

    /// Consumes the builder and returns the finished indices
    pub fn build(self) -> (VariantIndex, MutationTypeIndex) {
        (self.variants, self.mutation_types)
    }
}

/// Loads the results file for every sample and builds the indices.
/// # Arguments
/// * `results_dir` - folder containing `<sample>.results.json` files
/// * `samples` - the sample identifiers to load
/// * `multi_codons` - the aggregate codon markers from the catalog diff
/// # Errors
/// * if any results file fails to load or parse
/// * if any missense change cannot be parsed into a codon
pub fn load_variant_index(results_dir: &Path, samples: &[String], multi_codons: &MultiChangeCodons)
    -> Result<(VariantIndex, MutationTypeIndex), Box<dyn std::error::Error>> {
    info!("Loading tb-profiler results for {} samples...", samples.len());
    let mut builder = VariantIndexBuilder::new(multi_codons);
    for (i, sample) in samples.iter().enumerate() {
        let results: SampleResults = load_json(&result_filename(results_dir, sample))?;
        builder.add_sample(sample, &results)?;
        if (i + 1) % 1000 == 0 {
            debug!("\tLoaded {} / {} samples", i + 1, samples.len());
        }
    }

    let (variants, mutation_types) = builder.build();
    info!("Collected {} unique variants in {} genes", variants.num_variants(), variants.num_genes());
    Ok((variants, mutation_types))
}
