
use log::info;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::data_types::gene_locus::GeneLocusMap;
use crate::data_types::mutation_key::MutationKey;

/// One row of a TBDB mutation catalog CSV, extra columns are ignored
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Drug")]
    drug: String,
    #[serde(rename = "Gene")]
    gene: String,
    #[serde(rename = "Mutation")]
    mutation: String
}

/// Loads a catalog CSV into a set of keys, translating gene names to locus tags.
/// # Arguments
/// * `filename` - the catalog CSV with `Drug`, `Gene`, and `Mutation` columns
/// * `gene_map` - lookup for gene name to locus tag
/// # Errors
/// * if the file cannot be opened or a row fails to parse
/// * if a gene name has no locus tag
pub fn load_catalog(filename: &Path, gene_map: &GeneLocusMap) -> Result<BTreeSet<MutationKey>, Box<dyn std::error::Error>> {
    let file = File::open(filename)?;
    let catalog = read_catalog(file, gene_map)?;
    info!("Loaded {} catalog entries from {filename:?}", catalog.len());
    Ok(catalog)
}

/// Same as `load_catalog`, but from any reader.
pub fn read_catalog<R: Read>(reader: R, gene_map: &GeneLocusMap) -> Result<BTreeSet<MutationKey>, Box<dyn std::error::Error>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut ret: BTreeSet<MutationKey> = Default::default();
    for result in csv_reader.deserialize() {
        let row: CatalogRow = result?;
        let locus_tag = gene_map.locus_tag(&row.gene)?;
        ret.insert(MutationKey::new(&row.drug, locus_tag, &row.mutation));
    }
    Ok(ret)
}

/// The catalog entries that changed between the master and candidate catalogs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationDiff {
    /// Present in the candidate, but not the master
    added: Vec<MutationKey>,
    /// Present in the master, but not the candidate
    removed: Vec<MutationKey>
}

impl MutationDiff {
    /// Computes both set differences
    /// # Arguments
    /// * `master` - the current catalog
    /// * `candidate` - the proposed catalog
    pub fn new(master: &BTreeSet<MutationKey>, candidate: &BTreeSet<MutationKey>) -> MutationDiff {
        MutationDiff {
            added: candidate.difference(master).cloned().collect(),
            removed: master.difference(candidate).cloned().collect()
        }
    }

    /// True if the catalogs are identical
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added(&self) -> &[MutationKey] {
        &self.added
    }

    pub fn removed(&self) -> &[MutationKey] {
        &self.removed
    }
}
