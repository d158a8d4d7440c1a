
use log::trace;
use rustc_hash::FxHashMap as HashMap;
use simple_error::bail;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::ConfidenceError;

/// Lookup from human-readable gene names to locus tags, and from drugs to the locus tags annotated with them.
/// This is loaded once from the reference BED and is read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct GeneLocusMap {
    /// gene name -> locus tag
    gene_to_locus: HashMap<String, String>,
    /// drug name -> set of locus tags
    drug_to_loci: BTreeMap<String, BTreeSet<String>>
}

impl GeneLocusMap {
    /// Loads the map from a BED-like file with columns (chrom, start, end, locus tag, gene name, drugs).
    /// # Arguments
    /// * `filename` - the reference annotation file
    /// # Errors
    /// * if the file cannot be opened or read
    /// * if any non-empty row has fewer than six columns
    pub fn from_bed(filename: &Path) -> Result<GeneLocusMap, Box<dyn std::error::Error>> {
        let file = File::open(filename)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Same as `from_bed`, but from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<GeneLocusMap, Box<dyn std::error::Error>> {
        let mut ret = GeneLocusMap::default();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let row: Vec<&str> = line.split_whitespace().collect();
            if row.is_empty() {
                continue;
            }
            if row.len() < 6 {
                bail!("Expected 6 columns in reference BED line {}, found {}", line_index + 1, row.len());
            }

            let locus_tag = row[3];
            let gene_name = row[4];
            trace!("\t{gene_name} -> {locus_tag}");
            ret.gene_to_locus.insert(gene_name.to_string(), locus_tag.to_string());
            for drug in row[5].split(',').filter(|d| !d.is_empty()) {
                ret.drug_to_loci.entry(drug.to_string())
                    .or_default()
                    .insert(locus_tag.to_string());
            }
        }
        Ok(ret)
    }

    /// Translates a gene name into its locus tag
    /// # Errors
    /// * if the gene name is not present in the annotation
    pub fn locus_tag(&self, gene_name: &str) -> Result<&str, ConfidenceError> {
        self.gene_to_locus.get(gene_name)
            .map(|s| s.as_str())
            .ok_or_else(|| ConfidenceError::UnknownGene { gene: gene_name.to_string() })
    }

    /// Returns the locus tags annotated with a given drug, if any
    pub fn drug_loci(&self, drug: &str) -> Option<&BTreeSet<String>> {
        self.drug_to_loci.get(drug)
    }

    pub fn num_genes(&self) -> usize {
        self.gene_to_locus.len()
    }

    pub fn num_drugs(&self) -> usize {
        self.drug_to_loci.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BED: &str = "Chromosome\t759806\t763325\tRv0667\trpoB\trifampicin
Chromosome\t2153888\t2156111\tRv1908c\tkatG\tisoniazid

Chromosome\t1673439\t1674183\tRv1484\tinhA\tisoniazid,ethionamide
";

    #[test]
    fn test_from_reader() {
        let gene_map = GeneLocusMap::from_reader(MOCK_BED.as_bytes()).unwrap();
        assert_eq!(gene_map.num_genes(), 3);
        assert_eq!(gene_map.num_drugs(), 3);
        assert_eq!(gene_map.locus_tag("katG").unwrap(), "Rv1908c");
        assert_eq!(gene_map.locus_tag("rpoB").unwrap(), "Rv0667");

        let inh_loci: Vec<&str> = gene_map.drug_loci("isoniazid").unwrap().iter().map(|s| s.as_str()).collect();
        assert_eq!(inh_loci, vec!["Rv1484", "Rv1908c"]);
        assert!(gene_map.drug_loci("bedaquiline").is_none());
    }

    #[test]
    fn test_unknown_gene() {
        let gene_map = GeneLocusMap::from_reader(MOCK_BED.as_bytes()).unwrap();
        assert_eq!(
            gene_map.locus_tag("pncA"),
            Err(ConfidenceError::UnknownGene { gene: "pncA".to_string() })
        );
    }

    #[test]
    fn test_short_row() {
        let bad_bed = "Chromosome\t759806\t763325\tRv0667\n";
        assert!(GeneLocusMap::from_reader(bad_bed.as_bytes()).is_err());
    }
}
