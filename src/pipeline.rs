
use itertools::Itertools;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::data_types::association::AssociationResult;
use crate::data_types::gene_locus::GeneLocusMap;
use crate::data_types::phenotype::PhenotypeMetadata;
use crate::download::{fetch_reference_data, REFERENCE_ARCHIVE_URL};
use crate::multi_codon::MultiChangeCodons;
use crate::mutation_diff::{load_catalog, MutationDiff};
use crate::report::{render_markdown, write_results_csv, DEFAULT_GITHUB_REPO};
use crate::scorer::{score_mutations, ScoringData};
use crate::util::file_io::list_result_samples;
use crate::variant_index::load_variant_index;

/// Everything needed to run one catalog comparison
#[derive(Clone, Debug, PartialEq)]
pub struct CompareConfig {
    /// Master catalog CSV
    pub csv1: PathBuf,
    /// Pull request catalog CSV
    pub csv2: PathBuf,
    /// Output table of all scored entries
    pub out: PathBuf,
    /// Folder of `<sample>.results.json` files
    pub dir: PathBuf,
    /// Significance level for the OR and RR tests
    pub pval_cutoff: f64,
    /// If true, the report is posted to GitHub
    pub github: bool,
    /// Reference annotation (BED)
    pub bed: PathBuf,
    /// Phenotype metadata (CSV)
    pub dst: PathBuf,
    /// If true, reuse reference data that is already on disk
    pub skip_download: bool,
    /// Archive to fetch when downloading
    pub download_url: String,
    /// Folder the archive is extracted into
    pub download_dir: PathBuf,
    /// owner/name of the repository receiving comments
    pub github_repo: String
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            csv1: PathBuf::new(),
            csv2: PathBuf::new(),
            out: PathBuf::from("confidence.csv"),
            dir: PathBuf::from("tbprofiler_results/"),
            pval_cutoff: 0.05,
            github: false,
            bed: PathBuf::from("tb.bed"),
            dst: PathBuf::from("tb.dst.csv"),
            skip_download: false,
            download_url: REFERENCE_ARCHIVE_URL.to_string(),
            download_dir: PathBuf::from("."),
            github_repo: DEFAULT_GITHUB_REPO.to_string()
        }
    }
}

/// Scored results for both sides of the catalog diff
#[derive(Clone, Debug, Default)]
pub struct ComparisonReport {
    pub added: Vec<AssociationResult>,
    pub removed: Vec<AssociationResult>
}

impl ComparisonReport {
    /// Markdown body with one table per non-empty section
    pub fn render(&self) -> String {
        render_markdown(&self.added, &self.removed)
    }
}

/// The outcome of a successful comparison
#[derive(Clone, Debug)]
pub enum CompareOutcome {
    /// The catalogs have the same entries, nothing was scored
    NoChanges,
    /// At least one entry changed
    Scored(ComparisonReport)
}

/// Runs the full comparison: reference data, catalog diff, variant index, scoring, and outputs.
/// The GitHub comment is not posted here, see `report::post_github_comment`.
/// # Arguments
/// * `config` - the run configuration
/// # Errors
/// * if the reference data cannot be fetched or loaded
/// * if any catalog, phenotype, or genotype file is malformed
/// * if a changed entry refers to a drug or gene missing from the supporting data
/// * if the output table cannot be written
pub fn run_compare(config: &CompareConfig) -> Result<CompareOutcome, Box<dyn std::error::Error>> {
    if config.skip_download {
        info!("Skipping reference data download.");
    } else {
        fetch_reference_data(&config.download_url, &config.download_dir)?;
    }

    info!("Loading reference annotation from {:?}...", config.bed);
    let gene_map = GeneLocusMap::from_bed(&config.bed)?;
    debug!("\t{} genes annotated across {} drugs", gene_map.num_genes(), gene_map.num_drugs());

    let master = load_catalog(&config.csv1, &gene_map)?;
    let candidate = load_catalog(&config.csv2, &gene_map)?;
    let diff = MutationDiff::new(&master, &candidate);
    if diff.is_empty() {
        info!("No mutations added or removed");
        return Ok(CompareOutcome::NoChanges);
    }
    info!("Found {} added and {} removed mutations", diff.added().len(), diff.removed().len());
    debug!("\tAdded: {}", diff.added().iter().join(", "));
    debug!("\tRemoved: {}", diff.removed().iter().join(", "));

    let multi_codons = MultiChangeCodons::from_added(diff.added());
    if !multi_codons.is_empty() {
        info!("Found {} multi-change codon markers", multi_codons.len());
    }

    info!("Loading phenotype metadata from {:?}...", config.dst);
    let phenotypes = PhenotypeMetadata::from_csv(&config.dst)?;
    debug!("\t{} samples, drugs: {:?}", phenotypes.num_samples(), phenotypes.drugs());

    let samples = list_result_samples(&config.dir)?;
    let (variants, mutation_types) = load_variant_index(&config.dir, &samples, &multi_codons)?;
    let missing_phenotypes = samples.iter()
        .filter(|s| !phenotypes.contains_sample(s))
        .count();
    if missing_phenotypes > 0 {
        warn!("{missing_phenotypes} genotyped samples have no phenotype data and will not be counted");
    }

    let report = score_diff(&diff, &ScoringData {
        samples: &samples,
        phenotypes: &phenotypes,
        variants: &variants,
        mutation_types: &mutation_types
    }, config.pval_cutoff)?;

    info!("Saving results to {:?}", config.out);
    write_results_csv(&report.added, &report.removed, &config.out)?;
    Ok(CompareOutcome::Scored(report))
}

/// Scores both sides of a diff with the same routine
/// # Errors
/// * if any entry fails validation
pub fn score_diff(diff: &MutationDiff, data: &ScoringData, pval_cutoff: f64) -> Result<ComparisonReport, Box<dyn std::error::Error>> {
    let added = score_mutations(diff.added(), data, pval_cutoff)?;
    let removed = score_mutations(diff.removed(), data, pval_cutoff)?;
    Ok(ComparisonReport { added, removed })
}

/// Checks that the reference files needed by `run_compare` exist when no download will be performed
pub fn missing_reference_files(config: &CompareConfig) -> Vec<&Path> {
    if !config.skip_download {
        return vec![];
    }
    [config.bed.as_path(), config.dst.as_path(), config.dir.as_path()].into_iter()
        .filter(|p| !p.exists())
        .collect()
}
