use clap::Args;
use log::{info, warn};
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_required_filename};
use crate::download::REFERENCE_ARCHIVE_URL;
use crate::pipeline::{missing_reference_files, CompareConfig};
use crate::report::DEFAULT_GITHUB_REPO;

#[derive(Args, Clone)]
#[clap(author, about, 
    after_help = &**AFTER_HELP)]
pub struct CompareSettings {
    /// Master catalog (CSV)
    #[clap(required = true)]
    #[clap(long = "csv1")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub csv1: PathBuf,

    /// Pull request catalog (CSV)
    #[clap(required = true)]
    #[clap(long = "csv2")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub csv2: PathBuf,

    /// Directory to look for tb-profiler results files
    #[clap(long = "dir")]
    #[clap(value_name = "DIR")]
    #[clap(default_value = "tbprofiler_results/")]
    #[clap(help_heading = Some("Input/Output"))]
    pub dir: PathBuf,

    /// Output file with every scored mutation (CSV, or TSV if the name ends in .tsv)
    #[clap(short = 'o')]
    #[clap(long = "out")]
    #[clap(value_name = "CSV")]
    #[clap(default_value = "confidence.csv")]
    #[clap(help_heading = Some("Input/Output"))]
    pub out: PathBuf,

    /// Reference annotation with gene names, locus tags, and drugs
    #[clap(long = "bed")]
    #[clap(value_name = "BED")]
    #[clap(default_value = "tb.bed")]
    #[clap(help_heading = Some("Reference data"))]
    pub bed: PathBuf,

    /// Phenotype (DST) metadata with an id column and one column per drug
    #[clap(long = "dst")]
    #[clap(value_name = "CSV")]
    #[clap(default_value = "tb.dst.csv")]
    #[clap(help_heading = Some("Reference data"))]
    pub dst: PathBuf,

    /// Reuse reference data already on disk instead of downloading it
    #[clap(long = "skip-download")]
    #[clap(help_heading = Some("Reference data"))]
    pub skip_download: bool,

    /// Location of the reference data archive
    #[clap(hide = true)]
    #[clap(long = "download-url")]
    #[clap(value_name = "URL")]
    #[clap(default_value = REFERENCE_ARCHIVE_URL)]
    #[clap(help_heading = Some("Reference data"))]
    pub download_url: String,

    /// Pvalue cutoff to use for the OR and RR significance tests
    #[clap(long = "pval-cutoff")]
    #[clap(value_name = "FLOAT")]
    #[clap(default_value = "0.05")]
    #[clap(help_heading = Some("Scoring"))]
    pub pval_cutoff: f64,

    /// Post results to GitHub as a commit comment
    #[clap(long = "github")]
    #[clap(help_heading = Some("GitHub"))]
    pub github: bool,

    /// Repository to post results to
    #[clap(long = "github-repo")]
    #[clap(value_name = "OWNER/NAME")]
    #[clap(default_value = DEFAULT_GITHUB_REPO)]
    #[clap(help_heading = Some("GitHub"))]
    pub github_repo: String,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl CompareSettings {
    /// Converts the validated settings into the pipeline configuration
    pub fn to_config(&self) -> CompareConfig {
        CompareConfig {
            csv1: self.csv1.clone(),
            csv2: self.csv2.clone(),
            out: self.out.clone(),
            dir: self.dir.clone(),
            pval_cutoff: self.pval_cutoff,
            github: self.github,
            bed: self.bed.clone(),
            dst: self.dst.clone(),
            skip_download: self.skip_download,
            download_url: self.download_url.clone(),
            github_repo: self.github_repo.clone(),
            ..Default::default()
        }
    }
}

pub fn check_compare_settings(settings: CompareSettings) -> Result<CompareSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");

    // the catalogs are always local
    check_required_filename(&settings.csv1, "Master catalog");
    check_required_filename(&settings.csv2, "Pull request catalog");
    info!("\tMaster catalog: {:?}", settings.csv1);
    info!("\tPull request catalog: {:?}", settings.csv2);

    // reference data only needs to exist up front if we are not downloading it
    if settings.skip_download {
        let config = settings.to_config();
        let missing = missing_reference_files(&config);
        if !missing.is_empty() {
            bail!("Reference data does not exist and --skip-download is set: {missing:?}");
        }
        info!("\tReference data: using existing files");
    } else {
        info!("\tReference data: {}", settings.download_url);
    }
    info!("\tResults directory: {:?}", settings.dir);
    info!("\tReference BED: {:?}", settings.bed);
    info!("\tPhenotype metadata: {:?}", settings.dst);

    // outputs
    info!("Outputs:");
    info!("\tResults table: {:?}", settings.out);
    if settings.github {
        info!("\tGitHub repository: {}", settings.github_repo);
    } else {
        info!("\tGitHub: DISABLED");
    }

    info!("Scoring settings:");
    if !(settings.pval_cutoff > 0.0 && settings.pval_cutoff <= 1.0) {
        bail!("--pval-cutoff must be in the range (0.0, 1.0]");
    }
    if settings.pval_cutoff > 0.1 {
        warn!("\tP-value cutoff is unusually permissive: {}", settings.pval_cutoff);
    }
    info!("\tP-value cutoff: {}", settings.pval_cutoff);

    Ok(settings)
}
