use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Suffix of the per-sample tb-profiler output files
pub const RESULTS_SUFFIX: &str = ".results.json";

/// Helper function that loads a file into some type, helpful generic
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let fp: Box<dyn std::io::Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(
            flate2::read::MultiGzDecoder::new(
                File::open(filename)?
            )
        )
    } else {
        Box::new(File::open(filename)?)
    };
    let result: T = serde_json::from_reader(BufReader::new(fp))?;
    Ok(result)
}

/// Scans a folder for `<sample>.results.json` files and returns the sample identifiers, sorted.
/// # Arguments
/// * `results_dir` - the folder containing tb-profiler results
/// # Errors
/// * if the folder cannot be read
pub fn list_result_samples(results_dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut samples: Vec<String> = vec![];
    for entry in std::fs::read_dir(results_dir)? {
        let entry = entry?;
        let filename = entry.file_name();
        if let Some(sample) = filename.to_string_lossy().strip_suffix(RESULTS_SUFFIX) {
            if !sample.is_empty() {
                samples.push(sample.to_string());
            }
        }
    }
    samples.sort();
    Ok(samples)
}

/// Path to the results file for a sample
pub fn result_filename(results_dir: &Path, sample: &str) -> std::path::PathBuf {
    results_dir.join(format!("{sample}{RESULTS_SUFFIX}"))
}
