
use log::{debug, info};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Archive of pre-computed tb-profiler results and the matching reference files (tb.bed, tb.dst.csv)
pub const REFERENCE_ARCHIVE_URL: &str = "http://pathogenseq.lshtm.ac.uk/downloads/tbprofiler_results.tgz";

/// Downloads the reference archive and unpacks it into a folder.
/// # Arguments
/// * `url` - the location of the gzipped tar archive
/// * `output_dir` - the folder to extract into, created if missing
/// # Errors
/// * if the request fails or returns an error status
/// * if the archive cannot be decompressed or extracted
pub fn fetch_reference_data(url: &str, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(env!("CARGO_PKG_NAME"))
        .timeout(std::time::Duration::from_secs(1800))
        .build()?;

    info!("Downloading reference data via {url}");
    let mut response = client.get(url)
        .send()?
        .error_for_status()?;

    // spool to disk, the archive is too large to comfortably hold in memory
    let mut archive_file = tempfile::Builder::new()
        .prefix("tbprofiler_results")
        .suffix(".tgz")
        .tempfile()?;
    let num_bytes = response.copy_to(&mut archive_file)?;
    archive_file.flush()?;
    debug!("Response received, {num_bytes} bytes.");

    archive_file.seek(SeekFrom::Start(0))?;
    extract_archive(archive_file.as_file(), output_dir)?;
    info!("Reference data extracted to {output_dir:?}");
    Ok(())
}

/// Unpacks a gzipped tar stream into a folder
/// # Arguments
/// * `reader` - the raw .tgz bytes
/// * `output_dir` - the folder to extract into, created if missing
/// # Errors
/// * if the stream is not a valid gzipped tar archive
/// * if any entry cannot be written
pub fn extract_archive<R: std::io::Read>(reader: R, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let decoder = flate2::read::GzDecoder::new(reader);
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(output_dir)?;
    Ok(())
}
