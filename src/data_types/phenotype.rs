
use rustc_hash::FxHashMap as HashMap;
use simple_error::bail;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Binary drug susceptibility label
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::Display)]
pub enum Phenotype {
    #[strum(to_string = "resistant")]
    Resistant,
    #[strum(to_string = "susceptible")]
    Susceptible
}

impl Phenotype {
    /// Parses the DST encoding, "1" is resistant and "0" is susceptible; anything else is unknown
    pub fn from_label(label: &str) -> Option<Phenotype> {
        match label.trim() {
            "1" => Some(Phenotype::Resistant),
            "0" => Some(Phenotype::Susceptible),
            _ => None
        }
    }
}

/// The sample cohort phenotype table, sample ID -> drug -> label
#[derive(Clone, Debug, Default)]
pub struct PhenotypeMetadata {
    /// All drug columns in the table
    drugs: BTreeSet<String>,
    /// Only the known labels are stored, missing or NA values are dropped
    samples: HashMap<String, HashMap<String, Phenotype>>
}

impl PhenotypeMetadata {
    /// Loads the DST table from a CSV with an `id` column plus one column per drug.
    /// # Arguments
    /// * `filename` - the CSV file to load
    /// # Errors
    /// * if the file cannot be opened or parsed as CSV
    /// * if there is no `id` column
    pub fn from_csv(filename: &Path) -> Result<PhenotypeMetadata, Box<dyn std::error::Error>> {
        let file = File::open(filename)?;
        Self::from_reader(file)
    }

    /// Same as `from_csv`, but from any reader.
    /// Short rows are accepted, missing trailing cells are unknown.
    pub fn from_reader<R: Read>(reader: R) -> Result<PhenotypeMetadata, Box<dyn std::error::Error>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let id_index = match headers.iter().position(|h| h == "id") {
            Some(i) => i,
            None => bail!("Phenotype metadata is missing the \"id\" column")
        };

        let mut ret = PhenotypeMetadata {
            drugs: headers.iter()
                .enumerate()
                .filter(|(i, _)| *i != id_index)
                .map(|(_, h)| h.to_string())
                .collect(),
            samples: Default::default()
        };

        for result in csv_reader.records() {
            let record = result?;
            let sample_id = match record.get(id_index) {
                Some(s) => s.to_string(),
                None => bail!("Phenotype metadata row is missing an id: {record:?}")
            };

            let labels: HashMap<String, Phenotype> = headers.iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| *i != id_index)
                .filter_map(|(_, (drug, value))| {
                    Phenotype::from_label(value).map(|p| (drug.to_string(), p))
                })
                .collect();
            ret.samples.insert(sample_id, labels);
        }
        Ok(ret)
    }

    /// Returns true if `drug` is a column in the table
    pub fn has_drug(&self, drug: &str) -> bool {
        self.drugs.contains(drug)
    }

    /// Returns true if the sample has a row in the table
    pub fn contains_sample(&self, sample: &str) -> bool {
        self.samples.contains_key(sample)
    }

    /// Returns the label for a sample and drug; None if the sample is absent or the value is unknown
    pub fn phenotype(&self, sample: &str, drug: &str) -> Option<Phenotype> {
        self.samples.get(sample)
            .and_then(|labels| labels.get(drug))
            .copied()
    }

    pub fn drugs(&self) -> &BTreeSet<String> {
        &self.drugs
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }
}
