/// Errors that abort a catalog comparison, these indicate a data consistency problem upstream
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfidenceError {
    #[error("failed to parse codon number from change \"{descriptor}\" in sample {sample}")]
    ParseError { descriptor: String, sample: String },
    #[error("gene \"{gene}\" has no locus tag in the reference annotation")]
    UnknownGene { gene: String },
    #[error("{drug} not in meta")]
    MissingDrug { drug: String },
    #[error("{gene} not in genotype files")]
    MissingGene { gene: String }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfidenceError::ParseError { descriptor: "c.-15C>T".to_string(), sample: "ERR001".to_string() };
        assert_eq!(err.to_string(), "failed to parse codon number from change \"c.-15C>T\" in sample ERR001");
        let err = ConfidenceError::MissingDrug { drug: "bedaquiline".to_string() };
        assert_eq!(err.to_string(), "bedaquiline not in meta");
    }
}
