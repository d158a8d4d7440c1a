
use serde::Deserialize;

/// The contents of a `<sample>.results.json` file from tb-profiler, we only parse the elements we need though
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SampleResults {
    /// High-confidence drug resistance variants
    pub dr_variants: Vec<VariantRecord>,
    /// Every other variant called in the target genes
    pub other_variants: Vec<VariantRecord>
}

impl SampleResults {
    /// Iterates over both variant categories, they are treated identically downstream
    pub fn all_variants(&self) -> impl Iterator<Item = &VariantRecord> {
        self.dr_variants.iter().chain(self.other_variants.iter())
    }
}

/// One genotype call for one sample
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VariantRecord {
    /// Locus tag of the gene containing the call
    pub locus_tag: String,
    /// Change descriptor, e.g. "p.Ser315Thr"
    pub change: String,
    /// Raw classification string from the variant caller, e.g. "missense" or "large_deletion_inframe"
    #[serde(rename = "type")]
    pub variant_type: String,
    /// Associated drug, typically only present on drug resistance calls
    #[serde(default)]
    pub drug: Option<String>
}

impl VariantRecord {
    /// Convenience constructor, mostly for testing
    pub fn new(locus_tag: &str, change: &str, variant_type: &str, drug: Option<&str>) -> VariantRecord {
        VariantRecord {
            locus_tag: locus_tag.to_string(),
            change: change.to_string(),
            variant_type: variant_type.to_string(),
            drug: drug.map(|d| d.to_string())
        }
    }

    /// Converts the raw classification string into the categories we aggregate on
    pub fn variant_class(&self) -> VariantClass {
        VariantClass::from_type_str(&self.variant_type)
    }
}

/// Classification categories that change how a call is indexed
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum VariantClass {
    #[strum(to_string = "missense")]
    Missense,
    #[strum(to_string = "frameshift")]
    Frameshift,
    #[strum(to_string = "large_deletion")]
    LargeDeletion,
    #[strum(to_string = "other")]
    Other
}

impl VariantClass {
    /// Large deletion and frameshift match on substrings, missense must be an exact match
    pub fn from_type_str(variant_type: &str) -> VariantClass {
        if variant_type.contains("large_deletion") {
            VariantClass::LargeDeletion
        } else if variant_type.contains("frameshift") {
            VariantClass::Frameshift
        } else if variant_type == "missense" {
            VariantClass::Missense
        } else {
            VariantClass::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_class() {
        assert_eq!(VariantClass::from_type_str("missense"), VariantClass::Missense);
        assert_eq!(VariantClass::from_type_str("large_deletion_inframe"), VariantClass::LargeDeletion);
        assert_eq!(VariantClass::from_type_str("large_deletion"), VariantClass::LargeDeletion);
        assert_eq!(VariantClass::from_type_str("frameshift&stop_gained"), VariantClass::Frameshift);
        assert_eq!(VariantClass::from_type_str("missense&splice_region"), VariantClass::Other);
        assert_eq!(VariantClass::from_type_str("synonymous"), VariantClass::Other);
        assert_eq!(VariantClass::LargeDeletion.to_string(), "large_deletion");
    }

    #[test]
    fn test_deserialize_results() {
        let json = r#"{
            "id": "ERR001",
            "dr_variants": [
                {"locus_tag": "Rv1908c", "change": "p.Ser315Thr", "type": "missense", "drug": "isoniazid", "freq": 1.0}
            ],
            "other_variants": [
                {"locus_tag": "Rv0667", "change": "p.Glu761Asp", "type": "missense"},
                {"locus_tag": "Rv2043c", "change": "c.-11A>G", "type": "upstream_gene_variant", "drug": null}
            ]
        }"#;
        let results: SampleResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.dr_variants.len(), 1);
        assert_eq!(results.other_variants.len(), 2);
        assert_eq!(results.all_variants().count(), 3);
        assert_eq!(
            results.dr_variants[0],
            VariantRecord::new("Rv1908c", "p.Ser315Thr", "missense", Some("isoniazid"))
        );
        assert_eq!(results.other_variants[0].drug, None);
        assert_eq!(results.other_variants[1].variant_class(), VariantClass::Other);
    }

    #[test]
    fn test_missing_category() {
        let json = r#"{"dr_variants": []}"#;
        assert!(serde_json::from_str::<SampleResults>(json).is_err());
    }
}
