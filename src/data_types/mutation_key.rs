
use serde::Serialize;

/// Synthetic change that aggregates any large deletion call in a gene
pub const LARGE_DELETION: &str = "large_deletion";
/// Synthetic change that aggregates any frameshift call in a gene
pub const FRAMESHIFT: &str = "frameshift";
/// Prefix for the "any missense change at codon N" catalog markers
pub const ANY_MISSENSE_CODON_PREFIX: &str = "any_missense_codon_";

/// Uniquely identifies one catalog entry
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct MutationKey {
    /// Drug name as written in the catalog
    drug: String,
    /// Locus tag of the gene, translated from the catalog gene name
    locus_tag: String,
    /// Change descriptor, e.g. "p.Ser315Thr" or one of the synthetic markers
    mutation: String
}

impl MutationKey {
    pub fn new(drug: &str, locus_tag: &str, mutation: &str) -> MutationKey {
        MutationKey {
            drug: drug.to_string(),
            locus_tag: locus_tag.to_string(),
            mutation: mutation.to_string()
        }
    }

    /// If this is an `any_missense_codon_<N>` marker, this returns the raw "<N>" suffix
    pub fn codon_marker(&self) -> Option<&str> {
        self.mutation.strip_prefix(ANY_MISSENSE_CODON_PREFIX)
    }

    pub fn drug(&self) -> &str {
        &self.drug
    }

    pub fn locus_tag(&self) -> &str {
        &self.locus_tag
    }

    pub fn mutation(&self) -> &str {
        &self.mutation
    }
}

impl std::fmt::Display for MutationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.drug, self.locus_tag, self.mutation)
    }
}

/// Builds the synthetic change name for a multi-change codon
pub fn any_missense_codon(codon: u32) -> String {
    format!("{ANY_MISSENSE_CODON_PREFIX}{codon}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codon_marker() {
        let key = MutationKey::new("isoniazid", "Rv1908c", "any_missense_codon_315");
        assert_eq!(key.codon_marker(), Some("315"));
        assert_eq!(any_missense_codon(315), "any_missense_codon_315");

        let key = MutationKey::new("isoniazid", "Rv1908c", "p.Ser315Thr");
        assert_eq!(key.codon_marker(), None);
        assert_eq!(key.to_string(), "isoniazid:Rv1908c:p.Ser315Thr");
    }
}
