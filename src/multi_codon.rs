
use log::{debug, warn};
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeSet;

use crate::data_types::mutation_key::MutationKey;

/// The set of `any_missense_codon_<N>` markers introduced by a catalog change.
/// Maps (locus tag, codon) to the lower-cased drugs that the marker is active for.
#[derive(Clone, Debug, Default)]
pub struct MultiChangeCodons {
    codons: HashMap<(String, u32), BTreeSet<String>>
}

impl MultiChangeCodons {
    /// Collects every codon marker from the added catalog entries.
    /// This must be constructed before the variant index is built, since the builder consults it for missense calls.
    /// # Arguments
    /// * `added` - the catalog entries present only in the candidate catalog
    ///
    /// Markers whose suffix is not a codon number are skipped with a warning; they are never observed and score as indeterminate.
    pub fn from_added(added: &[MutationKey]) -> MultiChangeCodons {
        let mut ret = MultiChangeCodons::default();
        for key in added.iter() {
            if let Some(codon_str) = key.codon_marker() {
                let codon: u32 = match codon_str.parse() {
                    Ok(c) => c,
                    Err(_) => {
                        warn!("Ignoring multi-change codon marker without a codon number: {key}");
                        continue;
                    }
                };
                debug!("Multi-change codon {} {codon} for {}", key.locus_tag(), key.drug());
                ret.codons.entry((key.locus_tag().to_string(), codon))
                    .or_default()
                    .insert(key.drug().to_lowercase());
            }
        }
        ret
    }

    /// Returns true if there is an aggregate marker for this codon and drug; the drug comparison is case-insensitive
    pub fn is_active(&self, locus_tag: &str, codon: u32, drug: &str) -> bool {
        match self.codons.get(&(locus_tag.to_string(), codon)) {
            Some(drugs) => drugs.contains(&drug.to_lowercase()),
            None => false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_added() {
        let added = vec![
            MutationKey::new("Isoniazid", "Rv1908c", "any_missense_codon_315"),
            MutationKey::new("Ethionamide", "Rv1908c", "any_missense_codon_315"),
            MutationKey::new("Rifampicin", "Rv0667", "p.Ser450Leu"),
            MutationKey::new("Rifampicin", "Rv0667", "any_missense_codon_445")
        ];
        let codons = MultiChangeCodons::from_added(&added);
        assert_eq!(codons.len(), 2);
        assert!(codons.is_active("Rv1908c", 315, "isoniazid"));
        assert!(codons.is_active("Rv1908c", 315, "ISONIAZID"));
        assert!(codons.is_active("Rv1908c", 315, "ethionamide"));
        assert!(codons.is_active("Rv0667", 445, "rifampicin"));
        assert!(!codons.is_active("Rv1908c", 315, "rifampicin"));
        assert!(!codons.is_active("Rv1908c", 316, "isoniazid"));
        assert!(!codons.is_active("Rv0667", 450, "rifampicin"));
    }

    #[test]
    fn test_no_markers() {
        let added = vec![MutationKey::new("Isoniazid", "Rv1908c", "p.Ser315Thr")];
        let codons = MultiChangeCodons::from_added(&added);
        assert!(codons.is_empty());
        assert!(!codons.is_active("Rv1908c", 315, "isoniazid"));
    }

    #[test]
    fn test_bad_marker() {
        let added = vec![
            MutationKey::new("Isoniazid", "Rv1908c", "any_missense_codon_x"),
            MutationKey::new("Rifampicin", "Rv0667", "any_missense_codon_445")
        ];
        let codons = MultiChangeCodons::from_added(&added);
        assert_eq!(codons.len(), 1);
        assert!(codons.is_active("Rv0667", 445, "rifampicin"));
        assert!(!codons.is_active("Rv1908c", 315, "isoniazid"));
    }
}
