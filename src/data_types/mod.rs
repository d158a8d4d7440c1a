
/// Contains the association result record produced for each changed catalog entry
pub mod association;
/// Contains the confidence tier rubric
pub mod confidence;
/// Contains the Haldane-corrected 2x2 table and its effect size statistics
pub mod contingency;
/// Contains the gene name to locus tag lookup parsed from the reference BED
pub mod gene_locus;
/// Contains the (drug, locus tag, mutation) key used to compare catalogs
pub mod mutation_key;
/// Contains the per-sample phenotype (DST) table
pub mod phenotype;
/// Contains serialization for the per-sample tb-profiler result files
pub mod variant_record;
