/// Contains all the CLI related functionality
pub mod cli;
/// Contains any specialized data types that are shared across the tooling
pub mod data_types;
/// Contains functionality for retrieving the reference result archive
pub mod download;
/// Contains the error types that abort a comparison
pub mod errors;
/// Contains the detection of "any missense at codon N" catalog markers
pub mod multi_codon;
/// Contains catalog loading and the master/pull request comparison
pub mod mutation_diff;
/// Contains the end-to-end comparison entry point and its configuration
pub mod pipeline;
/// Contains the markdown, CSV, and GitHub outputs
pub mod report;
/// Contains the contingency table construction and scoring of changed mutations
pub mod scorer;
/// Contains generic utilities that are handy wrappers
pub mod util;
/// Contains the per-gene index of which samples carry which changes
pub mod variant_index;
