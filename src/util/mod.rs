
/// Generic functionality for reading serialized objects and scanning result folders
pub mod file_io;
/// Contains generic statistical functions
pub mod stats;
