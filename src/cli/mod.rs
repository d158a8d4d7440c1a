
/// the main CLI module
pub mod core;
/// The compare CLI subcommand for scoring catalog changes
pub mod compare;
