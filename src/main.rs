use log::{LevelFilter, error, info};

use tbdb_confidence::cli::compare::{CompareSettings, check_compare_settings};
use tbdb_confidence::cli::core::{Commands, get_cli};
use tbdb_confidence::errors::ConfidenceError;
use tbdb_confidence::pipeline::{CompareConfig, CompareOutcome};
use tbdb_confidence::report::{GithubTarget, post_github_comment};

/// This will run the "compare" mode of the tool
/// # Arguments
/// * `settings` - the CompareSettings object
fn run_compare(settings: CompareSettings) {
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    // immediately setup logging first
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    // okay, now we can check all the other settings
    let cli_settings: CompareSettings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };
    let config: CompareConfig = cli_settings.to_config();

    // make sure we can post before doing all the work
    let github_target: Option<GithubTarget> = if config.github {
        match GithubTarget::from_env(&config.github_repo) {
            Ok(t) => Some(t),
            Err(e) => {
                error!("Error while reading GitHub environment: {e}");
                std::process::exit(exitcode::CONFIG);
            }
        }
    } else {
        None
    };

    let report = match tbdb_confidence::pipeline::run_compare(&config) {
        Ok(CompareOutcome::NoChanges) => {
            info!("Process finished successfully.");
            std::process::exit(exitcode::OK);
        },
        Ok(CompareOutcome::Scored(r)) => r,
        Err(e) => {
            error!("Error while comparing catalogs: {e}");
            // data consistency problems are distinct from I/O failures
            let code = if e.downcast_ref::<ConfidenceError>().is_some() { exitcode::DATAERR } else { exitcode::IOERR };
            std::process::exit(code);
        }
    };

    let body: String = report.render();
    println!("{body}");

    if let Some(target) = github_target.as_ref() {
        if let Err(e) = post_github_comment(&body, target) {
            error!("Error while posting results to GitHub: {e}");
            std::process::exit(exitcode::UNAVAILABLE);
        }
    }
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        }
    }

    info!("Process finished successfully.");
}
