//! pv-sizer entry point: settings, logging and a single sizing run.

use std::process;

use pv_sizer::cli::parse_args;
use pv_sizer::config::RunSettings;
use pv_sizer::reporting::print_sizing_report;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            pv_sizer::cli::print_usage();
            process::exit(1);
        }
    };

    // --settings takes priority, then built-in defaults
    let settings = if let Some(ref path) = cli.settings {
        match RunSettings::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        RunSettings::default()
    };

    let errors = settings.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    match pv_sizer::run(&settings) {
        Ok(run) => print_sizing_report(&run),
        Err(e) => {
            error!("Sizing failed: {e}");
            process::exit(1);
        }
    }
}
