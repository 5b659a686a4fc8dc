//! recap command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use recap::cli::Cli;
use recap::run_recap;

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = cli.into_config().and_then(|config| {
        info!(
            "Caller: {}, delimiter: {}, header lines: {}, p-value column: {}",
            config.caller, config.delimiter, config.header_lines, config.pvalue_column
        );
        run_recap(&config)
    });

    match result {
        Ok(summary) => println!("\n{}", summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
