use std::process;
use std::str::FromStr;

use clap::Parser as _;
use env_logger::Env;
use log::{LevelFilter, debug, error, info};
use ontosheet_cli::{Args, error_adapter, run};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level `{}`; defaulting to `warn`", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting ontosheet");
    debug!(args:?; "Parsed command-line arguments");

    if let Err(e) = run(&args) {
        let handler = miette::GraphicalReportHandler::new();
        for reportable in error_adapter::to_reportables(&e) {
            let mut rendered = String::new();
            if handler.render_report(&mut rendered, reportable.as_ref()).is_ok() {
                error!("{rendered}");
            } else {
                error!("{e}");
            }
        }
        process::exit(1);
    }

    info!("Finished successfully");
}
