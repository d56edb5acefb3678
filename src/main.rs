//! Command-line entry point: rules JSON in, component module out.

mod cli;

use clap::Parser;
use std::io;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::Args::parse();
    if let Err(e) = cli::run(&args, &mut io::stdout().lock()) {
        eprintln!("Error [{}]: {}", e.code(), e);
        process::exit(1);
    }
}
