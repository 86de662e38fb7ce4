use clap::Parser;
use fixedwidth_relay::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_stats) => {
            // Skipped files and records were already logged; the run itself succeeded
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}
