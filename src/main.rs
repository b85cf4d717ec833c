mod checks;
mod cli;
mod colour;
mod error;
mod file_operations;
mod path_utils;
mod program;
mod progress_bar;

use std::process::exit;

use clap::Parser;
use cli::Cli;
use error::Error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = program::run(cli) {
        match &e {
            Error::Check(failure) => {
                log::debug!("check failed at {:?}", failure.path());
                println!("{}", colour::paint(colour::FAIL, failure));
            }
            Error::Copy(failure) => {
                log::debug!("copy aborted: {:?}", failure);
                eprintln!("{}", colour::paint(colour::FAIL, failure));
            }
        }

        exit(e.exit_code());
    }
}
