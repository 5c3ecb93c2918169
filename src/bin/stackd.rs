// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use stack_lib::daemon::{self, Cli};

/// The stackd binary serves an in-memory inventory over HTTP.
fn main() {
    let args = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().filter_or("STACK_LOG", "warn"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if daemon::main(&args).is_err() {
        std::process::exit(1);
    }
}
