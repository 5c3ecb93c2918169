// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::FromArgMatches;

use stack_lib::commands::{self, GlobalArgs};

/// The stack binary is the operator CLI for the inventory.
fn main() {
    let matches = commands::command().get_matches();
    let args = GlobalArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().filter_or("STACK_LOG", "warn"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if commands::main(&args, &matches).is_err() {
        std::process::exit(1);
    }
}
