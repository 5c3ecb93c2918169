// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod document;
pub mod flags;
pub mod resource;

use std::{io::Write, path::Path};

use clap::{Args, ArgMatches, Command};

use crate::{
    api::Kind,
    config::Config,
    error::{Error, Result},
    inventory::{HttpInventory, Inventory},
};

use resource::Verb;

/// A `HandledError` is an error that has already been reported to the operator. A function that
/// returns one needs nothing more from its caller than to pass it along.
///
/// `main()` turns a `HandledError` into a nonzero exit status.
///
/// Build one with `handle_err()`, which runs the caller's handler (normally printing to stderr)
/// and discards the original error.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Run `handler` on the error, if any, and mark it handled.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Inventory service URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Values that fill in for omitted flags.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    pub zone: Option<String>,
}

pub fn command() -> Command {
    let cmd = Command::new("stack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage zones, clusters, hosts and their attributes in the inventory")
        .subcommand_required(true)
        .arg_required_else_help(true);

    GlobalArgs::augment_args(cmd)
        .subcommands(Verb::ALL.map(resource::verb_command))
        .subcommand(document::dump_command())
        .subcommand(document::load_command())
}

/// Execute parsed command line `matches` against `service`, writing listings to `out`.
pub fn run<S: Inventory + ?Sized>(
    service: &S,
    defaults: &Defaults,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<()> {
    let Some((verb, matches)) = matches.subcommand() else {
        return Err(Error::Usage("a command is required".to_string()));
    };

    match verb {
        "dump" => return document::dump(service, matches, out),
        "load" => return document::load(service, matches),
        _ => {}
    }

    let verb = Verb::from_name(verb).ok_or_else(|| Error::Usage(format!("unknown verb {verb}")))?;
    match matches.subcommand() {
        Some(("attr", sub)) => resource::run_attr(service, defaults, verb, None, sub, out),
        Some((name, sub)) => {
            let kind =
                Kind::from_name(name).ok_or_else(|| Error::Usage(format!("unknown resource {name}")))?;
            resource::run_kind(service, defaults, verb, kind, sub, out)
        }
        None => Err(Error::Usage(format!("{} needs a resource", verb.name()))),
    }
}

pub fn main(args: &GlobalArgs, matches: &ArgMatches) -> HandledResult<()> {
    let (path, explicit) = match &args.config {
        Some(p) => (p.clone(), true),
        None => crate::default_config_path(),
    };
    let config = Config::load(Path::new(&path), explicit).handle_err(|e| eprintln!("Error: {e}"))?;

    let server = args
        .server
        .clone()
        .or_else(crate::default_server)
        .or(config.server)
        .unwrap_or_else(|| crate::FALLBACK_SERVER.to_string());
    let defaults = Defaults {
        zone: crate::zone_from_env().or(config.zone),
    };

    let service = HttpInventory::new(&server).handle_err(|e| eprintln!("Error: {e}"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&service, &defaults, matches, &mut out).handle_err(|e| eprintln!("Error: {e}"))
}
