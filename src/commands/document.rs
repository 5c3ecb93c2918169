// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{io::Write, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{
    api::ScopeField,
    controller::DocumentController,
    document::{self, Format},
    error::Result,
    inventory::Inventory,
};

use super::flags::Flags;

const DUMP_SCOPE: [ScopeField; 3] = [ScopeField::Zone, ScopeField::Cluster, ScopeField::Host];

pub fn dump_command() -> Command {
    let mut cmd = Command::new("dump").about("Print the inventory as one document");
    for field in DUMP_SCOPE {
        cmd = cmd.arg(
            Arg::new(field.flag())
                .long(field.flag())
                .help(match field {
                    ScopeField::Zone => {
                        "Only include this zone; STACK_ZONE and the config zone are not applied"
                            .to_string()
                    }
                    _ => format!("Only include this {field}"),
                }),
        );
    }
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of YAML"),
    )
}

pub fn load_command() -> Command {
    Command::new("load")
        .visible_alias("ld")
        .about("Create everything described by a JSON or YAML document")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

/// The default zone does not apply here: a plain `dump` covers every zone.
pub fn dump<S: Inventory + ?Sized>(
    service: &S,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<()> {
    let flags = Flags::new(matches);
    let scope = flags.scope(&DUMP_SCOPE, None);
    let doc = DocumentController::new(service).dump(&scope)?;

    let format = if flags.switch("json") {
        Format::Json
    } else {
        Format::Yaml
    };
    let text = document::encode(format, &doc)?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

pub fn load<S: Inventory + ?Sized>(service: &S, matches: &ArgMatches) -> Result<()> {
    let path = Flags::new(matches)
        .explicit::<PathBuf>("file")
        .unwrap_or_default();
    DocumentController::new(service).load(&path)
}
