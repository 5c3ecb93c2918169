// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The verb × resource command matrix, generated from the kind metadata.

use std::io::Write;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::{
    api::{Kind, Property, Resource, ScopeField},
    controller::{AttributeController, ResourceController},
    error::{Error, Result},
    inventory::{Inventory, ListStream},
    kind::{PropertySpec, ValueKind, ATTR_PROPERTIES},
    render::{self, ItemWriter, JsonWriter, TableWriter},
};

use super::{flags::Flags, Defaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Add,
    Set,
    Unset,
    List,
    Remove,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Add, Verb::Set, Verb::Unset, Verb::List, Verb::Remove];

    pub fn name(self) -> &'static str {
        match self {
            Verb::Add => "add",
            Verb::Set => "set",
            Verb::Unset => "unset",
            Verb::List => "list",
            Verb::Remove => "remove",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Verb::Add => &["create"],
            Verb::Set => &["update"],
            Verb::Unset => &[],
            Verb::List => &["ls"],
            Verb::Remove => &["rm", "del"],
        }
    }

    fn about(self) -> &'static str {
        match self {
            Verb::Add => "Create a resource and set its properties",
            Verb::Set => "Change properties of an existing resource",
            Verb::Unset => "Clear properties of an existing resource",
            Verb::List => "List resources matching a glob",
            Verb::Remove => "Remove resources matching a glob",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

fn scope_arg(field: ScopeField) -> Arg {
    Arg::new(field.flag())
        .long(field.flag())
        .value_name(field.flag().to_uppercase())
        .help(format!("{} name", field.flag()))
}

fn property_arg(spec: &PropertySpec) -> Arg {
    let flag = spec.property.flag();
    let arg = Arg::new(flag).long(flag).value_name(flag.to_uppercase());
    match spec.value {
        ValueKind::Text => arg,
        ValueKind::Number => arg.value_parser(value_parser!(u32)),
        ValueKind::Flag => arg.value_parser(value_parser!(bool)),
    }
}

fn property_help(property: Property) -> &'static str {
    match property {
        Property::Name => "Rename to this name",
        Property::TimeZone => "Time zone",
        Property::Arch => "CPU architecture",
        Property::Make => "Hardware make (requires --model)",
        Property::Model => "Hardware model (requires --make)",
        Property::Environment => "Environment the host belongs to",
        Property::Appliance => "Appliance the host belongs to",
        Property::Location => "Physical location",
        Property::Rack => "Rack the host is mounted in",
        Property::Rank => "Position of the host within its rack",
        Property::Slot => "Slot within the chassis",
        Property::Type => "Host type: metal, virtual or container",
        Property::Value => "Attribute value",
        Property::Protected => "Protect the attribute from removal",
    }
}

fn list_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("glob").value_name("GLOB").help("Names to list; all when omitted"))
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Stream one JSON object per line instead of buffering a table"),
        )
}

fn remove_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("glob")
            .value_name("GLOB")
            .required(true)
            .help("Names to remove"),
    )
}

fn target_arg() -> Arg {
    Arg::new("target").value_name("NAME").required(true)
}

fn kind_command(verb: Verb, kind: Kind) -> Command {
    let spec = kind.spec();
    let mut cmd = Command::new(kind.name()).about(format!("{} {}s", verb.name(), kind.name()));

    for field in spec.scope_fields() {
        cmd = cmd.arg(scope_arg(field));
    }

    cmd = match verb {
        Verb::Add | Verb::Set => {
            let props = spec
                .properties
                .iter()
                .filter(|p| verb == Verb::Set || p.property != Property::Name);
            cmd.arg(target_arg()).args(
                props.map(|p| property_arg(p).help(property_help(p.property))),
            )
        }
        Verb::Unset => cmd.arg(target_arg()).args(spec.clearable().map(|p| {
            Arg::new(p.property.flag())
                .long(p.property.flag())
                .action(ArgAction::SetTrue)
                .help(format!("Clear {}", p.property))
        })),
        Verb::List => list_args(cmd),
        Verb::Remove => remove_args(cmd),
    };

    if verb == Verb::Unset {
        return cmd;
    }

    cmd.args_conflicts_with_subcommands(true)
        .subcommand_negates_reqs(true)
        .subcommand(attr_command(verb, Some(kind)))
}

fn attr_command(verb: Verb, parent: Option<Kind>) -> Command {
    let about = match parent {
        Some(kind) => format!("{} attributes of a {kind}", verb.name()),
        None => format!("{} global attributes", verb.name()),
    };
    let mut cmd = Command::new("attr").about(about);

    if let Some(kind) = parent {
        for field in kind.spec().attr_scope_fields() {
            cmd = cmd.arg(scope_arg(field));
        }
    }

    let key = Arg::new("key").value_name("KEY").required(true);
    let value = Arg::new("value").value_name("VALUE").help("Attribute value");

    match verb {
        Verb::Add => cmd.arg(key).arg(value.required(parent.is_some())).arg(
            Arg::new("protected")
                .long("protected")
                .action(ArgAction::SetTrue)
                .help("Protect the attribute from removal"),
        ),
        Verb::Set => cmd.arg(key).arg(value).args(
            ATTR_PROPERTIES
                .iter()
                .filter(|p| p.property != Property::Value)
                .map(|p| property_arg(p).help(property_help(p.property))),
        ),
        Verb::List => list_args(cmd),
        Verb::Remove | Verb::Unset => remove_args(cmd),
    }
}

pub fn verb_command(verb: Verb) -> Command {
    let mut cmd = Command::new(verb.name())
        .about(verb.about())
        .visible_aliases(verb.aliases())
        .subcommand_required(true);

    for kind in Kind::ALL {
        if verb == Verb::Unset && !kind.spec().has_clearable() {
            continue;
        }
        cmd = cmd.subcommand(kind_command(verb, kind));
    }

    if verb != Verb::Unset {
        cmd = cmd.subcommand(attr_command(verb, None));
    }
    cmd
}

fn write_list(
    items: ListStream,
    resource: Resource,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let step = format!("list {resource}s");
    let mut writer: Box<dyn ItemWriter + '_> = if json {
        Box::new(JsonWriter::new(out))
    } else {
        Box::new(TableWriter::new(out, resource))
    };
    render::render(items, writer.as_mut(), &step).map(|_| ())
}

pub fn run_kind<S: Inventory + ?Sized>(
    service: &S,
    defaults: &Defaults,
    verb: Verb,
    kind: Kind,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(("attr", sub)) = matches.subcommand() {
        return run_attr(service, defaults, verb, Some(kind), sub, out);
    }

    let flags = Flags::new(matches);
    let spec = kind.spec();
    let scope = flags.scope(&spec.scope_fields(), defaults.zone.as_deref());
    let controller = ResourceController::new(service, kind, scope);
    let target = flags.string("target").unwrap_or_default();
    let glob = flags.string("glob").unwrap_or_default();

    match verb {
        Verb::Add => controller.add(&target, &flags.properties(spec.properties)),
        Verb::Set => controller.set(&target, &flags.properties(spec.properties)),
        Verb::Unset => controller.unset(&target, &flags.clears(spec.properties)),
        Verb::List => write_list(
            controller.list(&glob)?,
            Resource::Entity(kind),
            flags.switch("json"),
            out,
        ),
        Verb::Remove => controller.remove(&glob),
    }
}

pub fn run_attr<S: Inventory + ?Sized>(
    service: &S,
    defaults: &Defaults,
    verb: Verb,
    parent: Option<Kind>,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<()> {
    let flags = Flags::new(matches);
    let fields = parent
        .map(|k| k.spec().attr_scope_fields())
        .unwrap_or_default();
    let scope = flags.scope(&fields, defaults.zone.as_deref());
    let controller = AttributeController::new(service, parent, scope);
    let key = flags.string("key").unwrap_or_default();
    let glob = flags.string("glob").unwrap_or_default();

    match verb {
        Verb::Add => controller.add(
            &key,
            &flags.string("value").unwrap_or_default(),
            flags.switch("protected"),
        ),
        Verb::Set => controller.set(&key, &flags.properties(ATTR_PROPERTIES)),
        Verb::List => write_list(
            controller.list(&glob)?,
            Resource::Attr(parent),
            flags.switch("json"),
            out,
        ),
        Verb::Remove => controller.remove(&glob),
        Verb::Unset => Err(Error::Usage("attributes cannot be unset".to_string())),
    }
}
