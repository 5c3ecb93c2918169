// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! The whole-inventory document used by dump and load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    api::{HostType, Identity, Kind, Property, Resource, Scope, ScopeField, UpdateRequest, Value},
    error::{Error, Result},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<Model>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Zone>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Attribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub protected: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Model {
    pub make: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appliances: Vec<Named>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<Named>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub racks: Vec<Named>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<Cluster>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<Host>,
}

/// An appliance, environment or rack: a name plus attributes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Named {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Cluster {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<Host>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Host {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HostType>,
}

impl Host {
    /// The host's properties as they appear in an update request.
    pub fn properties(&self) -> Vec<(Property, Value)> {
        let text = [
            (Property::Appliance, &self.appliance),
            (Property::Environment, &self.environment),
            (Property::Make, &self.make),
            (Property::Model, &self.model),
            (Property::Location, &self.location),
            (Property::Rack, &self.rack),
        ];
        let numbers = [(Property::Rank, self.rank), (Property::Slot, self.slot)];

        text.into_iter()
            .filter_map(|(p, v)| v.clone().map(|v| (p, Value::Text(v))))
            .chain(
                numbers
                    .into_iter()
                    .filter_map(|(p, v)| v.map(|v| (p, Value::Number(v)))),
            )
            .chain(self.kind.map(|t| (Property::Type, Value::Text(t.to_string()))))
            .collect()
    }
}

/// One create-then-update step produced when a document is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub create: Identity,
    pub update: UpdateRequest,
}

impl Step {
    fn new(resource: Resource, scope: Scope, name: &str, set: Vec<(Property, Value)>) -> Self {
        let identity = Identity {
            resource,
            scope,
            name: name.to_string(),
        };
        Step {
            update: UpdateRequest {
                identity: identity.clone(),
                set: set.into_iter().collect(),
                unset: Default::default(),
            },
            create: identity,
        }
    }
}

fn attr_steps(parent: Option<Kind>, scope: &Scope, attrs: &[Attribute]) -> Vec<Step> {
    attrs
        .iter()
        .map(|a| {
            Step::new(
                Resource::Attr(parent),
                scope.clone(),
                &a.key,
                vec![
                    (Property::Value, Value::Text(a.value.clone())),
                    (Property::Protected, Value::Flag(a.protected)),
                ],
            )
        })
        .collect()
}

fn host_steps(scope: &Scope, hosts: &[Host]) -> Vec<Step> {
    let mut steps = Vec::new();
    for host in hosts {
        steps.push(Step::new(
            Resource::Entity(Kind::Host),
            scope.clone(),
            &host.name,
            host.properties(),
        ));
        let attr_scope = scope.clone().with(ScopeField::Host, &host.name);
        steps.extend(attr_steps(Some(Kind::Host), &attr_scope, &host.attributes));
    }
    steps
}

impl Document {
    /// Flatten the document into create-then-update steps, parents before children and
    /// referenced entities before the hosts that reference them.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = attr_steps(None, &Scope::default(), &self.attributes);

        for model in &self.models {
            let scope = Scope::default().with(ScopeField::Make, &model.make);
            let set = model
                .arch
                .iter()
                .map(|a| (Property::Arch, Value::Text(a.clone())))
                .collect();
            steps.push(Step::new(
                Resource::Entity(Kind::Model),
                scope.clone(),
                &model.name,
                set,
            ));
            let attr_scope = scope.with(ScopeField::Model, &model.name);
            steps.extend(attr_steps(Some(Kind::Model), &attr_scope, &model.attributes));
        }

        for zone in &self.zones {
            let set = zone
                .time_zone
                .iter()
                .map(|t| (Property::TimeZone, Value::Text(t.clone())))
                .collect();
            steps.push(Step::new(
                Resource::Entity(Kind::Zone),
                Scope::default(),
                &zone.name,
                set,
            ));
            let scope = Scope::default().with(ScopeField::Zone, &zone.name);
            steps.extend(attr_steps(Some(Kind::Zone), &scope, &zone.attributes));

            let named = [
                (Kind::Appliance, &zone.appliances),
                (Kind::Environment, &zone.environments),
                (Kind::Rack, &zone.racks),
            ];
            for (kind, entries) in named {
                for entry in entries {
                    steps.push(Step::new(
                        Resource::Entity(kind),
                        scope.clone(),
                        &entry.name,
                        vec![],
                    ));
                    let attr_scope = scope.clone().with(kind.spec().field, &entry.name);
                    steps.extend(attr_steps(Some(kind), &attr_scope, &entry.attributes));
                }
            }

            for cluster in &zone.clusters {
                steps.push(Step::new(
                    Resource::Entity(Kind::Cluster),
                    scope.clone(),
                    &cluster.name,
                    vec![],
                ));
                let cluster_scope = scope.clone().with(ScopeField::Cluster, &cluster.name);
                steps.extend(attr_steps(
                    Some(Kind::Cluster),
                    &cluster_scope,
                    &cluster.attributes,
                ));
                steps.extend(host_steps(&cluster_scope, &cluster.hosts));
            }

            steps.extend(host_steps(&scope, &zone.hosts));
        }

        steps
    }
}

/// Serialization format of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(Error::UnknownFormat(path.display().to_string())),
        }
    }
}

pub fn decode(format: Format, data: &[u8]) -> Result<Document> {
    match format {
        Format::Json => {
            serde_json::from_slice(data).map_err(|e| Error::MalformedDocument(e.to_string()))
        }
        Format::Yaml => {
            serde_yaml_ng::from_slice(data).map_err(|e| Error::MalformedDocument(e.to_string()))
        }
    }
}

pub fn encode(format: Format, document: &Document) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(document)
            .map_err(|e| Error::MalformedDocument(e.to_string())),
        Format::Yaml => {
            serde_yaml_ng::to_string(document).map_err(|e| Error::MalformedDocument(e.to_string()))
        }
    }
}
