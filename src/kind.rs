// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

//! Per-kind metadata. Every entity kind is described by one `KindSpec` entry; the controllers,
//! the CLI, the renderer and the reference service are all driven from this table.

use crate::api::{Kind, Property, ScopeField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub property: Property,
    pub value: ValueKind,
    /// Whether an explicitly supplied zero value (0, "", false) counts as provided.
    pub accept_zero: bool,
    /// Whether the property can be cleared with `unset`.
    pub clearable: bool,
}

const fn text(property: Property, clearable: bool) -> PropertySpec {
    PropertySpec {
        property,
        value: ValueKind::Text,
        accept_zero: false,
        clearable,
    }
}

const fn number(property: Property) -> PropertySpec {
    PropertySpec {
        property,
        value: ValueKind::Number,
        accept_zero: true,
        clearable: true,
    }
}

#[derive(Debug)]
pub struct KindSpec {
    pub kind: Kind,
    /// The scope field that names an instance of this kind when it is a parent.
    pub field: ScopeField,
    /// Scope fields required to identify an instance, outermost first.
    pub parents: &'static [ScopeField],
    /// Scope fields that may further place an instance but do not identify it.
    pub optional_parents: &'static [ScopeField],
    pub properties: &'static [PropertySpec],
    /// Properties that must be provided (or cleared) together.
    pub paired: &'static [(Property, Property)],
    /// A scope field that must be present whenever a list uses a glob.
    pub glob_requires: Option<ScopeField>,
}

impl KindSpec {
    /// All scope fields that locate an instance of this kind.
    pub fn scope_fields(&self) -> Vec<ScopeField> {
        self.parents
            .iter()
            .chain(self.optional_parents)
            .copied()
            .collect()
    }

    /// Required scope fields for addressing this kind's attributes.
    pub fn attr_parents(&self) -> Vec<ScopeField> {
        let mut fields = self.parents.to_vec();
        fields.push(self.field);
        fields
    }

    /// All scope fields that locate this kind's attributes.
    pub fn attr_scope_fields(&self) -> Vec<ScopeField> {
        let mut fields = self.scope_fields();
        fields.push(self.field);
        fields
    }

    pub fn property(&self, property: Property) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.property == property)
    }

    pub fn clearable(&self) -> impl Iterator<Item = &PropertySpec> {
        self.properties.iter().filter(|p| p.clearable)
    }

    pub fn has_clearable(&self) -> bool {
        self.clearable().next().is_some()
    }
}

const RENAME: PropertySpec = text(Property::Name, false);

static ZONE: KindSpec = KindSpec {
    kind: Kind::Zone,
    field: ScopeField::Zone,
    parents: &[],
    optional_parents: &[],
    properties: &[RENAME, text(Property::TimeZone, true)],
    paired: &[],
    glob_requires: None,
};

static CLUSTER: KindSpec = KindSpec {
    kind: Kind::Cluster,
    field: ScopeField::Cluster,
    parents: &[ScopeField::Zone],
    optional_parents: &[],
    properties: &[RENAME],
    paired: &[],
    glob_requires: Some(ScopeField::Zone),
};

static RACK: KindSpec = KindSpec {
    kind: Kind::Rack,
    field: ScopeField::Rack,
    parents: &[ScopeField::Zone],
    optional_parents: &[],
    properties: &[RENAME],
    paired: &[],
    glob_requires: None,
};

static APPLIANCE: KindSpec = KindSpec {
    kind: Kind::Appliance,
    field: ScopeField::Appliance,
    parents: &[ScopeField::Zone],
    optional_parents: &[],
    properties: &[RENAME],
    paired: &[],
    glob_requires: None,
};

static ENVIRONMENT: KindSpec = KindSpec {
    kind: Kind::Environment,
    field: ScopeField::Environment,
    parents: &[ScopeField::Zone],
    optional_parents: &[],
    properties: &[RENAME],
    paired: &[],
    glob_requires: None,
};

static MODEL: KindSpec = KindSpec {
    kind: Kind::Model,
    field: ScopeField::Model,
    parents: &[ScopeField::Make],
    optional_parents: &[],
    properties: &[RENAME, text(Property::Arch, true)],
    paired: &[],
    glob_requires: None,
};

static HOST: KindSpec = KindSpec {
    kind: Kind::Host,
    field: ScopeField::Host,
    parents: &[ScopeField::Zone],
    optional_parents: &[ScopeField::Cluster],
    properties: &[
        RENAME,
        text(Property::Make, true),
        text(Property::Model, true),
        text(Property::Environment, true),
        text(Property::Appliance, true),
        text(Property::Location, true),
        text(Property::Rack, true),
        number(Property::Rank),
        number(Property::Slot),
        text(Property::Type, true),
    ],
    paired: &[(Property::Make, Property::Model)],
    glob_requires: None,
};

/// Attribute properties, shared by every parent kind and by global attributes.
pub static ATTR_PROPERTIES: &[PropertySpec] = &[
    RENAME,
    text(Property::Value, false),
    PropertySpec {
        property: Property::Protected,
        value: ValueKind::Flag,
        accept_zero: true,
        clearable: false,
    },
];

impl Kind {
    pub fn spec(self) -> &'static KindSpec {
        match self {
            Kind::Zone => &ZONE,
            Kind::Cluster => &CLUSTER,
            Kind::Rack => &RACK,
            Kind::Host => &HOST,
            Kind::Model => &MODEL,
            Kind::Appliance => &APPLIANCE,
            Kind::Environment => &ENVIRONMENT,
        }
    }

    /// The kind whose instances are named by `field`.
    pub fn from_field(field: ScopeField) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.spec().field == field)
    }
}
