// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use stack_lib::{
        api::{Item, Kind, Property, Scope, ScopeField, Value},
        controller::{AttributeController, ResourceController},
        document::{self, Format},
        error::Error,
        field::{Clears, Field, Properties, UnsetField},
        inventory::{Code, Inventory, MemoryInventory},
        test_env::{Call, RecordingInventory},
    };

    fn seeded() -> RecordingInventory<MemoryInventory> {
        let inventory = MemoryInventory::new();
        let doc = document::decode(Format::Yaml, include_bytes!("seed.yaml")).unwrap();
        inventory.create_schema(&doc).unwrap();
        RecordingInventory::new(inventory)
    }

    fn zone(name: &str) -> Scope {
        Scope::default().with(ScopeField::Zone, name)
    }

    fn text(property: Property, value: &str) -> Field<String> {
        Field::given(property, value.to_string())
    }

    fn items<S: Inventory>(controller: &ResourceController<'_, S>, glob: &str) -> Vec<Item> {
        controller
            .list(glob)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn remote_code(err: Error) -> Code {
        match err {
            Error::Remote { source, .. } | Error::PartialAdd { source, .. } => source.code,
            other => panic!("expected a remote error, got {other:?}"),
        }
    }

    #[test]
    fn make_without_model_fails_before_any_call() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let err = hosts
            .set("web01", &Properties::new().with(text(Property::Make, "dell")))
            .unwrap_err();

        assert!(matches!(err, Error::Unpaired(Property::Make, Property::Model)));
        assert!(err.is_validation());
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn make_and_model_together_are_sent() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let props = Properties::new()
            .with(text(Property::Make, "dell"))
            .with(text(Property::Model, "r740"));
        hosts.set("spare01", &props).unwrap();

        let Some(Call::Update(request)) = inv.calls().pop() else {
            panic!("expected an update");
        };
        let keys: Vec<_> = request.set.keys().copied().collect();
        assert_eq!(keys, vec![Property::Make, Property::Model]);

        let spare = items(&hosts, "spare01").remove(0);
        assert_eq!(spare.property(Property::Model), Some(&Value::from("r740")));
    }

    #[test]
    fn host_type_is_checked_locally() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let err = hosts
            .set("web01", &Properties::new().with(text(Property::Type, "bogus")))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHostType(_)));
        assert!(inv.calls().is_empty());

        hosts
            .set("web01", &Properties::new().with(text(Property::Type, "virtual")))
            .unwrap();
        assert_eq!(inv.calls().len(), 1);
    }

    #[test]
    fn cluster_glob_needs_zone() {
        let inv = seeded();

        let err = ResourceController::new(&inv, Kind::Cluster, Scope::default())
            .list("web-*")
            .unwrap_err();
        assert!(matches!(err, Error::GlobRequiresScope(ScopeField::Zone)));
        assert!(inv.calls().is_empty());

        let clusters = ResourceController::new(&inv, Kind::Cluster, zone("dc1"));
        assert!(items(&clusters, "web-*").is_empty());
        assert_eq!(items(&clusters, "p*").len(), 1);
    }

    #[test]
    fn missing_zone_fails_fast() {
        let inv = seeded();
        let clusters = ResourceController::new(&inv, Kind::Cluster, Scope::default());

        let err = clusters.add("batch", &Properties::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingScope {
                field: ScopeField::Zone,
                ..
            }
        ));

        let err = clusters.remove("prod").unwrap_err();
        assert!(matches!(err, Error::MissingScope { .. }));
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn empty_set_changes_nothing() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let before = items(&hosts, "");
        hosts.set("web01", &Properties::new()).unwrap();
        assert_eq!(items(&hosts, ""), before);
    }

    #[test]
    fn set_on_missing_entity_is_not_found() {
        let inv = seeded();
        let racks = ResourceController::new(&inv, Kind::Rack, zone("dc1"));

        let err = racks
            .set("r9", &Properties::new().with(text(Property::Name, "r10")))
            .unwrap_err();
        assert_eq!(remote_code(err), Code::NotFound);
    }

    #[test]
    fn failed_update_leaves_entity_created() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let props = Properties::new()
            .with(text(Property::Appliance, "missing"))
            .with(Field::from_flag(Property::Slot, Some(0u32), true));
        let err = hosts.add("web02", &props).unwrap_err();

        assert!(matches!(err, Error::PartialAdd { .. }));
        assert_eq!(remote_code(err), Code::NotFound);

        let created = items(&hosts, "web02");
        assert_eq!(created.len(), 1);
        assert!(created[0].properties.is_empty());
    }

    #[test]
    fn add_then_list_keeps_zero_rank() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1").with(ScopeField::Cluster, "prod"));

        let props = Properties::new()
            .with(Field::from_flag(Property::Rank, Some(0u32), true))
            .with(text(Property::Environment, "staging"));
        hosts.add("web02", &props).unwrap();

        let web02 = items(&hosts, "web02").remove(0);
        assert_eq!(web02.property(Property::Rank), Some(&Value::Number(0)));
        assert_eq!(web02.scope.cluster.as_deref(), Some("prod"));
    }

    #[test]
    fn unset_clears_the_whole_pair() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));

        let clears = Clears::new().with(UnsetField::new(Property::Model, true));
        hosts.unset("web01", &clears).unwrap();

        let Some(Call::Update(request)) = inv.calls().pop() else {
            panic!("expected an update");
        };
        assert!(request.set.is_empty());
        assert_eq!(
            request.unset,
            BTreeSet::from([Property::Make, Property::Model])
        );

        let web01 = items(&hosts, "web01").remove(0);
        assert_eq!(web01.property(Property::Make), None);
        assert_eq!(web01.property(Property::Rank), Some(&Value::Number(0)));
    }

    #[test]
    fn removing_nothing_succeeds() {
        let inv = seeded();
        let racks = ResourceController::new(&inv, Kind::Rack, zone("dc1"));

        racks.remove("nothing-*").unwrap();
        assert_eq!(items(&racks, "").len(), 1);
    }

    #[test]
    fn zone_rename_moves_children() {
        let inv = seeded();
        ResourceController::new(&inv, Kind::Zone, Scope::default())
            .set("dc1", &Properties::new().with(text(Property::Name, "dc2")))
            .unwrap();

        let clusters = ResourceController::new(&inv, Kind::Cluster, zone("dc2"));
        assert_eq!(items(&clusters, "")[0].name, "prod");

        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc2"));
        assert_eq!(items(&hosts, "").len(), 2);
        assert!(items(&ResourceController::new(&inv, Kind::Host, zone("dc1")), "").is_empty());
    }

    #[test]
    fn removing_a_model_clears_host_references() {
        let inv = seeded();
        let mut make = Scope::default();
        make.set(ScopeField::Make, Some("dell".to_string()));
        ResourceController::new(&inv, Kind::Model, make)
            .remove("r7*")
            .unwrap();

        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));
        let web01 = items(&hosts, "web01").remove(0);
        assert_eq!(web01.property(Property::Make), None);
        assert_eq!(web01.property(Property::Model), None);
    }

    #[test]
    fn cluster_rename_moves_its_hosts() {
        let inv = seeded();
        ResourceController::new(&inv, Kind::Cluster, zone("dc1"))
            .set("prod", &Properties::new().with(text(Property::Name, "p2")))
            .unwrap();

        let hosts = ResourceController::new(
            &inv,
            Kind::Host,
            zone("dc1").with(ScopeField::Cluster, "p2"),
        );
        let web01 = items(&hosts, "").remove(0);
        assert_eq!(web01.name, "web01");
        assert_eq!(web01.scope.get(ScopeField::Cluster), Some("p2"));

        let old = ResourceController::new(
            &inv,
            Kind::Host,
            zone("dc1").with(ScopeField::Cluster, "prod"),
        );
        assert!(items(&old, "").is_empty());
    }

    #[test]
    fn renaming_a_referenced_entity_updates_hosts() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));
        hosts
            .set(
                "web01",
                &Properties::new()
                    .with(text(Property::Appliance, "storage"))
                    .with(text(Property::Environment, "staging")),
            )
            .unwrap();

        for (kind, old, new) in [
            (Kind::Appliance, "storage", "nas"),
            (Kind::Environment, "staging", "qa"),
            (Kind::Rack, "r1", "r2"),
        ] {
            ResourceController::new(&inv, kind, zone("dc1"))
                .set(old, &Properties::new().with(text(Property::Name, new)))
                .unwrap();
        }

        let web01 = items(&hosts, "web01").remove(0);
        assert_eq!(web01.property(Property::Appliance), Some(&Value::from("nas")));
        assert_eq!(web01.property(Property::Environment), Some(&Value::from("qa")));
        assert_eq!(web01.property(Property::Rack), Some(&Value::from("r2")));
        assert_eq!(web01.property(Property::Rank), Some(&Value::Number(0)));
    }

    #[test]
    fn removing_a_cluster_removes_its_hosts() {
        let inv = seeded();
        ResourceController::new(&inv, Kind::Cluster, zone("dc1"))
            .remove("prod")
            .unwrap();

        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));
        let names: Vec<_> = items(&hosts, "").into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["spare01".to_string()]);
    }

    #[test]
    fn removing_referenced_entities_clears_host_references() {
        let inv = seeded();
        let hosts = ResourceController::new(&inv, Kind::Host, zone("dc1"));
        hosts
            .set(
                "web01",
                &Properties::new()
                    .with(text(Property::Appliance, "storage"))
                    .with(text(Property::Environment, "staging")),
            )
            .unwrap();

        for (kind, name) in [
            (Kind::Appliance, "storage"),
            (Kind::Environment, "staging"),
            (Kind::Rack, "r1"),
        ] {
            ResourceController::new(&inv, kind, zone("dc1"))
                .remove(name)
                .unwrap();
        }

        let web01 = items(&hosts, "web01").remove(0);
        assert_eq!(web01.property(Property::Appliance), None);
        assert_eq!(web01.property(Property::Environment), None);
        assert_eq!(web01.property(Property::Rack), None);
        assert_eq!(web01.property(Property::Model), Some(&Value::from("r740")));
    }

    #[test]
    fn removing_a_zone_cascades() {
        let inv = seeded();
        ResourceController::new(&inv, Kind::Zone, Scope::default())
            .remove("*")
            .unwrap();

        let clusters = ResourceController::new(&inv, Kind::Cluster, Scope::default());
        assert!(items(&clusters, "").is_empty());
    }

    #[test]
    fn attribute_rename_and_value_are_independent() {
        let inv = seeded();
        let scope = zone("dc1").with(ScopeField::Host, "web01");
        let attrs = AttributeController::new(&inv, Some(Kind::Host), scope);

        attrs.add("owner", "alice", false).unwrap();
        attrs
            .set("owner", &Properties::new().with(text(Property::Name, "team")))
            .unwrap();
        attrs
            .set("team", &Properties::new().with(text(Property::Value, "infra")))
            .unwrap();

        let listed = attrs
            .list("")
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "team");
        assert_eq!(listed[0].property(Property::Value), Some(&Value::from("infra")));
        assert_eq!(listed[0].scope.host.as_deref(), Some("web01"));
    }

    #[test]
    fn protected_attribute_survives_remove() {
        let inv = seeded();
        let attrs = AttributeController::new(&inv, Some(Kind::Zone), zone("dc1"));

        let err = attrs.remove("own*").unwrap_err();
        assert_eq!(remote_code(err), Code::FailedPrecondition);

        let unprotect =
            Properties::new().with(Field::from_flag(Property::Protected, Some(false), true));
        attrs.set("owner", &unprotect).unwrap();
        attrs.remove("own*").unwrap();

        assert_eq!(attrs.list("").unwrap().count(), 0);
    }

    #[test]
    fn attribute_needs_its_parent() {
        let inv = seeded();
        let attrs = AttributeController::new(&inv, Some(Kind::Cluster), zone("dc1"));

        let err = attrs.add("owner", "alice", false).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingScope {
                field: ScopeField::Cluster,
                ..
            }
        ));
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn global_attributes() {
        let inv = seeded();
        let attrs = AttributeController::new(&inv, None, Scope::default());

        attrs.add("contact", "noc@example.com", false).unwrap();
        let names: Vec<_> = attrs
            .list("")
            .unwrap()
            .map(|item| item.unwrap().name)
            .collect();
        assert_eq!(names, vec!["contact", "site"]);
    }
}
