// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use stack_lib::{
        api::{Item, Property, Value},
        commands::{command, Defaults},
        document::{self, Format},
        error::Error,
        inventory::{Inventory, MemoryInventory},
        test_env::{run_cli, Call, RecordingInventory},
    };

    fn seeded() -> RecordingInventory<MemoryInventory> {
        let inventory = MemoryInventory::new();
        let doc = document::decode(Format::Yaml, include_bytes!("seed.yaml")).unwrap();
        inventory.create_schema(&doc).unwrap();
        RecordingInventory::new(inventory)
    }

    fn last_update(inv: &RecordingInventory<MemoryInventory>) -> stack_lib::api::UpdateRequest {
        match inv.calls().pop() {
            Some(Call::Update(request)) => request,
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn explicit_zero_rank_is_sent() {
        let inv = seeded();
        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["set", "host", "web01", "--zone", "dc1", "--rank", "0"],
        );
        result.unwrap();

        let request = last_update(&inv);
        assert_eq!(request.set.len(), 1);
        assert_eq!(request.set.get(&Property::Rank), Some(&Value::Number(0)));
    }

    #[test]
    fn omitted_flags_are_left_out() {
        let inv = seeded();
        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["update", "host", "web01", "--zone", "dc1", "--location", "row4"],
        );
        result.unwrap();

        let request = last_update(&inv);
        let keys: Vec<_> = request.set.keys().copied().collect();
        assert_eq!(keys, vec![Property::Location]);
        assert!(request.unset.is_empty());
    }

    #[test]
    fn unset_takes_no_values() {
        let parsed = command().try_get_matches_from([
            "stack", "unset", "host", "web01", "--zone", "dc1", "--rank", "3",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unset_is_only_offered_where_something_clears() {
        assert!(command()
            .try_get_matches_from(["stack", "unset", "cluster", "prod", "--zone", "dc1"])
            .is_err());
        assert!(command()
            .try_get_matches_from(["stack", "unset", "host", "attr", "owner"])
            .is_err());
    }

    #[test]
    fn entity_attribute_add_needs_a_value() {
        let parsed = command().try_get_matches_from([
            "stack", "add", "host", "attr", "owner", "--zone", "dc1", "--host", "web01",
        ]);
        assert_eq!(
            parsed.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );

        assert!(command()
            .try_get_matches_from(["stack", "add", "attr", "maintenance"])
            .is_ok());
    }

    fn help(path: &[&str], arg: &str) -> String {
        let mut cmd = command();
        for name in path {
            cmd = cmd
                .find_subcommand(name)
                .unwrap_or_else(|| panic!("no subcommand {name}"))
                .clone();
        }
        let arg = cmd.get_arguments().find(|a| a.get_id() == arg).unwrap();
        arg.get_help().unwrap().to_string()
    }

    #[test]
    fn help_describes_output_and_dump_scope() {
        assert!(help(&["list", "host"], "json").contains("instead of buffering"));
        assert!(help(&["dump"], "zone").contains("STACK_ZONE"));
    }

    #[test]
    fn unset_make_clears_model_too() {
        let inv = seeded();
        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["unset", "host", "web01", "--zone", "dc1", "--make"],
        );
        result.unwrap();

        let request = last_update(&inv);
        let cleared: Vec<_> = request.unset.into_iter().collect();
        assert_eq!(cleared, vec![Property::Make, Property::Model]);
    }

    #[test]
    fn bad_host_type_never_reaches_the_service() {
        let inv = seeded();
        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["set", "host", "web01", "--zone", "dc1", "--type", "bogus"],
        );
        assert!(matches!(result, Err(Error::InvalidHostType(_))));
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn remove_requires_a_glob() {
        assert!(command()
            .try_get_matches_from(["stack", "remove", "cluster", "--zone", "dc1"])
            .is_err());
        assert!(command()
            .try_get_matches_from(["stack", "rm", "cluster", "p*", "--zone", "dc1"])
            .is_ok());
    }

    #[test]
    fn default_zone_fills_in() {
        let inv = seeded();
        let defaults = Defaults {
            zone: Some("dc1".to_string()),
        };

        let (result, _) = run_cli(&inv, &defaults, &["add", "cluster", "batch"]);
        result.unwrap();

        let (result, out) = run_cli(&inv, &defaults, &["ls", "cluster", "--json"]);
        result.unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn list_json_streams_items() {
        let inv = seeded();
        let (result, out) = run_cli(
            &inv,
            &Defaults::default(),
            &["list", "host", "web*", "--zone", "dc1", "--json"],
        );
        result.unwrap();

        let items: Vec<Item> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "web01");
        assert_eq!(items[0].scope.cluster.as_deref(), Some("prod"));
    }

    #[test]
    fn list_table_has_headers() {
        let inv = seeded();
        let (result, out) = run_cli(
            &inv,
            &Defaults::default(),
            &["list", "host", "--zone", "dc1"],
        );
        result.unwrap();

        let header = out.lines().next().unwrap();
        assert!(header.contains("ZONE"));
        assert!(header.contains("HOST"));
        assert!(header.contains("MODEL"));
        assert!(!header.contains("LOCATION"));
        assert!(out.contains("spare01"));
    }

    #[test]
    fn host_attributes() {
        let inv = seeded();
        let defaults = Defaults::default();

        let (result, _) = run_cli(
            &inv,
            &defaults,
            &["add", "host", "attr", "owner", "alice", "--zone", "dc1", "--host", "web01"],
        );
        result.unwrap();

        let (result, _) = run_cli(
            &inv,
            &defaults,
            &[
                "set", "host", "attr", "owner", "--zone", "dc1", "--host", "web01", "--name",
                "team",
            ],
        );
        result.unwrap();

        let request = last_update(&inv);
        assert_eq!(
            request.set.get(&Property::Name),
            Some(&Value::Text("team".to_string()))
        );
        assert!(!request.set.contains_key(&Property::Value));

        let (result, out) = run_cli(
            &inv,
            &defaults,
            &["list", "host", "attr", "--zone", "dc1", "--host", "web01", "--json"],
        );
        result.unwrap();
        assert!(out.contains("\"team\""));
        assert!(out.contains("alice"));
    }

    #[test]
    fn protected_attribute_flag_accepts_false() {
        let inv = seeded();
        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["set", "zone", "attr", "owner", "--zone", "dc1", "--protected", "false"],
        );
        result.unwrap();

        let request = last_update(&inv);
        assert_eq!(request.set.get(&Property::Protected), Some(&Value::Flag(false)));

        let (result, _) = run_cli(
            &inv,
            &Defaults::default(),
            &["remove", "zone", "attr", "owner", "--zone", "dc1"],
        );
        result.unwrap();
    }

    #[test]
    fn dump_prints_yaml() {
        let inv = seeded();
        let (result, out) = run_cli(&inv, &Defaults::default(), &["dump", "--zone", "dc1"]);
        result.unwrap();

        let doc = document::decode(Format::Yaml, out.as_bytes()).unwrap();
        assert_eq!(doc.zones.len(), 1);
        assert!(doc.models.is_empty());
    }
}
