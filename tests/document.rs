// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

#[cfg(test)]
mod tests {
    use std::{io::Write, path::Path};

    use stack_lib::{
        api::{HostType, Scope, ScopeField},
        controller::DocumentController,
        document::{self, Document, Format},
        error::Error,
        inventory::MemoryInventory,
        test_env::RecordingInventory,
    };

    const SEED: &[u8] = include_bytes!("seed.yaml");

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path(Path::new("a.toml")),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn seed_decodes() {
        let doc = document::decode(Format::Yaml, SEED).unwrap();
        let web01 = &doc.zones[0].clusters[0].hosts[0];
        assert_eq!(web01.rank, Some(0));
        assert_eq!(web01.slot, None);
        assert_eq!(web01.kind, Some(HostType::Metal));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = document::decode(Format::Json, br#"{"zones":[{"name":"dc1","owner":"x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
    }

    #[test]
    fn malformed_file_is_rejected_before_any_call() {
        let inv = RecordingInventory::new(MemoryInventory::new());
        let file = temp_file(".yaml", b"zones: [");

        let err = DocumentController::new(&inv).load(file.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument(_)));
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected_before_any_call() {
        let inv = RecordingInventory::new(MemoryInventory::new());
        let file = temp_file(".txt", SEED);

        let err = DocumentController::new(&inv).load(file.path()).unwrap_err();
        assert!(err.is_validation());
        assert!(inv.calls().is_empty());
    }

    #[test]
    fn load_then_dump_gives_the_document_back() {
        let inv = MemoryInventory::new();
        let file = temp_file(".yml", SEED);
        let documents = DocumentController::new(&inv);

        documents.load(file.path()).unwrap();

        let expected = document::decode(Format::Yaml, SEED).unwrap();
        assert_eq!(documents.dump(&Scope::default()).unwrap(), expected);
    }

    #[test]
    fn json_load_matches_yaml_load() {
        let expected = document::decode(Format::Yaml, SEED).unwrap();
        let json = document::encode(Format::Json, &expected).unwrap();

        let inv = MemoryInventory::new();
        let file = temp_file(".json", json.as_bytes());
        let documents = DocumentController::new(&inv);
        documents.load(file.path()).unwrap();

        assert_eq!(documents.dump(&Scope::default()).unwrap(), expected);
    }

    #[test]
    fn dump_narrows_to_one_host() {
        let inv = MemoryInventory::new();
        let documents = DocumentController::new(&inv);
        documents.load(temp_file(".yaml", SEED).path()).unwrap();

        let scope = Scope::default()
            .with(ScopeField::Zone, "dc1")
            .with(ScopeField::Host, "spare01");
        let doc: Document = documents.dump(&scope).unwrap();

        assert!(doc.models.is_empty());
        assert!(doc.attributes.is_empty());
        assert_eq!(doc.zones.len(), 1);
        assert!(doc.zones[0].clusters.is_empty());
        assert_eq!(doc.zones[0].hosts.len(), 1);
        assert_eq!(doc.zones[0].hosts[0].name, "spare01");
    }

    #[test]
    fn load_is_all_or_nothing() {
        let inv = MemoryInventory::new();
        let documents = DocumentController::new(&inv);

        let bad = b"zones:\n  - name: dc1\n    hosts:\n      - name: web01\n        appliance: missing\n";
        let err = documents.load(temp_file(".yaml", bad).path()).unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));

        assert_eq!(documents.dump(&Scope::default()).unwrap(), Document::default());
    }
}
