use stride_rubric::error::RubricError;
use stride_rubric::ConfigRegistry;

#[test]
fn builtin_registry_has_both_assessments() {
    let registry = ConfigRegistry::builtin();
    assert_eq!(registry.ids().collect::<Vec<_>>(), ["as_card_01", "as_hr_02"]);

    let hr = registry.get("as_hr_02").unwrap();
    assert_eq!(hr.name, "Health & Fitness Assessment");
    assert_eq!(hr.template, "health-fitness");
    assert_eq!(hr.fields().count(), 17);

    let card = registry.get("as_card_01").unwrap();
    assert_eq!(card.template, "cardiac");
    assert_eq!(card.fields().count(), 9);

    assert!(registry.get("as_missing").is_none());
}

#[test]
fn builtin_configs_are_valid_and_well_formed() {
    let registry = ConfigRegistry::builtin();
    for (id, config) in registry.iter() {
        config.validate(id).unwrap();
        assert!(config.fields().all(|f| !f.path.is_malformed()), "{id}");
    }
}

#[test]
fn json_round_trip_preserves_configuration() {
    let builtin = ConfigRegistry::builtin();
    let as_map: serde_json::Map<String, serde_json::Value> = builtin
        .iter()
        .map(|(id, c)| (id.to_string(), serde_json::to_value(c).unwrap()))
        .collect();
    let json = serde_json::to_string(&as_map).unwrap();

    let loaded = ConfigRegistry::from_json_str(&json).unwrap();
    assert_eq!(loaded.len(), builtin.len());
    for (id, config) in builtin.iter() {
        assert_eq!(loaded.get(id), Some(config));
    }
}

#[test]
fn configuration_json_shape() {
    let registry = ConfigRegistry::builtin();
    let value = serde_json::to_value(registry.get("as_hr_02").unwrap()).unwrap();
    let first = &value["sections"][0]["fields"][0];
    assert_eq!(first["path"], "accuracy");
    assert_eq!(first["classification"]["excellent"]["color"], "#22c55e");
}

#[test]
fn rejects_duplicate_sections() {
    let json = r#"{
        "x": { "name": "X", "template": "t", "sections": [
            { "id": "a", "title": "A", "fields": [] },
            { "id": "a", "title": "A again", "fields": [] }
        ] }
    }"#;
    let err = ConfigRegistry::from_json_str(json).unwrap_err();
    assert!(matches!(err, RubricError::DuplicateSection { .. }));
}

#[test]
fn rejects_inverted_band() {
    let json = r##"{
        "x": { "name": "X", "template": "t", "sections": [
            { "id": "a", "title": "A", "fields": [
                { "label": "L", "path": "p", "unit": "u",
                  "classification": { "bad": { "min": 10, "max": 1, "color": "#000" } } }
            ] }
        ] }
    }"##;
    let err = ConfigRegistry::from_json_str(json).unwrap_err();
    assert!(matches!(err, RubricError::InvalidBand { .. }));
}

#[test]
fn malformed_paths_load() {
    let json = r##"{
        "x": { "name": "X", "template": "t", "sections": [
            { "id": "a", "title": "A", "fields": [
                { "label": "L", "path": "seq[?(@.id)].v", "unit": "u", "classification": {} }
            ] }
        ] }
    }"##;
    let registry = ConfigRegistry::from_json_str(json).unwrap();
    let field = registry.get("x").unwrap().fields().next().unwrap();
    assert!(field.path.is_malformed());
}

#[test]
fn missing_file_is_io_error() {
    let err = ConfigRegistry::from_json_file(std::path::Path::new("/nonexistent/stride.json"))
        .unwrap_err();
    assert!(matches!(err, RubricError::Io { .. }));
}
