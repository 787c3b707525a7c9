use chime_params::prelude::*;
use chime_params::catalog::BUILTIN_JSON;
use serde_json::Value;
use std::collections::HashSet;

#[test]
fn document_parses_as_plain_json() {
    let doc: Value = serde_json::from_str(BUILTIN_JSON).unwrap();
    let groups = doc.as_object().unwrap();
    assert!(!groups.is_empty());

    for (key, group) in groups {
        let group = group.as_object().unwrap();
        let label = group["groupLabel"].as_str().unwrap();
        assert!(!label.is_empty(), "{} has an empty groupLabel", key);

        for (name, def) in group.iter().filter(|(k, _)| *k != "groupLabel") {
            let def = def.as_object().unwrap();
            let mut attrs: Vec<_> = def.keys().map(String::as_str).collect();
            attrs.sort_unstable();
            assert_eq!(
                attrs,
                vec!["dataType", "distribution", "label", "param_key", "title"],
                "{}.{}",
                key,
                name
            );
            assert!(matches!(def["dataType"].as_str(), Some("int") | Some("float")));
            assert!(matches!(
                def["distribution"].as_str(),
                Some("gamma") | Some("beta") | Some("constant")
            ));
        }
    }
}

#[test]
fn param_keys_are_unique() {
    let catalog = builtin();
    let keys: HashSet<_> = catalog
        .definitions()
        .map(|e| e.definition.param_key().as_str())
        .collect();
    assert_eq!(keys.len(), catalog.len());
}

#[test]
fn every_group_is_labelled_and_populated() {
    for (key, group) in builtin().groups() {
        assert!(!group.label().is_empty(), "{}", key);
        assert!(!group.is_empty(), "{}", key);
    }
    let keys: Vec<_> = builtin().groups().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            "admissionProportions",
            "epidemiologicalTiming",
            "hospitalInputs",
            "lengthsOfStay",
            "regionalPopulation"
        ]
    );
}

#[test]
fn icu_admission_proportion() {
    let entry = builtin().by_param_key("ICU_Prop").unwrap();
    assert_eq!(entry.group, "admissionProportions");
    assert_eq!(entry.name, "ICU");
    assert_eq!(entry.definition.data_type(), DataType::Float);
    assert_eq!(entry.definition.distribution(), Distribution::Beta);
}

#[test]
fn vocabulary_counts() {
    let summary = builtin().summary();
    assert_eq!(summary.groups, 5);
    assert_eq!(summary.definitions, 15);
    assert_eq!(summary.by_data_type[&DataType::Int], 9);
    assert_eq!(summary.by_data_type[&DataType::Float], 6);
    for d in Distribution::ALL {
        assert_eq!(summary.by_distribution[d], 5, "{}", d);
    }
}

#[test]
fn pretty_output_reloads() {
    let data = builtin().to_json_pretty().unwrap();
    let reloaded = Catalog::from_json_str(&data).unwrap();
    assert_eq!(&reloaded, builtin());
}

#[test]
fn proportions_coerce_as_floats() {
    let group = builtin().group("admissionProportions").unwrap();
    for (_, def) in group {
        assert_eq!(def.parse_value("0.025").unwrap(), ParamValue::Float(0.025));
    }
    let los = builtin().definition("lengthsOfStay", "hospitalized").unwrap();
    assert_eq!(los.parse_value("7").unwrap(), ParamValue::Int(7));
    assert!(matches!(los.parse_value("7.5"), Err(Error::InvalidValue { .. })));
}
