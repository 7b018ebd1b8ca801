use proptest::prelude::*;
use std::collections::BTreeMap;
use weave::builder::build;
use weave::formats::render;
use weave::validation::validate;
use weave::{
    ColumnNames, Entry, Error, Language, Platform, RenderOptions, SourceLocator, Table,
    TranslationEntry,
};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\.,!\\?]{1,30}").expect("valid value regex")
}

fn platform_strategy() -> impl Strategy<Value = Platform> {
    prop_oneof![
        Just(Platform::Android),
        Just(Platform::Ios),
        Just(Platform::Web)
    ]
}

fn platforms_cell_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("android".to_string()),
        Just("ios, web".to_string()),
        Just("Web".to_string()),
    ]
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, (String, String)>> {
    prop::collection::btree_map(key_strategy(), (value_strategy(), platforms_cell_strategy()), 1..10)
}

fn entries_from(dataset: &BTreeMap<String, (String, String)>) -> Vec<Entry> {
    dataset
        .iter()
        .enumerate()
        .map(|(index, (key, (value, platforms)))| {
            let mut entry = TranslationEntry::new(key.clone(), SourceLocator::new("Main", index + 2));
            entry.add_translation("en", Some(value.clone()));
            entry.add_platforms(platforms);
            Entry::Translation(entry)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_rendering_is_deterministic(dataset in dataset_strategy(), platform in platform_strategy()) {
        let entries = entries_from(&dataset);
        let language = Language::new("en");
        let first = render(&entries, &language, platform, &RenderOptions::new()).unwrap();
        let second = render(&entries, &language, platform, &RenderOptions::new()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_web_output_is_a_json_object_of_rendered_keys(dataset in dataset_strategy()) {
        let entries = entries_from(&dataset);
        let rendered = render(&entries, &Language::new("en"), Platform::Web, &RenderOptions::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered.document.text).unwrap();
        let object = value.as_object().unwrap();

        let expected: Vec<&String> = dataset
            .iter()
            .filter(|(_, (_, platforms))| {
                let platforms = platforms.to_lowercase();
                platforms.is_empty() || platforms.contains("web")
            })
            .map(|(key, _)| key)
            .collect();
        prop_assert_eq!(object.len(), expected.len());
        for key in expected {
            prop_assert_eq!(object[key.as_str()].as_str(), Some(dataset[key].0.as_str()));
        }
    }

    #[test]
    fn prop_unique_allowed_keys_validate(dataset in dataset_strategy()) {
        prop_assert!(validate(&entries_from(&dataset)).is_ok());
    }

    #[test]
    fn prop_any_disallowed_character_fails(
        prefix in key_strategy(),
        bad in "[ \\-\\.@#/é]",
        suffix in "[a-z0-9_]{0,5}",
    ) {
        let key = format!("{prefix}{bad}{suffix}");
        let entry = Entry::Translation(TranslationEntry::new(key, SourceLocator::new("Main", 2)));
        let result = validate(&[entry]);
        prop_assert!(
            matches!(result, Err(Error::IllegalKeyCharacter { .. })),
            "expected an illegal key error"
        );
    }

    #[test]
    fn prop_all_absent_rows_never_become_entries(
        keys in prop::collection::vec(key_strategy(), 1..10),
        filled in prop::collection::vec(any::<bool>(), 10),
    ) {
        let rows: Vec<Vec<Option<String>>> = keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let value = filled[index].then(|| "Value".to_string());
                vec![Some(key.clone()), value, None]
            })
            .collect();
        let table = Table::new("Main", vec!["key".into(), "en".into(), "fr".into()], rows);
        let languages = vec![Language::new("en"), Language::new("fr")];
        let built = build(&table, &languages, &ColumnNames::default()).unwrap();

        let expected = filled.iter().take(keys.len()).filter(|f| **f).count();
        prop_assert_eq!(built.entries.len(), expected);
        prop_assert_eq!(built.warnings.len(), keys.len());
        for entry in &built.entries {
            let translation = entry.as_translation().unwrap();
            prop_assert!(translation.translation("en").is_some());
        }
    }
}
