//! Integration tests for generation from definition files

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use namegen::{
    generate, generate_batch, generate_with_config, scanner, start_text, DefinitionError,
    GeneratorConfig, GeneratorDefinition, GrammarError,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> GeneratorDefinition {
    GeneratorDefinition::from_file(&fixture(name)).expect("Should load")
}

fn has_delimiters(text: &str) -> bool {
    scanner::delimiters(text).next().is_some()
}

#[test]
fn test_hello_world() {
    let def = load("hello_world.json");
    let out = generate(&start_text("START"), &def).unwrap();
    insta::assert_snapshot!(out, @"Hello World!");
}

#[test]
fn test_missing_tag_message() {
    let def = GeneratorDefinition::from_json_str(
        r#"{ "generator": { "tags": { "START": { "a": "<<MISSING>>" } } } }"#,
    )
    .unwrap();
    let out = generate("<<MISSING>>", &def).unwrap();
    insta::assert_snapshot!(out, @r"
    ERROR: Tag MISSING not found.
    Text: <<MISSING>>
    ");
}

#[test]
fn test_switch_example() {
    let def = GeneratorDefinition::from_json_str(
        r#"{ "generator": { "tags": {
            "START": { "a": "[[color=blue]]<<PICK|color>>" },
            "PICK": { "blue": "sky", "default": "thing" }
        } } }"#,
    )
    .unwrap();
    assert_eq!(generate("<<START>>", &def).unwrap(), "sky");
}

#[test]
fn test_fantasy_names_are_consistent() {
    let def = load("fantasy_names.json");
    let mut rng = StdRng::seed_from_u64(2024);
    let lines = generate_batch(&def, 40, &GeneratorConfig::default(), &mut rng).unwrap();

    let allowed = [
        "Lady Aerin",
        "Lady Liriel",
        "Thane Borin",
        "Thane Dain",
        "Citizen Fizz",
    ];
    for line in &lines {
        assert!(allowed.contains(&line.as_str()), "unexpected output: {line}");
        assert!(!has_delimiters(line));
    }
}

#[test]
fn test_seeded_runs_repeat() {
    let def = load("fantasy_names.json");
    let config = GeneratorConfig::default();
    let first = generate_batch(&def, 10, &config, &mut StdRng::seed_from_u64(5)).unwrap();
    let second = generate_batch(&def, 10, &config, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_cycle_hits_iteration_budget() {
    let def = load("cycle.json");
    let out = generate("<<START>>", &def).unwrap();
    assert!(out.starts_with("ERROR: Maximum iterations for generator reached."));
    assert!(out.ends_with("\nText: <<START>>"));
}

#[test]
fn test_cycle_in_batch_does_not_abort() {
    let def = load("cycle.json");
    let mut rng = StdRng::seed_from_u64(0);
    let lines = generate_batch(&def, 3, &GeneratorConfig::default(), &mut rng).unwrap();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("ERROR:")));
}

#[test]
fn test_toml_definition_with_lowercase_start() {
    let def = load("lowercase_start.toml");
    assert!(def.has_tag("START"));
    assert_eq!(
        generate("<<START>>", &def).unwrap(),
        "Dear Ada, welcome."
    );
}

#[test]
fn test_broken_value_is_grammar_error() {
    let def = load("broken.json");
    let err = generate("<<START>>", &def).unwrap_err();
    assert!(matches!(err, GrammarError::MalformedTag { .. }));
    assert_eq!(err.text(), "<<NAME");

    let report = err.format("broken.json");
    assert!(report.contains("Unmatched '<<' delimiter"));
}

#[test]
fn test_nested_delimiter_is_grammar_error() {
    let def = GeneratorDefinition::from_json_str(
        r#"{ "generator": { "tags": { "START": { "a": "<<X <<Y>>" } } } }"#,
    )
    .unwrap();
    let err = generate("<<START>>", &def).unwrap_err();
    assert!(matches!(err, GrammarError::NestedDelimiter { .. }));
}

#[test]
fn test_missing_file() {
    let result = GeneratorDefinition::from_file(&fixture("does_not_exist.json"));
    assert!(matches!(result, Err(DefinitionError::Io(_))));
}

#[test]
fn test_settings_file() {
    let config = GeneratorConfig::from_file(&fixture("settings.toml")).expect("Should load");
    assert_eq!(config.max_iterations, 10);
    assert_eq!(config.start_text(), "<<GREETING>>");

    let def = load("lowercase_start.toml");
    let mut rng = StdRng::seed_from_u64(1);
    let lines = generate_batch(&def, 1, &config, &mut rng).unwrap();
    assert_eq!(lines, vec!["welcome.".to_string()]);
}

#[test]
fn test_definition_shared_across_threads() {
    let def = load("fantasy_names.json");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                let def = &def;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    generate_with_config("<<START>>", def, &GeneratorConfig::default(), &mut rng)
                })
            })
            .collect();
        for handle in handles {
            let out = handle.join().unwrap().unwrap();
            assert!(!out.starts_with("ERROR:"), "{out}");
        }
    });
    assert!(def.variables.is_empty());
}
