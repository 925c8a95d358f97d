// Tests driven by the uritemplate-test style JSON fixtures

mod common;

use common::{load_fixture, run_suite};

#[test]
fn test_level_1_examples() {
    run_suite("rfc-examples", "Level 1 Examples");
}

#[test]
fn test_level_2_examples() {
    run_suite("rfc-examples", "Level 2 Examples");
}

#[test]
fn test_level_3_examples() {
    run_suite("rfc-examples", "Level 3 Examples");
}

#[test]
fn test_level_4_examples() {
    run_suite("rfc-examples", "Level 4 Examples");
}

#[test]
fn test_additional_examples_1() {
    run_suite("extended-tests", "Additional Examples 1");
}

#[test]
fn test_additional_examples_2() {
    run_suite("extended-tests", "Additional Examples 2");
}

#[test]
fn test_empty_variables() {
    run_suite("extended-tests", "Additional Examples 3: Empty Variables");
}

#[test]
fn test_numeric_keys() {
    run_suite("extended-tests", "Additional Examples 4: Numeric Keys");
}

#[test]
fn test_explode_combinations() {
    run_suite("extended-tests", "Additional Examples 5: Explode Combinations");
}

#[test]
fn test_native_types() {
    run_suite("extended-tests", "Native Types");
}

#[test]
fn test_fixture_levels_are_recorded() {
    let suites = load_fixture("rfc-examples");
    let mut levels: Vec<u8> = suites.values().filter_map(|suite| suite.level).collect();
    levels.sort_unstable();
    assert_eq!(levels, vec![1, 2, 3, 4]);
}
