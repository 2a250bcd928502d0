//! Integration tests for suite loading and ordering.

use suiterun::config::{parse_suite, EnvVar};
use suiterun::runner::resolve_order;
use suiterun::SuiterunError;

/// The coverage-matrix shape this tool exists for: a clean step, two
/// interpreter environments collecting separate coverage files, and a
/// report step combining them.
const COVERAGE_MATRIX: &str = "\
[suite]
envlist = clean, py27, py37, report

[gh-actions]
2.7 = py27
3.7 = py37

[env]
deps =
    pytest
    py{27,37}: pytest-cov
setenv =
    {py27,py37}: COVERAGE_FILE=.coverage.{envname}
commands = pytest --cov=odin_devices {posargs:-vv}
depends =
    {py27,py37}: clean
    report: py27,py37

[env:clean]
skip_install = true
deps = coverage
commands = coverage erase

[env:report]
skip_install = true
deps = coverage
commands =
    coverage combine
    coverage report -m
";

#[test]
fn resolve_order_contains_every_environment_exactly_once() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();
    let order = resolve_order(&suite).unwrap();

    assert_eq!(order.len(), suite.environments.len());
    for env in &suite.environments {
        assert_eq!(order.iter().filter(|e| e.name == env.name).count(), 1);
    }
}

#[test]
fn dependencies_precede_dependents() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();
    let order = resolve_order(&suite).unwrap();
    let position =
        |name: &str| order.iter().position(|e| e.name == name).unwrap();

    for env in &suite.environments {
        for dep in &env.depends {
            assert!(
                position(dep) < position(&env.name),
                "{} should run before {}",
                dep,
                env.name
            );
        }
    }
}

#[test]
fn report_runs_last_in_the_coverage_matrix() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();
    let order = resolve_order(&suite).unwrap();
    let names: Vec<_> = order.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["clean", "py27", "py37", "report"]);
}

#[test]
fn mutual_depends_is_a_cycle_error() {
    let source = "\
[suite]
envlist = a, b
[env]
commands = true
depends =
    a: b
    b: a
";
    let suite = parse_suite(source).unwrap();
    let result = resolve_order(&suite);
    assert!(matches!(
        result,
        Err(SuiterunError::CircularDependency { .. })
    ));
}

#[test]
fn coverage_file_setenv_resolves_only_for_matched_environments() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();

    assert_eq!(
        suite.environment("py27").unwrap().setenv,
        vec![EnvVar {
            name: "COVERAGE_FILE".into(),
            value: ".coverage.py27".into(),
        }]
    );
    assert_eq!(
        suite.environment("py37").unwrap().setenv,
        vec![EnvVar {
            name: "COVERAGE_FILE".into(),
            value: ".coverage.py37".into(),
        }]
    );
    assert!(suite.environment("clean").unwrap().setenv.is_empty());
    assert!(suite.environment("report").unwrap().setenv.is_empty());
}

#[test]
fn posargs_default_and_override() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();
    let py37 = suite.environment("py37").unwrap();

    assert_eq!(
        py37.resolve_commands(&[]),
        vec!["pytest --cov=odin_devices -vv"]
    );
    assert_eq!(
        py37.resolve_commands(&["-x".to_string()]),
        vec!["pytest --cov=odin_devices -x"]
    );
}

#[test]
fn conditional_deps_differ_between_environments() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();

    assert_eq!(
        suite.environment("py37").unwrap().deps,
        vec!["pytest", "pytest-cov"]
    );
    assert_eq!(suite.environment("clean").unwrap().deps, vec!["coverage"]);
    assert!(suite.environment("clean").unwrap().skip_install);
}

#[test]
fn ci_mapping_is_preserved_as_metadata() {
    let suite = parse_suite(COVERAGE_MATRIX).unwrap();
    let mapping = &suite.ci_mappings[0];
    assert_eq!(mapping.system, "gh-actions");
    assert_eq!(mapping.entries[0], ("2.7".to_string(), vec!["py27".to_string()]));
}

#[test]
fn suite_is_rejected_before_execution_on_undefined_depends() {
    let source = "\
[suite]
envlist = a
[env]
commands = true
depends = ghost
";
    let err = parse_suite(source).unwrap_err();
    assert!(matches!(
        err,
        SuiterunError::UndefinedEnvironment { ref name, .. } if name == "ghost"
    ));
}
