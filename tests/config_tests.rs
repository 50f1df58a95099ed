//! Compiler argument parsing tests

use classenv::common::config::{FlagKind, FLAGS};
use classenv::{CompilerArguments, Error, JvmTarget};

#[test]
fn test_empty_command_line_matches_defaults() {
    let parsed = CompilerArguments::parse_from(["classenv"]).unwrap();
    assert_eq!(parsed, CompilerArguments::default());
    assert_eq!(parsed.jvm_target().unwrap(), JvmTarget::Jvm1_6);
    assert!(!parsed.no_stdlib);
    assert!(parsed.free_args.is_empty());
}

#[test]
fn test_string_flags_and_alias() {
    let parsed = CompilerArguments::parse_from([
        "classenv",
        "-d",
        "out",
        "--cp",
        "/libs/a",
        "--module-name",
        "core",
        "--jvm-target",
        "1.8",
    ])
    .unwrap();

    assert_eq!(parsed.destination.as_deref(), Some("out"));
    assert_eq!(parsed.classpath.as_deref(), Some("/libs/a"));
    assert_eq!(parsed.module_name.as_deref(), Some("core"));
    assert_eq!(parsed.jvm_target().unwrap(), JvmTarget::Jvm1_8);
}

#[test]
fn test_boolean_flags() {
    let parsed = CompilerArguments::parse_from([
        "classenv",
        "--no-stdlib",
        "--Xno-optimize",
        "--Xsingle-module",
        "--java-parameters",
    ])
    .unwrap();

    assert!(parsed.no_stdlib);
    assert!(parsed.no_optimize);
    assert!(parsed.single_module);
    assert!(parsed.java_parameters);
    assert!(!parsed.no_reflect);
    assert!(!parsed.report_perf);
}

#[test]
fn test_list_flags_split_and_accumulate() {
    let parsed = CompilerArguments::parse_from([
        "classenv",
        "--script-templates",
        "a.Template,b.Template",
        "--script-templates",
        "c.Template",
        "--Xfriend-paths",
        "/out/core",
    ])
    .unwrap();

    assert_eq!(parsed.script_templates, vec!["a.Template", "b.Template", "c.Template"]);
    assert_eq!(parsed.friend_paths, vec!["/out/core"]);
}

#[test]
fn test_free_arguments_are_sources() {
    let parsed =
        CompilerArguments::parse_from(["classenv", "--no-jdk", "src/main", "src/test"]).unwrap();
    assert_eq!(parsed.free_args, vec!["src/main", "src/test"]);
    assert!(parsed.no_jdk);
}

#[test]
fn test_unknown_flag_is_a_configuration_error() {
    let err = CompilerArguments::parse_from(["classenv", "--no-such-flag"]).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_invalid_target_survives_parsing_but_fails_validation() {
    let parsed = CompilerArguments::parse_from(["classenv", "--jvm-target", "1.7"]).unwrap();
    assert!(matches!(
        parsed.jvm_target(),
        Err(Error::InvalidJvmTarget { ref version }) if version == "1.7"
    ));
}

#[test]
fn test_every_table_flag_is_accepted() {
    for spec in FLAGS {
        let flag = if spec.name.chars().count() == 1 {
            format!("-{}", spec.name)
        } else {
            format!("--{}", spec.name)
        };
        let mut argv = vec!["classenv".to_string(), flag];
        match spec.kind {
            FlagKind::Bool => {}
            FlagKind::Str if spec.name == "jvm-target" => argv.push("1.8".to_string()),
            FlagKind::Str | FlagKind::StrList => argv.push("value".to_string()),
        }
        CompilerArguments::parse_from(argv)
            .unwrap_or_else(|e| panic!("flag {} rejected: {}", spec.name, e));
    }
}
