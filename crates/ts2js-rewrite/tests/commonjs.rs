//! Tests for the built-in CommonJS rewrite table.

use std::io::Write;

use ts2js_rewrite::{ReplaceMode, RewriteError, RuleSet, apply_rules};

fn commonjs() -> RuleSet {
    RuleSet::commonjs().unwrap()
}

#[test]
fn test_dotenv_special_case_wins_over_named_import() {
    let text = "import * as dotenv from \"dotenv\";\n\
                dotenv.config({\n  path: \".env\",\n});\n\
                import { run } from \"./run\";\n";

    let out = apply_rules(text, &commonjs());

    insta::assert_snapshot!(out, @r#"
    require("dotenv").config();

    const { run } = require("./run");
    "#);
    assert!(!out.contains("const dotenv"));
}

#[test]
fn test_dotenv_without_config_call_is_a_plain_namespace_import() {
    let out = apply_rules("import * as dotenv from \"dotenv\";\n", &commonjs());

    assert_eq!(out, "const dotenv = require(\"dotenv\");\n");
}

#[test]
fn test_export_stripped_exactly_once() {
    let text = "export async function main() {\n  await go();\n}\n\
                // export async function main is the entry point\n";

    let out = apply_rules(text, &commonjs());

    assert_eq!(
        out,
        "async function main() {\n  await go();\n}\n\
         // export async function main is the entry point\n"
    );
}

#[test]
fn test_export_of_other_functions_is_kept() {
    let text = "export async function helper() {}\n";

    assert_eq!(apply_rules(text, &commonjs()), text);
}

#[test]
fn test_mixed_import_forms() {
    let text = "import { a, b } from \"ab\";\n\
                import c from \"c\";\n\
                import * as d from \"d\";\n\
                \n\
                a(b, c, d);\n";

    let out = apply_rules(text, &commonjs());

    insta::assert_snapshot!(out, @r#"
    const { a, b } = require("ab");
    const c = require("c");
    const d = require("d");

    a(b, c, d);
    "#);
}

#[test]
fn test_second_application_is_idempotent() {
    let text = "import { a } from \"b\";\n\
                import * as fs from \"fs\";\n\
                export async function main() {}\n";
    let rules = commonjs();

    let once = apply_rules(text, &rules);
    let twice = apply_rules(&once, &rules);

    assert_eq!(once, twice);
    assert!(!once.contains("import"));
}

#[test]
fn test_rules_loaded_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"name": "var", "pattern": "\\bconst\\b", "replacement": "var", "mode": "all"}},
            {{"pattern": "var", "replacement": "let"}}
        ]"#
    )
    .unwrap();

    let rules = RuleSet::load(file.path()).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rules()[0].name(), Some("var"));
    assert_eq!(rules.rules()[1].mode(), ReplaceMode::First);
    assert_eq!(apply_rules("const a; const b;", &rules), "let a; var b;");
}

#[test]
fn test_rule_file_with_bad_pattern() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"pattern": "[", "replacement": ""}}]"#).unwrap();

    let err = RuleSet::load(file.path()).unwrap_err();

    assert!(matches!(err, RewriteError::InvalidPattern { .. }));
}

#[test]
fn test_missing_rule_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = RuleSet::load(&dir.path().join("rules.json")).unwrap_err();

    assert!(matches!(err, RewriteError::Io { .. }));
}
