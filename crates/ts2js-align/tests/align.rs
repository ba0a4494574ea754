//! Integration tests for line alignment.

use proptest::prelude::*;
use ts2js_align::{AlignError, align, split_lines};

/// Exploded original: `import { a } from "b";`, blank line, `const x = 1;`.
const ORIGINAL: &str = "import {\n  a,\n} from \"b\";\n\nconst x = 1;\n";

/// Exploded transpiled text: same statements, blank line collapsed.
const TRANSPILED: &str = "import {\n  a,\n} from \"b\";\nconst x = 1;\n";

#[test]
fn test_blank_line_restored_after_import() {
    let source = split_lines(TRANSPILED);
    let output = split_lines(ORIGINAL);

    let aligned = align(&source, &output).unwrap();

    insta::assert_snapshot!(aligned, @r#"
    import {
      a,
    } from "b";

    const x = 1;
    "#);
}

#[test]
fn test_import_restored_verbatim_from_source() {
    // The output sequence lays the import out on one line, the source keeps
    // its exploded form. The source lines win, untouched.
    let source = [
        "import type {",
        "    Options,",
        "} from \"./options\";",
        "export const run = (o) => o;",
    ];
    let output = [
        "import type { Options } from \"./options\";",
        "",
        "export const run = (o: Options) => o;",
    ];

    let aligned = align(&source, &output).unwrap();

    assert_eq!(
        aligned,
        "import type {\n    Options,\n} from \"./options\";\n\nexport const run = (o) => o;"
    );
}

#[test]
fn test_erased_type_import_is_reinserted() {
    let source = split_lines("import {\n  a,\n} from \"b\";\nconst x = a;\n");
    let output = split_lines(
        "import type {\n  T,\n} from \"t\";\nimport {\n  a,\n} from \"b\";\n\nconst x: T = a;\n",
    );

    let aligned = align(&source, &output).unwrap();

    insta::assert_snapshot!(aligned, @r#"
    import type {
      T,
    } from "t";
    import {
      a,
    } from "b";

    const x = a;
    "#);
}

#[test]
fn test_multiple_imports_in_a_row() {
    let source = split_lines(
        "import * as fs from \"fs\";\nimport {\n  join,\n} from \"path\";\nfs.readFileSync(join(\"a\"));",
    );
    let output = split_lines(
        "import * as fs from \"fs\";\nimport {\n  join,\n} from \"path\";\n\nfs.readFileSync(join(\"a\"));",
    );

    let aligned = align(&source, &output).unwrap();

    insta::assert_snapshot!(aligned, @r#"
    import * as fs from "fs";
    import {
      join,
    } from "path";

    fs.readFileSync(join("a"));
    "#);
}

#[test]
fn test_consecutive_output_blanks_each_emit_a_line() {
    let source = ["a;", "b;"];
    let output = ["a;", "", "", "b;"];

    assert_eq!(align(&source, &output).unwrap(), "a;\n\n\nb;");
}

#[test]
fn test_blank_source_line_error_message() {
    let source = ["", "a;"];
    let output = ["a;"];

    let err = align(&source, &output).unwrap_err();

    assert!(matches!(err, AlignError::BlankSourceLine { .. }));
    assert!(err.to_string().contains("strange blank line"));
}

fn statement() -> impl Strategy<Value = String> {
    // Starts with a-h so it can never look like an import.
    "[a-h][a-z]{0,6} = [0-9]{1,3};"
}

proptest! {
    #[test]
    fn prop_blank_only_differences_restore_the_layout(
        layout in prop::collection::vec((0usize..3, statement()), 1..20)
    ) {
        let mut source = Vec::new();
        let mut output = Vec::new();
        for (blanks, line) in &layout {
            output.extend(std::iter::repeat_n(String::new(), *blanks));
            output.push(line.clone());
            source.push(line.clone());
        }

        let aligned = align(&source, &output).unwrap();

        prop_assert_eq!(aligned, output.join("\n"));
    }

    #[test]
    fn prop_content_facing_blank_source_always_fails(
        prefix in prop::collection::vec(statement(), 0..10),
        line in statement()
    ) {
        let mut source = prefix.clone();
        source.push(String::new());
        source.push(line.clone());
        let mut output = prefix;
        output.push(line);

        let err = align(&source, &output).unwrap_err();

        let is_blank_source = matches!(err, AlignError::BlankSourceLine { .. });
        prop_assert!(is_blank_source);
    }
}
