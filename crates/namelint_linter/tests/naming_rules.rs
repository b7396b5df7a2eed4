//! End-to-end tests for the naming rules.

mod common;

use common::{Finding, lint_files, lint_source};

const CLASS_MEMBERS_PASCAL: &str = r#"
[rules]
class-members-name = [true, "pascal-case"]
"#;

#[test]
fn test_heritage_exemption() {
    let source = r"interface Widget {
    render(): void;
}

class Button implements Widget {
    render() {}
    Render_Bad() {}
}
";
    let findings = lint_source("button.ts", source, CLASS_MEMBERS_PASCAL);
    assert_eq!(
        findings,
        vec![
            Finding::at(
                2,
                5,
                "class-members-name",
                "Declaration \"render\" format is not correct (pascal-case)."
            )
            .with_fix("Render"),
            Finding::at(
                7,
                5,
                "class-members-name",
                "Declaration \"Render_Bad\" format is not correct (pascal-case)."
            )
            .with_fix("RenderBad"),
        ]
    );
}

#[test]
fn test_heritage_exemption_across_files() {
    let files = [
        ("widget.d.ts", "declare abstract class Widget { protected on_mount(): void; }"),
        ("button.ts", "class Button extends Widget {\n    on_mount() {}\n    on_click() {}\n}\n"),
    ];
    let findings = lint_files(&files, 1, "[rules]\nclass-members-name = true\n");
    assert_eq!(
        findings,
        vec![
            Finding::at(
                3,
                5,
                "class-members-name",
                "Declaration \"on_click\" format is not correct (camel-case)."
            )
            .with_fix("onClick")
        ]
    );
}

#[test]
fn test_rule_table_resolution() {
    let config = r#"
[rules]
class-members-name = [true, "camel-case", [
    { kind = "method", modifier = "private", format = "snake-case" },
]]
"#;
    let source = "class Job {\n    private doThing() {}\n    do_thing() {}\n}\n";
    let findings = lint_source("job.ts", source, config);
    let fixes: Vec<_> = findings.iter().map(|f| (f.line, f.fix.as_deref())).collect();
    assert_eq!(fixes, vec![(2, Some("do_thing")), (3, Some("doThing"))]);
}

#[test]
fn test_structured_class_members_options() {
    let config = r#"
[rules.class-members-name]
default-format = "camel-case"
ignore-parent-suffixes = ["Props"]
formats = [
    { kind = "property", isStatic = true, format = "constant-case" },
    { kind = "property", modifier = "private", leadingUnderscore = true, format = "camel-case" },
]
"#;
    let source = r"interface ButtonProps { Is_Disabled: boolean; }
class Registry {
    static defaultSize = 1;
    private __items_list = [];
    Lookup() {}
}
";
    let fixes: Vec<_> = lint_source("registry.ts", source, config)
        .into_iter()
        .filter_map(|f| f.fix)
        .collect();
    assert_eq!(fixes, vec!["DEFAULT_SIZE", "__itemsList", "lookup"]);
}

#[test]
fn test_const_variable_scope() {
    let source = r"const MAX_SIZE = 10;
const maxSize = 10;
function load() {
    const maxSize = 20;
}
";
    let findings = lint_source("limits.ts", source, "[rules]\nconst-variable-name = true\n");
    assert_eq!(
        findings,
        vec![
            Finding::at(
                2,
                7,
                "const-variable-name",
                "Const variables in source file or in module declaration must have (constant-case) format"
            )
            .with_fix("MAX_SIZE")
        ]
    );
}

#[test]
fn test_const_variable_enum_from_other_file() {
    let files = [
        ("color.ts", "export enum Color { Red, Green }"),
        (
            "theme.ts",
            "const primaryColor = Color.Red;\nconst palette = buildPalette();\n",
        ),
    ];
    let findings = lint_files(
        &files,
        1,
        "[rules]\nconst-variable-name = { only-primitive-types = true }\n",
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].fix.as_deref(), Some("PRIMARY_COLOR"));
}

#[test]
fn test_backing_field() {
    let source = r"class Temperature {
    private _celsius = 0;

    get degrees() {
        return this._celsius;
    }

    reset() {
        this._celsius = 0;
    }
}
";
    let findings = lint_source("temperature.ts", source, "[rules]\nbacking-field = true\n");
    assert_eq!(
        findings,
        vec![
            Finding::at(
                4,
                9,
                "backing-field",
                r#"Accessor "degrees" must be named after its backing field "_celsius" ("celsius")."#
            )
            .with_fix("celsius"),
            Finding::at(
                9,
                9,
                "backing-field",
                "Backing field can only be used in GetAccessor and SetAccessor."
            ),
        ]
    );
}

#[test]
fn test_type_parameter_name() {
    let findings = lint_source(
        "list.ts",
        "export class List<item, TKey> {}\n",
        "[rules]\ntype-parameter-name = true\n",
    );
    assert_eq!(
        findings,
        vec![
            Finding::at(
                1,
                19,
                "type-parameter-name",
                "Type parameter's name must start with \"T\" prefix."
            )
            .with_fix("TItem")
        ]
    );
}

#[test]
fn test_all_rules_by_default() {
    let source = "namespace Store {\n    const initialState = {};\n}\n";
    let findings = lint_source("store.ts", source, "");
    let rules: Vec<_> = findings.iter().map(|f| f.rule).collect();
    assert_eq!(rules, vec!["exported-namespace-members", "const-variable-name"]);
}
