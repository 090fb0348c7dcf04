use std::path::PathBuf;

use tempfile::TempDir;

use super::test_helpers::{child, create_react_app, create_test_project, react_config, summary};
use crate::{Category, Framework, GraphBuilder, GraphError, ProjectConfig};

#[test]
fn test_entry_children_in_source_order() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    assert_eq!(tree.category, Category::Entry);
    assert_eq!(tree.name, "main.tsx");
    assert_eq!(tree.source_path, "src/main.tsx");
    assert_eq!(
        summary(&tree),
        [
            ("React", Category::External),
            ("debounce", Category::External),
            ("App", Category::Component),
            ("styles", Category::Style),
            ("logo", Category::Media),
            ("Old", Category::Ignored),
            ("missing", Category::Unknown),
            ("Color", Category::Enum),
        ]
    );
}

#[test]
fn test_external_uses_package_name() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    let debounce = child(&tree, "debounce");
    assert_eq!(debounce.source_path, "lodash");
    assert!(debounce.children.is_empty());
}

#[test]
fn test_hook_is_expanded() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    let hook = child(child(&tree, "App"), "useCounter");
    assert_eq!(hook.category, Category::Hook);
    assert_eq!(hook.source_path, "src/hooks/useCounter.ts");
    assert_eq!(
        summary(hook),
        [("useState", Category::External), ("clamp", Category::Function)]
    );
}

#[test]
fn test_style_and_media_are_leaves() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    let styles = child(&tree, "styles");
    assert_eq!(styles.source_path, "src/app.module.scss");
    assert!(styles.children.is_empty());
    assert!(child(&tree, "logo").children.is_empty());
}

#[test]
fn test_ignored_and_unresolved_keep_specifier() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    let old = child(&tree, "Old");
    assert_eq!(old.source_path, "./legacy/Old");
    assert!(old.children.is_empty());
    let missing = child(&tree, "missing");
    assert_eq!(missing.source_path, "./nowhere");
}

#[test]
fn test_alias_resolves_through_tsconfig_paths() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    let header = child(child(&tree, "App"), "Header");
    assert_eq!(header.category, Category::Component);
    assert_eq!(header.source_path, "src/components/Header.tsx");
    assert_eq!(
        summary(header),
        [("clamp", Category::Function), ("HeaderProps", Category::Interface)]
    );
}

#[test]
fn test_leaf_invariant() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    for node in tree.walk() {
        if !node.category.is_expandable() && node.category != Category::Entry {
            assert!(node.children.is_empty(), "{} ({}) has children", node.name, node.category);
        }
    }
}

#[test]
fn test_cycle_is_circular() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            ("src/main.ts", "import { a } from './a';"),
            ("src/a.ts", "import { b } from './b';\nexport const a = () => b();"),
            ("src/b.ts", "import { a } from './a';\nexport const b = () => a();"),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    let a = child(&tree, "a");
    let b = child(a, "b");
    let back = child(b, "a");
    assert_eq!(a.category, Category::Function);
    assert_eq!(b.category, Category::Function);
    assert_eq!(back.category, Category::Circular);
    assert_eq!(back.source_path, "src/a.ts");
    assert!(back.children.is_empty());
}

#[test]
fn test_self_import_of_entry_is_circular() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            (
                "src/main.ts",
                "import * as main from './main';\nexport const run = () => main;",
            ),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));
    assert_eq!(summary(&tree), [("main", Category::Circular)]);
}

#[test]
fn test_shared_subtrees() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            (
                "src/main.ts",
                "import { left } from './left';\nimport { right } from './right';",
            ),
            ("src/left.ts", "import { shared } from './shared';\nexport const left = () => shared();"),
            ("src/right.ts", "import { shared } from './shared';\nexport const right = () => shared();"),
            ("src/shared.ts", "import { leaf } from './leaf';\nexport const shared = () => leaf();"),
            ("src/leaf.ts", "export const leaf = () => 1;"),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    let from_left = child(child(&tree, "left"), "shared");
    let from_right = child(child(&tree, "right"), "shared");
    assert_eq!(from_left.children, from_right.children);
    assert!(from_left.shares_children_with(from_right));
}

#[test]
fn test_build_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let entry = root.join("src/main.tsx");

    let first = GraphBuilder::new(&config).build_tree(&entry);
    let second = GraphBuilder::new(&config).build_tree(&entry);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_external_wins_over_alias() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", r#"{ "dependencies": { "@shared/ui": "1.0.0" } }"#),
            ("src/main.ts", "import { Button } from '@shared/ui';"),
            ("src/shared/ui.ts", "export const Button = 1;"),
        ],
    );
    let config = ProjectConfig::builder(&root)
        .framework(Framework::React)
        .alias("@shared", "src/shared")
        .build()
        .unwrap();
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    let button = child(&tree, "Button");
    assert_eq!(button.category, Category::External);
    assert_eq!(button.source_path, "@shared/ui");
}

#[test]
fn test_parse_failure_degrades_to_unknown() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            ("src/main.ts", "import { broken } from './broken';\nimport { ok } from './ok';"),
            ("src/broken.ts", "export const broken = (;"),
            ("src/ok.ts", "export const ok = 1;"),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    assert_eq!(
        summary(&tree),
        [("broken", Category::Unknown), ("ok", Category::Const)]
    );
}

#[test]
fn test_unparsable_entry_has_no_children() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[("package.json", "{}"), ("src/main.ts", "import {")]);
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));
    assert_eq!(tree.category, Category::Entry);
    assert!(tree.children.is_empty());
}

#[test]
fn test_namespace_and_barrel_re_exports() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            (
                "src/main.tsx",
                "import * as api from './api';\nimport { Header, Footer } from './components';",
            ),
            ("src/api.ts", "export const get = () => 1;"),
            (
                "src/components/index.ts",
                "export { Header } from './Header';\nexport * from './Footer';",
            ),
            ("src/components/Header.tsx", "export const Header = () => <header />;"),
            ("src/components/Footer.tsx", "export function Footer() { return <footer />; }"),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    assert_eq!(
        summary(&tree),
        [
            ("api", Category::Const),
            ("Header", Category::Component),
            ("Footer", Category::Component),
        ]
    );
    let barrel = child(&tree, "Header");
    assert_eq!(barrel.source_path, "src/components/index.ts");
    assert_eq!(
        summary(barrel),
        [("Header", Category::Component), ("*", Category::Const)]
    );
}

#[test]
fn test_vue_projects_yield_bare_entries() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", r#"{ "dependencies": { "vue": "3" } }"#),
            ("src/main.ts", "import App from './App.vue';"),
            ("src/App.vue", "<template><div /></template>"),
        ],
    );
    let config = ProjectConfig::builder(&root)
        .framework(Framework::Vue)
        .build()
        .unwrap();
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));
    assert_eq!(tree.category, Category::Entry);
    assert!(tree.children.is_empty());
}

#[test]
fn test_empty_forest_is_config_error() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let builder = GraphBuilder::new(&config);

    assert!(matches!(builder.build_forest(&[], |_| {}), Err(GraphError::NoEntries)));
    assert!(matches!(
        builder.build_forest_parallel(&[], |_| {}),
        Err(GraphError::NoEntries)
    ));
}

#[test]
fn test_forest_progress_and_order() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = react_config(&root);
    let builder = GraphBuilder::new(&config);
    let entries: Vec<PathBuf> = vec![
        root.join("src/main.tsx"),
        root.join("src/App.tsx"),
        root.join("src/components/Header.tsx"),
    ];

    let mut events = Vec::new();
    let sequential = builder
        .build_forest(&entries, |p| events.push((p.completed, p.total)))
        .unwrap();
    assert_eq!(events, [(1, 3), (2, 3), (3, 3)]);

    let mut completed = Vec::new();
    let parallel = builder
        .build_forest_parallel(&entries, |p| completed.push(p.completed))
        .unwrap();
    assert_eq!(completed, [1, 2, 3]);

    let names: Vec<_> = parallel.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["main.tsx", "App.tsx", "Header.tsx"]);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_base_dir_controls_source_paths() {
    let temp = TempDir::new().unwrap();
    let root = create_react_app(&temp);
    let config = ProjectConfig::builder(&root)
        .framework(Framework::React)
        .base_dir(root.join("src"))
        .build()
        .unwrap();
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.tsx"));

    assert_eq!(tree.source_path, "main.tsx");
    assert_eq!(child(&tree, "App").source_path, "App.tsx");
}

#[test]
fn test_type_import_from_declaration_file() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("package.json", "{}"),
            (
                "src/main.ts",
                "import type { Props } from './types';\nexport const render = (p: Props) => p.id;",
            ),
            ("src/types.d.ts", "export interface Props { id: string }"),
        ],
    );
    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    assert_eq!(summary(&tree), [("Props", Category::Interface)]);
    assert_eq!(child(&tree, "Props").source_path, "src/types.d.ts");
}

#[test]
fn test_diamond_chain_is_presented_once_per_file() {
    const LEVELS: usize = 24;

    let temp = TempDir::new().unwrap();
    let mut files: Vec<(String, String)> = vec![
        ("package.json".into(), "{}".into()),
        (
            "src/main.ts".into(),
            "import { left0 } from './left0';\nimport { right0 } from './right0';".into(),
        ),
    ];
    for level in 0..LEVELS {
        for side in ["left", "right"] {
            files.push((
                format!("src/{side}{level}.ts"),
                format!(
                    "import {{ join{level} }} from './join{level}';\nexport const {side}{level} = () => join{level}();"
                ),
            ));
        }
        let join = if level + 1 < LEVELS {
            let next = level + 1;
            format!(
                "import {{ left{next} }} from './left{next}';\nimport {{ right{next} }} from './right{next}';\nexport const join{level} = () => left{next}() + right{next}();"
            )
        } else {
            format!("export const join{level} = () => 1;")
        };
        files.push((format!("src/join{level}.ts"), join));
    }
    let files: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let root = create_test_project(&temp, &files);

    let config = react_config(&root);
    let tree = GraphBuilder::new(&config).build_tree(&root.join("src/main.ts"));

    let via_left = child(child(&tree, "left0"), "join0");
    let via_right = child(child(&tree, "right0"), "join0");
    assert!(via_left.shares_children_with(via_right));
    // Per level: left, join, right and the repeated join.
    assert_eq!(tree.node_count(), 1 + 4 * LEVELS);
    assert_eq!(tree.max_depth(), 2 * LEVELS);

    let json = serde_json::to_string(&tree.collapsed()).unwrap();
    assert!(json.len() < 20_000, "collapsed json is {} bytes", json.len());
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let right = &value["deps"][1];
    assert_eq!(right["name"], "right0");
    assert!(right.get("shared").is_none());
    assert_eq!(right["deps"][0]["name"], "join0");
    assert_eq!(right["deps"][0]["shared"], true);
}
