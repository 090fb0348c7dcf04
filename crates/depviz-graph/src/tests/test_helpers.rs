//! Shared test utilities for graph tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Category, DependencyNode, Framework, ProjectConfig};

/// Create a test project with the given files.
///
/// # Arguments
/// * `temp` - Temporary directory
/// * `files` - Array of (path, content) tuples
///
/// # Returns
/// The root path of the created project
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create parent directory for {path}: {e}"));
        }
        fs::write(&file_path, content).unwrap_or_else(|e| panic!("Failed to write file {path}: {e}"));
    }

    root
}

/// Load a React project configuration for `root`.
pub fn react_config(root: &Path) -> ProjectConfig {
    ProjectConfig::builder(root)
        .framework(Framework::React)
        .build()
        .expect("project config")
}

/// Child of `node` by name; panics with the available names if absent.
pub fn child<'a>(node: &'a DependencyNode, name: &str) -> &'a DependencyNode {
    node.children
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names: Vec<_> = node.children.iter().map(|c| c.name.as_str()).collect();
            panic!("no child '{name}' under '{}', have {names:?}", node.name)
        })
}

/// `(name, category)` pairs of the direct children.
pub fn summary(node: &DependencyNode) -> Vec<(&str, Category)> {
    node.children
        .iter()
        .map(|c| (c.name.as_str(), c.category))
        .collect()
}

/// A small React app exercising every category.
pub fn create_react_app(temp: &TempDir) -> PathBuf {
    create_test_project(
        temp,
        &[
            (
                "package.json",
                r#"{ "dependencies": { "react": "18.2.0", "lodash": "4.17.21" } }"#,
            ),
            (
                "tsconfig.json",
                r#"{
                    // path aliases
                    "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } },
                }"#,
            ),
            (".depvizignore", "src/legacy/\n"),
            (
                "src/main.tsx",
                r#"
                import React from 'react';
                import { debounce } from 'lodash';
                import App from './App';
                import styles from './app.module.scss';
                import logo from './assets/logo.svg';
                import { Old } from './legacy/Old';
                import { missing } from './nowhere';
                import { Color } from '@/types';
                "#,
            ),
            (
                "src/App.tsx",
                r#"
                import { useCounter } from './hooks/useCounter';
                import { Header } from '@/components/Header';
                export default function App() {
                    const count = useCounter();
                    return <Header count={count} />;
                }
                "#,
            ),
            (
                "src/hooks/useCounter.ts",
                r#"
                import { useState } from 'react';
                import { clamp } from '../utils/math';
                export function useCounter() {
                    const [n] = useState(0);
                    return clamp(n);
                }
                "#,
            ),
            (
                "src/components/Header.tsx",
                r#"
                import { clamp } from '../utils/math';
                import type { HeaderProps } from '../types';
                export const Header = ({ count }: HeaderProps) => <h1>{clamp(count)}</h1>;
                "#,
            ),
            (
                "src/utils/math.ts",
                r#"
                export const MAX = 10;
                export const clamp = (n: number) => Math.min(n, MAX);
                "#,
            ),
            (
                "src/types.ts",
                r#"
                export enum Color { Red, Blue }
                export interface HeaderProps { count: number }
                "#,
            ),
            ("src/app.module.scss", ".app { color: red; }"),
            ("src/assets/logo.svg", "<svg />"),
            ("src/legacy/Old.tsx", "export const Old = () => null;"),
        ],
    )
}
