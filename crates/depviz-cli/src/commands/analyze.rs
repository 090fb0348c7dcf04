//! `depviz analyze`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use depviz_detect::{detect_framework, detect_project, load_dependencies};
use depviz_graph::{paths, DependencyNode, Framework, GraphBuilder, ProjectConfig};

use crate::cli::AnalyzeArgs;
use crate::config::DepvizConfig;
use crate::error::{CliError, Result};
use crate::report::write_report;
use crate::ui::{self, AnalyzeProgress, RunSummary};

/// Run an analysis with the layered configuration for `args`.
pub fn execute(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let config = DepvizConfig::load(&args)?;
    run(&config, quiet).map(|_| ())
}

/// Analyze with a loaded configuration and return the trees.
pub fn run(config: &DepvizConfig, quiet: bool) -> Result<Vec<DependencyNode>> {
    let started = Instant::now();
    let root = paths::normalize(&config.root);
    let (framework, entries) = resolve_entries(config, &root)?;

    if !quiet {
        let list: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("  {}. {}", i + 1, paths::relative_slash(entry, &root)))
            .collect();
        ui::info(&format!("Detected entries ({framework}):\n{}", list.join("\n")));
    }

    let project = project_config(config, &root, framework)?;
    let graph = GraphBuilder::new(&project);

    let progress = AnalyzeProgress::new(entries.len(), !quiet);
    let trees = if config.parallel {
        graph.build_forest_parallel(&entries, |event| progress.tick(&event))?
    } else {
        graph.build_forest(&entries, |event| progress.tick(&event))?
    };
    progress.finish();

    write_report(&trees, config.format, &config.out)?;

    if !quiet {
        ui::print_summary(&RunSummary {
            entries: trees.len(),
            nodes: trees.iter().map(DependencyNode::node_count).sum(),
            max_depth: trees.iter().map(DependencyNode::max_depth).max().unwrap_or(0),
            elapsed: started.elapsed(),
            output: config.out.clone(),
        });
        ui::success(&format!("{} has been generated", config.out.display()));
    }

    Ok(trees)
}

/// Explicit entries (framework from the override or package.json), or the
/// detected ones.
fn resolve_entries(config: &DepvizConfig, root: &Path) -> Result<(Framework, Vec<PathBuf>)> {
    if config.entries.is_empty() {
        let detected = detect_project(root, config.framework)?;
        return Ok((detected.framework, detected.entries));
    }

    let framework = match config.framework {
        Some(framework) => framework,
        None => detect_framework(&load_dependencies(root)?, None),
    };

    let mut entries = Vec::with_capacity(config.entries.len());
    for entry in config.entry_paths() {
        let entry = paths::normalize(&entry);
        if !entry.is_file() {
            return Err(CliError::FileNotFound(entry));
        }
        entries.push(entry);
    }
    Ok((framework, entries))
}

fn project_config(config: &DepvizConfig, root: &Path, framework: Framework) -> Result<ProjectConfig> {
    let mut builder = ProjectConfig::builder(root)
        .framework(framework)
        .ignore_file(config.ignore_file.as_str());
    if let Some(base_dir) = config.base_dir_path() {
        builder = builder.base_dir(base_dir);
    }
    for (pattern, target) in &config.aliases {
        builder = builder.alias(pattern.as_str(), target.as_str());
    }
    Ok(builder.build()?)
}
