//! `depviz detect`.

use std::path::PathBuf;

use depviz_detect::detect_project;
use depviz_graph::paths;

use crate::cli::DetectArgs;
use crate::error::Result;

/// Print the detected framework, build tool and entries to stdout.
pub fn execute(args: DetectArgs) -> Result<()> {
    let root = args.root.unwrap_or_else(|| PathBuf::from("."));
    let project = detect_project(&root, args.framework)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }

    println!("Framework:  {}", project.framework);
    println!("Build tool: {}", project.build_tool);
    println!("Entries:");
    for (i, entry) in project.entries.iter().enumerate() {
        println!("  {}. {}", i + 1, paths::relative_slash(entry, &project.root));
    }
    Ok(())
}
