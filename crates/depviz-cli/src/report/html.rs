//! HTML report through a minijinja template.
//!
//! Trees are flattened into indented rows before rendering, with children
//! ordered by category rank (stable, so source order breaks ties). A shared
//! subtree is expanded at its first row and later rows point back to it.
//! The `.html` template name turns on minijinja's HTML auto-escaping.

use depviz_graph::{DependencyNode, SeenSubtrees};
use minijinja::{context, Environment};
use serde::Serialize;

const TEMPLATE_NAME: &str = "report.html";
const TEMPLATE: &str = include_str!("../../templates/report.html");

/// Pixels of indentation per tree level.
const INDENT_PX: usize = 20;

#[derive(Debug, Serialize)]
struct EntryView {
    header: String,
    rows: Vec<RowView>,
}

#[derive(Debug, Serialize)]
struct RowView {
    label: String,
    category: &'static str,
    indent: usize,
    /// Children were already listed at an earlier row.
    shared: bool,
}

/// Render the forest as a standalone HTML page.
pub fn render_html(trees: &[DependencyNode]) -> Result<String, minijinja::Error> {
    let entries: Vec<EntryView> = trees
        .iter()
        .map(|tree| {
            let mut rows = Vec::new();
            flatten(tree, 0, &mut SeenSubtrees::new(), &mut rows);
            EntryView {
                header: tree.source_path.clone(),
                rows,
            }
        })
        .collect();

    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    env.get_template(TEMPLATE_NAME)?
        .render(context! { entries => entries })
}

fn flatten(
    node: &DependencyNode,
    depth: usize,
    seen: &mut SeenSubtrees,
    rows: &mut Vec<RowView>,
) {
    let expand = seen.should_expand(node);
    rows.push(RowView {
        label: format!("{} from {}", node.name, node.source_path),
        category: node.category.as_str(),
        indent: depth * INDENT_PX,
        shared: !expand,
    });
    if !expand {
        return;
    }

    let mut children: Vec<&DependencyNode> = node.children.iter().collect();
    children.sort_by_key(|child| child.category.rank());
    for child in children {
        flatten(child, depth + 1, seen, rows);
    }
}
