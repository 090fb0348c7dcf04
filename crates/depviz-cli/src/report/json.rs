use depviz_graph::{CollapsedTree, DependencyNode};

/// The forest as pretty-printed JSON (`name`, `type`, `filePath`, `deps`).
///
/// Each tree collapses its shared subtrees: repeats carry `"shared": true`
/// and empty `deps`.
pub fn render_json(trees: &[DependencyNode]) -> serde_json::Result<String> {
    let trees: Vec<CollapsedTree<'_>> = trees.iter().map(DependencyNode::collapsed).collect();
    serde_json::to_string_pretty(&trees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depviz_graph::Category;
    use serde_json::Value;
    use std::sync::Arc;

    #[test]
    fn test_json_shape() {
        let tree = DependencyNode::with_children(
            "main.tsx",
            Category::Entry,
            "src/main.tsx",
            vec![DependencyNode::leaf("react", Category::External, "react")].into(),
        );
        let json: Value = serde_json::from_str(&render_json(&[tree]).unwrap()).unwrap();

        assert_eq!(json[0]["name"], "main.tsx");
        assert_eq!(json[0]["type"], "entry");
        assert_eq!(json[0]["deps"][0]["type"], "external");
        assert_eq!(json[0]["deps"][0]["filePath"], "react");
        assert!(json[0]["deps"][0]["deps"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_shared_subtree_written_once() {
        let shared: Arc<[DependencyNode]> =
            Arc::from(vec![DependencyNode::leaf("format", Category::Function, "src/format.ts")]);
        let tree = DependencyNode::with_children(
            "main.tsx",
            Category::Entry,
            "src/main.tsx",
            vec![
                DependencyNode::with_children(
                    "Price",
                    Category::Component,
                    "src/Price.tsx",
                    Arc::clone(&shared),
                ),
                DependencyNode::with_children("Total", Category::Component, "src/Total.tsx", shared),
            ]
            .into(),
        );
        let json: Value = serde_json::from_str(&render_json(&[tree.clone(), tree]).unwrap()).unwrap();

        for entry in json.as_array().unwrap() {
            assert_eq!(entry["deps"][0]["deps"][0]["name"], "format");
            assert_eq!(entry["deps"][1]["shared"], true);
            assert!(entry["deps"][1]["deps"].as_array().unwrap().is_empty());
        }
    }
}
