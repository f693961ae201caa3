use gk_architect::model::{flatten, EntityKind, EntityPath, RootConfig};
use std::collections::HashSet;

/// Render a document as an indented outline for comparisons and snapshots
#[allow(dead_code)]
pub fn outline(cfg: &RootConfig) -> String {
    let mut result = String::new();
    for row in flatten(cfg) {
        result.push_str(&"  ".repeat(row.depth));
        match row.kind {
            EntityKind::Group => result.push_str(&format!("[{}]", row.name)),
            EntityKind::Point => result.push_str(&row.name),
        }
        result.push('\n');
    }
    result
}

/// Panics when two entities share an identifier
#[allow(dead_code)]
pub fn assert_unique_ids(cfg: &RootConfig) {
    let ids = cfg.all_ids();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids in {:?}", ids);
}

/// Every path in the document, in outline order
#[allow(dead_code)]
pub fn all_paths(cfg: &RootConfig) -> Vec<(EntityPath, EntityKind)> {
    flatten(cfg)
        .into_iter()
        .map(|row| (row.path, row.kind))
        .collect()
}
