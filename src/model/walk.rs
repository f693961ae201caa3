use super::{Child, EntityPath, Group, RootConfig, TeleportPoint};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Group,
    Point,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Group => write!(f, "group"),
            EntityKind::Point => write!(f, "point"),
        }
    }
}

/// Borrowed view of whatever an [`EntityPath`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    Group(&'a Group),
    Point(&'a TeleportPoint),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            EntityRef::Group(group) => &group.id,
            EntityRef::Point(point) => &point.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Group(group) => &group.name,
            EntityRef::Point(point) => &point.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Group(_) => EntityKind::Group,
            EntityRef::Point(_) => EntityKind::Point,
        }
    }
}

impl<'a> From<&'a Child> for EntityRef<'a> {
    fn from(child: &'a Child) -> Self {
        match child {
            Child::Point(point) => EntityRef::Point(point),
            Child::Group(group) => EntityRef::Group(group),
        }
    }
}

/// One line of the depth-first outline of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub path: EntityPath,
    pub depth: usize,
    pub kind: EntityKind,
    pub name: String,
}

impl RootConfig {
    pub fn resolve(&self, path: &EntityPath) -> Option<EntityRef<'_>> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = EntityRef::Group(self.category(first)?);
        for segment in rest {
            current = match current {
                EntityRef::Group(group) => group.child(segment)?.into(),
                EntityRef::Point(_) => return None,
            };
        }
        Some(current)
    }

    pub fn resolve_group(&self, path: &EntityPath) -> Option<&Group> {
        match self.resolve(path)? {
            EntityRef::Group(group) => Some(group),
            EntityRef::Point(_) => None,
        }
    }

    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for group in &self.categories {
            collect_ids(group, &mut ids);
        }
        ids
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.all_ids().contains(&id)
    }

    /// Returns true when no identifier appears twice anywhere in the tree.
    pub fn ids_are_unique(&self) -> bool {
        let ids = self.all_ids();
        let distinct: HashSet<&str> = ids.iter().copied().collect();
        distinct.len() == ids.len()
    }
}

fn collect_ids<'a>(group: &'a Group, ids: &mut Vec<&'a str>) {
    ids.push(&group.id);
    for child in &group.children {
        match child {
            Child::Point(point) => ids.push(&point.id),
            Child::Group(nested) => collect_ids(nested, ids),
        }
    }
}

/// Depth-first outline of every entity, in sibling order.
pub fn flatten(cfg: &RootConfig) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    for group in &cfg.categories {
        flatten_group(group, EntityPath::new([group.id.as_str()]), 0, &mut rows);
    }
    rows
}

fn flatten_group(group: &Group, path: EntityPath, depth: usize, rows: &mut Vec<OutlineRow>) {
    rows.push(OutlineRow {
        path: path.clone(),
        depth,
        kind: EntityKind::Group,
        name: group.name.clone(),
    });
    for child in &group.children {
        let child_path = path.child(child.id());
        match child {
            Child::Point(point) => rows.push(OutlineRow {
                path: child_path,
                depth: depth + 1,
                kind: EntityKind::Point,
                name: point.name.clone(),
            }),
            Child::Group(nested) => flatten_group(nested, child_path, depth + 1, rows),
        }
    }
}

pub(super) fn group_mut<'a>(cfg: &'a mut RootConfig, path: &[String]) -> Option<&'a mut Group> {
    let (first, rest) = path.split_first()?;
    let mut group = cfg.categories.iter_mut().find(|g| &g.id == first)?;
    for segment in rest {
        group = match group.children.iter_mut().find(|c| c.id() == segment) {
            Some(Child::Group(nested)) => nested,
            _ => return None,
        };
    }
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_through_nested_group() {
        let cfg = RootConfig::seed();
        let path = EntityPath::new(["cat_1", "sub_1", "tp_weapon_shop"]);
        let found = cfg.resolve(&path).unwrap();
        assert_eq!(found.kind(), EntityKind::Point);
        assert_eq!(found.name(), "Weapon Shop");
    }

    #[test]
    fn test_resolve_rejects_descent_through_point() {
        let cfg = RootConfig::seed();
        let path = EntityPath::new(["cat_1", "tp_town_center", "anything"]);
        assert!(cfg.resolve(&path).is_none());
        assert!(cfg.resolve(&EntityPath::default()).is_none());
    }

    #[test]
    fn test_resolve_group_ignores_points() {
        let cfg = RootConfig::seed();
        assert!(cfg
            .resolve_group(&EntityPath::new(["cat_1", "tp_town_center"]))
            .is_none());
        assert!(cfg
            .resolve_group(&EntityPath::new(["cat_1", "sub_1"]))
            .is_some());
    }

    #[test]
    fn test_all_ids_in_document_order() {
        let cfg = RootConfig::seed();
        assert_eq!(
            cfg.all_ids(),
            vec!["cat_1", "tp_town_center", "sub_1", "tp_weapon_shop"]
        );
        assert!(cfg.ids_are_unique());
    }

    #[test]
    fn test_flatten_depths() {
        let rows = flatten(&RootConfig::seed());
        let summary: Vec<_> = rows.iter().map(|r| (r.depth, r.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (0, "Town Areas"),
                (1, "Town Center"),
                (1, "Giran"),
                (2, "Weapon Shop"),
            ]
        );
        assert_eq!(
            rows[3].path,
            EntityPath::new(["cat_1", "sub_1", "tp_weapon_shop"])
        );
    }
}
