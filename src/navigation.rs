//! Preview of the in-game gatekeeper dialog. The dialog pages through at most
//! two levels below the main page: a category, then one nested group inside it.

use crate::model::{Child, Group, RootConfig, TeleportPoint};

const MAX_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState<'p> {
    Root,
    InGroup(&'p str),
    InNestedGroup(&'p str, &'p str),
}

/// What selecting an item did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Entered,
    Teleport(TeleportPoint),
    Ignored,
}

/// A button on the current dialog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem<'a> {
    Group(&'a Group),
    Point(&'a TeleportPoint),
}

impl<'a> MenuItem<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            MenuItem::Group(group) => &group.id,
            MenuItem::Point(point) => &point.id,
        }
    }

    pub fn label(&self) -> &'a str {
        match self {
            MenuItem::Group(group) => &group.name,
            MenuItem::Point(point) => &point.name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, MenuItem::Group(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    path: Vec<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn state(&self) -> NavState<'_> {
        match self.path.as_slice() {
            [] => NavState::Root,
            [group] => NavState::InGroup(group),
            [group, nested, ..] => NavState::InNestedGroup(group, nested),
        }
    }

    pub fn enter(&mut self, cfg: &RootConfig, id: &str) -> Selection {
        match self.state() {
            NavState::Root => {
                if cfg.category(id).is_some() {
                    self.path.push(id.to_string());
                    Selection::Entered
                } else {
                    Selection::Ignored
                }
            }
            NavState::InGroup(group_id) => {
                let Some(group) = cfg.category(group_id) else {
                    return Selection::Ignored;
                };
                match group.child(id) {
                    Some(Child::Group(_)) if self.depth() < MAX_DEPTH => {
                        self.path.push(id.to_string());
                        Selection::Entered
                    }
                    Some(Child::Point(point)) => Selection::Teleport(point.clone()),
                    _ => Selection::Ignored,
                }
            }
            NavState::InNestedGroup(..) => match self.current_nested(cfg) {
                Some(nested) => nested
                    .points()
                    .find(|point| point.id == id)
                    .map(|point| Selection::Teleport(point.clone()))
                    .unwrap_or(Selection::Ignored),
                None => Selection::Ignored,
            },
        }
    }

    pub fn back(&mut self) {
        self.path.pop();
    }

    pub fn home(&mut self) {
        self.path.clear();
    }

    /// Buttons on the current page. A path segment that no longer resolves
    /// yields an empty page.
    pub fn visible<'a>(&self, cfg: &'a RootConfig) -> Vec<MenuItem<'a>> {
        match self.state() {
            NavState::Root => cfg.categories.iter().map(MenuItem::Group).collect(),
            NavState::InGroup(group_id) => cfg
                .category(group_id)
                .map(|group| {
                    group
                        .children
                        .iter()
                        .map(|child| match child {
                            Child::Point(point) => MenuItem::Point(point),
                            Child::Group(nested) => MenuItem::Group(nested),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            NavState::InNestedGroup(..) => self
                .current_nested(cfg)
                .map(|nested| nested.points().map(MenuItem::Point).collect())
                .unwrap_or_default(),
        }
    }

    /// Breadcrumb of the entered groups' names, e.g. "Town Areas / Giran".
    pub fn title(&self, cfg: &RootConfig) -> String {
        let mut names = Vec::new();
        if let Some(first) = self.path.first() {
            if let Some(group) = cfg.category(first) {
                names.push(group.name.as_str());
                if let Some(Child::Group(nested)) =
                    self.path.get(1).and_then(|id| group.child(id))
                {
                    names.push(nested.name.as_str());
                }
            }
        }
        names.join(" / ")
    }

    fn current_nested<'a>(&self, cfg: &'a RootConfig) -> Option<&'a Group> {
        let [group_id, nested_id, ..] = self.path.as_slice() else {
            return None;
        };
        match cfg.category(group_id)?.child(nested_id)? {
            Child::Group(nested) => Some(nested),
            Child::Point(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{remove_entity, EntityPath};

    fn labels(nav: &Navigator, cfg: &RootConfig) -> Vec<String> {
        nav.visible(cfg).iter().map(|i| i.label().to_string()).collect()
    }

    #[test]
    fn test_root_shows_categories() {
        let cfg = RootConfig::seed();
        let nav = Navigator::new();
        assert_eq!(nav.state(), NavState::Root);
        assert_eq!(labels(&nav, &cfg), vec!["Town Areas"]);
    }

    #[test]
    fn test_enter_and_back_through_two_levels() {
        let cfg = RootConfig::seed();
        let mut nav = Navigator::new();

        assert_eq!(nav.enter(&cfg, "cat_1"), Selection::Entered);
        assert_eq!(labels(&nav, &cfg), vec!["Town Center", "Giran"]);

        assert_eq!(nav.enter(&cfg, "sub_1"), Selection::Entered);
        assert_eq!(nav.state(), NavState::InNestedGroup("cat_1", "sub_1"));
        assert_eq!(labels(&nav, &cfg), vec!["Weapon Shop"]);
        assert_eq!(nav.title(&cfg), "Town Areas / Giran");

        nav.back();
        assert_eq!(labels(&nav, &cfg), vec!["Town Center", "Giran"]);
    }

    #[test]
    fn test_point_selection_does_not_push() {
        let cfg = RootConfig::seed();
        let mut nav = Navigator::new();
        assert_eq!(nav.enter(&cfg, "tp_town_center"), Selection::Ignored);
        assert_eq!(nav.depth(), 0);

        nav.enter(&cfg, "cat_1");
        match nav.enter(&cfg, "tp_town_center") {
            Selection::Teleport(point) => assert_eq!(point.x, 82698),
            other => panic!("expected teleport, got {:?}", other),
        }
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_nested_page_only_lists_points() {
        let cfg = RootConfig::seed();
        let (cfg, _) =
            crate::model::add_group(&cfg, Some(&EntityPath::new(["cat_1", "sub_1"]))).unwrap();
        let mut nav = Navigator::new();
        nav.enter(&cfg, "cat_1");
        nav.enter(&cfg, "sub_1");
        assert_eq!(labels(&nav, &cfg), vec!["Weapon Shop"]);
        assert!(matches!(
            nav.enter(&cfg, "tp_weapon_shop"),
            Selection::Teleport(_)
        ));
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_back_and_home_at_root() {
        let cfg = RootConfig::seed();
        let mut nav = Navigator::new();
        nav.back();
        assert_eq!(nav.depth(), 0);

        nav.enter(&cfg, "cat_1");
        nav.enter(&cfg, "sub_1");
        nav.home();
        assert_eq!(nav.state(), NavState::Root);
        assert_eq!(labels(&nav, &cfg), vec!["Town Areas"]);
    }

    #[test]
    fn test_stale_path_yields_empty_page() {
        let cfg = RootConfig::seed();
        let mut nav = Navigator::new();
        nav.enter(&cfg, "cat_1");
        nav.enter(&cfg, "sub_1");

        let pruned = remove_entity(&cfg, &EntityPath::new(["cat_1", "sub_1"])).unwrap();
        assert!(nav.visible(&pruned).is_empty());
        assert_eq!(nav.enter(&pruned, "tp_weapon_shop"), Selection::Ignored);

        let emptied = remove_entity(&cfg, &EntityPath::new(["cat_1"])).unwrap();
        nav.back();
        assert!(nav.visible(&emptied).is_empty());
        assert_eq!(nav.title(&emptied), "");
    }
}
