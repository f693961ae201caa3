//! The editable gatekeeper document: NPC metadata plus an ordered tree of
//! teleport categories, nested groups and points.

mod ops;
mod walk;

pub use ops::{
    add_group, add_point, move_sibling, remove_entity, update_entity, update_meta, Direction,
    EntityPatch, MetaField,
};
pub use walk::{flatten, EntityKind, EntityRef, OutlineRow};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_CATEGORY_NAME: &str = "New Category";
pub const DEFAULT_SUB_GROUP_NAME: &str = "New Sub-Category";
pub const DEFAULT_POINT_NAME: &str = "New Spot";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("No entity found at path {0}")]
    NotFound(String),

    #[error("Field `{field}` does not apply to a {kind}")]
    TypeMismatch { field: &'static str, kind: EntityKind },
}

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeleportPoint {
    pub id: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub price: i64,
}

impl TeleportPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: mint_id("pt"),
            name: name.into(),
            x: 0,
            y: 0,
            z: 0,
            price: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(rename = "items", default)]
    pub children: Vec<Child>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: mint_id("grp"),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Direct children that are points, in sibling order.
    pub fn points(&self) -> impl Iterator<Item = &TeleportPoint> {
        self.children.iter().filter_map(|child| match child {
            Child::Point(point) => Some(point),
            Child::Group(_) => None,
        })
    }

    pub fn child(&self, id: &str) -> Option<&Child> {
        self.children.iter().find(|child| child.id() == id)
    }
}

/// A slot in a group's ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Child {
    Point(TeleportPoint),
    Group(Group),
}

impl Child {
    pub fn id(&self) -> &str {
        match self {
            Child::Point(point) => &point.id,
            Child::Group(group) => &group.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Child::Point(point) => &point.name,
            Child::Group(group) => &group.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Child::Point(_) => EntityKind::Point,
            Child::Group(_) => EntityKind::Group,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootConfig {
    pub npc_id: String,
    pub npc_name: String,
    pub npc_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_id: Option<String>,
    #[serde(default)]
    pub categories: Vec<Group>,
}

impl RootConfig {
    /// The document every new session starts from when nothing is persisted.
    pub fn seed() -> Self {
        Self {
            npc_id: "90001".to_string(),
            npc_name: "Global Gatekeeper".to_string(),
            npc_title: "Teleporter".to_string(),
            skin_id: Some("20001".to_string()),
            categories: vec![Group {
                id: "cat_1".to_string(),
                name: "Town Areas".to_string(),
                children: vec![
                    Child::Point(TeleportPoint {
                        id: "tp_town_center".to_string(),
                        name: "Town Center".to_string(),
                        x: 82698,
                        y: 148638,
                        z: -3473,
                        price: 0,
                    }),
                    Child::Group(Group {
                        id: "sub_1".to_string(),
                        name: "Giran".to_string(),
                        children: vec![Child::Point(TeleportPoint {
                            id: "tp_weapon_shop".to_string(),
                            name: "Weapon Shop".to_string(),
                            x: 82220,
                            y: 149200,
                            z: -3470,
                            price: 0,
                        })],
                    }),
                ],
            }],
        }
    }

    pub fn empty(npc_id: impl Into<String>) -> Self {
        Self {
            npc_id: npc_id.into(),
            npc_name: String::new(),
            npc_title: String::new(),
            skin_id: None,
            categories: Vec::new(),
        }
    }

    pub fn category(&self, id: &str) -> Option<&Group> {
        self.categories.iter().find(|group| group.id == id)
    }
}

/// Identifiers of the entities from a top-level category down to the
/// addressed entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EntityPath(Vec<String>);

impl EntityPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<EntityPath> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(EntityPath(rest.to_vec())),
            _ => None,
        }
    }

    pub fn child(&self, id: impl Into<String>) -> EntityPath {
        let mut segments = self.0.clone();
        segments.push(id.into());
        EntityPath(segments)
    }
}

impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}

fn mint_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
