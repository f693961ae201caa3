//! Structural edits. Every operation clones the input document, edits the
//! clone and hands it back; on error the caller keeps its original value.

use super::walk::{group_mut, EntityKind};
use super::{
    Child, EntityPath, Group, ModelError, ModelResult, RootConfig, TeleportPoint,
    DEFAULT_CATEGORY_NAME, DEFAULT_POINT_NAME, DEFAULT_SUB_GROUP_NAME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    NpcId,
    NpcName,
    NpcTitle,
    SkinId,
}

impl MetaField {
    pub fn label(&self) -> &'static str {
        match self {
            MetaField::NpcId => "NPC ID",
            MetaField::NpcName => "NPC Name",
            MetaField::NpcTitle => "NPC Title",
            MetaField::SkinId => "Skin ID",
        }
    }

    pub fn read<'a>(&self, cfg: &'a RootConfig) -> &'a str {
        match self {
            MetaField::NpcId => &cfg.npc_id,
            MetaField::NpcName => &cfg.npc_name,
            MetaField::NpcTitle => &cfg.npc_title,
            MetaField::SkinId => cfg.skin_id.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Partial update for a point or group. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub z: Option<i32>,
    pub price: Option<i64>,
}

impl EntityPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn coords(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Self::default()
        }
    }

    pub fn price(price: i64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    /// First point-only field carried by the patch, if any.
    fn point_only_field(&self) -> Option<&'static str> {
        if self.x.is_some() {
            Some("x")
        } else if self.y.is_some() {
            Some("y")
        } else if self.z.is_some() {
            Some("z")
        } else if self.price.is_some() {
            Some("price")
        } else {
            None
        }
    }

    fn apply_to_point(&self, point: &mut TeleportPoint) {
        if let Some(name) = &self.name {
            point.name = name.clone();
        }
        if let Some(x) = self.x {
            point.x = x;
        }
        if let Some(y) = self.y {
            point.y = y;
        }
        if let Some(z) = self.z {
            point.z = z;
        }
        if let Some(price) = self.price {
            point.price = price;
        }
    }
}

pub fn update_meta(cfg: &RootConfig, field: MetaField, value: &str) -> RootConfig {
    let mut next = cfg.clone();
    match field {
        MetaField::NpcId => next.npc_id = value.to_string(),
        MetaField::NpcName => next.npc_name = value.to_string(),
        MetaField::NpcTitle => next.npc_title = value.to_string(),
        MetaField::SkinId => {
            next.skin_id = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
    }
    next
}

/// Appends a new group to the root sequence, or to the children of the
/// group at `parent`.
pub fn add_group(
    cfg: &RootConfig,
    parent: Option<&EntityPath>,
) -> ModelResult<(RootConfig, EntityPath)> {
    let mut next = cfg.clone();
    match parent {
        None => {
            let group = Group::new(DEFAULT_CATEGORY_NAME);
            let path = EntityPath::new([group.id.as_str()]);
            next.categories.push(group);
            Ok((next, path))
        }
        Some(parent) => {
            let target = group_mut(&mut next, parent.segments())
                .ok_or_else(|| ModelError::NotFound(parent.to_string()))?;
            let group = Group::new(DEFAULT_SUB_GROUP_NAME);
            let path = parent.child(group.id.as_str());
            target.children.push(Child::Group(group));
            Ok((next, path))
        }
    }
}

pub fn add_point(cfg: &RootConfig, parent: &EntityPath) -> ModelResult<(RootConfig, EntityPath)> {
    let mut next = cfg.clone();
    let target = group_mut(&mut next, parent.segments())
        .ok_or_else(|| ModelError::NotFound(parent.to_string()))?;
    let point = TeleportPoint::new(DEFAULT_POINT_NAME);
    let path = parent.child(point.id.as_str());
    target.children.push(Child::Point(point));
    Ok((next, path))
}

pub fn remove_entity(cfg: &RootConfig, path: &EntityPath) -> ModelResult<RootConfig> {
    let not_found = || ModelError::NotFound(path.to_string());
    let id = path.last().ok_or_else(not_found)?;
    let mut next = cfg.clone();
    match path.parent() {
        None => {
            let before = next.categories.len();
            next.categories.retain(|group| group.id != id);
            if next.categories.len() == before {
                return Err(not_found());
            }
        }
        Some(parent) => {
            let group = group_mut(&mut next, parent.segments()).ok_or_else(not_found)?;
            let index = group
                .children
                .iter()
                .position(|child| child.id() == id)
                .ok_or_else(not_found)?;
            group.children.remove(index);
        }
    }
    Ok(next)
}

pub fn update_entity(
    cfg: &RootConfig,
    path: &EntityPath,
    patch: &EntityPatch,
) -> ModelResult<RootConfig> {
    let not_found = || ModelError::NotFound(path.to_string());
    let id = path.last().ok_or_else(not_found)?;
    let mut next = cfg.clone();

    // A single-segment path always names a category.
    let Some(parent) = path.parent() else {
        let group = group_mut(&mut next, path.segments()).ok_or_else(not_found)?;
        rename_group(group, patch)?;
        return Ok(next);
    };

    let parent_group = group_mut(&mut next, parent.segments()).ok_or_else(not_found)?;
    match parent_group
        .children
        .iter_mut()
        .find(|child| child.id() == id)
        .ok_or_else(not_found)?
    {
        Child::Point(point) => patch.apply_to_point(point),
        Child::Group(group) => rename_group(group, patch)?,
    }
    Ok(next)
}

fn rename_group(group: &mut Group, patch: &EntityPatch) -> ModelResult<()> {
    if let Some(field) = patch.point_only_field() {
        return Err(ModelError::TypeMismatch {
            field,
            kind: EntityKind::Group,
        });
    }
    if let Some(name) = &patch.name {
        group.name = name.clone();
    }
    Ok(())
}

/// Swaps the entity with its neighbour in the same parent sequence. Moving
/// past either end returns the document unchanged.
pub fn move_sibling(
    cfg: &RootConfig,
    path: &EntityPath,
    direction: Direction,
) -> ModelResult<RootConfig> {
    let not_found = || ModelError::NotFound(path.to_string());
    let id = path.last().ok_or_else(not_found)?;
    let mut next = cfg.clone();
    match path.parent() {
        None => {
            let index = next
                .categories
                .iter()
                .position(|group| group.id == id)
                .ok_or_else(not_found)?;
            swap_adjacent(&mut next.categories, index, direction);
        }
        Some(parent) => {
            let group = group_mut(&mut next, parent.segments()).ok_or_else(not_found)?;
            let index = group
                .children
                .iter()
                .position(|child| child.id() == id)
                .ok_or_else(not_found)?;
            swap_adjacent(&mut group.children, index, direction);
        }
    }
    Ok(next)
}

fn swap_adjacent<T>(items: &mut [T], index: usize, direction: Direction) {
    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&i| i < items.len()),
    };
    if let Some(target) = target {
        items.swap(index, target);
    }
}
