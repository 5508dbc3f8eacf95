//! World container for entities
//!
//! The World owns every entity of a level and advances them together.

use slotmap::{new_key_type, SlotMap};

use crate::entity::{Entity, Thinkable};

new_key_type! {
    /// Key to an entity in the world
    ///
    /// Generational: a key to a removed entity stays invalid even after its
    /// slot is reused.
    pub struct EntityKey;
}

/// All entities of a level, plus which one the player drives
#[derive(Clone, Debug, Default)]
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
    avatar: Option<EntityKey>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
            avatar: None,
        }
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity; clears the avatar if it was the one removed
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        if self.avatar == Some(key) {
            self.avatar = None;
        }
        self.entities.remove(key)
    }

    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.name.as_deref() == Some(name))
    }

    /// Mark an entity as the player's car
    ///
    /// Returns false (and changes nothing) if the key is unknown.
    pub fn set_avatar(&mut self, key: EntityKey) -> bool {
        if self.entities.contains_key(key) {
            self.avatar = Some(key);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn avatar_key(&self) -> Option<EntityKey> {
        self.avatar
    }

    pub fn avatar(&self) -> Option<&Entity> {
        self.avatar.and_then(|key| self.entities.get(key))
    }

    pub fn avatar_mut(&mut self) -> Option<&mut Entity> {
        self.avatar.and_then(|key| self.entities.get_mut(key))
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all entities with their keys
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
        self.avatar = None;
    }
}

impl Thinkable for World {
    /// Advance every entity by `dt`
    fn think(&mut self, dt: f32) {
        for entity in self.entities.values_mut() {
            entity.think(dt);
        }
    }
}
