//! Entity store.
//!
//! Wraps a `hecs::World` behind stable, never-reused [`EntityId`]s. Every
//! component kind implements [`Component`], which ties the Rust type to a
//! [`ComponentKey`] so systems can ask for "all entities holding these
//! keys" in ascending id order.
//!
//! hecs borrows whole archetype columns at runtime. Copy values out (or
//! drop the returned guard) before mutating another entity of the same
//! kind.

use std::collections::BTreeMap;

use hecs::{Ref, RefMut};

use lightspeed_core::components::*;
use lightspeed_core::types::EntityId;

use crate::history::History;

/// Key of a component table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKey {
    Transform,
    Movement,
    Ship,
    Route,
    RouteFollower,
    Missile,
    Owner,
    History,
    Heat,
    Destroyed,
}

impl ComponentKey {
    pub const ALL: [ComponentKey; 10] = [
        ComponentKey::Transform,
        ComponentKey::Movement,
        ComponentKey::Ship,
        ComponentKey::Route,
        ComponentKey::RouteFollower,
        ComponentKey::Missile,
        ComponentKey::Owner,
        ComponentKey::History,
        ComponentKey::Heat,
        ComponentKey::Destroyed,
    ];
}

/// A value that can live in the store.
pub trait Component: hecs::Component {
    const KEY: ComponentKey;
}

macro_rules! component_keys {
    ($($ty:ty => $key:ident),* $(,)?) => {
        $(impl Component for $ty {
            const KEY: ComponentKey = ComponentKey::$key;
        })*
    };
}

component_keys! {
    Transform => Transform,
    Movement => Movement,
    Ship => Ship,
    Route => Route,
    RouteFollower => RouteFollower,
    Missile => Missile,
    Owner => Owner,
    History => History,
    Heat => Heat,
    Destroyed => Destroyed,
}

/// The entity store of one room.
#[derive(Default)]
pub struct World {
    inner: hecs::World,
    handles: BTreeMap<EntityId, hecs::Entity>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id. The first id is 1.
    pub fn new_entity(&mut self) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        let entity = self.inner.spawn(());
        self.handles.insert(id, entity);
        id
    }

    fn handle(&self, id: EntityId) -> Option<hecs::Entity> {
        self.handles.get(&id).copied()
    }

    /// Attach `value` to `id`. Ids not issued by [`World::new_entity`], or
    /// already removed, are ignored.
    pub fn set_component<T: Component>(&mut self, id: EntityId, value: T) {
        if let Some(entity) = self.handle(id) {
            let _ = self.inner.insert_one(entity, value);
        }
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<Ref<'_, T>> {
        self.inner.get::<&T>(self.handle(id)?).ok()
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<RefMut<'_, T>> {
        self.inner.get::<&mut T>(self.handle(id)?).ok()
    }

    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> Option<T> {
        let entity = self.handle(id)?;
        self.inner.remove_one::<T>(entity).ok()
    }

    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.has_key(id, T::KEY)
    }

    pub fn has_key(&self, id: EntityId, key: ComponentKey) -> bool {
        let Some(entity) = self.handle(id) else {
            return false;
        };
        let Ok(entry) = self.inner.entity(entity) else {
            return false;
        };
        match key {
            ComponentKey::Transform => entry.has::<Transform>(),
            ComponentKey::Movement => entry.has::<Movement>(),
            ComponentKey::Ship => entry.has::<Ship>(),
            ComponentKey::Route => entry.has::<Route>(),
            ComponentKey::RouteFollower => entry.has::<RouteFollower>(),
            ComponentKey::Missile => entry.has::<Missile>(),
            ComponentKey::Owner => entry.has::<Owner>(),
            ComponentKey::History => entry.has::<History>(),
            ComponentKey::Heat => entry.has::<Heat>(),
            ComponentKey::Destroyed => entry.has::<Destroyed>(),
        }
    }

    /// Purge an entity from every table.
    pub fn remove_entity(&mut self, id: EntityId) {
        if let Some(entity) = self.handles.remove(&id) {
            let _ = self.inner.despawn(entity);
        }
    }

    /// True when the entity holds at least one component.
    pub fn exists(&self, id: EntityId) -> bool {
        ComponentKey::ALL.iter().any(|&key| self.has_key(id, key))
    }

    /// Ids holding every key in `required`, ascending.
    pub fn ids_with(&self, required: &[ComponentKey]) -> Vec<EntityId> {
        self.handles
            .keys()
            .copied()
            .filter(|&id| required.iter().all(|&key| self.has_key(id, key)))
            .collect()
    }

    /// Visit every entity holding all `required` keys, in ascending id order.
    pub fn for_each(&self, required: &[ComponentKey], mut f: impl FnMut(EntityId)) {
        for id in self.handles.keys().copied() {
            if required.iter().all(|&key| self.has_key(id, key)) {
                f(id);
            }
        }
    }

    /// Number of allocated ids still present.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    // --- Typed accessors ---

    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        self.get::<Transform>(id).map(|t| *t)
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<RefMut<'_, Transform>> {
        self.get_mut::<Transform>(id)
    }

    pub fn movement(&self, id: EntityId) -> Option<Movement> {
        self.get::<Movement>(id).map(|m| *m)
    }

    pub fn ship(&self, id: EntityId) -> Option<Ship> {
        self.get::<Ship>(id).map(|s| *s)
    }

    pub fn ship_mut(&mut self, id: EntityId) -> Option<RefMut<'_, Ship>> {
        self.get_mut::<Ship>(id)
    }

    pub fn route(&self, id: EntityId) -> Option<Ref<'_, Route>> {
        self.get::<Route>(id)
    }

    pub fn route_mut(&mut self, id: EntityId) -> Option<RefMut<'_, Route>> {
        self.get_mut::<Route>(id)
    }

    pub fn route_follower(&self, id: EntityId) -> Option<RouteFollower> {
        self.get::<RouteFollower>(id).map(|f| *f)
    }

    pub fn route_follower_mut(&mut self, id: EntityId) -> Option<RefMut<'_, RouteFollower>> {
        self.get_mut::<RouteFollower>(id)
    }

    pub fn missile(&self, id: EntityId) -> Option<Missile> {
        self.get::<Missile>(id).map(|m| *m)
    }

    pub fn missile_mut(&mut self, id: EntityId) -> Option<RefMut<'_, Missile>> {
        self.get_mut::<Missile>(id)
    }

    /// Owning player id.
    pub fn owner(&self, id: EntityId) -> Option<String> {
        self.get::<Owner>(id).map(|o| o.player_id.clone())
    }

    pub fn history(&self, id: EntityId) -> Option<Ref<'_, History>> {
        self.get::<History>(id)
    }

    pub fn heat(&self, id: EntityId) -> Option<Heat> {
        self.get::<Heat>(id).map(|h| *h)
    }

    pub fn heat_mut(&mut self, id: EntityId) -> Option<RefMut<'_, Heat>> {
        self.get_mut::<Heat>(id)
    }

    pub fn destroyed(&self, id: EntityId) -> Option<Destroyed> {
        self.get::<Destroyed>(id).map(|d| *d)
    }

    pub fn is_destroyed(&self, id: EntityId) -> bool {
        self.has_component::<Destroyed>(id)
    }

    /// Mark inert as of `at`. The first mark wins.
    pub fn mark_destroyed(&mut self, id: EntityId, at: f64) {
        if !self.is_destroyed(id) {
            self.set_component(id, Destroyed { at });
        }
    }
}
