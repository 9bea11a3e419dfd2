//! Lookup of writers by name.
use bevy::prelude::*;
use indexmap::IndexMap;

use crate::prelude::Writer;

/// Resource that keeps track of the named writers in the world.
///
/// Writer entities that also have a [`Name`] are added as soon as both components
/// are there, and removed when either goes away. Names are expected to be unique:
/// a second writer with the same name replaces the first in the registry.
#[derive(Resource, Default, Debug)]
pub struct WriterRegistry {
    /// Writer names to entities, in registration order.
    writers: IndexMap<String, Entity>,
}

impl WriterRegistry {
    /// Adds (or replaces) a writer under `name`.
    pub fn register(&mut self, name: impl Into<String>, writer: Entity) {
        let name = name.into();
        if let Some(old) = self.writers.insert(name.clone(), writer) {
            if old != writer {
                warn!("Writer '{}' replaced {:?} with {:?}", name, old, writer);
            }
        }
    }

    /// Removes a writer entity, whatever its name.
    pub fn unregister(&mut self, writer: Entity) -> Option<String> {
        let name = self
            .writers
            .iter()
            .find(|(_, e)| **e == writer)
            .map(|(n, _)| n.clone())?;
        self.writers.shift_remove(&name);
        Some(name)
    }

    /// The writer registered under `name`.
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.writers.get(name).copied()
    }

    /// The first registered writer, if any.
    pub fn first(&self) -> Option<Entity> {
        self.writers.first().map(|(_, e)| *e)
    }

    /// All registered writers, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.writers.iter().map(|(n, e)| (n.as_str(), *e))
    }

    /// Number of registered writers.
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Whether no writer is registered.
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

/// Keeps the [`WriterRegistry`] in sync with named writer entities.
///
/// Follows names given after the writer was spawned, renames, and removal of
/// either the [`Writer`] or its [`Name`].
pub(crate) fn track_writers(
    named: Query<(Entity, &Name), (With<Writer>, Or<(Added<Writer>, Changed<Name>)>)>,
    mut removed_writers: RemovedComponents<Writer>,
    mut removed_names: RemovedComponents<Name>,
    mut registry: ResMut<WriterRegistry>,
) {
    for e in removed_writers.read().chain(removed_names.read()) {
        if let Some(name) = registry.unregister(e) {
            info!("Writer '{}' unregistered", name);
        }
    }
    for (e, name) in &named {
        if registry.get(name.as_str()) == Some(e) {
            continue;
        }
        if let Some(old) = registry.unregister(e) {
            info!("Writer '{}' renamed to '{}'", old, name);
        } else {
            info!("Writer '{}' registered", name);
        }
        registry.register(name.as_str(), e);
    }
}
