//! The inventory tree.
//!
//! A machine's inventory is one system record plus a component per device,
//! linked by record ID. No record holds an owning pointer to another: the
//! arena owns every component and resolves child and parent references by
//! ID lookup, so shared or cyclic references in stored data cannot produce
//! dangling pointers or an unbounded walk.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::error::FetchError;
use crate::model::{Component, System};
use crate::store::{VpdStore, fetch_component, fetch_system};

/// All records of one machine, owned in a single arena.
#[derive(Debug, Clone)]
pub struct Inventory {
    system: System,
    components: FxHashMap<String, Component>,
}

impl Inventory {
    /// The system record at the root of the tree.
    pub fn system(&self) -> &System {
        &self.system
    }

    /// Looks up a component by record ID.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    /// Number of component records in the arena.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates over all components, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Resolves the children of the record with this ID, in child-list
    /// order. The system root's ID resolves its children too. IDs that are
    /// not in the arena are skipped.
    pub fn children_of(&self, id: &str) -> Vec<&Component> {
        let ids: &[String] = if id == self.system.record_id() {
            &self.system.children
        } else if let Some(comp) = self.components.get(id) {
            &comp.children
        } else {
            return Vec::new();
        };
        ids.iter().filter_map(|c| self.components.get(c)).collect()
    }

    /// Resolves a component's parent through its parent-field value. `None`
    /// when the parent is the system root or not in the arena.
    pub fn parent_of(&self, id: &str) -> Option<&Component> {
        let parent_id = self.components.get(id)?.parent_id();
        self.components.get(parent_id)
    }
}

/// Loads the full inventory reachable from the system root.
///
/// Walks child IDs breadth-first, fetching each component once. The arena
/// doubles as the visited set: an ID reachable along two paths is decoded
/// once, and a reference cycle cannot loop the walk. A child ID with no
/// stored blob fails the load; so does a blob that will not decode.
pub fn load_inventory(store: &impl VpdStore) -> Result<Inventory, FetchError> {
    let system = fetch_system(store)?;
    let mut components: FxHashMap<String, Component> = FxHashMap::default();
    let mut queue: VecDeque<String> = system.children.iter().cloned().collect();

    while let Some(id) = queue.pop_front() {
        if components.contains_key(&id) {
            continue;
        }
        let component = fetch_component(store, &id)?;
        queue.extend(component.children.iter().cloned());
        components.insert(id, component);
    }

    Ok(Inventory { system, components })
}
