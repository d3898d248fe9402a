use std::collections::BTreeMap;

use catalog::LayerId;

use crate::backend::BackendLayer;

/// Mutable per-viewer state of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub handle: BackendLayer,
    pub visible: bool,
    pub opacity: f64,
    pub stack_order: i32,
}

/// Arena-style registry: one entry per layer id, created once and looked up
/// thereafter. Entries are hidden, never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRegistry {
    entries: BTreeMap<LayerId, LayerEntry>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry for `id`. Returns false (leaving the existing entry
    /// in place) if one already exists; at most one entry per id may live in
    /// a registry.
    pub fn insert(&mut self, id: LayerId, entry: LayerEntry) -> bool {
        match self.entries.entry(id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    pub fn get(&self, id: &LayerId) -> Option<&LayerEntry> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &LayerId) -> Option<&mut LayerEntry> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LayerId, &LayerEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of all currently visible entries.
    pub fn visible_ids(&self) -> Vec<LayerId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.visible)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// (visible, opacity) for every entry; the comparison-mode snapshot.
    pub fn snapshot(&self) -> BTreeMap<LayerId, (bool, f64)> {
        self.entries
            .iter()
            .map(|(id, e)| (id.clone(), (e.visible, e.opacity)))
            .collect()
    }
}
