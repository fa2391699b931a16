//! Storage seam for packed records.
//!
//! Records persist as opaque blobs keyed by record ID; the system record
//! lives under the well-known [`SYSTEM_ID`] key. The trait keeps the codec
//! independent of any particular backend, and the fetch helpers layer
//! decode errors on top so a caller can tell a missing record from a
//! corrupt one.

use rustc_hash::FxHashMap;

use crate::codec::{pack_component, pack_system, unpack_component, unpack_system};
use crate::error::{FetchError, PersistError, StoreError};
use crate::model::{Component, SYSTEM_ID, System};

/// Keyed blob storage for packed records.
///
/// `get` distinguishes "no entry" (`Ok(None)`) from backend failure.
pub trait VpdStore {
    /// Returns the blob stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `blob` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, blob: Vec<u8>) -> Result<(), StoreError>;

    /// Removes the entry under `key`; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Returns all stored keys, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-memory store backing tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VpdStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, blob: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), blob);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Fetches and decodes the component stored under `id`.
pub fn fetch_component(store: &impl VpdStore, id: &str) -> Result<Component, FetchError> {
    let blob = store.get(id)?.ok_or_else(|| FetchError::NotFound {
        key: id.to_owned(),
    })?;
    unpack_component(&blob).map_err(|source| FetchError::Corrupt {
        key: id.to_owned(),
        source,
    })
}

/// Fetches and decodes the system record from its well-known key.
pub fn fetch_system(store: &impl VpdStore) -> Result<System, FetchError> {
    let blob = store.get(SYSTEM_ID)?.ok_or_else(|| FetchError::NotFound {
        key: SYSTEM_ID.to_owned(),
    })?;
    unpack_system(&blob).map_err(|source| FetchError::Corrupt {
        key: SYSTEM_ID.to_owned(),
        source,
    })
}

/// Packs and stores a component under its record ID.
pub fn persist_component(
    store: &mut impl VpdStore,
    component: &Component,
) -> Result<(), PersistError> {
    let blob = pack_component(component)?;
    store.put(component.record_id(), blob)?;
    Ok(())
}

/// Packs and stores the system record under its well-known key.
pub fn persist_system(store: &mut impl VpdStore, system: &System) -> Result<(), PersistError> {
    let blob = pack_system(system)?;
    store.put(SYSTEM_ID, blob)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_component(id: &str) -> Component {
        let mut comp = Component::new();
        comp.id.set_value(id, 60);
        comp.description.set_value("Ethernet Adapter", 50);
        comp
    }

    #[test]
    fn test_component_store_roundtrip() {
        let mut store = MemStore::new();
        let comp = stored_component("/sys/devices/pci0/eth0");

        persist_component(&mut store, &comp).unwrap();
        let fetched = fetch_component(&store, "/sys/devices/pci0/eth0").unwrap();
        assert_eq!(fetched, comp);
    }

    #[test]
    fn test_system_uses_well_known_key() {
        let mut store = MemStore::new();
        let mut sys = System::new();
        sys.cpu_count = 4;

        persist_system(&mut store, &sys).unwrap();
        assert!(store.get(SYSTEM_ID).unwrap().is_some());

        let fetched = fetch_system(&store).unwrap();
        assert_eq!(fetched.cpu_count, 4);
        assert_eq!(fetched.record_id(), SYSTEM_ID);
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let store = MemStore::new();
        let err = fetch_component(&store, "/absent").unwrap_err();
        assert_eq!(
            err,
            FetchError::NotFound {
                key: "/absent".to_owned()
            }
        );
        assert!(err.unpack_error().is_none());
    }

    #[test]
    fn test_corrupt_record_is_distinguishable() {
        let mut store = MemStore::new();
        // Declares 99 bytes, supplies 6.
        let mut blob = 99u32.to_be_bytes().to_vec();
        blob.extend_from_slice(&[0, 0]);
        store.put("/sys/devices/bad", blob).unwrap();

        let err = fetch_component(&store, "/sys/devices/bad").unwrap_err();
        assert!(matches!(err, FetchError::Corrupt { ref key, .. } if key == "/sys/devices/bad"));
        assert!(err.unpack_error().is_some());
    }

    #[test]
    fn test_put_replaces_previous_blob() {
        let mut store = MemStore::new();
        let mut comp = stored_component("/sys/devices/pci0/eth0");
        persist_component(&mut store, &comp).unwrap();

        comp.serial_number.set_value("WZS0095", 30);
        persist_component(&mut store, &comp).unwrap();

        assert_eq!(store.len(), 1);
        let fetched = fetch_component(&store, "/sys/devices/pci0/eth0").unwrap();
        assert_eq!(fetched.serial_number.value(), "WZS0095");
    }

    #[test]
    fn test_remove_then_fetch_is_not_found() {
        let mut store = MemStore::new();
        persist_component(&mut store, &stored_component("/sys/devices/x")).unwrap();
        store.remove("/sys/devices/x").unwrap();

        assert!(matches!(
            fetch_component(&store, "/sys/devices/x"),
            Err(FetchError::NotFound { .. })
        ));
        // Removing again is silent.
        store.remove("/sys/devices/x").unwrap();
    }

    #[test]
    fn test_keys_lists_all_entries() {
        let mut store = MemStore::new();
        persist_system(&mut store, &System::new()).unwrap();
        persist_component(&mut store, &stored_component("/sys/devices/a")).unwrap();
        persist_component(&mut store, &stored_component("/sys/devices/b")).unwrap();

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["/sys/bus", "/sys/devices/a", "/sys/devices/b"]);
    }
}
