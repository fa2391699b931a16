//! Binary pack/unpack codec for persisted hardware Vital Product Data (VPD)
//! records.
//!
//! VPD is the identity data a machine reports about itself and its devices:
//! serial numbers, part numbers, firmware levels, location codes. This crate
//! implements the record model and the legacy packed byte format those
//! records persist in, so inventories written by existing collectors remain
//! readable.
//!
//! # Overview
//!
//! - **Two record kinds**: one [`System`] record per machine and a
//!   [`Component`] record per device, linked into a tree by record IDs
//! - **Preference-ranked values**: a field value is only replaced by data
//!   from a more trusted source, tracked per attribute
//! - **Length-prefixed wire form**: every packed record declares its exact
//!   byte length up front and is rejected when the buffer disagrees
//!
//! # Quick Start
//!
//! ```rust
//! use vpd::{Component, pack_component, unpack_component};
//!
//! let mut nic = Component::new();
//! nic.id.set_value("/sys/devices/pci0000:00/0000:00:01.0", 60);
//! nic.description.set_value("Ethernet Adapter", 50);
//! nic.serial_number.set_value("WZS0095", 30);
//! nic.add_device_specific("ML", "Microcode Level", "1.2.3", 50);
//!
//! // Pack to the persisted byte form.
//! let bytes = pack_component(&nic).unwrap();
//!
//! // Unpack it back.
//! let decoded = unpack_component(&bytes).unwrap();
//! assert_eq!(decoded, nic);
//! assert_eq!(decoded.serial_number.value(), "WZS0095");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Record types (Attribute, Component, System) and sections
//! - [`codec`]: Binary pack/unpack and packed-size queries
//! - [`store`]: Keyed blob storage seam with fetch/persist helpers
//! - [`tree`]: The inventory arena linking records by ID
//! - [`error`]: Error types
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Every read is bounded by the declared record length
//! - Truncated buffers, unterminated strings, and invalid UTF-8 are
//!   rejected with descriptive errors, never read past
//! - Pack allocates its output buffer fallibly
//!
//! # Wire Format
//!
//! A packed record is a single buffer:
//! - Big-endian `u32` total length, counting the whole buffer
//! - [`System`] records only: big-endian `u32` CPU count
//! - Fixed fields in a fixed order, each as `tag NUL label NUL value NUL`
//! - Variable sections wrapped in NUL-terminated sentinel strings
//!   (child record IDs, device-specific attributes, user attributes, and
//!   for components alternate names)
//! - Zero padding up to the declared length

pub mod codec;
pub mod error;
pub mod model;
pub mod store;
pub mod tree;

// Re-export commonly used types at crate root
pub use codec::{
    pack_component, pack_system, packed_component_size, packed_system_size, unpack_component,
    unpack_component_into, unpack_system, unpack_system_into,
};
pub use error::{FetchError, PackError, PersistError, StoreError, UnpackError};
pub use model::{
    AttrSection, Attribute, Component, InsertPolicy, SYSTEM_ID, Source, SourceKind, System,
};
pub use store::{
    MemStore, VpdStore, fetch_component, fetch_system, persist_component, persist_system,
};
pub use tree::{Inventory, load_inventory};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
