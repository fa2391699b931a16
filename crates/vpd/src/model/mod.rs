//! Data model types for VPD records.
//!
//! This module contains the in-memory representation of an inventory:
//! - Attributes (tagged, labeled, sanitized values with provenance)
//! - Sources (where a value came from, ranked by preference)
//! - Sections (attribute collections with explicit insertion policies)
//! - Records (Component per device, System at the root)

pub mod attr;
pub mod component;
pub mod section;
pub mod source;
pub mod system;

pub use attr::Attribute;
pub use component::Component;
pub use section::{AttrSection, InsertPolicy};
pub use source::{Source, SourceKind};
pub use system::{SYSTEM_ID, System};
