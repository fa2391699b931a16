//! Binary pack/unpack for VPD records.
//!
//! A packed record opens with a big-endian u32 holding the total buffer
//! length, padding included. The rest is NUL-terminated strings: three per
//! fixed field in a fixed order, then the sentinel-delimited variable
//! sections. Decoding never reads past the declared length.

mod attr;
pub mod component;
pub mod primitives;
mod section;
pub mod system;

pub use component::{
    pack_component, packed_component_size, unpack_component, unpack_component_into,
};
pub use primitives::{Reader, Writer};
pub use system::{pack_system, packed_system_size, unpack_system, unpack_system_into};
