//! Codec for [`System`] records.
//!
//! The system record shares the component wire shape with three
//! differences: a CPU count word follows the total length, there is no
//! alternate-name section, and the child section is matched exactly at the
//! cursor instead of scanned for, so it is optional like the sections after
//! it.

use super::attr::{decode_attr, encode_attr};
use super::primitives::{Reader, Writer};
use super::section::{
    CHILD_START, DEVICE_END, DEVICE_START, USER_END, USER_START, decode_attr_section,
    decode_child_section, encode_attr_section, encode_child_section,
};
use crate::error::{PackError, UnpackError};
use crate::model::system::FIELD_NAMES;
use crate::model::{SYSTEM_ID, System};

/// Fixed wire overhead of a system record beyond its field and section
/// payloads: the six sentinels (100 bytes), a terminator for each, and one
/// spare byte.
const FRAME_OVERHEAD: usize = 107;

/// Exact byte length of the packed form of `system`, including the leading
/// length and CPU count fields and the tail padding.
pub fn packed_system_size(system: &System) -> usize {
    let mut size = 4 + 4 + FRAME_OVERHEAD;
    for field in system.fixed_fields() {
        size += field.packed_len();
    }
    for child in &system.children {
        size += child.len() + 1;
    }
    for section in [&system.device_specific, &system.user_data] {
        for item in section {
            size += item.packed_len() + 1;
        }
    }
    size
}

/// Packs a system record into its length-prefixed byte form.
pub fn pack_system(system: &System) -> Result<Vec<u8>, PackError> {
    let size = packed_system_size(system);
    let declared = u32::try_from(size).map_err(|_| PackError::RecordTooLarge { size })?;

    let mut writer = Writer::try_with_capacity(size)?;
    writer.write_u32_be(declared);
    writer.write_u32_be(system.cpu_count);
    for field in system.fixed_fields() {
        encode_attr(&mut writer, field);
    }
    encode_child_section(&mut writer, &system.children);
    encode_attr_section(
        &mut writer,
        DEVICE_START,
        DEVICE_END,
        &system.device_specific,
    );
    encode_attr_section(&mut writer, USER_START, USER_END, &system.user_data);
    writer.pad_to(size);
    debug_assert_eq!(writer.len(), size);
    Ok(writer.into_bytes())
}

/// Unpacks a system record from its packed byte form.
///
/// Bounds and replacement behave as for components. Afterwards the
/// well-known root ID is re-installed at its reserved preference level, so
/// a decoded system always answers [`SYSTEM_ID`] no matter what the buffer
/// held.
pub fn unpack_system(data: &[u8]) -> Result<System, UnpackError> {
    let mut reader = Reader::new(data);
    let declared = reader.read_u32_be("total length")? as usize;
    reader.limit_to(declared)?;

    let mut system = System::new();
    system.cpu_count = reader.read_u32_be("cpuCount")?;
    for (field, name) in system.fixed_fields_mut().into_iter().zip(FIELD_NAMES) {
        *field = decode_attr(&mut reader, name)?;
    }

    if reader.at_cstr(CHILD_START) {
        system.children = decode_child_section(&mut reader)?;
    }
    if reader.at_cstr(DEVICE_START) {
        system.device_specific.replace_items(decode_attr_section(
            &mut reader,
            DEVICE_START,
            DEVICE_END,
            "device-specific attribute",
        )?);
    }
    if reader.at_cstr(USER_START) {
        system.user_data.replace_items(decode_attr_section(
            &mut reader,
            USER_START,
            USER_END,
            "user attribute",
        )?);
    }

    system.id_node.set_value(SYSTEM_ID, 100);
    Ok(system)
}

/// Replaces `system` with the record decoded from `data`; `None` succeeds
/// without touching it. On error the record is left untouched.
pub fn unpack_system_into(system: &mut System, data: Option<&[u8]>) -> Result<(), UnpackError> {
    let Some(data) = data else {
        return Ok(());
    };
    *system = unpack_system(data)?;
    Ok(())
}
