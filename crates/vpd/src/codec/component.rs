//! Codec for [`Component`] records.

use super::attr::{decode_attr, encode_attr};
use super::primitives::{Reader, Writer};
use super::section::{
    AX_END, AX_START, CHILD_START, DEVICE_END, DEVICE_START, USER_END, USER_START,
    decode_attr_section, decode_child_section, encode_attr_section, encode_child_section,
};
use crate::error::{PackError, UnpackError};
use crate::model::Component;
use crate::model::component::FIELD_NAMES;

/// Fixed wire overhead of a component record beyond its field and section
/// payloads: the eight sentinels (120 bytes), a terminator for each, and one
/// spare byte.
const FRAME_OVERHEAD: usize = 129;

/// Exact byte length of the packed form of `component`, including the
/// leading length field and the tail padding.
pub fn packed_component_size(component: &Component) -> usize {
    let mut size = 4 + FRAME_OVERHEAD;
    for field in component.fixed_fields() {
        size += field.packed_len();
    }
    // Each variable member counts one byte beyond its payload. For a child
    // ID that byte is its NUL terminator; an attribute already counts its
    // terminators in packed_len, so its extra byte lands in the tail
    // padding.
    for child in &component.children {
        size += child.len() + 1;
    }
    for section in [
        &component.device_specific,
        &component.user_data,
        &component.alt_names,
    ] {
        for item in section {
            size += item.packed_len() + 1;
        }
    }
    size
}

/// Packs a component into its length-prefixed byte form. The buffer is
/// padded with zeros so the declared length equals the true length.
pub fn pack_component(component: &Component) -> Result<Vec<u8>, PackError> {
    let size = packed_component_size(component);
    let declared = u32::try_from(size).map_err(|_| PackError::RecordTooLarge { size })?;

    let mut writer = Writer::try_with_capacity(size)?;
    writer.write_u32_be(declared);
    for field in component.fixed_fields() {
        encode_attr(&mut writer, field);
    }
    encode_child_section(&mut writer, &component.children);
    encode_attr_section(
        &mut writer,
        DEVICE_START,
        DEVICE_END,
        &component.device_specific,
    );
    encode_attr_section(&mut writer, USER_START, USER_END, &component.user_data);
    encode_attr_section(&mut writer, AX_START, AX_END, &component.alt_names);
    writer.pad_to(size);
    debug_assert_eq!(writer.len(), size);
    Ok(writer.into_bytes())
}

/// Unpacks a component from its packed byte form.
///
/// The declared length bounds every read: a buffer shorter than declared is
/// rejected up front, and bytes past the declared length are ignored. Fixed
/// fields are replaced wholesale with what the buffer holds, carrying no
/// preference watermark and no sources. Sections whose sentinels are absent
/// decode as empty.
pub fn unpack_component(data: &[u8]) -> Result<Component, UnpackError> {
    let mut reader = Reader::new(data);
    let declared = reader.read_u32_be("total length")? as usize;
    reader.limit_to(declared)?;

    let mut component = Component::new();
    for (field, name) in component.fixed_fields_mut().into_iter().zip(FIELD_NAMES) {
        *field = decode_attr(&mut reader, name)?;
    }

    // Writers have left variable padding between the fixed fields and the
    // child section, so hunt for the sentinel rather than requiring it at
    // the cursor. A component with no child section at all is corrupt.
    reader.scan_to_cstr(CHILD_START)?;
    component.children = decode_child_section(&mut reader)?;

    if reader.at_cstr(DEVICE_START) {
        component.device_specific.replace_items(decode_attr_section(
            &mut reader,
            DEVICE_START,
            DEVICE_END,
            "device-specific attribute",
        )?);
    }
    if reader.at_cstr(USER_START) {
        component.user_data.replace_items(decode_attr_section(
            &mut reader,
            USER_START,
            USER_END,
            "user attribute",
        )?);
    }
    if reader.at_cstr(AX_START) {
        component.alt_names.replace_items(decode_attr_section(
            &mut reader,
            AX_START,
            AX_END,
            "alternate name",
        )?);
    }

    Ok(component)
}

/// Replaces `component` with the record decoded from `data`.
///
/// `None` succeeds without touching the record, mirroring a missing store
/// entry. On a decode error the record is also left untouched; it never
/// holds a half-decoded state.
pub fn unpack_component_into(
    component: &mut Component,
    data: Option<&[u8]>,
) -> Result<(), UnpackError> {
    let Some(data) = data else {
        return Ok(());
    };
    *component = unpack_component(data)?;
    Ok(())
}
