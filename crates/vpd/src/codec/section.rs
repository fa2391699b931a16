//! Sentinel-delimited sections.
//!
//! Variable-length parts of a record are wrapped in start/end marker
//! strings, stored NUL-terminated like every other string in the format.
//! Child sections hold bare record IDs; the other sections hold attribute
//! triples.

use super::attr::{decode_attr, encode_attr};
use super::primitives::{Reader, Writer};
use crate::error::UnpackError;
use crate::model::{AttrSection, Attribute};

pub(crate) const CHILD_START: &str = "::childrenStart::";
pub(crate) const CHILD_END: &str = "::childrenEnd::";
pub(crate) const DEVICE_START: &str = "::deviceSpecificStart::";
pub(crate) const DEVICE_END: &str = "::deviceSpecificEnd::";
pub(crate) const USER_START: &str = "::userStart::";
pub(crate) const USER_END: &str = "::userEnd::";
pub(crate) const AX_START: &str = "::axStart::";
pub(crate) const AX_END: &str = "::axEnd::";

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes the child-ID list between its sentinels.
pub(crate) fn encode_child_section(writer: &mut Writer, children: &[String]) {
    writer.write_cstr(CHILD_START);
    for child in children {
        writer.write_cstr(child);
    }
    writer.write_cstr(CHILD_END);
}

/// Encodes an attribute section between the given sentinels.
pub(crate) fn encode_attr_section(
    writer: &mut Writer,
    start: &str,
    end: &str,
    section: &AttrSection,
) {
    writer.write_cstr(start);
    for item in section {
        encode_attr(writer, item);
    }
    writer.write_cstr(end);
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes the child-ID list. The cursor must sit on the start sentinel.
/// Stray empty strings inside the section are skipped, not recorded.
pub(crate) fn decode_child_section(reader: &mut Reader<'_>) -> Result<Vec<String>, UnpackError> {
    reader.skip(CHILD_START.len() + 1, "children start sentinel")?;
    let mut children = Vec::new();
    loop {
        let item = reader.read_cstr("child ID")?;
        if item == CHILD_END {
            return Ok(children);
        }
        if !item.is_empty() {
            children.push(item.to_owned());
        }
    }
}

/// Decodes an attribute section. The cursor must sit on the start sentinel.
/// The end sentinel is only recognized at a triple boundary, so a value that
/// happens to equal it does not terminate the section.
pub(crate) fn decode_attr_section(
    reader: &mut Reader<'_>,
    start: &'static str,
    end: &'static str,
    field: &'static str,
) -> Result<Vec<Attribute>, UnpackError> {
    reader.skip(start.len() + 1, field)?;
    let mut items = Vec::new();
    while !reader.at_cstr(end) {
        items.push(decode_attr(reader, field)?);
    }
    reader.skip(end.len() + 1, field)?;
    Ok(items)
}
