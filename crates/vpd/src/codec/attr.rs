//! Wire codec for a single attribute.
//!
//! An attribute is stored as `tag NUL label NUL value NUL`, whether it is a
//! fixed record field or a section item. Preference levels and sources are
//! in-memory only and never reach the wire.

use super::primitives::{Reader, Writer};
use crate::error::UnpackError;
use crate::model::Attribute;

/// Encodes an attribute as its three NUL-terminated strings.
pub(crate) fn encode_attr(writer: &mut Writer, attr: &Attribute) {
    writer.write_cstr(attr.tag());
    writer.write_cstr(attr.label());
    writer.write_cstr(attr.value());
}

/// Decodes an attribute from its three NUL-terminated strings. The result
/// carries no provenance: preference level zero, no sources.
pub(crate) fn decode_attr(
    reader: &mut Reader<'_>,
    field: &'static str,
) -> Result<Attribute, UnpackError> {
    let tag = reader.read_cstr(field)?;
    let label = reader.read_cstr(field)?;
    let value = reader.read_cstr(field)?;
    Ok(Attribute::from_parts(tag, label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_roundtrip() {
        let mut attr = Attribute::new("SN", "Serial Number");
        attr.set_value("WZS0095", 30);

        let mut writer = Writer::new();
        encode_attr(&mut writer, &attr);

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = decode_attr(&mut reader, "serialNumber").unwrap();
        assert_eq!(decoded, attr);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_encoded_len_matches_packed_len() {
        let mut attr = Attribute::new("YL", "Location Code");
        attr.set_value("U78CB.001.WZS0095-P1", 60);

        let mut writer = Writer::new();
        encode_attr(&mut writer, &attr);
        assert_eq!(writer.len(), attr.packed_len());
    }

    #[test]
    fn test_empty_strings_survive() {
        let attr = Attribute::default();

        let mut writer = Writer::new();
        encode_attr(&mut writer, &attr);
        assert_eq!(writer.as_bytes(), &[0, 0, 0]);

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = decode_attr(&mut reader, "field").unwrap();
        assert_eq!(decoded.tag(), "");
        assert_eq!(decoded.label(), "");
        assert_eq!(decoded.value(), "");
    }

    #[test]
    fn test_decoded_attr_has_no_watermark() {
        let mut writer = Writer::new();
        writer.write_cstr("FC");
        writer.write_cstr("Feature Code");
        writer.write_cstr("5887");

        let mut reader = Reader::new(writer.as_bytes());
        let mut decoded = decode_attr(&mut reader, "featureCode").unwrap();
        // Any positive preference level may overwrite a decoded value.
        assert!(decoded.set_value("59E2", 1));
        assert_eq!(decoded.value(), "59E2");
    }

    #[test]
    fn test_truncated_attr() {
        let mut writer = Writer::new();
        writer.write_cstr("RT");
        writer.write_cstr("Record Type");
        // Value string never terminated.
        let mut bytes = writer.into_bytes();
        bytes.extend_from_slice(b"VSYS");

        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            decode_attr(&mut reader, "recordType"),
            Err(UnpackError::UnterminatedString {
                field: "recordType",
                ..
            })
        ));
    }
}
