//! Primitive encoding/decoding for packed VPD buffers.
//!
//! Implements the bounded read cursor and the NUL-terminated string
//! primitives both record codecs are built from. Every read is checked
//! against the declared total length, so a corrupt buffer can never carry
//! the cursor past it.

use crate::error::{PackError, UnpackError};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding packed record data.
///
/// Wraps a byte slice and a limit. The limit starts at the slice length and
/// is tightened to the declared total length once that has been read; no
/// read ever crosses it.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            limit: data.len(),
        }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the active limit (declared length once set).
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of readable bytes left before the limit.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    /// Tightens the limit to the declared total length. Fails if the buffer
    /// is shorter than declared (a truncated payload); bytes beyond the
    /// declared length are ignored.
    pub fn limit_to(&mut self, declared: usize) -> Result<(), UnpackError> {
        if declared > self.data.len() {
            return Err(UnpackError::Truncated {
                declared,
                actual: self.data.len(),
            });
        }
        self.limit = declared;
        Ok(())
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], UnpackError> {
        if self.pos + n > self.limit {
            return Err(UnpackError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a big-endian u32 (network byte order, as the format stores its
    /// size fields).
    #[inline]
    pub fn read_u32_be(&mut self, context: &'static str) -> Result<u32, UnpackError> {
        let bytes = self.read_bytes(4, context)?;
        // SAFETY: read_bytes guarantees exactly 4 bytes, try_into always succeeds
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    /// Returns the NUL-terminated string at the cursor without consuming it.
    pub fn peek_cstr(&self, field: &'static str) -> Result<&'a str, UnpackError> {
        if self.pos >= self.limit {
            return Err(UnpackError::UnexpectedEof { context: field });
        }
        let window = &self.data[self.pos..self.limit];
        let nul = window
            .iter()
            .position(|&b| b == 0)
            .ok_or(UnpackError::UnterminatedString {
                field,
                limit: self.limit,
            })?;
        std::str::from_utf8(&window[..nul]).map_err(|_| UnpackError::InvalidUtf8 { field })
    }

    /// Reads a NUL-terminated string, consuming its terminator.
    pub fn read_cstr(&mut self, field: &'static str) -> Result<&'a str, UnpackError> {
        let s = self.peek_cstr(field)?;
        self.pos += s.len() + 1;
        Ok(s)
    }

    /// Advances the cursor by n bytes.
    #[inline]
    pub fn skip(&mut self, n: usize, context: &'static str) -> Result<(), UnpackError> {
        if self.pos + n > self.limit {
            return Err(UnpackError::UnexpectedEof { context });
        }
        self.pos += n;
        Ok(())
    }

    /// Whether the bytes at the cursor are exactly `s` followed by NUL.
    /// Never reads past the limit; an unterminated or foreign string is
    /// simply not a match.
    pub fn at_cstr(&self, s: &str) -> bool {
        let needed = s.len() + 1;
        if self.pos + needed > self.limit {
            return false;
        }
        let window = &self.data[self.pos..self.pos + needed];
        &window[..s.len()] == s.as_bytes() && window[s.len()] == 0
    }

    /// Advances byte-by-byte until the cursor sits on `s` (as a full
    /// NUL-terminated string). Fails once no match can start before the
    /// limit.
    pub fn scan_to_cstr(&mut self, s: &'static str) -> Result<(), UnpackError> {
        let needed = s.len() + 1;
        loop {
            if self.pos + needed > self.limit {
                return Err(UnpackError::MissingSentinel { sentinel: s });
            }
            if self.at_cstr(s) {
                return Ok(());
            }
            self.pos += 1;
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding packed record data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with the full buffer reserved up front, surfacing
    /// allocation failure instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, PackError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| PackError::Alloc { bytes: capacity })?;
        Ok(Self { buf })
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a big-endian u32.
    #[inline]
    pub fn write_u32_be(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes string bytes followed by a NUL terminator.
    #[inline]
    pub fn write_cstr(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }

    /// Grows the buffer with zero bytes up to `size`. The record formats
    /// declare a total length that includes tail padding, so the writer must
    /// emit those zeros for the declared length to equal the true length.
    pub fn pad_to(&mut self, size: usize) {
        if self.buf.len() < size {
            self.buf.resize(size, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cstr_roundtrip() {
        let mut writer = Writer::new();
        writer.write_cstr("SN");
        writer.write_cstr("Serial Number");
        writer.write_cstr("");

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_cstr("a").unwrap(), "SN");
        assert_eq!(reader.read_cstr("b").unwrap(), "Serial Number");
        assert_eq!(reader.read_cstr("c").unwrap(), "");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_u32_be_roundtrip() {
        for v in [0u32, 1, 129, 0xDEAD_BEEF, u32::MAX] {
            let mut writer = Writer::new();
            writer.write_u32_be(v);
            assert_eq!(writer.as_bytes().len(), 4);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_u32_be("test").unwrap(), v);
        }
    }

    #[test]
    fn test_u32_is_network_order() {
        let mut writer = Writer::new();
        writer.write_u32_be(0x0102_0304);
        assert_eq!(writer.as_bytes(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_unterminated_cstr() {
        let data = b"no terminator here";
        let mut reader = Reader::new(data);
        let result = reader.read_cstr("field");
        assert!(matches!(
            result,
            Err(UnpackError::UnterminatedString { field: "field", .. })
        ));
    }

    #[test]
    fn test_cstr_at_end_of_data() {
        let mut reader = Reader::new(&[]);
        assert!(matches!(
            reader.read_cstr("field"),
            Err(UnpackError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let data = [0xFF, 0xFE, 0x00];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_cstr("field"),
            Err(UnpackError::InvalidUtf8 { field: "field" })
        ));
    }

    #[test]
    fn test_limit_to_rejects_truncation() {
        let data = [0u8; 10];
        let mut reader = Reader::new(&data);
        let result = reader.limit_to(11);
        assert_eq!(
            result,
            Err(UnpackError::Truncated {
                declared: 11,
                actual: 10
            })
        );
        assert!(reader.limit_to(10).is_ok());
        assert!(reader.limit_to(4).is_ok());
    }

    #[test]
    fn test_limit_bounds_reads() {
        let mut writer = Writer::new();
        writer.write_cstr("beyond");
        let mut reader = Reader::new(writer.as_bytes());
        // Limit cuts the string short of its terminator.
        reader.limit_to(3).unwrap();
        assert!(matches!(
            reader.read_cstr("field"),
            Err(UnpackError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn test_at_cstr_requires_exact_match() {
        let mut writer = Writer::new();
        writer.write_cstr("::userStart::");
        let reader = Reader::new(writer.as_bytes());

        assert!(reader.at_cstr("::userStart::"));
        // A prefix of the stored string is not a match: the byte after the
        // candidate must be the terminator.
        assert!(!reader.at_cstr("::userStart"));
        assert!(!reader.at_cstr("::userStart::x"));
    }

    #[test]
    fn test_scan_to_cstr_skips_noise() {
        let mut writer = Writer::new();
        writer.write_cstr("noise");
        writer.write_cstr("::childrenStart::");
        let mut reader = Reader::new(writer.as_bytes());

        reader.scan_to_cstr("::childrenStart::").unwrap();
        assert_eq!(reader.position(), "noise".len() + 1);
        assert_eq!(reader.read_cstr("sentinel").unwrap(), "::childrenStart::");
    }

    #[test]
    fn test_scan_to_cstr_fails_within_limit() {
        let mut writer = Writer::new();
        writer.write_cstr("nothing to find");
        let mut reader = Reader::new(writer.as_bytes());

        let result = reader.scan_to_cstr("::childrenStart::");
        assert_eq!(
            result,
            Err(UnpackError::MissingSentinel {
                sentinel: "::childrenStart::"
            })
        );
    }

    #[test]
    fn test_skip_is_bounded() {
        let mut reader = Reader::new(&[0u8; 4]);
        assert!(reader.skip(4, "test").is_ok());
        assert!(matches!(
            reader.skip(1, "test"),
            Err(UnpackError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_pad_to_grows_with_zeros() {
        let mut writer = Writer::new();
        writer.write_cstr("ab");
        writer.pad_to(5);
        assert_eq!(writer.as_bytes(), &[b'a', b'b', 0, 0, 0]);
        // Never shrinks.
        writer.pad_to(2);
        assert_eq!(writer.len(), 5);
    }
}
