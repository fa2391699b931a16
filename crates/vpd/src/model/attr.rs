//! The atomic unit of VPD data: a tagged, labeled, sanitized value with
//! provenance.

use std::cell::Cell;

use crate::model::Source;

/// A single VPD datum: a short mnemonic tag, a human-readable label, and the
/// value itself.
///
/// Values are only installed through [`Attribute::set_value`], which enforces
/// the preference-watermark rule: a candidate wins only if its preference
/// level strictly exceeds the level that produced the current value. The
/// serialized length (`tag` + `label` + `value` + three NUL terminators) is
/// memoized and invalidated by every mutation.
///
/// Equality compares tag, label, and value, the parts the wire format
/// carries. Provenance, the watermark, and the length cache are in-memory
/// state and never serialized.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    tag: String,
    label: String,
    value: String,
    pref_level: i32,
    packed_len: Cell<usize>,
    sources: Vec<Source>,
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.label == other.label && self.value == other.value
    }
}

impl Eq for Attribute {}

impl Attribute {
    /// Creates an attribute with its tag and label fixed and no value yet.
    pub fn new(tag: impl Into<String>, label: impl Into<String>) -> Self {
        Attribute {
            tag: tag.into(),
            label: label.into(),
            ..Attribute::default()
        }
    }

    /// Rebuilds an attribute from decoded parts. The watermark starts at 0
    /// so any collector source may overwrite the decoded value.
    pub(crate) fn from_parts(
        tag: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Attribute {
            tag: tag.into(),
            label: label.into(),
            value: value.into(),
            ..Attribute::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Preference level of the source that produced the current value
    /// (0 = unset).
    pub fn pref_level(&self) -> i32 {
        self.pref_level
    }

    /// Installs `candidate` if `level` strictly exceeds the current watermark
    /// and the candidate is non-empty; otherwise the call is a silent no-op.
    ///
    /// The candidate is sanitized before storing: every NUL, `\n`, and `\r`
    /// is removed, then leading and trailing whitespace is trimmed. The
    /// emptiness test applies to the raw candidate, so an all-whitespace
    /// candidate still installs (as the empty string) and advances the
    /// watermark.
    ///
    /// Returns whether the value was installed.
    pub fn set_value(&mut self, candidate: &str, level: i32) -> bool {
        if level <= self.pref_level || candidate.is_empty() {
            return false;
        }
        self.value = sanitize(candidate);
        self.pref_level = level;
        self.packed_len.set(0);
        true
    }

    /// Replaces the value unconditionally, sanitized, stamping the watermark
    /// with `level`. Used by the user-section upsert, which by contract
    /// updates in place regardless of preference.
    pub(crate) fn force_value(&mut self, candidate: &str, level: i32) {
        self.value = sanitize(candidate);
        self.pref_level = level;
        self.packed_len.set(0);
    }

    /// Serialized length: tag, label, and value bytes plus their three NUL
    /// terminators. Memoized; 0 is reserved as the "recompute" state, which
    /// is safe because the minimum real length is 3.
    pub fn packed_len(&self) -> usize {
        let cached = self.packed_len.get();
        if cached != 0 {
            return cached;
        }
        let len = 3 + self.tag.len() + self.label.len() + self.value.len();
        self.packed_len.set(len);
        len
    }

    /// Inserts a provenance source, keeping the list ordered by descending
    /// preference level. An entry ties with existing entries of the same
    /// level by going after them.
    pub fn add_source(&mut self, source: Source) {
        let at = self
            .sources
            .iter()
            .position(|s| s.pref_level() < source.pref_level())
            .unwrap_or(self.sources.len());
        self.sources.insert(at, source);
    }

    /// Removes and returns the source at `index`, if it exists.
    pub fn remove_source(&mut self, index: usize) -> Option<Source> {
        if index < self.sources.len() {
            Some(self.sources.remove(index))
        } else {
            None
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

/// Strips every NUL, `\n`, and `\r`, then trims leading and trailing
/// whitespace (the C locale set: space, `\t`, `\n`, `\v`, `\f`, `\r`).
fn sanitize(candidate: &str) -> String {
    let cleaned: String = candidate
        .chars()
        .filter(|&c| c != '\0' && c != '\n' && c != '\r')
        .collect();
    cleaned
        .trim_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKind;

    #[test]
    fn test_set_value_installs_first_candidate() {
        let mut attr = Attribute::new("SN", "Serial Number");
        assert!(attr.set_value("YL10243490F7", 50));
        assert_eq!(attr.value(), "YL10243490F7");
        assert_eq!(attr.pref_level(), 50);
    }

    #[test]
    fn test_set_value_rejects_lower_or_equal_preference() {
        let mut attr = Attribute::new("SN", "Serial Number");
        attr.set_value("first", 60);
        assert!(!attr.set_value("second", 60));
        assert!(!attr.set_value("third", 10));
        assert_eq!(attr.value(), "first");
        assert_eq!(attr.pref_level(), 60);
    }

    #[test]
    fn test_set_value_rejects_empty_candidate() {
        let mut attr = Attribute::new("SN", "Serial Number");
        attr.set_value("kept", 10);
        assert!(!attr.set_value("", 90));
        assert_eq!(attr.value(), "kept");
        assert_eq!(attr.pref_level(), 10);
    }

    #[test]
    fn test_set_value_strips_control_bytes() {
        let mut attr = Attribute::new("DS", "Displayable Message");
        attr.set_value("PCI\0 Bridge\r\n", 10);
        assert_eq!(attr.value(), "PCI Bridge");
    }

    #[test]
    fn test_set_value_trims_surrounding_whitespace() {
        let mut attr = Attribute::new("DS", "Displayable Message");
        attr.set_value("  \t Ethernet Adapter \x0b ", 10);
        assert_eq!(attr.value(), "Ethernet Adapter");
    }

    #[test]
    fn test_all_whitespace_candidate_installs_empty_and_advances_watermark() {
        let mut attr = Attribute::new("DS", "Displayable Message");
        attr.set_value("real", 10);
        assert!(attr.set_value("   ", 20));
        assert_eq!(attr.value(), "");
        assert_eq!(attr.pref_level(), 20);
    }

    #[test]
    fn test_packed_len_counts_three_terminators() {
        let mut attr = Attribute::new("ML", "Microcode Level");
        attr.set_value("1.2.3", 10);
        assert_eq!(attr.packed_len(), 3 + 2 + 15 + 5);
    }

    #[test]
    fn test_packed_len_cache_invalidated_by_mutation() {
        let mut attr = Attribute::new("ML", "Microcode Level");
        attr.set_value("1.2.3", 10);
        let before = attr.packed_len();
        attr.set_value("11.22.33", 20);
        assert_eq!(attr.packed_len(), before + 3);
    }

    #[test]
    fn test_rejected_candidate_leaves_cache_untouched() {
        let mut attr = Attribute::new("ML", "Microcode Level");
        attr.set_value("1.2.3", 30);
        let before = attr.packed_len();
        attr.set_value("longer-value-that-loses", 5);
        assert_eq!(attr.packed_len(), before);
    }

    #[test]
    fn test_force_value_bypasses_watermark() {
        let mut attr = Attribute::new("UD", "User Datum");
        attr.set_value("original", 90);
        attr.force_value("replaced", 5);
        assert_eq!(attr.value(), "replaced");
        assert_eq!(attr.pref_level(), 5);
    }

    #[test]
    fn test_sources_ordered_by_descending_preference() {
        let mut attr = Attribute::new("TM", "Machine Type-Model");
        attr.add_source(Source::new("/sys/devices", "", 1, SourceKind::Ascii, 1, 30));
        attr.add_source(Source::new("/proc/device-tree", "", 0, SourceKind::Binary, 0, 70));
        attr.add_source(Source::new("fallback", "", 1, SourceKind::Ascii, 1, 30));

        let levels: Vec<i32> = attr.sources().iter().map(|s| s.pref_level()).collect();
        assert_eq!(levels, vec![70, 30, 30]);
        // Equal-preference entries keep insertion order.
        assert_eq!(attr.sources()[1].src_ref(), "/sys/devices");
        assert_eq!(attr.sources()[2].src_ref(), "fallback");
    }

    #[test]
    fn test_remove_source() {
        let mut attr = Attribute::new("TM", "Machine Type-Model");
        attr.add_source(Source::new("a", "", 0, SourceKind::Binary, 0, 10));
        attr.add_source(Source::new("b", "", 0, SourceKind::Binary, 0, 20));

        let removed = attr.remove_source(0).unwrap();
        assert_eq!(removed.src_ref(), "b");
        assert_eq!(attr.sources().len(), 1);
        assert!(attr.remove_source(5).is_none());
    }

    #[test]
    fn test_equality_ignores_provenance_state() {
        let mut a = Attribute::new("FN", "Field Replaceable Unit Number");
        a.set_value("74Y1234", 80);
        a.add_source(Source::new("/sys", "", 1, SourceKind::Ascii, 1, 80));

        let b = Attribute::from_parts(
            "FN".to_string(),
            "Field Replaceable Unit Number".to_string(),
            "74Y1234".to_string(),
        );
        assert_eq!(a, b);
    }
}
