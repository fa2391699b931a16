//! Attribute-valued record sections and their insertion policies.

use crate::model::Attribute;

/// How a section treats an insert that collides with an existing member.
///
/// Each section of a record names its policy explicitly instead of encoding
/// it in ad hoc per-call logic:
/// device-specific data appends always (multiple firmware sub-levels
/// legitimately share a tag), user data upserts by tag, and alternate names
/// deduplicate by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Every insert appends; duplicate tags are permitted.
    AppendAlways,
    /// Tags are unique keys; inserting an existing tag replaces its value
    /// in place.
    UpsertByTag,
    /// Values are unique; inserting a value the section already holds is a
    /// no-op.
    DedupeByValue,
}

/// An ordered collection of [`Attribute`]s governed by an [`InsertPolicy`].
///
/// The policy applies to inserts only. The decode path reproduces a stored
/// section exactly as packed, so duplicates present in legacy data survive
/// a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSection {
    policy: InsertPolicy,
    items: Vec<Attribute>,
}

impl AttrSection {
    pub(crate) fn new(policy: InsertPolicy) -> Self {
        AttrSection {
            policy,
            items: Vec::new(),
        }
    }

    pub fn policy(&self) -> InsertPolicy {
        self.policy
    }

    /// Inserts a member built from the given parts, applying the section
    /// policy. The value passes through the watermark setter, so it arrives
    /// sanitized; a rejected (empty) candidate still inserts an empty-valued
    /// member under `AppendAlways`, matching the legacy collectors.
    pub fn insert(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        let mut attr = Attribute::new(tag, label);
        attr.set_value(value, level);

        match self.policy {
            InsertPolicy::AppendAlways => self.items.push(attr),
            InsertPolicy::UpsertByTag => {
                if let Some(existing) = self.items.iter_mut().find(|a| a.tag() == tag) {
                    existing.force_value(value, level);
                } else {
                    self.items.push(attr);
                }
            }
            InsertPolicy::DedupeByValue => {
                if !self.items.iter().any(|a| a.value() == attr.value()) {
                    self.items.push(attr);
                }
            }
        }
    }

    /// Updates the first member with a matching tag through the watermark
    /// rule, appending a new member if the tag is absent. This is the
    /// preference-respecting counterpart to `UpsertByTag`, used by
    /// collectors refreshing device-specific entries.
    pub fn update_by_tag(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        if let Some(existing) = self.items.iter_mut().find(|a| a.tag() == tag) {
            existing.set_value(value, level);
            return;
        }
        let mut attr = Attribute::new(tag, label);
        attr.set_value(value, level);
        self.items.push(attr);
    }

    /// First member with the given tag, if any.
    pub fn get(&self, tag: &str) -> Option<&Attribute> {
        self.items.iter().find(|a| a.tag() == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Attribute] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the whole section with decoded members, bypassing the
    /// insertion policy.
    pub(crate) fn replace_items(&mut self, items: Vec<Attribute>) {
        self.items = items;
    }
}

impl<'a> IntoIterator for &'a AttrSection {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_always_permits_duplicate_tags() {
        let mut section = AttrSection::new(InsertPolicy::AppendAlways);
        section.insert("CL", "Firmware Level", "Phyp-1.0", 10);
        section.insert("CL", "Firmware Level", "FSP-2.3", 10);

        assert_eq!(section.len(), 2);
        assert_eq!(section.items()[0].value(), "Phyp-1.0");
        assert_eq!(section.items()[1].value(), "FSP-2.3");
    }

    #[test]
    fn test_upsert_by_tag_replaces_in_place() {
        let mut section = AttrSection::new(InsertPolicy::UpsertByTag);
        section.insert("XX", "User Datum", "one", 50);
        section.insert("YY", "Other Datum", "two", 50);
        section.insert("XX", "User Datum", "replaced", 5);

        assert_eq!(section.len(), 2);
        let xx = section.get("XX").unwrap();
        // Replacement ignores the watermark but sanitizes and restamps.
        assert_eq!(xx.value(), "replaced");
        assert_eq!(xx.pref_level(), 5);
        assert_eq!(section.items()[0].tag(), "XX");
    }

    #[test]
    fn test_upsert_by_tag_keeps_original_label() {
        let mut section = AttrSection::new(InsertPolicy::UpsertByTag);
        section.insert("XX", "Original Label", "one", 10);
        section.insert("XX", "Different Label", "two", 10);

        assert_eq!(section.get("XX").unwrap().label(), "Original Label");
    }

    #[test]
    fn test_dedupe_by_value_drops_known_values() {
        let mut section = AttrSection::new(InsertPolicy::DedupeByValue);
        section.insert("AX", "AIX Name", "ent0", 10);
        section.insert("AX", "AIX Name", "ent1", 10);
        section.insert("AX", "AIX Name", "ent0", 90);

        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_dedupe_by_value_compares_sanitized_candidates() {
        let mut section = AttrSection::new(InsertPolicy::DedupeByValue);
        section.insert("AX", "AIX Name", "ent0", 10);
        section.insert("AX", "AIX Name", " ent0\n", 10);

        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_update_by_tag_respects_watermark() {
        let mut section = AttrSection::new(InsertPolicy::AppendAlways);
        section.insert("ML", "Microcode Level", "1.0.0", 60);
        section.update_by_tag("ML", "Microcode Level", "0.9.9", 10);
        assert_eq!(section.get("ML").unwrap().value(), "1.0.0");

        section.update_by_tag("ML", "Microcode Level", "2.0.0", 70);
        assert_eq!(section.get("ML").unwrap().value(), "2.0.0");
        assert_eq!(section.len(), 1);
    }

    #[test]
    fn test_update_by_tag_appends_when_absent() {
        let mut section = AttrSection::new(InsertPolicy::AppendAlways);
        section.update_by_tag("ML", "Microcode Level", "1.0.0", 10);
        assert_eq!(section.len(), 1);
        assert_eq!(section.get("ML").unwrap().value(), "1.0.0");
    }
}
