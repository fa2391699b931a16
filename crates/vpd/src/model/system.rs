//! The machine root VPD record.

use crate::model::{AttrSection, Attribute, InsertPolicy};

/// Well-known storage key and record ID of the System root.
pub const SYSTEM_ID: &str = "/sys/bus";

/// Number of fixed attribute fields in a [`System`].
pub(crate) const FIXED_FIELD_COUNT: usize = 18;

/// Fixed-field names in wire order; must match [`System::fixed_fields`].
pub(crate) const FIELD_NAMES: [&str; FIXED_FIELD_COUNT] = [
    "idNode",
    "arch",
    "deviceTreeNode",
    "description",
    "brand",
    "nodeName",
    "os",
    "processorID",
    "machineType",
    "machineModel",
    "featureCode",
    "flagField",
    "recordType",
    "serialNum1",
    "serialNum2",
    "suid",
    "keywordVersion",
    "locationCode",
];

/// The root record of a machine inventory: 18 fixed attribute fields, a CPU
/// count, child record IDs, and device-specific/user attribute sections.
/// Unlike [`Component`](crate::model::Component) it carries no alternate-name
/// section.
///
/// Exactly one System exists per inventory, stored under [`SYSTEM_ID`]; a
/// fresh record installs that ID at preference level 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct System {
    pub cpu_count: u32,

    pub id_node: Attribute,
    pub arch: Attribute,
    pub device_tree_node: Attribute,
    pub description: Attribute,
    pub brand: Attribute,
    pub node_name: Attribute,
    pub os: Attribute,
    pub processor_id: Attribute,
    pub machine_type: Attribute,
    pub machine_model: Attribute,
    pub feature_code: Attribute,
    pub flag_field: Attribute,
    pub record_type: Attribute,
    pub serial_num_1: Attribute,
    pub serial_num_2: Attribute,
    pub suid: Attribute,
    pub keyword_version: Attribute,
    pub location_code: Attribute,

    /// IDs of top-level child records; resolved through the inventory arena.
    pub children: Vec<String>,
    pub device_specific: AttrSection,
    pub user_data: AttrSection,
}

impl Default for System {
    fn default() -> Self {
        let mut id_node = Attribute::default();
        id_node.set_value(SYSTEM_ID, 100);

        System {
            cpu_count: 1,
            id_node,
            arch: Attribute::default(),
            device_tree_node: Attribute::default(),
            description: Attribute::new("DS", "Description"),
            brand: Attribute::new("BR", "Brand Keyword"),
            node_name: Attribute::default(),
            os: Attribute::new("OS", "Operating System"),
            processor_id: Attribute::new("PI", "Processor ID or unique ID"),
            machine_type: Attribute::new("TM", "Machine Type"),
            machine_model: Attribute::new("TM", "Machine Model"),
            feature_code: Attribute::new("FC", "Feature Code"),
            flag_field: Attribute::new("FG", "Flag Field"),
            record_type: Attribute::new("RT", "Record Type"),
            serial_num_1: Attribute::new("SE", "Machine or Cabinet Serial Number"),
            serial_num_2: Attribute::new("SE", "Machine or Cabinet Serial Number"),
            suid: Attribute::new("SU", "System Unique ID"),
            keyword_version: Attribute::new("VK", "Version of Keywords"),
            location_code: Attribute::new("YL", "Location Code"),
            children: Vec::new(),
            device_specific: AttrSection::new(InsertPolicy::AppendAlways),
            user_data: AttrSection::new(InsertPolicy::UpsertByTag),
        }
    }
}

impl System {
    /// Creates an empty root record with default field descriptors and the
    /// well-known ID installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed fields in wire order.
    pub(crate) fn fixed_fields(&self) -> [&Attribute; FIXED_FIELD_COUNT] {
        [
            &self.id_node,
            &self.arch,
            &self.device_tree_node,
            &self.description,
            &self.brand,
            &self.node_name,
            &self.os,
            &self.processor_id,
            &self.machine_type,
            &self.machine_model,
            &self.feature_code,
            &self.flag_field,
            &self.record_type,
            &self.serial_num_1,
            &self.serial_num_2,
            &self.suid,
            &self.keyword_version,
            &self.location_code,
        ]
    }

    pub(crate) fn fixed_fields_mut(&mut self) -> [&mut Attribute; FIXED_FIELD_COUNT] {
        [
            &mut self.id_node,
            &mut self.arch,
            &mut self.device_tree_node,
            &mut self.description,
            &mut self.brand,
            &mut self.node_name,
            &mut self.os,
            &mut self.processor_id,
            &mut self.machine_type,
            &mut self.machine_model,
            &mut self.feature_code,
            &mut self.flag_field,
            &mut self.record_type,
            &mut self.serial_num_1,
            &mut self.serial_num_2,
            &mut self.suid,
            &mut self.keyword_version,
            &mut self.location_code,
        ]
    }

    /// Record ID: the value of the `idNode` field, normally [`SYSTEM_ID`].
    pub fn record_id(&self) -> &str {
        self.id_node.value()
    }

    pub fn add_child(&mut self, id: impl Into<String>) {
        self.children.push(id.into());
    }

    /// Removes the first child entry matching `id`; silent if absent.
    pub fn remove_child(&mut self, id: &str) {
        if let Some(at) = self.children.iter().position(|c| c == id) {
            self.children.remove(at);
        }
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.iter().any(|c| c == id)
    }

    pub fn add_device_specific(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        self.device_specific.insert(tag, label, value, level);
    }

    /// Inserts a user attribute; an existing tag is replaced in place.
    pub fn add_user(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        self.user_data.insert(tag, label, value, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_system_installs_well_known_id() {
        let sys = System::new();
        assert_eq!(sys.record_id(), SYSTEM_ID);
        assert_eq!(sys.id_node.pref_level(), 100);
        assert_eq!(sys.id_node.tag(), "");
        assert_eq!(sys.cpu_count, 1);
    }

    #[test]
    fn test_default_descriptors() {
        let sys = System::new();
        assert_eq!(sys.description.tag(), "DS");
        assert_eq!(sys.description.label(), "Description");
        assert_eq!(sys.serial_num_1.tag(), "SE");
        assert_eq!(sys.serial_num_2.tag(), "SE");
        assert_eq!(sys.arch.tag(), "");
        assert_eq!(sys.node_name.label(), "");
    }

    #[test]
    fn test_field_arrays_share_one_order() {
        let mut sys = System::new();
        for (i, field) in sys.fixed_fields_mut().into_iter().enumerate() {
            field.force_value(&format!("marker-{i}"), 100);
        }
        for (i, field) in sys.fixed_fields().into_iter().enumerate() {
            assert_eq!(field.value(), format!("marker-{i}"));
        }
        assert_eq!(FIELD_NAMES.len(), FIXED_FIELD_COUNT);
        assert_eq!(FIELD_NAMES[0], "idNode");
        assert_eq!(FIELD_NAMES[FIXED_FIELD_COUNT - 1], "locationCode");
    }

    #[test]
    fn test_low_preference_cannot_displace_well_known_id() {
        let mut sys = System::new();
        assert!(!sys.id_node.set_value("/other/key", 50));
        assert_eq!(sys.record_id(), SYSTEM_ID);
    }
}
