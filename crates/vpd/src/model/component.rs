//! The per-device VPD record.

use crate::model::{AttrSection, Attribute, InsertPolicy};

/// Number of fixed attribute fields in a [`Component`].
pub(crate) const FIXED_FIELD_COUNT: usize = 37;

/// Fixed-field names in wire order, used for decode error context. The order
/// is part of the on-disk format and must match [`Component::fixed_fields`].
pub(crate) const FIELD_NAMES: [&str; FIXED_FIELD_COUNT] = [
    "id",
    "deviceTreeNode",
    "sysFsNode",
    "sysFsLinkTarget",
    "halUDI",
    "netAddr",
    "devClass",
    "description",
    "cdField",
    "serialNumber",
    "partNumber",
    "firmwareLevel",
    "firmwareVersion",
    "fru",
    "manufacturer",
    "model",
    "manufacturerID",
    "engChangeLevel",
    "parent",
    "devSubsystem",
    "devDriver",
    "devKernel",
    "devKernelNumber",
    "devSysName",
    "devDevTreeName",
    "devBus",
    "devBusAddr",
    "recordType",
    "scsiDetail",
    "n5",
    "n6",
    "plantMfg",
    "featureCode",
    "keywordVersion",
    "microCodeImage",
    "secondLocation",
    "physicalLocation",
];

const ALT_NAME_TAG: &str = "AX";
const ALT_NAME_LABEL: &str = "AIX Name";

/// A single device record: 37 fixed attribute fields plus four
/// variable-length sections (child record IDs, device-specific attributes,
/// user attributes, alternate names).
///
/// A fresh record carries the default tag and label for every fixed field;
/// those descriptors are serialized, so they are part of the format. Field
/// values are only installed through the preference-watermark rule on
/// [`Attribute`].
///
/// Records reference each other by ID (the `children` list and the `parent`
/// field value); resolving those references is the job of the
/// [`Inventory`](crate::tree::Inventory) arena, never of the record itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    // Discovery nodes: where this device appears in the kernel trees.
    pub id: Attribute,
    pub device_tree_node: Attribute,
    pub sys_fs_node: Attribute,
    pub sys_fs_link_target: Attribute,
    pub hal_udi: Attribute,
    pub net_addr: Attribute,
    pub dev_class: Attribute,

    // Standard VPD keywords.
    pub description: Attribute,
    pub cd_field: Attribute,
    pub serial_number: Attribute,
    pub part_number: Attribute,
    pub firmware_level: Attribute,
    pub firmware_version: Attribute,
    pub fru: Attribute,
    pub manufacturer: Attribute,
    pub model: Attribute,
    pub manufacturer_id: Attribute,
    pub eng_change_level: Attribute,

    /// ID of the parent record in the inventory tree.
    pub parent: Attribute,

    // Kernel-reported device identity.
    pub dev_subsystem: Attribute,
    pub dev_driver: Attribute,
    pub dev_kernel: Attribute,
    pub dev_kernel_number: Attribute,
    pub dev_sys_name: Attribute,
    pub dev_dev_tree_name: Attribute,
    pub dev_bus: Attribute,
    pub dev_bus_addr: Attribute,

    pub record_type: Attribute,
    /// Raw detail block reported by SCSI inquiry.
    pub scsi_detail: Attribute,
    /// Processor CoD capacity card info.
    pub n5: Attribute,
    /// Memory CoD capacity card info.
    pub n6: Attribute,
    pub plant_mfg: Attribute,
    pub feature_code: Attribute,
    pub keyword_version: Attribute,
    pub micro_code_image: Attribute,
    pub second_location: Attribute,
    /// Packed and unpacked last among the fixed fields.
    pub physical_location: Attribute,

    /// IDs of child records; resolved through the inventory arena.
    pub children: Vec<String>,
    pub device_specific: AttrSection,
    pub user_data: AttrSection,
    pub alt_names: AttrSection,
}

impl Default for Component {
    fn default() -> Self {
        Component {
            id: Attribute::new("None", "Main Device Node, equals sysFsNode or deviceTreeNode"),
            device_tree_node: Attribute::new("None", "/proc/device-tree Device Node"),
            sys_fs_node: Attribute::new("None", "/sys Device Node"),
            sys_fs_link_target: Attribute::new("None", "/sys/bus Device Node"),
            hal_udi: Attribute::default(),
            net_addr: Attribute::new("NA", "Network Address"),
            dev_class: Attribute::new("None", "/sys/class - Device Node"),
            description: Attribute::new("DS", "Displayable Message"),
            cd_field: Attribute::new("CD", "Card ID"),
            serial_number: Attribute::new("SN", "Serial Number"),
            part_number: Attribute::new("PN", "Part Number of assembly"),
            firmware_level: Attribute::new("RL", "Non-alterable ROM level"),
            firmware_version: Attribute::new("RM", "Alterable ROM Level"),
            fru: Attribute::new("FN", "Field Replaceable Unit Number"),
            manufacturer: Attribute::new("MF", "Manufacturer Name"),
            model: Attribute::new("TM", "Machine Type-Model"),
            manufacturer_id: Attribute::new("MN", "Manufacturer ID"),
            eng_change_level: Attribute::new("EC", "Engineering Change Level"),
            parent: Attribute::new("Parent Node", "Parent Node"),
            dev_subsystem: Attribute::default(),
            dev_driver: Attribute::new("DD", "Device Driver Level"),
            dev_kernel: Attribute::default(),
            dev_kernel_number: Attribute::default(),
            dev_sys_name: Attribute::new("", "Device name from sysFS"),
            dev_dev_tree_name: Attribute::new("", "Device name from /proc/device-tree"),
            dev_bus: Attribute::new("", "Device Bus"),
            dev_bus_addr: Attribute::default(),
            record_type: Attribute::new("RT", "Record Type"),
            scsi_detail: Attribute::new("ZZ", "Device Details"),
            n5: Attribute::new("N5", "Processor CoD Capacity Card Info"),
            n6: Attribute::new("N6", "Memory CoD Capacity Card Info"),
            plant_mfg: Attribute::new("SE", "Plant of manufacture"),
            feature_code: Attribute::new(
                "FC",
                "Feature Code or Request for Price Quotation (RPQ) number",
            ),
            keyword_version: Attribute::new("VK", "Keyword Version"),
            micro_code_image: Attribute::new("MI", "Micro Code Image"),
            second_location: Attribute::new("YL", "Location Code"),
            physical_location: Attribute::new("YL", "Location Code"),
            children: Vec::new(),
            device_specific: AttrSection::new(InsertPolicy::AppendAlways),
            user_data: AttrSection::new(InsertPolicy::UpsertByTag),
            alt_names: AttrSection::new(InsertPolicy::DedupeByValue),
        }
    }
}

impl Component {
    /// Creates an empty record with default field descriptors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed fields in wire order. The codec walks this array for both pack
    /// and unpack; [`FIELD_NAMES`] mirrors the same order.
    pub(crate) fn fixed_fields(&self) -> [&Attribute; FIXED_FIELD_COUNT] {
        [
            &self.id,
            &self.device_tree_node,
            &self.sys_fs_node,
            &self.sys_fs_link_target,
            &self.hal_udi,
            &self.net_addr,
            &self.dev_class,
            &self.description,
            &self.cd_field,
            &self.serial_number,
            &self.part_number,
            &self.firmware_level,
            &self.firmware_version,
            &self.fru,
            &self.manufacturer,
            &self.model,
            &self.manufacturer_id,
            &self.eng_change_level,
            &self.parent,
            &self.dev_subsystem,
            &self.dev_driver,
            &self.dev_kernel,
            &self.dev_kernel_number,
            &self.dev_sys_name,
            &self.dev_dev_tree_name,
            &self.dev_bus,
            &self.dev_bus_addr,
            &self.record_type,
            &self.scsi_detail,
            &self.n5,
            &self.n6,
            &self.plant_mfg,
            &self.feature_code,
            &self.keyword_version,
            &self.micro_code_image,
            &self.second_location,
            &self.physical_location,
        ]
    }

    pub(crate) fn fixed_fields_mut(&mut self) -> [&mut Attribute; FIXED_FIELD_COUNT] {
        [
            &mut self.id,
            &mut self.device_tree_node,
            &mut self.sys_fs_node,
            &mut self.sys_fs_link_target,
            &mut self.hal_udi,
            &mut self.net_addr,
            &mut self.dev_class,
            &mut self.description,
            &mut self.cd_field,
            &mut self.serial_number,
            &mut self.part_number,
            &mut self.firmware_level,
            &mut self.firmware_version,
            &mut self.fru,
            &mut self.manufacturer,
            &mut self.model,
            &mut self.manufacturer_id,
            &mut self.eng_change_level,
            &mut self.parent,
            &mut self.dev_subsystem,
            &mut self.dev_driver,
            &mut self.dev_kernel,
            &mut self.dev_kernel_number,
            &mut self.dev_sys_name,
            &mut self.dev_dev_tree_name,
            &mut self.dev_bus,
            &mut self.dev_bus_addr,
            &mut self.record_type,
            &mut self.scsi_detail,
            &mut self.n5,
            &mut self.n6,
            &mut self.plant_mfg,
            &mut self.feature_code,
            &mut self.keyword_version,
            &mut self.micro_code_image,
            &mut self.second_location,
            &mut self.physical_location,
        ]
    }

    /// Record ID: the value of the `id` field.
    pub fn record_id(&self) -> &str {
        self.id.value()
    }

    /// ID of this record's parent, empty for roots and unlinked records.
    pub fn parent_id(&self) -> &str {
        self.parent.value()
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

    /// Appends a device-specific attribute. Duplicate tags are permitted;
    /// firmware reports several levels under the same tag.
    pub fn add_device_specific(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        self.device_specific.insert(tag, label, value, level);
    }

    /// Updates the first device-specific attribute with a matching tag
    /// through the watermark rule, appending if the tag is absent.
    pub fn update_device_specific(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        self.device_specific.update_by_tag(tag, label, value, level);
    }

    /// Inserts a user attribute; an existing tag is replaced in place.
    pub fn add_user(&mut self, tag: &str, label: &str, value: &str, level: i32) {
        self.user_data.insert(tag, label, value, level);
    }

    /// Records an alternate device name unless that name is already present.
    pub fn add_alt_name(&mut self, value: &str, level: i32) {
        self.alt_names.insert(ALT_NAME_TAG, ALT_NAME_LABEL, value, level);
    }
}
