//! Simple decoder to inspect packed VPD record files.
//!
//! Reads one packed record and prints its populated fields. Pass `system`
//! as the second argument for the machine root record; the default is a
//! component record.

use std::fs;

use vpd::{Attribute, Component, System, unpack_component, unpack_system};

fn print_attr(name: &str, attr: &Attribute) {
    if !attr.value().is_empty() {
        println!("  {:<14} [{:<2}] {}", name, attr.tag(), attr.value());
    }
}

fn dump_component(comp: &Component) {
    println!("\n=== Record Info ===");
    println!("ID: {}", comp.record_id());
    if !comp.parent_id().is_empty() {
        println!("Parent: {}", comp.parent_id());
    }

    println!("\n=== Fields ===");
    print_attr("description", &comp.description);
    print_attr("serial", &comp.serial_number);
    print_attr("part number", &comp.part_number);
    print_attr("FRU", &comp.fru);
    print_attr("manufacturer", &comp.manufacturer);
    print_attr("model", &comp.model);
    print_attr("firmware", &comp.firmware_level);
    print_attr("location", &comp.physical_location);
    print_attr("device class", &comp.dev_class);
    print_attr("driver", &comp.dev_driver);

    println!("\n=== Children ({}) ===", comp.children.len());
    for child in &comp.children {
        println!("  {}", child);
    }

    println!("\n=== Device Specific ({}) ===", comp.device_specific.len());
    for item in &comp.device_specific {
        println!("  [{}] {} = {}", item.tag(), item.label(), item.value());
    }

    if !comp.user_data.is_empty() {
        println!("\n=== User Data ({}) ===", comp.user_data.len());
        for item in &comp.user_data {
            println!("  [{}] {} = {}", item.tag(), item.label(), item.value());
        }
    }

    if !comp.alt_names.is_empty() {
        println!("\n=== Alternate Names ({}) ===", comp.alt_names.len());
        for item in &comp.alt_names {
            println!("  {}", item.value());
        }
    }
}

fn dump_system(sys: &System) {
    println!("\n=== System Info ===");
    println!("ID: {}", sys.record_id());
    println!("CPUs: {}", sys.cpu_count);

    println!("\n=== Fields ===");
    print_attr("description", &sys.description);
    print_attr("arch", &sys.arch);
    print_attr("machine type", &sys.machine_type);
    print_attr("machine model", &sys.machine_model);
    print_attr("serial", &sys.serial_num_1);
    print_attr("OS", &sys.os);
    print_attr("node name", &sys.node_name);
    print_attr("location", &sys.location_code);

    println!("\n=== Children ({}) ===", sys.children.len());
    for child in &sys.children {
        println!("  {}", child);
    }

    println!("\n=== Device Specific ({}) ===", sys.device_specific.len());
    for item in &sys.device_specific {
        println!("  [{}] {} = {}", item.tag(), item.label(), item.value());
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("usage: dump_record <file> [system]");
    let as_system = args.next().as_deref() == Some("system");

    println!("Reading: {}", path);
    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    if as_system {
        dump_system(&unpack_system(&data).expect("Failed to decode"));
    } else {
        dump_component(&unpack_component(&data).expect("Failed to decode"));
    }
}
