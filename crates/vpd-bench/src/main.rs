//! Benchmark for VPD record packing using a synthetic machine inventory.
//!
//! Builds a three-level device tree the size of a well-populated server,
//! then times pack, unpack, and a full store round trip.

use std::time::Instant;

use vpd::{
    Component, MemStore, System, load_inventory, pack_component, pack_system,
    packed_component_size, persist_component, persist_system, unpack_component, unpack_system,
};

// =============================================================================
// SYNTHETIC INVENTORY
// =============================================================================

const BUS_COUNT: usize = 8;
const DEVICES_PER_BUS: usize = 32;
const FUNCTIONS_PER_DEVICE: usize = 4;

fn bus_id(bus: usize) -> String {
    format!("/sys/devices/pci{:04}:00", bus)
}

fn device_id(bus: usize, dev: usize) -> String {
    format!("{}/{:04}:00:{:02}.0", bus_id(bus), bus, dev)
}

fn function_id(bus: usize, dev: usize, func: usize) -> String {
    format!("{}/fn{}", device_id(bus, dev), func)
}

fn make_component(id: &str, parent: &str, ordinal: usize) -> Component {
    let mut comp = Component::new();
    comp.id.set_value(id, 60);
    comp.parent.set_value(parent, 60);
    comp.description
        .set_value(&format!("Synthetic Device {ordinal}"), 50);
    comp.serial_number
        .set_value(&format!("SN{ordinal:08}"), 30);
    comp.part_number.set_value(&format!("74Y{ordinal:04}"), 30);
    comp.fru.set_value(&format!("00E{ordinal:04}"), 30);
    comp.manufacturer.set_value("IBM", 30);
    comp.physical_location
        .set_value(&format!("U78CB.001.WZS0095-P{}", ordinal % 4 + 1), 60);
    let level = format!("1.{}.{}", ordinal % 7, ordinal % 13);
    comp.add_device_specific("ML", "Microcode Level", &level, 50);
    comp.add_device_specific("MG", "Microcode Build Date", "20250801", 50);
    if ordinal % 3 == 0 {
        comp.add_alt_name(&format!("ent{ordinal}"), 40);
    }
    comp
}

fn build_inventory() -> (System, Vec<Component>) {
    let mut system = System::new();
    system.cpu_count = 16;
    system.arch.set_value("ppc64le", 50);
    system.machine_type.set_value("8247", 60);
    system.machine_model.set_value("22L", 60);
    system.serial_num_1.set_value("WZS0095", 60);

    let mut components = Vec::new();
    let mut ordinal = 0;
    for bus in 0..BUS_COUNT {
        let bus_path = bus_id(bus);
        system.add_child(&bus_path);
        let mut bus_comp = make_component(&bus_path, "/sys/bus", ordinal);
        ordinal += 1;

        for dev in 0..DEVICES_PER_BUS {
            let dev_path = device_id(bus, dev);
            bus_comp.add_child(&dev_path);
            let mut dev_comp = make_component(&dev_path, &bus_path, ordinal);
            ordinal += 1;

            for func in 0..FUNCTIONS_PER_DEVICE {
                let func_path = function_id(bus, dev, func);
                dev_comp.add_child(&func_path);
                components.push(make_component(&func_path, &dev_path, ordinal));
                ordinal += 1;
            }
            components.push(dev_comp);
        }
        components.push(bus_comp);
    }

    (system, components)
}

// =============================================================================
// BENCHMARK
// =============================================================================

fn main() {
    let build_start = Instant::now();
    let (system, components) = build_inventory();
    println!(
        "Built {} components in {:?}",
        components.len(),
        build_start.elapsed()
    );

    // Pack everything once for sizing and reuse.
    let mut blobs: Vec<Vec<u8>> = Vec::with_capacity(components.len());
    let mut total_bytes = 0usize;
    let pack_start = Instant::now();
    for comp in &components {
        let blob = pack_component(comp).expect("Failed to pack");
        total_bytes += blob.len();
        blobs.push(blob);
    }
    let system_blob = pack_system(&system).expect("Failed to pack system");
    total_bytes += system_blob.len();
    let pack_time = pack_start.elapsed();

    println!(
        "\nPack: {} records, {} bytes in {:?}",
        components.len() + 1,
        total_bytes,
        pack_time
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (total_bytes as f64 / 1_000_000.0) / pack_time.as_secs_f64()
    );
    println!(
        "  Average record: {} bytes",
        total_bytes / (components.len() + 1)
    );

    // Declared sizes must agree with the true buffer lengths.
    for (comp, blob) in components.iter().zip(&blobs) {
        assert_eq!(packed_component_size(comp), blob.len());
    }

    // Unpack, averaged over a few passes.
    const UNPACK_ITERS: u32 = 10;
    for _ in 0..3 {
        let _ = unpack_component(&blobs[0]).expect("Failed to unpack");
    }
    let unpack_start = Instant::now();
    for _ in 0..UNPACK_ITERS {
        for blob in &blobs {
            let _ = unpack_component(blob).expect("Failed to unpack");
        }
        let _ = unpack_system(&system_blob).expect("Failed to unpack system");
    }
    let unpack_time = unpack_start.elapsed() / UNPACK_ITERS;

    println!(
        "\nUnpack: {} records in {:?} (avg of {} iterations)",
        components.len() + 1,
        unpack_time,
        UNPACK_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (total_bytes as f64 / 1_000_000.0) / unpack_time.as_secs_f64()
    );

    // Round-trip sanity on one record.
    let decoded = unpack_component(&blobs[0]).expect("Failed to unpack");
    assert_eq!(decoded, components[0]);

    // Full store round trip: persist everything, then load the tree back.
    let persist_start = Instant::now();
    let mut store = MemStore::new();
    persist_system(&mut store, &system).expect("Failed to persist system");
    for comp in &components {
        persist_component(&mut store, comp).expect("Failed to persist");
    }
    let persist_time = persist_start.elapsed();
    println!(
        "\nPersist: {} records in {:?}",
        store.len(),
        persist_time
    );

    let load_start = Instant::now();
    let inventory = load_inventory(&store).expect("Failed to load inventory");
    let load_time = load_start.elapsed();

    println!(
        "Load inventory: {} components in {:?}",
        inventory.len(),
        load_time
    );
    println!(
        "  Throughput: {:.0} records/s",
        inventory.len() as f64 / load_time.as_secs_f64()
    );
    assert_eq!(inventory.len(), components.len());
    assert_eq!(inventory.children_of("/sys/bus").len(), BUS_COUNT);

    // Summary
    println!("\n=== Summary ===");
    println!("Components: {}", components.len());
    println!(
        "Tree: {} buses x {} devices x {} functions",
        BUS_COUNT, DEVICES_PER_BUS, FUNCTIONS_PER_DEVICE
    );
    println!(
        "Packed size: {} bytes ({:.2} MB)",
        total_bytes,
        total_bytes as f64 / 1_000_000.0
    );
    println!("System CPUs: {}", inventory.system().cpu_count);
}
