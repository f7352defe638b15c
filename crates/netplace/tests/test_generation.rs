mod common;
use common::assert_float_eq;

use std::fs;
use std::path::PathBuf;

use sugars::rc;

use netplace::core::config::GenerationConfig;
use netplace::core::dataset_writer::DatasetWriter;
use netplace::generation::{peak_hour, DatasetGenerator, GenerationStats};
use netplace::simulation::{SimulationEngine, TaskRun, TaskSpec, VmSpec};

/// Engine reporting the same execution window for every task.
struct FixedEngine {
    start_time: f64,
    finish_time: f64,
}

impl SimulationEngine for FixedEngine {
    fn run_task(&mut self, _vm: &VmSpec, _task: &TaskSpec) -> Option<TaskRun> {
        Some(TaskRun {
            start_time: self.start_time,
            finish_time: self.finish_time,
        })
    }
}

/// Engine that never completes a task.
struct FailingEngine;

impl SimulationEngine for FailingEngine {
    fn run_task(&mut self, _vm: &VmSpec, _task: &TaskSpec) -> Option<TaskRun> {
        None
    }
}

/// Engine that fails every second submission.
struct FlakyEngine {
    calls: u32,
}

impl SimulationEngine for FlakyEngine {
    fn run_task(&mut self, _vm: &VmSpec, _task: &TaskSpec) -> Option<TaskRun> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            return None;
        }
        Some(TaskRun {
            start_time: 0.,
            finish_time: 5.,
        })
    }
}

fn test_config(records: u32, seed: u64) -> GenerationConfig {
    GenerationConfig {
        records,
        random_seed: seed,
        ..Default::default()
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("netplace_{}.csv", name))
}

fn generate_to_file(config: GenerationConfig, engine: Box<dyn SimulationEngine>, name: &str) -> (GenerationStats, String) {
    let mut generator = DatasetGenerator::new(rc!(config), engine);
    let path = temp_path(name);
    let mut writer = DatasetWriter::from_path(&path).unwrap();
    let stats = generator.run(&mut writer).unwrap();
    drop(writer);
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    (stats, contents)
}

#[test]
fn test_peak_hour_blocks() {
    assert!(peak_hour(1, 400));
    assert!(peak_hour(199, 400));
    assert!(!peak_hour(200, 400));
    assert!(!peak_hour(399, 400));
    // 400 % 400 == 0, so the cycle restarts in the peak half.
    assert!(peak_hour(400, 400));
    assert!(peak_hour(401, 400));
    assert!(!peak_hour(600, 400));
}

#[test]
// Ten records with an always-succeeding engine produce a header plus ten
// rows of 68 columns with the expected per-field formats.
fn test_ten_records_end_to_end() {
    let (stats, contents) = generate_to_file(
        test_config(10, 42),
        Box::new(FixedEngine {
            start_time: 0.,
            finish_time: 5.,
        }),
        "ten_records",
    );
    assert_eq!(stats.written, 10);
    assert_eq!(stats.skipped, 0);

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].starts_with("vm_id,cpu_cores,ram,bandwidth_req,net_1_load,"));
    assert!(lines[0].ends_with("label_network_id,task_completion_time,throughput_achieved,task_type"));

    for (row, line) in lines[1..].iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 68);
        assert_eq!(fields[0], (row + 1).to_string());

        let cpu: u32 = fields[1].parse().unwrap();
        assert!([1, 2, 4].contains(&cpu));
        let ram: u64 = fields[2].parse().unwrap();
        assert!([512, 1024, 2048, 4096].contains(&ram));
        let bw_req: u32 = fields[3].parse().unwrap();
        assert!((50..300).contains(&bw_req));

        // Per-network columns: load and latency with two decimals,
        // available bandwidth as an integer.
        for i in 0..20 {
            let load: f64 = fields[4 + 3 * i].parse().unwrap();
            assert!((0. ..=1.).contains(&load));
            assert_eq!(fields[4 + 3 * i].split('.').nth(1).unwrap().len(), 2);
            let latency: f64 = fields[5 + 3 * i].parse().unwrap();
            assert!(latency >= 5.);
            let _avail: u32 = fields[6 + 3 * i].parse().unwrap();
        }

        let label: usize = fields[64].parse().unwrap();
        assert!((1..=20).contains(&label));
        assert_eq!(fields[65], "5.00");
        let throughput: f64 = fields[66].parse().unwrap();
        assert!(throughput >= 0. && throughput <= bw_req as f64);
        assert!(["cpu_bound", "io_bound", "mixed"].contains(&fields[67]));
    }
}

#[test]
// Equal seeds reproduce the dataset byte for byte; different seeds don't.
fn test_seed_reproducibility() {
    let engine = || {
        Box::new(FixedEngine {
            start_time: 0.,
            finish_time: 5.,
        })
    };
    let (_, first) = generate_to_file(test_config(10, 42), engine(), "seed_a");
    let (_, second) = generate_to_file(test_config(10, 42), engine(), "seed_b");
    let (_, third) = generate_to_file(test_config(10, 43), engine(), "seed_c");
    assert_eq!(first, second);
    assert_ne!(first, third);
}

#[test]
// A run where every simulation fails writes only the header and leaves the
// network state exactly as it started.
fn test_all_failures() {
    let mut generator = DatasetGenerator::new(rc!(test_config(10, 42)), Box::new(FailingEngine));
    let path = temp_path("all_failures");
    let mut writer = DatasetWriter::from_path(&path).unwrap();
    let stats = generator.run(&mut writer).unwrap();
    drop(writer);

    assert_eq!(stats, GenerationStats { written: 0, skipped: 10 });
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    fs::remove_file(&path).unwrap();

    for net in generator.model().networks() {
        assert_eq!(net.active_vms, 0);
        assert_eq!(net.bw_used, 0);
    }
}

#[test]
// Failed indices are consumed without producing rows: the row deficit
// equals the skip count.
fn test_partial_failures() {
    let (stats, contents) = generate_to_file(test_config(10, 42), Box::new(FlakyEngine { calls: 0 }), "partial");
    assert_eq!(stats.written + stats.skipped, 10);
    assert_eq!(stats.written, 5);
    assert_eq!(stats.skipped, 5);
    assert_eq!(contents.lines().count() as u32, stats.written + 1);
}

#[test]
// Rows are emitted before the reservation is released: the selected
// network's available bandwidth plus the request equals its capacity, and
// the reservation is gone afterwards.
fn test_snapshot_carries_reservation() {
    let mut generator = DatasetGenerator::new(
        rc!(test_config(10, 42)),
        Box::new(FixedEngine {
            start_time: 0.,
            finish_time: 5.,
        }),
    );
    for vm_id in 1..=10 {
        let record = generator.generate_record(vm_id, peak_hour(vm_id, 400)).unwrap();

        assert_eq!(record.networks.len(), 20);
        let selected = &record.networks[record.label_network];
        let capacity = selected.bw_available + record.bandwidth_req;
        assert!((800..1200).contains(&capacity));
        assert_float_eq(record.completion_time, 5., 1e-12);

        for net in generator.model().networks() {
            assert_eq!(net.active_vms, 0);
            assert_eq!(net.bw_used, 0);
        }
    }
}
